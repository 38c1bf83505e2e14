use super::normalizer::clean_cell;
use crate::matching::{CutoffRow, RoundCutoffs};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::str::FromStr;

/// Parse a cutoff export using the data store's column names.
pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<CutoffRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<CatalogRow>() {
        let row = record?;
        rows.push(row.into_cutoff_row());
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "college_name")]
    institution: String,
    #[serde(rename = "branch_name")]
    program: String,
    category: String,
    #[serde(rename = "cap1_cutoff", default, deserialize_with = "optional_number")]
    round1: Option<f64>,
    #[serde(rename = "cap2_cutoff", default, deserialize_with = "optional_number")]
    round2: Option<f64>,
    #[serde(rename = "cap3_cutoff", default, deserialize_with = "optional_number")]
    round3: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    #[serde(rename = "college_type", default)]
    institution_type: String,
    #[serde(default, deserialize_with = "optional_number")]
    year: Option<i32>,
}

impl CatalogRow {
    fn into_cutoff_row(self) -> CutoffRow {
        CutoffRow {
            institution: clean_cell(&self.institution),
            program: clean_cell(&self.program),
            category: clean_cell(&self.category),
            cutoffs: RoundCutoffs::new(self.round1, self.round2, self.round3),
            city: self
                .city
                .map(|city| clean_cell(&city))
                .filter(|city| !city.is_empty()),
            institution_type: clean_cell(&self.institution_type),
            year: self.year,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn optional_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let opt = empty_string_as_none(deserializer)?;
    opt.map(|value| {
        value.trim().parse::<T>().map_err(|err| {
            serde::de::Error::custom(format!("invalid number '{value}': {err}"))
        })
    })
    .transpose()
}
