use super::domain::{CanonicalMatch, CutoffRow, UNKNOWN_CITY};
use super::eligibility::is_eligible;

/// Map one canonical row to the match record shown to callers.
pub fn project_match(row: &CutoffRow, student_score: f64) -> CanonicalMatch {
    let city = row
        .city
        .as_deref()
        .filter(|city| !city.is_empty())
        .unwrap_or(UNKNOWN_CITY);

    CanonicalMatch {
        institution: row.institution.clone(),
        city: city.to_string(),
        program: row.program.clone(),
        category: row.category.clone(),
        institution_type: row.institution_type.clone(),
        cutoffs: row.cutoffs,
        eligible: is_eligible(&row.cutoffs, student_score),
    }
}

pub fn project_matches<'a, I>(rows: I, student_score: f64) -> Vec<CanonicalMatch>
where
    I: IntoIterator<Item = &'a CutoffRow>,
{
    rows.into_iter()
        .map(|row| project_match(row, student_score))
        .collect()
}
