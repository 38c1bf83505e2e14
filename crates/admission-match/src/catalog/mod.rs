//! CSV import for cutoff catalog exports.

mod normalizer;
mod parser;

use crate::matching::CutoffRow;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read cutoff export: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid cutoff CSV data: {}", err),
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads raw cutoff rows from a CSV export. Rows are returned as found,
/// duplicates included.
pub struct CutoffCatalogImporter;

impl CutoffCatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CutoffRow>, CatalogImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let rows = Self::from_reader(file)?;
        info!(path = %path.display(), rows = rows.len(), "cutoff catalog imported");
        Ok(rows)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CutoffRow>, CatalogImportError> {
        Ok(parser::parse_rows(reader)?)
    }
}
