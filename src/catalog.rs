//! City catalog ingestion from CSV exports.
//!
//! Rows are read positionally. Any row whose first field is the header
//! sentinel `City Code` is skipped, wherever it appears; every other row
//! must carry at least six fields.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::error::TerritoryError;
use crate::types::City;

/// First-field value that marks a header row.
pub const HEADER_SENTINEL: &str = "City Code";

const CODE_COLUMN: usize = 0;
const NAME_COLUMN: usize = 3;
const PROVINCE_COLUMN: usize = 4;
const COUNTRY_COLUMN: usize = 5;

/// An ordered, read-only list of cities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityCatalog {
    cities: Vec<City>,
}

impl CityCatalog {
    pub fn new(cities: Vec<City>) -> Self {
        Self { cities }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TerritoryError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            TerritoryError::Catalog(format!("failed to open '{}': {e}", path.display()))
        })?;
        let catalog = Self::from_reader(file)?;
        info!(
            event = "Catalog",
            phase = "Loaded",
            path = %path.display(),
            cities = catalog.len()
        );
        Ok(catalog)
    }

    pub fn from_csv_str(text: &str) -> Result<Self, TerritoryError> {
        Self::from_reader(text.as_bytes())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TerritoryError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut cities = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            // Line the record starts on, not the record count.
            let line = record
                .position()
                .map_or(index as u64 + 1, |position| position.line());
            if record.get(CODE_COLUMN) == Some(HEADER_SENTINEL) {
                debug!(event = "Catalog", phase = "SkipHeader", line);
                continue;
            }
            cities.push(city_from_record(&record, line)?);
        }

        Ok(Self { cities })
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn into_cities(self) -> Vec<City> {
        self.cities
    }
}

fn city_from_record(record: &StringRecord, line: u64) -> Result<City, TerritoryError> {
    let field = |column: usize| {
        record.get(column).ok_or_else(|| {
            TerritoryError::Catalog(format!(
                "line {line}: expected at least {} fields, found {}",
                COUNTRY_COLUMN + 1,
                record.len()
            ))
        })
    };

    Ok(City::new(
        field(CODE_COLUMN)?,
        field(NAME_COLUMN)?,
        field(PROVINCE_COLUMN)?,
        field(COUNTRY_COLUMN)?,
    ))
}
