use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum TerritoryError {
    #[error("cyclic permission hierarchy for distributor '{distributor}': {}", .chain.iter().join(" -> "))]
    CyclicHierarchy {
        distributor: String,
        chain: Vec<String>,
    },

    #[error("unknown distributor: {0}")]
    UnknownDistributor(String),

    #[error("distributor '{distributor}' names unknown parent '{parent}'")]
    UnknownParent { distributor: String, parent: String },

    #[error("duplicate distributor: {0}")]
    DuplicateDistributor(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("input error: {0}")]
    Input(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TerritoryError {
    fn from(err: std::io::Error) -> Self {
        TerritoryError::Io(err.to_string())
    }
}

impl From<csv::Error> for TerritoryError {
    fn from(err: csv::Error) -> Self {
        TerritoryError::Catalog(err.to_string())
    }
}

impl From<serde_json::Error> for TerritoryError {
    fn from(err: serde_json::Error) -> Self {
        TerritoryError::InvalidFormat(err.to_string())
    }
}
