// src/lib.rs
pub use catalog::{CityCatalog, HEADER_SENTINEL};
pub use driver::{
    DriverOptions, EvaluationDriver, EvaluationRecord, FailurePolicy, Outcome, RunSummary,
};
pub use engine::{PermissionEngine, evaluate_level};
pub use error::TerritoryError;
pub use hierarchy::{Hierarchy, HierarchyBuilder};
pub use loader::{requests_from_json, requests_from_path, split_regions};
pub use matcher::{MatchMode, find_match, matches};
pub use report::{CollectingSink, JsonLinesSink, ReportSink, TextSink};
pub use types::{
    City, CityAttribute, Decision, DecisionReason, DistributorId, DistributorRequest, Evaluation,
    PermissionRuleSet,
};

pub mod catalog;
pub mod prompt;
pub mod report;

mod driver;
mod engine;
mod error;
mod hierarchy;
mod loader;
mod matcher;
mod types;
