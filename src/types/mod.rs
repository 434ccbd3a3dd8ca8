//! Data model: cities, rule sets, and decisions.
//!
//! String forms:
//! - City: `Name-Province-Country`, e.g. `Paris-Ile-de-France-France`
//! - Decision: `YES` / `NO` in text, `GRANTED` / `DENIED` in JSON
//! - CityAttribute: `country`, `province`, `name`

mod city;
mod decision;
mod rule_set;

pub use city::{City, CityAttribute};
pub use decision::{Decision, DecisionReason, Evaluation};
pub use rule_set::{DistributorId, DistributorRequest, PermissionRuleSet};
