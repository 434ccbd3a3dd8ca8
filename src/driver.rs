//! Runs every city against every distributor and feeds a report sink.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::engine::PermissionEngine;
use crate::error::TerritoryError;
use crate::report::{CollectingSink, ReportSink};
use crate::types::{City, Decision, DistributorId, Evaluation};

/// What happens when one (distributor, city) pair cannot be evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Report the failure as a record and keep going.
    #[default]
    Continue,
    /// Stop at the first failure without reporting anything.
    Abort,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DriverOptions {
    pub failure_policy: FailurePolicy,
    /// Evaluate cities on the rayon pool. Needs the `parallel` feature;
    /// ignored otherwise. Output order is unchanged.
    pub parallel: bool,
}

/// Result of evaluating one pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Decided(Evaluation),
    Failed(TerritoryError),
}

/// One line of the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluationRecord {
    pub distributor: String,
    pub city: City,
    pub outcome: Outcome,
}

impl EvaluationRecord {
    pub fn decision(&self) -> Option<Decision> {
        match &self.outcome {
            Outcome::Decided(evaluation) => Some(evaluation.decision),
            Outcome::Failed(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunSummary {
    pub evaluated: usize,
    pub granted: usize,
    pub denied: usize,
    pub failed: usize,
}

impl RunSummary {
    fn tally(&mut self, record: &EvaluationRecord) {
        self.evaluated += 1;
        match record.decision() {
            Some(Decision::Granted) => self.granted += 1,
            Some(Decision::Denied) => self.denied += 1,
            None => self.failed += 1,
        }
    }
}

/// Drives the Cartesian product of cities × distributors.
///
/// Records come out city-major: for each city in input order, one record
/// per distributor in registration order.
pub struct EvaluationDriver<'a> {
    engine: &'a PermissionEngine,
    options: DriverOptions,
}

impl<'a> EvaluationDriver<'a> {
    pub fn new(engine: &'a PermissionEngine) -> Self {
        Self {
            engine,
            options: DriverOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DriverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn run_all(
        &self,
        cities: &[City],
        sink: &mut dyn ReportSink,
    ) -> Result<RunSummary, TerritoryError> {
        let records = self.evaluate_all(cities);

        if self.options.failure_policy == FailurePolicy::Abort {
            let first_failure = records.iter().find_map(|record| match &record.outcome {
                Outcome::Failed(err) => Some(err),
                Outcome::Decided(_) => None,
            });
            if let Some(err) = first_failure {
                warn!(event = "Run", phase = "Abort", error = %err);
                return Err(err.clone());
            }
        }

        let mut summary = RunSummary::default();
        for record in &records {
            summary.tally(record);
            sink.on_record(record)?;
        }
        sink.finish(&summary)?;

        info!(
            event = "Run",
            phase = "Done",
            evaluated = summary.evaluated,
            granted = summary.granted,
            denied = summary.denied,
            failed = summary.failed
        );
        Ok(summary)
    }

    /// Run everything and keep the records in memory.
    pub fn collect(&self, cities: &[City]) -> Result<Vec<EvaluationRecord>, TerritoryError> {
        let mut sink = CollectingSink::default();
        self.run_all(cities, &mut sink)?;
        Ok(sink.into_records())
    }

    fn evaluate_all(&self, cities: &[City]) -> Vec<EvaluationRecord> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            if self.options.parallel {
                debug!(event = "Run", phase = "Start", mode = "parallel", cities = cities.len());
                return cities
                    .par_iter()
                    .flat_map_iter(|city| self.evaluate_city(city))
                    .collect();
            }
        }

        debug!(event = "Run", phase = "Start", mode = "sequential", cities = cities.len());
        cities
            .iter()
            .flat_map(|city| self.evaluate_city(city))
            .collect()
    }

    fn evaluate_city(&self, city: &City) -> Vec<EvaluationRecord> {
        self.engine
            .hierarchy()
            .iter()
            .map(|(id, rule_set)| EvaluationRecord {
                distributor: rule_set.distributor_name().to_string(),
                city: city.clone(),
                outcome: self.outcome(id, rule_set.distributor_name(), city),
            })
            .collect()
    }

    fn outcome(&self, id: DistributorId, distributor: &str, city: &City) -> Outcome {
        match self.engine.explain(id, city) {
            Ok(evaluation) => Outcome::Decided(evaluation),
            Err(err) => {
                warn!(
                    event = "Run",
                    phase = "Failed",
                    distributor = distributor,
                    city = city.code.as_str(),
                    error = %err
                );
                Outcome::Failed(err)
            }
        }
    }
}
