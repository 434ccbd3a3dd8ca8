//! Report sinks that receive evaluation records from the driver.
//!
//! The driver calls [`ReportSink::on_record`] once per (city, distributor)
//! pair, in output order, then [`ReportSink::finish`] once with the totals.
//! Implement the trait to route decisions anywhere else (a database, a
//! message bus, a metrics backend).
//!
//! ```rust
//! use territory_core::{
//!     City, DistributorRequest, EvaluationDriver, Hierarchy, PermissionEngine, TextSink,
//! };
//!
//! let hierarchy = Hierarchy::builder()
//!     .add(DistributorRequest::new("acme", ["France"], Vec::<String>::new()))
//!     .build()
//!     .unwrap();
//! let engine = PermissionEngine::new(hierarchy);
//! let cities = vec![City::new("FR-PAR", "Paris", "Ile-de-France", "France")];
//!
//! let mut out = Vec::new();
//! let mut sink = TextSink::new(&mut out);
//! EvaluationDriver::new(&engine).run_all(&cities, &mut sink).unwrap();
//!
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.starts_with(
//!     "Distributor acme has permission to distribute in Paris-Ile-de-France-France: YES"
//! ));
//! ```

use std::io::Write;

use serde::Serialize;

use crate::driver::{EvaluationRecord, Outcome, RunSummary};
use crate::error::TerritoryError;

pub trait ReportSink {
    /// Called once per evaluated pair.
    fn on_record(&mut self, record: &EvaluationRecord) -> Result<(), TerritoryError>;

    /// Called after the last record. The default does nothing.
    fn finish(&mut self, _summary: &RunSummary) -> Result<(), TerritoryError> {
        Ok(())
    }
}

/// Human-readable lines, one per record, plus a closing summary line.
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for TextSink<W> {
    fn on_record(&mut self, record: &EvaluationRecord) -> Result<(), TerritoryError> {
        match &record.outcome {
            Outcome::Decided(evaluation) => writeln!(
                self.out,
                "Distributor {} has permission to distribute in {}: {}",
                record.distributor, record.city, evaluation.decision
            )?,
            Outcome::Failed(err) => writeln!(
                self.out,
                "Distributor {} could not be evaluated for {}: {}",
                record.distributor, record.city, err
            )?,
        }
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<(), TerritoryError> {
        writeln!(
            self.out,
            "{} evaluated, {} granted, {} denied, {} failed",
            summary.evaluated, summary.granted, summary.denied, summary.failed
        )?;
        self.out.flush()?;
        Ok(())
    }
}

/// One JSON object per line. The summary is written as a final object
/// under the `summary` key.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<(), TerritoryError> {
        serde_json::to_writer(&mut self.out, value)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> ReportSink for JsonLinesSink<W> {
    fn on_record(&mut self, record: &EvaluationRecord) -> Result<(), TerritoryError> {
        self.write_line(record)
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<(), TerritoryError> {
        #[derive(Serialize)]
        struct Summary<'a> {
            summary: &'a RunSummary,
        }
        self.write_line(&Summary { summary })?;
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    records: Vec<EvaluationRecord>,
    summary: Option<RunSummary>,
}

impl CollectingSink {
    pub fn records(&self) -> &[EvaluationRecord] {
        &self.records
    }

    pub fn summary(&self) -> Option<RunSummary> {
        self.summary
    }

    pub fn into_records(self) -> Vec<EvaluationRecord> {
        self.records
    }
}

impl ReportSink for CollectingSink {
    fn on_record(&mut self, record: &EvaluationRecord) -> Result<(), TerritoryError> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<(), TerritoryError> {
        self.summary = Some(*summary);
        Ok(())
    }
}
