//! Report types and the reporters that deliver them.
//!
//! A [`RunReport`] is built once by [`crate::aggregate::summarize`] and never
//! mutated afterwards. Reporters consume it: the console reporter prints the
//! operator-facing summary, the file reporter persists the full report (raw
//! latencies included) for later analysis.

use std::{collections::BTreeMap, path::PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Local};
use gavel_macros::record;

use crate::{error::ReportError, outcome::OutcomeKind};

/// Per-kind slice of a run: counts, latency stats, and the raw latencies.
#[record]
#[derive(Default)]
pub struct KindStats {
    pub successful: u64,
    pub failed: u64,
    pub average_response_time: f64,
    pub p95_response_time: f64,
    pub response_times: Vec<f64>,
}

/// Aggregated result of one load-test run.
#[record]
pub struct RunReport {
    pub scenario: String,
    pub timestamp: DateTime<Local>,
    pub total_time: f64,
    pub total_requests: u64,
    pub requests_per_second: f64,
    pub sections: BTreeMap<OutcomeKind, KindStats>,
}

impl RunReport {
    /// Timestamped report file name; collisions are negligible at
    /// one-run-per-second granularity for a manually invoked tool.
    pub fn file_name(&self) -> String {
        format!(
            "{}_load_test_results_{}.json",
            self.scenario,
            self.timestamp.format("%Y%m%d_%H%M%S")
        )
    }
}

/// Consumes a finished [`RunReport`] and delivers it somewhere.
#[async_trait]
pub trait Reporter {
    async fn report(&self, report: &RunReport) -> Result<(), ReportError>;
}

/// Human-readable summary on stdout.
pub struct ConsoleReporter;

#[async_trait]
impl Reporter for ConsoleReporter {
    async fn report(&self, report: &RunReport) -> Result<(), ReportError> {
        println!("\nLoad Test Results:");
        println!("Total time: {:.2} seconds", report.total_time);
        println!("Total requests: {}", report.total_requests);
        for (kind, stats) in &report.sections {
            println!("\n{}:", kind.label());
            println!("  Successful: {}", stats.successful);
            println!("  Failed: {}", stats.failed);
            println!("  Average response time: {:.2} ms", stats.average_response_time);
            println!(
                "  95th percentile response time: {:.2} ms",
                stats.p95_response_time
            );
        }
        println!(
            "\nOverall requests per second: {:.2}",
            report.requests_per_second
        );
        Ok(())
    }
}

/// Writes the full report as pretty-printed JSON into `dir`.
pub struct JsonFileReporter {
    dir: PathBuf,
}

impl JsonFileReporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Default for JsonFileReporter {
    fn default() -> Self {
        Self::new(".")
    }
}

#[async_trait]
impl Reporter for JsonFileReporter {
    async fn report(&self, report: &RunReport) -> Result<(), ReportError> {
        let path = self.dir.join(report.file_name());
        let body = serde_json::to_string_pretty(report)?;
        tokio::fs::write(&path, body)
            .await
            .map_err(|source| ReportError::Io {
                path: path.display().to_string(),
                source,
            })?;
        println!("\nDetailed results saved to {}", path.display());
        Ok(())
    }
}
