//! Gavel, a concurrent load-testing harness for the judge platform API.
//!
//! Gavel drives many synthetic client sessions against a deployment's
//! authentication, question-submission, and answer endpoints, measures every
//! attempt, and reduces the results to throughput and latency statistics
//! plus a persisted JSON report.
//!
//! # Architecture
//!
//! The main building blocks are:
//!
//! - [`scenario::Scenario`]: one load-test flow. An iteration picks fixtures
//!   at random, drives the session-client calls that realize the flow, and
//!   publishes one [`outcome::Outcome`] per call attempted.
//! - [`client::ApiClient`]: performs one logical API operation per call and
//!   packages the measurement into an `Outcome`. Stateless per call, never
//!   retries, and absorbs every fault; no error crosses a worker boundary.
//! - [`executor::LoadExecutor`]: the fixed worker pool. Each worker runs its
//!   iteration count sequentially; the pool shares nothing mutable but the
//!   sink.
//! - [`sink`]: the concurrency-safe collection point decoupling worker
//!   timing from aggregation.
//! - [`aggregate`]: the single-threaded post-pass computing counts, mean,
//!   95th-percentile latency, and throughput.
//! - [`report`]: report records and the reporters that print and persist
//!   them.
//!
//! Fixtures ([`fixture`]) are generated ahead of time ([`generate`], or the
//! `gavel generate` subcommand) and are read-only for the duration of a run.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gavel::{
//!     aggregate,
//!     client::ApiClient,
//!     executor::LoadExecutor,
//!     report::{ConsoleReporter, Reporter},
//!     scenario::{LoginScenario, Scenario},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let users = gavel::fixture::load_users("test_users.json".as_ref())?;
//!     let client = ApiClient::new("http://localhost:8000")?;
//!     let scenario = Arc::new(LoginScenario::new(users));
//!
//!     let executor = LoadExecutor::builder()
//!         .workers(50)
//!         .requests_per_worker(10)
//!         .build();
//!     let run = executor.execute(Arc::clone(&scenario), client).await;
//!
//!     let report = aggregate::summarize(scenario.name(), &run);
//!     ConsoleReporter.report(&report).await?;
//!     Ok(())
//! }
//! ```

/// Statistics over drained outcomes
pub mod aggregate;
/// Session client for the target API
pub mod client;
/// Error types
pub mod error;
/// Worker pool and run lifecycle
pub mod executor;
/// Fixture records and file loading
pub mod fixture;
/// Random fixture and payload generation
pub mod generate;
/// The unit measurement record
pub mod outcome;
/// Report records and reporters
pub mod report;
/// The three load-test flows
pub mod scenario;
/// Concurrency-safe outcome collection
pub mod sink;

pub use client::ApiClient;
pub use executor::LoadExecutor;
pub use outcome::{Outcome, OutcomeKind};
pub use report::{ConsoleReporter, JsonFileReporter, Reporter, RunReport};
pub use scenario::Scenario;
pub use sink::{OutcomeDrain, OutcomeSink};
