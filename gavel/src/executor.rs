//! Fixed-pool executor.
//!
//! Spawns `workers` concurrent tasks, each running its own
//! `requests_per_worker` iterations strictly sequentially. There is no work
//! stealing and no mid-run cancellation: every worker owns its iteration
//! count for the run's lifetime, and the session client's per-call timeout
//! bounds all blocking. Aggregation is deliberately deferred until after the
//! pool has joined, keeping the hot path free of shared counters.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use futures::future::join_all;
use typed_builder::TypedBuilder;

use crate::{client::ApiClient, outcome::Outcome, scenario::Scenario, sink::outcome_channel};

/// Everything a finished run hands to aggregation: the drained outcome
/// multiset and the wall-clock duration of the measurement window.
#[derive(Debug)]
pub struct ScenarioRun {
    pub outcomes: Vec<Outcome>,
    pub wall_clock: Duration,
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct LoadExecutor {
    #[builder(default = 50)]
    pub workers: usize,
    #[builder(default = 10)]
    pub requests_per_worker: usize,
}

impl LoadExecutor {
    pub async fn execute<S: Scenario>(&self, scenario: Arc<S>, client: ApiClient) -> ScenarioRun {
        let (sink, drain) = outcome_channel();

        tracing::info!(
            scenario = scenario.name(),
            workers = self.workers,
            requests_per_worker = self.requests_per_worker,
            "spawning workers"
        );
        let started = Instant::now();
        let handles: Vec<_> = (0..self.workers)
            .map(|_| {
                let scenario = Arc::clone(&scenario);
                let client = client.clone();
                let sink = sink.clone();
                let iterations = self.requests_per_worker;
                tokio::spawn(async move {
                    for _ in 0..iterations {
                        scenario.iteration(&client, &sink).await;
                    }
                })
            })
            .collect();
        // The drain only closes once every clone is gone.
        drop(sink);

        for res in join_all(handles).await {
            res.expect("worker task panicked");
        }
        let wall_clock = started.elapsed();

        tracing::info!(
            scenario = scenario.name(),
            elapsed_s = wall_clock.as_secs_f64(),
            "collecting results"
        );
        let outcomes = drain.drain().await;
        ScenarioRun {
            outcomes,
            wall_clock,
        }
    }
}
