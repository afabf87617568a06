//! Single-threaded post-pass over the drained outcome multiset.
//!
//! Workers never update shared counters; every count and statistic is
//! derived here, once, after the pool has joined. Statistics are computed
//! over the unordered multiset, so publish interleaving across workers never
//! affects the result.

use std::collections::BTreeMap;

use chrono::Local;

use crate::{
    executor::ScenarioRun,
    outcome::OutcomeKind,
    report::{KindStats, RunReport},
};

/// Percentile estimates over fewer samples than this are statistically
/// unreliable for this tool's purposes and are reported as 0 instead.
pub const MIN_PERCENTILE_SAMPLES: usize = 20;

/// Partition outcomes by kind, count successes and failures, and derive the
/// latency statistics. Failed attempts count toward the latency stats too; a
/// slow failure is still informative.
pub fn summarize(scenario: &str, run: &ScenarioRun) -> RunReport {
    let mut sections: BTreeMap<OutcomeKind, KindStats> = BTreeMap::new();
    for outcome in &run.outcomes {
        let stats = sections.entry(outcome.kind).or_default();
        if outcome.success {
            stats.successful += 1;
        } else {
            stats.failed += 1;
        }
        stats.response_times.push(outcome.response_time_ms);
    }
    for stats in sections.values_mut() {
        stats.average_response_time = mean(&stats.response_times);
        stats.p95_response_time = p95(&stats.response_times);
    }

    let total_requests = run.outcomes.len() as u64;
    let total_time = run.wall_clock.as_secs_f64();
    let requests_per_second = if total_requests == 0 || total_time <= 0.0 {
        0.0
    } else {
        total_requests as f64 / total_time
    };

    RunReport {
        scenario: scenario.to_string(),
        timestamp: Local::now(),
        total_time,
        total_requests,
        requests_per_second,
        sections,
    }
}

/// Arithmetic mean; 0 for an empty sample set.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// 95th percentile as the 19th of 20 quantiles, linearly interpolated
/// between closest ranks (rank `19(n+1)/20` over the ascending sort).
/// Sample sets smaller than [`MIN_PERCENTILE_SAMPLES`] report 0.
pub fn p95(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < MIN_PERCENTILE_SAMPLES {
        return 0.0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = 19 * (n + 1);
    let j = (rank / 20).clamp(1, n - 1);
    let delta = rank - j * 20;
    (sorted[j - 1] * (20 - delta) as f64 + sorted[j] * delta as f64) / 20.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Outcome;
    use std::time::Duration;

    fn run_of(outcomes: Vec<Outcome>, secs: f64) -> ScenarioRun {
        ScenarioRun {
            outcomes,
            wall_clock: Duration::from_secs_f64(secs),
        }
    }

    #[test]
    fn mean_and_p95_over_a_known_distribution() {
        let samples: Vec<f64> = (1..=100).map(|i| (i * 10) as f64).collect();
        assert_eq!(mean(&samples), 505.0);
        // rank 19*101/20 → between the 95th and 96th order statistics
        assert_eq!(p95(&samples), 959.5);
    }

    #[test]
    fn p95_is_zero_below_twenty_samples() {
        let samples: Vec<f64> = (1..=19).map(|i| i as f64).collect();
        assert_eq!(p95(&samples), 0.0);
        assert!(mean(&samples) > 0.0);
    }

    #[test]
    fn p95_is_computed_at_exactly_twenty_samples() {
        let flat = vec![50.0; 20];
        assert_eq!(p95(&flat), 50.0);

        let ramp: Vec<f64> = (1..=20).map(|i| (i * 10) as f64).collect();
        // rank 19*21/20 → (190 + 19*200)/20
        assert_eq!(p95(&ramp), 199.5);
    }

    #[test]
    fn empty_run_yields_all_zero_report() {
        let report = summarize("login", &run_of(vec![], 0.0));
        assert_eq!(report.total_requests, 0);
        assert_eq!(report.requests_per_second, 0.0);
        assert!(report.sections.is_empty());
    }

    #[test]
    fn outcomes_partition_by_kind_and_success() {
        use crate::outcome::OutcomeKind::{Retrieval, Submission};
        let outcomes = vec![
            Outcome::ok(Submission, 10.0, 201),
            Outcome::failed(Submission, 30.0, Some(500), None),
            Outcome::ok(Retrieval, 20.0, 200),
        ];
        let report = summarize("submission", &run_of(outcomes, 2.0));

        assert_eq!(report.total_requests, 3);
        assert_eq!(report.requests_per_second, 1.5);

        let submissions = &report.sections[&Submission];
        assert_eq!((submissions.successful, submissions.failed), (1, 1));
        assert_eq!(submissions.average_response_time, 20.0);
        // below the sample floor
        assert_eq!(submissions.p95_response_time, 0.0);

        let retrievals = &report.sections[&Retrieval];
        assert_eq!((retrievals.successful, retrievals.failed), (1, 0));
        assert_eq!(retrievals.response_times, vec![20.0]);
    }

    #[test]
    fn failures_count_toward_latency_stats() {
        use crate::outcome::OutcomeKind::Login;
        let outcomes = vec![
            Outcome::ok(Login, 10.0, 200),
            Outcome::failed(Login, 90.0, None, Some("timeout".into())),
        ];
        let report = summarize("login", &run_of(outcomes, 1.0));
        assert_eq!(report.sections[&Login].average_response_time, 50.0);
    }
}
