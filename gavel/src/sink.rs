//! Result sink: the only mutable state workers share.
//!
//! Backed by an unbounded channel so publishing never blocks the hot path.
//! There is no reader activity during a run; the drain half is consumed once,
//! after every worker has joined and every sink clone is dropped.

use tokio::sync::mpsc;

use crate::outcome::Outcome;

/// Creates a connected sink/drain pair for one run.
pub fn outcome_channel() -> (OutcomeSink, OutcomeDrain) {
    let (tx, rx) = mpsc::unbounded_channel();
    (OutcomeSink { tx }, OutcomeDrain { rx })
}

/// Write half, cloned into every worker.
#[derive(Debug, Clone)]
pub struct OutcomeSink {
    tx: mpsc::UnboundedSender<Outcome>,
}

impl OutcomeSink {
    /// Publish one outcome. The drain half outlives every worker, so a send
    /// can only fail if the drain was dropped early; the outcome is discarded
    /// in that case.
    pub fn publish(&self, outcome: Outcome) {
        let _ = self.tx.send(outcome);
    }
}

/// Read half, drained exactly once after the run completes.
#[derive(Debug)]
pub struct OutcomeDrain {
    rx: mpsc::UnboundedReceiver<Outcome>,
}

impl OutcomeDrain {
    /// Collect every published outcome. Completes once all sink clones are
    /// dropped, so callers must join their workers first.
    pub async fn drain(mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.rx.recv().await {
            outcomes.push(outcome);
        }
        outcomes
    }
}
