use gavel_macros::record;
use serde::{Deserialize, Serialize};

/// Which API call an [`Outcome`] measured.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Login,
    Submission,
    Retrieval,
}

impl OutcomeKind {
    /// Section heading used in the console summary.
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeKind::Login => "Logins",
            OutcomeKind::Submission => "Submissions",
            OutcomeKind::Retrieval => "Retrievals",
        }
    }
}

/// One measured result of a single API call attempt.
///
/// `response_time_ms` covers the full attempt, failures included. `success`
/// is the single source of truth for classification; `status_code` and
/// `error` are diagnostic. Created once by the session client and consumed
/// exactly once by aggregation, never mutated in between.
#[record]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub success: bool,
    pub response_time_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set only on a successful answer submission, for the follow-up read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_id: Option<String>,
}

impl Outcome {
    pub fn ok(kind: OutcomeKind, response_time_ms: f64, status_code: u16) -> Self {
        Self {
            kind,
            success: true,
            response_time_ms,
            status_code: Some(status_code),
            error: None,
            answer_id: None,
        }
    }

    pub fn failed(
        kind: OutcomeKind,
        response_time_ms: f64,
        status_code: Option<u16>,
        error: Option<String>,
    ) -> Self {
        Self {
            kind,
            success: false,
            response_time_ms,
            status_code,
            error,
            answer_id: None,
        }
    }
}
