//! The three load-test flows.
//!
//! A [`Scenario`] drives the session-client calls for a single iteration and
//! publishes every outcome it measures. Fixture selection is uniformly random
//! with replacement: reusing a user across iterations and workers simulates
//! repeat traffic from hot accounts.

use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;

use crate::{
    client::ApiClient,
    fixture::{TestQuestion, TestUser},
    generate,
    sink::OutcomeSink,
};

#[async_trait]
pub trait Scenario: Send + Sync + 'static {
    /// Short name used for log lines and report file prefixes.
    fn name(&self) -> &'static str;

    /// Run one iteration against the target, publishing outcomes as they are
    /// produced. Must never panic and never error: every call-level fault is
    /// already absorbed by the session client.
    async fn iteration(&self, client: &ApiClient, sink: &OutcomeSink);
}

fn pick<T: Clone>(pool: &[T]) -> T {
    pool[rand::rng().random_range(0..pool.len())].clone()
}

/// One login attempt per iteration.
pub struct LoginScenario {
    users: Arc<[TestUser]>,
}

impl LoginScenario {
    /// Panics on an empty fixture set; loaders reject that before any worker
    /// is spawned.
    pub fn new(users: Vec<TestUser>) -> Self {
        assert!(!users.is_empty(), "user fixture set is empty");
        Self { users: users.into() }
    }
}

#[async_trait]
impl Scenario for LoginScenario {
    fn name(&self) -> &'static str {
        "login"
    }

    async fn iteration(&self, client: &ApiClient, sink: &OutcomeSink) {
        let user = pick(&self.users);
        sink.publish(client.login(&user).await.outcome);
    }
}

/// Authenticates, then submits one freshly generated question.
pub struct QuestionScenario {
    users: Arc<[TestUser]>,
}

impl QuestionScenario {
    pub fn new(users: Vec<TestUser>) -> Self {
        assert!(!users.is_empty(), "user fixture set is empty");
        Self { users: users.into() }
    }
}

#[async_trait]
impl Scenario for QuestionScenario {
    fn name(&self) -> &'static str {
        "question"
    }

    async fn iteration(&self, client: &ApiClient, sink: &OutcomeSink) {
        let user = pick(&self.users);
        // An unauthenticated session cannot proceed. Nothing is published, so
        // the skipped submission is not counted as a submission failure.
        let Some(token) = client.login(&user).await.token else {
            return;
        };
        let draft = {
            let mut rng = rand::rng();
            generate::random_question_draft(&mut rng)
        };
        sink.publish(client.submit_question(&token, &draft).await);
    }
}

/// Authenticates, submits an answer, and reads it back once the submission
/// is known to have landed.
pub struct SubmissionScenario {
    users: Arc<[TestUser]>,
    questions: Arc<[TestQuestion]>,
}

impl SubmissionScenario {
    pub fn new(users: Vec<TestUser>, questions: Vec<TestQuestion>) -> Self {
        assert!(!users.is_empty(), "user fixture set is empty");
        assert!(!questions.is_empty(), "question fixture set is empty");
        Self {
            users: users.into(),
            questions: questions.into(),
        }
    }
}

#[async_trait]
impl Scenario for SubmissionScenario {
    fn name(&self) -> &'static str {
        "submission"
    }

    async fn iteration(&self, client: &ApiClient, sink: &OutcomeSink) {
        let user = pick(&self.users);
        let question = pick(&self.questions);
        let Some(token) = client.login(&user).await.token else {
            return;
        };

        let submission = client.submit_answer(&token, &question).await;
        let follow_up = if submission.success {
            submission.answer_id.clone()
        } else {
            None
        };
        sink.publish(submission);

        if let Some(id) = follow_up {
            sink.publish(client.get_answer(&token, &id).await);
        }
    }
}
