//! Session client for the judge API.
//!
//! One shared [`reqwest::Client`] serves every worker; never build a client
//! inside the hot loop. Each operation measures wall-clock time around its
//! own call and absorbs every fault into a failed [`Outcome`]: no error
//! crosses the worker boundary and nothing is ever retried.

use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::{
    fixture::{TestQuestion, TestUser},
    generate::QuestionDraft,
    outcome::{Outcome, OutcomeKind},
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Upper bound on any single call; a timeout is a failed outcome, not a
/// fatal condition.
const CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of a login attempt: the measured outcome plus the session token a
/// successful attempt yields for chaining authenticated calls.
#[derive(Debug, Clone)]
pub struct Login {
    pub token: Option<String>,
    pub outcome: Outcome,
}

#[derive(Deserialize)]
struct TokenBody {
    token: Option<String>,
}

#[derive(Deserialize)]
struct AnswerBody {
    id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(CALL_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST `/api/auth/login`. A 200 yields the session token; any other
    /// status or transport fault leaves the token absent.
    pub async fn login(&self, user: &TestUser) -> Login {
        let started = Instant::now();
        let res = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": user.email, "password": user.password }))
            .send()
            .await;
        match res {
            Ok(resp) if resp.status() == StatusCode::OK => {
                let token = resp.json::<TokenBody>().await.ok().and_then(|b| b.token);
                Login {
                    token,
                    outcome: Outcome::ok(
                        OutcomeKind::Login,
                        elapsed_ms(started),
                        StatusCode::OK.as_u16(),
                    ),
                }
            }
            Ok(resp) => Login {
                token: None,
                outcome: Outcome::failed(
                    OutcomeKind::Login,
                    elapsed_ms(started),
                    Some(resp.status().as_u16()),
                    None,
                ),
            },
            Err(err) => Login {
                token: None,
                outcome: Outcome::failed(
                    OutcomeKind::Login,
                    elapsed_ms(started),
                    None,
                    Some(describe(&err)),
                ),
            },
        }
    }

    /// POST `/api/questions/submit` with bearer auth; success is a 201.
    pub async fn submit_question(&self, token: &str, draft: &QuestionDraft) -> Outcome {
        let started = Instant::now();
        let res = self
            .http
            .post(self.url("/api/questions/submit"))
            .bearer_auth(token)
            .json(draft)
            .send()
            .await;
        match res {
            Ok(resp) if resp.status() == StatusCode::CREATED => Outcome::ok(
                OutcomeKind::Submission,
                elapsed_ms(started),
                StatusCode::CREATED.as_u16(),
            ),
            Ok(resp) => Outcome::failed(
                OutcomeKind::Submission,
                elapsed_ms(started),
                Some(resp.status().as_u16()),
                None,
            ),
            Err(err) => Outcome::failed(
                OutcomeKind::Submission,
                elapsed_ms(started),
                None,
                Some(describe(&err)),
            ),
        }
    }

    /// POST `/api/answers/submit` with bearer auth; success is a 201, and the
    /// created answer's id is captured for the follow-up retrieval.
    pub async fn submit_answer(&self, token: &str, question: &TestQuestion) -> Outcome {
        let started = Instant::now();
        let res = self
            .http
            .post(self.url("/api/answers/submit"))
            .bearer_auth(token)
            .json(&json!({
                "question_id": question.id,
                "answer": question.sample_answer,
            }))
            .send()
            .await;
        match res {
            Ok(resp) if resp.status() == StatusCode::CREATED => {
                let answer_id = resp.json::<AnswerBody>().await.ok().and_then(|b| b.id);
                let mut outcome = Outcome::ok(
                    OutcomeKind::Submission,
                    elapsed_ms(started),
                    StatusCode::CREATED.as_u16(),
                );
                outcome.answer_id = answer_id;
                outcome
            }
            Ok(resp) => Outcome::failed(
                OutcomeKind::Submission,
                elapsed_ms(started),
                Some(resp.status().as_u16()),
                None,
            ),
            Err(err) => Outcome::failed(
                OutcomeKind::Submission,
                elapsed_ms(started),
                None,
                Some(describe(&err)),
            ),
        }
    }

    /// GET `/api/answers/{id}` with bearer auth; success is a 200.
    pub async fn get_answer(&self, token: &str, answer_id: &str) -> Outcome {
        let started = Instant::now();
        let res = self
            .http
            .get(self.url(&format!("/api/answers/{answer_id}")))
            .bearer_auth(token)
            .send()
            .await;
        match res {
            Ok(resp) if resp.status() == StatusCode::OK => Outcome::ok(
                OutcomeKind::Retrieval,
                elapsed_ms(started),
                StatusCode::OK.as_u16(),
            ),
            Ok(resp) => Outcome::failed(
                OutcomeKind::Retrieval,
                elapsed_ms(started),
                Some(resp.status().as_u16()),
                None,
            ),
            Err(err) => Outcome::failed(
                OutcomeKind::Retrieval,
                elapsed_ms(started),
                None,
                Some(describe(&err)),
            ),
        }
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "timeout".to_string()
    } else {
        err.to_string()
    }
}
