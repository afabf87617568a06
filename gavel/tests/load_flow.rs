//! End-to-end scenario runs against a stubbed judge API.

use std::sync::Arc;

use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use gavel::{
    aggregate,
    client::ApiClient,
    executor::LoadExecutor,
    fixture::{TestQuestion, TestUser},
    outcome::OutcomeKind,
    scenario::{LoginScenario, QuestionScenario, Scenario, SubmissionScenario},
};

fn test_users() -> Vec<TestUser> {
    vec![TestUser {
        email: "load@example.com".into(),
        password: "pw12345678ab".into(),
    }]
}

fn test_questions() -> Vec<TestQuestion> {
    vec![TestQuestion {
        id: "q_1".into(),
        text: "What is the time complexity of BFS?".into(),
        sample_answer: "Linear in vertices and edges.".into(),
        category: "algorithms".into(),
        difficulty: "easy".into(),
    }]
}

async fn mount_login(server: &MockServer, status: u16) {
    let template = if status == 200 {
        ResponseTemplate::new(200).set_body_json(json!({ "token": "tok" }))
    } else {
        ResponseTemplate::new(status)
    };
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(template)
        .mount(server)
        .await;
}

async fn run<S: Scenario>(
    scenario: Arc<S>,
    base_url: &str,
    workers: usize,
    requests: usize,
) -> gavel::executor::ScenarioRun {
    let client = ApiClient::new(base_url).unwrap();
    LoadExecutor::builder()
        .workers(workers)
        .requests_per_worker(requests)
        .build()
        .execute(scenario, client)
        .await
}

#[tokio::test]
async fn login_run_measures_every_attempt() {
    let server = MockServer::start().await;
    mount_login(&server, 200).await;

    let scenario = Arc::new(LoginScenario::new(test_users()));
    let result = run(Arc::clone(&scenario), &server.uri(), 5, 4).await;

    assert_eq!(result.outcomes.len(), 20);
    assert!(result
        .outcomes
        .iter()
        .all(|o| o.kind == OutcomeKind::Login && o.success && o.response_time_ms > 0.0));

    let report = aggregate::summarize(scenario.name(), &result);
    let logins = &report.sections[&OutcomeKind::Login];
    assert_eq!((logins.successful, logins.failed), (20, 0));
    assert!(logins.average_response_time > 0.0);
    // 20 samples sit exactly on the percentile floor, so p95 is computed.
    assert!(logins.p95_response_time > 0.0);

    let expected_rps = 20.0 / report.total_time;
    assert!((report.requests_per_second - expected_rps).abs() < 1e-9);
}

#[tokio::test]
async fn server_errors_are_counted_not_fatal() {
    let server = MockServer::start().await;
    mount_login(&server, 500).await;

    let scenario = Arc::new(LoginScenario::new(test_users()));
    let result = run(scenario, &server.uri(), 3, 5).await;

    // Every iteration still ran; failures are data, not faults.
    assert_eq!(result.outcomes.len(), 15);
    assert!(result
        .outcomes
        .iter()
        .all(|o| !o.success && o.status_code == Some(500) && o.response_time_ms > 0.0));
}

#[tokio::test]
async fn connection_errors_become_failed_outcomes() {
    // Nothing listens here; every call fails at the transport layer.
    let scenario = Arc::new(LoginScenario::new(test_users()));
    let result = run(scenario, "http://127.0.0.1:1", 1, 2).await;

    assert_eq!(result.outcomes.len(), 2);
    for o in &result.outcomes {
        assert!(!o.success);
        assert_eq!(o.status_code, None);
        assert!(o.error.is_some());
        assert!(o.response_time_ms >= 0.0);
    }
}

#[tokio::test]
async fn failed_login_publishes_nothing_downstream() {
    let server = MockServer::start().await;
    mount_login(&server, 401).await;

    let scenario = Arc::new(SubmissionScenario::new(test_users(), test_questions()));
    let result = run(Arc::clone(&scenario), &server.uri(), 4, 3).await;

    assert!(result.outcomes.is_empty());

    let report = aggregate::summarize(scenario.name(), &result);
    assert_eq!(report.total_requests, 0);
    assert_eq!(report.requests_per_second, 0.0);
    assert!(report.sections.is_empty());
}

#[tokio::test]
async fn submissions_chain_into_retrievals() {
    let server = MockServer::start().await;
    mount_login(&server, 200).await;
    Mock::given(method("POST"))
        .and(path("/api/answers/submit"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "ans_1" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/answers/ans_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let scenario = Arc::new(SubmissionScenario::new(test_users(), test_questions()));
    let result = run(Arc::clone(&scenario), &server.uri(), 2, 3).await;

    assert_eq!(result.outcomes.len(), 12);

    let report = aggregate::summarize(scenario.name(), &result);
    let submissions = &report.sections[&OutcomeKind::Submission];
    let retrievals = &report.sections[&OutcomeKind::Retrieval];
    assert_eq!((submissions.successful, submissions.failed), (6, 0));
    assert_eq!((retrievals.successful, retrievals.failed), (6, 0));
    // A retrieval is only ever attempted after its submission landed.
    assert_eq!(retrievals.successful, submissions.successful);
}

#[tokio::test]
async fn rejected_submissions_skip_the_retrieval() {
    let server = MockServer::start().await;
    mount_login(&server, 200).await;
    Mock::given(method("POST"))
        .and(path("/api/answers/submit"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let scenario = Arc::new(SubmissionScenario::new(test_users(), test_questions()));
    let result = run(scenario, &server.uri(), 2, 2).await;

    assert_eq!(result.outcomes.len(), 4);
    assert!(result
        .outcomes
        .iter()
        .all(|o| o.kind == OutcomeKind::Submission && !o.success && o.status_code == Some(422)));
}

#[tokio::test]
async fn question_drafts_are_submitted() {
    let server = MockServer::start().await;
    mount_login(&server, 200).await;
    Mock::given(method("POST"))
        .and(path("/api/questions/submit"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let scenario = Arc::new(QuestionScenario::new(test_users()));
    let result = run(scenario, &server.uri(), 2, 2).await;

    assert_eq!(result.outcomes.len(), 4);
    assert!(result
        .outcomes
        .iter()
        .all(|o| o.kind == OutcomeKind::Submission && o.success));
}
