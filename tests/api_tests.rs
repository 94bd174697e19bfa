// tests/api_tests.rs

use std::collections::HashMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};

use proctor_core::api::{HttpScoringApi, ScoringApi};
use proctor_core::environment::{EnvironmentSignal, HeadlessFullscreen};
use proctor_core::error::AppError;
use proctor_core::models::quiz_config::{DifficultyCount, QuizConfig};
use proctor_core::models::session::{Session, SessionPhase};
use proctor_core::session::controller::{ProctoredSessionController, SessionUpdate};

/// Shared state of the stub scoring service.
#[derive(Clone, Default)]
struct StubState {
    generate_calls: Arc<AtomicUsize>,
    violations: Arc<Mutex<HashMap<String, u8>>>,
    submit_calls: Arc<AtomicUsize>,
    fail_submits: Arc<AtomicUsize>,
    last_answers: Arc<Mutex<Option<Vec<Value>>>>,
}

fn stub_report(session_id: &str) -> Value {
    json!({
        "session_id": session_id,
        "test_name": "Stub Assessment",
        "total_score": 2.0,
        "max_score": 3.0,
        "accuracy": 66.7,
        "difficulty_breakdown": {
            "easy": { "score": 1.0, "total": 1.0 },
            "medium": { "score": 1.0, "total": 2.0 }
        },
        "report_url": format!("/api/report/download/{}", session_id)
    })
}

async fn stub_generate(State(state): State<StubState>, Json(_config): Json<Value>) -> Json<Value> {
    state.generate_calls.fetch_add(1, Ordering::SeqCst);
    let session_id = uuid::Uuid::new_v4().to_string();
    Json(json!({
        "session_id": session_id,
        "test_name": "Stub Assessment",
        "questions": [
            {
                "id": 1,
                "question_text": "First question",
                "options": { "A": "one", "B": "two", "C": "three", "D": "four" },
                "difficulty": "easy"
            },
            {
                "id": 2,
                "question_text": "Second question",
                "options": { "A": "one", "B": "two", "C": "three", "D": "four" },
                "difficulty": "medium"
            },
            {
                "id": 3,
                "question_text": "Third question",
                "options": { "A": "one", "B": "two", "C": "three", "D": "four" },
                "difficulty": "medium"
            }
        ]
    }))
}

async fn stub_log_violation(
    State(state): State<StubState>,
    Json(payload): Json<Value>,
) -> Json<Value> {
    let session_id = payload["session_id"].as_str().unwrap_or_default().to_string();
    let mut violations = state.violations.lock().unwrap();
    let count = violations.entry(session_id).or_insert(0);
    *count += 1;
    Json(json!({ "status": "logged", "violation_count": *count }))
}

async fn stub_submit(
    State(state): State<StubState>,
    Json(payload): Json<Value>,
) -> impl IntoResponse {
    state.submit_calls.fetch_add(1, Ordering::SeqCst);
    if state.fail_submits.load(Ordering::SeqCst) > 0 {
        state.fail_submits.fetch_sub(1, Ordering::SeqCst);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "scoring backend unavailable" })),
        )
            .into_response();
    }

    let session_id = payload["session_id"].as_str().unwrap_or_default();
    let answers = payload["answers"].as_array().cloned().unwrap_or_default();
    *state.last_answers.lock().unwrap() = Some(answers);

    Json(stub_report(session_id)).into_response()
}

async fn stub_history() -> Json<Value> {
    Json(json!({
        "attempts": [
            {
                "session_id": "sess-past",
                "test_name": "Past Assessment",
                "accuracy": 80.0,
                "total_score": 4.0,
                "max_score": 5.0,
                "created_at": chrono::Utc::now().to_rfc3339(),
                "difficulty_stats": {},
                "status": "COMPLETED"
            }
        ]
    }))
}

async fn stub_history_detail(Path(session_id): Path<String>) -> impl IntoResponse {
    if session_id == "sess-missing" {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(stub_report(&session_id)).into_response()
}

/// Spawns the stub scoring service on a random port and returns its base
/// URL plus a handle on its state.
async fn spawn_stub() -> (String, StubState) {
    let state = StubState::default();

    let app = Router::new()
        .route("/api/generate", post(stub_generate))
        .route("/api/proctor/log", post(stub_log_violation))
        .route("/api/submit", post(stub_submit))
        .route("/api/history", get(stub_history))
        .route("/api/history/{session_id}", get(stub_history_detail))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://127.0.0.1:{}/api", port), state)
}

async fn spawn_controller(duration_secs: u32) -> (ProctoredSessionController, StubState) {
    let (base, state) = spawn_stub().await;
    let api = Arc::new(HttpScoringApi::new(&base).unwrap());
    let bundle = api.generate(&QuizConfig::mixed("stub-hash")).await.unwrap();
    let ctrl = ProctoredSessionController::new(
        Session::from_bundle(bundle, duration_secs),
        api,
        Arc::new(HeadlessFullscreen),
    )
    .unwrap();
    (ctrl, state)
}

#[tokio::test]
async fn generate_returns_bundle_with_display_ordered_options() {
    // Arrange
    let (base, state) = spawn_stub().await;
    let api = HttpScoringApi::new(&base).unwrap();

    // Act
    let bundle = api.generate(&QuizConfig::mixed("stub-hash")).await.unwrap();

    // Assert
    assert_eq!(state.generate_calls.load(Ordering::SeqCst), 1);
    assert_eq!(bundle.questions.len(), 3);
    assert_eq!(bundle.questions[0].option_keys(), vec!["A", "B", "C", "D"]);
}

#[tokio::test]
async fn invalid_config_is_rejected_before_any_network_work() {
    // Arrange
    let (base, state) = spawn_stub().await;
    let api = HttpScoringApi::new(&base).unwrap();
    let config = QuizConfig::custom("stub-hash", DifficultyCount::default());

    // Act
    let result = api.generate(&config).await;

    // Assert
    assert!(matches!(result, Err(AppError::ConfigValidation(_))));
    assert_eq!(state.generate_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn three_violations_over_http_auto_submit_once() {
    // Arrange
    let (mut ctrl, state) = spawn_controller(60).await;
    ctrl.begin_exam().await.unwrap();
    ctrl.select_answer(2, "B").unwrap();

    // Act: three tab switches, each a distinct physical event.
    let mut last = SessionUpdate::None;
    for _ in 0..3 {
        ctrl.handle_tick().await;
        last = ctrl.handle_signal(EnvironmentSignal::VisibilityHidden).await;
    }

    // Assert: server-reported counts drove escalation to exactly one submit.
    assert!(matches!(last, SessionUpdate::Submitted(_)));
    assert_eq!(ctrl.phase(), SessionPhase::Terminated);
    assert_eq!(ctrl.violations().count, 3);
    assert_eq!(state.submit_calls.load(Ordering::SeqCst), 1);

    let answers = state.last_answers.lock().unwrap().clone().unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["question_id"], 2);
    assert_eq!(answers[0]["selected_answer"], "B");
}

#[tokio::test]
async fn failed_submit_reverts_then_manual_retry_succeeds() {
    // Arrange
    let (mut ctrl, state) = spawn_controller(60).await;
    state.fail_submits.store(1, Ordering::SeqCst);
    ctrl.begin_exam().await.unwrap();
    for id in 1..=3 {
        ctrl.select_answer(id, "A").unwrap();
    }

    // Act
    let first = ctrl.submit_manual().await.unwrap();
    let second = ctrl.submit_manual().await.unwrap();

    // Assert
    assert!(matches!(first, SessionUpdate::SubmissionFailed(_)));
    assert!(matches!(second, SessionUpdate::Submitted(_)));
    assert_eq!(ctrl.phase(), SessionPhase::Terminated);
    assert_eq!(state.submit_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn expiry_over_http_submits_partial_answer_set() {
    // Arrange
    let (mut ctrl, state) = spawn_controller(2).await;
    ctrl.begin_exam().await.unwrap();
    ctrl.select_answer(1, "D").unwrap();
    ctrl.select_answer(3, "A").unwrap();

    // Act: run the countdown out.
    ctrl.handle_tick().await;
    let last = ctrl.handle_tick().await;

    // Assert
    assert!(matches!(last, SessionUpdate::Submitted(_)));
    let answers = state.last_answers.lock().unwrap().clone().unwrap();
    assert_eq!(answers.len(), 2);
    assert_eq!(answers[0]["question_id"], 1);
    assert_eq!(answers[1]["question_id"], 3);
    assert_eq!(state.submit_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn history_listing_and_detail_round_trip() {
    // Arrange
    let (base, _state) = spawn_stub().await;
    let api = HttpScoringApi::new(&base).unwrap();

    // Act
    let attempts = api.history().await.unwrap();
    let detail = api.history_detail("sess-past").await.unwrap();
    let missing = api.history_detail("sess-missing").await;

    // Assert
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].status, "COMPLETED");
    assert_eq!(detail.session_id, "sess-past");
    assert!(matches!(missing, Err(AppError::MissingSession(_))));

    let url = api.report_download_url("sess-past");
    assert!(url.ends_with("/api/report/download/sess-past"));
}
