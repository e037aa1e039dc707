//! End-to-end tests for the session store over the real gateway.
//!
//! Each test spins up an in-process axum stub of the mentor service and
//! drives a `Session` backed by a real `ApiClient`, validating the full
//! path from operation call to stored, sanitized state.

use std::time::Duration;

use axum::extract::Json;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use mentor_gateway::{ApiClient, ExecutionStatus, HintLevel};
use mentor_session::{Session, FALLBACK_HINT, MAX_HINT_LEN};
use serde_json::json;

/// Spawns the stub service and returns its base URL.
async fn spawn_stub(router: Router) -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get local addr");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server failed");
    });

    (format!("http://{addr}"), handle)
}

/// Builds a session backed by a real client against the stub.
fn session_for(base_url: &str) -> Session<ApiClient> {
    let client = ApiClient::new(base_url).expect("Failed to build client");
    Session::new(client)
}

// ----------------------------------------------------------------------------
// Hint flow
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_hint_flow_stores_sanitized_capped_hint() {
    // Messy whitespace and well over the length cap.
    let content = format!("  use   a\n\nloop {}", "x".repeat(500));
    let router = Router::new().route(
        "/api/v1/analyze",
        post(move || {
            let content = content.clone();
            async move {
                Json(json!({
                    "success": true,
                    "hint": {"level": "concept", "content": content, "timestamp": ""}
                }))
            }
        }),
    );
    let (base_url, _handle) = spawn_stub(router).await;

    let session = session_for(&base_url);
    assert!(session.request_hint().await);

    let state = session.state().await;
    assert_eq!(state.hints.len(), 1);
    let hint = &state.hints[0];
    assert!(hint.content.starts_with("use a loop"));
    assert!(!hint.content.contains('\n'));
    assert_eq!(hint.content.chars().count(), MAX_HINT_LEN);
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_hint_failure_stores_fallback_and_releases_guard() {
    let router = Router::new().route(
        "/api/v1/analyze",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"detail": "model overloaded"})),
            )
        }),
    );
    let (base_url, _handle) = spawn_stub(router).await;

    let session = session_for(&base_url);
    assert!(session.request_hint().await);

    let state = session.state().await;
    assert_eq!(state.hints.len(), 1);
    assert_eq!(state.hints[0].level, HintLevel::Concept);
    assert_eq!(state.hints[0].content, FALLBACK_HINT);
    assert!(!state.is_loading());

    // The flow must be reusable after a failure.
    assert!(session.request_hint().await);
    assert_eq!(session.state().await.hints.len(), 2);
}

// ----------------------------------------------------------------------------
// Execution flow
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_execution_flow_stores_result() {
    let router = Router::new().route(
        "/api/v1/execute",
        post(|| async {
            Json(json!({
                "success": true,
                "result": {
                    "output": "Hello, World!\n",
                    "errors": [],
                    "warnings": [],
                    "execution_time": 20.0,
                    "status": "success",
                    "exit_code": 0
                }
            }))
        }),
    );
    let (base_url, _handle) = spawn_stub(router).await;

    let session = session_for(&base_url);
    session.update_code("print(\"Hello, World!\")").await;
    assert!(session.request_execution().await);

    let result = session.execution_result().await.expect("no result stored");
    assert_eq!(result.output, "Hello, World!\n");
    assert_eq!(result.status, ExecutionStatus::Success);
    assert!(!session.is_executing().await);
}

#[tokio::test]
async fn test_sandbox_unavailable_stored_as_error_result() {
    let router = Router::new().route(
        "/api/v1/execute",
        post(|| async {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"detail": "sandbox unavailable"})),
            )
        }),
    );
    let (base_url, _handle) = spawn_stub(router).await;

    let session = session_for(&base_url);
    session.update_code("print(1)").await;
    assert!(session.request_execution().await);

    let result = session.execution_result().await.expect("no result stored");
    assert_eq!(result.status, ExecutionStatus::Error);
    assert_eq!(result.errors, vec!["sandbox unavailable"]);
    assert!(result.output.is_empty());
    assert!(!session.is_executing().await);
}

#[tokio::test]
async fn test_slow_service_cannot_hang_the_execution_flow() {
    let router = Router::new().route(
        "/api/v1/execute",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Json(json!({"success": true}))
        }),
    );
    let (base_url, _handle) = spawn_stub(router).await;

    let client = ApiClient::with_timeout(&base_url, Duration::from_secs(1))
        .expect("Failed to build client");
    let session = Session::new(client);
    session.update_code("while True: pass").await;

    assert!(session.request_execution().await);

    // The request settled via the timeout: a result is stored and the
    // guard is back to idle.
    let result = session.execution_result().await.expect("no result stored");
    assert_eq!(result.status, ExecutionStatus::Timeout);
    assert!(!session.is_executing().await);
    assert!(session.request_execution().await);
}

#[tokio::test]
async fn test_unreachable_service_stores_generic_error_result() {
    // Nothing is listening here.
    let client = ApiClient::new("http://127.0.0.1:9").expect("Failed to build client");
    let session = Session::new(client);
    session.update_code("print(1)").await;

    assert!(session.request_execution().await);

    let result = session.execution_result().await.expect("no result stored");
    assert_eq!(result.status, ExecutionStatus::Error);
    assert_eq!(result.errors, vec!["Could not reach the code mentor service"]);
    assert!(!session.is_executing().await);
}
