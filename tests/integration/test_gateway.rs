//! Integration tests for the remote gateway.
//!
//! These tests run the real `ApiClient` against an in-process axum stub of
//! the mentor service, covering the wire contract, failure message
//! resolution, and the synthesized execution results for transport
//! failures.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::Json;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use mentor_gateway::{
    AnalyzeRequest, ApiClient, ExecuteRequest, ExecutionStatus, GatewayError, HintLevel, Language,
};
use serde_json::{json, Value};

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

fn sample_analyze_request() -> AnalyzeRequest {
    AnalyzeRequest {
        content: "print(1)".to_string(),
        language: Language::Python,
        cursor_position: 2,
        errors: vec!["unexpected indent".to_string()],
    }
}

fn sample_execute_request() -> ExecuteRequest {
    ExecuteRequest {
        content: "print(1)".to_string(),
        language: Language::Python,
    }
}

// ----------------------------------------------------------------------------
// Analyze tests
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_analyze_sends_wire_contract_and_parses_hint() {
    let captured: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let captured_clone = Arc::clone(&captured);

    let router = Router::new().route(
        "/api/v1/analyze",
        post(move |Json(body): Json<Value>| {
            let captured = Arc::clone(&captured_clone);
            async move {
                *captured.lock().expect("lock") = Some(body);
                Json(json!({
                    "success": true,
                    "hint": {
                        "level": "approach",
                        "content": "Consider using a loop.",
                        "timestamp": "2026-02-03T10:00:00Z"
                    }
                }))
            }
        }),
    );
    let (base_url, _handle) = spawn_stub(router).await;

    let client = ApiClient::new(&base_url).expect("Failed to build client");
    let hint = client
        .analyze(&sample_analyze_request())
        .await
        .expect("Analyze failed");

    assert_eq!(hint.level, HintLevel::Approach);
    assert_eq!(hint.content, "Consider using a loop.");

    // The request body must carry the exact wire field names.
    let body = captured.lock().expect("lock").clone().expect("no body");
    assert_eq!(body["content"], "print(1)");
    assert_eq!(body["language"], "python");
    assert_eq!(body["cursor_position"], 2);
    assert_eq!(body["errors"], json!(["unexpected indent"]));
}

#[tokio::test]
async fn test_analyze_failure_message_resolved_from_detail() {
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

    let client = ApiClient::new(&base_url).expect("Failed to build client");
    let err = client
        .analyze(&sample_analyze_request())
        .await
        .expect_err("Expected failure");

    match &err {
        GatewayError::Http { status, message } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "model overloaded");
        }
        other => panic!("Expected Http error, got {other:?}"),
    }
    assert_eq!(err.user_message(), "model overloaded");
}

#[tokio::test]
async fn test_analyze_failure_message_falls_back_to_message_field() {
    let router = Router::new().route(
        "/api/v1/analyze",
        post(|| async {
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({"message": "rate limited"})),
            )
        }),
    );
    let (base_url, _handle) = spawn_stub(router).await;

    let client = ApiClient::new(&base_url).expect("Failed to build client");
    let err = client
        .analyze(&sample_analyze_request())
        .await
        .expect_err("Expected failure");

    assert_eq!(err.user_message(), "rate limited");
}

#[tokio::test]
async fn test_analyze_failure_message_generic_for_unparsable_body() {
    let router = Router::new().route(
        "/api/v1/analyze",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "<html>Internal Server Error</html>",
            )
        }),
    );
    let (base_url, _handle) = spawn_stub(router).await;

    let client = ApiClient::new(&base_url).expect("Failed to build client");
    let err = client
        .analyze(&sample_analyze_request())
        .await
        .expect_err("Expected failure");

    assert_eq!(err.user_message(), "HTTP 500");
}

#[tokio::test]
async fn test_analyze_rejected_when_service_flags_failure() {
    let router = Router::new().route(
        "/api/v1/analyze",
        post(|| async { Json(json!({"success": false, "message": "content too large"})) }),
    );
    let (base_url, _handle) = spawn_stub(router).await;

    let client = ApiClient::new(&base_url).expect("Failed to build client");
    let err = client
        .analyze(&sample_analyze_request())
        .await
        .expect_err("Expected failure");

    assert!(matches!(err, GatewayError::Rejected { .. }));
    assert_eq!(err.user_message(), "content too large");
}

// ----------------------------------------------------------------------------
// Execute tests
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_execute_parses_successful_result() {
    let router = Router::new().route(
        "/api/v1/execute",
        post(|| async {
            Json(json!({
                "success": true,
                "result": {
                    "output": "1\n",
                    "errors": [],
                    "warnings": [],
                    "execution_time": 12.5,
                    "memory_used": 4.2,
                    "cpu_time": 0.01,
                    "status": "success",
                    "exit_code": 0
                }
            }))
        }),
    );
    let (base_url, _handle) = spawn_stub(router).await;

    let client = ApiClient::new(&base_url).expect("Failed to build client");
    let reply = client.execute(&sample_execute_request()).await;

    assert!(reply.success);
    assert_eq!(reply.result.output, "1\n");
    assert_eq!(reply.result.status, ExecutionStatus::Success);
    assert_eq!(reply.result.exit_code, Some(0));
}

#[tokio::test]
async fn test_execute_synthesizes_result_when_sandbox_unavailable() {
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

    let client = ApiClient::new(&base_url).expect("Failed to build client");
    let reply = client.execute(&sample_execute_request()).await;

    assert!(!reply.success);
    assert_eq!(reply.result.status, ExecutionStatus::Error);
    assert_eq!(reply.result.errors, vec!["sandbox unavailable"]);
    assert!(reply.result.output.is_empty());
    assert_eq!(reply.result.exit_code, Some(503));
    assert_eq!(reply.message.as_deref(), Some("sandbox unavailable"));
}

#[tokio::test]
async fn test_execute_timeout_synthesizes_timeout_result() {
    let router = Router::new().route(
        "/api/v1/execute",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"success": true}))
        }),
    );
    let (base_url, _handle) = spawn_stub(router).await;

    let client = ApiClient::with_timeout(&base_url, Duration::from_secs(1))
        .expect("Failed to build client");
    let reply = client.execute(&sample_execute_request()).await;

    assert!(!reply.success);
    assert_eq!(reply.result.status, ExecutionStatus::Timeout);
    assert_eq!(reply.result.errors.len(), 1);
    assert!(reply.result.errors[0].contains("timed out"));
}

#[tokio::test]
async fn test_execute_unreachable_service_yields_generic_message() {
    // Nothing is listening here.
    let client = ApiClient::new("http://127.0.0.1:9").expect("Failed to build client");
    let reply = client.execute(&sample_execute_request()).await;

    assert!(!reply.success);
    assert_eq!(reply.result.status, ExecutionStatus::Error);
    assert_eq!(
        reply.result.errors,
        vec!["Could not reach the code mentor service"]
    );
}

// ----------------------------------------------------------------------------
// Supplementary endpoint tests
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_languages_endpoint() {
    let router = Router::new().route(
        "/api/v1/languages",
        get(|| async {
            Json(json!({"languages": [
                {"id": "python", "name": "Python", "version": "3.x", "supported": true},
                {"id": "javascript", "name": "JavaScript", "version": "Node.js", "supported": true}
            ]}))
        }),
    );
    let (base_url, _handle) = spawn_stub(router).await;

    let client = ApiClient::new(&base_url).expect("Failed to build client");
    let languages = client.languages().await.expect("Languages failed");

    assert_eq!(languages.len(), 2);
    assert_eq!(languages[0].id, "python");
    assert!(languages[1].supported);
}

#[tokio::test]
async fn test_sandbox_status_endpoint() {
    let router = Router::new().route(
        "/api/v1/sandbox/status",
        get(|| async {
            Json(json!({
                "status": "ready",
                "limits": {"timeout": 5, "memory_mb": 128, "max_processes": 10},
                "security": {
                    "isolated": true,
                    "network_disabled": true,
                    "filesystem_readonly": true
                }
            }))
        }),
    );
    let (base_url, _handle) = spawn_stub(router).await;

    let client = ApiClient::new(&base_url).expect("Failed to build client");
    let status = client.sandbox_status().await.expect("Status failed");

    assert_eq!(status.status, "ready");
    assert_eq!(status.limits.memory_mb, 128);
    assert!(status.security.isolated);
}
