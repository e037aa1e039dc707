//! HTTP client for the remote mentor service.
//!
//! `ApiClient` translates the two logical operations (hint analysis and
//! sandboxed execution) into `POST` calls against a configured base
//! address and absorbs every expected failure mode into the typed
//! [`GatewayError`] contract. Execution failures additionally synthesize a
//! displayable [`ExecutionResult`] so callers always have "a result to
//! show", whatever happened on the wire.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{GatewayError, Result};
use crate::protocol::{
    AnalyzeRequest, AnalyzeResponse, ExecuteRequest, ExecuteResponse, ExecutionResult,
    ExecutionStatus, FailureBody, LanguageInfo, LanguagesResponse, RemoteHint, SandboxStatus,
};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// ExecutionReply
// ============================================================================

/// Normalized outcome of an execution request.
///
/// Unlike the wire-level [`ExecuteResponse`], the `result` here is never
/// absent: when the request fails before producing a real outcome the
/// gateway synthesizes one, so callers treat success and failure uniformly.
#[derive(Debug, Clone)]
pub struct ExecutionReply {
    /// Whether the run completed successfully.
    pub success: bool,
    /// The (possibly synthesized) execution outcome.
    pub result: ExecutionResult,
    /// Optional service or failure message.
    pub message: Option<String>,
}

impl ExecutionReply {
    /// Synthesizes a reply from a failed request.
    ///
    /// A timed-out request maps to a `timeout`-status result; every other
    /// failure maps to `error`. The failure's display-safe message becomes
    /// the sole error entry, and an HTTP failure records its status code as
    /// the exit code.
    #[must_use]
    pub fn from_failure(err: &GatewayError) -> Self {
        let status = if err.is_timeout() {
            ExecutionStatus::Timeout
        } else {
            ExecutionStatus::Error
        };
        let message = err.user_message();
        let mut result = ExecutionResult::failure(message.clone(), status);
        if let GatewayError::Http { status, .. } = err {
            result.exit_code = Some(i32::from(*status));
        }
        Self {
            success: false,
            result,
            message: Some(message),
        }
    }
}

// ============================================================================
// ApiClient
// ============================================================================

/// Stateless transport adapter for the mentor service's `/api/v1` surface.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Creates a client for the given base address with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client with an explicit per-request timeout.
    ///
    /// The timeout bounds every call, so no request can leave its caller
    /// waiting indefinitely.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Network` if the underlying HTTP client cannot
    /// be constructed (e.g., no TLS backend available).
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::network(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    /// Returns the configured base address.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the full URL for an `/api/v1` path.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1/{path}", self.base_url)
    }

    /// Requests a hint for the given source snapshot.
    ///
    /// # Errors
    ///
    /// Returns the uniform [`GatewayError`] contract: `Network`/`Timeout`
    /// for transport failures, `Http` for non-2xx statuses (message resolved
    /// from the body), `Payload` for unreadable bodies, and `Rejected` when
    /// the service answers 2xx with `success: false`.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<RemoteHint> {
        debug!(
            language = %request.language,
            cursor = request.cursor_position,
            content_len = request.content.len(),
            "Sending analysis request"
        );

        let response = self
            .http
            .post(self.endpoint("analyze"))
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::from_reqwest(&e, self.timeout.as_secs()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::from_reqwest(&e, self.timeout.as_secs()))?;

        if !status.is_success() {
            let message = resolve_failure_message(status.as_u16(), &body);
            warn!(status = status.as_u16(), %message, "Analysis request failed");
            return Err(GatewayError::http(status.as_u16(), message));
        }

        let parsed: AnalyzeResponse =
            serde_json::from_slice(&body).map_err(|e| GatewayError::payload(e.to_string()))?;

        if !parsed.success {
            let message = parsed
                .message
                .unwrap_or_else(|| "analysis was not successful".to_string());
            return Err(GatewayError::rejected(message));
        }

        parsed
            .hint
            .ok_or_else(|| GatewayError::payload("missing hint in analysis response"))
    }

    /// Runs the given source in the remote sandbox.
    ///
    /// Never fails: any transport, protocol, or payload failure is folded
    /// into a synthesized error-shaped (or timeout-shaped) result.
    pub async fn execute(&self, request: &ExecuteRequest) -> ExecutionReply {
        match self.try_execute(request).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err.user_message(), "Execution request failed");
                ExecutionReply::from_failure(&err)
            }
        }
    }

    /// Inner execution call with the uniform failure contract.
    async fn try_execute(&self, request: &ExecuteRequest) -> Result<ExecutionReply> {
        debug!(
            language = %request.language,
            content_len = request.content.len(),
            "Sending execution request"
        );

        let response = self
            .http
            .post(self.endpoint("execute"))
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::from_reqwest(&e, self.timeout.as_secs()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::from_reqwest(&e, self.timeout.as_secs()))?;

        if !status.is_success() {
            let message = resolve_failure_message(status.as_u16(), &body);
            return Err(GatewayError::http(status.as_u16(), message));
        }

        let parsed: ExecuteResponse =
            serde_json::from_slice(&body).map_err(|e| GatewayError::payload(e.to_string()))?;

        let result = parsed
            .result
            .ok_or_else(|| GatewayError::payload("missing result in execution response"))?;

        debug!(
            status = %result.status,
            execution_time_ms = result.execution_time_ms,
            "Execution completed"
        );

        Ok(ExecutionReply {
            success: parsed.success,
            result,
            message: parsed.message,
        })
    }

    /// Fetches the languages the service supports.
    ///
    /// # Errors
    ///
    /// Returns the uniform [`GatewayError`] contract.
    pub async fn languages(&self) -> Result<Vec<LanguageInfo>> {
        let response: LanguagesResponse = self.get_json("languages").await?;
        Ok(response.languages)
    }

    /// Fetches the sandbox's readiness and limits.
    ///
    /// # Errors
    ///
    /// Returns the uniform [`GatewayError`] contract.
    pub async fn sandbox_status(&self) -> Result<SandboxStatus> {
        self.get_json("sandbox/status").await
    }

    /// Issues a `GET` against an `/api/v1` path and decodes the JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .http
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(|e| GatewayError::from_reqwest(&e, self.timeout.as_secs()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::from_reqwest(&e, self.timeout.as_secs()))?;

        if !status.is_success() {
            let message = resolve_failure_message(status.as_u16(), &body);
            return Err(GatewayError::http(status.as_u16(), message));
        }

        serde_json::from_slice(&body).map_err(|e| GatewayError::payload(e.to_string()))
    }
}

/// Resolves the failure message for a non-2xx response.
///
/// Resolution order: body `detail`, body `message`, `"HTTP {status}"`.
fn resolve_failure_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<FailureBody>(body)
        .ok()
        .and_then(FailureBody::into_message)
        .unwrap_or_else(|| format!("HTTP {status}"))
}

// ============================================================================
// Tests
// ============================================================================
