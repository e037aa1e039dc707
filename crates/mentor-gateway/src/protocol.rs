//! Wire types shared with the remote mentor service.
//!
//! These structures mirror the JSON bodies of the service's `/api/v1`
//! endpoints. Field names follow the service's snake_case convention;
//! domain-facing names that differ (`execution_time_ms` vs the wire's
//! `execution_time`) are mapped with serde renames so callers never deal
//! with raw wire spellings.

use serde::{Deserialize, Serialize};

// ============================================================================
// Language
// ============================================================================

/// Languages the remote sandbox can execute and the hint service understands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Python 3 (default).
    #[default]
    Python,
    /// JavaScript running on Node.js.
    Javascript,
}

impl Language {
    /// Returns the wire identifier for this language.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Javascript => "javascript",
        }
    }

    /// Returns the human-readable name for this language.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::Javascript => "JavaScript",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ============================================================================
// Hint analysis
// ============================================================================

/// Escalation level of a hint, from conceptual nudge to near-solution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HintLevel {
    /// Points at the underlying concept (default, least revealing).
    #[default]
    Concept,
    /// Suggests a concrete approach.
    Approach,
    /// Sketches the solution in pseudo-code (most revealing).
    PseudoCode,
}

impl std::fmt::Display for HintLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Concept => "concept",
            Self::Approach => "approach",
            Self::PseudoCode => "pseudo-code",
        };
        write!(f, "{s}")
    }
}

/// Request body for `POST /api/v1/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// The full source text under analysis.
    pub content: String,
    /// The language of the source text.
    pub language: Language,
    /// Last known cursor line, advisory telemetry for the hint service.
    pub cursor_position: u32,
    /// Editor diagnostics, if any.
    #[serde(default)]
    pub errors: Vec<String>,
}

/// A hint as produced by the remote service.
///
/// The `timestamp` is whatever string the service sent (sometimes empty);
/// callers stamp their own arrival time when storing the hint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteHint {
    /// Escalation level chosen by the service.
    pub level: HintLevel,
    /// Raw hint text. Untrusted: sanitize before display.
    pub content: String,
    /// Service-side timestamp, passed through verbatim.
    #[serde(default)]
    pub timestamp: String,
}

/// Response body for `POST /api/v1/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Whether the service considers the analysis successful.
    pub success: bool,
    /// The generated hint; required when `success` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<RemoteHint>,
    /// Optional service message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// Code execution
// ============================================================================

/// Request body for `POST /api/v1/execute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteRequest {
    /// The source text to run.
    pub content: String,
    /// The language to run it as.
    pub language: Language,
}

/// Terminal status of a sandbox execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    /// The program ran to completion with exit code 0.
    Success,
    /// The program failed, or the request itself failed.
    Error,
    /// The sandbox (or the gateway) cut the run short.
    Timeout,
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Timeout => "timeout",
        };
        write!(f, "{s}")
    }
}

/// Outcome of a single sandbox execution.
///
/// Wire field names differ from the domain names for the timing fields;
/// serde renames bridge the two so `execution_time` on the wire arrives
/// here as `execution_time_ms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Captured stdout of the run.
    pub output: String,
    /// Errors reported by the sandbox (stderr lines, tracebacks).
    #[serde(default)]
    pub errors: Vec<String>,
    /// Non-fatal warnings reported by the sandbox.
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Wall-clock execution time in milliseconds.
    #[serde(rename = "execution_time", default)]
    pub execution_time_ms: f64,
    /// Peak memory in megabytes, if the sandbox measured it.
    #[serde(rename = "memory_used", default, skip_serializing_if = "Option::is_none")]
    pub memory_used_mb: Option<f64>,
    /// CPU time in seconds, if the sandbox measured it.
    #[serde(rename = "cpu_time", default, skip_serializing_if = "Option::is_none")]
    pub cpu_time_sec: Option<f64>,
    /// Terminal status of the run.
    pub status: ExecutionStatus,
    /// Process exit code, if one was observed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl ExecutionResult {
    /// Builds a synthetic result for a request that never produced a real
    /// one: empty output, a single descriptive error, zero timings.
    #[must_use]
    pub fn failure(message: impl Into<String>, status: ExecutionStatus) -> Self {
        Self {
            output: String::new(),
            errors: vec![message.into()],
            warnings: Vec::new(),
            execution_time_ms: 0.0,
            memory_used_mb: None,
            cpu_time_sec: None,
            status,
            exit_code: None,
        }
    }

    /// Returns `true` if the run completed successfully.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ExecutionStatus::Success
    }
}

/// Response body for `POST /api/v1/execute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResponse {
    /// Whether the run completed successfully.
    pub success: bool,
    /// The execution outcome; required on a well-formed response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ExecutionResult>,
    /// Optional service message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// Supplementary endpoints
// ============================================================================

/// One entry of `GET /api/v1/languages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageInfo {
    /// Wire identifier (`python`, `javascript`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Runtime version string.
    pub version: String,
    /// Whether the sandbox currently supports this language.
    pub supported: bool,
}

/// Response body for `GET /api/v1/languages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesResponse {
    /// All languages the service knows about.
    pub languages: Vec<LanguageInfo>,
}

/// Resource limits enforced by the sandbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxLimits {
    /// Per-run timeout in seconds.
    pub timeout: u32,
    /// Memory ceiling in megabytes.
    pub memory_mb: u32,
    /// Maximum number of processes per run.
    pub max_processes: u32,
}

/// Isolation posture reported by the sandbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxSecurity {
    /// Whether runs are isolated from the host.
    pub isolated: bool,
    /// Whether network access is disabled inside the sandbox.
    pub network_disabled: bool,
    /// Whether the sandbox filesystem is read-only.
    pub filesystem_readonly: bool,
}

/// Response body for `GET /api/v1/sandbox/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxStatus {
    /// Readiness indicator (`ready` when accepting runs).
    pub status: String,
    /// Resource limits currently enforced.
    pub limits: SandboxLimits,
    /// Isolation posture.
    pub security: SandboxSecurity,
}

// ============================================================================
// Failure bodies
// ============================================================================

/// Error body shape the service uses on non-2xx responses.
///
/// FastAPI-style services put the message under `detail`; others use
/// `message`. Resolution order is `detail`, then `message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FailureBody {
    /// FastAPI-style error detail.
    #[serde(default)]
    pub detail: Option<String>,
    /// Generic error message.
    #[serde(default)]
    pub message: Option<String>,
}

impl FailureBody {
    /// Returns the best human-readable message this body carries, if any.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.detail.or(self.message)
    }
}

// ============================================================================
// Tests
// ============================================================================
