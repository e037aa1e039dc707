//! Code Mentor Remote Gateway
//!
//! Typed HTTP access to the remote mentor service's analysis and
//! sandboxed-execution endpoints.

pub mod client;
pub mod error;
pub mod protocol;

pub use client::{ApiClient, ExecutionReply, DEFAULT_TIMEOUT};
pub use error::{GatewayError, Result};
pub use protocol::{
    AnalyzeRequest, AnalyzeResponse, ExecuteRequest, ExecuteResponse, ExecutionResult,
    ExecutionStatus, HintLevel, Language, LanguageInfo, LanguagesResponse, RemoteHint,
    SandboxLimits, SandboxSecurity, SandboxStatus,
};
