//! Backend seam between the session store and the remote gateway.
//!
//! The store never talks to `reqwest` directly; it calls through this
//! trait so tests can substitute a scripted backend and the production
//! wiring stays a one-liner.

use mentor_gateway::{
    AnalyzeRequest, ApiClient, ExecuteRequest, ExecutionReply, GatewayError, RemoteHint,
};

/// The two remote operations the session store performs.
#[allow(async_fn_in_trait)]
pub trait MentorBackend {
    /// Requests a hint for the given source snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] when no hint could be produced.
    async fn analyze(
        &self,
        request: &AnalyzeRequest,
    ) -> std::result::Result<RemoteHint, GatewayError>;

    /// Runs the given source remotely.
    ///
    /// Always yields a displayable reply; failures arrive as synthesized
    /// error-shaped results.
    async fn execute(&self, request: &ExecuteRequest) -> ExecutionReply;
}

impl MentorBackend for ApiClient {
    async fn analyze(
        &self,
        request: &AnalyzeRequest,
    ) -> std::result::Result<RemoteHint, GatewayError> {
        Self::analyze(self, request).await
    }

    async fn execute(&self, request: &ExecuteRequest) -> ExecutionReply {
        Self::execute(self, request).await
    }
}
