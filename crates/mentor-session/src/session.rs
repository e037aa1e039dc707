//! The session store.
//!
//! `Session` is the single entry point panels use: it owns the mutable
//! state behind a mutex, guards the two remote flows so at most one
//! request per flow is in flight, sanitizes everything the remote service
//! sends back, and broadcasts a change event after every mutation.
//!
//! The mutex is locked briefly around each mutation and never held across
//! an await, so the two flows can genuinely overlap.

use std::sync::Arc;

use mentor_gateway::{AnalyzeRequest, ExecuteRequest, ExecutionResult, HintLevel, Language};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::backend::MentorBackend;
use crate::event::{EventBroadcaster, SessionEvent};
use crate::sanitize::{sanitize_with_limit, MAX_HINT_LEN};
use crate::state::{starter_snippet, SessionState};
use crate::theme::ThemeMode;

/// Hint stored when the remote service could not produce one.
///
/// Always actionable, never empty, and never raw transport detail.
pub const FALLBACK_HINT: &str =
    "The mentor is unavailable right now. Try breaking the problem into smaller \
     steps and re-running your code.";

/// The session store.
///
/// Cheap to clone; all clones share the same state, backend, and event
/// broadcaster. Methods take `&self` so concurrent callers can race, which
/// is exactly what the flow guards exist to referee.
#[derive(Debug, Clone)]
pub struct Session<B: MentorBackend> {
    state: Arc<Mutex<SessionState>>,
    backend: Arc<B>,
    broadcaster: EventBroadcaster,
    hint_max_length: usize,
}

impl<B: MentorBackend> Session<B> {
    /// Creates a session with default state and the default hint length cap.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_hint_limit(backend, MAX_HINT_LEN)
    }

    /// Creates a session with a custom hint length cap.
    #[must_use]
    pub fn with_hint_limit(backend: B, hint_max_length: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new())),
            backend: Arc::new(backend),
            broadcaster: EventBroadcaster::default(),
            hint_max_length,
        }
    }

    // ========================================================================
    // Editor state
    // ========================================================================

    /// Replaces the source text.
    pub async fn update_code(&self, content: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.content = content.into();
    }

    /// Records the cursor line for hint telemetry.
    pub async fn set_cursor_position(&self, line: u32) {
        let mut state = self.state.lock().await;
        state.cursor_position = line;
    }

    /// Switches the language and resets the content to that language's
    /// starter snippet. Destructive: unsaved edits are discarded.
    pub async fn set_language(&self, language: Language) {
        {
            let mut state = self.state.lock().await;
            state.language = language;
            state.content = starter_snippet(language).to_string();
        }
        debug!(%language, "Language switched");
        self.broadcaster.send(SessionEvent::language_changed(language));
    }

    /// Replaces the editor diagnostics wholesale.
    pub async fn set_errors(&self, errors: Vec<String>) {
        let mut state = self.state.lock().await;
        state.has_errors = !errors.is_empty();
        state.errors = errors;
    }

    /// Sets the error flag without touching the diagnostic list.
    pub async fn set_has_errors(&self, has_errors: bool) {
        let mut state = self.state.lock().await;
        state.has_errors = has_errors;
    }

    // ========================================================================
    // Hint flow
    // ========================================================================

    /// Requests a hint for the current source snapshot.
    ///
    /// Single-flight: returns `false` without calling the backend if a hint
    /// request is already in flight. Otherwise a hint is always stored, a
    /// sanitized remote hint on success or [`FALLBACK_HINT`] on any failure,
    /// and the flow returns to idle.
    pub async fn request_hint(&self) -> bool {
        let request = {
            let mut state = self.state.lock().await;
            if !state.hint_flow.try_begin() {
                debug!("Hint request dropped, one is already in flight");
                return false;
            }
            AnalyzeRequest {
                content: state.content.clone(),
                language: state.language,
                cursor_position: state.cursor_position,
                errors: state.errors.clone(),
            }
        };
        self.broadcaster.send(SessionEvent::HintPending);

        let outcome = self.backend.analyze(&request).await;

        let hint = {
            let mut state = self.state.lock().await;
            let hint = match outcome {
                Ok(remote) => {
                    let content = sanitize_with_limit(&remote.content, self.hint_max_length);
                    state.push_hint(remote.level, content)
                }
                Err(err) => {
                    warn!(error = %err.user_message(), "Hint request failed, storing fallback");
                    state.push_hint(HintLevel::Concept, FALLBACK_HINT.to_string())
                }
            };
            state.hint_flow.finish();
            hint
        };
        self.broadcaster.send(SessionEvent::hint_added(hint));
        true
    }

    /// Removes all stored hints.
    pub async fn clear_hints(&self) {
        {
            let mut state = self.state.lock().await;
            state.hints.clear();
        }
        self.broadcaster.send(SessionEvent::HintsCleared);
    }

    // ========================================================================
    // Execution flow
    // ========================================================================

    /// Runs the current source in the remote sandbox.
    ///
    /// Single-flight: returns `false` without calling the backend if an
    /// execution is already in flight, or if the content is empty or
    /// whitespace-only (nothing to run, previous result untouched).
    /// Otherwise the stored result is replaced wholesale with the reply's
    /// result, synthesized by the gateway on failure, and the flow returns
    /// to idle.
    pub async fn request_execution(&self) -> bool {
        let request = {
            let mut state = self.state.lock().await;
            if state.content.trim().is_empty() {
                debug!("Execution request dropped, nothing to run");
                return false;
            }
            if !state.execution_flow.try_begin() {
                debug!("Execution request dropped, one is already in flight");
                return false;
            }
            ExecuteRequest {
                content: state.content.clone(),
                language: state.language,
            }
        };
        self.broadcaster.send(SessionEvent::ExecutionPending);

        let reply = self.backend.execute(&request).await;

        let result = {
            let mut state = self.state.lock().await;
            state.execution_result = Some(reply.result.clone());
            state.execution_flow.finish();
            reply.result
        };
        self.broadcaster.send(SessionEvent::execution_finished(result));
        true
    }

    // ========================================================================
    // Theme
    // ========================================================================

    /// Switches between dark and light mode, swapping the whole palette.
    pub async fn toggle_theme(&self) {
        let mode = {
            let mut state = self.state.lock().await;
            state.theme.toggle();
            state.theme.mode
        };
        self.broadcaster.send(SessionEvent::theme_changed(mode));
    }

    // ========================================================================
    // Read access
    // ========================================================================

    /// Returns a cloned snapshot of the current state.
    pub async fn state(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// Returns `true` if a hint request is in flight.
    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.is_loading()
    }

    /// Returns `true` if an execution request is in flight.
    pub async fn is_executing(&self) -> bool {
        self.state.lock().await.is_executing()
    }

    /// Returns the active theme mode.
    pub async fn theme_mode(&self) -> ThemeMode {
        self.state.lock().await.theme.mode
    }

    /// Returns the stored outcome of the most recent execution, if any.
    pub async fn execution_result(&self) -> Option<ExecutionResult> {
        self.state.lock().await.execution_result.clone()
    }

    /// Subscribes to change events.
    #[must_use]
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<SessionEvent> {
        self.broadcaster.subscribe()
    }
}

// ============================================================================
// Tests
// ============================================================================
