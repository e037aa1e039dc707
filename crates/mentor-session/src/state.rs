//! Session state types.
//!
//! This module defines the single mutable aggregate behind the session
//! store, plus the stored hint type and the per-language starter snippets.
//! All mutation goes through `Session` operations; nothing here is
//! persisted across sessions.

use chrono::{DateTime, Utc};
use mentor_gateway::{ExecutionResult, HintLevel, Language};
use serde::Serialize;

use crate::flow::Flow;
use crate::theme::Theme;

// ============================================================================
// Starter snippets
// ============================================================================

/// Content a fresh session starts with.
pub const WELCOME_SNIPPET: &str = "# Welcome to Code Mentor
# Write your Python code here and click \"Get Help\" for AI assistance

def hello_world():
    print(\"Hello, World!\")

hello_world()";

/// Returns the starter snippet used when switching to `language`.
#[must_use]
pub const fn starter_snippet(language: Language) -> &'static str {
    match language {
        Language::Python => "# Python code here\nprint(\"Hello from Python!\")",
        Language::Javascript => {
            "// JavaScript code here\nconsole.log(\"Hello from JavaScript!\");"
        }
    }
}

// ============================================================================
// Hint
// ============================================================================

/// A hint as stored by the session.
///
/// `content` has already been sanitized; `timestamp` is the local arrival
/// time, not whatever the service claimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hint {
    /// Session-unique identifier, from a per-session monotonic counter.
    pub id: String,
    /// Escalation level chosen by the service.
    pub level: HintLevel,
    /// Sanitized display text.
    pub content: String,
    /// When the session stored this hint.
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// SessionState
// ============================================================================

/// The complete mutable state of one editing session.
///
/// Created once with fixed defaults and mutated only through the session
/// store, which keeps it behind a mutex. Intentionally not serializable:
/// sessions are never persisted.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// The source text being edited.
    pub content: String,
    /// The language the source text is written in.
    pub language: Language,
    /// Last known cursor line, advisory telemetry for hint requests.
    pub cursor_position: u32,
    /// Whether the editor currently reports diagnostics.
    pub has_errors: bool,
    /// The editor's current diagnostics, replaced wholesale.
    pub errors: Vec<String>,
    /// Stored hints, append-only until cleared.
    pub hints: Vec<Hint>,
    /// Escalation level of the most recently stored hint.
    pub current_level: HintLevel,
    /// Outcome of the most recent execution, if any.
    pub execution_result: Option<ExecutionResult>,
    /// Guard for the hint flow.
    pub hint_flow: Flow,
    /// Guard for the execution flow.
    pub execution_flow: Flow,
    /// Active theme.
    pub theme: Theme,
    /// Next hint id, incremented on every stored hint.
    next_hint_id: u64,
}

impl SessionState {
    /// Creates the default state for a fresh session: dark theme, Python
    /// welcome snippet, no hints, no execution result, both flows idle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            content: WELCOME_SNIPPET.to_string(),
            language: Language::Python,
            cursor_position: 0,
            has_errors: false,
            errors: Vec::new(),
            hints: Vec::new(),
            current_level: HintLevel::Concept,
            execution_result: None,
            hint_flow: Flow::Idle,
            execution_flow: Flow::Idle,
            theme: Theme::dark(),
            next_hint_id: 1,
        }
    }

    /// Stores a sanitized hint, stamping it with a fresh id and the current
    /// time. Also records its level as the current escalation level.
    pub fn push_hint(&mut self, level: HintLevel, content: String) -> Hint {
        let hint = Hint {
            id: self.next_hint_id.to_string(),
            level,
            content,
            timestamp: Utc::now(),
        };
        self.next_hint_id += 1;
        self.current_level = level;
        self.hints.push(hint.clone());
        hint
    }

    /// Returns `true` if a hint request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.hint_flow.is_pending()
    }

    /// Returns `true` if an execution request is in flight.
    #[must_use]
    pub const fn is_executing(&self) -> bool {
        self.execution_flow.is_pending()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
