//! Single-flight guards for the session's remote flows.
//!
//! The session runs two independent remote flows, hint analysis and code
//! execution. Each is guarded by a tiny two-state machine so at most one
//! request per flow is in flight at a time. A second request arriving
//! while the flow is `Pending` is refused at the door rather than queued.

use serde::{Deserialize, Serialize};

/// State of one remote flow.
///
/// Transitions: `Idle -> Pending` via [`Flow::try_begin`], and
/// `Pending -> Idle` via [`Flow::finish`]. There is no other edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    /// No request in flight; a new one may begin.
    #[default]
    Idle,
    /// A request is in flight; further requests are refused.
    Pending,
}

impl Flow {
    /// Returns `true` if a request is currently in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Attempts to claim the flow for a new request.
    ///
    /// Returns `true` and moves to `Pending` if the flow was idle;
    /// returns `false` and leaves the state untouched otherwise.
    pub fn try_begin(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = Self::Pending;
        true
    }

    /// Releases the flow after a request settles, success or failure.
    pub fn finish(&mut self) {
        *self = Self::Idle;
    }
}

// ============================================================================
// Tests
// ============================================================================
