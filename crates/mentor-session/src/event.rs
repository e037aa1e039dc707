//! Session event types and broadcasting.
//!
//! Observers (panels, loggers) re-render from store snapshots; events tell
//! them when to look. Events are broadcast over a tokio broadcast channel
//! and are fire-and-forget: a subscriber that falls behind misses events
//! and simply re-reads the state.
//!
//! # Event Types
//!
//! - `hint_pending` - A hint request was accepted and is in flight
//! - `hint_added` - A hint (real or fallback) was stored
//! - `hints_cleared` - All hints were removed
//! - `execution_pending` - An execution request was accepted
//! - `execution_finished` - An execution result was stored
//! - `theme_changed` - The theme was toggled
//! - `language_changed` - The language (and content) was switched

use mentor_gateway::{ExecutionResult, Language};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::state::Hint;
use crate::theme::ThemeMode;

// ============================================================================
// Event Payloads
// ============================================================================

/// Payload for the `hint_added` event.
#[derive(Debug, Clone, Serialize)]
pub struct HintAddedPayload {
    /// The stored hint.
    pub hint: Hint,
}

/// Payload for the `execution_finished` event.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionFinishedPayload {
    /// The stored execution outcome.
    pub result: ExecutionResult,
}

/// Payload for the `theme_changed` event.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeChangedPayload {
    /// The newly active mode.
    pub mode: ThemeMode,
}

/// Payload for the `language_changed` event.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageChangedPayload {
    /// The newly active language.
    pub language: Language,
}

// ============================================================================
// Event Enum
// ============================================================================

/// Session change notifications.
///
/// Serialized as JSON objects with "event" and "payload" fields.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A hint request was accepted and is in flight.
    HintPending,
    /// A hint was stored.
    HintAdded(HintAddedPayload),
    /// All hints were removed.
    HintsCleared,
    /// An execution request was accepted and is in flight.
    ExecutionPending,
    /// An execution result was stored.
    ExecutionFinished(ExecutionFinishedPayload),
    /// The theme was toggled.
    ThemeChanged(ThemeChangedPayload),
    /// The language was switched.
    LanguageChanged(LanguageChangedPayload),
}

impl SessionEvent {
    /// Creates a `HintAdded` event.
    #[must_use]
    pub const fn hint_added(hint: Hint) -> Self {
        Self::HintAdded(HintAddedPayload { hint })
    }

    /// Creates an `ExecutionFinished` event.
    #[must_use]
    pub const fn execution_finished(result: ExecutionResult) -> Self {
        Self::ExecutionFinished(ExecutionFinishedPayload { result })
    }

    /// Creates a `ThemeChanged` event.
    #[must_use]
    pub const fn theme_changed(mode: ThemeMode) -> Self {
        Self::ThemeChanged(ThemeChangedPayload { mode })
    }

    /// Creates a `LanguageChanged` event.
    #[must_use]
    pub const fn language_changed(language: Language) -> Self {
        Self::LanguageChanged(LanguageChangedPayload { language })
    }

    /// Returns the event name as a string.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::HintPending => "hint_pending",
            Self::HintAdded(_) => "hint_added",
            Self::HintsCleared => "hints_cleared",
            Self::ExecutionPending => "execution_pending",
            Self::ExecutionFinished(_) => "execution_finished",
            Self::ThemeChanged(_) => "theme_changed",
            Self::LanguageChanged(_) => "language_changed",
        }
    }
}

// ============================================================================
// Event Broadcaster
// ============================================================================

/// Broadcasts session events to all subscribers.
///
/// Uses a tokio broadcast channel for pub-sub distribution. Events are not
/// persisted for late subscribers.
#[derive(Debug, Clone)]
pub struct EventBroadcaster {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBroadcaster {
    /// Creates a new `EventBroadcaster` with the specified buffer capacity.
    ///
    /// The buffer determines how many events can be queued per subscriber
    /// before old events are dropped.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Creates a new subscriber for receiving events.
    ///
    /// Each subscriber maintains its own buffer. A subscriber that falls
    /// behind receives a `Lagged` error and misses some events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Broadcasts an event to all subscribers.
    ///
    /// Returns the number of active receivers. A return value of 0 means
    /// nobody is listening, which is fine.
    pub fn send(&self, event: SessionEvent) -> usize {
        // send() returns Err only if there are no receivers, which is fine
        self.sender.send(event).unwrap_or(0)
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new(100)
    }
}

// ============================================================================
// Tests
// ============================================================================
