//! Code Mentor Session Core
//!
//! Holds the editing session state, mediates the hint and execution flows
//! against the remote mentor service, and derives theme and starter-code
//! state.

pub mod backend;
pub mod config;
pub mod error;
pub mod event;
pub mod flow;
pub mod sanitize;
pub mod session;
pub mod state;
pub mod theme;

pub use backend::MentorBackend;
pub use config::Config;
pub use error::{Result, SessionError};
pub use event::{EventBroadcaster, SessionEvent};
pub use flow::Flow;
pub use sanitize::{sanitize, sanitize_with_limit, MAX_HINT_LEN};
pub use session::{Session, FALLBACK_HINT};
pub use state::{starter_snippet, Hint, SessionState, WELCOME_SNIPPET};
pub use theme::{Palette, Theme, ThemeMode};
