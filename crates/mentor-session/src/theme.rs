//! Editor theme modes and their color palettes.
//!
//! The palette is derived state: it is a pure function of the mode, never
//! stored alongside it, so the two cannot drift apart.

use serde::{Deserialize, Serialize};

/// The two supported display modes. Dark is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Dark background, light text (default).
    #[default]
    Dark,
    /// Light background, dark text.
    Light,
}

impl ThemeMode {
    /// Returns the opposite mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Returns the color palette for this mode.
    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette::DARK,
            Self::Light => Palette::LIGHT,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Dark => "dark",
            Self::Light => "light",
        };
        write!(f, "{s}")
    }
}

/// A complete set of display colors, as `#rrggbb` hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// Primary brand color.
    pub primary: &'static str,
    /// Secondary brand color.
    pub secondary: &'static str,
    /// Window background.
    pub background: &'static str,
    /// Panel and card surfaces.
    pub surface: &'static str,
    /// Body text.
    pub text: &'static str,
    /// Accent for success and highlights.
    pub accent: &'static str,
}

impl Palette {
    /// Palette used in dark mode.
    pub const DARK: Self = Self {
        primary: "#6366f1",
        secondary: "#8b5cf6",
        background: "#0f172a",
        surface: "#1e293b",
        text: "#f1f5f9",
        accent: "#10b981",
    };

    /// Palette used in light mode.
    pub const LIGHT: Self = Self {
        primary: "#6366f1",
        secondary: "#8b5cf6",
        background: "#ffffff",
        surface: "#f8fafc",
        text: "#0f172a",
        accent: "#10b981",
    };
}

/// A display mode together with its colors.
///
/// `colors` is always `mode.palette()`; the only way to change either is
/// [`Theme::toggle`], which swaps both atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// The active mode.
    pub mode: ThemeMode,
    /// The colors for that mode.
    pub colors: Palette,
}

impl Theme {
    /// Creates a theme in the given mode.
    #[must_use]
    pub const fn new(mode: ThemeMode) -> Self {
        Self {
            mode,
            colors: mode.palette(),
        }
    }

    /// Creates the default dark theme.
    #[must_use]
    pub const fn dark() -> Self {
        Self::new(ThemeMode::Dark)
    }

    /// Switches to the opposite mode, swapping the whole palette.
    pub fn toggle(&mut self) {
        *self = Self::new(self.mode.toggled());
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

// ============================================================================
// Tests
// ============================================================================
