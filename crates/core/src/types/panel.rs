//! Side panel open/closed state.

use serde::{Deserialize, Serialize};

/// Visual state of a widget side panel and its backdrop.
///
/// Session-scoped: it is never persisted and starts `Closed` on every page
/// load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

impl PanelState {
    /// Flip between `Open` and `Closed`.
    pub const fn toggle(&mut self) {
        *self = match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        };
    }

    /// Whether the panel is showing.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// CSS modifier applied to the panel and backdrop.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Closed => "",
            Self::Open => "active",
        }
    }
}
