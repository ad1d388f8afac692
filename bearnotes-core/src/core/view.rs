//! Editor display mode and sidebar layout metrics.

use serde::{Deserialize, Serialize};

/// How the editor pane is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Edit,
    Split,
    Preview,
}

impl EditorMode {
    /// Next mode in the cycle edit → split → preview → edit.
    #[must_use]
    pub fn advance(self) -> Self {
        match self {
            Self::Edit => Self::Split,
            Self::Split => Self::Preview,
            Self::Preview => Self::Edit,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Split => "split",
            Self::Preview => "preview",
        }
    }
}

/// Inclusive range the sidebar width is held to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarBounds {
    pub min: f64,
    pub max: f64,
}

impl SidebarBounds {
    /// Builds bounds, swapping the ends if they were given in the wrong order.
    /// A non-finite end falls back to the default bounds.
    pub fn new(min: f64, max: f64) -> Self {
        if !min.is_finite() || !max.is_finite() {
            log::warn!("ignoring non-finite sidebar bounds {min}..{max}");
            Self::default()
        } else if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Clamps `width` into the range. Non-finite widths yield `None`.
    pub fn clamp(&self, width: f64) -> Option<f64> {
        width.is_finite().then(|| width.max(self.min).min(self.max))
    }
}

impl Default for SidebarBounds {
    fn default() -> Self {
        Self { min: 200.0, max: 500.0 }
    }
}
