//! Core state types: TraversalMethod, DesignState

use serde::{Deserialize, Serialize};

// ============================================================================
// Traversal Method
// ============================================================================

/// Order in which the design pass visits casing sections.
///
/// Only the pressure calculator cares: it reads the external environment of
/// the section processed immediately before the current one. Cement
/// placement and axial loads are geometric and do not depend on the method.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TraversalMethod {
    /// Shallowest shoe first; the reference neighbor is the shallower string.
    TopDown,
    /// Deepest shoe first; the reference neighbor is the deeper string.
    #[default]
    BottomUp,
}

impl TraversalMethod {
    /// Short code used in logs and config files
    pub fn as_str(&self) -> &'static str {
        match self {
            TraversalMethod::TopDown => "top_down",
            TraversalMethod::BottomUp => "bottom_up",
        }
    }
}

impl std::fmt::Display for TraversalMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TraversalMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "top_down" => Ok(TraversalMethod::TopDown),
            "bottom_up" => Ok(TraversalMethod::BottomUp),
            other => Err(format!(
                "unknown traversal method '{other}' (expected 'top_down' or 'bottom_up')"
            )),
        }
    }
}

// ============================================================================
// Design Lifecycle
// ============================================================================

/// Lifecycle of a wellbore design.
///
/// `Configured` → `SectionsLoading` (any number of additions) → `Calculated`.
/// Adding a section after a calculation drops back to `SectionsLoading`
/// until the next pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DesignState {
    #[default]
    Configured,
    SectionsLoading,
    Calculated,
}

impl std::fmt::Display for DesignState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DesignState::Configured => write!(f, "Configured"),
            DesignState::SectionsLoading => write!(f, "Sections Loading"),
            DesignState::Calculated => write!(f, "Calculated"),
        }
    }
}
