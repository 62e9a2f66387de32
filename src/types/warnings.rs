//! Non-fatal design conditions attached to a section's results

use serde::{Deserialize, Serialize};

/// A condition worth reporting that does not stop the design pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DesignWarning {
    /// Placed cement would rise above the shallower shoe; height was clamped.
    CementOverfill {
        required_height_ft: f64,
        available_interval_ft: f64,
    },
    /// The enclosing diameter does not exceed the casing OD, so no annulus
    /// exists to hold cement.
    NoAnnularClearance { outer_diameter_in: f64, od_in: f64 },
    /// Internal pressure never exceeds the backup at the shoe.
    NoBurstExposure { burst_load_psi: f64 },
    /// External pressure never exceeds the internal backup at the shoe.
    NoCollapseExposure { collapse_load_psi: f64 },
    /// Nothing hangs from the top of the section.
    NoTensionExposure { tension_lbf: f64 },
    /// Axial load keeps one sign over the whole section.
    NeutralPointOutsideSection {
        axial_bottom_lbf: f64,
        axial_top_lbf: f64,
    },
}

impl DesignWarning {
    /// Short code for logs and tables
    pub fn code(&self) -> &'static str {
        match self {
            DesignWarning::CementOverfill { .. } => "CMT_OVERFILL",
            DesignWarning::NoAnnularClearance { .. } => "NO_ANNULUS",
            DesignWarning::NoBurstExposure { .. } => "NO_BURST",
            DesignWarning::NoCollapseExposure { .. } => "NO_COLLAPSE",
            DesignWarning::NoTensionExposure { .. } => "NO_TENSION",
            DesignWarning::NeutralPointOutsideSection { .. } => "NP_OUTSIDE",
        }
    }
}

impl std::fmt::Display for DesignWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DesignWarning::CementOverfill {
                required_height_ft,
                available_interval_ft,
            } => write!(
                f,
                "cement needs {required_height_ft:.1} ft but only {available_interval_ft:.1} ft is available; clamped at the shallower shoe"
            ),
            DesignWarning::NoAnnularClearance {
                outer_diameter_in,
                od_in,
            } => write!(
                f,
                "enclosing diameter {outer_diameter_in:.3} in leaves no annulus around {od_in:.3} in casing; no cement credited"
            ),
            DesignWarning::NoBurstExposure { burst_load_psi } => {
                write!(f, "no burst exposure (load {burst_load_psi:.1} psi)")
            }
            DesignWarning::NoCollapseExposure { collapse_load_psi } => {
                write!(f, "no collapse exposure (load {collapse_load_psi:.1} psi)")
            }
            DesignWarning::NoTensionExposure { tension_lbf } => {
                write!(f, "no tension exposure (load {tension_lbf:.0} lbf)")
            }
            DesignWarning::NeutralPointOutsideSection {
                axial_bottom_lbf,
                axial_top_lbf,
            } => write!(
                f,
                "neutral point outside section (axial {axial_bottom_lbf:.0} lbf at bottom, {axial_top_lbf:.0} lbf at top)"
            ),
        }
    }
}
