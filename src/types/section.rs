//! Casing section record: raw inputs plus the results of the last design pass

use serde::{Deserialize, Serialize};

use super::DesignWarning;
use crate::config::defaults;

// ============================================================================
// Raw Inputs
// ============================================================================

/// Caller-supplied data for one casing interval.
///
/// Units: inches for diameters, feet for depths, lb/ft for `weight`, ppg for
/// mud weights, psi/ft for gradients, psi for pressure ratings and lbf for
/// `body_yield` / `tension_strength`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionInputs {
    /// Ordinal supplied by the caller (catalogue row, run order)
    #[serde(default)]
    pub id: u32,
    /// Casing label (conductor, surface, intermediate, production, liner)
    pub casing_type: String,

    // --- Identity / geometry ---
    pub od: f64,
    pub wall_thickness: f64,
    pub csg_internal_diameter: f64,
    #[serde(default)]
    pub connection: String,
    #[serde(default)]
    pub grade: String,
    /// Nominal linear weight (lb/ft)
    pub weight: f64,
    #[serde(default = "default_coeff_friction_sliding")]
    pub coeff_friction_sliding: f64,
    pub hole_size: f64,

    // --- Placement ---
    /// Setting depth (MD, ft)
    pub bottom: f64,
    /// True vertical depth at the shoe (ft)
    pub tvd: f64,
    /// Fractional hole enlargement (0.15 = 15 % over gauge)
    #[serde(default)]
    pub washout: f64,
    /// Placed cement volume (ft³)
    #[serde(default)]
    pub cement_cu_ft: f64,

    // --- Fluid / pressure environment ---
    pub mud_weight: f64,
    pub backup_mud: f64,
    /// Internal fluid gradient used for burst (psi/ft)
    pub int_gradient: f64,
    /// Per-section fracture gradient override (psi/ft)
    #[serde(default)]
    pub frac_gradient: Option<f64>,

    // --- Ratings ---
    pub body_yield: f64,
    pub burst_strength: f64,
    pub collapse_pressure: f64,
    pub tension_strength: f64,
}

fn default_coeff_friction_sliding() -> f64 {
    defaults::COEFF_FRICTION_SLIDING
}

impl SectionInputs {
    /// Numeric fields a raw record must carry
    pub const REQUIRED_NUMERIC_FIELDS: &'static [&'static str] = &[
        "od",
        "wall_thickness",
        "csg_internal_diameter",
        "weight",
        "hole_size",
        "bottom",
        "tvd",
        "mud_weight",
        "backup_mud",
        "int_gradient",
        "body_yield",
        "burst_strength",
        "collapse_pressure",
        "tension_strength",
    ];

    /// Numeric fields a raw record may carry
    pub const OPTIONAL_NUMERIC_FIELDS: &'static [&'static str] = &[
        "id",
        "coeff_friction_sliding",
        "washout",
        "cement_cu_ft",
        "frac_gradient",
    ];

    /// Text fields a raw record must carry
    pub const REQUIRED_TEXT_FIELDS: &'static [&'static str] = &["casing_type"];

    /// Fracture gradient for this section, falling back to the wellbore default
    pub fn effective_frac_gradient(&self, wellbore_default: f64) -> f64 {
        self.frac_gradient.unwrap_or(wellbore_default)
    }

    /// Open-hole diameter after washout (in)
    pub fn effective_hole_diameter(&self) -> f64 {
        self.hole_size * (1.0 + self.washout)
    }
}

// ============================================================================
// Results
// ============================================================================

/// Values written by the design pass. Never supplied by the caller.
///
/// Design factors are `None` when the corresponding load is not positive;
/// the matching warning explains why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionResults {
    // --- Geometry & cement ---
    /// Shallowest depth of this section's interval (ft)
    pub interval_top: f64,
    /// Annular capacity used for cement placement (ft³/ft)
    pub annular_capacity: f64,
    pub cement_height: f64,
    pub toc: f64,

    // --- Pressure ---
    pub frac_init_pressure: f64,
    pub masp: f64,
    pub burst_load: f64,
    pub burst_df: Option<f64>,
    /// Collapse rating after the axial-load reduction (psi)
    pub collapse_strength: f64,
    pub collapse_load: f64,
    pub collapse_df: Option<f64>,

    // --- Tension ---
    pub neutral_point: Option<f64>,
    pub tension_air: f64,
    pub tension_buoyed: f64,
    pub tension_df: Option<f64>,

    #[serde(default)]
    pub warnings: Vec<DesignWarning>,
}

// ============================================================================
// Section
// ============================================================================

/// One labelled casing interval in a wellbore design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    label: String,
    inputs: SectionInputs,
    results: Option<SectionResults>,
}

impl Section {
    pub(crate) fn new(label: String, inputs: SectionInputs) -> Self {
        Self {
            label,
            inputs,
            results: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn inputs(&self) -> &SectionInputs {
        &self.inputs
    }

    /// Results of the last design pass, if one has run since this section
    /// was added.
    pub fn results(&self) -> Option<&SectionResults> {
        self.results.as_ref()
    }

    pub fn is_calculated(&self) -> bool {
        self.results.is_some()
    }

    /// Setting depth (MD, ft)
    pub fn bottom(&self) -> f64 {
        self.inputs.bottom
    }

    pub(crate) fn set_results(&mut self, results: SectionResults) {
        self.results = Some(results);
    }
}
