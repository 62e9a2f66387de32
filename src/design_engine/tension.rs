//! Axial loads, buoyancy and neutral point
//!
//! What hangs below a section is a property of the string geometry, so the
//! axial profile is always built bottom-to-top regardless of the traversal
//! method used by the pressure pass.
//!
//! Two views are kept:
//! - Buoyancy-factor view: air weight × (1 − MW / ρ_steel), used for
//!   `tension_buoyed` and the tension design factor.
//! - Pressure-area view: true axial force, starting in compression at the
//!   deepest shoe (hydrostatic end load) and gaining air weight moving up.
//!   Its zero crossing is the neutral point.

use super::design_factor;
use crate::config::defaults::PPG_TO_PSI_PER_FT;
use crate::types::{DesignWarning, SectionInputs};

/// Axial state of one section, from the bottom-to-top pre-pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxialLoads {
    pub interval_top: f64,
    /// Air weight of this section alone (lbf)
    pub section_weight: f64,
    /// Air weight of every deeper section (lbf)
    pub weight_below: f64,
    /// Pressure-area axial force just above the shoe (lbf, + tension)
    pub axial_bottom: f64,
    /// Pressure-area axial force at the section top (lbf, + tension)
    pub axial_top: f64,
}

/// Tension results for one section.
#[derive(Debug, Clone, PartialEq)]
pub struct TensionResults {
    pub neutral_point: Option<f64>,
    pub tension_air: f64,
    pub tension_buoyed: f64,
    pub tension_df: Option<f64>,
    pub warnings: Vec<DesignWarning>,
}

/// Buoyancy factor for pipe immersed in `mud_weight` fluid.
pub fn buoyancy_factor(mud_weight: f64, steel_density_ppg: f64) -> f64 {
    1.0 - mud_weight / steel_density_ppg
}

/// Steel cross-section implied by nominal weight (in²).
///
/// w [lb/ft] = ρ [ppg] × A [in²] × 12/231, the same factor as the ppg to
/// psi/ft conversion.
pub fn displaced_area(weight: f64, steel_density_ppg: f64) -> f64 {
    weight / (steel_density_ppg * PPG_TO_PSI_PER_FT)
}

/// Build the axial profile for a string.
///
/// `stack` is ordered shallow to deep and `interval_tops[i]` is the top of
/// `stack[i]`. Output is aligned with `stack`.
pub fn axial_profile(
    stack: &[&SectionInputs],
    interval_tops: &[f64],
    steel_density_ppg: f64,
) -> Vec<AxialLoads> {
    let mut loads = vec![
        AxialLoads {
            interval_top: 0.0,
            section_weight: 0.0,
            weight_below: 0.0,
            axial_bottom: 0.0,
            axial_top: 0.0,
        };
        stack.len()
    ];

    let mut weight_below = 0.0;
    let mut axial = 0.0;
    let mut area_below = 0.0;

    for (i, s) in stack.iter().enumerate().rev() {
        let interval_top = interval_tops[i];
        let area = displaced_area(s.weight, steel_density_ppg);
        let shoe_pressure = PPG_TO_PSI_PER_FT * s.mud_weight * s.tvd;

        // Downward-facing shoulder (or the open end) is pushed up
        let axial_bottom = axial - shoe_pressure * (area - area_below);
        let section_weight = s.weight * (s.bottom - interval_top);
        let axial_top = axial_bottom + section_weight;

        loads[i] = AxialLoads {
            interval_top,
            section_weight,
            weight_below,
            axial_bottom,
            axial_top,
        };

        weight_below += section_weight;
        axial = axial_top;
        area_below = area;
    }

    loads
}

/// Buoyed load hanging below the section's shoe (lbf).
pub fn buoyed_weight_below(section: &SectionInputs, loads: &AxialLoads, steel_density_ppg: f64) -> f64 {
    loads.weight_below * buoyancy_factor(section.mud_weight, steel_density_ppg)
}

/// Depth where the pressure-area axial force crosses zero inside the
/// section, interpolated linearly along its length.
pub fn neutral_point(section: &SectionInputs, loads: &AxialLoads) -> Option<f64> {
    let crosses = loads.axial_bottom <= 0.0 && loads.axial_top >= 0.0;
    if !crosses || loads.section_weight <= 0.0 {
        return None;
    }
    let height_above_shoe = -loads.axial_bottom / section.weight;
    Some(section.bottom - height_above_shoe)
}

/// Tension at the top of the section and its design factor.
pub fn evaluate(section: &SectionInputs, loads: &AxialLoads, steel_density_ppg: f64) -> TensionResults {
    let mut warnings = Vec::new();

    let tension_air = loads.weight_below + loads.section_weight;
    let tension_buoyed = tension_air * buoyancy_factor(section.mud_weight, steel_density_ppg);

    let neutral_point = neutral_point(section, loads);
    if neutral_point.is_none() {
        warnings.push(DesignWarning::NeutralPointOutsideSection {
            axial_bottom_lbf: loads.axial_bottom,
            axial_top_lbf: loads.axial_top,
        });
    }

    let worst = tension_air.max(tension_buoyed);
    let tension_df = design_factor(section.tension_strength, worst);
    if tension_df.is_none() {
        warnings.push(DesignWarning::NoTensionExposure { tension_lbf: worst });
    }

    TensionResults {
        neutral_point,
        tension_air,
        tension_buoyed,
        tension_df,
        warnings,
    }
}
