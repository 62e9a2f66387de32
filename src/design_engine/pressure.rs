//! Burst, collapse, MASP and fracture initiation pressure
//!
//! All loads are evaluated at the section's shoe. Hydrostatic columns use
//! `P = 0.05194806 × MW × TVD`.
//!
//! Which fluids sit in the annulus above TOC depends on the reference
//! neighbor, the section processed just before this one. With
//! `TraversalMethod::TopDown` that is the shallower string, with `BottomUp`
//! the deeper one. `BackupProfile::Uniform` ignores the neighbor entirely.

use super::design_factor;
use super::trajectory::Trajectory;
use crate::config::defaults::PPG_TO_PSI_PER_FT;
use crate::config::{BackupProfile, DesignPolicy, WellBoreConfig};
use crate::types::{DesignWarning, SectionInputs};

// ============================================================================
// Context
// ============================================================================

/// Well-level inputs shared by every section in a pass.
pub struct PressureContext<'a> {
    pub wellbore: &'a WellBoreConfig,
    pub policy: &'a DesignPolicy,
    pub trajectory: &'a dyn Trajectory,
}

/// Fluid environment of an already-processed neighbor.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborEnvironment {
    pub label: String,
    pub mud_weight: f64,
    pub backup_mud: f64,
}

impl NeighborEnvironment {
    pub fn from_section(label: &str, inputs: &SectionInputs) -> Self {
        Self {
            label: label.to_string(),
            mud_weight: inputs.mud_weight,
            backup_mud: inputs.backup_mud,
        }
    }
}

/// Pressure results for one section.
#[derive(Debug, Clone, PartialEq)]
pub struct PressureResults {
    pub frac_init_pressure: f64,
    pub masp: f64,
    pub burst_load: f64,
    pub burst_df: Option<f64>,
    pub collapse_strength: f64,
    pub collapse_load: f64,
    pub collapse_df: Option<f64>,
    pub warnings: Vec<DesignWarning>,
}

// ============================================================================
// Building Blocks
// ============================================================================

/// Hydrostatic pressure of a fluid column (psi).
pub fn hydrostatic(mud_weight: f64, tvd: f64) -> f64 {
    PPG_TO_PSI_PER_FT * mud_weight * tvd
}

/// Pressure at the bottom of a two-fluid column: `upper_ppg` from surface to
/// `toc_tvd`, `lower_ppg` from there to `shoe_tvd`.
pub fn staged_column(upper_ppg: f64, lower_ppg: f64, toc_tvd: f64, shoe_tvd: f64) -> f64 {
    let toc_tvd = toc_tvd.clamp(0.0, shoe_tvd);
    hydrostatic(upper_ppg, toc_tvd) + hydrostatic(lower_ppg, shoe_tvd - toc_tvd)
}

/// Formation fracture initiation pressure (psi).
pub fn frac_init_pressure(frac_gradient: f64, tvd: f64) -> f64 {
    frac_gradient * tvd
}

/// Surface pressure that would just initiate a fracture at `ref_tvd` under
/// a `mud_weight` column. Never negative.
pub fn frac_limited_surface_pressure(frac_gradient: f64, mud_weight: f64, ref_tvd: f64) -> f64 {
    (frac_init_pressure(frac_gradient, ref_tvd) - hydrostatic(mud_weight, ref_tvd)).max(0.0)
}

/// Surface pressure that fractures the weakest exposed formation.
///
/// The fracture limit is taken at the top of liner when one is configured,
/// otherwise at the section's own shoe. Independent of the section's own
/// burst rating.
pub fn burst_surface_pressure(section: &SectionInputs, ctx: &PressureContext<'_>) -> f64 {
    let wb = ctx.wellbore;
    let frac_gradient = section.effective_frac_gradient(wb.frac_gradient);

    let ref_tvd = if wb.has_liner() {
        ctx.trajectory.tvd_at(wb.tol)
    } else {
        section.tvd
    };
    frac_limited_surface_pressure(frac_gradient, section.mud_weight, ref_tvd)
}

/// Maximum anticipated surface pressure for a section.
///
/// The fracture limit from [`burst_surface_pressure`], capped by the derated
/// burst rating for sections whose shoe is at or below the top of liner.
/// Shallower sections keep the fracture limit.
pub fn masp(section: &SectionInputs, ctx: &PressureContext<'_>) -> f64 {
    let wb = ctx.wellbore;
    let frac_limit = burst_surface_pressure(section, ctx);

    if wb.has_liner() && section.bottom >= wb.tol {
        frac_limit.min(section.burst_strength / ctx.policy.burst_design_margin)
    } else {
        frac_limit
    }
}

/// Burst load at the shoe: surface pressure plus the internal gradient,
/// less the external backup column.
pub fn burst_load(
    section: &SectionInputs,
    surface_pressure: f64,
    toc_tvd: f64,
    reference: Option<&NeighborEnvironment>,
    profile: BackupProfile,
) -> f64 {
    let internal = surface_pressure + section.int_gradient * section.tvd;
    let backup = match profile {
        BackupProfile::Uniform => hydrostatic(section.backup_mud, section.tvd),
        BackupProfile::Staged => {
            let upper = reference.map_or(section.backup_mud, |n| n.backup_mud);
            staged_column(upper, section.mud_weight, toc_tvd, section.tvd)
        }
    };
    internal - backup
}

/// Collapse load at the shoe: external column less the internal backup
/// column of a partially evacuated string.
pub fn collapse_load(
    section: &SectionInputs,
    toc_tvd: f64,
    reference: Option<&NeighborEnvironment>,
    policy: &DesignPolicy,
) -> f64 {
    let external = match policy.backup_profile {
        BackupProfile::Uniform => hydrostatic(section.mud_weight, section.tvd),
        BackupProfile::Staged => {
            let upper = reference.map_or(section.mud_weight, |n| n.mud_weight);
            staged_column(upper, policy.cement_density_ppg, toc_tvd, section.tvd)
        }
    };
    external - hydrostatic(section.backup_mud, section.tvd)
}

/// Collapse rating reduced for axial tension (API 5C3 ellipse).
///
/// `factor = sqrt(1 − 0.75 r²) − 0.5 r` with `r = axial / body_yield`.
/// Compression and zero load leave the rating untouched.
pub fn biaxial_collapse_strength(collapse_rating: f64, body_yield: f64, axial_load: f64) -> f64 {
    if axial_load <= 0.0 || body_yield <= 0.0 {
        return collapse_rating;
    }
    let r = (axial_load / body_yield).min(1.0);
    let factor = (1.0 - 0.75 * r * r).sqrt() - 0.5 * r;
    collapse_rating * factor.max(0.0)
}

// ============================================================================
// Entry Point
// ============================================================================

/// Evaluate every pressure quantity for one section.
///
/// `toc` is the measured depth from the cement calculator and
/// `axial_below` the buoyed load hanging below the shoe.
pub fn evaluate(
    section: &SectionInputs,
    toc: f64,
    axial_below: f64,
    reference: Option<&NeighborEnvironment>,
    ctx: &PressureContext<'_>,
) -> PressureResults {
    let mut warnings = Vec::new();
    let policy = ctx.policy;
    let toc_tvd = ctx.trajectory.tvd_at(toc);

    let frac_gradient = section.effective_frac_gradient(ctx.wellbore.frac_gradient);
    let frac_init_pressure = frac_init_pressure(frac_gradient, section.tvd);
    let masp = masp(section, ctx);

    // The rating cap bounds the reported MASP only; the load stays rating-free
    let surface_pressure = burst_surface_pressure(section, ctx);
    let burst_load = burst_load(
        section,
        surface_pressure,
        toc_tvd,
        reference,
        policy.backup_profile,
    );
    let burst_df = design_factor(section.burst_strength, burst_load);
    if burst_df.is_none() {
        warnings.push(DesignWarning::NoBurstExposure {
            burst_load_psi: burst_load,
        });
    }

    let collapse_strength = if policy.biaxial_collapse {
        biaxial_collapse_strength(section.collapse_pressure, section.body_yield, axial_below)
    } else {
        section.collapse_pressure
    };
    let collapse_load = collapse_load(section, toc_tvd, reference, policy);
    let collapse_df = design_factor(collapse_strength, collapse_load);
    if collapse_df.is_none() {
        warnings.push(DesignWarning::NoCollapseExposure {
            collapse_load_psi: collapse_load,
        });
    }

    PressureResults {
        frac_init_pressure,
        masp,
        burst_load,
        burst_df,
        collapse_strength,
        collapse_load,
        collapse_df,
        warnings,
    }
}
