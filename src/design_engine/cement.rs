//! Cement column geometry
//!
//! Converts a placed slurry volume into a column height in the annulus
//! around a section and locates the top of cement (TOC).
//!
//! Formula: height = V / capacity, capacity = (D² − d²) / 183.35 ft³/ft
//!
//! Where:
//! - V = placed cement volume (ft³)
//! - D = enclosing diameter (in): open hole after washout, or the drift of
//!   the outer string when the hole leaves no annulus
//! - d = casing OD (in)

use crate::config::defaults::ANNULAR_CAPACITY_DIVISOR;
use crate::types::{DesignWarning, SectionInputs};

/// Cement column for one section.
#[derive(Debug, Clone, PartialEq)]
pub struct CementPlacement {
    /// Shallowest depth the column may reach (ft)
    pub interval_top: f64,
    pub outer_diameter: f64,
    /// ft³/ft
    pub annular_capacity: f64,
    pub cement_height: f64,
    pub toc: f64,
    pub warnings: Vec<DesignWarning>,
}

/// Annular capacity between two diameters (ft³/ft). Never negative.
pub fn annular_capacity(outer_diameter: f64, od: f64) -> f64 {
    ((outer_diameter * outer_diameter - od * od) / ANNULAR_CAPACITY_DIVISOR).max(0.0)
}

/// Diameter enclosing the section's annulus.
///
/// The washed-out open hole, unless that is not larger than the casing; then
/// the drift of the string it runs inside, when there is one.
pub fn enclosing_diameter(section: &SectionInputs, outer: Option<&SectionInputs>) -> f64 {
    let hole = section.effective_hole_diameter();
    match outer {
        Some(o) if hole <= section.od => o.csg_internal_diameter,
        _ => hole,
    }
}

/// Place `section.cement_cu_ft` in the annulus below `interval_top`.
///
/// `outer` is the next-larger (shallower) string. The column is clamped to
/// the interval; an overfill is reported, never extended past the shoe above.
pub fn place_cement(
    section: &SectionInputs,
    outer: Option<&SectionInputs>,
    interval_top: f64,
) -> CementPlacement {
    let outer_diameter = enclosing_diameter(section, outer);
    let capacity = annular_capacity(outer_diameter, section.od);
    let available = (section.bottom - interval_top).max(0.0);
    let mut warnings = Vec::new();

    let cement_height = if capacity <= 0.0 {
        warnings.push(DesignWarning::NoAnnularClearance {
            outer_diameter_in: outer_diameter,
            od_in: section.od,
        });
        0.0
    } else if section.cement_cu_ft <= 0.0 {
        0.0
    } else {
        let required = section.cement_cu_ft / capacity;
        if required > available {
            warnings.push(DesignWarning::CementOverfill {
                required_height_ft: required,
                available_interval_ft: available,
            });
            available
        } else {
            required
        }
    };

    CementPlacement {
        interval_top,
        outer_diameter,
        annular_capacity: capacity,
        cement_height,
        toc: section.bottom - cement_height,
        warnings,
    }
}

/// Placed volume of a lead + tail slurry job (ft³).
pub fn slurry_volume(lead_qty: f64, lead_yield: f64, tail_qty: f64, tail_yield: f64) -> f64 {
    lead_qty * lead_yield + tail_qty * tail_yield
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(cement_cu_ft: f64) -> SectionInputs {
        SectionInputs {
            id: 1,
            casing_type: "production".to_string(),
            od: 9.625,
            wall_thickness: 0.395,
            csg_internal_diameter: 8.835,
            connection: "LTC".to_string(),
            grade: "N-80".to_string(),
            weight: 40.0,
            coeff_friction_sliding: 0.39,
            hole_size: 12.25,
            bottom: 10_000.0,
            tvd: 10_000.0,
            washout: 0.0,
            cement_cu_ft,
            mud_weight: 9.5,
            backup_mud: 8.6,
            int_gradient: 0.1,
            frac_gradient: None,
            body_yield: 916_000.0,
            burst_strength: 5_750.0,
            collapse_pressure: 3_090.0,
            tension_strength: 737_000.0,
        }
    }

    #[test]
    fn test_capacity_matches_field_formula() {
        // (12.25² - 9.625²) / 183.35 = 0.3132 ft³/ft
        let cap = annular_capacity(12.25, 9.625);
        assert!((cap - 0.313_18).abs() < 1e-4, "got {cap}");
    }

    #[test]
    fn test_partial_fill_conserves_volume() {
        let s = section(1_000.0);
        let placed = place_cement(&s, None, 2_000.0);
        let expected = 1_000.0 / annular_capacity(12.25, 9.625);
        assert_eq!(placed.cement_height, expected);
        assert_eq!(placed.toc, s.bottom - placed.cement_height);
        assert!(placed.warnings.is_empty());
    }

    #[test]
    fn test_zero_cement_means_toc_at_shoe() {
        let s = section(0.0);
        let placed = place_cement(&s, None, 2_000.0);
        assert_eq!(placed.cement_height, 0.0);
        assert_eq!(placed.toc, s.bottom);
        assert!(placed.warnings.is_empty());
    }

    #[test]
    fn test_overfill_clamps_at_shallower_shoe() {
        let s = section(50_000.0);
        let placed = place_cement(&s, None, 2_000.0);
        assert_eq!(placed.cement_height, 8_000.0);
        assert_eq!(placed.toc, 2_000.0);
        assert!(matches!(
            placed.warnings[0],
            DesignWarning::CementOverfill { available_interval_ft, .. } if available_interval_ft == 8_000.0
        ));
    }

    #[test]
    fn test_washout_enlarges_annulus() {
        let mut s = section(1_000.0);
        let gauge = place_cement(&s, None, 0.0).cement_height;
        s.washout = 0.2;
        let washed = place_cement(&s, None, 0.0).cement_height;
        assert!(washed < gauge);
    }

    #[test]
    fn test_no_open_hole_uses_outer_drift() {
        let mut s = section(100.0);
        s.hole_size = 9.0;
        let mut outer = section(0.0);
        outer.csg_internal_diameter = 12.347;
        let placed = place_cement(&s, Some(&outer), 0.0);
        assert_eq!(placed.outer_diameter, 12.347);
        assert!(placed.cement_height > 0.0);
    }

    #[test]
    fn test_no_clearance_warns() {
        let mut s = section(100.0);
        s.hole_size = 9.0;
        let placed = place_cement(&s, None, 0.0);
        assert_eq!(placed.cement_height, 0.0);
        assert_eq!(placed.toc, s.bottom);
        assert!(matches!(placed.warnings[0], DesignWarning::NoAnnularClearance { .. }));
    }

    #[test]
    fn test_slurry_volume_sums_lead_and_tail() {
        assert_eq!(slurry_volume(400.0, 1.8, 200.0, 1.15), 400.0 * 1.8 + 200.0 * 1.15);
    }
}
