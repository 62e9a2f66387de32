//! Design report rendering
//!
//! Text and JSON views of a `WellBore`. Sections are always listed shallow
//! to deep, whatever traversal method produced the results.

use serde_json::{json, Map, Value};

use crate::config::ReportConfig;
use crate::design_engine::{DesignError, WellBore};
use crate::types::{Section, TraversalMethod};

const RULE_WIDTH: usize = 132;

fn fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

fn optional(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| fixed(v, decimals))
}

/// Summary table for every section, followed by any design warnings.
pub fn render_table(wellbore: &WellBore, report: &ReportConfig) -> String {
    let d = report.decimals;
    let cfg = wellbore.config();
    let mut out = String::new();

    out.push_str(&"═".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "Casing design: {} | method: {} | state: {} | sections: {}\n",
        cfg.name,
        cfg.method,
        wellbore.state(),
        wellbore.sections().len()
    ));
    if cfg.has_liner() {
        out.push_str(&format!("Top of liner: {} ft MD\n", fixed(cfg.tol, d)));
    }
    out.push_str(&"─".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "{:<14} {:<12} {:>7} {:>9} {:>9} {:>9} {:>9} {:>9} {:>7} {:>9} {:>7} {:>10} {:>7} {:>9}\n",
        "Section", "Type", "OD", "Top", "Shoe", "TOC", "MASP", "Burst", "DF", "Collapse", "DF",
        "T-air", "DF", "NP"
    ));

    for section in wellbore.sections().ordered(TraversalMethod::TopDown) {
        out.push_str(&table_row(section, d));
        out.push('\n');
    }
    out.push_str(&"─".repeat(RULE_WIDTH));
    out.push('\n');

    if report.show_warnings {
        let warnings: Vec<String> = wellbore
            .sections()
            .ordered(TraversalMethod::TopDown)
            .filter_map(|s| s.results().map(|r| (s.label(), r)))
            .flat_map(|(label, r)| r.warnings.iter().map(move |w| format!("  [{label}] {w}")))
            .collect();
        if warnings.is_empty() {
            out.push_str("No design warnings\n");
        } else {
            out.push_str(&format!("Design warnings ({}):\n", warnings.len()));
            for w in warnings {
                out.push_str(&w);
                out.push('\n');
            }
        }
    }
    out
}

fn table_row(section: &Section, d: usize) -> String {
    let s = section.inputs();
    let Some(r) = section.results() else {
        return format!(
            "{:<14} {:<12} {:>7.3} {:>9} {:>9}   (not calculated)",
            section.label(),
            s.casing_type,
            s.od,
            "-",
            fixed(s.bottom, d)
        );
    };
    format!(
        "{:<14} {:<12} {:>7.3} {:>9} {:>9} {:>9} {:>9} {:>9} {:>7} {:>9} {:>7} {:>10} {:>7} {:>9}",
        section.label(),
        s.casing_type,
        s.od,
        fixed(r.interval_top, d),
        fixed(s.bottom, d),
        fixed(r.toc, d),
        fixed(r.masp, d),
        fixed(r.burst_load, d),
        optional(r.burst_df, 2),
        fixed(r.collapse_load, d),
        optional(r.collapse_df, 2),
        fixed(r.tension_air, 0),
        optional(r.tension_df, 2),
        optional(r.neutral_point, d),
    )
}

/// Full detail for one section.
pub fn render_section(
    wellbore: &WellBore,
    label: &str,
    report: &ReportConfig,
) -> Result<String, DesignError> {
    let section = wellbore.section(label)?;
    let s = section.inputs();
    let d = report.decimals;
    let mut out = String::new();

    out.push_str(&format!("Section '{}' ({})\n", section.label(), s.casing_type));
    out.push_str(&format!(
        "  Casing:               {} in {} {} lb/ft {}\n",
        fixed(s.od, 3),
        s.grade,
        fixed(s.weight, d),
        s.connection
    ));
    out.push_str(&format!("  Shoe (MD / TVD):      {} / {} ft\n", fixed(s.bottom, d), fixed(s.tvd, d)));
    out.push_str(&format!("  Mud / backup:         {} / {} ppg\n", fixed(s.mud_weight, 2), fixed(s.backup_mud, 2)));

    let Some(r) = section.results() else {
        out.push_str("  Not calculated\n");
        return Ok(out);
    };
    out.push_str(&format!("  Interval top:         {} ft\n", fixed(r.interval_top, d)));
    out.push_str(&format!("  Annular capacity:     {} ft³/ft\n", fixed(r.annular_capacity, 4)));
    out.push_str(&format!("  Cement height:        {} ft\n", fixed(r.cement_height, d)));
    out.push_str(&format!("  Top of cement:        {} ft\n", fixed(r.toc, d)));
    out.push_str(&format!("  Frac init pressure:   {} psi\n", fixed(r.frac_init_pressure, d)));
    out.push_str(&format!("  MASP:                 {} psi\n", fixed(r.masp, d)));
    out.push_str(&format!(
        "  Burst load / DF:      {} psi / {}\n",
        fixed(r.burst_load, d),
        optional(r.burst_df, 2)
    ));
    out.push_str(&format!(
        "  Collapse load / DF:   {} psi / {} (rating {} psi)\n",
        fixed(r.collapse_load, d),
        optional(r.collapse_df, 2),
        fixed(r.collapse_strength, d)
    ));
    out.push_str(&format!(
        "  Tension air / buoyed: {} / {} lbf\n",
        fixed(r.tension_air, 0),
        fixed(r.tension_buoyed, 0)
    ));
    out.push_str(&format!("  Tension DF:           {}\n", optional(r.tension_df, 2)));
    out.push_str(&format!("  Neutral point:        {} ft\n", optional(r.neutral_point, d)));
    if report.show_warnings {
        for w in &r.warnings {
            out.push_str(&format!("  warning: {w}\n"));
        }
    }
    Ok(out)
}

/// Label → { inputs, results } plus the wellbore configuration.
pub fn to_json(wellbore: &WellBore) -> Value {
    let sections: Map<String, Value> = wellbore
        .sections()
        .iter()
        .map(|s| {
            (
                s.label().to_string(),
                json!({ "inputs": s.inputs(), "results": s.results() }),
            )
        })
        .collect();

    json!({
        "wellbore": wellbore.config(),
        "policy": wellbore.policy(),
        "state": wellbore.state(),
        "sections": sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WellBoreConfig;
    use crate::types::SectionInputs;

    fn inputs() -> SectionInputs {
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
            cement_cu_ft: 50_000.0,
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

    fn wellbore(calculate: bool) -> WellBore {
        let cfg = WellBoreConfig::new("Report-1", 0.0, 12_000.0, 12_000.0, 12_000.0);
        let mut wb = WellBore::new(cfg).unwrap();
        wb.add_section("production", inputs()).unwrap();
        if calculate {
            wb.calc_parameters_contained().unwrap();
        }
        wb
    }

    #[test]
    fn test_table_lists_sections_and_warnings() {
        let text = render_table(&wellbore(true), &ReportConfig::default());
        assert!(text.contains("Report-1"));
        assert!(text.contains("production"));
        assert!(text.contains("Design warnings"));
        assert!(text.contains("[production] cement needs"));
    }

    #[test]
    fn test_table_hides_warnings_when_disabled() {
        let report = ReportConfig {
            show_warnings: false,
            ..ReportConfig::default()
        };
        let text = render_table(&wellbore(true), &report);
        assert!(!text.contains("Design warnings"));
    }

    #[test]
    fn test_uncalculated_rows_are_marked() {
        let text = render_table(&wellbore(false), &ReportConfig::default());
        assert!(text.contains("not calculated"));
    }

    #[test]
    fn test_render_unknown_section_is_not_found() {
        let err = render_section(&wellbore(true), "liner", &ReportConfig::default()).unwrap_err();
        assert_eq!(err, DesignError::NotFound("liner".to_string()));
    }

    #[test]
    fn test_json_keys_sections_by_label() {
        let value = to_json(&wellbore(true));
        assert_eq!(value["state"], "calculated");
        assert_eq!(value["sections"]["production"]["inputs"]["od"], 9.625);
        assert!(value["sections"]["production"]["results"]["toc"].is_number());
    }
}
