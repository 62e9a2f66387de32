//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// Suspicious design-policy input that does not block loading.
///
/// `field` is the dotted TOML path; `suggestion` is the closest known key
/// when the field itself is unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.suggestion {
            Some(key) => write!(f, "{}: {}, did you mean '{key}'?", self.field, self.message),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `DesignConfig`.
///
/// Maintained by hand to match the struct hierarchy in well_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [policy]
        "policy",
        "policy.burst_design_margin",
        "policy.backup_profile",
        "policy.cement_density_ppg",
        "policy.biaxial_collapse",
        "policy.steel_density_ppg",
        "policy.depth_tolerance_ft",
        // [report]
        "report",
        "report.decimals",
        "report.show_warnings",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Dotted paths of every key in the tree, tables before their children.
fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the alphabetically first key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, levenshtein(unknown, k)))
        .filter(|&(_, dist)| dist <= 3)
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| {
            let suggestion = suggest_correction(&key, &known);
            ValidationWarning {
                message: "unknown key, ignored".to_string(),
                field: key,
                suggestion,
            }
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Range checks on the engineering policy alone.
///
/// Errors are `(field, message)` pairs naming the offending policy field.
pub fn validate_policy_ranges(
    p: &super::DesignPolicy,
) -> (Vec<(&'static str, String)>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Burst margin is a divisor and must not inflate the rating
    if !(p.burst_design_margin >= 1.0) {
        errors.push((
            "burst_design_margin",
            format!("{:.3} must be >= 1.0", p.burst_design_margin),
        ));
    } else if p.burst_design_margin > 2.0 {
        warnings.push(ValidationWarning {
            field: "policy.burst_design_margin".to_string(),
            message: format!(
                "{:.2} is outside typical range (1.0-2.0)",
                p.burst_design_margin
            ),
            suggestion: None,
        });
    }

    // Steel density: used as a divisor in the buoyancy factor
    if !(p.steel_density_ppg > 0.0) {
        errors.push((
            "steel_density_ppg",
            format!("{:.2} must be > 0 (used as divisor)", p.steel_density_ppg),
        ));
    } else if (p.steel_density_ppg - 65.4).abs() > 5.0 {
        warnings.push(ValidationWarning {
            field: "policy.steel_density_ppg".to_string(),
            message: format!(
                "{:.1} differs from carbon steel (65.4 ppg)",
                p.steel_density_ppg
            ),
            suggestion: None,
        });
    }

    // Cement slurries: 8-25 ppg covers foamed to heavyweight systems
    if !(8.0..=25.0).contains(&p.cement_density_ppg) {
        errors.push((
            "cement_density_ppg",
            format!("{:.1} is outside physical range (8-25 ppg)", p.cement_density_ppg),
        ));
    }

    if !(p.depth_tolerance_ft >= 0.0) {
        errors.push((
            "depth_tolerance_ft",
            format!("{:.3} cannot be negative", p.depth_tolerance_ft),
        ));
    }

    (errors, warnings)
}

/// Validate physical ranges on a parsed `DesignConfig`.
///
/// Returns (errors, warnings). Errors are impossible values that must
/// prevent a design pass; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(
    config: &super::DesignConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let (policy_errors, mut warnings) = validate_policy_ranges(&config.policy);
    let errors: Vec<String> = policy_errors
        .into_iter()
        .map(|(field, message)| format!("policy.{field} = {message}"))
        .collect();

    if config.report.decimals > 6 {
        warnings.push(ValidationWarning {
            field: "report.decimals".to_string(),
            message: format!(
                "{} exceeds the precision of the inputs",
                config.report.decimals
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
