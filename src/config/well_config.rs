//! Wellbore configuration and design policy
//!
//! `WellBoreConfig` describes one analysis run (depth window, traversal
//! method, top of liner, default fracture gradient). `DesignConfig` carries
//! the engineering policy knobs that are not part of the well itself and is
//! loaded from TOML. Each struct implements `Default` with the values the
//! calculators were calibrated against.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::design_engine::DesignError;
use crate::types::TraversalMethod;

// ============================================================================
// Wellbore Configuration
// ============================================================================

/// One analysis run: depth window, ordering policy and liner boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellBoreConfig {
    /// Well / wellbore identifier
    #[serde(default = "default_wellbore_name")]
    pub name: String,

    /// Shallowest reference depth (MD, ft)
    #[serde(default)]
    pub top: f64,

    /// Deepest reference depth (MD, ft)
    pub bottom: f64,

    /// Section traversal order for the design pass
    #[serde(default)]
    pub method: TraversalMethod,

    /// Top of liner (MD, ft). At or above `top` means no liner boundary.
    #[serde(default)]
    pub tol: f64,

    pub max_md_depth: f64,

    pub max_tvd_depth: f64,

    /// Formation fracture gradient (psi/ft), overridable per section
    #[serde(default = "default_frac_gradient")]
    pub frac_gradient: f64,
}

fn default_wellbore_name() -> String {
    "Unnamed Wellbore".to_string()
}

fn default_frac_gradient() -> f64 {
    defaults::FRAC_GRADIENT_PSI_FT
}

impl WellBoreConfig {
    /// Build a config with the remaining fields at their defaults
    pub fn new(
        name: impl Into<String>,
        top: f64,
        bottom: f64,
        max_md_depth: f64,
        max_tvd_depth: f64,
    ) -> Self {
        Self {
            name: name.into(),
            top,
            bottom,
            method: TraversalMethod::default(),
            tol: 0.0,
            max_md_depth,
            max_tvd_depth,
            frac_gradient: defaults::FRAC_GRADIENT_PSI_FT,
        }
    }

    pub fn with_method(mut self, method: TraversalMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_frac_gradient(mut self, frac_gradient: f64) -> Self {
        self.frac_gradient = frac_gradient;
        self
    }

    /// True when `tol` marks a liner top inside the depth window
    pub fn has_liner(&self) -> bool {
        self.tol > self.top
    }

    /// Check the depth window and liner boundary for internal consistency.
    ///
    /// Rules:
    /// - every depth is finite
    /// - `top >= 0` and `top < bottom <= max_md_depth`
    /// - `max_tvd_depth > 0`
    /// - `tol` is unused (`<= top`) or lies within `[top, bottom]`
    /// - `frac_gradient > 0`
    pub fn validate(&self) -> Result<(), DesignError> {
        let fields = [
            ("top", self.top),
            ("bottom", self.bottom),
            ("tol", self.tol),
            ("max_md_depth", self.max_md_depth),
            ("max_tvd_depth", self.max_tvd_depth),
            ("frac_gradient", self.frac_gradient),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(self.invalid(field, format!("{value} is not a finite number")));
            }
        }

        if self.top < 0.0 {
            return Err(self.invalid("top", format!("{:.1} ft cannot be negative", self.top)));
        }
        if self.bottom <= self.top {
            return Err(self.invalid(
                "bottom",
                format!(
                    "{:.1} ft must be deeper than top ({:.1} ft)",
                    self.bottom, self.top
                ),
            ));
        }
        if self.bottom > self.max_md_depth {
            return Err(self.invalid(
                "bottom",
                format!(
                    "{:.1} ft exceeds max_md_depth ({:.1} ft)",
                    self.bottom, self.max_md_depth
                ),
            ));
        }
        if self.max_tvd_depth <= 0.0 {
            return Err(self.invalid(
                "max_tvd_depth",
                format!("{:.1} ft must be positive", self.max_tvd_depth),
            ));
        }
        if self.tol < 0.0 {
            return Err(self.invalid("tol", format!("{:.1} ft cannot be negative", self.tol)));
        }
        if self.has_liner() && self.tol > self.bottom {
            return Err(self.invalid(
                "tol",
                format!(
                    "top of liner {:.1} ft lies outside [{:.1}, {:.1}] ft",
                    self.tol, self.top, self.bottom
                ),
            ));
        }
        if self.frac_gradient <= 0.0 {
            return Err(self.invalid(
                "frac_gradient",
                format!("{:.3} psi/ft must be positive", self.frac_gradient),
            ));
        }
        Ok(())
    }

    fn invalid(&self, field: &str, message: String) -> DesignError {
        DesignError::Validation {
            label: self.name.clone(),
            field: field.to_string(),
            message,
        }
    }
}

// ============================================================================
// Design Policy
// ============================================================================

/// External pressure profile assumed between surface, TOC and the shoe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BackupProfile {
    /// Single fluid column from surface to shoe using the section's own
    /// fluids. Never consults a neighbor.
    Uniform,
    /// Reference neighbor's fluid above TOC, own mud (burst backup) or
    /// cement (collapse external) below TOC.
    #[default]
    Staged,
}

/// Engineering policy applied by the calculators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignPolicy {
    /// Divisor applied to a string's burst rating when it caps MASP
    #[serde(default = "default_burst_design_margin")]
    pub burst_design_margin: f64,

    #[serde(default)]
    pub backup_profile: BackupProfile,

    /// Cement slurry density used below TOC in the staged collapse profile
    #[serde(default = "default_cement_density_ppg")]
    pub cement_density_ppg: f64,

    /// Reduce collapse ratings under the axial load hanging below the shoe
    #[serde(default = "default_true")]
    pub biaxial_collapse: bool,

    #[serde(default = "default_steel_density_ppg")]
    pub steel_density_ppg: f64,

    /// Two shoes closer than this are treated as the same setting depth
    #[serde(default = "default_depth_tolerance_ft")]
    pub depth_tolerance_ft: f64,
}

fn default_burst_design_margin() -> f64 {
    defaults::BURST_DESIGN_MARGIN
}
fn default_cement_density_ppg() -> f64 {
    defaults::CEMENT_DENSITY_PPG
}
fn default_true() -> bool {
    true
}
fn default_steel_density_ppg() -> f64 {
    defaults::STEEL_DENSITY_PPG
}
fn default_depth_tolerance_ft() -> f64 {
    defaults::DEPTH_TOLERANCE_FT
}

impl Default for DesignPolicy {
    fn default() -> Self {
        Self {
            burst_design_margin: defaults::BURST_DESIGN_MARGIN,
            backup_profile: BackupProfile::default(),
            cement_density_ppg: defaults::CEMENT_DENSITY_PPG,
            biaxial_collapse: true,
            steel_density_ppg: defaults::STEEL_DENSITY_PPG,
            depth_tolerance_ft: defaults::DEPTH_TOLERANCE_FT,
        }
    }
}

impl DesignPolicy {
    /// Reject impossible policy values before they reach the calculators.
    /// Suspicious but usable values are logged.
    pub fn validate(&self) -> Result<(), DesignError> {
        let (errors, warnings) = super::validation::validate_policy_ranges(self);
        for w in &warnings {
            warn!(field = %w.field, "{}", w);
        }
        match errors.into_iter().next() {
            None => Ok(()),
            Some((field, message)) => Err(DesignError::Validation {
                label: "policy".to_string(),
                field: field.to_string(),
                message,
            }),
        }
    }
}

/// Text report formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_decimals")]
    pub decimals: usize,

    #[serde(default = "default_true")]
    pub show_warnings: bool,
}

fn default_report_decimals() -> usize {
    defaults::REPORT_DECIMALS
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            decimals: defaults::REPORT_DECIMALS,
            show_warnings: true,
        }
    }
}

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root policy configuration.
///
/// Load with `DesignConfig::load()` which searches:
/// 1. `$CASING_CONFIG` env var
/// 2. `./casing_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignConfig {
    #[serde(default)]
    pub policy: DesignPolicy,

    #[serde(default)]
    pub report: ReportConfig,
}

impl DesignConfig {
    /// Load configuration using the standard search order:
    /// 1. `$CASING_CONFIG` environment variable
    /// 2. `./casing_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded design policy from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load design policy, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        let local = PathBuf::from(defaults::CONFIG_FILE_NAME);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded design policy from ./{}", defaults::CONFIG_FILE_NAME);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::CONFIG_FILE_NAME);
                }
            }
        }

        info!("No {} found - using built-in design policy", defaults::CONFIG_FILE_NAME);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate a TOML document. Unknown keys are logged, not fatal.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!(field = %w.field, "{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate policy values. Suspicious values are logged; impossible ones
    /// are returned as errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_physical_ranges(self);
        for w in &warnings {
            warn!(field = %w.field, "{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn wellbore() -> WellBoreConfig {
        WellBoreConfig::new("TEST-1", 0.0, 10_000.0, 10_000.0, 9_800.0)
    }

    #[test]
    fn test_valid_wellbore_passes() {
        assert!(wellbore().validate().is_ok());
        assert!(wellbore().with_tol(8_000.0).validate().is_ok());
    }

    #[test]
    fn test_bottom_above_top_rejected() {
        let mut cfg = wellbore();
        cfg.top = 12_000.0;
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, DesignError::Validation { ref field, .. } if field == "bottom"));
    }

    #[test]
    fn test_bottom_beyond_max_md_rejected() {
        let mut cfg = wellbore();
        cfg.max_md_depth = 9_000.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_tol_outside_window_rejected() {
        let err = wellbore().with_tol(12_000.0).validate().unwrap_err();
        assert!(matches!(err, DesignError::Validation { ref field, .. } if field == "tol"));
    }

    #[test]
    fn test_tol_at_top_means_no_liner() {
        let mut cfg = wellbore();
        cfg.top = 500.0;
        cfg.tol = 500.0;
        assert!(!cfg.has_liner());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_nan_depth_rejected() {
        let mut cfg = wellbore();
        cfg.max_tvd_depth = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_policy_parses_backup_profile() {
        let config = DesignConfig::from_toml_str(
            r#"
[policy]
backup_profile = "uniform"
burst_design_margin = 1.25
"#,
        )
        .unwrap();
        assert_eq!(config.policy.backup_profile, BackupProfile::Uniform);
        assert_eq!(config.policy.burst_design_margin, 1.25);
        assert_eq!(config.report, ReportConfig::default());
    }

    #[test]
    fn test_policy_round_trips_through_toml() {
        let config = DesignConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(DesignConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("casing_config.toml");
        std::fs::write(&path, "[policy\nbroken").unwrap();
        let err = DesignConfig::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("casing_config.toml"));
    }
}
