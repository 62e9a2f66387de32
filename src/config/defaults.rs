//! System-wide default constants.
//!
//! Centralises the unit conversions and engineering defaults used by the
//! casing design calculators. Grouped by concern for easy discovery.

// ============================================================================
// Unit Conversions
// ============================================================================

/// Hydrostatic gradient of 1 ppg fluid (psi/ft).
///
/// `12 / 231`: one foot of a one-square-inch column holds 12/231 gallons.
pub const PPG_TO_PSI_PER_FT: f64 = 0.051_948_06;

/// Annular capacity divisor: `(D² - d²) / 183.35` gives ft³/ft for
/// diameters in inches.
pub const ANNULAR_CAPACITY_DIVISOR: f64 = 183.35;

// ============================================================================
// Material Properties
// ============================================================================

/// Density of steel (ppg), used for the buoyancy factor.
pub const STEEL_DENSITY_PPG: f64 = 65.4;

/// Typical neat Class G/H slurry density (ppg).
pub const CEMENT_DENSITY_PPG: f64 = 15.8;

// ============================================================================
// Section Defaults
// ============================================================================

/// Sliding friction coefficient assumed when a section does not supply one.
pub const COEFF_FRICTION_SLIDING: f64 = 0.39;

/// Default formation fracture gradient (psi/ft) for a wellbore.
pub const FRAC_GRADIENT_PSI_FT: f64 = 1.0;

// ============================================================================
// Design Policy
// ============================================================================

/// Burst design margin applied to a string's rating when it caps MASP.
pub const BURST_DESIGN_MARGIN: f64 = 1.1;

/// Minimum separation between two setting depths before they are treated
/// as the same shoe (ft).
pub const DEPTH_TOLERANCE_FT: f64 = 0.01;

// ============================================================================
// Reporting
// ============================================================================

/// Decimal places used by the text report.
pub const REPORT_DECIMALS: usize = 1;

// ============================================================================
// Config Search
// ============================================================================

/// Environment variable pointing at a design policy TOML file.
pub const CONFIG_ENV_VAR: &str = "CASING_CONFIG";

/// Policy file looked up in the working directory when the env var is unset.
pub const CONFIG_FILE_NAME: &str = "casing_config.toml";
