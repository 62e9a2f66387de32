//! Config Validation Tests
//!
//! Typo detection and physical range validation for the design policy TOML,
//! exercised independently from the design engine.

use std::io::Write;

use casing_design::config::validation::{
    known_config_keys, suggest_correction, validate_physical_ranges, validate_unknown_keys,
};
use casing_design::{BackupProfile, ConfigError, DesignConfig};

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_policy_key_warns_with_suggestion() {
    let toml_str = r#"
[policy]
burst_desing_margin = 1.25
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("burst_desing_margin"));
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("policy.burst_design_margin")
    );
}

#[test]
fn typo_in_report_section_warns() {
    let toml_str = r#"
[report]
decimal = 2
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].suggestion.as_deref(), Some("report.decimals"));
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[policy]
burst_design_margin = 1.25
backup_profile = "uniform"
cement_density_ppg = 16.4
biaxial_collapse = false
steel_density_ppg = 65.4
depth_tolerance_ft = 0.5

[report]
decimals = 2
show_warnings = false
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(
        warnings.is_empty(),
        "Valid config should produce 0 warnings, got: {:?}",
        warnings.iter().map(|w| &w.field).collect::<Vec<_>>()
    );

    let config = DesignConfig::from_toml_str(toml_str).unwrap();
    assert_eq!(config.policy.backup_profile, BackupProfile::Uniform);
    assert!(!config.policy.biaxial_collapse);
    assert_eq!(config.report.decimals, 2);
}

#[test]
fn unknown_section_warns() {
    let toml_str = r#"
[torque_drag]
friction = 0.25
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(warnings.iter().any(|w| w.field.contains("torque_drag")));
}

#[test]
fn unknown_keys_do_not_block_loading() {
    let toml_str = r#"
[policy]
cement_densty_ppg = 16.0
"#;
    let config = DesignConfig::from_toml_str(toml_str).unwrap();
    assert_eq!(config, DesignConfig::default());
}

#[test]
fn empty_toml_produces_zero_warnings() {
    assert!(validate_unknown_keys("").is_empty());
}

#[test]
fn known_keys_set_is_complete() {
    let toml_str = DesignConfig::default().to_toml().unwrap();
    let warnings = validate_unknown_keys(&toml_str);
    assert!(
        warnings.is_empty(),
        "Default config serialization should produce 0 unknown-key warnings, got: {:?}",
        warnings.iter().map(|w| &w.field).collect::<Vec<_>>()
    );
}

#[test]
fn suggest_correction_returns_none_for_garbage() {
    let known = known_config_keys();
    assert!(suggest_correction("zzz_completely_invalid_xyz_12345", &known).is_none());
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn defaults_pass_range_validation() {
    let (errors, warnings) = validate_physical_ranges(&DesignConfig::default());
    assert!(errors.is_empty(), "{errors:?}");
    assert!(warnings.is_empty());
}

#[test]
fn burst_margin_below_one_is_error() {
    let mut config = DesignConfig::default();
    config.policy.burst_design_margin = 0.9;
    let (errors, _) = validate_physical_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("burst_design_margin")));
}

#[test]
fn large_burst_margin_is_warning_only() {
    let mut config = DesignConfig::default();
    config.policy.burst_design_margin = 2.5;
    let (errors, warnings) = validate_physical_ranges(&config);
    assert!(errors.is_empty());
    assert!(warnings.iter().any(|w| w.field == "policy.burst_design_margin"));
}

#[test]
fn zero_steel_density_is_error() {
    let mut config = DesignConfig::default();
    config.policy.steel_density_ppg = 0.0;
    let (errors, _) = validate_physical_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("steel_density_ppg")));
}

#[test]
fn light_cement_is_error() {
    let mut config = DesignConfig::default();
    config.policy.cement_density_ppg = 4.0;
    let (errors, _) = validate_physical_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("cement_density_ppg")));
}

#[test]
fn out_of_range_file_is_rejected_with_all_errors() {
    let toml_str = r#"
[policy]
burst_design_margin = 0.5
cement_density_ppg = 40.0
"#;
    match DesignConfig::from_toml_str(toml_str) {
        Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2, "{errors:?}"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn config_file_round_trips() {
    let mut config = DesignConfig::default();
    config.policy.backup_profile = BackupProfile::Uniform;
    config.report.decimals = 3;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(config.to_toml().unwrap().as_bytes()).unwrap();
    let loaded = DesignConfig::load_from_file(file.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn malformed_file_reports_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[policy\nburst_design_margin = ").unwrap();
    let err = DesignConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(..)));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}
