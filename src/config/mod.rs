//! Design Configuration Module
//!
//! Engineering policy for the design pass, loaded from TOML so operators can
//! tune margins and report formatting without touching code.
//!
//! ## Loading Order
//!
//! 1. `CASING_CONFIG` environment variable (path to TOML file)
//! 2. `casing_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! Well data itself (wellbore, survey, sections) lives in a separate design
//! file, see [`design_file`].

mod well_config;
pub mod defaults;
pub mod design_file;
pub mod validation;

pub use well_config::*;
