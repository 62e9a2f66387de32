//! Casing Design: multi-section casing string design engine
//!
//! Computes burst and collapse loads and design factors, air and buoyed
//! tension, neutral point, cement placement and top of cement, MASP and
//! formation fracture initiation pressure for every string in a wellbore.
//!
//! ## Architecture
//!
//! - **Config**: wellbore configuration, design policy (TOML), design files
//! - **Types**: section inputs/results, traversal method, design warnings
//! - **Design Engine**: section registry, ordered traversal, calculators
//! - **Report**: text table and JSON views of a calculated design

pub mod config;
pub mod design_engine;
pub mod report;
pub mod types;

// Re-export configuration
pub use config::{
    BackupProfile, ConfigError, DesignConfig, DesignPolicy, ReportConfig, WellBoreConfig,
};
pub use config::design_file::WellDesign;

// Re-export engine entry points
pub use design_engine::{
    DesignError, SectionRegistry, StationTrajectory, Trajectory, WellBore,
};

// Re-export commonly used types
pub use types::{
    DesignState, DesignWarning, Section, SectionInputs, SectionResults, TraversalMethod,
};
