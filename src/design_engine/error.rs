//! Structural and input errors raised by the design engine

use thiserror::Error;

/// Errors raised synchronously at the call that introduced them.
///
/// Each variant carries enough context (label, field, depth) to fix the
/// input and resubmit. Non-fatal conditions are `DesignWarning`s instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DesignError {
    #[error("Invalid '{field}' for '{label}': {message}")]
    Validation {
        label: String,
        field: String,
        message: String,
    },

    #[error("Section already defined: {0}")]
    DuplicateSection(String),

    #[error("Section not found: {0}")]
    NotFound(String),

    #[error("No sections loaded: nothing to calculate")]
    EmptyString,

    #[error("Sections '{shallower}' and '{deeper}' share setting depth {depth:.1} ft")]
    Overlap {
        shallower: String,
        deeper: String,
        depth: f64,
    },

    #[error("Section '{inner}' OD {od:.3} in does not pass through '{outer}' drift {drift:.3} in")]
    Clearance {
        inner: String,
        outer: String,
        od: f64,
        drift: f64,
    },
}
