//! Design Engine Module
//!
//! Deterministic casing string calculations. Everything here is pure
//! mechanics and hydrostatics over already-resolved depth data.
//!
//! ## Pipeline (per `WellBore::calc_parameters_contained`)
//! 1. Structural checks: at least one section, distinct shoes, clearance
//! 2. `tension::axial_profile()` - bottom-to-top pre-pass, method-invariant
//! 3. Walk sections in `TraversalMethod` order, for each:
//!    - `cement::place_cement()` - cement height and TOC
//!    - `pressure::evaluate()` - frac pressure, MASP, burst and collapse
//!    - `tension::evaluate()` - air/buoyed tension, neutral point
//! 4. Store results back into the registry

pub mod cement;
mod error;
pub mod pressure;
pub mod registry;
pub mod tension;
pub mod trajectory;
mod wellbore;

pub use error::DesignError;
pub use registry::{DepthBounds, OrderedSections, SectionRegistry, Step, Walk};
pub use trajectory::{StationTrajectory, Trajectory};
pub use wellbore::WellBore;

/// Rated strength over load. `None` when the load is not positive, which
/// means the section has no exposure to that load case.
pub fn design_factor(strength: f64, load: f64) -> Option<f64> {
    (load > 0.0).then(|| strength / load)
}
