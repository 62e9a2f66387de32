//! Shared data structures for casing string design
//!
//! - `SectionInputs` / `SectionResults` / `Section`: one casing interval
//! - `DesignWarning`: non-fatal conditions recorded next to results
//! - `TraversalMethod` / `DesignState`: pass ordering and lifecycle

mod section;
mod state;
mod warnings;

pub use section::*;
pub use state::*;
pub use warnings::*;
