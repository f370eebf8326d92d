//! Grid model.
//!
//! `GridDescriptor` fixes the grid dimensions for the process lifetime and
//! owns the pure instance-index → cell-coordinate mapping. `CellPattern`
//! generates the host-side activation arrays uploaded once at startup.

mod descriptor;
mod pattern;

pub use descriptor::GridDescriptor;
pub use pattern::{Alternating, CellPattern, Stride};
