//! GPU rendering subsystem.
//!
//! `GridRenderer` owns its pipeline and buffers and records one clearing
//! instanced draw per tick. Cell geometry lives in normalized cell-local
//! space; the vertex shader places each instance into its grid slot.

mod ctx;
mod error;
mod grid;

pub use ctx::{RenderCtx, RenderTarget};
pub use error::RenderError;
pub use grid::GridRenderer;
