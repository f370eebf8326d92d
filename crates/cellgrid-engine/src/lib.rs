//! Cellgrid engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the viewer binary:
//! device/surface setup, the grid model, the instanced cell renderer,
//! tick scheduling, and the window event loop.

pub mod device;
pub mod grid;
pub mod render;
pub mod time;

pub mod core;
pub mod window;

pub mod logging;
