//! Tick scheduling.
//!
//! `TickScheduler` drives the render cadence: a fixed-interval two-state
//! machine polled by the event loop. Binding-set selection is the pure
//! `select_binding` function so it stays testable apart from the loop.

mod scheduler;

pub use scheduler::{Tick, TickScheduler, select_binding};
