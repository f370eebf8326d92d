//! Logging utilities.
//!
//! Centralizes logger initialization. The render loop itself stays quiet;
//! logging covers startup, terminal errors, and skipped frames.

mod init;

pub use init::{LoggingConfig, init_logging};
