//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - binding the window Surface and configuring it once at startup
//! - acquiring frames and submitting recorded commands
//!
//! All initialization failures here are terminal; no fallback adapters are
//! tried and no reconfiguration happens after startup.

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::DeviceError;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
