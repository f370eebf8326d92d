use thiserror::Error;

/// Terminal initialization failures.
///
/// None of these are retried: each aborts startup and is surfaced to the
/// caller immediately.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// No adapter is capable of driving the window surface.
    #[error("no suitable GPU adapter found")]
    UnsupportedHardware(#[source] wgpu::RequestAdapterError),

    /// An adapter exists but a logical device could not be created from it.
    #[error("failed to create logical device")]
    DeviceCreationFailed(#[source] wgpu::RequestDeviceError),

    /// The surface could not be bound or configured with a supported format.
    #[error("surface configuration failed: {reason}")]
    SurfaceConfigError { reason: String },
}
