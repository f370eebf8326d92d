use thiserror::Error;

/// Construction-time renderer failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// A state array's length does not equal the grid's cell count.
    ///
    /// This is a programmer error caught before any buffer is uploaded or
    /// any draw is recorded.
    #[error("state buffer holds {actual} cells, grid needs {expected}")]
    BufferLengthMismatch { expected: usize, actual: usize },
}
