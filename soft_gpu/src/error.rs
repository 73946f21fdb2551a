//! Error types for the SoftGpu pipeline
//!
//! Every fallible internal operation returns `Result<T>`. The public `Gpu`
//! boundary turns these errors into silent sentinels after logging them.

use std::fmt;

/// Result type for SoftGpu operations
pub type Result<T> = std::result::Result<T, Error>;

/// SoftGpu errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Unknown buffer, vertex puller or program id
    InvalidResource(String),

    /// Host allocation failed
    OutOfMemory,

    /// Slot index or byte range outside the allowed range
    OutOfRange(String),

    /// Pipeline not ready (nothing bound, shaders missing, no framebuffer)
    InvalidState(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::OutOfMemory => write!(f, "Out of host memory"),
            Error::OutOfRange(msg) => write!(f, "Out of range: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an `Error` and log it at ERROR severity with file:line.
///
/// The variant defaults to `InvalidResource`; pass a variant path first to pick another one.
///
/// # Example
///
/// ```ignore
/// let err = gpu_err!("softgpu::Buffer", "Buffer {} not found", 3);
/// let err = gpu_err!(OutOfRange, "softgpu::Buffer", "Read past end of buffer");
/// ```
#[macro_export]
macro_rules! gpu_err {
    (OutOfRange, $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::gpu_error!($source, "{}", message);
        $crate::softgpu::Error::OutOfRange(message)
    }};
    (InvalidState, $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::gpu_error!($source, "{}", message);
        $crate::softgpu::Error::InvalidState(message)
    }};
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::gpu_error!($source, "{}", message);
        $crate::softgpu::Error::InvalidResource(message)
    }};
}

/// Log and return an `Error` from the current function.
///
/// Accepts the same forms as `gpu_err!`.
#[macro_export]
macro_rules! gpu_bail {
    ($($arg:tt)*) => {
        return Err($crate::gpu_err!($($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
