//! Internal logging system for SoftGpu
//!
//! This module provides a small pluggable logging layer with:
//! - Customizable logger via Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default
//! - File and line information for ERROR logs

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this trait to redirect pipeline diagnostics (file logging, test capture, etc.)
///
/// # Example
///
/// ```no_run
/// use soft_gpu::softgpu::log::{Logger, LogEntry};
///
/// struct CaptureLogger;
///
/// impl Logger for CaptureLogger {
///     fn log(&self, entry: &LogEntry) {
///         eprintln!("{}", entry.message);
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "softgpu::Gpu", "softgpu::Rasterizer")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-triangle / per-vertex detail
    Trace,

    /// Per-draw-call summaries
    Debug,

    /// Important informational messages
    Info,

    /// Ignored calls (unknown ids, out-of-range slots, skipped draws)
    Warn,

    /// Internal errors with file:line details
    Error,
}

/// Default logger implementation using colored console output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let severity_str = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp,
                severity_str,
                source,
                entry.message,
                file,
                line
            );
        } else {
            println!(
                "[{}] [{}] [{}] {}",
                timestamp,
                severity_str,
                source,
                entry.message
            );
        }
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message (per-primitive detail)
///
/// # Example
///
/// ```ignore
/// gpu_trace!("softgpu::Clipper", "Triangle split into {} parts", count);
/// ```
#[macro_export]
macro_rules! gpu_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::softgpu::Engine::log(
            $crate::softgpu::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message (per-draw information)
///
/// # Example
///
/// ```ignore
/// gpu_debug!("softgpu::Gpu", "Drew {} triangles", count);
/// ```
#[macro_export]
macro_rules! gpu_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::softgpu::Engine::log(
            $crate::softgpu::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message
#[macro_export]
macro_rules! gpu_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::softgpu::Engine::log(
            $crate::softgpu::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message (ignored calls)
///
/// # Example
///
/// ```ignore
/// gpu_warn!("softgpu::Gpu", "Ignoring unknown buffer {}", id);
/// ```
#[macro_export]
macro_rules! gpu_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::softgpu::Engine::log(
            $crate::softgpu::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! gpu_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::softgpu::Engine::log_detailed(
            $crate::softgpu::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
