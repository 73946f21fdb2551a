//! Unit tests for error.rs
//!
//! Tests all Error variants, their trait implementations and the error macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("Buffer 7 not found".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid resource"));
    assert!(display.contains("Buffer 7 not found"));
}

#[test]
fn test_out_of_memory_display() {
    let err = Error::OutOfMemory;
    assert_eq!(format!("{}", err), "Out of host memory");
}

#[test]
fn test_out_of_range_display() {
    let err = Error::OutOfRange("head 16 >= 16".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Out of range"));
    assert!(display.contains("head 16"));
}

#[test]
fn test_invalid_state_display() {
    let err = Error::InvalidState("No vertex puller bound".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid state"));
    assert!(display.contains("No vertex puller bound"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::OutOfMemory;
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let debug = format!("{:?}", Error::OutOfRange("x".to_string()));
    assert!(debug.contains("OutOfRange"));

    let debug = format!("{:?}", Error::InvalidState("y".to_string()));
    assert!(debug.contains("InvalidState"));
}

#[test]
fn test_error_clone_and_eq() {
    let err1 = Error::InvalidResource("program".to_string());
    let err2 = err1.clone();
    assert_eq!(err1, err2);
    assert_ne!(err1, Error::OutOfMemory);
}

// ============================================================================
// MACRO TESTS
// ============================================================================

fn bail_invalid_resource() -> Result<()> {
    crate::gpu_bail!("softgpu::tests", "Buffer {} not found", 42);
}

fn bail_out_of_range() -> Result<()> {
    crate::gpu_bail!(OutOfRange, "softgpu::tests", "slot {} >= {}", 20, 16);
}

fn bail_invalid_state() -> Result<u32> {
    crate::gpu_bail!(InvalidState, "softgpu::tests", "nothing bound");
}

#[test]
fn test_gpu_bail_default_variant() {
    let err = bail_invalid_resource().unwrap_err();
    assert_eq!(err, Error::InvalidResource("Buffer 42 not found".to_string()));
}

#[test]
fn test_gpu_bail_out_of_range_variant() {
    let err = bail_out_of_range().unwrap_err();
    assert_eq!(err, Error::OutOfRange("slot 20 >= 16".to_string()));
}

#[test]
fn test_gpu_bail_invalid_state_variant() {
    let err = bail_invalid_state().unwrap_err();
    assert!(matches!(err, Error::InvalidState(_)));
}

#[test]
fn test_gpu_err_builds_without_returning() {
    let err = crate::gpu_err!("softgpu::tests", "missing {}", "thing");
    assert_eq!(format!("{}", err), "Invalid resource: missing thing");
}
