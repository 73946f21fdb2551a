use super::*;
use crate::error::Error;

// ============================================================================
// Slot write/read tests
// ============================================================================

#[test]
fn test_new_bank_is_empty() {
    let uniforms = Uniforms::new();
    for slot in 0..MAX_UNIFORMS as u32 {
        assert_eq!(uniforms.get(slot), Some(&Uniform::Empty));
    }
}

#[test]
fn test_set_and_typed_read() {
    let mut uniforms = Uniforms::new();
    uniforms.set(0, Uniform::Float(0.5)).unwrap();
    uniforms.set(1, Uniform::Vec3(Vec3::new(1.0, 2.0, 3.0))).unwrap();
    uniforms.set(2, Uniform::Mat4(Mat4::IDENTITY)).unwrap();

    assert_eq!(uniforms.float(0), Some(0.5));
    assert_eq!(uniforms.vec3(1), Some(Vec3::new(1.0, 2.0, 3.0)));
    assert_eq!(uniforms.mat4(2), Some(Mat4::IDENTITY));
}

#[test]
fn test_typed_read_of_other_type_is_none() {
    let mut uniforms = Uniforms::new();
    uniforms.set(3, Uniform::Vec2(Vec2::ONE)).unwrap();
    assert_eq!(uniforms.vec4(3), None);
    assert_eq!(uniforms.float(3), None);
}

#[test]
fn test_last_write_wins_across_types() {
    let mut uniforms = Uniforms::new();
    uniforms.set(4, Uniform::Mat4(Mat4::IDENTITY)).unwrap();
    uniforms.set(4, Uniform::Vec4(Vec4::new(1.0, 0.0, 0.0, 1.0))).unwrap();

    assert_eq!(uniforms.mat4(4), None);
    assert_eq!(uniforms.vec4(4), Some(Vec4::new(1.0, 0.0, 0.0, 1.0)));
}

// ============================================================================
// Range tests
// ============================================================================

#[test]
fn test_out_of_range_slot_is_rejected() {
    let mut uniforms = Uniforms::new();
    let before = uniforms.clone();

    let err = uniforms.set(MAX_UNIFORMS as u32, Uniform::Float(1.0)).unwrap_err();
    assert!(matches!(err, Error::OutOfRange(_)));
    assert_eq!(uniforms, before);
    assert_eq!(uniforms.get(MAX_UNIFORMS as u32), None);
}
