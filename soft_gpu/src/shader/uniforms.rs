/// Program uniform bank
///
/// A fixed array of `MAX_UNIFORMS` slots. Each slot holds whatever was
/// written last; writing a different type simply replaces the value.

use glam::{Mat4, Vec2, Vec3, Vec4};
use crate::error::Result;
use crate::gpu_bail;
use super::MAX_UNIFORMS;

/// One uniform value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Uniform {
    #[default]
    Empty,
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

impl Uniform {
    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Uniform::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        match *self {
            Uniform::Vec2(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match *self {
            Uniform::Vec3(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec4(&self) -> Option<Vec4> {
        match *self {
            Uniform::Vec4(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_mat4(&self) -> Option<Mat4> {
        match *self {
            Uniform::Mat4(m) => Some(m),
            _ => None,
        }
    }
}

/// Uniform bank of one program
#[derive(Debug, Clone, PartialEq)]
pub struct Uniforms {
    slots: [Uniform; MAX_UNIFORMS],
}

impl Uniforms {
    /// Create a bank with every slot empty
    pub fn new() -> Self {
        Self {
            slots: [Uniform::Empty; MAX_UNIFORMS],
        }
    }

    /// Write a slot
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `slot >= MAX_UNIFORMS`; the bank is left untouched.
    pub fn set(&mut self, slot: u32, value: Uniform) -> Result<()> {
        match self.slots.get_mut(slot as usize) {
            Some(entry) => {
                *entry = value;
                Ok(())
            }
            None => gpu_bail!(OutOfRange, "softgpu::Uniforms",
                "Uniform slot {} out of range (max {})", slot, MAX_UNIFORMS),
        }
    }

    /// Read a slot (None if out of range)
    pub fn get(&self, slot: u32) -> Option<&Uniform> {
        self.slots.get(slot as usize)
    }

    // ===== TYPED READS =====

    pub fn float(&self, slot: u32) -> Option<f32> {
        self.get(slot).and_then(Uniform::as_f32)
    }

    pub fn vec2(&self, slot: u32) -> Option<Vec2> {
        self.get(slot).and_then(Uniform::as_vec2)
    }

    pub fn vec3(&self, slot: u32) -> Option<Vec3> {
        self.get(slot).and_then(Uniform::as_vec3)
    }

    pub fn vec4(&self, slot: u32) -> Option<Vec4> {
        self.get(slot).and_then(Uniform::as_vec4)
    }

    pub fn mat4(&self, slot: u32) -> Option<Mat4> {
        self.get(slot).and_then(Uniform::as_mat4)
    }
}

impl Default for Uniforms {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "uniforms_tests.rs"]
mod tests;
