/// Shader program
///
/// A program pairs a vertex shader with a fragment shader, owns the uniform
/// bank both read, and lists the output attribute types the rasterizer
/// interpolates between them.

use std::fmt;
use std::sync::Arc;
use crate::error::Result;
use crate::gpu_bail;
use crate::shader::{
    AttributeType, Uniform, Uniforms,
    VertexShader, FragmentShader,
    MAX_ATTRIBUTES,
};

pub struct Program {
    vertex_shader: Option<Arc<dyn VertexShader>>,
    fragment_shader: Option<Arc<dyn FragmentShader>>,
    uniforms: Uniforms,
    output_types: [AttributeType; MAX_ATTRIBUTES],
}

impl Program {
    /// Create a program with no shaders, empty uniforms and empty output types
    pub fn new() -> Self {
        Self {
            vertex_shader: None,
            fragment_shader: None,
            uniforms: Uniforms::new(),
            output_types: [AttributeType::Empty; MAX_ATTRIBUTES],
        }
    }

    // ===== SHADERS =====

    /// Attach both shaders, replacing any previous pair
    pub fn attach_shaders(
        &mut self,
        vertex_shader: Arc<dyn VertexShader>,
        fragment_shader: Arc<dyn FragmentShader>,
    ) {
        self.vertex_shader = Some(vertex_shader);
        self.fragment_shader = Some(fragment_shader);
    }

    pub fn vertex_shader(&self) -> Option<&Arc<dyn VertexShader>> {
        self.vertex_shader.as_ref()
    }

    pub fn fragment_shader(&self) -> Option<&Arc<dyn FragmentShader>> {
        self.fragment_shader.as_ref()
    }

    /// Whether both shaders are attached
    pub fn has_shaders(&self) -> bool {
        self.vertex_shader.is_some() && self.fragment_shader.is_some()
    }

    // ===== UNIFORMS =====

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    /// Write one uniform slot
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `slot >= MAX_UNIFORMS`.
    pub fn set_uniform(&mut self, slot: u32, value: Uniform) -> Result<()> {
        self.uniforms.set(slot, value)
    }

    // ===== OUTPUT ATTRIBUTES =====

    /// Select the interpolated type of output attribute `slot`
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `slot >= MAX_ATTRIBUTES`.
    pub fn set_output_attribute_type(&mut self, slot: u32, attribute_type: AttributeType) -> Result<()> {
        match self.output_types.get_mut(slot as usize) {
            Some(entry) => {
                *entry = attribute_type;
                Ok(())
            }
            None => gpu_bail!(OutOfRange, "softgpu::Program",
                "Output attribute {} out of range (max {})", slot, MAX_ATTRIBUTES),
        }
    }

    /// Interpolated type of output attribute `slot` (None if out of range)
    pub fn output_attribute_type(&self, slot: u32) -> Option<AttributeType> {
        self.output_types.get(slot as usize).copied()
    }

    pub fn output_attribute_types(&self) -> &[AttributeType; MAX_ATTRIBUTES] {
        &self.output_types
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("vertex_shader", &self.vertex_shader.is_some())
            .field("fragment_shader", &self.fragment_shader.is_some())
            .field("uniforms", &self.uniforms)
            .field("output_types", &self.output_types)
            .finish()
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
