/// Shader stage records and shader callable traits

use glam::Vec4;
use super::{Attribute, Uniforms, MAX_ATTRIBUTES};

// ===== VERTEX RECORDS =====

/// Vertex shader input, built by the vertex puller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InVertex {
    /// Resolved vertex index (after index-buffer indirection)
    pub vertex_id: u32,
    /// Attributes read by the enabled puller heads
    pub attributes: [Attribute; MAX_ATTRIBUTES],
}

impl InVertex {
    pub fn new(vertex_id: u32) -> Self {
        Self {
            vertex_id,
            attributes: [Attribute::Empty; MAX_ATTRIBUTES],
        }
    }
}

/// Vertex shader output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutVertex {
    /// Clip-space position
    pub position: Vec4,
    /// Attributes forwarded to the rasterizer
    pub attributes: [Attribute; MAX_ATTRIBUTES],
}

impl OutVertex {
    pub fn new(position: Vec4) -> Self {
        Self {
            position,
            attributes: [Attribute::Empty; MAX_ATTRIBUTES],
        }
    }

    /// Linear interpolation of position and every attribute slot
    pub fn lerp(&self, other: &OutVertex, t: f32) -> OutVertex {
        let mut attributes = [Attribute::Empty; MAX_ATTRIBUTES];
        for (slot, out) in attributes.iter_mut().enumerate() {
            *out = self.attributes[slot].lerp(&other.attributes[slot], t);
        }
        OutVertex {
            position: self.position + (other.position - self.position) * t,
            attributes,
        }
    }
}

impl Default for OutVertex {
    fn default() -> Self {
        Self::new(Vec4::ZERO)
    }
}

// ===== FRAGMENT RECORDS =====

/// Fragment shader input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InFragment {
    /// Pixel-center x, y in window space, interpolated depth in z, 1/w_clip in w
    pub frag_coord: Vec4,
    /// Perspective-correct interpolated attributes (empty for unused slots)
    pub attributes: [Attribute; MAX_ATTRIBUTES],
}

/// Fragment shader output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutFragment {
    /// RGBA color, normalized; clamped to [0, 1] when written
    pub color: Vec4,
}

impl OutFragment {
    pub fn new(color: Vec4) -> Self {
        Self { color }
    }
}

// ===== SHADER TRAITS =====

/// Vertex shader callable
///
/// Implemented for every `Fn(&InVertex, &Uniforms) -> OutVertex + Send + Sync`.
///
/// # Example
///
/// ```no_run
/// use soft_gpu::softgpu::shader::{InVertex, OutVertex, Uniforms, VertexShader};
///
/// fn passthrough(input: &InVertex, _uniforms: &Uniforms) -> OutVertex {
///     OutVertex::new(input.attributes[0].as_vec4())
/// }
///
/// let _shader: &dyn VertexShader = &passthrough;
/// ```
pub trait VertexShader: Send + Sync {
    fn shade(&self, input: &InVertex, uniforms: &Uniforms) -> OutVertex;
}

impl<F> VertexShader for F
where
    F: Fn(&InVertex, &Uniforms) -> OutVertex + Send + Sync,
{
    fn shade(&self, input: &InVertex, uniforms: &Uniforms) -> OutVertex {
        self(input, uniforms)
    }
}

/// Fragment shader callable
///
/// Implemented for every `Fn(&InFragment, &Uniforms) -> OutFragment + Send + Sync`.
pub trait FragmentShader: Send + Sync {
    fn shade(&self, input: &InFragment, uniforms: &Uniforms) -> OutFragment;
}

impl<F> FragmentShader for F
where
    F: Fn(&InFragment, &Uniforms) -> OutFragment + Send + Sync,
{
    fn shade(&self, input: &InFragment, uniforms: &Uniforms) -> OutFragment {
        self(input, uniforms)
    }
}
