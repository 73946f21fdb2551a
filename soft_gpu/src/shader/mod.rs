/// Shader interface - the types shaders consume and produce

mod attribute;
mod uniforms;
mod stage;

pub use attribute::{Attribute, AttributeType};
pub use uniforms::{Uniform, Uniforms};
pub use stage::{
    InVertex, OutVertex, InFragment, OutFragment,
    VertexShader, FragmentShader,
};

/// Number of vertex attribute slots (puller heads, shader inputs/outputs)
pub const MAX_ATTRIBUTES: usize = 16;

/// Number of uniform slots per program
pub const MAX_UNIFORMS: usize = 16;
