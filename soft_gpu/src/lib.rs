/*!
# SoftGpu

A software implementation of a small programmable GPU pipeline.

The crate owns GPU-style resources (byte buffers, vertex puller tables, shader programs and a
framebuffer) and executes triangle draw calls entirely on the CPU. Vertex and fragment shaders
are plain Rust callables supplied by the caller.

## Architecture

- **Gpu**: pipeline context, owns every resource and the bound/active selection state
- **ResourceStore**: id-keyed tables of buffers, vertex pullers and programs
- **VertexFetch**: resolves indices and reads typed attributes from buffers
- **Clipper**: trivial reject and near-plane clipping in homogeneous clip space
- **Rasterizer**: viewport transform, scan conversion, depth test, fragment shading
- **Framebuffer**: RGBA8 color and f32 depth storage, row 0 at the bottom

Every public `Gpu` call is infallible: unknown ids and out-of-range slots are ignored and
reported through the logger.
*/

// Internal modules
mod error;
mod engine;
mod config;
mod gpu;
pub mod log;
pub mod utils;
pub mod shader;
pub mod resource;
pub mod pipeline;

// Main softgpu namespace module
pub mod softgpu {
    // Error types
    pub use crate::error::{Error, Result};

    // Logger registry
    pub use crate::engine::Engine;

    // Pipeline context and configuration
    pub use crate::gpu::{Gpu, DrawStats};
    pub use crate::config::{GpuConfig, DEFAULT_CLEAR_DEPTH, DEFAULT_PARALLEL_VERTEX_THRESHOLD};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Shader interface sub-module
    pub mod shader {
        pub use crate::shader::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Pipeline stages sub-module
    pub mod pipeline {
        pub use crate::pipeline::*;
    }
}

// Re-export math library at crate root
pub use glam;
