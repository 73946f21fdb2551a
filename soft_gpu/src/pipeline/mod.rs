//! Draw-call pipeline stages
//!
//! Vertex fetch → vertex shading → clipping → rasterization → framebuffer.
//! The `Gpu` context drives the stages; each stage is usable on its own.

pub mod vertex_fetch;
pub mod clipper;
pub mod rasterizer;
pub mod framebuffer;

pub use vertex_fetch::VertexFetch;
pub use clipper::{clip_triangle, is_trivially_rejected, ClippedTriangles};
pub use rasterizer::{Rasterizer, RasterCounters};
pub use framebuffer::Framebuffer;
