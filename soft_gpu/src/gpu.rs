/// Gpu - pipeline context
///
/// Owns every resource, the bound vertex puller, the active program and the
/// framebuffer, and executes draw calls.
///
/// The public API is infallible: an unknown id, an out-of-range slot or a
/// failed allocation turns the call into a no-op (creators return the empty
/// id, queries return `false`). Each ignored call is reported at WARN.

use glam::{Mat4, Vec2, Vec3, Vec4};
use rayon::prelude::*;
use std::sync::Arc;
use crate::config::GpuConfig;
use crate::error::Result;
use crate::pipeline::{clip_triangle, Framebuffer, Rasterizer, VertexFetch};
use crate::resource::{
    BufferId, VertexPullerId, ProgramId,
    IndexType, Program, ResourceStore, VertexPuller,
};
use crate::shader::{
    AttributeType, FragmentShader, InVertex, OutVertex, Uniform, VertexShader,
};
use crate::{gpu_bail, gpu_debug, gpu_err, gpu_warn};

// ===== DRAW STATS =====

/// Counters accumulated over every draw call since creation or the last reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Draw calls that executed (skipped draws are not counted)
    pub draw_calls: u64,
    /// Vertex shader invocations
    pub vertices_shaded: u64,
    /// Triangles assembled from the vertex stream
    pub triangles_submitted: u64,
    /// Triangles discarded by the clipper
    pub triangles_rejected: u64,
    /// Triangles handed to the rasterizer (after clipping)
    pub triangles_rasterized: u64,
    /// Fragment shader invocations
    pub fragments_shaded: u64,
    /// Fragments discarded by the depth test
    pub fragments_depth_failed: u64,
}

// ===== GPU =====

/// Software GPU context
///
/// # Example
///
/// ```no_run
/// use soft_gpu::glam::Vec4;
/// use soft_gpu::softgpu::Gpu;
/// use soft_gpu::softgpu::shader::{InVertex, OutVertex, InFragment, OutFragment, Uniforms};
///
/// let mut gpu = Gpu::new();
/// gpu.create_framebuffer(4, 4);
///
/// let vao = gpu.create_vertex_puller();
/// gpu.bind_vertex_puller(vao);
///
/// let program = gpu.create_program();
/// gpu.attach_shaders(
///     program,
///     |input: &InVertex, _: &Uniforms| {
///         let corners = [Vec4::new(-1.0, -1.0, 0.0, 1.0), Vec4::new(1.0, -1.0, 0.0, 1.0), Vec4::new(0.0, 1.0, 0.0, 1.0)];
///         OutVertex::new(corners[input.vertex_id as usize % 3])
///     },
///     |_: &InFragment, _: &Uniforms| OutFragment::new(Vec4::new(1.0, 0.0, 0.0, 1.0)),
/// );
/// gpu.use_program(program);
///
/// gpu.clear(0.0, 0.0, 0.0, 1.0);
/// gpu.draw_triangles(3);
/// ```
pub struct Gpu {
    config: GpuConfig,
    resources: ResourceStore,
    bound_vertex_puller: VertexPullerId,
    active_program: ProgramId,
    framebuffer: Option<Framebuffer>,
    stats: DrawStats,
}

impl Gpu {
    /// Create a context with the default configuration
    pub fn new() -> Self {
        Self::with_config(GpuConfig::default())
    }

    /// Create a context with a custom configuration
    pub fn with_config(config: GpuConfig) -> Self {
        Self {
            config,
            resources: ResourceStore::new(),
            bound_vertex_puller: VertexPullerId::EMPTY,
            active_program: ProgramId::EMPTY,
            framebuffer: None,
            stats: DrawStats::default(),
        }
    }

    pub fn config(&self) -> &GpuConfig {
        &self.config
    }

    /// Resource tables (read-only)
    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    // ===== BUFFERS =====

    /// Allocate a zero-filled buffer; returns `BufferId::EMPTY` on failure
    pub fn create_buffer(&mut self, size: u64) -> BufferId {
        let result = self.resources.create_buffer(size);
        Self::report("create_buffer", result).unwrap_or(BufferId::EMPTY)
    }

    pub fn delete_buffer(&mut self, id: BufferId) {
        let result = self.resources.delete_buffer(id);
        Self::report("delete_buffer", result);
    }

    /// Copy `data` into buffer `id` at `offset`
    pub fn set_buffer_data(&mut self, id: BufferId, offset: u64, data: &[u8]) {
        let result = self.resources.buffer_mut(id)
            .and_then(|buffer| buffer.write(offset, data));
        Self::report("set_buffer_data", result);
    }

    /// Copy `dst.len()` bytes of buffer `id` starting at `offset` into `dst`
    pub fn get_buffer_data(&self, id: BufferId, offset: u64, dst: &mut [u8]) {
        let result = self.resources.buffer(id)
            .and_then(|buffer| buffer.read(offset, dst));
        Self::report("get_buffer_data", result);
    }

    pub fn is_buffer(&self, id: BufferId) -> bool {
        self.resources.has_buffer(id)
    }

    // ===== VERTEX PULLERS =====

    /// Create a vertex puller; returns `VertexPullerId::EMPTY` on failure
    pub fn create_vertex_puller(&mut self) -> VertexPullerId {
        let result = self.resources.create_vertex_puller();
        Self::report("create_vertex_puller", result).unwrap_or(VertexPullerId::EMPTY)
    }

    /// Delete a vertex puller, unbinding it if bound
    pub fn delete_vertex_puller(&mut self, id: VertexPullerId) {
        let result = self.resources.delete_vertex_puller(id);
        if Self::report("delete_vertex_puller", result).is_some() && self.bound_vertex_puller == id {
            self.bound_vertex_puller = VertexPullerId::EMPTY;
        }
    }

    /// Configure one reading head
    pub fn set_vertex_puller_head(
        &mut self,
        id: VertexPullerId,
        head: u32,
        attribute_type: AttributeType,
        stride: u64,
        offset: u64,
        buffer: BufferId,
    ) {
        let result = self.resources.vertex_puller_mut(id)
            .and_then(|puller| puller.set_head(head, attribute_type, stride, offset, buffer));
        Self::report("set_vertex_puller_head", result);
    }

    /// Route vertex ordinals through an index buffer
    pub fn set_vertex_puller_indexing(&mut self, id: VertexPullerId, index_type: IndexType, buffer: BufferId) {
        let result = self.resources.vertex_puller_mut(id)
            .map(|puller| puller.set_indexing(index_type, buffer));
        Self::report("set_vertex_puller_indexing", result);
    }

    pub fn disable_vertex_puller_indexing(&mut self, id: VertexPullerId) {
        let result = self.resources.vertex_puller_mut(id)
            .map(|puller| puller.disable_indexing());
        Self::report("disable_vertex_puller_indexing", result);
    }

    pub fn enable_vertex_puller_head(&mut self, id: VertexPullerId, head: u32) {
        let result = self.resources.vertex_puller_mut(id)
            .and_then(|puller| puller.enable_head(head));
        Self::report("enable_vertex_puller_head", result);
    }

    pub fn disable_vertex_puller_head(&mut self, id: VertexPullerId, head: u32) {
        let result = self.resources.vertex_puller_mut(id)
            .and_then(|puller| puller.disable_head(head));
        Self::report("disable_vertex_puller_head", result);
    }

    /// Select the vertex puller used by draws (unknown ids are ignored)
    pub fn bind_vertex_puller(&mut self, id: VertexPullerId) {
        let result = self.resources.vertex_puller(id).map(|_| ());
        if Self::report("bind_vertex_puller", result).is_some() {
            self.bound_vertex_puller = id;
        }
    }

    pub fn unbind_vertex_puller(&mut self) {
        self.bound_vertex_puller = VertexPullerId::EMPTY;
    }

    /// Currently bound vertex puller (`EMPTY` if none)
    pub fn bound_vertex_puller(&self) -> VertexPullerId {
        self.bound_vertex_puller
    }

    pub fn is_vertex_puller(&self, id: VertexPullerId) -> bool {
        self.resources.has_vertex_puller(id)
    }

    pub fn vertex_puller(&self, id: VertexPullerId) -> Option<&VertexPuller> {
        self.resources.vertex_puller(id).ok()
    }

    // ===== PROGRAMS =====

    /// Create a program; returns `ProgramId::EMPTY` on failure
    pub fn create_program(&mut self) -> ProgramId {
        let result = self.resources.create_program();
        Self::report("create_program", result).unwrap_or(ProgramId::EMPTY)
    }

    /// Delete a program, deactivating it if active
    pub fn delete_program(&mut self, id: ProgramId) {
        let result = self.resources.delete_program(id);
        if Self::report("delete_program", result).is_some() && self.active_program == id {
            self.active_program = ProgramId::EMPTY;
        }
    }

    /// Attach a vertex and a fragment shader to a program
    pub fn attach_shaders<V, F>(&mut self, id: ProgramId, vertex_shader: V, fragment_shader: F)
    where
        V: VertexShader + 'static,
        F: FragmentShader + 'static,
    {
        let result = self.resources.program_mut(id)
            .map(|program| program.attach_shaders(Arc::new(vertex_shader), Arc::new(fragment_shader)));
        Self::report("attach_shaders", result);
    }

    /// Select the interpolated type of one vertex-to-fragment attribute
    pub fn set_output_attribute_type(&mut self, id: ProgramId, slot: u32, attribute_type: AttributeType) {
        let result = self.resources.program_mut(id)
            .and_then(|program| program.set_output_attribute_type(slot, attribute_type));
        Self::report("set_output_attribute_type", result);
    }

    /// Select the program used by draws (unknown ids are ignored)
    pub fn use_program(&mut self, id: ProgramId) {
        let result = self.resources.program(id).map(|_| ());
        if Self::report("use_program", result).is_some() {
            self.active_program = id;
        }
    }

    /// Currently active program (`EMPTY` if none)
    pub fn active_program(&self) -> ProgramId {
        self.active_program
    }

    pub fn is_program(&self, id: ProgramId) -> bool {
        self.resources.has_program(id)
    }

    pub fn program(&self, id: ProgramId) -> Option<&Program> {
        self.resources.program(id).ok()
    }

    // ===== UNIFORMS =====

    pub fn program_uniform_1f(&mut self, id: ProgramId, slot: u32, value: f32) {
        self.set_uniform("program_uniform_1f", id, slot, Uniform::Float(value));
    }

    pub fn program_uniform_2f(&mut self, id: ProgramId, slot: u32, value: Vec2) {
        self.set_uniform("program_uniform_2f", id, slot, Uniform::Vec2(value));
    }

    pub fn program_uniform_3f(&mut self, id: ProgramId, slot: u32, value: Vec3) {
        self.set_uniform("program_uniform_3f", id, slot, Uniform::Vec3(value));
    }

    pub fn program_uniform_4f(&mut self, id: ProgramId, slot: u32, value: Vec4) {
        self.set_uniform("program_uniform_4f", id, slot, Uniform::Vec4(value));
    }

    pub fn program_uniform_matrix_4f(&mut self, id: ProgramId, slot: u32, value: Mat4) {
        self.set_uniform("program_uniform_matrix_4f", id, slot, Uniform::Mat4(value));
    }

    fn set_uniform(&mut self, operation: &str, id: ProgramId, slot: u32, value: Uniform) {
        let result = self.resources.program_mut(id)
            .and_then(|program| program.set_uniform(slot, value));
        Self::report(operation, result);
    }

    // ===== FRAMEBUFFER =====

    /// Allocate the framebuffer, replacing any existing one, cleared to (0,0,0,0)
    pub fn create_framebuffer(&mut self, width: u32, height: u32) {
        let result = Framebuffer::new(width, height, self.config.clear_depth);
        if let Some(framebuffer) = Self::report("create_framebuffer", result) {
            gpu_debug!("softgpu::Gpu", "Framebuffer created ({}x{})", width, height);
            self.framebuffer = Some(framebuffer);
        }
    }

    /// Reallocate the framebuffer without preserving content (creates it if missing)
    pub fn resize_framebuffer(&mut self, width: u32, height: u32) {
        match self.framebuffer.as_mut() {
            Some(framebuffer) => {
                let result = framebuffer.resize(width, height);
                if Self::report("resize_framebuffer", result).is_some() {
                    gpu_debug!("softgpu::Gpu", "Framebuffer resized ({}x{})", width, height);
                }
            }
            None => self.create_framebuffer(width, height),
        }
    }

    /// Release the framebuffer; width and height become 0
    pub fn delete_framebuffer(&mut self) {
        self.framebuffer = None;
    }

    pub fn framebuffer(&self) -> Option<&Framebuffer> {
        self.framebuffer.as_ref()
    }

    /// Color plane, RGBA8, row 0 at the bottom (empty without a framebuffer)
    pub fn framebuffer_color(&self) -> &[u8] {
        self.framebuffer.as_ref().map_or(&[], |fb| fb.color())
    }

    /// Depth plane (empty without a framebuffer)
    pub fn framebuffer_depth(&self) -> &[f32] {
        self.framebuffer.as_ref().map_or(&[], |fb| fb.depth())
    }

    pub fn framebuffer_width(&self) -> u32 {
        self.framebuffer.as_ref().map_or(0, |fb| fb.width())
    }

    pub fn framebuffer_height(&self) -> u32 {
        self.framebuffer.as_ref().map_or(0, |fb| fb.height())
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.framebuffer.as_ref().and_then(|fb| fb.pixel(x, y))
    }

    pub fn depth_at(&self, x: u32, y: u32) -> Option<f32> {
        self.framebuffer.as_ref().and_then(|fb| fb.depth_at(x, y))
    }

    /// Clear color to (r, g, b, a) and depth to the configured clear depth
    pub fn clear(&mut self, r: f32, g: f32, b: f32, a: f32) {
        match self.framebuffer.as_mut() {
            Some(framebuffer) => framebuffer.clear(Vec4::new(r, g, b, a)),
            None => gpu_warn!("softgpu::Gpu", "clear ignored: no framebuffer"),
        }
    }

    // ===== DRAW =====

    /// Draw `vertex_count / 3` independent triangles
    ///
    /// A trailing partial triangle is not drawn. On malformed configuration
    /// (nothing bound, shaders missing, unknown buffers, out-of-range reads)
    /// the draw is skipped before any pixel is written.
    pub fn draw_triangles(&mut self, vertex_count: u32) {
        if let Err(e) = self.execute_draw(vertex_count) {
            gpu_warn!("softgpu::Gpu", "draw_triangles({}) skipped: {}", vertex_count, e);
        }
    }

    fn execute_draw(&mut self, vertex_count: u32) -> Result<()> {
        if self.bound_vertex_puller.is_empty() {
            gpu_bail!(InvalidState, "softgpu::Gpu", "No vertex puller bound");
        }
        if self.active_program.is_empty() {
            gpu_bail!(InvalidState, "softgpu::Gpu", "No program in use");
        }

        let puller = self.resources.vertex_puller(self.bound_vertex_puller)?;
        let program = self.resources.program(self.active_program)?;
        let (vertex_shader, fragment_shader) = match (program.vertex_shader(), program.fragment_shader()) {
            (Some(vs), Some(fs)) => (vs, fs),
            _ => gpu_bail!(InvalidState, "softgpu::Gpu",
                "{} has no shaders attached", self.active_program),
        };
        let framebuffer = self.framebuffer.as_mut()
            .ok_or_else(|| gpu_err!(InvalidState, "softgpu::Gpu", "No framebuffer"))?;

        // Fetch everything first so a bad read aborts before any pixel is written
        let count = vertex_count - vertex_count % 3;
        let fetch = VertexFetch::new(puller, &self.resources)?;
        let inputs = (0..count)
            .map(|ordinal| fetch.fetch(ordinal))
            .collect::<Result<Vec<InVertex>>>()?;

        let uniforms = program.uniforms();
        let outputs: Vec<OutVertex> = if self.config.shades_in_parallel(inputs.len()) {
            inputs.par_iter().map(|v| vertex_shader.shade(v, uniforms)).collect()
        } else {
            inputs.iter().map(|v| vertex_shader.shade(v, uniforms)).collect()
        };

        let mut stats = DrawStats {
            draw_calls: 1,
            vertices_shaded: outputs.len() as u64,
            ..DrawStats::default()
        };

        let mut rasterizer = Rasterizer::new(
            framebuffer,
            &**fragment_shader,
            uniforms,
            program.output_attribute_types(),
        );
        for triangle in outputs.chunks_exact(3) {
            stats.triangles_submitted += 1;
            let clipped = clip_triangle(&triangle[0], &triangle[1], &triangle[2]);
            if clipped.is_empty() {
                stats.triangles_rejected += 1;
            }
            for piece in &clipped {
                rasterizer.rasterize(piece);
                stats.triangles_rasterized += 1;
            }
        }

        let counters = rasterizer.counters();
        stats.fragments_shaded = counters.fragments_shaded;
        stats.fragments_depth_failed = counters.fragments_depth_failed;

        gpu_debug!("softgpu::Gpu",
            "Draw: {} vertices, {} triangles ({} rejected, {} rasterized), {} fragments",
            stats.vertices_shaded, stats.triangles_submitted, stats.triangles_rejected,
            stats.triangles_rasterized, stats.fragments_shaded);

        self.accumulate(stats);
        Ok(())
    }

    // ===== STATS =====

    /// Counters since creation or the last `reset_stats`
    pub fn stats(&self) -> DrawStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = DrawStats::default();
    }

    fn accumulate(&mut self, draw: DrawStats) {
        let s = &mut self.stats;
        s.draw_calls += draw.draw_calls;
        s.vertices_shaded += draw.vertices_shaded;
        s.triangles_submitted += draw.triangles_submitted;
        s.triangles_rejected += draw.triangles_rejected;
        s.triangles_rasterized += draw.triangles_rasterized;
        s.fragments_shaded += draw.fragments_shaded;
        s.fragments_depth_failed += draw.fragments_depth_failed;
    }

    // ===== INTERNAL =====

    /// Turn an internal result into the silent public form
    fn report<T>(operation: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                gpu_warn!("softgpu::Gpu", "{} ignored: {}", operation, e);
                None
            }
        }
    }
}

impl Default for Gpu {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "gpu_tests.rs"]
mod tests;
