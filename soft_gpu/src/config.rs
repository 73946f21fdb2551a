/// Pipeline configuration

/// Depth written by `clear`; greater than any NDC depth so every visible fragment passes
pub const DEFAULT_CLEAR_DEPTH: f32 = 1.1;

/// Vertex count from which parallel vertex shading kicks in (when enabled)
pub const DEFAULT_PARALLEL_VERTEX_THRESHOLD: usize = 4096;

/// Gpu configuration
#[derive(Debug, Clone)]
pub struct GpuConfig {
    /// Depth sentinel written by `clear`
    pub clear_depth: f32,
    /// Run vertex shaders on the rayon thread pool for large draws
    pub parallel_vertex_shading: bool,
    /// Minimum number of vertices in a draw before parallel shading is used
    pub parallel_vertex_threshold: usize,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            clear_depth: DEFAULT_CLEAR_DEPTH,
            parallel_vertex_shading: false,
            parallel_vertex_threshold: DEFAULT_PARALLEL_VERTEX_THRESHOLD,
        }
    }
}

impl GpuConfig {
    /// Whether a draw of `vertex_count` vertices should shade in parallel
    pub fn shades_in_parallel(&self, vertex_count: usize) -> bool {
        self.parallel_vertex_shading && vertex_count >= self.parallel_vertex_threshold
    }
}
