use super::*;
use crate::config::DEFAULT_CLEAR_DEPTH;
use crate::shader::{InFragment, OutFragment, Uniforms};

// ============================================================================
// Helpers
// ============================================================================

fn position_vs(input: &InVertex, _uniforms: &Uniforms) -> OutVertex {
    OutVertex::new(input.attributes[0].as_vec4())
}

fn red_fs(_input: &InFragment, _uniforms: &Uniforms) -> OutFragment {
    OutFragment::new(Vec4::new(1.0, 0.0, 0.0, 1.0))
}

fn upload_positions(gpu: &mut Gpu, positions: &[Vec4]) -> BufferId {
    let bytes: &[u8] = bytemuck::cast_slice(positions);
    let buffer = gpu.create_buffer(bytes.len() as u64);
    gpu.set_buffer_data(buffer, 0, bytes);
    buffer
}

/// Context with a 4x4 framebuffer, a bound puller reading vec4 positions from
/// head 0 and an active red program
fn ready_gpu(positions: &[Vec4]) -> (Gpu, VertexPullerId, ProgramId) {
    let mut gpu = Gpu::new();
    gpu.create_framebuffer(4, 4);

    let buffer = upload_positions(&mut gpu, positions);
    let vao = gpu.create_vertex_puller();
    gpu.set_vertex_puller_head(vao, 0, AttributeType::Vec4, 16, 0, buffer);
    gpu.enable_vertex_puller_head(vao, 0);
    gpu.bind_vertex_puller(vao);

    let program = gpu.create_program();
    gpu.attach_shaders(program, position_vs, red_fs);
    gpu.use_program(program);

    (gpu, vao, program)
}

fn reference_triangle() -> [Vec4; 3] {
    [
        Vec4::new(-1.0, -1.0, 0.0, 1.0),
        Vec4::new(1.0, -1.0, 0.0, 1.0),
        Vec4::new(0.0, 1.0, 0.0, 1.0),
    ]
}

// ============================================================================
// Configuration tests
// ============================================================================

#[test]
fn test_default_config() {
    let gpu = Gpu::new();
    assert_eq!(gpu.config().clear_depth, DEFAULT_CLEAR_DEPTH);
    assert!(!gpu.config().parallel_vertex_shading);
    assert!(!gpu.config().shades_in_parallel(1 << 20));
}

#[test]
fn test_custom_clear_depth_is_used() {
    let mut gpu = Gpu::with_config(GpuConfig {
        clear_depth: 2.0,
        ..GpuConfig::default()
    });
    gpu.create_framebuffer(2, 2);
    assert!(gpu.framebuffer_depth().iter().all(|&d| d == 2.0));
}

#[test]
fn test_parallel_threshold() {
    let config = GpuConfig {
        parallel_vertex_shading: true,
        parallel_vertex_threshold: 6,
        ..GpuConfig::default()
    };
    assert!(!config.shades_in_parallel(5));
    assert!(config.shades_in_parallel(6));
}

// ============================================================================
// Silent boundary tests
// ============================================================================

#[test]
fn test_operations_on_unknown_ids_are_ignored() {
    let mut gpu = Gpu::new();
    gpu.set_buffer_data(BufferId(5), 0, &[1, 2, 3]);
    gpu.delete_buffer(BufferId(5));
    gpu.set_vertex_puller_head(VertexPullerId(2), 0, AttributeType::Float, 4, 0, BufferId(1));
    gpu.program_uniform_1f(ProgramId(9), 0, 1.0);
    gpu.attach_shaders(ProgramId(9), position_vs, red_fs);

    assert!(!gpu.is_buffer(BufferId(5)));
    assert!(!gpu.is_vertex_puller(VertexPullerId(2)));
    assert!(!gpu.is_program(ProgramId(9)));
    assert_eq!(gpu.resources().buffer_count(), 0);
}

#[test]
fn test_get_buffer_data_out_of_range_leaves_dst() {
    let mut gpu = Gpu::new();
    let buffer = gpu.create_buffer(4);
    let mut dst = [9u8; 8];
    gpu.get_buffer_data(buffer, 0, &mut dst);
    assert_eq!(dst, [9u8; 8]);
}

#[test]
fn test_failed_buffer_allocation_returns_empty_id() {
    let mut gpu = Gpu::new();
    assert_eq!(gpu.create_buffer(u64::MAX), BufferId::EMPTY);
    assert!(!gpu.is_buffer(BufferId::EMPTY));
}

#[test]
fn test_out_of_range_uniform_slot_is_ignored() {
    let mut gpu = Gpu::new();
    let program = gpu.create_program();
    gpu.program_uniform_3f(program, crate::shader::MAX_UNIFORMS as u32, Vec3::ONE);
    gpu.program_uniform_3f(program, 0, Vec3::ONE);

    let uniforms = gpu.program(program).unwrap().uniforms();
    assert_eq!(uniforms.vec3(0), Some(Vec3::ONE));
}

// ============================================================================
// Selection state tests
// ============================================================================

#[test]
fn test_bind_unknown_puller_keeps_previous_binding() {
    let mut gpu = Gpu::new();
    let vao = gpu.create_vertex_puller();
    gpu.bind_vertex_puller(vao);
    gpu.bind_vertex_puller(VertexPullerId(77));
    assert_eq!(gpu.bound_vertex_puller(), vao);

    gpu.unbind_vertex_puller();
    assert!(gpu.bound_vertex_puller().is_empty());
}

#[test]
fn test_deleting_bound_puller_unbinds_it() {
    let mut gpu = Gpu::new();
    let a = gpu.create_vertex_puller();
    let b = gpu.create_vertex_puller();
    gpu.bind_vertex_puller(a);

    gpu.delete_vertex_puller(b);
    assert_eq!(gpu.bound_vertex_puller(), a);
    gpu.delete_vertex_puller(a);
    assert_eq!(gpu.bound_vertex_puller(), VertexPullerId::EMPTY);
}

#[test]
fn test_deleting_active_program_deactivates_it() {
    let mut gpu = Gpu::new();
    let program = gpu.create_program();
    gpu.use_program(program);
    assert_eq!(gpu.active_program(), program);

    gpu.delete_program(program);
    assert!(gpu.active_program().is_empty());
    gpu.use_program(program);
    assert!(gpu.active_program().is_empty());
}

// ============================================================================
// Framebuffer tests
// ============================================================================

#[test]
fn test_no_framebuffer_by_default() {
    let mut gpu = Gpu::new();
    assert_eq!(gpu.framebuffer_width(), 0);
    assert_eq!(gpu.framebuffer_height(), 0);
    assert!(gpu.framebuffer_color().is_empty());
    gpu.clear(1.0, 1.0, 1.0, 1.0);
    assert!(gpu.framebuffer().is_none());
}

#[test]
fn test_resize_before_create_creates() {
    let mut gpu = Gpu::new();
    gpu.resize_framebuffer(3, 2);
    assert_eq!((gpu.framebuffer_width(), gpu.framebuffer_height()), (3, 2));
    assert_eq!(gpu.framebuffer_color().len(), 24);
    assert_eq!(gpu.framebuffer_depth().len(), 6);
}

#[test]
fn test_delete_framebuffer() {
    let mut gpu = Gpu::new();
    gpu.create_framebuffer(2, 2);
    gpu.delete_framebuffer();
    assert_eq!(gpu.framebuffer_width(), 0);
    assert!(gpu.framebuffer_depth().is_empty());
    assert_eq!(gpu.pixel(0, 0), None);
}

// ============================================================================
// Draw tests
// ============================================================================

#[test]
fn test_draw_reference_triangle() {
    let (mut gpu, _, _) = ready_gpu(&reference_triangle());
    gpu.clear(0.0, 0.0, 0.0, 0.0);
    gpu.draw_triangles(3);

    assert_eq!(gpu.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(gpu.depth_at(0, 0), Some(0.0));
    assert_eq!(gpu.pixel(0, 3), Some([0, 0, 0, 0]));

    let stats = gpu.stats();
    assert_eq!(stats.draw_calls, 1);
    assert_eq!(stats.vertices_shaded, 3);
    assert_eq!(stats.triangles_submitted, 1);
    assert_eq!(stats.triangles_rasterized, 1);
    assert_eq!(stats.fragments_shaded, 8);
}

#[test]
fn test_trailing_partial_triangle_is_dropped() {
    let mut positions = reference_triangle().to_vec();
    positions.push(Vec4::new(0.0, 0.0, 0.0, 1.0));
    let (mut gpu, _, _) = ready_gpu(&positions);
    gpu.draw_triangles(5);
    assert_eq!(gpu.stats().vertices_shaded, 3);
    assert_eq!(gpu.stats().triangles_submitted, 1);
}

#[test]
fn test_draw_without_bound_puller_is_skipped() {
    let (mut gpu, _, _) = ready_gpu(&reference_triangle());
    gpu.unbind_vertex_puller();
    let before = gpu.framebuffer_color().to_vec();
    gpu.draw_triangles(3);
    assert_eq!(gpu.framebuffer_color(), &before[..]);
    assert_eq!(gpu.stats(), DrawStats::default());
}

#[test]
fn test_draw_without_shaders_is_skipped() {
    let (mut gpu, _, _) = ready_gpu(&reference_triangle());
    let bare = gpu.create_program();
    gpu.use_program(bare);
    gpu.draw_triangles(3);
    assert_eq!(gpu.stats().draw_calls, 0);
    assert_eq!(gpu.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn test_draw_with_out_of_range_read_writes_nothing() {
    // Second triangle reads past the end of the position buffer
    let (mut gpu, _, _) = ready_gpu(&reference_triangle());
    gpu.draw_triangles(6);
    assert_eq!(gpu.stats(), DrawStats::default());
    assert!(gpu.framebuffer_color().iter().all(|&b| b == 0));
}

#[test]
fn test_draw_with_deleted_head_buffer_is_skipped() {
    let (mut gpu, vao, _) = ready_gpu(&reference_triangle());
    let buffer = gpu.vertex_puller(vao).unwrap().head(0).unwrap().buffer;
    gpu.delete_buffer(buffer);
    gpu.draw_triangles(3);
    assert_eq!(gpu.stats().draw_calls, 0);
}

#[test]
fn test_zero_vertex_draw_counts_but_draws_nothing() {
    let (mut gpu, _, _) = ready_gpu(&reference_triangle());
    gpu.draw_triangles(0);
    assert_eq!(gpu.stats().draw_calls, 1);
    assert_eq!(gpu.stats().fragments_shaded, 0);
}

#[test]
fn test_reset_stats() {
    let (mut gpu, _, _) = ready_gpu(&reference_triangle());
    gpu.draw_triangles(3);
    gpu.draw_triangles(3);
    assert_eq!(gpu.stats().draw_calls, 2);
    assert_eq!(gpu.stats().fragments_depth_failed, 8);

    gpu.reset_stats();
    assert_eq!(gpu.stats(), DrawStats::default());
}

#[test]
fn test_parallel_vertex_shading_matches_serial() {
    let positions = [
        Vec4::new(-1.0, -1.0, 0.3, 1.0),
        Vec4::new(1.0, -1.0, 0.3, 1.0),
        Vec4::new(1.0, 1.0, 0.3, 1.0),
        Vec4::new(-1.0, -1.0, -0.2, 1.0),
        Vec4::new(1.0, 1.0, -0.2, 1.0),
        Vec4::new(-1.0, 1.0, -0.2, 1.0),
    ];

    let (mut serial, _, _) = ready_gpu(&positions);
    serial.draw_triangles(6);

    let mut parallel = Gpu::with_config(GpuConfig {
        parallel_vertex_shading: true,
        parallel_vertex_threshold: 1,
        ..GpuConfig::default()
    });
    parallel.create_framebuffer(4, 4);
    let buffer = upload_positions(&mut parallel, &positions);
    let vao = parallel.create_vertex_puller();
    parallel.set_vertex_puller_head(vao, 0, AttributeType::Vec4, 16, 0, buffer);
    parallel.enable_vertex_puller_head(vao, 0);
    parallel.bind_vertex_puller(vao);
    let program = parallel.create_program();
    parallel.attach_shaders(program, position_vs, red_fs);
    parallel.use_program(program);
    parallel.draw_triangles(6);

    assert_eq!(serial.framebuffer_color(), parallel.framebuffer_color());
    assert_eq!(serial.framebuffer_depth(), parallel.framebuffer_depth());
    assert_eq!(serial.stats(), parallel.stats());
}
