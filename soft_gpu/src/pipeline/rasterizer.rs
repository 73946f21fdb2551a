//! Triangle rasterizer.
//!
//! Takes clip-space triangles that already went through the clipper and
//! turns them into fragments:
//!
//! 1. Perspective divide and viewport transform (`w` is kept for interpolation)
//! 2. Edge walk: every non-horizontal edge records, per covered scanline, the
//!    x where it crosses the row center; min/max give the row span
//! 3. Span fill with pixel-center sampling
//! 4. Barycentric weights from 2D cross products, normalized by `W * H`
//! 5. Perspective-correct depth and attributes, strict-less depth test,
//!    fragment shader, framebuffer write
//!
//! Fragments are processed strictly in row order so results are deterministic.

use glam::{Vec2, Vec3, Vec4};
use crate::shader::{
    Attribute, AttributeType, FragmentShader, InFragment, OutVertex, Uniforms,
    MAX_ATTRIBUTES,
};
use super::Framebuffer;

/// Fragment counters of one or more rasterized triangles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterCounters {
    /// Fragments that passed the depth test and were shaded
    pub fragments_shaded: u64,
    /// Fragments discarded by the depth test
    pub fragments_depth_failed: u64,
}

/// Vertex after perspective divide and viewport transform
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    /// Window-space x, y in pixels
    xy: Vec2,
    /// NDC depth
    z: f32,
    /// Clip-space w
    w: f32,
}

/// 2D cross product of (b - a) and (p - a)
#[inline]
fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Rasterizer bound to one framebuffer and one program
pub struct Rasterizer<'a> {
    framebuffer: &'a mut Framebuffer,
    fragment_shader: &'a dyn FragmentShader,
    uniforms: &'a Uniforms,
    output_types: &'a [AttributeType; MAX_ATTRIBUTES],
    counters: RasterCounters,
}

impl<'a> Rasterizer<'a> {
    pub fn new(
        framebuffer: &'a mut Framebuffer,
        fragment_shader: &'a dyn FragmentShader,
        uniforms: &'a Uniforms,
        output_types: &'a [AttributeType; MAX_ATTRIBUTES],
    ) -> Self {
        Self {
            framebuffer,
            fragment_shader,
            uniforms,
            output_types,
            counters: RasterCounters::default(),
        }
    }

    /// Counters accumulated since creation
    pub fn counters(&self) -> RasterCounters {
        self.counters
    }

    /// Viewport transform of one clip-space position (None if it cannot be projected)
    fn to_screen(&self, position: Vec4) -> Option<ScreenVertex> {
        let w = position.w;
        if w == 0.0 || !position.is_finite() {
            return None;
        }
        let ndc = position.truncate() / w;
        let size = Vec2::new(self.framebuffer.width() as f32, self.framebuffer.height() as f32);
        Some(ScreenVertex {
            xy: (ndc.truncate() + Vec2::ONE) * size * 0.5,
            z: ndc.z,
            w,
        })
    }

    /// Rasterize one clipped triangle
    pub fn rasterize(&mut self, triangle: &[OutVertex; 3]) {
        let width = self.framebuffer.width();
        let height = self.framebuffer.height();
        if width == 0 || height == 0 {
            return;
        }

        let screen = match (
            self.to_screen(triangle[0].position),
            self.to_screen(triangle[1].position),
            self.to_screen(triangle[2].position),
        ) {
            (Some(a), Some(b), Some(c)) => [a, b, c],
            _ => return,
        };
        let [p0, p1, p2] = [screen[0].xy, screen[1].xy, screen[2].xy];

        let area = edge_function(p0, p1, p2);
        if area == 0.0 || !area.is_finite() {
            return;
        }

        // Rows whose centers fall inside the vertical extent
        let y_min = p0.y.min(p1.y).min(p2.y);
        let y_max = p0.y.max(p1.y).max(p2.y);
        let row_first = (y_min - 0.5).ceil().max(0.0);
        let row_last = (y_max - 0.5).floor().min(height as f32 - 1.0);
        if row_first > row_last {
            return;
        }
        let row_first = row_first as u32;
        let row_last = row_last as u32;

        let spans = Self::walk_edges(&screen, row_first, row_last);

        let normalize = 1.0 / (width as f32 * height as f32);
        for (row, &(x_left, x_right)) in (row_first..=row_last).zip(spans.iter()) {
            if x_left > x_right {
                continue;
            }
            let col_first = (x_left - 0.5).ceil().max(0.0);
            let col_last = (x_right - 0.5).floor().min(width as f32 - 1.0);
            if col_first > col_last {
                continue;
            }

            for col in col_first as u32..=col_last as u32 {
                let sample = Vec2::new(col as f32 + 0.5, row as f32 + 0.5);
                let h = Vec3::new(
                    edge_function(p1, p2, sample),
                    edge_function(p2, p0, sample),
                    edge_function(p0, p1, sample),
                ) * normalize;
                self.shade_sample(triangle, &screen, col, row, sample, h);
            }
        }
    }

    /// Per-row [min x, max x] reached by the triangle edges
    ///
    /// Rows no edge reaches keep an empty (inverted) span.
    fn walk_edges(screen: &[ScreenVertex; 3], row_first: u32, row_last: u32) -> Vec<(f32, f32)> {
        let mut spans = vec![(f32::INFINITY, f32::NEG_INFINITY); (row_last - row_first + 1) as usize];

        for i in 0..3 {
            let (mut lo, mut hi) = (screen[i].xy, screen[(i + 1) % 3].xy);
            if lo.y == hi.y {
                continue;
            }
            if lo.y > hi.y {
                std::mem::swap(&mut lo, &mut hi);
            }

            let first = (lo.y - 0.5).ceil().max(row_first as f32);
            let last = (hi.y - 0.5).floor().min(row_last as f32);
            if first > last {
                continue;
            }

            let dx_dy = (hi.x - lo.x) / (hi.y - lo.y);
            for row in first as u32..=last as u32 {
                let x = lo.x + (row as f32 + 0.5 - lo.y) * dx_dy;
                let span = &mut spans[(row - row_first) as usize];
                span.0 = span.0.min(x);
                span.1 = span.1.max(x);
            }
        }

        spans
    }

    /// Depth test, interpolation, shading and write of one sample
    fn shade_sample(
        &mut self,
        triangle: &[OutVertex; 3],
        screen: &[ScreenVertex; 3],
        col: u32,
        row: u32,
        sample: Vec2,
        h: Vec3,
    ) {
        let h_over_w = Vec3::new(h.x / screen[0].w, h.y / screen[1].w, h.z / screen[2].w);
        let sum = h_over_w.x + h_over_w.y + h_over_w.z;
        if sum == 0.0 || !sum.is_finite() {
            return;
        }
        let weights = h_over_w / sum;

        let z = weights.dot(Vec3::new(screen[0].z, screen[1].z, screen[2].z));
        let stored = match self.framebuffer.depth_at(col, row) {
            Some(depth) => depth,
            None => return,
        };
        if !(z < stored) {
            self.counters.fragments_depth_failed += 1;
            return;
        }

        let mut attributes = [Attribute::Empty; MAX_ATTRIBUTES];
        for (slot, ty) in self.output_types.iter().enumerate() {
            if *ty == AttributeType::Empty {
                continue;
            }
            attributes[slot] = Attribute::weighted(
                *ty,
                [
                    &triangle[0].attributes[slot],
                    &triangle[1].attributes[slot],
                    &triangle[2].attributes[slot],
                ],
                weights,
            );
        }

        let h_sum = h.x + h.y + h.z;
        let fragment = InFragment {
            frag_coord: Vec4::new(sample.x, sample.y, z, sum / h_sum),
            attributes,
        };
        let out = self.fragment_shader.shade(&fragment, self.uniforms);
        self.framebuffer.write(col, row, out.color, z);
        self.counters.fragments_shaded += 1;
    }
}

#[cfg(test)]
#[path = "rasterizer_tests.rs"]
mod tests;
