//! Homogeneous clip-space triangle clipping.
//!
//! Two tiers: a cheap trivial reject against the six clip half-spaces, then
//! exact clipping against the near plane only. Geometry outside the x/y
//! planes survives and is discarded per pixel by the rasterizer.
//!
//! A vertex is behind the near plane when `z < -w`. Output triangles keep the
//! winding of the input triangle.

use glam::Vec4;
use crate::shader::OutVertex;

/// Result of clipping one triangle: zero, one or two triangles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippedTriangles {
    count: usize,
    triangles: [[OutVertex; 3]; 2],
}

impl ClippedTriangles {
    fn none() -> Self {
        Self {
            count: 0,
            triangles: [[OutVertex::default(); 3]; 2],
        }
    }

    fn one(triangle: [OutVertex; 3]) -> Self {
        Self {
            count: 1,
            triangles: [triangle, triangle],
        }
    }

    fn two(first: [OutVertex; 3], second: [OutVertex; 3]) -> Self {
        Self {
            count: 2,
            triangles: [first, second],
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn as_slice(&self) -> &[[OutVertex; 3]] {
        &self.triangles[..self.count]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, [OutVertex; 3]> {
        self.as_slice().iter()
    }
}

impl<'a> IntoIterator for &'a ClippedTriangles {
    type Item = &'a [OutVertex; 3];
    type IntoIter = std::slice::Iter<'a, [OutVertex; 3]>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ===== TRIVIAL REJECT =====

/// Bitmask of the clip half-spaces a position lies outside of
fn outcode(p: Vec4) -> u8 {
    let mut code = 0;
    if p.x > p.w { code |= 1 << 0; }
    if p.x < -p.w { code |= 1 << 1; }
    if p.y > p.w { code |= 1 << 2; }
    if p.y < -p.w { code |= 1 << 3; }
    if p.z > p.w { code |= 1 << 4; }
    if p.z < -p.w { code |= 1 << 5; }
    code
}

/// Whether all three vertices lie outside the same clip half-space
pub fn is_trivially_rejected(a: &OutVertex, b: &OutVertex, c: &OutVertex) -> bool {
    outcode(a.position) & outcode(b.position) & outcode(c.position) != 0
}

// ===== NEAR PLANE =====

fn behind_near(v: &OutVertex) -> bool {
    v.position.z < -v.position.w
}

/// Point where edge `from -> to` crosses `z = -w`
fn near_intersection(from: &OutVertex, to: &OutVertex) -> OutVertex {
    let (p, q) = (from.position, to.position);
    let t = (-p.w - p.z) / ((q.w - p.w) + (q.z - p.z));
    from.lerp(to, t)
}

/// Clip a triangle against the near plane
///
/// Returns zero triangles when the input is trivially rejected or entirely
/// behind the near plane, one when nothing or two vertices are clipped, and
/// two when exactly one vertex is clipped.
pub fn clip_triangle(a: &OutVertex, b: &OutVertex, c: &OutVertex) -> ClippedTriangles {
    if is_trivially_rejected(a, b, c) {
        return ClippedTriangles::none();
    }

    // Rotations keep winding; the clipped vertex goes first, a lone survivor last
    match (behind_near(a), behind_near(b), behind_near(c)) {
        (false, false, false) => ClippedTriangles::one([*a, *b, *c]),
        (true, false, false) => clip_one(a, b, c),
        (false, true, false) => clip_one(b, c, a),
        (false, false, true) => clip_one(c, a, b),
        (true, true, false) => clip_two(a, b, c),
        (false, true, true) => clip_two(b, c, a),
        (true, false, true) => clip_two(c, a, b),
        (true, true, true) => ClippedTriangles::none(),
    }
}

/// `a` behind the near plane, `b` and `c` in front
fn clip_one(a: &OutVertex, b: &OutVertex, c: &OutVertex) -> ClippedTriangles {
    let a1 = near_intersection(a, b);
    let a2 = near_intersection(a, c);
    ClippedTriangles::two([a1, *b, *c], [a2, a1, *c])
}

/// `a` and `b` behind the near plane, `c` in front
fn clip_two(a: &OutVertex, b: &OutVertex, c: &OutVertex) -> ClippedTriangles {
    let a1 = near_intersection(a, c);
    let b1 = near_intersection(b, c);
    ClippedTriangles::one([a1, b1, *c])
}

#[cfg(test)]
#[path = "clipper_tests.rs"]
mod tests;
