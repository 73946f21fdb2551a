//! Framebuffer storage.
//!
//! RGBA8 color and f32 depth, both row-major with row 0 at the bottom of the
//! image. Both arrays always hold exactly `width * height` pixels.

use glam::Vec4;
use crate::error::{Error, Result};
use crate::gpu_error;

/// Color and depth planes
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    color: Vec<u8>,
    depth: Vec<f32>,
    clear_depth: f32,
}

impl Framebuffer {
    /// Allocate a `width` × `height` framebuffer cleared to (0,0,0,0) and `clear_depth`
    ///
    /// # Errors
    ///
    /// Returns `OutOfMemory` if either plane cannot be allocated.
    pub fn new(width: u32, height: u32, clear_depth: f32) -> Result<Self> {
        let mut framebuffer = Self {
            width: 0,
            height: 0,
            color: Vec::new(),
            depth: Vec::new(),
            clear_depth,
        };
        framebuffer.resize(width, height)?;
        Ok(framebuffer)
    }

    /// Reallocate both planes for a new size
    ///
    /// Content is not preserved; the new planes are cleared to (0,0,0,0) and the
    /// clear depth. On failure the framebuffer keeps its previous size and content.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let pixels = (width as usize).checked_mul(height as usize);
        let bytes = pixels.and_then(|p| p.checked_mul(4));
        let (pixels, bytes) = match (pixels, bytes) {
            (Some(p), Some(b)) => (p, b),
            _ => {
                gpu_error!("softgpu::Framebuffer", "Framebuffer {}x{} is too large", width, height);
                return Err(Error::OutOfMemory);
            }
        };

        let mut color = Vec::new();
        let mut depth = Vec::new();
        if color.try_reserve_exact(bytes).is_err() || depth.try_reserve_exact(pixels).is_err() {
            gpu_error!("softgpu::Framebuffer", "Failed to allocate a {}x{} framebuffer", width, height);
            return Err(Error::OutOfMemory);
        }
        color.resize(bytes, 0);
        depth.resize(pixels, self.clear_depth);

        self.width = width;
        self.height = height;
        self.color = color;
        self.depth = depth;
        Ok(())
    }

    /// Fill color with `rgba` and depth with the clear depth
    ///
    /// Channels above 1.0 are clamped to 1.0; negative channels saturate to 0.
    pub fn clear(&mut self, rgba: Vec4) {
        let rgba = rgba.min(Vec4::ONE) * 255.0;
        let texel = [rgba.x as u8, rgba.y as u8, rgba.z as u8, rgba.w as u8];
        for pixel in self.color.chunks_exact_mut(4) {
            pixel.copy_from_slice(&texel);
        }
        self.depth.fill(self.clear_depth);
    }

    // ===== ACCESSORS =====

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Depth written by `clear`
    pub fn clear_depth(&self) -> f32 {
        self.clear_depth
    }

    /// Color plane, 4 bytes per pixel
    pub fn color(&self) -> &[u8] {
        &self.color
    }

    /// Depth plane, one float per pixel
    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    /// RGBA of pixel (x, y), y counted from the bottom row
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.index(x, y)? * 4;
        Some([self.color[i], self.color[i + 1], self.color[i + 2], self.color[i + 3]])
    }

    /// Depth of pixel (x, y)
    pub fn depth_at(&self, x: u32, y: u32) -> Option<f32> {
        self.index(x, y).map(|i| self.depth[i])
    }

    // ===== FRAGMENT OUTPUT =====

    /// Store a fragment's color and depth without testing
    ///
    /// Color channels are scaled by 255 and clamped to 0..255.
    pub fn write(&mut self, x: u32, y: u32, color: Vec4, depth: f32) {
        if let Some(i) = self.index(x, y) {
            let c = (color * 255.0).clamp(Vec4::ZERO, Vec4::splat(255.0));
            self.color[i * 4..i * 4 + 4].copy_from_slice(&[c.x as u8, c.y as u8, c.z as u8, c.w as u8]);
            self.depth[i] = depth;
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "framebuffer_tests.rs"]
mod tests;
