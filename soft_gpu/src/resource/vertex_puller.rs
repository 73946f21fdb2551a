//! Vertex puller tables.
//!
//! A `VertexPuller` describes how the vertex fetch stage builds input vertices:
//! one `Head` per attribute slot (which buffer to read, at which stride and
//! offset, as which type) plus an optional `Indexing` descriptor that routes
//! vertex ordinals through an index buffer.
//!
//! Buffer ids are stored as given; they are resolved when a draw executes.

use crate::error::Result;
use crate::gpu_bail;
use crate::shader::{AttributeType, MAX_ATTRIBUTES};
use super::BufferId;

// ===== INDEX TYPE =====

/// Element type of an index buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexType {
    U8,
    U16,
    #[default]
    U32,
}

impl IndexType {
    /// Size of one index in bytes
    pub fn size_bytes(&self) -> u64 {
        match self {
            IndexType::U8 => 1,
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }

    /// Decode one little-endian index; `bytes` holds exactly `size_bytes()` bytes
    pub fn decode(&self, bytes: &[u8]) -> u32 {
        match self {
            IndexType::U8 => bytes[0] as u32,
            IndexType::U16 => u16::from_le_bytes([bytes[0], bytes[1]]) as u32,
            IndexType::U32 => u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        }
    }
}

// ===== HEAD =====

/// One attribute reading head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Head {
    /// Whether the head copies data into its input slot
    pub enabled: bool,
    /// Attribute type read (decides how many bytes are read)
    pub attribute_type: AttributeType,
    /// Distance in bytes between consecutive vertices
    pub stride: u64,
    /// Byte offset of vertex 0
    pub offset: u64,
    /// Source buffer
    pub buffer: BufferId,
}

impl Head {
    /// Byte offset of the attribute of vertex `index`, or None on overflow
    pub fn byte_offset(&self, index: u32) -> Option<u64> {
        (index as u64).checked_mul(self.stride)?.checked_add(self.offset)
    }
}

// ===== INDEXING =====

/// Index-buffer indirection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Indexing {
    pub enabled: bool,
    pub index_type: IndexType,
    pub buffer: BufferId,
}

// ===== VERTEX PULLER =====

/// Vertex fetch configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VertexPuller {
    heads: [Head; MAX_ATTRIBUTES],
    indexing: Indexing,
}

impl VertexPuller {
    /// Create a table with every head disabled and indexing off
    pub fn new() -> Self {
        Self::default()
    }

    /// Head at `index` (None if out of range)
    pub fn head(&self, index: u32) -> Option<&Head> {
        self.heads.get(index as usize)
    }

    /// All heads in slot order
    pub fn heads(&self) -> &[Head; MAX_ATTRIBUTES] {
        &self.heads
    }

    /// Indexing descriptor
    pub fn indexing(&self) -> &Indexing {
        &self.indexing
    }

    /// Configure a head without changing its enabled flag
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `index >= MAX_ATTRIBUTES`.
    pub fn set_head(
        &mut self,
        index: u32,
        attribute_type: AttributeType,
        stride: u64,
        offset: u64,
        buffer: BufferId,
    ) -> Result<()> {
        let head = self.head_mut(index)?;
        head.attribute_type = attribute_type;
        head.stride = stride;
        head.offset = offset;
        head.buffer = buffer;
        Ok(())
    }

    /// Enable a head
    pub fn enable_head(&mut self, index: u32) -> Result<()> {
        self.head_mut(index)?.enabled = true;
        Ok(())
    }

    /// Disable a head
    pub fn disable_head(&mut self, index: u32) -> Result<()> {
        self.head_mut(index)?.enabled = false;
        Ok(())
    }

    /// Turn index-buffer indirection on
    pub fn set_indexing(&mut self, index_type: IndexType, buffer: BufferId) {
        self.indexing = Indexing {
            enabled: true,
            index_type,
            buffer,
        };
    }

    /// Turn index-buffer indirection off (type and buffer are kept)
    pub fn disable_indexing(&mut self) {
        self.indexing.enabled = false;
    }

    fn head_mut(&mut self, index: u32) -> Result<&mut Head> {
        match self.heads.get_mut(index as usize) {
            Some(head) => Ok(head),
            None => gpu_bail!(OutOfRange, "softgpu::VertexPuller",
                "Head {} out of range (max {})", index, MAX_ATTRIBUTES),
        }
    }
}

#[cfg(test)]
#[path = "vertex_puller_tests.rs"]
mod tests;
