/// Vertex fetch stage
///
/// Resolves every buffer the bound vertex puller references once per draw,
/// then builds `InVertex` records on demand. Every read is bounds checked
/// against the buffer it comes from.

use crate::error::Result;
use crate::gpu_bail;
use crate::resource::{Buffer, Head, IndexType, ResourceStore, VertexPuller};
use crate::shader::{Attribute, InVertex};

/// Head resolved against its source buffer
struct BoundHead<'a> {
    slot: usize,
    head: &'a Head,
    buffer: &'a Buffer,
}

/// Per-draw vertex fetcher
pub struct VertexFetch<'a> {
    heads: Vec<BoundHead<'a>>,
    indices: Option<(IndexType, &'a Buffer)>,
}

impl<'a> VertexFetch<'a> {
    /// Resolve the buffers used by `puller`
    ///
    /// # Errors
    ///
    /// Returns `InvalidResource` if an enabled head or the enabled index buffer
    /// names a buffer that does not exist.
    pub fn new(puller: &'a VertexPuller, store: &'a ResourceStore) -> Result<Self> {
        let mut heads = Vec::new();
        for (slot, head) in puller.heads().iter().enumerate() {
            if !head.enabled || head.attribute_type.size_bytes() == 0 {
                continue;
            }
            let buffer = store.buffer(head.buffer)?;
            heads.push(BoundHead { slot, head, buffer });
        }

        let indexing = puller.indexing();
        let indices = if indexing.enabled {
            Some((indexing.index_type, store.buffer(indexing.buffer)?))
        } else {
            None
        };

        Ok(Self { heads, indices })
    }

    /// True vertex index of draw ordinal `ordinal`
    pub fn vertex_index(&self, ordinal: u32) -> Result<u32> {
        match self.indices {
            Some((index_type, buffer)) => {
                let size = index_type.size_bytes();
                let offset = match (ordinal as u64).checked_mul(size) {
                    Some(offset) => offset,
                    None => gpu_bail!(OutOfRange, "softgpu::VertexFetch",
                        "Index {} overflows the index buffer", ordinal),
                };
                Ok(index_type.decode(buffer.slice(offset, size)?))
            }
            None => Ok(ordinal),
        }
    }

    /// Build the input vertex of draw ordinal `ordinal`
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the index or any attribute lies outside its buffer.
    pub fn fetch(&self, ordinal: u32) -> Result<InVertex> {
        let vertex_id = self.vertex_index(ordinal)?;
        let mut vertex = InVertex::new(vertex_id);

        for bound in &self.heads {
            let ty = bound.head.attribute_type;
            let offset = match bound.head.byte_offset(vertex_id) {
                Some(offset) => offset,
                None => gpu_bail!(OutOfRange, "softgpu::VertexFetch",
                    "Head {} offset overflows for vertex {}", bound.slot, vertex_id),
            };
            let bytes = bound.buffer.slice(offset, ty.size_bytes())?;
            vertex.attributes[bound.slot] = Attribute::from_bytes(ty, bytes);
        }

        Ok(vertex)
    }
}

#[cfg(test)]
#[path = "vertex_fetch_tests.rs"]
mod tests;
