/// Central resource tables of a `Gpu` context.
///
/// Buffers, vertex pullers and programs live in id-keyed hash tables. Each
/// kind draws ids from its own `IdAllocator`, so ids only grow and a deleted
/// id is never handed out again.

use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::utils::IdAllocator;
use crate::{gpu_bail, gpu_err, gpu_error};
use super::{Buffer, BufferId, VertexPuller, VertexPullerId, Program, ProgramId};

#[derive(Debug, Default)]
pub struct ResourceStore {
    buffers: FxHashMap<BufferId, Buffer>,
    buffer_ids: IdAllocator,

    vertex_pullers: FxHashMap<VertexPullerId, VertexPuller>,
    vertex_puller_ids: IdAllocator,

    programs: FxHashMap<ProgramId, Program>,
    program_ids: IdAllocator,
}

impl ResourceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // ===== BUFFERS =====

    /// Allocate a zero-filled buffer of `size` bytes
    pub fn create_buffer(&mut self, size: u64) -> Result<BufferId> {
        let buffer = Buffer::new(size)?;
        let id = BufferId(Self::next_id(&mut self.buffer_ids, "buffer")?);
        self.buffers.insert(id, buffer);
        Ok(id)
    }

    /// Free a buffer
    pub fn delete_buffer(&mut self, id: BufferId) -> Result<()> {
        match self.buffers.remove(&id) {
            Some(_) => {
                self.buffer_ids.release(id.raw());
                Ok(())
            }
            None => gpu_bail!("softgpu::ResourceStore", "{} not found", id),
        }
    }

    pub fn buffer(&self, id: BufferId) -> Result<&Buffer> {
        self.buffers.get(&id)
            .ok_or_else(|| gpu_err!("softgpu::ResourceStore", "{} not found", id))
    }

    pub fn buffer_mut(&mut self, id: BufferId) -> Result<&mut Buffer> {
        self.buffers.get_mut(&id)
            .ok_or_else(|| gpu_err!("softgpu::ResourceStore", "{} not found", id))
    }

    pub fn has_buffer(&self, id: BufferId) -> bool {
        self.buffers.contains_key(&id)
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    // ===== VERTEX PULLERS =====

    /// Create a vertex puller with every head disabled
    pub fn create_vertex_puller(&mut self) -> Result<VertexPullerId> {
        let id = VertexPullerId(Self::next_id(&mut self.vertex_puller_ids, "vertex puller")?);
        self.vertex_pullers.insert(id, VertexPuller::new());
        Ok(id)
    }

    pub fn delete_vertex_puller(&mut self, id: VertexPullerId) -> Result<()> {
        match self.vertex_pullers.remove(&id) {
            Some(_) => {
                self.vertex_puller_ids.release(id.raw());
                Ok(())
            }
            None => gpu_bail!("softgpu::ResourceStore", "{} not found", id),
        }
    }

    pub fn vertex_puller(&self, id: VertexPullerId) -> Result<&VertexPuller> {
        self.vertex_pullers.get(&id)
            .ok_or_else(|| gpu_err!("softgpu::ResourceStore", "{} not found", id))
    }

    pub fn vertex_puller_mut(&mut self, id: VertexPullerId) -> Result<&mut VertexPuller> {
        self.vertex_pullers.get_mut(&id)
            .ok_or_else(|| gpu_err!("softgpu::ResourceStore", "{} not found", id))
    }

    pub fn has_vertex_puller(&self, id: VertexPullerId) -> bool {
        self.vertex_pullers.contains_key(&id)
    }

    pub fn vertex_puller_count(&self) -> usize {
        self.vertex_pullers.len()
    }

    // ===== PROGRAMS =====

    /// Create a program with no shaders attached
    pub fn create_program(&mut self) -> Result<ProgramId> {
        let id = ProgramId(Self::next_id(&mut self.program_ids, "program")?);
        self.programs.insert(id, Program::new());
        Ok(id)
    }

    pub fn delete_program(&mut self, id: ProgramId) -> Result<()> {
        match self.programs.remove(&id) {
            Some(_) => {
                self.program_ids.release(id.raw());
                Ok(())
            }
            None => gpu_bail!("softgpu::ResourceStore", "{} not found", id),
        }
    }

    pub fn program(&self, id: ProgramId) -> Result<&Program> {
        self.programs.get(&id)
            .ok_or_else(|| gpu_err!("softgpu::ResourceStore", "{} not found", id))
    }

    pub fn program_mut(&mut self, id: ProgramId) -> Result<&mut Program> {
        self.programs.get_mut(&id)
            .ok_or_else(|| gpu_err!("softgpu::ResourceStore", "{} not found", id))
    }

    pub fn has_program(&self, id: ProgramId) -> bool {
        self.programs.contains_key(&id)
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    // ===== INTERNAL =====

    fn next_id(ids: &mut IdAllocator, kind: &str) -> Result<u64> {
        ids.alloc().ok_or_else(|| {
            gpu_error!("softgpu::ResourceStore", "Ran out of {} ids", kind);
            Error::OutOfMemory
        })
    }
}

#[cfg(test)]
#[path = "resource_store_tests.rs"]
mod tests;
