/// Host-side byte buffer
///
/// A `Buffer` is a fixed-size, zero-initialized byte arena. Data moves in and
/// out through offset/length copies; every access is bounds checked so a bad
/// offset can never touch memory outside the allocation.

use std::ops::Range;
use crate::error::{Error, Result};
use crate::{gpu_bail, gpu_error};

/// Fixed-size byte storage
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Allocate a zero-filled buffer of `size` bytes
    ///
    /// # Errors
    ///
    /// Returns `OutOfMemory` if the host allocation fails.
    pub fn new(size: u64) -> Result<Self> {
        let len = usize::try_from(size).map_err(|_| {
            gpu_error!("softgpu::Buffer", "Buffer size {} exceeds the address space", size);
            Error::OutOfMemory
        })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            gpu_error!("softgpu::Buffer", "Failed to allocate {} bytes: {}", size, e);
            Error::OutOfMemory
        })?;
        data.resize(len, 0);

        Ok(Self { data })
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Whole content
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Copy `bytes` into the buffer starting at `offset`
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the write would end past the buffer; nothing is written.
    pub fn write(&mut self, offset: u64, bytes: &[u8]) -> Result<()> {
        let range = self.range(offset, bytes.len() as u64)?;
        self.data[range].copy_from_slice(bytes);
        Ok(())
    }

    /// Copy `dst.len()` bytes starting at `offset` into `dst`
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the read would end past the buffer; `dst` is untouched.
    pub fn read(&self, offset: u64, dst: &mut [u8]) -> Result<()> {
        let range = self.range(offset, dst.len() as u64)?;
        dst.copy_from_slice(&self.data[range]);
        Ok(())
    }

    /// Borrow `len` bytes starting at `offset`
    pub fn slice(&self, offset: u64, len: u64) -> Result<&[u8]> {
        let range = self.range(offset, len)?;
        Ok(&self.data[range])
    }

    fn range(&self, offset: u64, len: u64) -> Result<Range<usize>> {
        match offset.checked_add(len) {
            Some(end) if end <= self.size() => Ok(offset as usize..end as usize),
            _ => gpu_bail!(OutOfRange, "softgpu::Buffer",
                "Access of {} bytes at offset {} exceeds buffer size {}", len, offset, self.size()),
        }
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
