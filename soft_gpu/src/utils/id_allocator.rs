/// Hands out strictly increasing `u64` identifiers.
///
/// Unlike a recycling slot pool, released identifiers are never handed out
/// again, so a stale handle can never alias a newer resource. `0` is reserved
/// as the empty id and is never returned.
///
/// # Example
///
/// ```ignore
/// let mut ids = IdAllocator::new();
/// let a = ids.alloc();  // 1
/// let b = ids.alloc();  // 2
/// ids.release(a);
/// let c = ids.alloc();  // 3 (1 is not recycled)
/// ```
#[derive(Debug)]
pub struct IdAllocator {
    next_id: u64,
    live: u64,
}

impl IdAllocator {
    /// Create a new allocator; the first id is 1
    pub fn new() -> Self {
        Self {
            next_id: 1,
            live: 0,
        }
    }

    /// Allocate the next identifier
    ///
    /// Returns `None` once the id space is exhausted.
    pub fn alloc(&mut self) -> Option<u64> {
        let id = self.next_id;
        self.next_id = self.next_id.checked_add(1)?;
        self.live += 1;
        Some(id)
    }

    /// Mark an identifier as no longer live
    pub fn release(&mut self, id: u64) {
        debug_assert!(id != 0 && id < self.next_id, "releasing an unallocated id: {}", id);
        self.live = self.live.saturating_sub(1);
    }

    /// Highest identifier ever returned (0 if none)
    pub fn last_id(&self) -> u64 {
        self.next_id - 1
    }

    /// Number of identifiers currently live
    pub fn len(&self) -> u64 {
        self.live
    }

    /// Whether no identifiers are currently live
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "id_allocator_tests.rs"]
mod tests;
