//! Next-hop ID allocation.
//!
//! IDs are unique for the lifetime of one [`NextHopIdAllocator`]. Nothing is
//! persisted, so a restarted process starts over at 1 unless the caller seeds
//! the allocator with [`NextHopIdAllocator::starting_after`].

use std::sync::atomic::{AtomicU32, Ordering};

use tracing::debug;

use crate::error::{NhMgrError, NhMgrResult};
use crate::types::NextHopId;

/// Issues monotonically increasing next-hop IDs.
///
/// Shared between tasks through an `Arc`; increment-and-read is a single
/// atomic step. IDs are never reclaimed.
#[derive(Debug, Default)]
pub struct NextHopIdAllocator {
    /// Last issued ID, 0 before the first call.
    last: AtomicU32,
}

impl NextHopIdAllocator {
    /// Creates an allocator whose first ID is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator whose first ID is `last + 1`.
    pub fn starting_after(last: NextHopId) -> Self {
        Self {
            last: AtomicU32::new(last),
        }
    }

    /// Returns a fresh ID, greater than every ID issued before it.
    ///
    /// Fails with [`NhMgrError::IdSpaceExhausted`] once `u32::MAX` has been
    /// issued; the counter never wraps back to 0.
    pub fn next_id(&self) -> NhMgrResult<NextHopId> {
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                current.checked_add(1)
            })
            .map_err(|last| NhMgrError::IdSpaceExhausted { last })?;

        let id = previous + 1;
        debug!("Allocated next-hop ID {}", id);
        Ok(id)
    }

    /// Returns the most recently issued ID, or 0 if none was issued.
    pub fn last_issued(&self) -> NextHopId {
        self.last.load(Ordering::SeqCst)
    }
}
