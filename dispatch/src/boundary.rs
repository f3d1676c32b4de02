//! Buffer ledger — liveness tracking for buffers handed to the host.
//!
//! Every response buffer the boundary adapter issues is recorded here
//! and must be released exactly once. A release of an unrecognized or
//! already-released reference is a detectable misuse fault, never
//! memory corruption: the adapter consults the ledger before freeing
//! anything.

use alloc::collections::BTreeMap;

use gateway_primitives::{FatalFault, MisuseFault};

/// An opaque buffer reference: pointer and length as the host sees them.
pub type BufferRef = (usize, usize);

/// Tracks the buffers currently owned by the host.
#[derive(Debug, Clone, Default)]
pub struct BufferLedger {
    live: BTreeMap<usize, usize>,
}

impl BufferLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            live: BTreeMap::new(),
        }
    }

    /// Record a buffer handed to the host.
    ///
    /// The same pointer appearing twice means the allocator returned a
    /// region that is still recorded as live — a broken invariant, not
    /// a host mistake.
    pub fn issue(&mut self, ptr: usize, len: usize) -> Result<(), FatalFault> {
        if self.live.insert(ptr, len).is_some() {
            return Err(FatalFault::InvariantViolation(
                "issued buffer pointer already live",
            ));
        }
        Ok(())
    }

    /// Reclaim a buffer the host is releasing.
    ///
    /// Succeeds exactly once per issued reference; the pointer must be
    /// known and the length must match what was issued.
    pub fn reclaim(&mut self, ptr: usize, len: usize) -> Result<(), MisuseFault> {
        match self.live.get(&ptr) {
            Some(&issued_len) if issued_len == len => {
                self.live.remove(&ptr);
                Ok(())
            }
            _ => Err(MisuseFault::InvalidRelease),
        }
    }

    /// Whether a reference is currently live.
    pub fn is_live(&self, ptr: usize, len: usize) -> bool {
        self.live.get(&ptr) == Some(&len)
    }

    /// Number of outstanding buffers.
    pub fn outstanding(&self) -> usize {
        self.live.len()
    }
}
