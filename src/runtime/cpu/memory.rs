//! Host memory accounting for the CPU device

use crate::error::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Tracks live and peak bytes for one CPU device, with an optional ceiling
///
/// Shared by every clone of a [`super::CpuDevice`]. Allocations that would push
/// live bytes past the limit fail with `Error::OutOfMemory` before touching the
/// system allocator.
#[derive(Debug, Default)]
pub struct MemoryTracker {
    live: AtomicUsize,
    peak: AtomicUsize,
    limit: Option<usize>,
}

impl MemoryTracker {
    /// Create a tracker without a limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker that refuses to go above `limit` live bytes
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Reserve `size` bytes, failing if the limit would be exceeded
    pub fn reserve(&self, size: usize) -> Result<()> {
        let mut current = self.live.load(Ordering::Relaxed);
        loop {
            let next = current
                .checked_add(size)
                .ok_or(Error::OutOfMemory { size })?;
            if self.limit.is_some_and(|limit| next > limit) {
                return Err(Error::OutOfMemory { size });
            }
            match self.live.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    self.peak.fetch_max(next, Ordering::Relaxed);
                    return Ok(());
                }
                Err(actual) => current = actual,
            }
        }
    }

    /// Return `size` bytes previously reserved
    pub fn release(&self, size: usize) {
        self.live.fetch_sub(size, Ordering::AcqRel);
    }

    /// Bytes currently reserved
    pub fn live_bytes(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }

    /// Highest value `live_bytes` has reached
    pub fn peak_bytes(&self) -> usize {
        self.peak.load(Ordering::Acquire)
    }

    /// Configured ceiling, if any
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_release() {
        let tracker = MemoryTracker::new();
        tracker.reserve(100).unwrap();
        tracker.reserve(50).unwrap();
        assert_eq!(tracker.live_bytes(), 150);

        tracker.release(100);
        assert_eq!(tracker.live_bytes(), 50);
        assert_eq!(tracker.peak_bytes(), 150);
    }

    #[test]
    fn test_limit() {
        let tracker = MemoryTracker::with_limit(64);
        tracker.reserve(48).unwrap();

        let err = tracker.reserve(32).unwrap_err();
        assert!(matches!(err, Error::OutOfMemory { size: 32 }));
        // Failed reservation leaves the count untouched
        assert_eq!(tracker.live_bytes(), 48);

        tracker.release(48);
        tracker.reserve(64).unwrap();
        assert_eq!(tracker.limit(), Some(64));
    }
}
