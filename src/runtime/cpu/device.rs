//! CPU device implementation

use super::memory::MemoryTracker;
use crate::runtime::Device;
use std::sync::Arc;

/// CPU device (there's only one: the host CPU)
///
/// Clones share one [`MemoryTracker`], so every buffer allocated through any
/// clone is accounted against the same budget.
#[derive(Clone, Debug, Default)]
pub struct CpuDevice {
    id: usize,
    memory: Arc<MemoryTracker>,
}

impl CpuDevice {
    /// Create a new CPU device with unlimited memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a CPU device whose live allocations may not exceed `bytes`
    pub fn with_memory_limit(bytes: usize) -> Self {
        Self {
            id: 0,
            memory: Arc::new(MemoryTracker::with_limit(bytes)),
        }
    }

    /// Memory accounting for this device
    pub fn memory(&self) -> &MemoryTracker {
        &self.memory
    }
}

impl Device for CpuDevice {
    fn id(&self) -> usize {
        self.id
    }

    fn name(&self) -> String {
        "cpu".to_string()
    }
}
