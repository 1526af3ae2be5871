//! Kernel configuration
//!
//! The accumulation kernel takes its strategy switch as an explicit
//! [`KernelConfig`] value. [`KernelConfig::global`] offers a process-wide value
//! read once from the environment for callers that want one.

use std::fmt;
use std::sync::OnceLock;

/// Environment variable read by [`KernelConfig::from_env`]
pub const SCATTER_MEMORY_ENV: &str = "ADDN_USE_SCATTER_MEMORY";

/// How `add_n` computes its sum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccumulateStrategy {
    /// Chain of binary adds, one fresh intermediate buffer per step
    PairwiseReduction,
    /// One call to the fused `"sum"` operator
    FusedDispatch,
}

impl fmt::Display for AccumulateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccumulateStrategy::PairwiseReduction => write!(f, "pairwise"),
            AccumulateStrategy::FusedDispatch => write!(f, "fused"),
        }
    }
}

/// Configuration for the accumulation kernel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KernelConfig {
    /// Sum through scatter (per-step) buffers instead of the fused operator
    pub use_scatter_memory: bool,
}

impl KernelConfig {
    /// Set `use_scatter_memory`
    pub fn with_scatter_memory(mut self, enabled: bool) -> Self {
        self.use_scatter_memory = enabled;
        self
    }

    /// Strategy selected by this configuration
    pub fn strategy(&self) -> AccumulateStrategy {
        if self.use_scatter_memory {
            AccumulateStrategy::PairwiseReduction
        } else {
            AccumulateStrategy::FusedDispatch
        }
    }

    /// Read the configuration from the environment
    ///
    /// `ADDN_USE_SCATTER_MEMORY` set to `1`, `true`, `yes` or `on` (any case)
    /// enables scatter memory; any other value disables it. Unset keeps the
    /// default.
    pub fn from_env() -> Self {
        match std::env::var(SCATTER_MEMORY_ENV) {
            Ok(value) => Self::default().with_scatter_memory(parse_flag(&value)),
            Err(_) => Self::default(),
        }
    }

    /// Process-wide configuration, read from the environment on first use
    pub fn global() -> &'static KernelConfig {
        static GLOBAL: OnceLock<KernelConfig> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let config = Self::from_env();
            log::debug!("kernel config: {} strategy", config.strategy());
            config
        })
    }
}

/// Parse a boolean environment flag
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
