//! Run configuration for the verification harness.
//!
//! All values come from CLI flags; the shims themselves read no configuration.

use std::time::Duration;

use fortify_shim_core::poll::WaitTimeout;

use crate::error::HarnessError;

/// Default root seed for generated regions.
pub const DEFAULT_SEED: u64 = 0xF0_27_1F_5E;

/// Tunables for a verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Root seed for the deterministic input stream.
    pub seed: u64,
    /// Generated cases per randomized property.
    pub trials: u32,
    /// Upper bound on generated region length.
    pub max_region_len: usize,
    /// Timeout used by the empty-wait properties, in milliseconds.
    pub wait_timeout_ms: u32,
    /// How far past the timeout an empty wait may return and still pass.
    pub tolerance_ms: u32,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            trials: 256,
            max_region_len: 512,
            wait_timeout_ms: 50,
            tolerance_ms: 500,
        }
    }
}

impl HarnessConfig {
    /// Configured empty-wait timeout. Zero means an immediate poll.
    #[must_use]
    pub fn wait_timeout(&self) -> WaitTimeout {
        WaitTimeout::from_raw(i32::try_from(self.wait_timeout_ms).unwrap_or(i32::MAX))
    }

    /// Slack allowed past a timeout before a wait counts as late.
    #[must_use]
    pub fn tolerance(&self) -> Duration {
        Duration::from_millis(u64::from(self.tolerance_ms))
    }
}

/// Parse a seed given as decimal or `0x`-prefixed hex. `_` separators allowed.
pub fn parse_seed(raw: &str) -> Result<u64, HarnessError> {
    let cleaned: String = raw.trim().chars().filter(|&c| c != '_').collect();
    let parsed = match cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => cleaned.parse::<u64>(),
    };
    parsed.map_err(|_| HarnessError::InvalidSeed(raw.to_string()))
}
