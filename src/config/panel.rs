//! Panel runner and aggregation configuration

use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::error::ValidationError;

/// Panel runner configuration
///
/// Passed explicitly into the panel runner and aggregator; the roster and
/// default cluster weights live in the domain layer, this section only
/// carries run-time knobs and optional weight overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelConfig {
    /// Maximum role evaluations in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-role call timeout in seconds (timeout counts as a role failure)
    #[serde(default = "default_role_timeout")]
    pub role_timeout_secs: u64,

    /// Transient-error retry budget per role
    #[serde(default = "default_transient_retries")]
    pub max_transient_retries: u32,

    /// Optional cluster weight overrides, keyed by cluster name
    #[serde(default)]
    pub weight_overrides: HashMap<String, u32>,
}

impl PanelConfig {
    /// Get per-role timeout as Duration
    pub fn role_timeout(&self) -> Duration {
        Duration::from_secs(self.role_timeout_secs)
    }

    /// Validate panel configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.concurrency == 0 || self.concurrency > 64 {
            return Err(ValidationError::InvalidConcurrency);
        }
        if self.role_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            role_timeout_secs: default_role_timeout(),
            max_transient_retries: default_transient_retries(),
            weight_overrides: HashMap::new(),
        }
    }
}

fn default_concurrency() -> usize {
    8
}

fn default_role_timeout() -> u64 {
    45
}

fn default_transient_retries() -> u32 {
    2
}
