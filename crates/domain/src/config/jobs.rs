use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JobsConfig {
    #[serde(default = "default_pool_monitor_interval_secs")]
    pub pool_monitor_interval_secs: u64,

    /// Checked-out connection count at which the pool monitor starts warning.
    #[serde(default = "default_pool_wait_warn_threshold")]
    pub pool_wait_warn_threshold: u32,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            pool_monitor_interval_secs: default_pool_monitor_interval_secs(),
            pool_wait_warn_threshold: default_pool_wait_warn_threshold(),
        }
    }
}

fn default_pool_monitor_interval_secs() -> u64 {
    30
}

fn default_pool_wait_warn_threshold() -> u32 {
    10
}
