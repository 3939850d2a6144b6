use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,

    #[serde(default = "default_read_pool_max_connections")]
    pub read_pool_max_connections: u32,

    /// Connections kept open while idle. Capped at the pool maximum.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_max_lifetime_secs")]
    pub max_lifetime_secs: u64,

    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,

    /// Apply embedded schema migrations at startup.
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            read_pool_max_connections: default_read_pool_max_connections(),
            min_connections: default_min_connections(),
            max_lifetime_secs: default_max_lifetime_secs(),
            idle_timeout_secs: default_idle_timeout_secs(),
            busy_timeout_secs: default_busy_timeout_secs(),
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        if self.path.starts_with("sqlite:") {
            self.path.clone()
        } else {
            format!("sqlite:{}", self.path)
        }
    }

    pub fn effective_min_connections(&self) -> u32 {
        self.min_connections.min(self.read_pool_max_connections)
    }
}

fn default_db_path() -> String {
    "./hermes-dns.db".to_string()
}

fn default_true() -> bool {
    true
}

fn default_read_pool_max_connections() -> u32 {
    25
}

fn default_min_connections() -> u32 {
    10
}

fn default_max_lifetime_secs() -> u64 {
    300
}

fn default_idle_timeout_secs() -> u64 {
    60
}

fn default_busy_timeout_secs() -> u64 {
    5
}
