use hermes_dns_domain::JobsConfig;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Snapshot taken by one monitor tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolHealth {
    pub size: u32,
    pub idle: u32,
    pub in_use: u32,
    pub reachable: bool,
}

/// Watches the read pool: pings the store and reports connection usage.
pub struct PoolMonitorJob {
    pool: SqlitePool,
    interval_secs: u64,
    warn_threshold: u32,
    shutdown: CancellationToken,
}

impl PoolMonitorJob {
    pub fn new(pool: SqlitePool, interval_secs: u64) -> Self {
        Self {
            pool,
            interval_secs,
            warn_threshold: 10,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn from_config(pool: SqlitePool, cfg: &JobsConfig) -> Self {
        Self::new(pool, cfg.pool_monitor_interval_secs)
            .with_warn_threshold(cfg.pool_wait_warn_threshold)
    }

    pub fn with_warn_threshold(mut self, threshold: u32) -> Self {
        self.warn_threshold = threshold;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn check(&self) -> PoolHealth {
        let ping = tokio::time::timeout(PING_TIMEOUT, sqlx::query("SELECT 1").execute(&self.pool));
        let reachable = match ping.await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                warn!(error = %e, "Database health check failed");
                false
            }
            Err(_) => {
                warn!(
                    timeout_secs = PING_TIMEOUT.as_secs(),
                    "Database health check timed out"
                );
                false
            }
        };

        let size = self.pool.size();
        let idle = u32::try_from(self.pool.num_idle()).unwrap_or(u32::MAX);
        let in_use = size.saturating_sub(idle);

        debug!(size, idle, in_use, reachable, "Connection pool status");
        if in_use >= self.warn_threshold {
            warn!(
                in_use,
                threshold = self.warn_threshold,
                "Connection pool under pressure"
            );
        }

        PoolHealth {
            size,
            idle,
            in_use,
            reachable,
        }
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            warn_threshold = self.warn_threshold,
            "Starting connection pool monitor"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("PoolMonitorJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        self.check().await;
                    }
                }
            }
        });
    }
}
