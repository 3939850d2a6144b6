pub mod pool_monitor;
pub mod runner;

pub use pool_monitor::{PoolHealth, PoolMonitorJob};
pub use runner::JobRunner;
