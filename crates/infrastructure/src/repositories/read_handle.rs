use sqlx::{Sqlite, SqlitePool, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Where a repository sends its reads.
///
/// `Snapshot` repositories share one open read transaction, so every read
/// made through them sees the same database state.
#[derive(Clone)]
pub enum ReadHandle {
    Pool(SqlitePool),
    Snapshot(Arc<Mutex<Transaction<'static, Sqlite>>>),
}

impl From<SqlitePool> for ReadHandle {
    fn from(pool: SqlitePool) -> Self {
        ReadHandle::Pool(pool)
    }
}

/// Runs `$body` with `$exec` bound to an executor for `$handle`.
macro_rules! with_executor {
    ($handle:expr, |$exec:ident| $body:expr) => {
        match $handle {
            $crate::repositories::ReadHandle::Pool(pool) => {
                let $exec = pool;
                $body
            }
            $crate::repositories::ReadHandle::Snapshot(tx) => {
                let mut guard = tx.lock().await;
                let $exec = &mut **guard;
                $body
            }
        }
    };
}

pub(crate) use with_executor;
