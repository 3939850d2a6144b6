pub mod record_query_repository;
pub mod store;
pub mod zone_repository;

mod name_forms;
mod read_handle;

pub use read_handle::ReadHandle;
pub use record_query_repository::SqliteRecordQueryRepository;
pub use store::SqliteStore;
pub use zone_repository::SqliteZoneCatalog;
