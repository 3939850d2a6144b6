use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An administrative namespace the store is authoritative for.
///
/// Names are stored fully qualified (`example.com.`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: Option<i64>,
    pub name: Arc<str>,
    pub serial: u32,
    pub description: Option<Arc<str>>,
    pub active: bool,
}
