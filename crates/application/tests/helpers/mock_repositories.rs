#![allow(dead_code)]

use async_trait::async_trait;
use hermes_dns_application::ports::{
    RecordQueryPort, SnapshotProvider, StoreSnapshot, ZoneCatalog,
};
use hermes_dns_domain::{
    ARow, AaaaRow, CaaRow, CnameRow, DomainError, MxRow, NsRow, RecordType, SoaRow, SrvRow,
    TxtRow,
};
use std::collections::{HashMap, HashSet};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

type Key = (String, String);

fn key(zone: &str, name: &str) -> Key {
    (zone.to_lowercase(), name.to_lowercase())
}

#[derive(Default)]
struct Tables {
    a: HashMap<Key, Vec<ARow>>,
    aaaa: HashMap<Key, Vec<AaaaRow>>,
    cname: HashMap<Key, Vec<CnameRow>>,
    mx: HashMap<Key, Vec<MxRow>>,
    txt: HashMap<Key, Vec<TxtRow>>,
    ns: HashMap<Key, Vec<NsRow>>,
    srv: HashMap<Key, Vec<SrvRow>>,
    caa: HashMap<Key, Vec<CaaRow>>,
    soa: HashMap<String, SoaRow>,
}

/// In-memory record store keyed by (zone apex, relative owner name).
///
/// Rows are returned in insertion order; callers seed MX and SRV rows
/// already ordered the way the store would return them.
#[derive(Clone, Default)]
pub struct MockRecordQueryPort {
    tables: Arc<RwLock<Tables>>,
    failures: Arc<RwLock<HashMap<RecordType, DomainError>>>,
    delay: Arc<RwLock<Option<Duration>>>,
    calls: Arc<Mutex<Vec<(RecordType, String, String)>>>,
}

impl MockRecordQueryPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_a(&self, zone: &str, name: &str, address: &str, ttl: u32) {
        let address: Ipv4Addr = address.parse().unwrap();
        self.tables
            .write()
            .unwrap()
            .a
            .entry(key(zone, name))
            .or_default()
            .push(ARow { address, ttl });
    }

    pub fn add_aaaa(&self, zone: &str, name: &str, address: &str, ttl: u32) {
        let address: Ipv6Addr = address.parse().unwrap();
        self.tables
            .write()
            .unwrap()
            .aaaa
            .entry(key(zone, name))
            .or_default()
            .push(AaaaRow { address, ttl });
    }

    pub fn add_cname(&self, zone: &str, name: &str, target: &str, ttl: u32) {
        self.tables
            .write()
            .unwrap()
            .cname
            .entry(key(zone, name))
            .or_default()
            .push(CnameRow {
                target: target.to_string(),
                ttl,
            });
    }

    pub fn add_mx(&self, zone: &str, name: &str, host: &str, priority: u16, ttl: u32) {
        self.tables
            .write()
            .unwrap()
            .mx
            .entry(key(zone, name))
            .or_default()
            .push(MxRow {
                host: host.to_string(),
                priority,
                ttl,
            });
    }

    pub fn add_txt(&self, zone: &str, name: &str, text: &str, ttl: u32) {
        self.tables
            .write()
            .unwrap()
            .txt
            .entry(key(zone, name))
            .or_default()
            .push(TxtRow {
                text: text.to_string(),
                ttl,
            });
    }

    pub fn add_ns(&self, zone: &str, name: &str, name_server: &str, ttl: u32) {
        self.tables
            .write()
            .unwrap()
            .ns
            .entry(key(zone, name))
            .or_default()
            .push(NsRow {
                name_server: name_server.to_string(),
                ttl,
            });
    }

    pub fn add_srv(&self, zone: &str, name: &str, row: SrvRow) {
        self.tables
            .write()
            .unwrap()
            .srv
            .entry(key(zone, name))
            .or_default()
            .push(row);
    }

    pub fn add_caa(&self, zone: &str, name: &str, flag: u8, tag: &str, value: &str, ttl: u32) {
        self.tables
            .write()
            .unwrap()
            .caa
            .entry(key(zone, name))
            .or_default()
            .push(CaaRow {
                flag,
                tag: tag.to_string(),
                value: value.to_string(),
                ttl,
            });
    }

    pub fn set_soa(&self, zone: &str, row: SoaRow) {
        self.tables
            .write()
            .unwrap()
            .soa
            .insert(zone.to_lowercase(), row);
    }

    pub fn fail_on(&self, record_type: RecordType, error: DomainError) {
        self.failures.write().unwrap().insert(record_type, error);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.write().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<(RecordType, String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, record_type: RecordType) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _, _)| *t == record_type)
            .count()
    }

    async fn enter(&self, record_type: RecordType, zone: &str, name: &str) -> Result<(), DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((record_type, zone.to_string(), name.to_string()));

        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.failures.read().unwrap().get(&record_type) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecordQueryPort for MockRecordQueryPort {
    async fn query_a(&self, zone: &str, name: &str) -> Result<Vec<ARow>, DomainError> {
        self.enter(RecordType::A, zone, name).await?;
        let tables = self.tables.read().unwrap();
        Ok(tables.a.get(&key(zone, name)).cloned().unwrap_or_default())
    }

    async fn query_aaaa(&self, zone: &str, name: &str) -> Result<Vec<AaaaRow>, DomainError> {
        self.enter(RecordType::AAAA, zone, name).await?;
        let tables = self.tables.read().unwrap();
        Ok(tables.aaaa.get(&key(zone, name)).cloned().unwrap_or_default())
    }

    async fn query_cname(&self, zone: &str, name: &str) -> Result<Vec<CnameRow>, DomainError> {
        self.enter(RecordType::CNAME, zone, name).await?;
        let tables = self.tables.read().unwrap();
        Ok(tables.cname.get(&key(zone, name)).cloned().unwrap_or_default())
    }

    async fn query_mx(&self, zone: &str, name: &str) -> Result<Vec<MxRow>, DomainError> {
        self.enter(RecordType::MX, zone, name).await?;
        let tables = self.tables.read().unwrap();
        Ok(tables.mx.get(&key(zone, name)).cloned().unwrap_or_default())
    }

    async fn query_txt(&self, zone: &str, name: &str) -> Result<Vec<TxtRow>, DomainError> {
        self.enter(RecordType::TXT, zone, name).await?;
        let tables = self.tables.read().unwrap();
        Ok(tables.txt.get(&key(zone, name)).cloned().unwrap_or_default())
    }

    async fn query_ns(&self, zone: &str, name: &str) -> Result<Vec<NsRow>, DomainError> {
        self.enter(RecordType::NS, zone, name).await?;
        let tables = self.tables.read().unwrap();
        Ok(tables.ns.get(&key(zone, name)).cloned().unwrap_or_default())
    }

    async fn query_srv(&self, zone: &str, name: &str) -> Result<Vec<SrvRow>, DomainError> {
        self.enter(RecordType::SRV, zone, name).await?;
        let tables = self.tables.read().unwrap();
        Ok(tables.srv.get(&key(zone, name)).cloned().unwrap_or_default())
    }

    async fn query_caa(&self, zone: &str, name: &str) -> Result<Vec<CaaRow>, DomainError> {
        self.enter(RecordType::CAA, zone, name).await?;
        let tables = self.tables.read().unwrap();
        Ok(tables.caa.get(&key(zone, name)).cloned().unwrap_or_default())
    }

    async fn query_soa(&self, zone: &str) -> Result<SoaRow, DomainError> {
        self.enter(RecordType::SOA, zone, "@").await?;
        let tables = self.tables.read().unwrap();
        tables
            .soa
            .get(&zone.to_lowercase())
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("SOA for zone {}", zone)))
    }
}

#[derive(Clone, Default)]
pub struct MockZoneCatalog {
    zones: Arc<RwLock<HashSet<String>>>,
    failure: Arc<RwLock<Option<DomainError>>>,
    delay: Arc<RwLock<Option<Duration>>>,
    lookups: Arc<Mutex<Vec<String>>>,
}

impl MockZoneCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zones(zones: &[&str]) -> Self {
        let catalog = Self::new();
        for zone in zones {
            catalog.add_zone(zone);
        }
        catalog
    }

    pub fn add_zone(&self, zone: &str) {
        self.zones.write().unwrap().insert(zone.to_lowercase());
    }

    pub fn remove_zone(&self, zone: &str) {
        self.zones.write().unwrap().remove(&zone.to_lowercase());
    }

    pub fn set_failure(&self, error: DomainError) {
        *self.failure.write().unwrap() = Some(error);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.write().unwrap() = Some(delay);
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl ZoneCatalog for MockZoneCatalog {
    async fn zone_exists(&self, name: &str) -> Result<bool, DomainError> {
        self.lookups.lock().unwrap().push(name.to_string());

        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.failure.read().unwrap().clone() {
            return Err(error);
        }
        Ok(self.zones.read().unwrap().contains(&name.to_lowercase()))
    }

    async fn list_active_zone_names(&self) -> Result<Vec<String>, DomainError> {
        if let Some(error) = self.failure.read().unwrap().clone() {
            return Err(error);
        }
        let mut zones: Vec<String> = self.zones.read().unwrap().iter().cloned().collect();
        zones.sort();
        Ok(zones)
    }
}

/// Hands out the same catalog and record store on every open.
#[derive(Clone, Default)]
pub struct MockStore {
    catalog: MockZoneCatalog,
    records: MockRecordQueryPort,
    failure: Arc<RwLock<Option<DomainError>>>,
    opens: Arc<Mutex<usize>>,
}

impl MockStore {
    pub fn new(catalog: &MockZoneCatalog, records: &MockRecordQueryPort) -> Self {
        Self {
            catalog: catalog.clone(),
            records: records.clone(),
            ..Self::default()
        }
    }

    pub fn set_failure(&self, error: DomainError) {
        *self.failure.write().unwrap() = Some(error);
    }

    pub fn open_count(&self) -> usize {
        *self.opens.lock().unwrap()
    }
}

#[async_trait]
impl SnapshotProvider for MockStore {
    async fn open(&self) -> Result<StoreSnapshot, DomainError> {
        *self.opens.lock().unwrap() += 1;

        if let Some(error) = self.failure.read().unwrap().clone() {
            return Err(error);
        }
        Ok(StoreSnapshot {
            catalog: Arc::new(self.catalog.clone()),
            records: Arc::new(self.records.clone()),
        })
    }
}

pub fn example_soa() -> SoaRow {
    SoaRow {
        primary_ns: "ns1.example.com.".to_string(),
        mailbox: "admin.example.com.".to_string(),
        serial: 2024010100,
        refresh: 7200,
        retry: 3600,
        expire: 1209600,
        minimum: 3600,
        ttl: 3600,
    }
}
