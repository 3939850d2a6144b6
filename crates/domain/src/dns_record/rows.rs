//! Typed payload rows as read from the store.
//!
//! Every row carries the TTL of its owning record, joined in by the query
//! that produced it.

use std::net::{Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ARow {
    pub address: Ipv4Addr,
    pub ttl: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AaaaRow {
    pub address: Ipv6Addr,
    pub ttl: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CnameRow {
    pub target: String,
    pub ttl: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxRow {
    pub host: String,
    pub priority: u16,
    pub ttl: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxtRow {
    pub text: String,
    pub ttl: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NsRow {
    pub name_server: String,
    pub ttl: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaRow {
    pub primary_ns: String,
    pub mailbox: String,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
    pub ttl: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrvRow {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
    pub ttl: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaaRow {
    pub flag: u8,
    pub tag: String,
    pub value: String,
    pub ttl: u32,
}
