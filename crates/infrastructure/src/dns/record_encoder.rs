//! Conversion of answer records into `hickory_proto` records for the wire.

use super::record_type_map::RecordTypeMapper;
use hermes_dns_domain::{RecordData, RecordType, ResourceRecord};
use hickory_proto::rr::rdata::{self, NULL, SOA};
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::ProtoError;

const MAX_CHARACTER_STRING: usize = 255;

pub fn to_hickory_record(record: &ResourceRecord) -> Result<Record, ProtoError> {
    let name = parse_name(&record.name)?;
    let rdata = match &record.data {
        RecordData::A(address) => RData::A(rdata::A(*address)),
        RecordData::AAAA(address) => RData::AAAA(rdata::AAAA(*address)),
        RecordData::CNAME(target) => RData::CNAME(rdata::CNAME(parse_name(target)?)),
        RecordData::NS(target) => RData::NS(rdata::NS(parse_name(target)?)),
        RecordData::MX {
            preference,
            exchange,
        } => RData::MX(rdata::MX::new(*preference, parse_name(exchange)?)),
        RecordData::TXT(text) => RData::TXT(rdata::TXT::new(split_character_strings(text))),
        RecordData::SOA {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        } => RData::SOA(SOA::new(
            parse_name(mname)?,
            parse_name(rname)?,
            *serial,
            *refresh as _,
            *retry as _,
            *expire as _,
            *minimum,
        )),
        RecordData::SRV {
            priority,
            weight,
            port,
            target,
        } => RData::SRV(rdata::SRV::new(
            *priority,
            *weight,
            *port,
            parse_name(target)?,
        )),
        RecordData::CAA { flag, tag, value } => RData::Unknown {
            code: RecordTypeMapper::to_hickory(RecordType::CAA),
            rdata: NULL::with(caa_rdata(*flag, tag, value)?),
        },
    };

    Ok(Record::from_rdata(name, record.ttl, rdata))
}

/// Parses a presentation-format name. Service labels (`_sip`) are plain
/// ASCII; anything else falls back to IDNA.
fn parse_name(name: &str) -> Result<Name, ProtoError> {
    let mut parsed = Name::from_ascii(name).or_else(|_| Name::from_utf8(name))?;
    parsed.set_fqdn(true);
    Ok(parsed)
}

/// Splits TXT data into character-strings of at most 255 octets without
/// breaking a UTF-8 sequence.
pub fn split_character_strings(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let mut end = rest.len().min(MAX_CHARACTER_STRING);
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        let (chunk, tail) = rest.split_at(end);
        chunks.push(chunk.to_string());
        rest = tail;
    }
    chunks
}

/// CAA wire form: flags, tag length, tag, then the value verbatim.
fn caa_rdata(flag: u8, tag: &str, value: &str) -> Result<Vec<u8>, ProtoError> {
    let tag_len = u8::try_from(tag.len())
        .ok()
        .filter(|len| *len > 0)
        .ok_or_else(|| ProtoError::from(format!("invalid CAA tag length: {}", tag.len())))?;

    let mut out = Vec::with_capacity(2 + tag.len() + value.len());
    out.push(flag);
    out.push(tag_len);
    out.extend_from_slice(tag.as_bytes());
    out.extend_from_slice(value.as_bytes());
    Ok(out)
}
