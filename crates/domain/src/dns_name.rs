//! Domain name helpers shared by zone matching and answer building.
//!
//! Names handled here are ASCII presentation-format names. Comparison is
//! case-insensitive, so normalized names are lower-cased.

use crate::DomainError;

pub const APEX: &str = "@";

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 253;

/// Normalizes a query name to lower-case FQDN form with exactly one
/// trailing dot.
pub fn normalize_fqdn(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    let without_dot = trimmed.strip_suffix('.').unwrap_or(trimmed);

    if without_dot.is_empty() {
        return Err(DomainError::InvalidDomainName(format!(
            "'{}' has no labels",
            name
        )));
    }
    if without_dot.len() > MAX_NAME_LEN {
        return Err(DomainError::InvalidDomainName(format!(
            "'{}' exceeds {} characters",
            name, MAX_NAME_LEN
        )));
    }

    for label in without_dot.split('.') {
        if label.is_empty() {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' contains an empty label",
                name
            )));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "label '{}' exceeds {} characters",
                label, MAX_LABEL_LEN
            )));
        }
    }

    let mut fqdn = without_dot.to_ascii_lowercase();
    fqdn.push('.');
    Ok(fqdn)
}

/// Appends the trailing dot to a stored name-valued field when it is missing.
/// The value is otherwise passed through as stored.
pub fn ensure_fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

pub fn label_count(fqdn: &str) -> usize {
    let without_dot = fqdn.strip_suffix('.').unwrap_or(fqdn);
    if without_dot.is_empty() {
        0
    } else {
        without_dot.split('.').count()
    }
}

/// Zone candidates for `fqdn`, most specific first.
///
/// The list runs from the full name down to the two-label suffix; a single
/// label is never a zone candidate.
pub fn candidate_zones(fqdn: &str) -> Vec<String> {
    let without_dot = fqdn.strip_suffix('.').unwrap_or(fqdn);
    let labels: Vec<&str> = without_dot.split('.').filter(|l| !l.is_empty()).collect();
    if labels.len() < 2 {
        return Vec::new();
    }

    (0..=labels.len() - 2)
        .map(|start| format!("{}.", labels[start..].join(".")))
        .collect()
}

/// Owner name of `fqdn` relative to `zone`, `@` for the apex.
///
/// Both arguments are expected in normalized form. A name outside the zone
/// is returned unchanged.
pub fn relative_name(fqdn: &str, zone: &str) -> String {
    if fqdn.eq_ignore_ascii_case(zone) {
        return APEX.to_string();
    }

    let split = fqdn.len().saturating_sub(zone.len());
    if split > 0 && fqdn.is_char_boundary(split) {
        let (head, tail) = fqdn.split_at(split);
        if tail.eq_ignore_ascii_case(zone) {
            if let Some(relative) = head.strip_suffix('.') {
                return relative.to_string();
            }
        }
    }

    fqdn.to_string()
}
