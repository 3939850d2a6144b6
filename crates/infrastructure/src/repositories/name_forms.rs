use hermes_dns_domain::dns_name::APEX;

/// Stored spellings of a zone name: with and without the trailing dot.
pub(super) fn zone_forms(zone: &str) -> [String; 2] {
    let bare = zone.strip_suffix('.').unwrap_or(zone);
    [format!("{}.", bare), bare.to_string()]
}

/// Stored spellings of an owner name inside `zone`: relative, and absolute
/// with and without the trailing dot. The apex is `@` or the zone name.
pub(super) fn owner_forms(zone: &str, name: &str) -> [String; 3] {
    let [zone_dot, zone_bare] = zone_forms(zone);
    if name == APEX || name.is_empty() {
        return [APEX.to_string(), zone_dot, zone_bare];
    }

    let relative = name.strip_suffix('.').unwrap_or(name);
    [
        relative.to_string(),
        format!("{}.{}", relative, zone_dot),
        format!("{}.{}", relative, zone_bare),
    ]
}
