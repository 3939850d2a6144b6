use hermes_dns_domain::{CliOverrides, Config, LogFormat};
use std::io::Write;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.server.dns_port, 53);
    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.server.tcp_idle_timeout_secs, 10);
    assert_eq!(config.server.max_concurrent_queries, 1024);
    assert_eq!(config.resolver.query_timeout_ms, 2_000);
    assert_eq!(config.database.path, "./hermes-dns.db");
    assert_eq!(config.database.read_pool_max_connections, 25);
    assert_eq!(config.database.min_connections, 10);
    assert!(config.database.run_migrations);
    assert_eq!(config.jobs.pool_monitor_interval_secs, 30);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Text);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_partial_toml_fills_defaults() {
    let config = Config::from_toml(
        r#"
        [server]
        dns_port = 5353

        [database]
        path = "/var/lib/hermes/records.db"
        "#,
    )
    .unwrap();

    assert_eq!(config.server.dns_port, 5353);
    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.database.path, "/var/lib/hermes/records.db");
    assert_eq!(config.database.read_pool_max_connections, 25);
    assert_eq!(config.resolver.query_timeout_ms, 2_000);
}

#[test]
fn test_config_json_log_format() {
    let config = Config::from_toml(
        r#"
        [logging]
        level = "debug"
        format = "json"
        "#,
    )
    .unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_config_invalid_toml_is_parse_error() {
    let result = Config::from_toml("[server\ndns_port = 53");
    assert!(result.is_err());
}

#[test]
fn test_config_load_from_file_applies_cli_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[server]\ndns_port = 5300\nbind_address = \"127.0.0.1\"\n\n[logging]\nlevel = \"warn\""
    )
    .unwrap();

    let overrides = CliOverrides {
        dns_port: Some(5400),
        database_path: Some("override.db".to_string()),
        ..Default::default()
    };

    let config = Config::load(file.path().to_str(), overrides).unwrap();

    assert_eq!(config.server.dns_port, 5400);
    assert_eq!(config.server.bind_address, "127.0.0.1");
    assert_eq!(config.database.path, "override.db");
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_config_load_missing_file_fails() {
    let result = Config::load(Some("/nonexistent/hermes-dns.toml"), CliOverrides::default());
    assert!(result.is_err());
}

#[test]
fn test_validate_rejects_zero_port() {
    let mut config = Config::default();
    config.server.dns_port = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_tcp_idle_timeout() {
    let mut config = Config::default();
    config.server.tcp_idle_timeout_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_concurrent_query_limit() {
    let mut config = Config::default();
    config.server.max_concurrent_queries = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_hostname_bind_address() {
    let mut config = Config::default();
    config.server.bind_address = "localhost".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_dns_addr_ipv4() {
    let config = Config::default();
    assert_eq!(config.server.dns_addr().unwrap().to_string(), "0.0.0.0:53");
}

#[test]
fn test_dns_addr_ipv6_wildcard_is_bracketed() {
    let mut config = Config::default();
    config.server.bind_address = "::".to_string();
    config.server.dns_port = 5353;

    let addr = config.server.dns_addr().unwrap();

    assert!(addr.is_ipv6());
    assert_eq!(addr.port(), 5353);
    assert_eq!(addr.to_string(), "[::]:5353");
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let mut config = Config::default();
    config.resolver.query_timeout_ms = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_empty_pool() {
    let mut config = Config::default();
    config.database.read_pool_max_connections = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_min_connections_capped_at_pool_size() {
    let mut config = Config::default();
    config.database.read_pool_max_connections = 4;
    config.database.min_connections = 10;

    assert!(config.validate().is_ok());
    assert_eq!(config.database.effective_min_connections(), 4);
}

#[test]
fn test_database_url() {
    let mut config = Config::default();
    assert_eq!(config.database.url(), "sqlite:./hermes-dns.db");

    config.database.path = "sqlite::memory:".to_string();
    assert_eq!(config.database.url(), "sqlite::memory:");
}
