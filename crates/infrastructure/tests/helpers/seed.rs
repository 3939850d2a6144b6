use hermes_dns_infrastructure::database::run_migrations;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub async fn create_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    run_migrations(&pool).await.unwrap();
    pool
}

pub async fn insert_zone(pool: &SqlitePool, name: &str, active: bool) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO zone (name, serial, is_active) VALUES (?, 1, ?) RETURNING id",
    )
    .bind(name)
    .bind(active as i64)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_record(
    pool: &SqlitePool,
    zone_id: i64,
    name: &str,
    record_type: &str,
    ttl: i64,
    active: bool,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO record (zone_id, name, record_type, ttl, is_active)
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(zone_id)
    .bind(name)
    .bind(record_type)
    .bind(ttl)
    .bind(active as i64)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn add_a(pool: &SqlitePool, zone_id: i64, name: &str, ip: &str, ttl: i64) -> i64 {
    let record_id = insert_record(pool, zone_id, name, "A", ttl, true).await;
    sqlx::query("INSERT INTO record_a (record_id, ip) VALUES (?, ?)")
        .bind(record_id)
        .bind(ip)
        .execute(pool)
        .await
        .unwrap();
    record_id
}

pub async fn add_aaaa(pool: &SqlitePool, zone_id: i64, name: &str, ip: &str, ttl: i64) -> i64 {
    let record_id = insert_record(pool, zone_id, name, "AAAA", ttl, true).await;
    sqlx::query("INSERT INTO record_aaaa (record_id, ip) VALUES (?, ?)")
        .bind(record_id)
        .bind(ip)
        .execute(pool)
        .await
        .unwrap();
    record_id
}

pub async fn add_cname(pool: &SqlitePool, zone_id: i64, name: &str, target: &str, ttl: i64) {
    let record_id = insert_record(pool, zone_id, name, "CNAME", ttl, true).await;
    sqlx::query("INSERT INTO record_cname (record_id, target) VALUES (?, ?)")
        .bind(record_id)
        .bind(target)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn add_mx(pool: &SqlitePool, zone_id: i64, name: &str, host: &str, priority: i64, ttl: i64) {
    let record_id = insert_record(pool, zone_id, name, "MX", ttl, true).await;
    sqlx::query("INSERT INTO record_mx (record_id, host, priority) VALUES (?, ?, ?)")
        .bind(record_id)
        .bind(host)
        .bind(priority)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn add_txt(pool: &SqlitePool, zone_id: i64, name: &str, text: &str, ttl: i64) {
    let record_id = insert_record(pool, zone_id, name, "TXT", ttl, true).await;
    sqlx::query("INSERT INTO record_txt (record_id, text) VALUES (?, ?)")
        .bind(record_id)
        .bind(text)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn add_ns(pool: &SqlitePool, zone_id: i64, name: &str, name_server: &str, ttl: i64) {
    let record_id = insert_record(pool, zone_id, name, "NS", ttl, true).await;
    sqlx::query("INSERT INTO record_ns (record_id, name_server) VALUES (?, ?)")
        .bind(record_id)
        .bind(name_server)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn add_srv(
    pool: &SqlitePool,
    zone_id: i64,
    name: &str,
    (priority, weight, port): (i64, i64, i64),
    target: &str,
    ttl: i64,
) {
    let record_id = insert_record(pool, zone_id, name, "SRV", ttl, true).await;
    sqlx::query(
        "INSERT INTO record_srv (record_id, priority, weight, port, target) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(record_id)
    .bind(priority)
    .bind(weight)
    .bind(port)
    .bind(target)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn add_caa(pool: &SqlitePool, zone_id: i64, name: &str, flag: i64, tag: &str, value: &str, ttl: i64) {
    let record_id = insert_record(pool, zone_id, name, "CAA", ttl, true).await;
    sqlx::query("INSERT INTO record_caa (record_id, flag, tag, value) VALUES (?, ?, ?, ?)")
        .bind(record_id)
        .bind(flag)
        .bind(tag)
        .bind(value)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn add_soa(pool: &SqlitePool, zone_id: i64, name: &str, serial: i64, ttl: i64) -> i64 {
    let record_id = insert_record(pool, zone_id, name, "SOA", ttl, true).await;
    sqlx::query(
        "INSERT INTO record_soa
         (record_id, primary_ns, mail_box, serial, refresh, retry, expire, min_ttl)
         VALUES (?, 'ns1.example.com.', 'admin.example.com.', ?, 7200, 3600, 1209600, 3600)",
    )
    .bind(record_id)
    .bind(serial)
    .execute(pool)
    .await
    .unwrap();
    record_id
}

pub async fn deactivate_record(pool: &SqlitePool, record_id: i64) {
    sqlx::query("UPDATE record SET is_active = 0 WHERE id = ?")
        .bind(record_id)
        .execute(pool)
        .await
        .unwrap();
}

/// `example.com.` with its SOA and `www` A 93.184.216.34 (TTL 300).
pub async fn seed_example_zone(pool: &SqlitePool) -> i64 {
    let zone_id = insert_zone(pool, "example.com.", true).await;
    add_soa(pool, zone_id, "@", 2024010100, 3600).await;
    add_a(pool, zone_id, "www", "93.184.216.34", 300).await;
    zone_id
}
