//! Common test utilities for integration tests.
//!
//! These tests run against a real PostgreSQL database named by the
//! `TEST_DATABASE_URL` environment variable. When the variable is not set
//! the tests skip themselves instead of failing, so the suite stays green
//! on machines without a database.

#![allow(dead_code)]

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Connect to the test database, or None when TEST_DATABASE_URL is unset.
pub async fn maybe_pool() -> Option<PgPool> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    run_migrations(&pool).await;
    Some(pool)
}

/// Run migrations on the test database (idempotent; errors from already
/// applied statements are ignored).
pub async fn run_migrations(pool: &PgPool) {
    let migration_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("persistence/src/migrations");

    let mut entries: Vec<_> = std::fs::read_dir(&migration_dir)
        .expect("Failed to read migrations directory")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "sql").unwrap_or(false))
        .collect();

    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let sql = std::fs::read_to_string(entry.path()).expect("Failed to read migration file");
        let _ = sqlx::raw_sql(&sql).execute(pool).await;
    }
}

/// A suffix unique across test processes and invocations, for building
/// collision-free usernames, NIKs, and codes.
pub fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}{:03}", nanos, n % 1000)
}

/// A plausible 16-digit NIK unique to this invocation.
pub fn unique_nik() -> String {
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_micros();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed) as u128;
    format!("{:016}", (micros * 1000 + n) % 10_000_000_000_000_000)
}

/// Insert an account directly and return its id.
pub async fn seed_user(pool: &PgPool) -> uuid::Uuid {
    let suffix = unique_suffix();
    sqlx::query_scalar::<_, uuid::Uuid>(
        r#"
        INSERT INTO users (username, email, password_hash, role)
        VALUES ($1, $2, 'x', 'user')
        RETURNING id
        "#,
    )
    .bind(format!("pengawas{}", suffix))
    .bind(format!("pengawas{}@test.local", suffix))
    .fetch_one(pool)
    .await
    .expect("seed user")
}

/// Insert an activity + sub-activity pair and return the sub-activity id.
pub async fn seed_subkegiatan(pool: &PgPool, tanggal_mulai: &str) -> String {
    let suffix = unique_suffix();
    let kegiatan_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO kegiatan (nama_kegiatan) VALUES ($1) RETURNING id",
    )
    .bind(format!("Survei {}", suffix))
    .fetch_one(pool)
    .await
    .expect("seed kegiatan");

    let sub_id = format!("subtest{}", suffix);
    sqlx::query(
        r#"
        INSERT INTO subkegiatan (id, id_kegiatan, nama_subkegiatan, tanggal_mulai, tanggal_berakhir)
        VALUES ($1, $2, $3, $4::date, $4::date + 30)
        "#,
    )
    .bind(&sub_id)
    .bind(kegiatan_id)
    .bind(format!("Pencacahan {}", suffix))
    .bind(tanggal_mulai)
    .execute(pool)
    .await
    .expect("seed subkegiatan");

    sub_id
}

/// Insert a position and return its code.
pub async fn seed_jabatan(pool: &PgPool) -> String {
    let kode = format!("J{}", unique_suffix());
    sqlx::query("INSERT INTO jabatan_mitra (kode_jabatan, nama_jabatan) VALUES ($1, $2)")
        .bind(&kode)
        .bind(format!("Petugas {}", kode))
        .execute(pool)
        .await
        .expect("seed jabatan");
    kode
}

/// Insert a unit of measure and return its id.
pub async fn seed_satuan(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO satuan_kegiatan (nama_satuan) VALUES ($1) RETURNING id",
    )
    .bind(format!("Dokumen {}", unique_suffix()))
    .fetch_one(pool)
    .await
    .expect("seed satuan")
}

/// Insert a partner active for the given year and return its id.
pub async fn seed_mitra(pool: &PgPool, tahun: &str) -> i64 {
    let nik = unique_nik();
    let mitra_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO mitra (nama_lengkap, nik, sobat_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(format!("Mitra {}", &nik[8..]))
    .bind(&nik)
    .bind(format!("SBT{}", &nik[8..]))
    .fetch_one(pool)
    .await
    .expect("seed mitra");

    sqlx::query("INSERT INTO tahun_aktif (mitra_id, tahun, status) VALUES ($1, $2, 'aktif')")
        .bind(mitra_id)
        .bind(tahun)
        .execute(pool)
        .await
        .expect("seed tahun aktif");

    mitra_id
}
