//! Integration tests for roster headers, promotion idempotency, the
//! position delete restriction, template activation, and honor
//! aggregation.

mod common;

use domain::models::AnggotaInput;
use persistence::repositories::{
    JabatanRepository, LaporanRepository, PenugasanRepository, PerencanaanRepository,
    TemplateSpkRepository,
};
use rust_decimal::Decimal;

async fn seed_honorarium(
    pool: &sqlx::PgPool,
    id_subkegiatan: &str,
    kode_jabatan: &str,
    tarif: i64,
) {
    let id_satuan = common::seed_satuan(pool).await;
    sqlx::query(
        r#"
        INSERT INTO honorarium (id_subkegiatan, kode_jabatan, tarif, id_satuan, basis_volume)
        VALUES ($1, $2, $3, $4, 100)
        "#,
    )
    .bind(id_subkegiatan)
    .bind(kode_jabatan)
    .bind(Decimal::from(tarif))
    .bind(id_satuan)
    .execute(pool)
    .await
    .expect("seed honorarium");
}

#[tokio::test]
async fn test_second_header_for_same_subkegiatan_is_rejected() {
    let Some(pool) = common::maybe_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let pengawas = common::seed_user(&pool).await;
    let sub_id = common::seed_subkegiatan(&pool, "2025-03-01").await;

    let repo = PerencanaanRepository::new(pool.clone());
    repo.create_with_anggota(&sub_id, pengawas, &[]).await.unwrap();

    // the advisory pre-check reports the duplicate
    assert!(repo.exists_for_subkegiatan(&sub_id).await.unwrap());

    // and the unique index backs it up under a race
    let raced = repo.create_with_anggota(&sub_id, pengawas, &[]).await;
    assert!(raced.is_err());
}

#[tokio::test]
async fn test_duplicate_member_is_rejected_before_write() {
    let Some(pool) = common::maybe_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let pengawas = common::seed_user(&pool).await;
    let sub_id = common::seed_subkegiatan(&pool, "2025-04-01").await;
    let kode = common::seed_jabatan(&pool).await;
    let mitra_id = common::seed_mitra(&pool, "2025").await;

    let repo = PerencanaanRepository::new(pool.clone());
    let header = repo
        .create_with_anggota(
            &sub_id,
            pengawas,
            &[AnggotaInput {
                id_mitra: mitra_id,
                kode_jabatan: kode.clone(),
                volume_tugas: 5,
            }],
        )
        .await
        .unwrap();

    assert!(repo.anggota_exists(header.id, mitra_id).await.unwrap());

    let duplicate = repo.add_anggota(header.id, mitra_id, &kode, 3).await;
    assert!(duplicate.is_err());

    // the original line is untouched
    let anggota = repo.anggota_raw(header.id).await.unwrap();
    assert_eq!(anggota.len(), 1);
    assert_eq!(anggota[0].volume_tugas, 5);
}

#[tokio::test]
async fn test_promotion_is_idempotent() {
    let Some(pool) = common::maybe_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let pengawas = common::seed_user(&pool).await;
    let sub_id = common::seed_subkegiatan(&pool, "2025-05-01").await;
    let kode = common::seed_jabatan(&pool).await;
    let mitra_id = common::seed_mitra(&pool, "2025").await;

    let perencanaan_repo = PerencanaanRepository::new(pool.clone());
    let header = perencanaan_repo
        .create_with_anggota(
            &sub_id,
            pengawas,
            &[AnggotaInput {
                id_mitra: mitra_id,
                kode_jabatan: kode.clone(),
                volume_tugas: 4,
            }],
        )
        .await
        .unwrap();

    let repo = PenugasanRepository::new(pool.clone());

    let first = repo.import_from_perencanaan(&[header.id]).await.unwrap();
    assert_eq!(first.penugasan_dibuat, 1);
    assert_eq!(first.anggota_ditambahkan, 1);

    // bump the planning volume, run the promotion again
    let anggota = perencanaan_repo.anggota_raw(header.id).await.unwrap();
    perencanaan_repo
        .update_anggota(header.id, anggota[0].id, None, Some(9))
        .await
        .unwrap();

    let second = repo.import_from_perencanaan(&[header.id]).await.unwrap();
    assert_eq!(second.penugasan_dibuat, 0);
    assert_eq!(second.penugasan_diperbarui, 1);
    assert_eq!(second.anggota_ditambahkan, 0);
    assert_eq!(second.anggota_diperbarui, 1);

    // exactly one execution header and one member row, with the updated volume
    let headers = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM penugasan WHERE id_subkegiatan = $1",
    )
    .bind(&sub_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(headers, 1);

    let volumes = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT kp.volume_tugas
        FROM kelompok_penugasan kp
        JOIN penugasan p ON p.id = kp.id_penugasan
        WHERE p.id_subkegiatan = $1 AND kp.id_mitra = $2
        "#,
    )
    .bind(&sub_id)
    .bind(mitra_id)
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(volumes, vec![9]);
}

#[tokio::test]
async fn test_referenced_jabatan_cannot_be_deleted() {
    let Some(pool) = common::maybe_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let sub_id = common::seed_subkegiatan(&pool, "2025-06-01").await;
    let kode = common::seed_jabatan(&pool).await;
    seed_honorarium(&pool, &sub_id, &kode, 50_000).await;

    let repo = JabatanRepository::new(pool.clone());
    let result = repo.delete(&kode).await;
    assert!(result.is_err());

    // the position row is still there afterwards
    assert!(repo.find_by_kode(&kode).await.unwrap().is_some());
}

#[tokio::test]
async fn test_set_active_template_leaves_exactly_one_active() {
    let Some(pool) = common::maybe_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let repo = TemplateSpkRepository::new(pool.clone());
    let a = repo.create_with_parts("Template A", &[], &[]).await.unwrap();
    let b = repo.create_with_parts("Template B", &[], &[]).await.unwrap();

    repo.set_active(a.id).await.unwrap().unwrap();
    repo.set_active(b.id).await.unwrap().unwrap();

    let active = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM master_template_spk WHERE is_active = TRUE",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(active, 1);

    let current = repo.find_active().await.unwrap().unwrap();
    assert_eq!(current.id, b.id);

    // activating an unknown id must not clear the flag
    let missing = repo.set_active(-1).await.unwrap();
    assert!(missing.is_none());
    assert_eq!(repo.find_active().await.unwrap().unwrap().id, b.id);
}

#[tokio::test]
async fn test_only_approved_rosters_count_in_transaction_report() {
    let Some(pool) = common::maybe_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let pengawas = common::seed_user(&pool).await;
    let sub_id = common::seed_subkegiatan(&pool, "2031-02-01").await;
    let kode = common::seed_jabatan(&pool).await;
    let mitra_id = common::seed_mitra(&pool, "2031").await;
    seed_honorarium(&pool, &sub_id, &kode, 250_000).await;

    let repo = PenugasanRepository::new(pool.clone());
    let header = repo
        .create_with_anggota(
            &sub_id,
            pengawas,
            &[domain::models::AnggotaPenugasanInput {
                id_mitra: mitra_id,
                kode_jabatan: kode.clone(),
                volume_tugas: 3,
            }],
        )
        .await
        .unwrap();

    let laporan = LaporanRepository::new(pool.clone());

    // pending roster: no rows for this partner
    let rows = laporan
        .total_honor_penugasan(2031, None, None, Some(&sub_id))
        .await
        .unwrap();
    assert!(rows.iter().all(|r| r.id_mitra != mitra_id));

    repo.set_status(header.id, "disetujui").await.unwrap();

    let rows = laporan
        .total_honor_penugasan(2031, None, None, Some(&sub_id))
        .await
        .unwrap();
    let row = rows.iter().find(|r| r.id_mitra == mitra_id).expect("row");
    assert_eq!(row.total_honor, Decimal::from(750_000));
}
