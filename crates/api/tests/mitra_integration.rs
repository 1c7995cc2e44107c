//! Integration tests for partner upsert, dual-semantics deletion, and the
//! spreadsheet import accounting.

mod common;

use domain::models::MitraImportRow;
use persistence::repositories::{MitraDeleteOutcome, MitraRepository};

fn import_row(baris: usize, nama: Option<&str>, nik: Option<&str>) -> MitraImportRow {
    MitraImportRow {
        baris,
        nama_lengkap: nama.map(str::to_string),
        nik: nik.map(str::to_string),
        sobat_id: None,
        alamat: None,
        nomor_hp: None,
        email: None,
        jenis_kelamin: None,
        pendidikan: None,
        pekerjaan: None,
    }
}

#[tokio::test]
async fn test_upsert_by_nik_updates_existing_row() {
    let Some(pool) = common::maybe_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let repo = MitraRepository::new(pool);
    let nik = common::unique_nik();

    let first = repo
        .upsert_by_nik("Budi", &nik, None, None, Some("0811"), None, None, None, None, "2025")
        .await
        .unwrap();

    let second = repo
        .upsert_by_nik(
            "Budi Santoso",
            &nik,
            None,
            None,
            Some("0822"),
            None,
            None,
            None,
            None,
            "2025",
        )
        .await
        .unwrap();

    // same row, overwritten with the latest payload
    assert_eq!(first.id, second.id);
    assert_eq!(second.nama_lengkap, "Budi Santoso");
    assert_eq!(second.nomor_hp.as_deref(), Some("0822"));

    let tahun = repo.tahun_aktif_for(first.id).await.unwrap();
    assert_eq!(tahun.len(), 1);
    assert_eq!(tahun[0].tahun, "2025");
    assert_eq!(tahun[0].status, "aktif");
}

#[tokio::test]
async fn test_delete_with_multiple_years_removes_only_target_year() {
    let Some(pool) = common::maybe_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let repo = MitraRepository::new(pool);
    let nik = common::unique_nik();

    let mitra = repo
        .upsert_by_nik("Sari", &nik, None, None, None, None, None, None, None, "2023")
        .await
        .unwrap();
    repo.set_status_tahun(mitra.id, "2024", "aktif").await.unwrap();

    let outcome = repo.delete_mitra(mitra.id, Some("2024")).await.unwrap();
    assert_eq!(outcome, MitraDeleteOutcome::TahunDihapus("2024".to_string()));

    // partner and the 2023 activation survive
    assert!(repo.find_by_id(mitra.id).await.unwrap().is_some());
    let tahun = repo.tahun_aktif_for(mitra.id).await.unwrap();
    assert_eq!(tahun.len(), 1);
    assert_eq!(tahun[0].tahun, "2023");
}

#[tokio::test]
async fn test_delete_with_single_year_removes_partner() {
    let Some(pool) = common::maybe_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let repo = MitraRepository::new(pool);
    let nik = common::unique_nik();

    let mitra = repo
        .upsert_by_nik("Tono", &nik, None, None, None, None, None, None, None, "2024")
        .await
        .unwrap();

    let outcome = repo.delete_mitra(mitra.id, Some("2024")).await.unwrap();
    assert_eq!(outcome, MitraDeleteOutcome::MitraDihapus);
    assert!(repo.find_by_id(mitra.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_missing_partner() {
    let Some(pool) = common::maybe_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let repo = MitraRepository::new(pool);
    let outcome = repo.delete_mitra(-1, None).await.unwrap();
    assert_eq!(outcome, MitraDeleteOutcome::TidakDitemukan);
}

#[tokio::test]
async fn test_import_batch_accounting() {
    let Some(pool) = common::maybe_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let repo = MitraRepository::new(pool);
    let nik_a = common::unique_nik();
    let nik_b = common::unique_nik();

    // Sheet layout (1-based rows, header = row 1):
    //   row 2: valid           row 3: empty NIK
    //   row 4: valid           row 5: duplicate of row 2's NIK
    //   row 6: blank name (skipped)
    let rows = vec![
        import_row(2, Some("Budi"), Some(&nik_a)),
        import_row(3, Some("Tanpa Nik"), None),
        import_row(4, Some("Sari"), Some(&nik_b)),
        import_row(5, Some("Budi Lagi"), Some(&nik_a)),
        import_row(6, None, Some(&common::unique_nik())),
    ];

    let report = repo.import_batch(&rows, "2025").await.unwrap();

    assert_eq!(report.berhasil, 2);
    assert_eq!(report.dilewati, 1);
    assert_eq!(report.gagal, 2);
    assert!(report.errors.iter().any(|e| e.starts_with("Baris 3") && e.contains("NIK kosong")));
    assert!(report.errors.iter().any(|e| e.starts_with("Baris 5") && e.contains("duplikat")));

    // the successful rows are committed despite the per-row failures
    assert!(repo.find_by_nik(&nik_a).await.unwrap().is_some());
    assert!(repo.find_by_nik(&nik_b).await.unwrap().is_some());
}
