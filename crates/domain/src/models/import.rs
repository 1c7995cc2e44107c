//! Bulk-import report and roster preview models.

use serde::Serialize;

/// Aggregate outcome of one spreadsheet import.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    /// Rows upserted successfully.
    pub berhasil: u32,
    /// Blank or malformed rows that were skipped.
    pub dilewati: u32,
    /// Rows that failed validation.
    pub gagal: u32,
    /// Human-readable per-row messages, 1-based spreadsheet row numbers.
    pub errors: Vec<String>,
}

impl ImportReport {
    pub fn record_berhasil(&mut self) {
        self.berhasil += 1;
    }

    pub fn record_dilewati(&mut self) {
        self.dilewati += 1;
    }

    pub fn record_gagal(&mut self, baris: usize, pesan: impl std::fmt::Display) {
        self.gagal += 1;
        self.errors.push(format!("Baris {}: {}", baris, pesan));
    }
}

/// One parsed spreadsheet row from a partner import, 1-based row number
/// included for error messages. Fields are optional because the sheet may
/// lack the column entirely or leave the cell blank; classification happens
/// inside the import loop, not at parse time.
#[derive(Debug, Clone)]
pub struct MitraImportRow {
    pub baris: usize,
    pub nama_lengkap: Option<String>,
    pub nik: Option<String>,
    pub sobat_id: Option<String>,
    pub alamat: Option<String>,
    pub nomor_hp: Option<String>,
    pub email: Option<String>,
    pub jenis_kelamin: Option<String>,
    pub pendidikan: Option<String>,
    pub pekerjaan: Option<String>,
}

/// One parsed spreadsheet row from a user-account import.
#[derive(Debug, Clone)]
pub struct UserImportRow {
    pub baris: usize,
    pub username: Option<String>,
    pub email: Option<String>,
    /// Already-hashed password; the handler hashes before handing rows to
    /// the repository so plaintext never crosses the persistence boundary.
    pub password_hash: Option<String>,
    pub role: Option<String>,
}

/// One parsed spreadsheet row from a roster-candidate preview upload.
#[derive(Debug, Clone)]
pub struct KandidatImportRow {
    pub baris: usize,
    pub sobat_id: Option<String>,
    pub nama: Option<String>,
    pub jabatan: Option<String>,
    pub volume: Option<i32>,
}

/// One validated candidate row from a roster preview import.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewRow {
    pub baris: usize,
    pub sobat_id: String,
    pub id_mitra: i64,
    pub nama_lengkap: String,
    pub kode_jabatan: String,
    pub nama_jabatan: String,
    pub volume_tugas: i32,
}

/// Dry-run result: candidate rows that passed every check, plus warnings
/// for the rest. Nothing is persisted by the preview.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PreviewImportResponse {
    pub valid: Vec<PreviewRow>,
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_report_counters() {
        let mut report = ImportReport::default();
        report.record_berhasil();
        report.record_berhasil();
        report.record_dilewati();
        report.record_gagal(3, "NIK kosong");

        assert_eq!(report.berhasil, 2);
        assert_eq!(report.dilewati, 1);
        assert_eq!(report.gagal, 1);
        assert_eq!(report.errors, vec!["Baris 3: NIK kosong"]);
    }

    #[test]
    fn test_import_report_serialize() {
        let mut report = ImportReport::default();
        report.record_gagal(5, "NIK duplikat dengan baris 2");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["gagal"], 1);
        assert!(json["errors"][0]
            .as_str()
            .unwrap()
            .starts_with("Baris 5"));
    }
}
