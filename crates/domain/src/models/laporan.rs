//! Reporting models: execution-side honor transactions with cap flags, and
//! planning-side monthly recaps.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a partner's summed honor stays within the configured cap.
/// A total exactly equal to the cap counts as safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBatas {
    Aman,
    Melebihi,
}

/// Query parameters for the transaction report.
#[derive(Debug, Clone, Deserialize)]
pub struct TransaksiQuery {
    pub tahun: String,
    pub bulan: Option<u32>,
    pub id_kegiatan: Option<i64>,
    pub id_subkegiatan: Option<String>,
}

/// One partner row in the transaction report.
#[derive(Debug, Clone, Serialize)]
pub struct TransaksiRow {
    pub id_mitra: i64,
    pub nama_lengkap: String,
    pub nik: String,
    pub total_honor: Decimal,
    pub batas_honor: Decimal,
    pub status_batas: StatusBatas,
}

/// Query parameters for the planning-side monthly recap.
#[derive(Debug, Clone, Deserialize)]
pub struct RekapBulananQuery {
    pub tahun: String,
}

/// One month bucket in the planning recap.
#[derive(Debug, Clone, Serialize)]
pub struct RekapBulan {
    pub bulan: u32,
    pub nama_bulan: String,
    pub jumlah_mitra: i64,
    pub total_honor: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RekapMitraQuery {
    pub tahun: String,
    pub bulan: u32,
}

/// One partner row within a month bucket.
#[derive(Debug, Clone, Serialize)]
pub struct RekapMitraRow {
    pub id_mitra: i64,
    pub nama_lengkap: String,
    pub nik: String,
    pub total_honor: Decimal,
    pub batas_honor: Decimal,
    pub status_batas: StatusBatas,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RekapDetailQuery {
    pub tahun: String,
    pub bulan: u32,
    pub id_mitra: i64,
}

/// One contributing roster line in the per-partner drill-down.
#[derive(Debug, Clone, Serialize)]
pub struct RekapDetailRow {
    pub id_subkegiatan: String,
    pub nama_subkegiatan: String,
    pub nama_kegiatan: String,
    pub kode_jabatan: String,
    pub nama_jabatan: String,
    pub volume_tugas: i32,
    pub tarif: Decimal,
    pub total_honor: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_batas_serde() {
        assert_eq!(serde_json::to_string(&StatusBatas::Aman).unwrap(), "\"aman\"");
        assert_eq!(
            serde_json::to_string(&StatusBatas::Melebihi).unwrap(),
            "\"melebihi\""
        );
    }

    #[test]
    fn test_transaksi_query_deserialize() {
        let query: TransaksiQuery =
            serde_json::from_str(r#"{"tahun":"2025","bulan":3}"#).unwrap();
        assert_eq!(query.tahun, "2025");
        assert_eq!(query.bulan, Some(3));
        assert!(query.id_kegiatan.is_none());
    }
}
