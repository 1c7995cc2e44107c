//! Honor-cap evaluation and month localization.

use rust_decimal::Decimal;

use crate::models::StatusBatas;

/// Months in a full-year cap window.
const BULAN_PER_TAHUN: i64 = 12;

/// Resolves the applicable cap from the year rule's monthly value.
///
/// Without a month filter the report covers the whole year, so the ceiling
/// is the monthly cap times twelve; with a month filter the raw monthly
/// value applies.
pub fn batas_untuk(batas_bulanan: Decimal, bulan: Option<u32>) -> Decimal {
    match bulan {
        Some(_) => batas_bulanan,
        None => batas_bulanan * Decimal::from(BULAN_PER_TAHUN),
    }
}

/// Compares a summed total against the cap. Exactly hitting the cap is safe.
pub fn evaluasi_batas(total: Decimal, batas: Decimal) -> StatusBatas {
    if total <= batas {
        StatusBatas::Aman
    } else {
        StatusBatas::Melebihi
    }
}

/// Indonesian month name for a 1-based month number.
pub fn nama_bulan(bulan: u32) -> &'static str {
    match bulan {
        1 => "Januari",
        2 => "Februari",
        3 => "Maret",
        4 => "April",
        5 => "Mei",
        6 => "Juni",
        7 => "Juli",
        8 => "Agustus",
        9 => "September",
        10 => "Oktober",
        11 => "November",
        12 => "Desember",
        _ => "Tidak Diketahui",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batas_untuk_yearly_multiplies_by_twelve() {
        let batas = batas_untuk(Decimal::from(1_000_000), None);
        assert_eq!(batas, Decimal::from(12_000_000));
    }

    #[test]
    fn test_batas_untuk_monthly_is_raw() {
        let batas = batas_untuk(Decimal::from(1_000_000), Some(6));
        assert_eq!(batas, Decimal::from(1_000_000));
    }

    #[test]
    fn test_evaluasi_batas_exact_boundary_is_safe() {
        // batas_honor 1_000_000 for the year, no month filter:
        // 12_000_000 exactly is still safe, one rupiah over is not.
        let batas = batas_untuk(Decimal::from(1_000_000), None);
        assert_eq!(
            evaluasi_batas(Decimal::from(12_000_000), batas),
            StatusBatas::Aman
        );
        assert_eq!(
            evaluasi_batas(Decimal::from(12_000_001), batas),
            StatusBatas::Melebihi
        );
    }

    #[test]
    fn test_evaluasi_batas_under() {
        assert_eq!(
            evaluasi_batas(Decimal::from(500), Decimal::from(1000)),
            StatusBatas::Aman
        );
    }

    #[test]
    fn test_nama_bulan() {
        assert_eq!(nama_bulan(1), "Januari");
        assert_eq!(nama_bulan(8), "Agustus");
        assert_eq!(nama_bulan(12), "Desember");
    }

    #[test]
    fn test_nama_bulan_out_of_range() {
        assert_eq!(nama_bulan(0), "Tidak Diketahui");
        assert_eq!(nama_bulan(13), "Tidak Diketahui");
    }
}
