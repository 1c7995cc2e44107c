//! Spreadsheet import helpers: header-synonym column resolution and
//! per-row field extraction.
//!
//! Header rows in the wild are inconsistent ("NIK", "No. NIK", "nomor induk
//! kependudukan", stray whitespace, mixed case), so each semantic field is
//! matched against a list of acceptable synonyms after normalization. A
//! field whose column cannot be found resolves to `None` rather than
//! failing the whole import.

/// Normalizes one header cell: trim, lowercase, collapse inner whitespace,
/// strip punctuation that commonly decorates headers.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '.' | ':' | '*'))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Finds the index of the first header matching any of the synonyms.
pub fn find_column(headers: &[String], synonyms: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| synonyms.iter().any(|s| h == s))
}

/// Resolved column layout for a partner import sheet.
#[derive(Debug, Clone)]
pub struct MitraColumns {
    pub nama: Option<usize>,
    pub nik: Option<usize>,
    pub sobat_id: Option<usize>,
    pub alamat: Option<usize>,
    pub nomor_hp: Option<usize>,
    pub email: Option<usize>,
    pub jenis_kelamin: Option<usize>,
    pub pendidikan: Option<usize>,
    pub pekerjaan: Option<usize>,
}

impl MitraColumns {
    /// Maps a raw header row to partner fields.
    pub fn resolve(raw_headers: &[String]) -> Self {
        let headers: Vec<String> = raw_headers.iter().map(|h| normalize_header(h)).collect();
        Self {
            nama: find_column(&headers, &["nama lengkap", "nama", "nama mitra"]),
            nik: find_column(&headers, &["nik", "no nik", "nomor induk kependudukan"]),
            sobat_id: find_column(&headers, &["sobat id", "id sobat", "sobat"]),
            alamat: find_column(&headers, &["alamat", "alamat lengkap"]),
            nomor_hp: find_column(&headers, &["nomor hp", "no hp", "hp", "telepon", "no telp"]),
            email: find_column(&headers, &["email", "e-mail", "surel"]),
            jenis_kelamin: find_column(&headers, &["jenis kelamin", "jk", "gender"]),
            pendidikan: find_column(&headers, &["pendidikan", "pendidikan terakhir"]),
            pekerjaan: find_column(&headers, &["pekerjaan", "profesi"]),
        }
    }

    /// The sheet is unusable without name and NIK columns.
    pub fn is_usable(&self) -> bool {
        self.nama.is_some() && self.nik.is_some()
    }
}

/// Resolved column layout for a user-account import sheet.
#[derive(Debug, Clone)]
pub struct UserColumns {
    pub username: Option<usize>,
    pub email: Option<usize>,
    pub password: Option<usize>,
    pub role: Option<usize>,
}

impl UserColumns {
    pub fn resolve(raw_headers: &[String]) -> Self {
        let headers: Vec<String> = raw_headers.iter().map(|h| normalize_header(h)).collect();
        Self {
            username: find_column(&headers, &["username", "nama pengguna", "user"]),
            email: find_column(&headers, &["email", "e-mail", "surel"]),
            password: find_column(&headers, &["password", "kata sandi", "sandi"]),
            role: find_column(&headers, &["role", "peran", "level"]),
        }
    }

    pub fn is_usable(&self) -> bool {
        self.username.is_some() && self.email.is_some()
    }
}

/// Resolved column layout for a roster-candidate preview sheet.
#[derive(Debug, Clone)]
pub struct KandidatColumns {
    pub sobat_id: Option<usize>,
    pub nama: Option<usize>,
    pub jabatan: Option<usize>,
    pub volume: Option<usize>,
}

impl KandidatColumns {
    pub fn resolve(raw_headers: &[String]) -> Self {
        let headers: Vec<String> = raw_headers.iter().map(|h| normalize_header(h)).collect();
        Self {
            sobat_id: find_column(&headers, &["sobat id", "id sobat", "sobat"]),
            nama: find_column(&headers, &["nama lengkap", "nama", "nama mitra"]),
            jabatan: find_column(&headers, &["jabatan", "posisi", "jabatan mitra"]),
            volume: find_column(&headers, &["volume", "volume tugas", "target"]),
        }
    }

    pub fn is_usable(&self) -> bool {
        self.sobat_id.is_some() && self.jabatan.is_some()
    }
}

/// Returns the trimmed cell at `index`, or None when the column was not
/// resolved, the row is short, or the cell is blank.
pub fn cell<'a>(record: &'a [String], index: Option<usize>) -> Option<&'a str> {
    let value = record.get(index?)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Case-insensitive substring match in either direction, used to line up a
/// free-text position name against the configured honor positions.
pub fn jabatan_cocok(teks: &str, nama_jabatan: &str) -> bool {
    let teks = teks.trim().to_lowercase();
    let nama = nama_jabatan.trim().to_lowercase();
    if teks.is_empty() || nama.is_empty() {
        return false;
    }
    teks.contains(&nama) || nama.contains(&teks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  NIK  "), "nik");
        assert_eq!(normalize_header("No. HP"), "no hp");
        assert_eq!(normalize_header("Nama   Lengkap"), "nama lengkap");
        assert_eq!(normalize_header("Email:"), "email");
    }

    #[test]
    fn test_mitra_columns_resolve_synonyms() {
        let cols = MitraColumns::resolve(&headers(&[
            "No",
            "NAMA LENGKAP",
            "No. NIK",
            "Sobat ID",
            "No HP",
        ]));
        assert_eq!(cols.nama, Some(1));
        assert_eq!(cols.nik, Some(2));
        assert_eq!(cols.sobat_id, Some(3));
        assert_eq!(cols.nomor_hp, Some(4));
        assert_eq!(cols.email, None);
        assert!(cols.is_usable());
    }

    #[test]
    fn test_mitra_columns_missing_nik_not_usable() {
        let cols = MitraColumns::resolve(&headers(&["Nama", "Alamat"]));
        assert!(!cols.is_usable());
    }

    #[test]
    fn test_user_columns_resolve() {
        let cols = UserColumns::resolve(&headers(&["Username", "E-mail", "Kata Sandi", "Peran"]));
        assert_eq!(cols.username, Some(0));
        assert_eq!(cols.email, Some(1));
        assert_eq!(cols.password, Some(2));
        assert_eq!(cols.role, Some(3));
    }

    #[test]
    fn test_kandidat_columns_resolve() {
        let cols = KandidatColumns::resolve(&headers(&["Sobat ID", "Nama", "Posisi", "Target"]));
        assert_eq!(cols.sobat_id, Some(0));
        assert_eq!(cols.jabatan, Some(2));
        assert_eq!(cols.volume, Some(3));
        assert!(cols.is_usable());
    }

    #[test]
    fn test_cell_extraction() {
        let record: Vec<String> = vec!["  Budi  ".into(), "".into(), "3201".into()];
        assert_eq!(cell(&record, Some(0)), Some("Budi"));
        assert_eq!(cell(&record, Some(1)), None);
        assert_eq!(cell(&record, Some(5)), None);
        assert_eq!(cell(&record, None), None);
    }

    #[test]
    fn test_jabatan_cocok_substring_both_directions() {
        assert!(jabatan_cocok("Petugas Pendataan", "Petugas Pendataan Lapangan"));
        assert!(jabatan_cocok("Petugas Pendataan Lapangan (PPL)", "Petugas Pendataan Lapangan"));
        assert!(jabatan_cocok("PENGAWAS", "Pengawas"));
        assert!(!jabatan_cocok("Pengolah Data", "Pengawas"));
        assert!(!jabatan_cocok("", "Pengawas"));
    }
}
