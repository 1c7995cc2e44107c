//! Spreadsheet upload parsing.
//!
//! Import endpoints accept `multipart/form-data` with the sheet in a
//! `file` field (CSV; Excel exports arrive as CSV from the frontend).
//! Both comma and semicolon delimiters occur in the wild, so the
//! delimiter is sniffed from the header line.

use axum::extract::Multipart;
use std::collections::HashMap;

use crate::error::ApiError;

/// A parsed upload: raw header cells, data rows, and any extra form fields
/// that accompanied the file (e.g. `tahun`).
#[derive(Debug)]
pub struct Upload {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub fields: HashMap<String, String>,
}

/// Reads the multipart body, returning the parsed sheet. Rows keep their
/// 0-based position; callers add the header offset when reporting row
/// numbers.
pub async fn read_upload(mut multipart: Multipart, max_size: usize) -> Result<Upload, ApiError> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut fields = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Gagal membaca form upload: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Gagal membaca isi upload: {}", e)))?;

        if name == "file" {
            if data.len() > max_size {
                return Err(ApiError::BadRequest(format!(
                    "Berkas melebihi batas {} byte",
                    max_size
                )));
            }
            file_bytes = Some(data.to_vec());
        } else if !name.is_empty() {
            fields.insert(name, String::from_utf8_lossy(&data).into_owned());
        }
    }

    let bytes =
        file_bytes.ok_or_else(|| ApiError::BadRequest("Field 'file' wajib diisi".to_string()))?;

    let (headers, rows) = parse_csv(&bytes)?;
    Ok(Upload {
        headers,
        rows,
        fields,
    })
}

/// Parses CSV bytes into a header row plus data rows.
pub fn parse_csv(bytes: &[u8]) -> Result<(Vec<String>, Vec<Vec<String>>), ApiError> {
    let delimiter = detect_delimiter(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);

    let mut records = reader.records();

    let headers = match records.next() {
        Some(Ok(record)) => record.iter().map(|c| c.to_string()).collect(),
        Some(Err(e)) => {
            return Err(ApiError::BadRequest(format!(
                "Baris header tidak dapat dibaca: {}",
                e
            )))
        }
        None => return Err(ApiError::BadRequest("Berkas kosong".to_string())),
    };

    let mut rows = Vec::new();
    for record in records {
        let record =
            record.map_err(|e| ApiError::BadRequest(format!("Baris tidak dapat dibaca: {}", e)))?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok((headers, rows))
}

/// Sniffs the delimiter from the first line: semicolon wins when the line
/// carries more semicolons than commas.
fn detect_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes.split(|&b| b == b'\n').next().unwrap_or(&[]);
    let commas = first_line.iter().filter(|&&b| b == b',').count();
    let semicolons = first_line.iter().filter(|&&b| b == b';').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_comma() {
        let bytes = b"Nama,NIK\nBudi,3201234567890001\nSari,3201234567890002\n";
        let (headers, rows) = parse_csv(bytes).unwrap();
        assert_eq!(headers, vec!["Nama", "NIK"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["Budi", "3201234567890001"]);
    }

    #[test]
    fn test_parse_csv_semicolon() {
        let bytes = b"Nama;NIK\nBudi;3201234567890001\n";
        let (headers, rows) = parse_csv(bytes).unwrap();
        assert_eq!(headers, vec!["Nama", "NIK"]);
        assert_eq!(rows[0], vec!["Budi", "3201234567890001"]);
    }

    #[test]
    fn test_parse_csv_ragged_rows_allowed() {
        let bytes = b"Nama,NIK,Alamat\nBudi,3201\n";
        let (_, rows) = parse_csv(bytes).unwrap();
        assert_eq!(rows[0].len(), 2);
    }

    #[test]
    fn test_parse_csv_empty_file() {
        let result = parse_csv(b"");
        assert!(result.is_err());
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter(b"a,b,c\n1,2,3"), b',');
        assert_eq!(detect_delimiter(b"a;b;c\n1;2;3"), b';');
        assert_eq!(detect_delimiter(b"a;b,c;d\n"), b';');
    }
}
