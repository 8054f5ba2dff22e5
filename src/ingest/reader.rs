//! CSV reading for the fixed Latin-1 source exports.

use std::path::Path;

use crate::Result;

/// A tabular source file held in memory: raw header row plus string cells.
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Rows dropped because they failed to parse or had the wrong width.
    pub skipped_rows: usize,
}

/// Read a CSV file in the legacy 8-bit export encoding (Windows-1252, a
/// superset of Latin-1). Malformed rows are skipped individually instead of
/// failing the whole file.
pub fn read_latin1_csv(path: &Path) -> Result<SourceTable> {
    let bytes = std::fs::read(path)?;
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    let mut skipped_rows = 0;
    for record in reader.records() {
        match record {
            Ok(rec) if rec.len() == headers.len() => {
                rows.push(rec.iter().map(|v| v.to_string()).collect());
            }
            Ok(rec) => {
                tracing::debug!(
                    "skipping row with {} fields (expected {}) in {}",
                    rec.len(),
                    headers.len(),
                    path.display()
                );
                skipped_rows += 1;
            }
            Err(e) => {
                tracing::debug!("skipping unparseable row in {}: {}", path.display(), e);
                skipped_rows += 1;
            }
        }
    }

    Ok(SourceTable { headers, rows, skipped_rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(bytes).unwrap();
        f
    }

    #[test]
    fn test_reads_headers_and_rows() {
        let f = write_temp(b"item id,Ad Spend (USD)\n1,10.5\n2,3.0\n");
        let table = read_latin1_csv(f.path()).unwrap();
        assert_eq!(table.headers, vec!["item id", "Ad Spend (USD)"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["1", "10.5"]);
        assert_eq!(table.skipped_rows, 0);
    }

    #[test]
    fn test_skips_rows_with_wrong_width() {
        let f = write_temp(b"a,b\n1,2\n1,2,3\n4,5\n");
        let table = read_latin1_csv(f.path()).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.skipped_rows, 1);
    }

    #[test]
    fn test_decodes_latin1_bytes() {
        // 0xE9 is 'é' in Latin-1 and invalid on its own in UTF-8.
        let f = write_temp(b"name\ncaf\xe9\n");
        let table = read_latin1_csv(f.path()).unwrap();
        assert_eq!(table.rows[0][0], "caf\u{e9}");
    }
}
