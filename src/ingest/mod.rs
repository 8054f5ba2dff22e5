//! Ingestion utility - loads the source CSV exports into SQLite.
//!
//! Each run fully replaces the tables it writes; there is no merge, append,
//! or versioning. Failures are isolated per file: a missing or malformed
//! file is reported and the run continues with the next one.

pub mod naming;
pub mod reader;

use std::path::Path;

use crate::storage::SqliteStore;
use crate::ui;

/// The fixed set of source exports loaded by an ingestion run.
pub const SOURCE_FILES: [&str; 3] = [
    "Product-Level Ad Sales and Metrics (mapped).csv",
    "Product-Level Eligibility Table (mapped).csv",
    "Product-Level Total Sales and Metrics (mapped).csv",
];

/// Outcome of one loaded file
#[derive(Debug)]
pub struct LoadedTable {
    pub file: String,
    pub table: String,
    pub rows: usize,
    pub skipped_rows: usize,
}

/// Outcome of a whole ingestion run
#[derive(Debug, Default)]
pub struct IngestReport {
    pub loaded: Vec<LoadedTable>,
    pub missing: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.failed.is_empty()
    }
}

/// Load each named file from `data_dir` into the store, printing a per-file
/// status line. Errors are caught per file; processing always continues.
pub fn run(store: &mut SqliteStore, data_dir: &Path, files: &[&str]) -> IngestReport {
    let mut report = IngestReport::default();

    for file in files {
        let path = data_dir.join(file);
        if !path.exists() {
            ui::warn(&format!("File not found - '{file}'"));
            report.missing.push(file.to_string());
            continue;
        }

        let table = naming::table_name_from_file(file);
        match load_file(store, &path, &table) {
            Ok(loaded) => {
                ui::success(&format!(
                    "Loaded '{}' into table '{}' ({} rows{})",
                    file,
                    table,
                    loaded.rows,
                    if loaded.skipped_rows > 0 {
                        format!(", {} skipped", loaded.skipped_rows)
                    } else {
                        String::new()
                    }
                ));
                report.loaded.push(LoadedTable {
                    file: file.to_string(),
                    ..loaded
                });
            }
            Err(e) => {
                ui::error(&format!("Failed to load '{file}': {e}"));
                report.failed.push((file.to_string(), e.to_string()));
            }
        }
    }

    report
}

fn load_file(store: &mut SqliteStore, path: &Path, table: &str) -> crate::Result<LoadedTable> {
    let source = reader::read_latin1_csv(path)?;
    let columns = naming::normalize_columns(&source.headers);
    let rows = store.replace_table(table, &columns, &source.rows)?;
    tracing::info!("wrote {} rows into table {}", rows, table);
    Ok(LoadedTable {
        file: String::new(),
        table: table.to_string(),
        rows,
        skipped_rows: source.skipped_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_run_continues_past_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(dir.path(), "a-table.csv", "item id,Ad Spend (USD)\n1,10.5\n");
        write_csv(dir.path(), "c-table.csv", "item id,total\n1,3\n2,4\n");

        let mut store = SqliteStore::open_in_memory().unwrap();
        let report = run(
            &mut store,
            dir.path(),
            &["a-table.csv", "b-missing.csv", "c-table.csv"],
        );

        assert_eq!(report.loaded.len(), 2);
        assert_eq!(report.missing, vec!["b-missing.csv"]);
        assert!(report.failed.is_empty());

        // Both present files landed, independently of the missing one.
        let counts = store.table_counts().unwrap();
        assert_eq!(
            counts,
            vec![("a_table".to_string(), 1), ("c_table".to_string(), 2)]
        );
    }

    #[test]
    fn test_run_normalizes_columns_and_skips_bad_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(
            dir.path(),
            "Product-Level Ad Sales and Metrics (mapped).csv",
            "item id,Ad Spend (USD)\n1,10.5\n2,3.0,extra\n3,7.0\n",
        );

        let mut store = SqliteStore::open_in_memory().unwrap();
        let report = run(
            &mut store,
            dir.path(),
            &["Product-Level Ad Sales and Metrics (mapped).csv"],
        );

        assert_eq!(report.loaded.len(), 1);
        assert_eq!(report.loaded[0].table, "Product_Level_Ad_Sales_and_Metrics");
        assert_eq!(report.loaded[0].rows, 2);
        assert_eq!(report.loaded[0].skipped_rows, 1);

        let out = store
            .execute_query("SELECT Ad_Spend_USD FROM Product_Level_Ad_Sales_and_Metrics ORDER BY item_id")
            .unwrap();
        assert_eq!(out.columns, vec!["Ad_Spend_USD"]);
        assert_eq!(out.rows, vec![vec!["10.5"], vec!["7"]]);
    }

    #[test]
    fn test_rerun_replaces_tables() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(dir.path(), "t.csv", "x\n1\n2\n");

        let mut store = SqliteStore::open_in_memory().unwrap();
        run(&mut store, dir.path(), &["t.csv"]);

        write_csv(dir.path(), "t.csv", "x\n9\n");
        run(&mut store, dir.path(), &["t.csv"]);

        let out = store.execute_query("SELECT x FROM t").unwrap();
        assert_eq!(out.rows, vec![vec!["9"]]);
    }
}
