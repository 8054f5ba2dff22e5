//! SQLite storage implementation

use std::fmt::Write as _;
use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};

use crate::Result;

/// SQLite-backed storage for ingested tables
pub struct SqliteStore {
    conn: Connection,
}

/// Sampled rows shown to the model alongside each CREATE statement
const SCHEMA_SAMPLE_ROWS: usize = 3;

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    // ========== Ingestion Operations ==========

    /// Replace `table` with the given columns and rows, dropping any prior
    /// version. Column affinities are inferred from the cell values
    /// (INTEGER, then REAL, falling back to TEXT). The whole write happens
    /// in one transaction; there is no partial-table rollback across calls.
    pub fn replace_table(
        &mut self,
        table: &str,
        columns: &[String],
        rows: &[Vec<String>],
    ) -> Result<usize> {
        let types = infer_column_types(columns.len(), rows);

        let tx = self.conn.transaction()?;
        tx.execute(&format!("DROP TABLE IF EXISTS {}", quote_ident(table)), [])?;

        let col_defs: Vec<String> = columns
            .iter()
            .zip(&types)
            .map(|(c, t)| format!("{} {}", quote_ident(c), t.as_str()))
            .collect();
        tx.execute(
            &format!("CREATE TABLE {} ({})", quote_ident(table), col_defs.join(", ")),
            [],
        )?;

        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
        let insert_sql = format!(
            "INSERT INTO {} VALUES ({})",
            quote_ident(table),
            placeholders.join(", ")
        );
        {
            let mut stmt = tx.prepare(&insert_sql)?;
            for row in rows {
                let values: Vec<Value> = row
                    .iter()
                    .zip(&types)
                    .map(|(cell, ty)| ty.to_sql_value(cell))
                    .collect();
                stmt.execute(params_from_iter(values))?;
            }
        }
        tx.commit()?;
        Ok(rows.len())
    }

    // ========== Query Operations ==========

    /// Names and row counts of all user tables
    pub fn table_counts(&self) -> Result<Vec<(String, i64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let names: Vec<String> = stmt
            .query_map([], |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();

        let mut counts = Vec::with_capacity(names.len());
        for name in names {
            let count: i64 = self.conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", quote_ident(&name)),
                [],
                |row| row.get(0),
            )?;
            counts.push((name, count));
        }
        Ok(counts)
    }

    /// Describe the schema for prompting: each table's CREATE statement plus
    /// a few sample rows, so the model sees real column names and values.
    pub fn describe_schema(&self) -> Result<String> {
        let mut stmt = self.conn.prepare(
            "SELECT name, sql FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let tables: Vec<(String, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .filter_map(|r| r.ok())
            .collect();

        let mut out = String::new();
        for (name, create_sql) in tables {
            writeln!(out, "{create_sql}").ok();
            let sample = self.execute_query(&format!(
                "SELECT * FROM {} LIMIT {}",
                quote_ident(&name),
                SCHEMA_SAMPLE_ROWS
            ))?;
            writeln!(out, "/*").ok();
            writeln!(out, "{} rows from {} table:", sample.rows.len(), name).ok();
            writeln!(out, "{}", sample.columns.join("\t")).ok();
            for row in &sample.rows {
                writeln!(out, "{}", row.join("\t")).ok();
            }
            writeln!(out, "*/\n").ok();
        }
        Ok(out.trim_end().to_string())
    }

    /// Execute an arbitrary query string, returning column names and
    /// stringified rows. Raises on execution failure.
    pub fn execute_query(&self, sql: &str) -> Result<QueryOutput> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
        let width = columns.len();

        let rows: Vec<Vec<String>> = stmt
            .query_map([], |row| {
                let mut vals = Vec::with_capacity(width);
                for i in 0..width {
                    let val = match row.get::<_, Value>(i)? {
                        Value::Null => "NULL".to_string(),
                        Value::Integer(n) => n.to_string(),
                        Value::Real(f) => f.to_string(),
                        Value::Text(s) => s,
                        Value::Blob(_) => "[BLOB]".to_string(),
                    };
                    vals.push(val);
                }
                Ok(vals)
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(QueryOutput { columns, rows })
    }
}

/// Tabular result of an executed query
#[derive(Debug, Clone, serde::Serialize)]
pub struct QueryOutput {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl QueryOutput {
    /// Compact single-string rendering fed back to the model for rephrasing.
    pub fn render_compact(&self) -> String {
        let tuples: Vec<String> = self
            .rows
            .iter()
            .map(|row| format!("({})", row.join(", ")))
            .collect();
        format!("[{}]", tuples.join(", "))
    }
}

/// Quote an identifier for SQLite, doubling any embedded quotes
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Integer,
    Real,
    Text,
}

impl ColumnType {
    fn as_str(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        }
    }

    fn to_sql_value(self, cell: &str) -> Value {
        match self {
            ColumnType::Text => Value::Text(cell.to_string()),
            _ if cell.is_empty() => Value::Null,
            ColumnType::Integer => cell
                .parse::<i64>()
                .map(Value::Integer)
                .unwrap_or(Value::Null),
            ColumnType::Real => cell.parse::<f64>().map(Value::Real).unwrap_or(Value::Null),
        }
    }
}

/// Infer an affinity per column: INTEGER if every non-empty cell parses as
/// one, REAL likewise, otherwise TEXT. Columns with no non-empty cells stay
/// TEXT.
fn infer_column_types(width: usize, rows: &[Vec<String>]) -> Vec<ColumnType> {
    (0..width)
        .map(|i| {
            let mut saw_value = false;
            let mut all_int = true;
            let mut all_real = true;
            for row in rows {
                let cell = row[i].trim();
                if cell.is_empty() {
                    continue;
                }
                saw_value = true;
                if all_int && cell.parse::<i64>().is_err() {
                    all_int = false;
                }
                if all_real && cell.parse::<f64>().is_err() {
                    all_real = false;
                }
                if !all_int && !all_real {
                    break;
                }
            }
            match (saw_value, all_int, all_real) {
                (false, _, _) => ColumnType::Text,
                (true, true, _) => ColumnType::Integer,
                (true, false, true) => ColumnType::Real,
                _ => ColumnType::Text,
            }
        })
        .collect()
}
