use tabled::builder::Builder;
use tabled::settings::Style;

use crate::storage::QueryOutput;

/// Render a query result as a terminal table
pub fn results_table(output: &QueryOutput) -> String {
    if output.rows.is_empty() {
        return "(no rows)".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(output.columns.iter().cloned());
    for row in &output.rows {
        builder.push_record(row.iter().cloned());
    }

    builder.build().with(Style::rounded()).to_string()
}

/// Render table names with row counts
pub fn counts_table(counts: &[(String, i64)]) -> String {
    if counts.is_empty() {
        return "(no tables)".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Table", "Rows"]);
    for (name, rows) in counts {
        builder.push_record([name.clone(), rows.to_string()]);
    }

    builder.build().with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_table_contains_cells() {
        let out = QueryOutput {
            columns: vec!["item".into(), "total".into()],
            rows: vec![vec!["widget".into(), "42".into()]],
        };
        let rendered = results_table(&out);
        assert!(rendered.contains("item"));
        assert!(rendered.contains("widget"));
        assert!(rendered.contains("42"));
    }

    #[test]
    fn test_empty_results() {
        let out = QueryOutput { columns: vec!["a".into()], rows: vec![] };
        assert_eq!(results_table(&out), "(no rows)");
    }
}
