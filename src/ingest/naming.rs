//! Identifier normalization for ingested tables and columns.

use std::collections::HashMap;

/// Derive a storage table name from a source file name.
///
/// Strips the extension, replaces hyphens and spaces with underscores,
/// removes the literal `(mapped)` export marker, and trims leading/trailing
/// underscores. Pure and total; the result is not validated against SQL
/// identifier rules.
pub fn table_name_from_file(filename: &str) -> String {
    let stem = match filename.rfind('.') {
        Some(i) => &filename[..i],
        None => filename,
    };
    stem.replace(['-', ' '], "_")
        .replace("(mapped)", "")
        .trim_matches('_')
        .to_string()
}

/// Normalize a header row into column identifiers.
///
/// Spaces become underscores; parentheses and NUL bytes are removed. Distinct
/// source names can normalize to the same string, so duplicates are
/// disambiguated with a deterministic numeric suffix rather than silently
/// overwriting each other: the first occurrence keeps its name, later ones
/// get `_2`, `_3`, and so on.
pub fn normalize_columns(headers: &[String]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    headers
        .iter()
        .map(|h| {
            let base = h.replace(' ', "_").replace(['(', ')', '\0'], "");
            let n = counts.entry(base.clone()).or_insert(0);
            *n += 1;
            if *n == 1 { base } else { format!("{}_{}", base, n) }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_table_name_from_mapped_export() {
        assert_eq!(
            table_name_from_file("Product-Level Ad Sales and Metrics (mapped).csv"),
            "Product_Level_Ad_Sales_and_Metrics"
        );
    }

    #[test]
    fn test_table_name_without_marker_or_extension() {
        assert_eq!(table_name_from_file("daily-totals.csv"), "daily_totals");
        assert_eq!(table_name_from_file("plain"), "plain");
    }

    #[test]
    fn test_table_name_is_not_validated() {
        // Malformed results pass through uncorrected.
        assert_eq!(table_name_from_file("(mapped).csv"), "");
        assert_eq!(table_name_from_file("123 weird!.csv"), "123_weird!");
    }

    #[test]
    fn test_column_normalization() {
        let out = normalize_columns(&cols(&["Ad Spend (USD)", "item_id", "date"]));
        assert_eq!(out, vec!["Ad_Spend_USD", "item_id", "date"]);
    }

    #[test]
    fn test_column_nul_bytes_removed() {
        let out = normalize_columns(&cols(&["it\0em id"]));
        assert_eq!(out, vec!["item_id"]);
    }

    #[test]
    fn test_colliding_columns_get_numeric_suffixes() {
        let out = normalize_columns(&cols(&["Ad Spend (USD)", "Ad Spend USD", "Ad_Spend_USD"]));
        assert_eq!(out, vec!["Ad_Spend_USD", "Ad_Spend_USD_2", "Ad_Spend_USD_3"]);
    }
}
