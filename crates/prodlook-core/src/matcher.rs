//! Matcher / normaliser: filters the reference table by token set and
//! formats the surviving rows for display.
//!
//! The filter is stable: results come out in reference-table order, never in
//! the order the codes were typed. Identifiers are compared as text, so
//! `"007"` and `"7"` are different products.

use std::collections::HashSet;

use crate::{
    config::FormatConfig,
    parser::parse_tokens,
    types::{ReferenceTable, ResultRow, ResultSet, SearchOutcome},
};

/// Parse `input` and match it against `table`. Single entry point for both
/// the TUI and the headless CLI.
pub fn search(table: &ReferenceTable, input: &str, fmt: &FormatConfig) -> SearchOutcome {
    let tokens = parse_tokens(input);
    if tokens.is_empty() {
        tracing::debug!("search: empty input");
        return SearchOutcome::EmptyInput;
    }
    match_rows(table, &tokens, fmt)
}

/// Filter `table` to rows whose trimmed identifier is one of `tokens`.
pub fn match_rows(table: &ReferenceTable, tokens: &[String], fmt: &FormatConfig) -> SearchOutcome {
    if tokens.is_empty() {
        return SearchOutcome::EmptyInput;
    }

    let wanted: HashSet<&str> = tokens.iter().map(String::as_str).collect();

    let rows: Vec<ResultRow> = table
        .rows()
        .iter()
        .filter(|row| wanted.contains(row.identifier.trim()))
        .enumerate()
        .map(|(i, row)| ResultRow {
            sequence_number: i + 1,
            identifier: row.identifier.trim().to_string(),
            description: normalize_description(&row.description),
            price: normalize_price(&row.price, fmt),
        })
        .collect();

    tracing::debug!(tokens = tokens.len(), matched = rows.len(), "search: matched");

    if rows.is_empty() {
        SearchOutcome::NoMatches { tokens: tokens.to_vec() }
    } else {
        SearchOutcome::Found(ResultSet::new(rows))
    }
}

/// Uppercase a description. A missing description is already `""`.
pub fn normalize_description(description: &str) -> String {
    description.to_uppercase()
}

/// Prefix a price with the currency symbol, keeping the original digits.
///
/// Empty cells and null markers (`nan`, `n/a`, …) become `""`. Values that
/// already carry the symbol are returned trimmed, so the function is
/// idempotent. Whitespace around the configured symbol is ignored.
pub fn normalize_price(price: &str, fmt: &FormatConfig) -> String {
    let trimmed = price.trim();
    if trimmed.is_empty() || is_null_marker(trimmed, &fmt.null_markers) {
        return String::new();
    }
    let symbol = fmt.currency_symbol.trim();
    if trimmed.starts_with(symbol) {
        trimmed.to_string()
    } else {
        format!("{symbol}{trimmed}")
    }
}

fn is_null_marker(value: &str, markers: &[String]) -> bool {
    let value = value.to_lowercase();
    markers.iter().any(|m| m.to_lowercase() == value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
