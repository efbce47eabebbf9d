//! Core types for prodlook-core.
//!
//! This module defines the data shared by every pipeline stage: the immutable
//! [`ReferenceTable`] loaded once per session, the per-search [`ResultSet`],
//! and the [`SearchOutcome`] that tells the caller which notice to show.

use serde::Serialize;

/// Column headers of the result table, in display and export order.
pub const RESULT_HEADERS: [&str; 4] = ["#", "Product ID", "Description", "Price"];

/// One record of the reference table. Every field is raw cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRow {
    pub identifier: String,
    pub description: String,
    pub price: String,
}

impl ReferenceRow {
    pub fn new(
        identifier: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            description: description.into(),
            price: price.into(),
        }
    }
}

/// The reference table, read once at startup and never mutated afterwards.
///
/// Share it behind an `Arc`; nothing in the pipeline needs `&mut`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    rows: Vec<ReferenceRow>,
    /// Human-readable origin (file path or `"<memory>"`), shown in the UI.
    source: String,
}

impl ReferenceTable {
    pub fn new(rows: Vec<ReferenceRow>, source: impl Into<String>) -> Self {
        Self { rows, source: source.into() }
    }

    /// Build an in-memory table from `(identifier, description, price)` triples.
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|(id, desc, price)| ReferenceRow::new(id, desc, price))
            .collect();
        Self::new(rows, "<memory>")
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A matched, normalised row as displayed and exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    /// Dense 1-based position within the result set.
    pub sequence_number: usize,
    pub identifier: String,
    /// Uppercased description.
    pub description: String,
    /// Currency-prefixed price, or empty when the source cell was a null marker.
    pub price: String,
}

impl ResultRow {
    /// Cell texts in [`RESULT_HEADERS`] order.
    pub fn cells(&self) -> [String; 4] {
        [
            self.sequence_number.to_string(),
            self.identifier.clone(),
            self.description.clone(),
            self.price.clone(),
        ]
    }
}

/// The ordered rows produced by one search. Replaced wholesale by the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    rows: Vec<ResultRow>,
}

impl ResultSet {
    pub fn new(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.identifier.as_str())
    }
}

/// What a single search produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The input held no tokens; prompt the user to type something.
    EmptyInput,
    /// Tokens were parsed but none of them is in the reference table.
    NoMatches { tokens: Vec<String> },
    /// At least one row matched.
    Found(ResultSet),
}

impl SearchOutcome {
    /// The result rows, if any. Export is only offered when this is `Some`.
    pub fn result_set(&self) -> Option<&ResultSet> {
        match self {
            SearchOutcome::Found(set) => Some(set),
            _ => None,
        }
    }
}
