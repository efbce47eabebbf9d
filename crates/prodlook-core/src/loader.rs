//! Reference loader: reads the product table into a [`ReferenceTable`].
//!
//! Every cell is taken as text so that codes like `00123` and prices like
//! `9.90` keep the exact form they have in the sheet. The first row is the
//! header row; the identifier, description and price columns are located by
//! case-insensitive alias matching (see [`ColumnAliases`]).
//!
//! Supported sources: anything `calamine` opens (`.xlsx`, `.xlsm`, `.xlsb`,
//! `.xls`, `.ods`) and plain `.csv`.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::{
    config::{ColumnAliases, ReferenceConfig},
    error::{LookupError, Result},
    types::{ReferenceRow, ReferenceTable},
};

/// Where each logical column sits in the source grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub identifier: usize,
    pub description: Option<usize>,
    pub price: Option<usize>,
}

/// Load the table described by a `[reference]` config section.
pub fn load_reference(cfg: &ReferenceConfig, aliases: &ColumnAliases) -> Result<ReferenceTable> {
    load_table(&cfg.path, cfg.sheet.as_deref(), aliases)
}

/// Read `path` and build a [`ReferenceTable`] from it.
pub fn load_table(path: &Path, sheet: Option<&str>, aliases: &ColumnAliases) -> Result<ReferenceTable> {
    if !path.exists() {
        return Err(LookupError::TableNotFound(path.to_path_buf()));
    }

    let grid = read_grid(path, sheet)?;
    if grid.is_empty() {
        return Err(LookupError::EmptyTable(path.to_path_buf()));
    }

    let table = table_from_grid(grid, aliases, path.display().to_string())?;
    tracing::info!(path = %path.display(), rows = table.len(), "reference table loaded");
    Ok(table)
}

/// Read every cell of the source as text, header row included.
pub fn read_grid(path: &Path, sheet: Option<&str>) -> Result<Vec<Vec<String>>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => read_csv_grid(path),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook_grid(path, sheet),
        _ => Err(LookupError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn read_workbook_grid(path: &Path, sheet: Option<&str>) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)?;

    let name = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(LookupError::SheetNotFound {
                    name: name.to_string(),
                    path: path.to_path_buf(),
                });
            }
            name.to_string()
        }
        None => match workbook.sheet_names().first() {
            Some(first) => first.clone(),
            None => return Err(LookupError::EmptyTable(path.to_path_buf())),
        },
    };

    tracing::debug!(sheet = %name, "reading worksheet");
    let range = workbook.worksheet_range(&name)?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn read_csv_grid(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(record.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

/// Text form of a spreadsheet cell.
///
/// Numbers use their shortest display form (`100.0` → `"100"`). Empty and
/// error cells become `""`. Booleans read as `true`/`false`, ISO date and
/// duration strings are kept verbatim, and Excel date cells read as their
/// serial number, which is what the cell holds before number formatting.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
    }
}

/// Build a table from a text grid whose first row is the header.
pub fn table_from_grid(
    mut grid: Vec<Vec<String>>,
    aliases: &ColumnAliases,
    source: impl Into<String>,
) -> Result<ReferenceTable> {
    if grid.is_empty() {
        return Err(LookupError::MissingIdentifierColumn {
            aliases: aliases.identifier.join(", "),
            found: String::new(),
        });
    }

    let headers = grid.remove(0);
    let columns = resolve_columns(&headers, aliases)?;

    let rows = grid
        .into_iter()
        .filter(|row| row.iter().any(|c| !c.trim().is_empty()))
        .map(|row| {
            let cell = |idx: Option<usize>| -> String {
                idx.and_then(|i| row.get(i)).cloned().unwrap_or_default()
            };
            ReferenceRow {
                identifier: cell(Some(columns.identifier)),
                description: cell(columns.description),
                price: cell(columns.price),
            }
        })
        .collect();

    Ok(ReferenceTable::new(rows, source))
}

/// Locate the three logical columns in a header row.
///
/// Fails only when the identifier column is missing; description and price
/// fall back to empty cells with a warning.
pub fn resolve_columns(headers: &[String], aliases: &ColumnAliases) -> Result<ColumnMap> {
    let identifier = find_column(headers, &aliases.identifier).ok_or_else(|| {
        LookupError::MissingIdentifierColumn {
            aliases: aliases.identifier.join(", "),
            found: headers.join(", "),
        }
    })?;

    let description = find_column(headers, &aliases.description);
    if description.is_none() {
        tracing::warn!(headers = ?headers, "no description column; descriptions will be empty");
    }
    let price = find_column(headers, &aliases.price);
    if price.is_none() {
        tracing::warn!(headers = ?headers, "no price column; prices will be empty");
    }

    tracing::debug!(identifier, ?description, ?price, "columns resolved");
    Ok(ColumnMap { identifier, description, price })
}

/// Index of the first header equal (case-insensitively, trimmed) to any alias.
///
/// Aliases are tried in order, so an earlier alias wins over a later one even
/// when the later one appears further left in the sheet.
pub fn find_column(headers: &[String], aliases: &[String]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    aliases.iter().find_map(|alias| {
        let alias = normalize_header(alias);
        normalized.iter().position(|h| *h == alias)
    })
}

fn normalize_header(h: &str) -> String {
    h.trim_start_matches('\u{feff}').trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
