//! Error taxonomy for the lookup pipeline.
//!
//! Only configuration problems (unreadable table, missing identifier column)
//! and export I/O are errors. "Nothing typed" and "nothing matched" are normal
//! outcomes of a search and live in [`SearchOutcome`](crate::types::SearchOutcome)
//! instead.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The reference table file does not exist.
    #[error("reference table not found: {}", .0.display())]
    TableNotFound(PathBuf),

    /// None of the identifier aliases matched a header cell.
    #[error("identifier column not found (accepted headers: {aliases}); found: {found}")]
    MissingIdentifierColumn { aliases: String, found: String },

    /// A sheet was requested by name but the workbook does not contain it.
    #[error("sheet {name:?} not found in {}", .path.display())]
    SheetNotFound { name: String, path: PathBuf },

    /// The table has no header row at all.
    #[error("reference table {} is empty", .0.display())]
    EmptyTable(PathBuf),

    #[error("unsupported reference table format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("spreadsheet read failed: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("xlsx export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LookupError>;
