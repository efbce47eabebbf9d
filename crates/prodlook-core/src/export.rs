//! Export: serialises a [`ResultSet`] to CSV and to a single-sheet workbook.
//!
//! Both formats carry exactly the columns shown on screen, in the same order
//! ([`RESULT_HEADERS`]), with the sequence number included.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook};

use crate::{
    config::ExportConfig,
    error::Result,
    types::{ResultSet, RESULT_HEADERS},
};

pub const CSV_MIME: &str = "text/csv";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Extra characters added to the longest cell when sizing a column.
const COLUMN_MARGIN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_MIME,
            ExportFormat::Xlsx => XLSX_MIME,
        }
    }

    pub fn file_name(self, cfg: &ExportConfig) -> &str {
        match self {
            ExportFormat::Csv => &cfg.csv_file_name,
            ExportFormat::Xlsx => &cfg.xlsx_file_name,
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            other => Err(format!("unknown export format: {other} (expected csv or xlsx)")),
        }
    }
}

/// Serialised export ready to be written or handed to a download sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Serialise `results` in `format`, named according to `cfg`.
pub fn export(results: &ResultSet, format: ExportFormat, cfg: &ExportConfig) -> Result<ExportPayload> {
    let bytes = match format {
        ExportFormat::Csv => to_csv(results)?,
        ExportFormat::Xlsx => to_xlsx(results, &cfg.sheet_name)?,
    };
    tracing::debug!(%format, rows = results.len(), bytes = bytes.len(), "export serialised");
    Ok(ExportPayload {
        file_name: format.file_name(cfg).to_string(),
        mime_type: format.mime_type(),
        bytes,
    })
}

/// Write `payload` into `dir`, returning the full path of the new file.
pub fn write_payload(dir: &Path, payload: &ExportPayload) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&payload.file_name);
    std::fs::write(&path, &payload.bytes)?;
    tracing::info!(path = %path.display(), bytes = payload.bytes.len(), "export written");
    Ok(path)
}

/// UTF-8, comma-delimited, header row first.
pub fn to_csv(results: &ResultSet) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(RESULT_HEADERS)?;
    for row in results.rows() {
        writer.write_record(row.cells())?;
    }
    writer.into_inner().map_err(|e| e.into_error().into())
}

/// Single-sheet workbook with the header in bold and fitted column widths.
pub fn to_xlsx(results: &ResultSet, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    let bold = Format::new().set_bold();
    for (col, header) in RESULT_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    for (i, row) in results.rows().iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_number(r, 0, row.sequence_number as f64)?;
        sheet.write_string(r, 1, &row.identifier)?;
        sheet.write_string(r, 2, &row.description)?;
        sheet.write_string(r, 3, &row.price)?;
    }

    for (col, width) in column_widths(results).into_iter().enumerate() {
        sheet.set_column_width(col as u16, width as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Longest cell (header included, counted in characters) plus a margin.
pub fn column_widths(results: &ResultSet) -> [usize; 4] {
    let mut widths = RESULT_HEADERS.map(|h| h.chars().count());
    for row in results.rows() {
        for (w, cell) in widths.iter_mut().zip(row.cells()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths.map(|w| w + COLUMN_MARGIN)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
