//! Builders that write reference tables to disk in the formats the loader reads.
//!
//! These panic on I/O errors rather than returning `Result`; they are only
//! used to set up test fixtures.

use std::path::{Path, PathBuf};

/// One cell of a fixture spreadsheet.
#[derive(Debug, Clone, Copy)]
pub enum Val {
    Text(&'static str),
    Num(f64),
}

/// Write `rows` (header first) as a CSV file named `name` inside `dir`.
pub fn write_csv_table(dir: &Path, name: &str, rows: &[&[&str]]) -> PathBuf {
    let path = dir.join(name);
    let mut w = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(&path)
        .expect("create csv fixture");
    for row in rows {
        w.write_record(*row).expect("write csv row");
    }
    w.flush().expect("flush csv fixture");
    path
}

/// Write `rows` (header first) to an `.xlsx` workbook with one sheet.
pub fn write_xlsx_table(dir: &Path, name: &str, sheet: &str, rows: &[Vec<Val>]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).expect("sheet name");
    for (r, row) in rows.iter().enumerate() {
        for (c, val) in row.iter().enumerate() {
            let (r, c) = (r as u32, c as u16);
            match *val {
                Val::Text(s) => worksheet.write_string(r, c, s).expect("write cell"),
                Val::Num(n) => worksheet.write_number(r, c, n).expect("write cell"),
            };
        }
    }
    workbook.save(&path).expect("save xlsx fixture");
    path
}

/// Minimal config file pointing exports at `export_dir`.
pub fn write_config(dir: &Path, export_dir: &Path) -> PathBuf {
    let path = dir.join("config.toml");
    let body = format!(
        "[export]\ndirectory = {:?}\n\n[ui]\nlogo_path = {:?}\n",
        export_dir.display().to_string(),
        dir.join("no-logo.txt").display().to_string(),
    );
    std::fs::write(&path, body).expect("write config fixture");
    path
}
