use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use prodlook_core::{
    config::Config,
    export::{self, ExportFormat},
    loader, search, ResultSet, SearchOutcome,
};

#[derive(Parser)]
#[command(name = "prodlook", about = "Paste product codes, get a clean table, export it")]
struct Cli {
    /// Reference table to load (overrides `[reference] path` in the config).
    #[arg(long, global = true)]
    table: Option<PathBuf>,

    /// Config file to use instead of ~/.config/prodlook/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write debug logs to $TMPDIR/prodlook-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Look codes up without the TUI and print the matches.
    Query {
        /// Product codes; each argument may hold several, separated by
        /// commas, semicolons or whitespace.
        codes: Vec<String>,

        /// Also write the results as CSV to this path.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Also write the results as an Excel workbook to this path.
        #[arg(long)]
        xlsx: Option<PathBuf>,

        /// Print one JSON object per result row instead of a table.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        init_debug_log()?;
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "config load failed, using defaults");
            Config::defaults()
        }),
    };
    if let Some(table) = cli.table {
        config.reference.path = table;
    }

    let table = loader::load_reference(&config.reference, &config.columns).with_context(|| {
        format!("could not load reference table {}", config.reference.path.display())
    })?;
    let table = Arc::new(table);

    match cli.command {
        None => prodlook_tui::run(table, config),
        Some(Cmd::Query { codes, csv, xlsx, json }) => {
            let input = codes.join(" ");
            match search(&table, &input, &config.format) {
                SearchOutcome::EmptyInput => {
                    eprintln!("no product codes given");
                }
                SearchOutcome::NoMatches { tokens } => {
                    eprintln!("no products found for {} code(s)", tokens.len());
                }
                SearchOutcome::Found(results) => {
                    if json {
                        for row in results.rows() {
                            println!("{}", serde_json::to_string(row)?);
                        }
                    } else {
                        print!("{}", render_table(&results));
                    }
                    if let Some(path) = csv {
                        write_export(&results, ExportFormat::Csv, &config, path)?;
                    }
                    if let Some(path) = xlsx {
                        write_export(&results, ExportFormat::Xlsx, &config, path)?;
                    }
                }
            }
            Ok(())
        }
    }
}

fn init_debug_log() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join("prodlook-debug.log");
    let file = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();
    tracing::info!(path = %path.display(), "prodlook debug log started");
    Ok(())
}

fn write_export(
    results: &ResultSet,
    format: ExportFormat,
    config: &Config,
    path: PathBuf,
) -> anyhow::Result<()> {
    let payload = export::export(results, format, &config.export)?;
    std::fs::write(&path, &payload.bytes)
        .with_context(|| format!("could not write {}", path.display()))?;
    eprintln!("saved {}", path.display());
    Ok(())
}

/// Plain aligned table for terminal output; columns padded to their widest cell.
fn render_table(results: &ResultSet) -> String {
    let header = prodlook_core::types::RESULT_HEADERS.map(str::to_string);
    let rows: Vec<[String; 4]> = results.rows().iter().map(|r| r.cells()).collect();

    let mut widths = [0usize; 4];
    for row in std::iter::once(&header).chain(rows.iter()) {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}
