//! Configuration types for prodlook.
//!
//! [`Config::load`] reads `~/.config/prodlook/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[reference]
path = "reference.xlsx"

[columns]
identifier  = ["Product ID", "Code", "Código", "Codigo", "SKU", "ID"]
description = ["Description", "Descrição", "Descricao", "Name", "Product", "Produto"]
price       = ["Price", "Preço", "Preco", "Valor", "Unit Price"]

[format]
currency_symbol = "$"
null_markers    = ["nan", "none", "na", "n/a"]

[export]
directory      = "."
csv_file_name  = "resultado.csv"
xlsx_file_name = "resultado_codigos.xlsx"
sheet_name     = "Resultados"

[ui]
theme     = "default"
logo_path = "logo.txt"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/prodlook/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reference: ReferenceConfig,
    #[serde(default)]
    pub columns: ColumnAliases,
    #[serde(default)]
    pub format: FormatConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[reference]` section: where the reference table lives.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceConfig {
    #[serde(default = "default_reference_path")]
    pub path: PathBuf,
    /// Worksheet to read. The first sheet is used when unset.
    #[serde(default)]
    pub sheet: Option<String>,
}

fn default_reference_path() -> PathBuf { PathBuf::from("reference.xlsx") }

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self { path: default_reference_path(), sheet: None }
    }
}

/// `[columns]` section: accepted header names for each column.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnAliases {
    #[serde(default = "default_identifier_aliases")]
    pub identifier: Vec<String>,
    #[serde(default = "default_description_aliases")]
    pub description: Vec<String>,
    #[serde(default = "default_price_aliases")]
    pub price: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_identifier_aliases() -> Vec<String> {
    strings(&["Product ID", "Code", "Código", "Codigo", "SKU", "ID"])
}
fn default_description_aliases() -> Vec<String> {
    strings(&["Description", "Descrição", "Descricao", "Name", "Product", "Produto"])
}
fn default_price_aliases() -> Vec<String> {
    strings(&["Price", "Preço", "Preco", "Valor", "Unit Price"])
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            identifier: default_identifier_aliases(),
            description: default_description_aliases(),
            price: default_price_aliases(),
        }
    }
}

/// `[format]` section: how result cells are rendered.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Price cell values treated as "no price". Compared case-insensitively.
    #[serde(default = "default_null_markers")]
    pub null_markers: Vec<String>,
}

fn default_currency_symbol() -> String { "$".to_string() }
fn default_null_markers() -> Vec<String> { strings(&["nan", "none", "na", "n/a"]) }

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            null_markers: default_null_markers(),
        }
    }
}

/// `[export]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory export files are written into.
    #[serde(default = "default_export_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_csv_file_name")]
    pub csv_file_name: String,
    #[serde(default = "default_xlsx_file_name")]
    pub xlsx_file_name: String,
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
}

fn default_export_directory() -> PathBuf { PathBuf::from(".") }
fn default_csv_file_name() -> String { "resultado.csv".to_string() }
fn default_xlsx_file_name() -> String { "resultado_codigos.xlsx".to_string() }
fn default_sheet_name() -> String { "Resultados".to_string() }

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            csv_file_name: default_csv_file_name(),
            xlsx_file_name: default_xlsx_file_name(),
            sheet_name: default_sheet_name(),
        }
    }
}

/// `[ui]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Plain-text banner shown above the query bar. Skipped when absent.
    #[serde(default = "default_logo_path")]
    pub logo_path: PathBuf,
}

fn default_theme() -> String { "default".to_string() }
fn default_logo_path() -> PathBuf { PathBuf::from("logo.txt") }

impl Default for UiConfig {
    fn default() -> Self {
        Self { theme: default_theme(), logo_path: default_logo_path() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/prodlook/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!(path = %path.display(), "wrote default config");
        }

        Self::load_from(&path)
    }

    /// Load from an explicit file, layered on top of the built-in defaults.
    /// The file must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(true))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Parse a TOML string layered on top of the built-in defaults.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(src, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("prodlook")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
