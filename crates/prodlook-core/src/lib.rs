//! prodlook-core: product code lookup core library.
//!
//! This crate exposes the four pipeline stages as public modules, plus the
//! shared types, configuration and session state used by the front ends.
//!
//! # Architecture
//!
//! ```text
//! Loader ──► ReferenceTable (Arc, read-only)
//!                 │
//! Parser ──► Matcher ──► ResultSet ──► UI
//!                            │
//!                            └──► Export (csv / xlsx)
//! ```
//!
//! Everything is synchronous. The table is loaded once and shared; each search
//! builds a fresh [`ResultSet`] and replaces the previous one.

pub mod assets;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod matcher;
pub mod parser;
pub mod session;
pub mod types;

pub use error::LookupError;
pub use matcher::search;
pub use types::{ReferenceRow, ReferenceTable, ResultRow, ResultSet, SearchOutcome};
