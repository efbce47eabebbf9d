//! Ratatui widgets for the prodlook TUI.

pub mod command_bar;
pub mod header;
pub mod help;
pub mod notice;
pub mod query_bar;
pub mod results_table;
