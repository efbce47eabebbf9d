//! prodlook TUI: ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

use std::sync::Arc;

pub use app::App;
use prodlook_core::{assets, config::Config, ReferenceTable};

/// Start the TUI over an already-loaded reference table.
pub fn run(table: Arc<ReferenceTable>, config: Config) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme);
    let logo = assets::load_optional_text(&config.ui.logo_path);
    App::new(table, config, theme, logo).run()
}
