//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. All pipeline work
//! (search, export) happens synchronously inside [`AppState`] methods, so a
//! key press runs to completion before the next one is read.

use std::{io, path::PathBuf, sync::Arc};

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        header::Header,
        help::HelpPopup,
        notice::{Notice, StatusLine},
        query_bar::{QueryBar, QueryBarState},
        results_table::{ResultsTable, ResultsTableState},
    },
};
use crossterm::{
    event::{self as ct_event, DisableBracketedPaste, EnableBracketedPaste, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use prodlook_core::{
    config::Config,
    export::{self, ExportFormat},
    search,
    session::Session,
    ReferenceTable, SearchOutcome,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    QueryBar,
    Results,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    /// Loaded once in `main`, never mutated.
    pub table: Arc<ReferenceTable>,
    pub config: Config,
    pub theme: Theme,
    pub session: Session,
    pub query: QueryBarState,
    pub results: ResultsTableState,
    pub notice: Option<Notice>,
    pub logo: Option<String>,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

impl AppState {
    pub fn new(table: Arc<ReferenceTable>, config: Config, theme: Theme, logo: Option<String>) -> Self {
        let session = Session::new();
        let query = QueryBarState::with_text(session.input());
        Self {
            table,
            config,
            theme,
            session,
            query,
            results: ResultsTableState::default(),
            notice: None,
            logo,
            focus: Focus::QueryBar,
            prev_focus: Focus::QueryBar,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
        }
    }

    /// Run the search for the input remembered in the session.
    ///
    /// Empty input leaves the displayed results alone. Any real search
    /// replaces them, with an empty table when nothing matched.
    pub fn submit_search(&mut self) {
        let input = self.session.input().to_string();

        match search(&self.table, &input, &self.config.format) {
            SearchOutcome::EmptyInput => {
                self.notice = Some(Notice::warn("Type or paste at least one product code."));
            }
            SearchOutcome::NoMatches { tokens } => {
                self.results.clear();
                let codes = if tokens.len() == 1 { "code" } else { "codes" };
                self.notice = Some(Notice::warn(format!(
                    "No products found for {} {codes}.",
                    tokens.len()
                )));
            }
            SearchOutcome::Found(set) => {
                let n = set.len();
                self.results.set(set);
                let products = if n == 1 { "product" } else { "products" };
                self.notice = Some(Notice::info(format!("{n} {products} found.")));
                tracing::info!(matched = n, "search complete");
            }
        }
    }

    /// Forget the input, the results and every session value.
    pub fn new_search(&mut self) {
        tracing::debug!("new search");
        self.session.clear();
        self.query.clear();
        self.results.clear();
        self.notice = None;
        self.focus = Focus::QueryBar;
    }

    /// Apply an editing event to the query bar and record the new text.
    fn edit_query(&mut self, event: &AppEvent) {
        self.query.handle(event);
        if self.session.input() != self.query.query {
            self.session.set_input(self.query.query.as_str());
        }
    }

    /// Write the displayed results to the configured export directory.
    pub fn export(&mut self, format: ExportFormat) {
        match self.try_export(format) {
            Ok(Some(path)) => {
                self.notice = Some(Notice::info(format!("Saved {}", path.display())));
            }
            Ok(None) => {
                self.notice = Some(Notice::warn("Nothing to export: run a search first."));
            }
            Err(e) => {
                tracing::warn!(error = %e, %format, "export failed");
                self.notice = Some(Notice::error(format!("Export failed: {e}")));
            }
        }
    }

    fn try_export(&self, format: ExportFormat) -> anyhow::Result<Option<PathBuf>> {
        let results = &self.results.results;
        if results.is_empty() {
            return Ok(None);
        }
        let payload = export::export(results, format, &self.config.export)?;
        let path = export::write_payload(&self.config.export.directory, &payload)?;
        Ok(Some(path))
    }

    /// Route one event through modal layers, global keys and the focused widget.
    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if self.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                }
                AppEvent::Enter => {
                    let input = self.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            self.command_bar.clear();
                            self.focus = self.prev_focus;
                            execute_command(self, cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            self.command_bar.clear();
                            self.focus = self.prev_focus;
                        }
                        Err(msg) => {
                            // Show the error; bar stays open
                            self.command_bar.error = Some(msg);
                        }
                    }
                }
                AppEvent::Quit => self.quit = true,
                other => self.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Char('?') if self.focus != Focus::QueryBar => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            AppEvent::Char(':') if self.focus != Focus::QueryBar => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            AppEvent::Enter if self.focus == Focus::QueryBar => self.submit_search(),

            AppEvent::Escape => {
                if self.focus == Focus::QueryBar {
                    self.focus = Focus::Results;
                }
            }

            AppEvent::FocusNext => {
                self.focus = match self.focus {
                    Focus::QueryBar => Focus::Results,
                    Focus::Results | Focus::Command => Focus::QueryBar,
                };
                tracing::debug!(to = ?self.focus, "focus cycle");
            }

            AppEvent::QueryFocus => self.focus = Focus::QueryBar,

            AppEvent::NewSearch => self.new_search(),

            AppEvent::Export(format) => self.export(format),

            // Pasting always lands in the input box.
            AppEvent::Paste(_) => {
                self.focus = Focus::QueryBar;
                self.edit_query(&event);
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => match self.focus {
                Focus::QueryBar => self.edit_query(&other),
                Focus::Results => self.results.handle(&other),
                Focus::Command => {}
            },
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(table: Arc<ReferenceTable>, config: Config, theme: Theme, logo: Option<String>) -> Self {
        App { state: AppState::new(table, config, theme, logo) }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            terminal.draw(|frame| draw(frame, &self.state))?;

            if self.state.quit {
                break;
            }

            // Nothing changes between key presses, so block until one arrives.
            let raw = ct_event::read()?;
            if let Event::Key(key) = &raw {
                if key.kind != ct_event::KeyEventKind::Press {
                    continue;
                }
            }

            let app_event = if is_insert_mode(self.state.focus) {
                event::to_app_event_insert(raw)
            } else {
                event::to_app_event(raw)
            };
            if let Some(ev) = app_event {
                tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                self.state.handle(ev);
            }
        }
        Ok(())
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::QueryBar | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    if area.is_empty() {
        return;
    }

    // Vertical: header | 3-line query bar | results | 1-line status
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(Header::height(state.logo.as_deref())),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        Header::new(state.logo.as_deref(), state.table.source(), state.table.len(), &state.theme),
        vert[0],
    );
    frame.render_widget(
        QueryBar::new(&state.query, state.focus == Focus::QueryBar, &state.theme),
        vert[1],
    );
    frame.render_widget(
        ResultsTable::new(&state.results, state.focus == Focus::Results, &state.theme),
        vert[2],
    );
    frame.render_widget(StatusLine::new(state.notice.as_ref(), &state.theme), vert[3]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::QueryBar {
        let qb = QueryBar::new(&state.query, true, &state.theme);
        frame.set_cursor_position(qb.cursor_position(vert[1]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::notice::NoticeKind;
    use pretty_assertions::assert_eq;

    fn state() -> AppState {
        let table = ReferenceTable::from_rows([
            ("100", "widget", "9.99"),
            ("200", "gadget", "$5"),
            ("300", "gizmo", "nan"),
        ]);
        AppState::new(Arc::new(table), Config::defaults(), Theme::load_default(), None)
    }

    fn type_text(s: &mut AppState, text: &str) {
        for c in text.chars() {
            s.handle(AppEvent::Char(c));
        }
    }

    fn erase_query(s: &mut AppState) {
        for _ in 0..s.query.query.chars().count() {
            s.handle(AppEvent::Backspace);
        }
    }

    fn notice_kind(s: &AppState) -> Option<NoticeKind> {
        s.notice.as_ref().map(|n| n.kind)
    }

    #[test]
    fn enter_runs_search_and_fills_table() {
        let mut s = state();
        type_text(&mut s, "100, 999");
        s.handle(AppEvent::Enter);

        let rows = s.results.results.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "WIDGET");
        assert_eq!(rows[0].price, "$9.99");
        assert_eq!(notice_kind(&s), Some(NoticeKind::Info));
        assert_eq!(s.session.input(), "100, 999");
    }

    #[test]
    fn empty_input_warns_and_keeps_previous_results() {
        let mut s = state();
        type_text(&mut s, "200");
        s.handle(AppEvent::Enter);
        assert_eq!(s.results.results.len(), 1);

        erase_query(&mut s);
        s.handle(AppEvent::Enter);
        assert_eq!(notice_kind(&s), Some(NoticeKind::Warn));
        assert_eq!(s.results.results.len(), 1);
    }

    #[test]
    fn no_match_clears_table_and_blocks_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = state();
        s.config.export.directory = dir.path().to_path_buf();

        type_text(&mut s, "100");
        s.handle(AppEvent::Enter);
        erase_query(&mut s);
        type_text(&mut s, "999");
        s.handle(AppEvent::Enter);

        assert!(s.results.results.is_empty());
        assert_eq!(
            s.notice.as_ref().map(|n| n.text.as_str()),
            Some("No products found for 1 code.")
        );

        s.export(ExportFormat::Csv);
        assert_eq!(notice_kind(&s), Some(NoticeKind::Warn));
        assert!(!dir.path().join("resultado.csv").exists());
    }

    #[test]
    fn export_writes_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = state();
        s.config.export.directory = dir.path().to_path_buf();

        type_text(&mut s, "300 100");
        s.handle(AppEvent::Enter);
        s.handle(AppEvent::Export(ExportFormat::Csv));
        s.handle(AppEvent::Export(ExportFormat::Xlsx));

        let csv = std::fs::read_to_string(dir.path().join("resultado.csv")).unwrap();
        assert_eq!(
            csv,
            "#,Product ID,Description,Price\n1,100,WIDGET,$9.99\n2,300,GIZMO,\n"
        );
        assert!(dir.path().join("resultado_codigos.xlsx").exists());
        assert_eq!(notice_kind(&s), Some(NoticeKind::Info));
    }

    #[test]
    fn new_search_resets_everything() {
        let mut s = state();
        type_text(&mut s, "100");
        s.handle(AppEvent::Enter);
        s.handle(AppEvent::FocusNext);
        assert_eq!(s.focus, Focus::Results);

        s.handle(AppEvent::NewSearch);
        assert!(s.query.query.is_empty());
        assert!(s.results.results.is_empty());
        assert!(s.session.is_empty());
        assert!(s.notice.is_none());
        assert_eq!(s.focus, Focus::QueryBar);
    }

    #[test]
    fn paste_from_results_pane_lands_in_query() {
        let mut s = state();
        s.focus = Focus::Results;
        s.handle(AppEvent::Paste("100\n200\n".into()));
        assert_eq!(s.focus, Focus::QueryBar);
        s.handle(AppEvent::Enter);
        assert_eq!(s.results.results.len(), 2);
    }

    #[test]
    fn command_mode_runs_export_and_theme() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = state();
        s.config.export.directory = dir.path().to_path_buf();
        type_text(&mut s, "200");
        s.handle(AppEvent::Enter);

        s.handle(AppEvent::Escape);
        assert_eq!(s.focus, Focus::Results);
        s.handle(AppEvent::Char(':'));
        assert_eq!(s.focus, Focus::Command);
        type_text(&mut s, "export csv");
        s.handle(AppEvent::Enter);
        assert_eq!(s.focus, Focus::Results);
        assert!(dir.path().join("resultado.csv").exists());

        s.handle(AppEvent::Char(':'));
        type_text(&mut s, "theme gruvbox");
        s.handle(AppEvent::Enter);
        assert_eq!(s.theme.table_price, Theme::load_gruvbox_dark().table_price);
    }

    #[test]
    fn bad_command_keeps_bar_open_with_error() {
        let mut s = state();
        s.focus = Focus::Results;
        s.handle(AppEvent::Char(':'));
        type_text(&mut s, "nope");
        s.handle(AppEvent::Enter);
        assert_eq!(s.focus, Focus::Command);
        assert!(s.command_bar.error.is_some());
    }

    #[test]
    fn help_popup_swallows_events() {
        let mut s = state();
        s.focus = Focus::Results;
        s.handle(AppEvent::Char('?'));
        assert!(s.show_help);
        s.handle(AppEvent::NewSearch);
        assert!(s.show_help);
        s.handle(AppEvent::Escape);
        assert!(!s.show_help);
    }

    #[test]
    fn session_tracks_every_query_edit() {
        let mut s = state();
        type_text(&mut s, "100 2");
        assert_eq!(s.session.input(), s.query.query);
        s.handle(AppEvent::Backspace);
        assert_eq!(s.session.input(), "100 ");

        s.focus = Focus::Results;
        s.handle(AppEvent::Paste("200\n300".into()));
        assert_eq!(s.session.input(), s.query.query);
        assert!(s.session.input().contains("200"));
    }

    #[test]
    fn new_search_keeps_chosen_theme_out_of_the_session() {
        let mut s = state();
        s.focus = Focus::Results;
        s.handle(AppEvent::Char(':'));
        type_text(&mut s, "theme gruvbox");
        s.handle(AppEvent::Enter);
        s.handle(AppEvent::NewSearch);

        assert!(s.session.is_empty());
        assert_eq!(s.theme.table_price, Theme::load_gruvbox_dark().table_price);
    }

    #[test]
    fn command_bar_draws_on_empty_terminal() {
        let mut s = state();
        s.focus = Focus::Results;
        s.handle(AppEvent::Char(':'));
        for (w, h) in [(80, 0), (0, 24)] {
            let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(w, h)).unwrap();
            terminal.draw(|frame| draw(frame, &s)).unwrap();
        }
    }

    #[test]
    fn question_mark_types_in_query_bar() {
        let mut s = state();
        s.handle(AppEvent::Char('?'));
        assert!(!s.show_help);
        assert_eq!(s.query.query, "?");
    }
}
