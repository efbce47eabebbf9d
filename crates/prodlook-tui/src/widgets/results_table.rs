//! Results table widget: the matched rows, in `[#, Product ID, Description, Price]`
//! order.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one row |
//! | `↓` / `j` | Move cursor down one row |
//! | `PageUp` / `Ctrl+u` | Move up one page |
//! | `PageDown` / `Ctrl+d` | Move down one page |
//!
//! `offset` is the index of the first visible row; the cursor is always kept
//! inside the visible window.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use prodlook_core::types::{ResultSet, RESULT_HEADERS};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{
        Block, Cell as TableCell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Table, Widget,
    },
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct ResultsTableState {
    pub results: ResultSet,
    /// Index of the highlighted row.
    pub cursor: usize,
    /// Index of the first visible row.
    pub offset: usize,
    /// Body height from the last render so `handle()` can page correctly.
    last_height: Cell<usize>,
}

impl Default for ResultsTableState {
    fn default() -> Self {
        Self {
            results: ResultSet::default(),
            cursor: 0,
            offset: 0,
            last_height: Cell::new(20),
        }
    }
}

impl ResultsTableState {
    /// Replace the displayed rows with a new result set.
    pub fn set(&mut self, results: ResultSet) {
        self.results = results;
        self.cursor = 0;
        self.offset = 0;
    }

    pub fn clear(&mut self) {
        self.set(ResultSet::default());
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    fn keep_cursor_visible(&mut self) {
        let height = self.height();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.results.len();
        if total == 0 {
            return;
        }
        let last = total - 1;

        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.cursor = (self.cursor + 1).min(last),
            AppEvent::ScrollUp => self.cursor = self.cursor.saturating_sub(self.height()),
            AppEvent::ScrollDown => self.cursor = (self.cursor + self.height()).min(last),
            _ => return,
        }
        self.keep_cursor_visible();
        tracing::trace!(cursor = self.cursor, offset = self.offset, "results: moved");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultsTable<'a> {
    state: &'a ResultsTableState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ResultsTable<'a> {
    pub fn new(state: &'a ResultsTableState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }

    fn widths(&self) -> [Constraint; 4] {
        let rows = self.state.results.rows();
        [
            Constraint::Length(widest(RESULT_HEADERS[0], rows.iter().map(|r| r.sequence_number.to_string().len()))),
            Constraint::Length(widest(RESULT_HEADERS[1], rows.iter().map(|r| r.identifier.chars().count()))),
            Constraint::Fill(1),
            Constraint::Length(widest(RESULT_HEADERS[3], rows.iter().map(|r| r.price.chars().count()))),
        ]
    }
}

fn widest(header: &str, cells: impl Iterator<Item = usize>) -> u16 {
    cells.fold(header.chars().count(), usize::max) as u16
}

impl Widget for ResultsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let total = self.state.results.len();
        let title = match total {
            0 => "Results".to_string(),
            1 => "Results (1 product)".to_string(),
            n => format!("Results ({n} products)"),
        };
        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if total == 0 {
            Paragraph::new(Line::styled(
                "no results yet: type codes above and press Enter",
                Style::default().add_modifier(Modifier::DIM),
            ))
            .render(inner, buf);
            return;
        }

        // One row goes to the header.
        let height = (inner.height as usize).saturating_sub(1);
        self.state.last_height.set(height);

        let start = self.state.offset.min(total.saturating_sub(1));
        let end = (start + height).min(total);

        let header = Row::new(RESULT_HEADERS.map(TableCell::from)).style(self.theme.table_header);

        let rows: Vec<Row> = self.state.results.rows()[start..end]
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let row = Row::new(vec![
                    TableCell::from(r.sequence_number.to_string()).style(self.theme.table_sequence),
                    TableCell::from(r.identifier.clone()),
                    TableCell::from(r.description.clone()),
                    TableCell::from(r.price.clone()).style(self.theme.table_price),
                ]);
                if self.focused && start + i == self.state.cursor {
                    row.style(self.theme.table_selected)
                } else {
                    row
                }
            })
            .collect();

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Widget::render(
            Table::new(rows, self.widths()).header(header).column_spacing(2),
            text_area,
            buf,
        );

        if total > height {
            let mut sb_state = ScrollbarState::new(total)
                .position(start)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
