//! Query bar widget: the code input box.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Paste(text)` inserts a whole block; line breaks and tabs become spaces
//!   (they are token separators either way).
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.
//!
//! The live token count on the right shows how many codes a search would send.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use prodlook_core::parser::parse_tokens;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct QueryBarState {
    /// The codes typed or pasted by the user.
    pub query: String,
    /// Byte offset of the cursor within `query`.
    pub cursor: usize,
}

impl QueryBarState {
    pub fn with_text(text: &str) -> Self {
        let query = flatten(text);
        let cursor = query.len();
        Self { query, cursor }
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    /// Handle an editing event from the app shell; anything else is ignored.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Char(c) => {
                self.query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::trace!(query = %self.query, cursor = self.cursor, "query: char inserted");
            }
            AppEvent::Paste(text) => {
                let text = flatten(text);
                self.query.insert_str(self.cursor, &text);
                self.cursor += text.len();
                tracing::debug!(bytes = text.len(), cursor = self.cursor, "query: paste");
            }
            AppEvent::Backspace => {
                if self.cursor > 0 {
                    // Walk back one char boundary
                    let prev = self.query[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    self.query.remove(prev);
                    self.cursor = prev;
                }
            }
            AppEvent::Nav(Direction::Left) => {
                if self.cursor > 0 {
                    self.cursor = self.query[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.query.len() {
                    self.cursor = self.query[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.query.len());
                }
            }
            _ => {}
        }
    }
}

/// Replace line breaks and tabs with spaces so the box stays single-line.
fn flatten(text: &str) -> String {
    text.chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .collect()
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(state: &'a QueryBarState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }

    /// Number of characters hidden to the left so the cursor stays visible.
    fn scroll(&self, width: u16) -> usize {
        let col = self.state.query[..self.state.cursor].chars().count();
        col.saturating_sub(width.saturating_sub(1) as usize)
    }

    fn text_area(area: Rect) -> Rect {
        let inner = Block::bordered().inner(area);
        Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(12)])
            .split(inner)[0]
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let text = Self::text_area(area);
        let col = self.state.query[..self.state.cursor].chars().count() - self.scroll(text.width);
        let x = (text.x + col as u16).min(text.right().saturating_sub(1));
        (x, text.y)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title("Product codes")
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(12)])
            .split(inner);

        let query_line = if self.state.query.is_empty() && !self.focused {
            Line::from(Span::styled(
                "press / and type or paste codes",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            let skip = self.scroll(chunks[0].width);
            Line::from(self.state.query.chars().skip(skip).collect::<String>())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        let count = parse_tokens(&self.state.query).len();
        let label = match count {
            1 => " 1 code".to_string(),
            n => format!(" {n} codes"),
        };
        Paragraph::new(Line::from(Span::styled(
            label,
            Style::default().add_modifier(Modifier::DIM),
        )))
        .render(chunks[1], buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typed(s: &str) -> QueryBarState {
        let mut state = QueryBarState::default();
        for c in s.chars() {
            state.handle(&AppEvent::Char(c));
        }
        state
    }

    #[test]
    fn typing_and_backspace() {
        let mut s = typed("100,2");
        assert_eq!(s.query, "100,2");
        s.handle(&AppEvent::Backspace);
        assert_eq!(s.query, "100,");
        assert_eq!(s.cursor, 4);
    }

    #[test]
    fn cursor_moves_over_multibyte_chars() {
        let mut s = typed("ç1");
        s.handle(&AppEvent::Nav(Direction::Left));
        s.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(s.cursor, 0);
        s.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(s.cursor, 'ç'.len_utf8());
        s.handle(&AppEvent::Char('x'));
        assert_eq!(s.query, "çx1");
    }

    #[test]
    fn paste_flattens_line_breaks() {
        let mut s = typed("1 ");
        s.handle(&AppEvent::Paste("100\r\n200\t300\n".into()));
        assert_eq!(s.query, "1 100  200 300 ");
        assert_eq!(s.cursor, s.query.len());
        assert_eq!(parse_tokens(&s.query), vec!["1", "100", "200", "300"]);
    }

    #[test]
    fn with_text_places_cursor_at_end() {
        let s = QueryBarState::with_text("a\nb");
        assert_eq!(s.query, "a b");
        assert_eq!(s.cursor, 3);
    }

    #[test]
    fn long_input_scrolls_to_keep_cursor_visible() {
        let theme = Theme::load_default();
        let s = typed(&"9".repeat(100));
        let area = Rect::new(0, 0, 40, 3);
        let bar = QueryBar::new(&s, true, &theme);
        let (x, y) = bar.cursor_position(area);
        assert_eq!(y, 1);
        assert!(x < area.right());
    }
}
