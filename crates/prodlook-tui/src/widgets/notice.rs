//! Status line: the one-row notice strip under the results table.
//!
//! Shows the outcome of the last action (matches found, nothing typed,
//! nothing matched, export written or failed). With no notice it shows the
//! key hints instead.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    pub fn warn(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Warn, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }
}

const HINTS: &str = "Enter search · Ctrl+e csv · Ctrl+x xlsx · Ctrl+n new search · ? help";

pub struct StatusLine<'a> {
    notice: Option<&'a Notice>,
    theme: &'a Theme,
}

impl<'a> StatusLine<'a> {
    pub fn new(notice: Option<&'a Notice>, theme: &'a Theme) -> Self {
        Self { notice, theme }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = match self.notice {
            Some(notice) => {
                let tag = match notice.kind {
                    NoticeKind::Info => " ✓ ",
                    NoticeKind::Warn => " ! ",
                    NoticeKind::Error => " ✗ ",
                };
                Line::from(vec![
                    Span::styled(tag, self.theme.notice_style(notice.kind)),
                    Span::styled(notice.text.clone(), self.theme.notice_style(notice.kind)),
                ])
            }
            None => Line::from(Span::styled(
                format!(" {HINTS}"),
                Style::default().add_modifier(Modifier::DIM),
            )),
        };
        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn renders_notice_text() {
        let theme = Theme::load_default();
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        let notice = Notice::warn("No products found for 1 code");
        StatusLine::new(Some(&notice), &theme).render(area, &mut buf);
        assert!(row_text(&buf, 0).contains("No products found for 1 code"));
    }

    #[test]
    fn renders_hints_without_notice() {
        let theme = Theme::load_default();
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        StatusLine::new(None, &theme).render(area, &mut buf);
        assert!(row_text(&buf, 0).contains("Enter search"));
    }
}
