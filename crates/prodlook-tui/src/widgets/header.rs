//! Header widget: optional logo banner plus a one-line title strip.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Tallest logo we are willing to give screen rows to.
const MAX_LOGO_LINES: u16 = 6;

/// Renders the logo (when one was loaded) above a title line showing where
/// the reference table came from. Keybinding hints are right-aligned.
pub struct Header<'a> {
    logo: Option<&'a str>,
    source: &'a str,
    products: usize,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(logo: Option<&'a str>, source: &'a str, products: usize, theme: &'a Theme) -> Self {
        Self { logo, source, products, theme }
    }

    /// Rows this header needs: logo lines (capped) plus the title line.
    pub fn height(logo: Option<&str>) -> u16 {
        let logo_lines = logo.map_or(0, |l| (l.lines().count() as u16).min(MAX_LOGO_LINES));
        logo_lines + 1
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let logo_height = Self::height(self.logo) - 1;

        if let Some(logo) = self.logo {
            let lines: Vec<Line> = logo
                .lines()
                .take(logo_height as usize)
                .map(|l| Line::from(Span::styled(l.to_string(), self.theme.banner_logo)))
                .collect();
            Paragraph::new(lines).render(Rect { height: logo_height.min(area.height), ..area }, buf);
        }

        let title_y = area.y + logo_height;
        if title_y >= area.bottom() {
            return;
        }

        let title = Line::from(vec![
            Span::styled(" prodlook ", self.theme.banner_title),
            Span::styled(
                format!("· {} products from {}", self.products, self.source),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]);
        buf.set_line(area.x, title_y, &title, area.width);

        let hint = " q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(hint_x, title_y, hint, Style::default().add_modifier(Modifier::DIM));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_counts_logo_lines() {
        assert_eq!(Header::height(None), 1);
        assert_eq!(Header::height(Some("A\nB\n")), 3);
        assert_eq!(Header::height(Some(&"x\n".repeat(20))), MAX_LOGO_LINES + 1);
    }

    #[test]
    fn title_shows_source_and_count() {
        let theme = Theme::load_default();
        let area = Rect::new(0, 0, 80, 2);
        let mut buf = Buffer::empty(area);
        Header::new(Some("ACME"), "catalog.xlsx", 42, &theme).render(area, &mut buf);
        let line: String = (0..80u16).map(|x| buf[(x, 1u16)].symbol().to_string()).collect();
        assert!(line.contains("42 products from catalog.xlsx"), "{line}");
        let logo: String = (0..4u16).map(|x| buf[(x, 0u16)].symbol().to_string()).collect();
        assert_eq!(logo, "ACME");
    }
}
