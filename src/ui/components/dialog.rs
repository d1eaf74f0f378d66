use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Text},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::util::colors;

/// Centered modal box for confirmations and notices.
pub struct Dialog<'a> {
    title: &'a str,
    body: &'a str,
    hint: &'a str,
}

impl<'a> Dialog<'a> {
    pub fn new(title: &'a str, body: &'a str, hint: &'a str) -> Self {
        Self { title, body, hint }
    }

    pub fn confirm(title: &'a str, body: &'a str) -> Self {
        Self::new(title, body, "[y] yes · [n] no")
    }

    pub fn notice(title: &'a str, body: &'a str) -> Self {
        Self::new(title, body, "press any key")
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (area.width * 3 / 4).clamp(20, 64).min(area.width);
        let body_height = (self.body.chars().count() as u16 / width.max(1)) + 4;
        let height = (body_height + 2).min(area.height);

        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::PRIMARY))
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center);

        let mut text = Text::from(self.body);
        text.push_line(Line::default());
        text.push_line(
            Line::from(self.hint).style(
                Style::default()
                    .fg(colors::NEUTRAL)
                    .add_modifier(Modifier::ITALIC),
            ),
        );

        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(popup, buf);
    }
}
