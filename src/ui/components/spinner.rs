use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use std::time::{SystemTime, UNIX_EPOCH};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Centered, render-clock driven spinner.
pub struct Spinner<'a> {
    style: Style,
    label: Option<&'a str>,
}

impl<'a> Spinner<'a> {
    pub fn new() -> Self {
        Self {
            style: Style::default(),
            label: None,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }
}

impl Default for Spinner<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Spinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let symbol = FRAMES[(now / 100) as usize % FRAMES.len()];

        let text = match self.label {
            Some(label) => format!("{symbol} {label}"),
            None => symbol.to_string(),
        };

        let x = area.x + (area.width.saturating_sub(text.chars().count() as u16)) / 2;
        let y = area.y + area.height / 2;
        buf.set_string(x, y, text, self.style);
    }
}
