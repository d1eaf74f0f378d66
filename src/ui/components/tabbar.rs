use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Tabs, Widget},
};

use crate::ui::state::Tab;
use crate::util::colors;

pub struct TabBar {
    active: Tab,
}

impl TabBar {
    pub fn new(active: Tab) -> Self {
        Self { active }
    }
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let titles: Vec<String> = Tab::all()
            .iter()
            .map(|t| format!(" {} [{}] ", t.title(), t.index() + 1))
            .collect();

        Tabs::new(titles)
            .block(Block::default().borders(Borders::TOP))
            .select(self.active.index())
            .style(Style::default().fg(colors::NEUTRAL))
            .highlight_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
            .render(area, buf);
    }
}
