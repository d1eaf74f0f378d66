use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    ui::{
        app::App,
        components::{confetti::Confetti, dialog::Dialog, tabbar::TabBar},
        state::Overlay,
    },
    util::colors,
};

pub struct AppLayout<'a> {
    pub app: &'a mut App,
}

impl<'a> AppLayout<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn render(self, f: &mut Frame, area: Rect) {
        let theme = colors::theme(self.app.state.settings.dark_mode());
        f.buffer_mut().set_style(
            area,
            Style::new().bg(theme.background).fg(theme.text),
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(2),
            ])
            .split(area);

        self.render_header(f, chunks[0]);

        let tab_index = self.app.state.active_tab.index();
        let view = &mut self.app.views[tab_index];
        view.render(f, chunks[1], &self.app.state, &self.app.ctx);

        self.render_music_bar(f, chunks[2]);
        f.render_widget(TabBar::new(self.app.state.active_tab), chunks[3]);

        if self.app.state.confetti.is_active() {
            f.render_widget(Confetti, area);
        }

        if let Some(overlay) = &self.app.overlay {
            let dialog = match overlay {
                Overlay::ConfirmStoryRewrite => {
                    Dialog::confirm("Rewrite", "Generate a new legend?")
                }
                Overlay::ConfirmClearMemories => {
                    Dialog::confirm("Clear All", "Permanently erase the collection?")
                }
                Overlay::ConfirmPurge => Dialog::confirm(
                    "Purge",
                    "Reset all memories and settings? This cannot be undone.",
                ),
                Overlay::ShareText(text) => Dialog::notice("Copy manually", text),
                Overlay::Notice(text) => Dialog::notice("Done", text),
            };
            f.render_widget(dialog, area);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Line::from(vec![
            Span::styled(
                " 🎂 Celebration.",
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  d theme · s share · q quit",
                Style::default().fg(colors::NEUTRAL),
            ),
        ]);
        f.render_widget(Paragraph::new(header), area);
    }

    fn render_music_bar(&self, f: &mut Frame, area: Rect) {
        let state = &self.app.state;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(22)])
            .split(inner);

        let track = match &state.custom_audio {
            Some(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Your Track".to_string()),
            None => "Birthday Mix".to_string(),
        };
        let status = if state.is_music_playing {
            Span::styled(
                format!("{} {track} · vibing", playing_icon()),
                Style::default().fg(colors::PRIMARY),
            )
        } else {
            Span::styled(
                format!("♪ {track} · paused (space to play)"),
                Style::default().fg(colors::NEUTRAL),
            )
        };
        f.render_widget(Paragraph::new(Line::from(status)), chunks[0]);

        let volume = state.settings.volume();
        f.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(colors::PRIMARY))
                .ratio(f64::from(volume))
                .label(format!("vol {:>3}%", (volume * 100.0).round() as u8)),
            chunks[1],
        );
    }
}

fn playing_icon() -> &'static str {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;
    match (now / 150) % 4 {
        0 => "▁",
        1 => "▃",
        2 => "▆",
        _ => "▃",
    }
}
