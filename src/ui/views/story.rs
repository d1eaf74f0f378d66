use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::{
    components::spinner::Spinner,
    context::AppContext,
    state::AppState,
    traits::{Action, View},
};
use crate::util::colors;

/// The legend tab: a longer generated tale, independent of the gift.
#[derive(Default)]
pub struct Story;

#[async_trait]
impl View for Story {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, _ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(area);

        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("The Legend of "),
                Span::styled(
                    state.display_name().to_string(),
                    Style::default()
                        .fg(colors::GOLD)
                        .add_modifier(Modifier::BOLD),
                ),
            ])),
            chunks[0],
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::GOLD));
        let inner = block.inner(chunks[1]);
        f.render_widget(block, chunks[1]);

        if state.is_loading_story {
            f.render_widget(
                Spinner::new()
                    .with_style(Style::default().fg(colors::GOLD))
                    .with_label("Weaving the saga..."),
                inner,
            );
        } else if state.story.is_empty() {
            f.render_widget(
                Paragraph::new(vec![
                    Line::default(),
                    Line::from("A legendary tale is waiting to be written."),
                    Line::default(),
                    Line::from(Span::styled(
                        "press enter to start the saga",
                        Style::default().fg(colors::NEUTRAL),
                    )),
                ])
                .alignment(Alignment::Center),
                inner,
            );
        } else {
            let mut lines: Vec<Line> = state
                .story
                .lines()
                .map(|l| Line::from(l.to_string()))
                .collect();
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "enter rewrite · c copy",
                Style::default().fg(colors::NEUTRAL),
            )));

            f.render_widget(
                Paragraph::new(lines).wrap(Wrap { trim: false }),
                inner,
            );
        }
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Enter => Some(Action::FetchStory),
            KeyCode::Char('c') if !state.story.is_empty() => Some(Action::CopyStory),
            _ => None,
        }
    }
}
