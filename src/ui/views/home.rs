use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::path::PathBuf;

use crate::ui::{
    components::spinner::Spinner,
    context::AppContext,
    state::{AppState, GiftState},
    traits::{Action, View},
    views::memory_label,
};
use crate::util::colors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Url,
    File,
}

/// The landing tab: hero banner, memory carousel and the gift box.
#[derive(Default)]
pub struct Home {
    input: String,
    input_mode: Option<InputMode>,
}

impl Home {
    fn render_hero(&self, f: &mut Frame, area: Rect, state: &AppState) {
        let lines = vec![
            Line::from(Span::styled(
                "HAPPY BIRTHDAY!",
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::raw("Celebrate, "),
                Span::styled(
                    state.display_name().to_string(),
                    Style::default()
                        .fg(colors::PRIMARY)
                        .add_modifier(Modifier::BOLD | Modifier::ITALIC),
                ),
            ]),
        ];

        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            area,
        );
    }

    fn render_carousel(&self, f: &mut Frame, area: Rect, state: &AppState) {
        let count = state.memory_count();
        let title = if count == 0 {
            " Memories ".to_string()
        } else {
            format!(" Memories [{}/{}] ", state.carousel_index + 1, count)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title(title);
        if state.autoplay {
            block = block.title_top(Line::from(" autoplay ").right_aligned());
        }
        let inner = block.inner(area);
        f.render_widget(block, area);

        if let Some(mode) = self.input_mode {
            let label = match mode {
                InputMode::Url => "image URL",
                InputMode::File => "image file path",
            };
            let prompt = Paragraph::new(vec![
                Line::from(format!("Add memory — enter {label}:")),
                Line::from(Span::styled(
                    format!("> {}", self.input),
                    Style::default().fg(colors::PRIMARY),
                )),
                Line::from(Span::styled(
                    "enter to add · esc to cancel",
                    Style::default().fg(colors::NEUTRAL),
                )),
            ]);
            f.render_widget(prompt, inner);
            return;
        }

        let body = if count == 0 {
            vec![
                Line::default(),
                Line::from("Add your first memory"),
                Line::from(Span::styled(
                    "u add by url · f add by file",
                    Style::default().fg(colors::NEUTRAL),
                )),
            ]
        } else {
            let entry = &state.settings.memories()[state.carousel_index];
            vec![
                Line::default(),
                Line::from(Span::styled(
                    memory_label(entry),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::default(),
                Line::from(Span::styled(
                    "←/→ browse · u add url · f add file · x remove",
                    Style::default().fg(colors::NEUTRAL),
                )),
            ]
        };

        f.render_widget(
            Paragraph::new(body)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
    }

    fn render_gift(&self, f: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::PRIMARY))
            .title(" Gift ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        match state.gift.state() {
            GiftState::Closed => {
                f.render_widget(
                    Paragraph::new(vec![
                        Line::default(),
                        Line::from(Span::styled(
                            "🎁 Open Your Gift",
                            Style::default()
                                .fg(colors::PRIMARY)
                                .add_modifier(Modifier::BOLD),
                        )),
                        Line::from("A personalized surprise awaits inside!"),
                        Line::default(),
                        Line::from(Span::styled(
                            "press g",
                            Style::default().fg(colors::NEUTRAL),
                        )),
                    ])
                    .alignment(Alignment::Center),
                    inner,
                );
            }
            GiftState::Loading => {
                f.render_widget(
                    Spinner::new()
                        .with_style(Style::default().fg(colors::PRIMARY))
                        .with_label("Preparing your wish..."),
                    inner,
                );
            }
            GiftState::Opened => {
                f.render_widget(
                    Paragraph::new(vec![
                        Line::default(),
                        Line::from(Span::styled(
                            format!("\u{201c}{}\u{201d}", state.generated_wish),
                            Style::default().add_modifier(Modifier::ITALIC),
                        )),
                        Line::default(),
                        Line::from(Span::styled(
                            "g more magic · R reset · s share",
                            Style::default().fg(colors::NEUTRAL),
                        )),
                    ])
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                    inner,
                );
            }
        }
    }
}

#[async_trait]
impl View for Home {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, _ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(8),
            ])
            .split(area);

        self.render_hero(f, chunks[0], state);
        self.render_carousel(f, chunks[1], state);
        self.render_gift(f, chunks[2], state);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        if let Some(mode) = self.input_mode {
            return match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => None,
                KeyCode::Enter => {
                    let input = std::mem::take(&mut self.input);
                    self.input_mode = None;
                    if input.is_empty() {
                        Some(Action::None)
                    } else {
                        match mode {
                            InputMode::Url => Some(Action::AddMemoryUrl(input)),
                            InputMode::File => Some(Action::AddMemoryFile(PathBuf::from(input))),
                        }
                    }
                }
                KeyCode::Esc => {
                    self.input.clear();
                    self.input_mode = None;
                    Some(Action::None)
                }
                KeyCode::Backspace => {
                    self.input.pop();
                    Some(Action::None)
                }
                KeyCode::Char(c) => {
                    self.input.push(c);
                    Some(Action::None)
                }
                _ => Some(Action::None),
            };
        }

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(Action::CarouselPrev),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::CarouselNext),
            KeyCode::Char('u') => {
                self.input_mode = Some(InputMode::Url);
                Some(Action::None)
            }
            KeyCode::Char('f') => {
                self.input_mode = Some(InputMode::File);
                Some(Action::None)
            }
            KeyCode::Char('x') => {
                if state.memory_count() > 0 {
                    Some(Action::RemoveMemory(state.carousel_index))
                } else {
                    Some(Action::None)
                }
            }
            KeyCode::Enter => Some(Action::OpenGift),
            KeyCode::Char('R') => Some(Action::ResetGift),
            KeyCode::Char('c') => Some(Action::Celebrate),
            _ => None,
        }
    }
}
