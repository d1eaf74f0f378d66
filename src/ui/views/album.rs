use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::path::PathBuf;

use crate::ui::{
    context::AppContext,
    state::AppState,
    traits::{Action, View},
    views::memory_label,
};
use crate::util::colors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Url,
    File,
}

/// The full collection as a navigable list.
#[derive(Default)]
pub struct Album {
    list_state: ListState,
    input: String,
    input_mode: Option<InputMode>,
}

impl Album {
    fn selected(&self, state: &AppState) -> Option<usize> {
        let count = state.memory_count();
        if count == 0 {
            return None;
        }
        Some(self.list_state.selected().unwrap_or(0).min(count - 1))
    }
}

#[async_trait]
impl View for Album {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, _ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(area);

        let items: Vec<ListItem> = state
            .settings
            .memories()
            .iter()
            .enumerate()
            .map(|(i, entry)| ListItem::new(format!("  {:>2}. {}", i + 1, memory_label(entry))))
            .collect();

        let count = state.memory_count();
        if count == 0 {
            f.render_widget(
                Paragraph::new(vec![
                    Line::default(),
                    Line::from("  The collection is empty."),
                ])
                .block(Block::default().borders(Borders::ALL).title(" Collection ")),
                chunks[0],
            );
        } else {
            if self.list_state.selected().is_none() {
                self.list_state.select(Some(0));
            }
            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" Collection ({count}) ")),
                )
                .highlight_style(
                    Style::default()
                        .fg(colors::PRIMARY)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");
            f.render_stateful_widget(list, chunks[0], &mut self.list_state);
        }

        let footer = match self.input_mode {
            Some(mode) => {
                let label = match mode {
                    InputMode::Url => "image URL",
                    InputMode::File => "image file path",
                };
                Line::from(Span::styled(
                    format!("{label}: {}", self.input),
                    Style::default().fg(colors::PRIMARY),
                ))
            }
            None => Line::from(Span::styled(
                "j/k navigate · u add url · f add file · x remove · C clear all",
                Style::default().fg(colors::NEUTRAL),
            )),
        };
        f.render_widget(
            Paragraph::new(footer).block(Block::default().borders(Borders::TOP)),
            chunks[1],
        );
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
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(i) = self.selected(state) {
                    let last = state.memory_count() - 1;
                    self.list_state.select(Some((i + 1).min(last)));
                }
                Some(Action::None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(i) = self.selected(state) {
                    self.list_state.select(Some(i.saturating_sub(1)));
                }
                Some(Action::None)
            }
            KeyCode::Char('u') => {
                self.input_mode = Some(InputMode::Url);
                Some(Action::None)
            }
            KeyCode::Char('f') => {
                self.input_mode = Some(InputMode::File);
                Some(Action::None)
            }
            KeyCode::Char('x') => self.selected(state).map(Action::RemoveMemory),
            KeyCode::Char('C') => Some(Action::RequestClearMemories),
            _ => None,
        }
    }
}
