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
};
use crate::util::colors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Recipient,
    Autoplay,
    Song,
    Volume,
    DarkMode,
    Purge,
}

const FIELDS: [Field; 6] = [
    Field::Recipient,
    Field::Autoplay,
    Field::Song,
    Field::Volume,
    Field::DarkMode,
    Field::Purge,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditTarget {
    Recipient,
    Song,
}

/// Celebration settings: identity, carousel, song, volume, theme, purge.
pub struct Config {
    list_state: ListState,
    input: String,
    editing: Option<EditTarget>,
}

impl Default for Config {
    fn default() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            list_state,
            input: String::new(),
            editing: None,
        }
    }
}

impl Config {
    fn selected_field(&self) -> Field {
        FIELDS[self.list_state.selected().unwrap_or(0).min(FIELDS.len() - 1)]
    }

    fn field_line(&self, field: Field, state: &AppState) -> String {
        match field {
            Field::Recipient => {
                let name = state.settings.recipient_name();
                let name = if name.is_empty() { "(unset)" } else { name };
                format!("Recipient        {name}")
            }
            Field::Autoplay => format!(
                "Autoplay         {}",
                if state.autoplay { "cycle active" } else { "manual scroll" }
            ),
            Field::Song => {
                let track = state
                    .custom_audio
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "Birthday Mix".to_string());
                format!("Celebration song {track}")
            }
            Field::Volume => format!(
                "Volume           {:>3}%  (+/- to adjust)",
                (state.settings.volume() * 100.0).round() as u8
            ),
            Field::DarkMode => format!(
                "Night mode       {}",
                if state.settings.dark_mode() { "on" } else { "off" }
            ),
            Field::Purge => "Purge all app data".to_string(),
        }
    }
}

#[async_trait]
impl View for Config {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, _ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(area);

        let items: Vec<ListItem> = FIELDS
            .iter()
            .map(|field| {
                let line = self.field_line(*field, state);
                let item = ListItem::new(format!("  {line}"));
                if *field == Field::Purge {
                    item.style(Style::default().fg(colors::DANGER))
                } else {
                    item
                }
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Celebration Settings "),
            )
            .highlight_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        f.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let footer = match self.editing {
            Some(EditTarget::Recipient) => Line::from(Span::styled(
                format!("name of the star: {}", self.input),
                Style::default().fg(colors::PRIMARY),
            )),
            Some(EditTarget::Song) => Line::from(Span::styled(
                format!("audio file path: {}", self.input),
                Style::default().fg(colors::PRIMARY),
            )),
            None => Line::from(Span::styled(
                "j/k navigate · enter activate",
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
        if let Some(target) = self.editing {
            return match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => None,
                KeyCode::Enter => {
                    let input = std::mem::take(&mut self.input);
                    self.editing = None;
                    match target {
                        // Name edits were already written through keystroke
                        // by keystroke; enter just leaves edit mode.
                        EditTarget::Recipient => Some(Action::None),
                        EditTarget::Song => {
                            if input.is_empty() {
                                Some(Action::None)
                            } else {
                                Some(Action::PickAudio(PathBuf::from(input)))
                            }
                        }
                    }
                }
                KeyCode::Esc => {
                    self.input.clear();
                    self.editing = None;
                    Some(Action::None)
                }
                KeyCode::Backspace => {
                    self.input.pop();
                    match target {
                        EditTarget::Recipient => Some(Action::SetRecipient(self.input.clone())),
                        EditTarget::Song => Some(Action::None),
                    }
                }
                KeyCode::Char(c) => {
                    self.input.push(c);
                    match target {
                        EditTarget::Recipient => Some(Action::SetRecipient(self.input.clone())),
                        EditTarget::Song => Some(Action::None),
                    }
                }
                _ => Some(Action::None),
            };
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                let i = self.list_state.selected().unwrap_or(0);
                self.list_state.select(Some((i + 1).min(FIELDS.len() - 1)));
                Some(Action::None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let i = self.list_state.selected().unwrap_or(0);
                self.list_state.select(Some(i.saturating_sub(1)));
                Some(Action::None)
            }
            KeyCode::Enter => match self.selected_field() {
                Field::Recipient => {
                    self.input = state.settings.recipient_name().to_string();
                    self.editing = Some(EditTarget::Recipient);
                    Some(Action::None)
                }
                Field::Autoplay => Some(Action::ToggleAutoplay),
                Field::Song => {
                    self.input.clear();
                    self.editing = Some(EditTarget::Song);
                    Some(Action::None)
                }
                Field::Volume => Some(Action::None),
                Field::DarkMode => Some(Action::ToggleDarkMode),
                Field::Purge => Some(Action::RequestPurge),
            },
            _ => None,
        }
    }
}
