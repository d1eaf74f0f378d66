use crate::ui::state::Tab;
use crate::ui::traits::Action;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Global bindings, consulted only after the active view and any overlay
/// had their chance to consume the key.
pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<Action> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
            (KeyCode::Char('q'), _) => Some(Action::Quit),
            (KeyCode::Tab, _) => Some(Action::NextTab),
            (KeyCode::BackTab, _) => Some(Action::PrevTab),
            (KeyCode::Char('1'), _) => Some(Action::SwitchTab(Tab::Home)),
            (KeyCode::Char('2'), _) => Some(Action::SwitchTab(Tab::Story)),
            (KeyCode::Char('3'), _) => Some(Action::SwitchTab(Tab::Album)),
            (KeyCode::Char('4'), _) => Some(Action::SwitchTab(Tab::Config)),
            (KeyCode::Char(' '), _) => Some(Action::ToggleMusic),
            (KeyCode::Char('+'), _) => Some(Action::VolumeUp),
            (KeyCode::Char('='), _) => Some(Action::VolumeUp),
            (KeyCode::Char('-'), _) => Some(Action::VolumeDown),
            (KeyCode::Char('d'), _) => Some(Action::ToggleDarkMode),
            (KeyCode::Char('g'), _) => Some(Action::OpenGift),
            (KeyCode::Char('s'), _) => Some(Action::Share),
            _ => None,
        }
    }
}
