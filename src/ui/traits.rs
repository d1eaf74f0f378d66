use crate::ui::context::AppContext;
use crate::ui::state::{AppState, Tab};
use async_trait::async_trait;
use ratatui::crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    SwitchTab(Tab),
    NextTab,
    PrevTab,

    OpenGift,
    ResetGift,
    Celebrate,

    FetchStory,
    CopyStory,

    ToggleMusic,
    VolumeUp,
    VolumeDown,
    PickAudio(PathBuf),

    AddMemoryUrl(String),
    AddMemoryFile(PathBuf),
    RemoveMemory(usize),
    RequestClearMemories,

    SetRecipient(String),
    ToggleDarkMode,
    ToggleAutoplay,
    Share,
    RequestPurge,

    CarouselNext,
    CarouselPrev,

    None,
}

#[async_trait]
pub trait View: Send {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext);

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action>;
}
