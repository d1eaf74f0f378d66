//! Central event loop: terminal input, app events, and action dispatch.
//!
//! Key priority per event: Ctrl-C first, then the active overlay, then
//! the active view, then the global bindings.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use color_eyre::eyre::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

use crate::{
    event::events::Event,
    share::{copy_with, share_with, ShareOutcome, SharePayload, SystemShare},
    store::settings::accepted_memory_url,
    ui::{
        app::App,
        input::InputHandler,
        state::{should_autoplay, OpenAction, Overlay},
        traits::Action,
        tui::{TerminalEvent, Tui},
    },
};

const CAROUSEL_INTERVAL: Duration = Duration::from_secs(4);
const VOLUME_STEP: f32 = 0.05;

const SHARE_TITLE: &str = "Birthday Surprise";
const SHARE_URL: &str = "https://github.com/celebra/celebra";

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> Result<()> {
        tokio::select! {
            Some(event) = tui.next() => {
                Self::handle_terminal_event(app, event).await;
            }
            Ok(event) = app.event_rx.recv_async() => {
                Self::handle_app_event(app, event);
            }
            else => {}
        }
        Self::sync_carousel_timer(app);
        Ok(())
    }

    async fn handle_terminal_event(app: &mut App, event: TerminalEvent) {
        match event {
            TerminalEvent::Tick => app.state.confetti.prune(),
            TerminalEvent::FocusGained | TerminalEvent::FocusLost => {}
            TerminalEvent::Key(key) => Self::handle_key(app, key).await,
            TerminalEvent::Resize(..) => {}
        }
    }

    async fn handle_key(app: &mut App, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            app.should_quit = true;
            return;
        }

        if app.overlay.is_some() {
            Self::handle_overlay_key(app, key);
            return;
        }

        let view = &mut app.views[app.state.active_tab.index()];
        let action = match view.handle_input(key, &app.state, &app.ctx).await {
            Some(action) => action,
            None => match InputHandler::handle_key(key) {
                Some(action) => action,
                None => return,
            },
        };
        Self::dispatch_action(app, action);
    }

    fn handle_overlay_key(app: &mut App, key: KeyEvent) {
        let Some(overlay) = app.overlay.take() else {
            return;
        };

        match overlay {
            // Notices and the manual share text close on any key.
            Overlay::Notice(_) | Overlay::ShareText(_) => {}
            confirm => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => Self::confirm(app, confirm),
                KeyCode::Char('n') | KeyCode::Esc => {}
                // Anything else keeps the question on screen.
                _ => app.overlay = Some(confirm),
            },
        }
    }

    fn confirm(app: &mut App, overlay: Overlay) {
        match overlay {
            Overlay::ConfirmStoryRewrite => Self::start_story(app),
            Overlay::ConfirmClearMemories => {
                app.state.settings.clear_memories();
                app.state.carousel_index = 0;
            }
            Overlay::ConfirmPurge => {
                app.state.settings.purge();
                app.state.reset_session();
                app.player.clear_custom_track();
                app.player.set_volume(app.state.settings.volume());
            }
            Overlay::ShareText(_) | Overlay::Notice(_) => {}
        }
    }

    fn handle_app_event(app: &mut App, event: Event) {
        match event {
            Event::WishReady(wish) => {
                app.state.gift.complete();
                app.state.generated_wish = wish;
                app.state.confetti.trigger();
            }
            Event::StoryReady(story) => {
                app.state.story = story;
                app.state.is_loading_story = false;
            }
            Event::CarouselAdvance => app.state.advance_carousel(),
        }
    }

    fn dispatch_action(app: &mut App, action: Action) {
        debug!("dispatching {action:?}");
        match action {
            Action::Quit => app.should_quit = true,
            Action::SwitchTab(tab) => app.state.active_tab = tab,
            Action::NextTab => app.state.active_tab = app.state.active_tab.next(),
            Action::PrevTab => app.state.active_tab = app.state.active_tab.prev(),

            Action::OpenGift => match app.state.gift.open() {
                OpenAction::RequestWish => Self::start_wish(app),
                OpenAction::Celebrate => app.state.confetti.trigger(),
                OpenAction::Ignore => {}
            },
            Action::ResetGift => app.state.gift.reset(),
            Action::Celebrate => app.state.confetti.trigger(),

            Action::FetchStory => {
                if app.state.is_loading_story {
                    // A rewrite is already in flight.
                } else if app.state.story.is_empty() {
                    Self::start_story(app);
                } else {
                    app.overlay = Some(Overlay::ConfirmStoryRewrite);
                }
            }
            Action::CopyStory => {
                let outcome = copy_with(&mut SystemShare, &app.state.story);
                Self::report_share(app, outcome, "Story copied to clipboard!");
            }

            Action::ToggleMusic => {
                app.player.toggle();
                app.state.is_music_playing = app.player.is_playing();
            }
            Action::VolumeUp => {
                app.player.volume_up(VOLUME_STEP);
                app.state.settings.set_volume(app.player.volume());
            }
            Action::VolumeDown => {
                app.player.volume_down(VOLUME_STEP);
                app.state.settings.set_volume(app.player.volume());
            }
            Action::PickAudio(path) => {
                app.player.set_custom_track(path);
                app.state.custom_audio = app.player.custom_track().map(|p| p.to_path_buf());
                app.state.is_music_playing = app.player.is_playing();
            }

            Action::AddMemoryUrl(url) => {
                if accepted_memory_url(&url) {
                    app.state.settings.add_memory(url);
                    app.state.carousel_index = 0;
                }
            }
            Action::AddMemoryFile(path) => {
                if let Some(data_uri) = encode_image_file(&path) {
                    app.state.settings.add_memory(data_uri);
                    app.state.carousel_index = 0;
                }
            }
            Action::RemoveMemory(index) => {
                app.state.settings.remove_memory(index);
                app.state.clamp_carousel();
            }
            Action::RequestClearMemories => {
                app.overlay = Some(Overlay::ConfirmClearMemories);
            }

            Action::SetRecipient(name) => app.state.settings.set_recipient_name(name),
            Action::ToggleDarkMode => {
                let dark = !app.state.settings.dark_mode();
                app.state.settings.set_dark_mode(dark);
            }
            Action::ToggleAutoplay => app.state.autoplay = !app.state.autoplay,
            Action::Share => Self::share(app),
            Action::RequestPurge => app.overlay = Some(Overlay::ConfirmPurge),

            Action::CarouselNext => app.state.advance_carousel(),
            Action::CarouselPrev => app.state.carousel_back(),

            Action::None => {}
        }
    }

    fn start_wish(app: &mut App) {
        let gen = app.ctx.gen.clone();
        let event_tx = app.ctx.event_tx.clone();
        let name = app.state.settings.recipient_name().to_string();
        app.tasks.spawn(
            "generate_wish",
            tokio::spawn(async move {
                let wish = gen.generate_wish(&name).await;
                let _ = event_tx.send_async(Event::WishReady(wish)).await;
            }),
        );
    }

    fn start_story(app: &mut App) {
        app.state.is_loading_story = true;
        let gen = app.ctx.gen.clone();
        let event_tx = app.ctx.event_tx.clone();
        let name = app.state.settings.recipient_name().to_string();
        app.tasks.spawn(
            "generate_story",
            tokio::spawn(async move {
                let story = gen.generate_story(&name).await;
                let _ = event_tx.send_async(Event::StoryReady(story)).await;
            }),
        );
    }

    fn share(app: &mut App) {
        let payload = SharePayload {
            title: SHARE_TITLE.to_string(),
            text: format!(
                "🎉 {SHARE_TITLE} for {}: \"{}\"",
                app.state.display_name(),
                app.state.generated_wish
            ),
            url: SHARE_URL.to_string(),
        };
        let outcome = share_with(&mut SystemShare, &payload);
        Self::report_share(app, outcome, "Wish copied to clipboard!");
    }

    fn report_share(app: &mut App, outcome: ShareOutcome, copied_message: &str) {
        match outcome {
            ShareOutcome::Shared | ShareOutcome::Dismissed => {}
            ShareOutcome::Copied => {
                app.overlay = Some(Overlay::Notice(copied_message.to_string()));
            }
            ShareOutcome::Manual(text) => app.overlay = Some(Overlay::ShareText(text)),
        }
    }

    /// Keep the auto-advance task in step with the tab, the autoplay flag
    /// and the collection size. The timer runs only while all three line
    /// up, and stopping it aborts any pending advance.
    pub fn sync_carousel_timer(app: &mut App) {
        let wanted = should_autoplay(
            app.state.active_tab,
            app.state.autoplay,
            app.state.memory_count(),
        );

        if !wanted {
            app.tasks.abort("carousel");
            return;
        }
        if app.tasks.is_running("carousel") {
            return;
        }

        let event_tx = app.ctx.event_tx.clone();
        app.tasks.spawn(
            "carousel",
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(CAROUSEL_INTERVAL);
                // The first tick of an interval fires immediately.
                interval.tick().await;
                loop {
                    interval.tick().await;
                    let _ = event_tx.send_async(Event::CarouselAdvance).await;
                }
            }),
        );
    }
}

/// Read an image file and inline it as a `data:` URI. Any failure is a
/// warned no-op so a typo never interrupts the celebration.
fn encode_image_file(path: &std::path::Path) -> Option<String> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("could not read {}: {e}", path.display());
            return None;
        }
    };

    let mime = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "image/png",
    };

    Some(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        audio::MusicPlayer,
        gen::TextGen,
        store::{KvStore, Settings},
        ui::{context::AppContext, state::AppState},
        util::task::TaskManager,
    };
    use std::{io::Write, path::PathBuf, sync::Arc};

    fn app_with_store(dir: &tempfile::TempDir) -> App {
        let settings = Settings::load(KvStore::open(dir.path().join("store.json")));
        let player = MusicPlayer::new(settings.volume());
        let state = AppState::new(settings);
        let (event_tx, event_rx) = flume::unbounded();

        App {
            state,
            overlay: None,
            ctx: AppContext {
                gen: Arc::new(TextGen::from_env()),
                event_tx,
            },
            player,
            views: Vec::new(),
            tasks: TaskManager::new(),
            event_rx,
            should_quit: false,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn declining_a_rewrite_keeps_the_story() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_store(&dir);
        app.state.story = "the original tale".to_string();

        EventHandler::dispatch_action(&mut app, Action::FetchStory);
        assert_eq!(app.overlay, Some(Overlay::ConfirmStoryRewrite));
        assert!(!app.state.is_loading_story);

        EventHandler::handle_overlay_key(&mut app, key(KeyCode::Char('n')));
        assert!(app.overlay.is_none());
        assert_eq!(app.state.story, "the original tale");
        assert!(!app.state.is_loading_story);
    }

    #[test]
    fn escape_also_declines_a_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_store(&dir);
        app.state.story = "the original tale".to_string();

        EventHandler::dispatch_action(&mut app, Action::FetchStory);
        EventHandler::handle_overlay_key(&mut app, key(KeyCode::Esc));
        assert!(app.overlay.is_none());
        assert_eq!(app.state.story, "the original tale");
    }

    #[test]
    fn no_second_request_while_a_story_is_in_flight() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_store(&dir);
        app.state.story = "half-woven".to_string();
        app.state.is_loading_story = true;

        EventHandler::dispatch_action(&mut app, Action::FetchStory);
        assert!(app.overlay.is_none());
        assert!(!app.tasks.is_running("generate_story"));
        assert_eq!(app.state.story, "half-woven");
    }

    #[test]
    fn purge_clears_the_custom_track() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_store(&dir);

        EventHandler::dispatch_action(&mut app, Action::PickAudio(PathBuf::from("party.mp3")));
        assert!(app.player.custom_track().is_some());
        assert!(app.state.custom_audio.is_some());

        EventHandler::confirm(&mut app, Overlay::ConfirmPurge);
        assert!(app.player.custom_track().is_none());
        assert!(app.state.custom_audio.is_none());
        assert!(!app.player.is_playing());
        assert!(!app.state.is_music_playing);
    }

    #[test]
    fn image_file_becomes_a_data_uri() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(&[0x89, 0x50, 0x4e, 0x47]).unwrap();

        let uri = encode_image_file(file.path()).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(accepted_memory_url(&uri));
    }

    #[test]
    fn jpeg_extension_maps_to_jpeg_mime() {
        let mut file = tempfile::Builder::new().suffix(".JPG").tempfile().unwrap();
        file.write_all(b"fake").unwrap();

        let uri = encode_image_file(file.path()).unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn missing_file_is_a_no_op() {
        assert!(encode_image_file(std::path::Path::new("/no/such/file.png")).is_none());
    }
}
