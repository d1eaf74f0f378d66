//! Session state: tabs, the gift reveal machine, the confetti effect and
//! the carousel. Persisted preferences live in [`Settings`]; everything
//! here resets on restart.

use std::time::{Duration, Instant};

use crate::store::Settings;

/// Shown before the first generated wish arrives, and shared verbatim if
/// the user shares without opening the gift.
pub const DEFAULT_WISH: &str = "Have a wonderful day filled with joy!";

const CONFETTI_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Story,
    Album,
    Config,
}

impl Tab {
    pub fn all() -> [Tab; 4] {
        [Tab::Home, Tab::Story, Tab::Album, Tab::Config]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Story => "Story",
            Tab::Album => "Album",
            Tab::Config => "Config",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Story => 1,
            Tab::Album => 2,
            Tab::Config => 3,
        }
    }

    pub fn next(&self) -> Tab {
        Tab::all()[(self.index() + 1) % 4]
    }

    pub fn prev(&self) -> Tab {
        Tab::all()[(self.index() + 3) % 4]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GiftState {
    #[default]
    Closed,
    Loading,
    Opened,
}

/// What the open action should do given the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAction {
    /// Kick off a wish-generation request.
    RequestWish,
    /// Already opened; just replay the celebration.
    Celebrate,
    /// A request is already in flight.
    Ignore,
}

/// One-shot gift reveal machine. Opening from `Closed` requests a wish
/// exactly once; the response (real or fallback) always lands in
/// `Opened`. Reset applies only to an opened gift and returns it to
/// `Closed` without discarding the last wish; while a request is in
/// flight the reveal cannot be rearmed.
#[derive(Debug, Default)]
pub struct GiftReveal {
    state: GiftState,
}

impl GiftReveal {
    pub fn state(&self) -> GiftState {
        self.state
    }

    pub fn open(&mut self) -> OpenAction {
        match self.state {
            GiftState::Closed => {
                self.state = GiftState::Loading;
                OpenAction::RequestWish
            }
            GiftState::Loading => OpenAction::Ignore,
            GiftState::Opened => OpenAction::Celebrate,
        }
    }

    pub fn complete(&mut self) {
        if self.state == GiftState::Loading {
            self.state = GiftState::Opened;
        }
    }

    pub fn reset(&mut self) {
        if self.state == GiftState::Opened {
            self.state = GiftState::Closed;
        }
    }
}

/// Celebration effect. Every trigger starts its own 3 second countdown;
/// triggers are never coalesced, and the effect renders while any
/// countdown is live.
#[derive(Debug, Default)]
pub struct ConfettiEffect {
    deadlines: Vec<Instant>,
}

impl ConfettiEffect {
    pub fn trigger(&mut self) {
        self.trigger_at(Instant::now());
    }

    fn trigger_at(&mut self, now: Instant) {
        self.deadlines.push(now + CONFETTI_DURATION);
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Instant::now())
    }

    fn is_active_at(&self, now: Instant) -> bool {
        self.deadlines.iter().any(|deadline| *deadline > now)
    }

    /// Drop expired countdowns; called on the UI tick.
    pub fn prune(&mut self) {
        let now = Instant::now();
        self.deadlines.retain(|deadline| *deadline > now);
    }
}

/// Modal interactions layered over the active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    ConfirmStoryRewrite,
    ConfirmClearMemories,
    ConfirmPurge,
    /// Last-resort share tier: raw text for manual copying.
    ShareText(String),
    Notice(String),
}

/// The carousel auto-advances only on the home tab, with autoplay on and
/// more than one memory to cycle through.
pub fn should_autoplay(tab: Tab, autoplay: bool, memory_count: usize) -> bool {
    autoplay && tab == Tab::Home && memory_count > 1
}

pub struct AppState {
    pub settings: Settings,
    pub gift: GiftReveal,
    pub generated_wish: String,
    pub story: String,
    pub is_loading_story: bool,
    pub active_tab: Tab,
    pub autoplay: bool,
    pub carousel_index: usize,
    pub confetti: ConfettiEffect,
    /// Mirror of the player's state so views stay pure over `AppState`.
    pub is_music_playing: bool,
    /// Session-local track selection; never persisted.
    pub custom_audio: Option<std::path::PathBuf>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            gift: GiftReveal::default(),
            generated_wish: DEFAULT_WISH.to_string(),
            story: String::new(),
            is_loading_story: false,
            active_tab: Tab::default(),
            autoplay: true,
            carousel_index: 0,
            confetti: ConfettiEffect::default(),
            is_music_playing: false,
            custom_audio: None,
        }
    }

    pub fn display_name(&self) -> &str {
        let name = self.settings.recipient_name();
        if name.trim().is_empty() {
            "Special One"
        } else {
            name
        }
    }

    pub fn memory_count(&self) -> usize {
        self.settings.memories().len()
    }

    pub fn advance_carousel(&mut self) {
        let count = self.memory_count();
        if count > 1 {
            self.carousel_index = (self.carousel_index + 1) % count;
        }
    }

    pub fn carousel_back(&mut self) {
        let count = self.memory_count();
        if count > 1 {
            self.carousel_index = (self.carousel_index + count - 1) % count;
        }
    }

    /// Keep the index valid after a removal.
    pub fn clamp_carousel(&mut self) {
        let count = self.memory_count();
        if count == 0 {
            self.carousel_index = 0;
        } else if self.carousel_index >= count {
            self.carousel_index = count - 1;
        }
    }

    /// Reset every session-only field to its first-run value.
    pub fn reset_session(&mut self) {
        self.gift.reset();
        self.generated_wish = DEFAULT_WISH.to_string();
        self.story.clear();
        self.is_loading_story = false;
        self.active_tab = Tab::default();
        self.autoplay = true;
        self.carousel_index = 0;
        self.is_music_playing = false;
        self.custom_audio = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gift_opens_exactly_once() {
        let mut gift = GiftReveal::default();
        assert_eq!(gift.open(), OpenAction::RequestWish);
        assert_eq!(gift.state(), GiftState::Loading);

        // Clicking again mid-flight does nothing.
        assert_eq!(gift.open(), OpenAction::Ignore);
        assert_eq!(gift.state(), GiftState::Loading);

        gift.complete();
        assert_eq!(gift.state(), GiftState::Opened);

        // Re-opening only replays the celebration, no new request.
        assert_eq!(gift.open(), OpenAction::Celebrate);
        assert_eq!(gift.state(), GiftState::Opened);
    }

    #[test]
    fn gift_reset_rearms_the_request() {
        let mut gift = GiftReveal::default();
        gift.open();
        gift.complete();
        gift.reset();
        assert_eq!(gift.state(), GiftState::Closed);
        assert_eq!(gift.open(), OpenAction::RequestWish);
    }

    #[test]
    fn reset_is_ignored_while_a_wish_is_in_flight() {
        let mut gift = GiftReveal::default();
        gift.open();
        gift.reset();
        assert_eq!(gift.state(), GiftState::Loading);

        // The outstanding request still lands in the right place.
        gift.complete();
        assert_eq!(gift.state(), GiftState::Opened);
    }

    #[test]
    fn complete_outside_loading_is_ignored() {
        let mut gift = GiftReveal::default();
        gift.complete();
        assert_eq!(gift.state(), GiftState::Closed);
    }

    #[test]
    fn confetti_countdowns_are_independent() {
        let mut confetti = ConfettiEffect::default();
        let start = Instant::now();
        assert!(!confetti.is_active_at(start));

        confetti.trigger_at(start);
        confetti.trigger_at(start + Duration::from_secs(2));

        assert!(confetti.is_active_at(start + Duration::from_millis(100)));
        // First countdown has expired, second is still live.
        assert!(confetti.is_active_at(start + Duration::from_millis(3500)));
        // Both expired.
        assert!(!confetti.is_active_at(start + Duration::from_millis(5100)));
    }

    #[test]
    fn autoplay_requires_home_tab_flag_and_plural_memories() {
        assert!(should_autoplay(Tab::Home, true, 2));
        assert!(!should_autoplay(Tab::Home, true, 1));
        assert!(!should_autoplay(Tab::Home, true, 0));
        assert!(!should_autoplay(Tab::Home, false, 5));
        assert!(!should_autoplay(Tab::Album, true, 5));
    }

    #[test]
    fn tab_cycling_wraps() {
        assert_eq!(Tab::Config.next(), Tab::Home);
        assert_eq!(Tab::Home.prev(), Tab::Config);
        assert_eq!(Tab::Home.next(), Tab::Story);
    }
}
