use std::sync::Arc;

use color_eyre::eyre::Result;
use flume::Receiver;
use tracing::info;

use crate::{
    audio::MusicPlayer,
    event::events::Event,
    gen::TextGen,
    store::{KvStore, Settings},
    ui::{
        context::AppContext,
        layout::AppLayout,
        state::{AppState, Overlay},
        traits::View,
        tui::Tui,
        util::handler::EventHandler,
        views::{Album, Config, Home, Story},
    },
    util::{data_dir, task::TaskManager},
};

pub struct App {
    pub state: AppState,
    pub overlay: Option<Overlay>,
    pub ctx: AppContext,
    pub player: MusicPlayer,
    pub views: Vec<Box<dyn View>>,
    pub tasks: TaskManager,
    pub event_rx: Receiver<Event>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Result<Self> {
        let store = KvStore::open(data_dir().join("store.json"));
        let settings = Settings::load(store);
        let player = MusicPlayer::new(settings.volume());
        let state = AppState::new(settings);

        let (event_tx, event_rx) = flume::unbounded();
        let ctx = AppContext {
            gen: Arc::new(TextGen::from_env()),
            event_tx,
        };

        let views: Vec<Box<dyn View>> = vec![
            Box::new(Home::default()),
            Box::new(Story),
            Box::new(Album::default()),
            Box::new(Config::default()),
        ];

        Ok(Self {
            state,
            overlay: None,
            ctx,
            player,
            views,
            tasks: TaskManager::new(),
            event_rx,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        info!("celebration started");

        EventHandler::sync_carousel_timer(self);

        while !self.should_quit {
            tui.terminal.draw(|f| {
                let area = f.area();
                AppLayout::new(self).render(f, area);
            })?;
            EventHandler::handle_events(self, &mut tui).await?;
        }

        self.tasks.abort_all();
        tui.exit()?;
        info!("celebration over");
        Ok(())
    }
}
