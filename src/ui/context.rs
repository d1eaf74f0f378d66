use crate::{event::events::Event, gen::TextGen};
use flume::Sender;
use std::sync::Arc;

/// Shared services handed to views and background tasks.
pub struct AppContext {
    pub gen: Arc<TextGen>,
    pub event_tx: Sender<Event>,
}
