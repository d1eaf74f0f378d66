/// Events flowing back into the UI loop from background tasks.
#[derive(Debug, Clone)]
pub enum Event {
    /// The wish request finished; always carries text (fallback included).
    WishReady(String),
    /// The story request finished; always carries text (fallback included).
    StoryReady(String),
    /// Autoplay timer fired; move the carousel forward one slot.
    CarouselAdvance,
}
