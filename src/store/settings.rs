//! The persisted subset of application state.
//!
//! Loaded once at startup, flushed on every change. Everything else
//! (playback state, gift state, story, active tab, autoplay) is
//! session-only and resets on restart.

use tracing::warn;

use super::kv::KvStore;

const KEY_RECIPIENT: &str = "recipient_name";
const KEY_MEMORIES: &str = "memories";
const KEY_VOLUME: &str = "volume";
const KEY_DARK_MODE: &str = "dark_mode";

const DEFAULT_VOLUME: f32 = 0.5;

/// Compiled-in memory set used on first run and whenever the persisted
/// list is corrupt.
pub const DEFAULT_MEMORIES: [&str; 4] = [
    "https://images.unsplash.com/photo-1530103862676-de8c9debad1d",
    "https://images.unsplash.com/photo-1558636508-e0db3814bd1d",
    "https://images.unsplash.com/photo-1464349153735-7db50ed83c84",
    "https://images.unsplash.com/photo-1519671482749-fd09be7ccebf",
];

/// Returns whether a string is acceptable as a memory reference: an
/// http(s) URL or an inline `data:` URI. Anything else is rejected and
/// the caller treats the add as a no-op.
pub fn accepted_memory_url(url: &str) -> bool {
    url.starts_with("http") || url.starts_with("data:")
}

pub struct Settings {
    store: KvStore,
    recipient_name: String,
    memories: Vec<String>,
    volume: f32,
    dark_mode: bool,
}

impl Settings {
    /// Read the persisted subset out of the store, falling back to
    /// compiled-in defaults field by field. Corrupt values never
    /// propagate as errors.
    pub fn load(store: KvStore) -> Self {
        let recipient_name = store.get(KEY_RECIPIENT).unwrap_or_default();

        let memories = match store.get(KEY_MEMORIES) {
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(memories) => memories,
                Err(e) => {
                    warn!("failed to parse persisted memories, using defaults: {e}");
                    default_memories()
                }
            },
            None => default_memories(),
        };

        let volume = store
            .get(KEY_VOLUME)
            .and_then(|raw| raw.parse::<f32>().ok())
            .unwrap_or(DEFAULT_VOLUME)
            .clamp(0.0, 1.0);

        // Dark mode defaults on; only an explicit "false" turns it off.
        let dark_mode = store.get(KEY_DARK_MODE).as_deref() != Some("false");

        Self {
            store,
            recipient_name,
            memories,
            volume,
            dark_mode,
        }
    }

    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    pub fn memories(&self) -> &[String] {
        &self.memories
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_recipient_name(&mut self, name: impl Into<String>) {
        self.recipient_name = name.into();
        self.store.set(KEY_RECIPIENT, self.recipient_name.clone());
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.store.set(KEY_VOLUME, format!("{:.2}", self.volume));
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
        self.store.set(KEY_DARK_MODE, dark_mode.to_string());
    }

    /// Insert a memory at the front and persist the whole list. Position
    /// is identity; there are no per-memory ids.
    pub fn add_memory(&mut self, entry: impl Into<String>) {
        self.memories.insert(0, entry.into());
        self.persist_memories();
    }

    /// Remove by index, keeping the relative order of the rest. Out of
    /// range indices are ignored.
    pub fn remove_memory(&mut self, index: usize) {
        if index < self.memories.len() {
            self.memories.remove(index);
            self.persist_memories();
        }
    }

    /// Empty the collection and drop the persisted key, so the next load
    /// starts from the compiled-in defaults again.
    pub fn clear_memories(&mut self) {
        self.memories.clear();
        self.store.remove(KEY_MEMORIES);
    }

    /// Wipe every persisted key. In-memory values reset to first-run
    /// defaults immediately.
    pub fn purge(&mut self) {
        self.store.clear();
        self.recipient_name = String::new();
        self.memories = default_memories();
        self.volume = DEFAULT_VOLUME;
        self.dark_mode = true;
    }

    fn persist_memories(&mut self) {
        match serde_json::to_string(&self.memories) {
            Ok(raw) => self.store.set(KEY_MEMORIES, raw),
            Err(e) => warn!("failed to serialize memories: {e}"),
        }
    }
}

fn default_memories() -> Vec<String> {
    DEFAULT_MEMORIES.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh(dir: &tempfile::TempDir) -> Settings {
        Settings::load(KvStore::open(dir.path().join("store.json")))
    }

    fn reload(dir: &tempfile::TempDir) -> Settings {
        fresh(dir)
    }

    #[test]
    fn first_run_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = fresh(&dir);

        assert_eq!(settings.recipient_name(), "");
        assert_eq!(settings.memories(), default_memories());
        assert_eq!(settings.volume(), DEFAULT_VOLUME);
        assert!(settings.dark_mode());
    }

    #[test]
    fn memory_mutations_write_through() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = fresh(&dir);

        settings.add_memory("https://example.com/a.jpg");
        settings.add_memory("data:image/png;base64,AAAA");
        settings.remove_memory(1);

        let expected = settings.memories().to_vec();
        let reloaded = reload(&dir);
        assert_eq!(reloaded.memories(), expected);
        assert_eq!(reloaded.memories()[0], "data:image/png;base64,AAAA");
    }

    #[test]
    fn adds_insert_at_the_front() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = fresh(&dir);
        settings.clear_memories();

        settings.add_memory("first");
        settings.add_memory("second");

        assert_eq!(settings.memories(), ["second", "first"]);
    }

    #[test]
    fn remove_preserves_relative_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = fresh(&dir);
        settings.clear_memories();
        for entry in ["d", "c", "b", "a"] {
            settings.add_memory(entry);
        }

        settings.remove_memory(1);

        assert_eq!(settings.memories(), ["a", "c", "d"]);
    }

    #[test]
    fn out_of_range_remove_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = fresh(&dir);
        let before = settings.memories().to_vec();

        settings.remove_memory(before.len());

        assert_eq!(settings.memories(), before);
    }

    #[test]
    fn corrupt_memories_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = KvStore::open(dir.path().join("store.json"));
        store.set(KEY_MEMORIES, "[not valid json");

        let settings = Settings::load(store);
        assert_eq!(settings.memories(), default_memories());
    }

    #[test]
    fn volume_is_clamped_and_round_trips_at_two_decimals() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = fresh(&dir);

        settings.set_volume(1.7);
        assert_eq!(settings.volume(), 1.0);

        settings.set_volume(-0.3);
        assert_eq!(settings.volume(), 0.0);

        settings.set_volume(0.37);
        let reloaded = reload(&dir);
        assert!((reloaded.volume() - 0.37).abs() < 0.005);
    }

    #[test]
    fn dark_mode_only_explicit_false_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = fresh(&dir);

        settings.set_dark_mode(false);
        assert!(!reload(&dir).dark_mode());

        settings.set_dark_mode(true);
        assert!(reload(&dir).dark_mode());
    }

    #[test]
    fn clear_memories_restores_defaults_on_next_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = fresh(&dir);

        settings.add_memory("https://example.com/a.jpg");
        settings.clear_memories();
        assert!(settings.memories().is_empty());

        assert_eq!(reload(&dir).memories(), default_memories());
    }

    #[test]
    fn purge_clears_every_key_and_resets_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = fresh(&dir);
        settings.set_recipient_name("Alex");
        settings.set_volume(0.9);
        settings.set_dark_mode(false);
        settings.add_memory("https://example.com/a.jpg");

        settings.purge();

        assert_eq!(settings.recipient_name(), "");
        assert_eq!(settings.volume(), DEFAULT_VOLUME);
        assert!(settings.dark_mode());
        assert_eq!(settings.memories(), default_memories());

        let reloaded = reload(&dir);
        assert_eq!(reloaded.recipient_name(), "");
        assert_eq!(reloaded.memories(), default_memories());
        assert!(reloaded.dark_mode());
    }

    #[test]
    fn accepted_schemes() {
        assert!(accepted_memory_url("http://example.com/a.jpg"));
        assert!(accepted_memory_url("https://example.com/a.jpg"));
        assert!(accepted_memory_url("data:image/png;base64,AAAA"));
        assert!(!accepted_memory_url("ftp://example.com/a.jpg"));
        assert!(!accepted_memory_url("file:///tmp/a.jpg"));
        assert!(!accepted_memory_url(""));
        assert!(!accepted_memory_url("example.com/a.jpg"));
    }
}
