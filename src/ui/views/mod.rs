pub mod album;
pub mod config;
pub mod home;
pub mod story;

pub use album::Album;
pub use config::Config;
pub use home::Home;
pub use story::Story;

/// Human-readable label for a memory entry. Inline images would flood the
/// screen with base64, so they render as a size summary instead.
pub(crate) fn memory_label(entry: &str) -> String {
    match entry.strip_prefix("data:") {
        Some(rest) => {
            let kind = rest.split(';').next().unwrap_or("image");
            let size_kb = entry.len() * 3 / 4 / 1024;
            format!("inline {kind} (~{size_kb} KB)")
        }
        None => entry.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::memory_label;

    #[test]
    fn urls_pass_through() {
        assert_eq!(
            memory_label("https://example.com/a.jpg"),
            "https://example.com/a.jpg"
        );
    }

    #[test]
    fn data_uris_summarize() {
        let label = memory_label("data:image/png;base64,AAAAAAAA");
        assert!(label.starts_with("inline image/png"));
        assert!(!label.contains("AAAA"));
    }
}
