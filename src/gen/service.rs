//! Wish and story generation with graceful degradation.
//!
//! Both operations share a contract: any failure (transport, provider
//! error, empty response) degrades to a fixed fallback string. Callers
//! never observe an error value.

use async_trait::async_trait;
use tracing::warn;

use super::client::{Error, Gemini, GenerationConfig};

pub const FALLBACK_WISH: &str =
    "Wishing you a fantastic year ahead full of amazing adventures and happy moments!";
pub const FALLBACK_STORY: &str =
    "Once upon a time, a remarkable individual began a journey that would inspire everyone they met...";

const GENERIC_SUBJECT: &str = "someone special";
const STORY_SUBJECT: &str = "the Birthday Star";

/// Seam over the provider so the degradation contract is testable
/// without a network.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(&self, prompt: &str, config: GenerationConfig) -> Result<String, Error>;
}

#[async_trait]
impl TextModel for Gemini {
    async fn generate(&self, prompt: &str, config: GenerationConfig) -> Result<String, Error> {
        Gemini::generate(self, prompt, config).await
    }
}

pub struct TextGen<M = Gemini> {
    model: M,
}

impl TextGen<Gemini> {
    pub fn from_env() -> Self {
        Self::with_model(Gemini::from_env())
    }
}

impl<M: TextModel> TextGen<M> {
    pub fn with_model(model: M) -> Self {
        Self { model }
    }

    /// A short personalized wish. Empty names get a generic subject.
    pub async fn generate_wish(&self, name: &str) -> String {
        let subject = subject_or(name, GENERIC_SUBJECT);
        let prompt = format!(
            "Generate a short, heartfelt, and creative birthday wish for someone named {subject}. \
             Keep it under 3 sentences."
        );

        let config = GenerationConfig {
            temperature: 0.8,
            top_p: Some(0.9),
        };

        match self.model.generate(&prompt, config).await {
            Ok(text) => text,
            Err(e) => {
                warn!("wish generation failed: {e}");
                FALLBACK_WISH.to_string()
            }
        }
    }

    /// A two-paragraph "legend" story about the recipient.
    pub async fn generate_story(&self, name: &str) -> String {
        let subject = subject_or(name, STORY_SUBJECT);
        let prompt = format!(
            "Write a short \"Legend of {subject}\" story. It should be an epic, humorous, or \
             magical 2-paragraph tale about how they were destined to celebrate this specific \
             birthday and bring joy to the world."
        );

        let config = GenerationConfig {
            temperature: 0.9,
            top_p: None,
        };

        match self.model.generate(&prompt, config).await {
            Ok(text) => text,
            Err(e) => {
                warn!("story generation failed: {e}");
                FALLBACK_STORY.to_string()
            }
        }
    }
}

fn subject_or<'a>(name: &'a str, fallback: &'a str) -> &'a str {
    let name = name.trim();
    if name.is_empty() {
        fallback
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
        response: Result<&'static str, ()>,
    }

    impl RecordingModel {
        fn ok(text: &'static str) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                response: Ok(text),
            }
        }

        fn failing() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                response: Err(()),
            }
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl TextModel for RecordingModel {
        async fn generate(
            &self,
            prompt: &str,
            _config: GenerationConfig,
        ) -> Result<String, Error> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.response {
                Ok(text) => Ok(text.to_string()),
                Err(()) => Err(Error::Network("connection refused".into())),
            }
        }
    }

    #[tokio::test]
    async fn wish_passes_generated_text_through() {
        let gen = TextGen::with_model(RecordingModel::ok("Happy birthday, Alex!"));
        assert_eq!(gen.generate_wish("Alex").await, "Happy birthday, Alex!");
    }

    #[tokio::test]
    async fn wish_falls_back_on_failure() {
        let gen = TextGen::with_model(RecordingModel::failing());
        assert_eq!(gen.generate_wish("Alex").await, FALLBACK_WISH);
    }

    #[tokio::test]
    async fn story_falls_back_on_failure() {
        let gen = TextGen::with_model(RecordingModel::failing());
        assert_eq!(gen.generate_story("Alex").await, FALLBACK_STORY);
    }

    #[tokio::test]
    async fn empty_name_uses_generic_subject() {
        let gen = TextGen::with_model(RecordingModel::ok("text"));
        gen.generate_wish("   ").await;
        assert!(gen.model.last_prompt().contains(GENERIC_SUBJECT));

        gen.generate_story("").await;
        assert!(gen.model.last_prompt().contains(STORY_SUBJECT));
    }

    #[tokio::test]
    async fn named_subject_lands_in_the_prompt() {
        let gen = TextGen::with_model(RecordingModel::ok("text"));
        gen.generate_wish("Alex").await;
        assert!(gen.model.last_prompt().contains("Alex"));
    }
}
