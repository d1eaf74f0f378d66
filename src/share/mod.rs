//! Sharing with fallback tiers.
//!
//! Three tiers: system share target, clipboard copy, manual display.
//! A user backing out of the system tier is not an error and stops the
//! cascade; an unavailable or failed tier falls through to the next.

use thiserror::Error;
use tracing::{info, warn};

pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("share target unavailable")]
    Unavailable,

    #[error("cancelled by user")]
    Cancelled,

    #[error("share failed: {0}")]
    Failed(String),
}

/// Seam over the platform so the cascade is testable.
pub trait ShareTarget {
    fn share(&mut self, payload: &SharePayload) -> Result<(), ShareError>;
    fn copy(&mut self, text: &str) -> Result<(), ShareError>;
}

/// What the UI should tell the user afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
    /// Both tiers failed; hand the text back for manual copying.
    Manual(String),
    /// The user backed out of the system share. Not an error.
    Dismissed,
}

pub fn share_with(target: &mut dyn ShareTarget, payload: &SharePayload) -> ShareOutcome {
    match target.share(payload) {
        Ok(()) => ShareOutcome::Shared,
        Err(ShareError::Cancelled) => ShareOutcome::Dismissed,
        Err(e) => {
            info!("system share unavailable ({e}), trying clipboard");
            copy_with(target, &payload.text)
        }
    }
}

pub fn copy_with(target: &mut dyn ShareTarget, text: &str) -> ShareOutcome {
    match target.copy(text) {
        Ok(()) => ShareOutcome::Copied,
        Err(e) => {
            warn!("clipboard copy failed: {e}");
            ShareOutcome::Manual(text.to_string())
        }
    }
}

/// Default target: hands the payload to the OS mail composer, copies via
/// the system clipboard.
pub struct SystemShare;

impl ShareTarget for SystemShare {
    fn share(&mut self, payload: &SharePayload) -> Result<(), ShareError> {
        let body = format!("{}\n{}", payload.text, payload.url);
        let uri = format!(
            "mailto:?subject={}&body={}",
            urlencoding::encode(&payload.title),
            urlencoding::encode(&body)
        );
        opener::open(&uri).map_err(|e| ShareError::Failed(e.to_string()))
    }

    fn copy(&mut self, text: &str) -> Result<(), ShareError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|_| ShareError::Unavailable)?;
        clipboard
            .set_text(text)
            .map_err(|e| ShareError::Failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockTarget {
        share_result: Option<ShareError>,
        copy_result: Option<ShareError>,
        share_calls: usize,
        copy_calls: usize,
    }

    impl MockTarget {
        fn new(share_result: Option<ShareError>, copy_result: Option<ShareError>) -> Self {
            Self {
                share_result,
                copy_result,
                share_calls: 0,
                copy_calls: 0,
            }
        }
    }

    impl ShareTarget for MockTarget {
        fn share(&mut self, _payload: &SharePayload) -> Result<(), ShareError> {
            self.share_calls += 1;
            match &self.share_result {
                None => Ok(()),
                Some(ShareError::Cancelled) => Err(ShareError::Cancelled),
                Some(ShareError::Unavailable) => Err(ShareError::Unavailable),
                Some(ShareError::Failed(m)) => Err(ShareError::Failed(m.clone())),
            }
        }

        fn copy(&mut self, _text: &str) -> Result<(), ShareError> {
            self.copy_calls += 1;
            match &self.copy_result {
                None => Ok(()),
                Some(ShareError::Cancelled) => Err(ShareError::Cancelled),
                Some(ShareError::Unavailable) => Err(ShareError::Unavailable),
                Some(ShareError::Failed(m)) => Err(ShareError::Failed(m.clone())),
            }
        }
    }

    fn payload() -> SharePayload {
        SharePayload {
            title: "Birthday Surprise".into(),
            text: "for you".into(),
            url: "https://example.com".into(),
        }
    }

    #[test]
    fn system_share_success_stops_the_cascade() {
        let mut target = MockTarget::new(None, None);
        assert_eq!(share_with(&mut target, &payload()), ShareOutcome::Shared);
        assert_eq!(target.copy_calls, 0);
    }

    #[test]
    fn cancellation_is_accepted_without_fallback() {
        let mut target = MockTarget::new(Some(ShareError::Cancelled), None);
        assert_eq!(share_with(&mut target, &payload()), ShareOutcome::Dismissed);
        assert_eq!(target.copy_calls, 0);
    }

    #[test]
    fn unavailable_share_falls_back_to_clipboard() {
        let mut target = MockTarget::new(Some(ShareError::Unavailable), None);
        assert_eq!(share_with(&mut target, &payload()), ShareOutcome::Copied);
        assert_eq!(target.share_calls, 1);
        assert_eq!(target.copy_calls, 1);
    }

    #[test]
    fn double_failure_hands_text_back_for_manual_copy() {
        let mut target = MockTarget::new(
            Some(ShareError::Failed("no handler".into())),
            Some(ShareError::Unavailable),
        );
        assert_eq!(
            share_with(&mut target, &payload()),
            ShareOutcome::Manual("for you".into())
        );
    }
}
