use thiserror::Error;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("audio output device error: {0}")]
    Device(String),

    #[error("failed to open track {path}: {source}")]
    Track {
        path: String,
        source: std::io::Error,
    },

    #[error("decoding error: {0}")]
    Decode(String),
}
