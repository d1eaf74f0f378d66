pub mod error;
pub mod player;

pub use player::MusicPlayer;
