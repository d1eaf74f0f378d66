//! Looping background music via rodio.
//!
//! The default track is a compiled-in soft chime loop so playback works
//! with zero assets; a user-selected file replaces it for the rest of the
//! session. The selection is never persisted.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use rodio::{source::SineWave, Decoder, OutputStream, Sink, Source};
use tracing::warn;

use super::error::AudioError;

const CHIME_FREQ_HZ: f32 = 523.25;
const CHIME_GAIN: f32 = 0.15;

pub struct MusicPlayer {
    // The stream has to outlive the sink or playback stops.
    _stream: Option<OutputStream>,
    sink: Option<Sink>,
    volume: f32,
    custom_track: Option<PathBuf>,
    playing: bool,
}

impl MusicPlayer {
    pub fn new(volume: f32) -> Self {
        Self {
            _stream: None,
            sink: None,
            volume: volume.clamp(0.0, 1.0),
            custom_track: None,
            playing: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn custom_track(&self) -> Option<&Path> {
        self.custom_track.as_deref()
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Start (or resume) playback. On any device or decode failure the
    /// playing flag reverts to false so the UI reflects actual state.
    pub fn play(&mut self) {
        match self.ensure_sink() {
            Ok(()) => {
                if let Some(sink) = &self.sink {
                    sink.play();
                }
                self.playing = true;
            }
            Err(e) => {
                warn!("playback blocked: {e}");
                self.playing = false;
            }
        }
    }

    pub fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        self.playing = false;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }

    pub fn volume_up(&mut self, step: f32) {
        self.set_volume(self.volume + step);
    }

    pub fn volume_down(&mut self, step: f32) {
        self.set_volume(self.volume - step);
    }

    /// Swap in a user-selected track and start playing it. The custom
    /// track is preferred over the default for the rest of the session.
    pub fn set_custom_track(&mut self, path: PathBuf) {
        self.custom_track = Some(path);
        self.teardown();
        self.play();
    }

    /// Drop the custom track and tear the sink down. The next play
    /// rebuilds from the default chime.
    pub fn clear_custom_track(&mut self) {
        self.custom_track = None;
        self.teardown();
        self.playing = false;
    }

    fn teardown(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self._stream = None;
    }

    // The device is opened lazily on first play, not at startup.
    fn ensure_sink(&mut self) -> Result<(), AudioError> {
        if self.sink.is_some() {
            return Ok(());
        }

        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Device(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| AudioError::Device(e.to_string()))?;

        match &self.custom_track {
            Some(path) => {
                let file = File::open(path).map_err(|e| AudioError::Track {
                    path: path.display().to_string(),
                    source: e,
                })?;
                let source = Decoder::new(BufReader::new(file))
                    .map_err(|e| AudioError::Decode(e.to_string()))?
                    .repeat_infinite();
                sink.append(source);
            }
            None => sink.append(default_chime()),
        }

        sink.set_volume(self.volume);
        sink.pause();

        self._stream = Some(stream);
        self.sink = Some(sink);
        Ok(())
    }
}

fn default_chime() -> impl Source<Item = f32> + Send {
    SineWave::new(CHIME_FREQ_HZ)
        .take_duration(Duration::from_secs_f32(2.0))
        .amplify(CHIME_GAIN)
        .fade_in(Duration::from_millis(200))
        .repeat_infinite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_is_clamped() {
        let mut player = MusicPlayer::new(2.0);
        assert_eq!(player.volume(), 1.0);

        player.set_volume(-0.5);
        assert_eq!(player.volume(), 0.0);

        player.volume_up(0.3);
        player.volume_up(0.9);
        assert_eq!(player.volume(), 1.0);

        player.volume_down(0.25);
        assert!((player.volume() - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn custom_track_is_session_state() {
        let player = MusicPlayer::new(0.5);
        assert!(player.custom_track().is_none());
        assert!(!player.is_playing());
    }

    #[test]
    fn clearing_the_custom_track_restores_the_default() {
        let mut player = MusicPlayer::new(0.5);
        player.set_custom_track(PathBuf::from("party.mp3"));
        assert!(player.custom_track().is_some());

        player.clear_custom_track();
        assert!(player.custom_track().is_none());
        assert!(!player.is_playing());
    }
}
