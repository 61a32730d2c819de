//! Audio: single-tone playback for challenge notes
//!
//! # Components
//! - `TonePlayer`: the collaborator the session controller talks to
//! - `SilentPlayer`: used with `--no-audio` or when built without sound
//! - `rodio_player.rs`: sine-tone playback on the default output device
//!   (`audio` feature)
//!
//! Playback is fire-and-forget. Errors come back as `AudioUnavailable` and the
//! controller logs and drops them.

#[cfg(feature = "audio")]
pub mod rodio_player;

use crate::fretboard::{frequency_of, PitchClass};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("audio unavailable: {reason}")]
pub struct AudioUnavailable {
    pub reason: String,
}

#[cfg(any(feature = "audio", test))]
impl AudioUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        AudioUnavailable {
            reason: reason.into(),
        }
    }
}

/// Plays one tone per call
pub trait TonePlayer {
    /// Prepare the output device; calls after the first success do nothing
    fn init(&mut self) -> Result<(), AudioUnavailable>;

    /// Start a tone of `pitch` in `octave` without waiting for it to finish
    fn play(&mut self, pitch: PitchClass, octave: i32) -> Result<(), AudioUnavailable>;
}

/// Player that never makes a sound
#[derive(Debug, Default)]
pub struct SilentPlayer;

impl TonePlayer for SilentPlayer {
    fn init(&mut self) -> Result<(), AudioUnavailable> {
        Ok(())
    }

    fn play(&mut self, pitch: PitchClass, octave: i32) -> Result<(), AudioUnavailable> {
        tracing::trace!(
            "silent tone {}{} ({:.2} Hz)",
            pitch,
            octave,
            frequency_of(pitch, octave)
        );
        Ok(())
    }
}

/// Best player this build supports
pub fn default_player() -> Box<dyn TonePlayer> {
    #[cfg(feature = "audio")]
    {
        Box::new(rodio_player::RodioPlayer::new())
    }
    #[cfg(not(feature = "audio"))]
    {
        tracing::info!("built without the `audio` feature; notes will not sound");
        Box::new(SilentPlayer)
    }
}
