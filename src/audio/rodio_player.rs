//! Sine-tone playback through rodio

use super::{AudioUnavailable, TonePlayer};
use crate::fretboard::{frequency_of, PitchClass};
use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};
use std::time::Duration;

/// How long each note sounds
const TONE_DURATION: Duration = Duration::from_millis(800);
const VOLUME: f32 = 0.25;
const FADE: Duration = Duration::from_millis(15);

/// Opens the default output stream lazily, on first `init` or `play`
pub struct RodioPlayer {
    stream: Option<OutputStream>,
}

impl RodioPlayer {
    pub fn new() -> Self {
        RodioPlayer { stream: None }
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl TonePlayer for RodioPlayer {
    fn init(&mut self) -> Result<(), AudioUnavailable> {
        if self.stream.is_some() {
            return Ok(());
        }

        let mut stream = OutputStreamBuilder::open_default_stream().map_err(|e| {
            AudioUnavailable::new(format!("failed to open output stream: {}", e))
        })?;
        stream.log_on_drop(false);

        tracing::debug!("audio output stream opened");
        self.stream = Some(stream);
        Ok(())
    }

    fn play(&mut self, pitch: PitchClass, octave: i32) -> Result<(), AudioUnavailable> {
        self.init()?;
        let stream = self
            .stream
            .as_ref()
            .ok_or_else(|| AudioUnavailable::new("output stream missing after init"))?;

        let hz = frequency_of(pitch, octave) as f32;
        let tone = SineWave::new(hz)
            .take_duration(TONE_DURATION)
            .fade_in(FADE)
            .amplify(VOLUME);

        let sink = Sink::connect_new(stream.mixer());
        sink.append(tone);
        sink.detach();

        tracing::debug!("playing {}{} at {:.2} Hz", pitch, octave, hz);
        Ok(())
    }
}
