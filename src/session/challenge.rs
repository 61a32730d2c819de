//! Challenge selection
//!
//! A challenge is a pitch class plus the one position the player is asked
//! to find it at. Selection retries in a loop until the drawn pitch is
//! playable on at least one selected string.

use crate::fretboard::{octave_for, pitch_at, positions_for, PitchClass, Position, StringId};
use rand::seq::SliceRandom;
use rand::Rng;

/// The active quiz question and its per-question flags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Challenge {
    pub pitch: PitchClass,
    pub string: StringId,
    pub fret: u32,
    /// Seconds left on the clock
    pub countdown: u32,
    /// Seconds the clock started from
    pub time_limit: u32,
    /// Clock is running
    pub active: bool,
    pub answer_shown: bool,
    pub awaiting_response: bool,
}

impl Challenge {
    pub fn new(pitch: PitchClass, position: Position, time_limit: u32) -> Self {
        Challenge {
            pitch,
            string: position.string,
            fret: position.fret,
            countdown: time_limit,
            time_limit,
            active: true,
            answer_shown: false,
            awaiting_response: false,
        }
    }

    /// Octave the target position sounds in
    pub fn octave(&self) -> i32 {
        octave_for(self.string, self.fret)
    }

    /// Elapsed share of the time limit, 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        if self.time_limit == 0 {
            return 1.0;
        }
        (self.time_limit - self.countdown.min(self.time_limit)) as f32 / self.time_limit as f32
    }

    /// e.g. "A is at fret 5 on the 6th (Low E)"
    pub fn answer_text(&self) -> String {
        format!(
            "{} is at fret {} on the {}",
            self.pitch,
            self.fret,
            self.string.display_name()
        )
    }
}

/// Pick a string and fret for a known pitch
///
/// Only strings with at least one position of `pitch` within `max_fret` are
/// candidates. Returns `None` if no selected string can play it.
pub fn place_pitch<R: Rng + ?Sized>(
    rng: &mut R,
    pitch: PitchClass,
    strings: &[StringId],
    max_fret: u32,
) -> Option<Position> {
    let playable: Vec<StringId> = strings
        .iter()
        .copied()
        .filter(|&s| !positions_for(pitch, &[s], max_fret).is_empty())
        .collect();

    let string = *playable.choose(rng)?;
    let position = *positions_for(pitch, &[string], max_fret).choose(rng)?;
    debug_assert_eq!(pitch_at(position.string, position.fret), pitch);
    Some(position)
}

/// Draw a random pitch and a position for it on one of `strings`
///
/// Redraws the pitch until some selected string can play it. With any string
/// selected this ends: five frets reach six of the twelve pitch classes.
/// Returns `None` only when `strings` is empty.
pub fn pick_target<R: Rng + ?Sized>(
    rng: &mut R,
    strings: &[StringId],
    max_fret: u32,
) -> Option<(PitchClass, Position)> {
    if strings.is_empty() {
        return None;
    }

    let mut draws = 0u32;
    loop {
        draws += 1;
        let pitch = *PitchClass::ALL.choose(rng)?;
        if let Some(position) = place_pitch(rng, pitch, strings, max_fret) {
            if draws > 1 {
                tracing::trace!("placed {} after {} draws", pitch, draws);
            }
            return Some((pitch, position));
        }
    }
}
