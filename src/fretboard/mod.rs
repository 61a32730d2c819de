//! Fretboard Model: pitch lookup and position search
//!
//! # Components
//! - `pitch.rs`: PitchClass cycle and reference frequencies
//! - `tuning.rs`: StringId with open pitches and base octaves
//!
//! Everything here is pure; randomisation happens in the session layer.

pub mod pitch;
pub mod tuning;

pub use pitch::{frequency_of, PitchClass, NOTES_PER_OCTAVE};
pub use tuning::StringId;

/// A fretted (or open, fret 0) spot on one string
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub string: StringId,
    pub fret: u32,
}

/// Pitch class sounded at `fret` on `string`
pub fn pitch_at(string: StringId, fret: u32) -> PitchClass {
    string.open_pitch().transpose(fret)
}

/// Every position of `pitch` on `strings` within frets 0..=max_fret
///
/// Ordered string-major (in the caller's order), then by ascending fret.
pub fn positions_for(pitch: PitchClass, strings: &[StringId], max_fret: u32) -> Vec<Position> {
    strings
        .iter()
        .flat_map(|&string| {
            (0..=max_fret)
                .filter(move |&fret| pitch_at(string, fret) == pitch)
                .map(move |fret| Position { string, fret })
        })
        .collect()
}

/// Octave a position sounds in
pub fn octave_for(string: StringId, fret: u32) -> i32 {
    string.base_octave() + (fret / NOTES_PER_OCTAVE as u32) as i32
}
