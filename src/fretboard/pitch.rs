//! Pitch classes and equal-temperament frequencies
//!
//! The twelve note names form a cycle; all arithmetic is modulo 12
//! over their index in `PitchClass::ALL`.

use std::fmt;

/// Number of pitch classes in one octave
pub const NOTES_PER_OCTAVE: usize = 12;

/// Octave-independent note name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

/// Octave-4 reference frequencies (A4 = 440 Hz), indexed like `PitchClass::ALL`
const OCTAVE_4_HZ: [f64; NOTES_PER_OCTAVE] = [
    261.63, 277.18, 293.66, 311.13, 329.63, 349.23, 369.99, 392.00, 415.30, 440.00, 466.16,
    493.88,
];

impl PitchClass {
    /// All pitch classes in cyclic order starting at C
    pub const ALL: [PitchClass; NOTES_PER_OCTAVE] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Position in the C-based sequence (0-11)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Pitch class at `index`, wrapping modulo 12
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % NOTES_PER_OCTAVE]
    }

    /// Move up by `semitones`
    pub fn transpose(self, semitones: u32) -> Self {
        Self::from_index(self.index() + semitones as usize % NOTES_PER_OCTAVE)
    }

    /// Sharp-spelled note name ("C", "C#", ...)
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Frequency in Hz of `pitch` in `octave`
pub fn frequency_of(pitch: PitchClass, octave: i32) -> f64 {
    OCTAVE_4_HZ[pitch.index()] * 2f64.powi(octave - 4)
}
