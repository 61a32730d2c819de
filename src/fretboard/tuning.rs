//! Guitar strings in standard tuning

use super::pitch::PitchClass;
use std::fmt;

/// One of the six strings; 6 is the lowest (low E), 1 the highest (high E)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringId(u8);

impl StringId {
    /// All strings, low to high (6 down to 1)
    pub const ALL: [StringId; 6] = [
        StringId(6),
        StringId(5),
        StringId(4),
        StringId(3),
        StringId(2),
        StringId(1),
    ];

    /// Returns `None` outside 1-6
    pub fn new(number: u8) -> Option<Self> {
        (1..=6).contains(&number).then_some(StringId(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero-based slot for per-string tables (string 1 → 0)
    pub fn slot(self) -> usize {
        self.0 as usize - 1
    }

    /// Open-string pitch in standard tuning
    pub fn open_pitch(self) -> PitchClass {
        match self.0 {
            6 | 1 => PitchClass::E,
            5 => PitchClass::A,
            4 => PitchClass::D,
            3 => PitchClass::G,
            _ => PitchClass::B,
        }
    }

    /// Octave of the open string, used for tone synthesis
    pub fn base_octave(self) -> i32 {
        match self.0 {
            6 | 5 => 2,
            4 | 3 | 2 => 3,
            _ => 4,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self.0 {
            6 => "6th (Low E)",
            5 => "5th (A)",
            4 => "4th (D)",
            3 => "3rd (G)",
            2 => "2nd (B)",
            _ => "1st (High E)",
        }
    }
}

impl fmt::Display for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
