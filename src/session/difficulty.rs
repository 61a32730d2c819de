//! Difficulty levels: time limit and fret ceiling

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    #[cfg(test)]
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Expert,
    ];

    /// Seconds allowed per challenge
    pub fn time_limit_secs(self) -> u32 {
        match self {
            Difficulty::Beginner => 8,
            Difficulty::Intermediate => 6,
            Difficulty::Advanced => 4,
            Difficulty::Expert => 3,
        }
    }

    /// Highest fret (inclusive) a challenge may land on
    pub fn max_fret(self) -> u32 {
        match self {
            Difficulty::Beginner => 5,
            Difficulty::Intermediate => 12,
            Difficulty::Advanced => 15,
            Difficulty::Expert => 22,
        }
    }

    /// Following level, wrapping from expert back to beginner
    pub fn next(self) -> Self {
        match self {
            Difficulty::Beginner => Difficulty::Intermediate,
            Difficulty::Intermediate => Difficulty::Advanced,
            Difficulty::Advanced => Difficulty::Expert,
            Difficulty::Expert => Difficulty::Beginner,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
        }
    }

    /// e.g. "Beginner (8s, 0-5 frets)"
    pub fn label(self) -> String {
        format!(
            "{} ({}s, 0-{} frets)",
            self.name(),
            self.time_limit_secs(),
            self.max_fret()
        )
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
