//! Score keeping for a drill session
//!
//! Features:
//! - Correct/total counts and rounded accuracy
//! - Per-string tallies and weak string identification
//! - Miss log for notes the player keeps getting wrong

use crate::fretboard::{PitchClass, StringId};
use rustc_hash::FxHashMap;

/// Misses of the same note on the same string before it is flagged
const MISS_THRESHOLD: u32 = 3;

/// Strings below this accuracy (percent) count as weak
const WEAK_STRING_ACCURACY: u32 = 80;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StringTally {
    pub correct: u32,
    pub total: u32,
}

/// Cumulative results; counts only grow until `reset`
#[derive(Clone, Debug, Default)]
pub struct Score {
    correct: u32,
    total: u32,
    /// Indexed by `StringId::slot`
    per_string: [StringTally; 6],
    /// (string, pitch) → number of misses
    misses: FxHashMap<(StringId, PitchClass), u32>,
}

/// Rounded percentage, 0 when nothing was attempted
pub fn percent(correct: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        (100.0 * correct as f64 / total as f64).round() as u32
    }
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one answered challenge
    pub fn record(&mut self, string: StringId, pitch: PitchClass, correct: bool) {
        self.total += 1;
        let tally = &mut self.per_string[string.slot()];
        tally.total += 1;

        if correct {
            self.correct += 1;
            tally.correct += 1;
        } else {
            *self.misses.entry((string, pitch)).or_insert(0) += 1;
        }
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Overall accuracy as a rounded percentage
    pub fn accuracy(&self) -> u32 {
        percent(self.correct, self.total)
    }

    pub fn string_tally(&self, string: StringId) -> StringTally {
        self.per_string[string.slot()]
    }

    /// Accuracy on one string, `None` if it was never asked
    pub fn string_accuracy(&self, string: StringId) -> Option<u32> {
        let tally = self.string_tally(string);
        (tally.total > 0).then(|| percent(tally.correct, tally.total))
    }

    /// Attempted strings under 80% accuracy, low string first
    pub fn weak_strings(&self) -> Vec<StringId> {
        StringId::ALL
            .into_iter()
            .filter(|&s| {
                self.string_accuracy(s)
                    .is_some_and(|acc| acc < WEAK_STRING_ACCURACY)
            })
            .collect()
    }

    /// Notes missed 3+ times, most missed first
    pub fn problem_notes(&self) -> Vec<((StringId, PitchClass), u32)> {
        let mut notes: Vec<_> = self
            .misses
            .iter()
            .filter(|(_, count)| **count >= MISS_THRESHOLD)
            .map(|(&key, &count)| (key, count))
            .collect();
        notes.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        notes
    }

    /// One-line verdict for the end-of-session summary
    pub fn feedback(&self) -> &'static str {
        match self.accuracy() {
            acc if acc >= 90 => "Excellent work!",
            acc if acc >= 75 => "Great job!",
            acc if acc >= 60 => "Good effort!",
            _ => "Keep practicing!",
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
