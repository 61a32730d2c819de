//! Session state tracking
//!
//! Maintains:
//! - Game phase (idle, playing, ended) and its timestamps
//! - Selected strings and difficulty
//! - Cumulative score
//! - The current challenge and the pending-advance guard

use super::challenge::Challenge;
use super::difficulty::Difficulty;
use super::score::Score;
use crate::fretboard::StringId;
use std::time::Instant;

/// Phase of the drill
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    /// No challenge generated yet
    Idle,
    Playing,
    /// Frozen until a new game is started
    Ended,
}

/// Complete session state
#[derive(Clone, Debug)]
pub struct Session {
    pub game_state: GameState,
    /// Set on the first challenge of a game
    pub start_time: Option<Instant>,
    /// Set when the game is ended
    pub end_time: Option<Instant>,
    /// Kept sorted low string first (6 down to 1)
    pub selected_strings: Vec<StringId>,
    pub difficulty: Difficulty,
    pub score: Score,
    pub audio_enabled: bool,
    /// A deferred "next challenge" is armed; responses are refused until it fires
    pub advance_pending: bool,
    pub challenge: Option<Challenge>,
}

/// Read-only view for the presentation layer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub game_state: GameState,
    pub selected_strings: Vec<StringId>,
    pub difficulty: Difficulty,
    pub correct: u32,
    pub total: u32,
    pub accuracy: u32,
    pub audio_enabled: bool,
    pub advance_pending: bool,
}

impl Session {
    pub fn new(difficulty: Difficulty, strings: &[StringId], audio_enabled: bool) -> Self {
        let mut session = Session {
            game_state: GameState::Idle,
            start_time: None,
            end_time: None,
            selected_strings: Vec::new(),
            difficulty,
            score: Score::new(),
            audio_enabled,
            advance_pending: false,
            challenge: None,
        };
        session.set_strings(strings);
        session
    }

    /// Replace the selection, dropping duplicates
    pub fn set_strings(&mut self, strings: &[StringId]) {
        self.selected_strings = strings.to_vec();
        self.selected_strings.sort_by(|a, b| b.cmp(a));
        self.selected_strings.dedup();
    }

    pub fn is_selected(&self, string: StringId) -> bool {
        self.selected_strings.contains(&string)
    }

    /// Flip one string in or out of the selection
    pub fn toggle_string(&mut self, string: StringId) {
        if self.is_selected(string) {
            self.selected_strings.retain(|&s| s != string);
        } else {
            self.selected_strings.push(string);
            self.selected_strings.sort_by(|a, b| b.cmp(a));
        }
    }

    /// Whole seconds from first challenge to end; only once ended
    pub fn duration_secs(&self) -> Option<u64> {
        if self.game_state != GameState::Ended {
            return None;
        }
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end.duration_since(start).as_secs_f64().round() as u64),
            _ => Some(0),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            game_state: self.game_state,
            selected_strings: self.selected_strings.clone(),
            difficulty: self.difficulty,
            correct: self.score.correct(),
            total: self.score.total(),
            accuracy: self.score.accuracy(),
            audio_enabled: self.audio_enabled,
            advance_pending: self.advance_pending,
        }
    }
}
