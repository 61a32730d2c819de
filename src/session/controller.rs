//! Session controller: the drill's state machine
//!
//! Owns the session, its timers, the random source and the tone player.
//! Every action takes effect immediately; timed work (countdown steps, the
//! pause before the next challenge, the note cue) is armed in `Timers` and
//! runs from `tick`. Actions that reset or end the game cancel all timers
//! before touching state, so nothing stale fires into a fresh session.

use super::challenge::{pick_target, Challenge};
use super::difficulty::Difficulty;
use super::errors::InvalidOperation;
use super::state::{GameState, Session, SessionSnapshot};
use super::timers::{Fired, TimerHandle, TimerKind, Timers};
use crate::audio::TonePlayer;
use crate::fretboard::{PitchClass, StringId};
use rand::rngs::StdRng;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Pause on the result before the next challenge appears
pub const ADVANCE_DELAY: Duration = Duration::from_millis(1500);

/// Delay between showing a challenge and sounding its note
pub const NOTE_CUE_DELAY: Duration = Duration::from_millis(150);

const TICK: Duration = Duration::from_secs(1);

pub struct Controller {
    session: Session,
    timers: Timers,
    countdown: Option<TimerHandle>,
    advance: Option<TimerHandle>,
    cue: Option<TimerHandle>,
    rng: StdRng,
    player: Box<dyn TonePlayer>,
}

fn disarm(timers: &mut Timers, handle: &mut Option<TimerHandle>) {
    if let Some(h) = handle.take() {
        timers.cancel(h);
    }
}

impl Controller {
    pub fn new(session: Session, player: Box<dyn TonePlayer>, rng: StdRng) -> Self {
        let mut controller = Controller {
            session,
            timers: Timers::new(),
            countdown: None,
            advance: None,
            cue: None,
            rng,
            player,
        };
        if controller.session.audio_enabled {
            controller.init_audio();
        }
        controller
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub fn challenge(&self) -> Option<Challenge> {
        self.session.challenge
    }

    pub fn game_state(&self) -> GameState {
        self.session.game_state
    }

    pub fn accuracy(&self) -> u32 {
        self.session.score.accuracy()
    }

    pub fn duration_secs(&self) -> Option<u64> {
        self.session.duration_secs()
    }

    /// Number of armed timers
    #[cfg(test)]
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    // Configuration

    /// Takes effect from the next challenge on
    pub fn toggle_string(&mut self, string: StringId) {
        self.session.toggle_string(string);
        debug!("strings now {:?}", self.selected_numbers());
    }

    pub fn select_all_strings(&mut self) {
        self.session.set_strings(&StringId::ALL);
        debug!("all strings selected");
    }

    /// Takes effect from the next challenge on; a running clock keeps its limit
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.session.difficulty = difficulty;
        debug!("difficulty set to {}", difficulty);
    }

    pub fn set_audio_enabled(&mut self, enabled: bool) {
        self.session.audio_enabled = enabled;
        if enabled {
            self.init_audio();
        } else {
            disarm(&mut self.timers, &mut self.cue);
        }
        debug!("audio {}", if enabled { "on" } else { "off" });
    }

    pub fn reset_score(&mut self) {
        self.session.score.reset();
        info!("score reset");
    }

    // Challenge flow

    /// Install a fresh challenge, starting the game if it is idle
    pub fn generate_challenge(&mut self, now: Instant) -> Result<Challenge, InvalidOperation> {
        if self.session.game_state == GameState::Ended {
            return Err(InvalidOperation::SessionEnded);
        }
        if self.session.selected_strings.is_empty() {
            return Err(InvalidOperation::NoStringsSelected);
        }

        self.cancel_challenge_timers();
        self.session.advance_pending = false;

        if self.session.game_state == GameState::Idle {
            self.session.game_state = GameState::Playing;
            self.session.start_time = Some(now);
            info!("game started");
        }

        let difficulty = self.session.difficulty;
        let (pitch, position) = pick_target(
            &mut self.rng,
            &self.session.selected_strings,
            difficulty.max_fret(),
        )
        .ok_or(InvalidOperation::NoStringsSelected)?;

        let challenge = Challenge::new(pitch, position, difficulty.time_limit_secs());
        self.session.challenge = Some(challenge);
        self.countdown = Some(self.timers.arm(TimerKind::CountdownTick, now + TICK));
        if self.session.audio_enabled {
            self.cue = Some(self.timers.arm(TimerKind::NoteCue, now + NOTE_CUE_DELAY));
        }

        debug!(
            "challenge: {} on string {} (fret {}), {}s",
            pitch,
            position.string.number(),
            position.fret,
            challenge.time_limit
        );
        Ok(challenge)
    }

    /// Stop the clock and show where the note is
    pub fn reveal_answer(&mut self) -> Result<(), InvalidOperation> {
        let challenge = self
            .session
            .challenge
            .as_mut()
            .filter(|c| c.active)
            .ok_or(InvalidOperation::NoActiveChallenge)?;

        challenge.active = false;
        challenge.answer_shown = true;
        challenge.awaiting_response = true;
        disarm(&mut self.timers, &mut self.countdown);
        debug!("answer revealed with {}s left", challenge.countdown);
        Ok(())
    }

    pub fn mark_correct(&mut self, now: Instant) -> Result<(), InvalidOperation> {
        self.record_response(now, true)
    }

    pub fn mark_incorrect(&mut self, now: Instant) -> Result<(), InvalidOperation> {
        self.record_response(now, false)
    }

    fn record_response(&mut self, now: Instant, correct: bool) -> Result<(), InvalidOperation> {
        if self.session.advance_pending {
            return Err(InvalidOperation::AdvancePending);
        }
        let challenge = self
            .session
            .challenge
            .as_mut()
            .filter(|c| c.awaiting_response)
            .ok_or(InvalidOperation::NoResponseAwaited)?;

        challenge.active = false;
        challenge.awaiting_response = false;
        let (string, pitch) = (challenge.string, challenge.pitch);

        self.session.score.record(string, pitch, correct);
        disarm(&mut self.timers, &mut self.countdown);
        self.session.advance_pending = true;
        self.advance = Some(self.timers.arm(TimerKind::Advance, now + ADVANCE_DELAY));

        debug!(
            "{} {} on string {}: {}/{}",
            if correct { "got" } else { "missed" },
            pitch,
            string.number(),
            self.session.score.correct(),
            self.session.score.total()
        );
        Ok(())
    }

    /// Sound the current challenge's note again right away
    pub fn replay_current_note(&mut self) -> Result<(), InvalidOperation> {
        let challenge = self.session.challenge.ok_or(InvalidOperation::NoChallenge)?;
        if self.session.audio_enabled {
            self.play(challenge.pitch, challenge.octave());
        }
        Ok(())
    }

    // Game lifecycle

    pub fn end_session(&mut self, now: Instant) -> Result<(), InvalidOperation> {
        if self.session.game_state != GameState::Playing {
            return Err(InvalidOperation::NotPlaying);
        }

        self.cancel_all_timers();
        self.session.game_state = GameState::Ended;
        self.session.end_time = Some(now);
        self.session.advance_pending = false;
        if let Some(challenge) = self.session.challenge.as_mut() {
            challenge.active = false;
            challenge.awaiting_response = false;
        }

        info!(
            "game ended: {}/{} ({}%)",
            self.session.score.correct(),
            self.session.score.total(),
            self.session.score.accuracy()
        );
        Ok(())
    }

    /// Back to idle with a clean score; only from an ended game
    pub fn start_new_session(&mut self) -> Result<(), InvalidOperation> {
        if self.session.game_state != GameState::Ended {
            return Err(InvalidOperation::NotEnded);
        }

        self.cancel_all_timers();
        self.session.game_state = GameState::Idle;
        self.session.score.reset();
        self.session.challenge = None;
        self.session.start_time = None;
        self.session.end_time = None;
        self.session.advance_pending = false;

        info!("new game ready");
        Ok(())
    }

    // Timers

    /// Fire every timer due by `now`, earliest first; returns how many fired
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        while let Some(timer) = self.timers.pop_due(now) {
            fired += 1;
            match timer.kind {
                TimerKind::CountdownTick => self.on_countdown_tick(timer),
                TimerKind::Advance => self.on_advance(timer),
                TimerKind::NoteCue => self.on_note_cue(timer),
            }
        }
        if fired > 0 {
            debug!("{} timer(s) fired, {} still armed", fired, self.timers.pending());
        }
        fired
    }

    fn on_countdown_tick(&mut self, timer: Fired) {
        if self.countdown != Some(timer.handle) {
            return;
        }
        self.countdown = None;

        let Some(challenge) = self.session.challenge.as_mut() else {
            return;
        };
        if !challenge.active {
            return;
        }

        challenge.countdown = challenge.countdown.saturating_sub(1);
        if challenge.countdown == 0 {
            challenge.active = false;
            challenge.answer_shown = true;
            challenge.awaiting_response = true;
            debug!("time up for {}", challenge.pitch);
        } else {
            // Next step is relative to this one, so a late tick catches up
            self.countdown = Some(
                self.timers
                    .arm(TimerKind::CountdownTick, timer.deadline + TICK),
            );
        }
    }

    fn on_advance(&mut self, timer: Fired) {
        if self.advance != Some(timer.handle) {
            return;
        }
        self.advance = None;
        self.session.advance_pending = false;

        if self.session.game_state != GameState::Playing {
            return;
        }
        if let Err(e) = self.generate_challenge(timer.deadline) {
            warn!("could not advance to the next challenge: {}", e);
        }
    }

    fn on_note_cue(&mut self, timer: Fired) {
        if self.cue != Some(timer.handle) {
            return;
        }
        self.cue = None;

        if !self.session.audio_enabled {
            return;
        }
        if let Some(challenge) = self.session.challenge {
            self.play(challenge.pitch, challenge.octave());
        }
    }

    fn cancel_challenge_timers(&mut self) {
        disarm(&mut self.timers, &mut self.countdown);
        disarm(&mut self.timers, &mut self.advance);
        disarm(&mut self.timers, &mut self.cue);
    }

    fn cancel_all_timers(&mut self) {
        self.timers.cancel_all();
        self.countdown = None;
        self.advance = None;
        self.cue = None;
    }

    // Audio

    fn init_audio(&mut self) {
        if let Err(e) = self.player.init() {
            warn!("{}; continuing without sound", e);
        }
    }

    fn play(&mut self, pitch: PitchClass, octave: i32) {
        if let Err(e) = self.player.play(pitch, octave) {
            warn!("could not play {}{}: {}", pitch, octave, e);
        }
    }

    fn selected_numbers(&self) -> Vec<u8> {
        self.session
            .selected_strings
            .iter()
            .map(|s| s.number())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::RecordingPlayer;
    use crate::fretboard::{octave_for, pitch_at};
    use rand::SeedableRng;

    fn s(n: u8) -> StringId {
        StringId::new(n).unwrap()
    }

    fn strings(numbers: &[u8]) -> Vec<StringId> {
        numbers.iter().map(|&n| s(n)).collect()
    }

    fn controller_with(
        numbers: &[u8],
        difficulty: Difficulty,
        audio: bool,
        player: RecordingPlayer,
    ) -> Controller {
        let session = Session::new(difficulty, &strings(numbers), audio);
        Controller::new(session, Box::new(player), StdRng::seed_from_u64(42))
    }

    fn controller(numbers: &[u8], difficulty: Difficulty) -> Controller {
        controller_with(numbers, difficulty, false, RecordingPlayer::default())
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_generate_without_strings_is_rejected() {
        let mut c = controller(&[], Difficulty::Beginner);
        assert_eq!(
            c.generate_challenge(Instant::now()),
            Err(InvalidOperation::NoStringsSelected)
        );
        assert_eq!(c.game_state(), GameState::Idle);
        assert!(c.challenge().is_none());
    }

    #[test]
    fn test_first_challenge_starts_game() {
        let t0 = Instant::now();
        let mut c = controller(&[6, 5, 4, 3, 2, 1], Difficulty::Beginner);
        let challenge = c.generate_challenge(t0).unwrap();

        assert_eq!(c.game_state(), GameState::Playing);
        assert_eq!(c.session().start_time, Some(t0));
        assert!(challenge.active);
        assert!(!challenge.answer_shown);
        assert!(!challenge.awaiting_response);
        assert_eq!(challenge.countdown, 8);
    }

    #[test]
    fn test_generated_challenges_are_valid() {
        let t0 = Instant::now();
        let selections: [&[u8]; 4] = [&[6], &[1, 3], &[2, 4, 5], &[6, 5, 4, 3, 2, 1]];
        for difficulty in Difficulty::ALL {
            for selection in selections {
                let mut c = controller(selection, difficulty);
                for _ in 0..200 {
                    let ch = c.generate_challenge(t0).unwrap();
                    assert!(selection.contains(&ch.string.number()));
                    assert!(ch.fret <= difficulty.max_fret());
                    assert_eq!(pitch_at(ch.string, ch.fret), ch.pitch);
                    assert_eq!(ch.countdown, difficulty.time_limit_secs());
                }
            }
        }
    }

    #[test]
    fn test_countdown_runs_out() {
        let t0 = Instant::now();
        let mut c = controller(&[6], Difficulty::Beginner);
        c.generate_challenge(t0).unwrap();

        c.tick(t0 + ms(999));
        assert_eq!(c.challenge().unwrap().countdown, 8);

        c.tick(t0 + secs(7));
        let ch = c.challenge().unwrap();
        assert_eq!(ch.countdown, 1);
        assert!(ch.active);
        assert!(!ch.awaiting_response);

        c.tick(t0 + secs(8));
        let ch = c.challenge().unwrap();
        assert_eq!(ch.countdown, 0);
        assert!(!ch.active);
        assert!(ch.answer_shown);
        assert!(ch.awaiting_response);
        assert_eq!(c.pending_timers(), 0);

        // Nothing left to fire
        assert_eq!(c.tick(t0 + secs(30)), 0);
        assert_eq!(c.challenge().unwrap().countdown, 0);
    }

    #[test]
    fn test_difficulty_change_does_not_rescale_running_clock() {
        let t0 = Instant::now();
        let mut c = controller(&[6, 5], Difficulty::Beginner);
        c.generate_challenge(t0).unwrap();
        c.set_difficulty(Difficulty::Expert);

        c.tick(t0 + secs(3));
        let ch = c.challenge().unwrap();
        assert_eq!(ch.countdown, 5);
        assert!(ch.active);
        assert_eq!(ch.time_limit, 8);

        let next = c.generate_challenge(t0 + secs(4)).unwrap();
        assert_eq!(next.countdown, 3);
        assert!(next.fret <= 22);
    }

    #[test]
    fn test_reveal_answer_stops_clock() {
        let t0 = Instant::now();
        let mut c = controller(&[4], Difficulty::Intermediate);
        c.generate_challenge(t0).unwrap();
        c.tick(t0 + secs(2));
        c.reveal_answer().unwrap();

        let ch = c.challenge().unwrap();
        assert!(!ch.active);
        assert!(ch.answer_shown);
        assert!(ch.awaiting_response);
        assert_eq!(ch.countdown, 4);

        c.tick(t0 + secs(10));
        assert_eq!(c.challenge().unwrap().countdown, 4);
        assert_eq!(c.reveal_answer(), Err(InvalidOperation::NoActiveChallenge));
    }

    #[test]
    fn test_mark_requires_awaited_response() {
        let t0 = Instant::now();
        let mut c = controller(&[3], Difficulty::Beginner);
        assert_eq!(c.mark_correct(t0), Err(InvalidOperation::NoResponseAwaited));

        c.generate_challenge(t0).unwrap();
        assert_eq!(c.mark_incorrect(t0), Err(InvalidOperation::NoResponseAwaited));
        assert_eq!(c.snapshot().total, 0);
    }

    #[test]
    fn test_double_mark_counts_once() {
        let t0 = Instant::now();
        let mut c = controller(&[6, 1], Difficulty::Beginner);
        c.generate_challenge(t0).unwrap();
        c.reveal_answer().unwrap();

        assert!(c.mark_correct(t0).is_ok());
        assert_eq!(c.mark_correct(t0), Err(InvalidOperation::AdvancePending));
        assert_eq!(c.mark_incorrect(t0), Err(InvalidOperation::AdvancePending));

        let snap = c.snapshot();
        assert_eq!((snap.correct, snap.total), (1, 1));
        assert!(snap.advance_pending);
    }

    #[test]
    fn test_advance_after_delay() {
        let t0 = Instant::now();
        let mut c = controller(&[5], Difficulty::Advanced);
        c.generate_challenge(t0).unwrap();
        c.tick(t0 + secs(4));
        assert!(c.challenge().unwrap().awaiting_response);

        let marked = t0 + secs(5);
        c.mark_incorrect(marked).unwrap();
        assert!(!c.challenge().unwrap().active);

        c.tick(marked + ms(1499));
        assert!(c.snapshot().advance_pending);
        assert!(!c.challenge().unwrap().active);

        c.tick(marked + ADVANCE_DELAY);
        let next = c.challenge().unwrap();
        assert!(next.active);
        assert_eq!(next.countdown, 4);
        assert!(!c.snapshot().advance_pending);

        let snap = c.snapshot();
        assert_eq!((snap.correct, snap.total, snap.accuracy), (0, 1, 0));
    }

    #[test]
    fn test_manual_next_cancels_pending_advance() {
        let t0 = Instant::now();
        let mut c = controller(&[2], Difficulty::Beginner);
        c.generate_challenge(t0).unwrap();
        c.reveal_answer().unwrap();
        c.mark_correct(t0).unwrap();

        let manual = c.generate_challenge(t0 + ms(200)).unwrap();
        assert!(!c.snapshot().advance_pending);

        // The cancelled advance must not replace the manual challenge
        c.tick(t0 + ms(1600));
        let current = c.challenge().unwrap();
        assert_eq!((current.pitch, current.fret), (manual.pitch, manual.fret));
        assert_eq!(current.countdown, 7);
    }

    #[test]
    fn test_toggle_string_does_not_interrupt() {
        let t0 = Instant::now();
        let mut c = controller(&[6], Difficulty::Beginner);
        let first = c.generate_challenge(t0).unwrap();
        c.toggle_string(s(6));

        c.tick(t0 + secs(1));
        let ch = c.challenge().unwrap();
        assert_eq!(ch.string, first.string);
        assert_eq!(ch.countdown, 7);
        assert_eq!(
            c.generate_challenge(t0 + secs(2)),
            Err(InvalidOperation::NoStringsSelected)
        );

        c.select_all_strings();
        assert_eq!(c.snapshot().selected_strings, StringId::ALL.to_vec());
    }

    #[test]
    fn test_end_session_cancels_timers() {
        let t0 = Instant::now();
        let mut c = controller(&[6, 5, 4], Difficulty::Beginner);
        c.generate_challenge(t0).unwrap();
        c.reveal_answer().unwrap();
        c.mark_correct(t0 + secs(1)).unwrap();
        c.end_session(t0 + secs(2)).unwrap();

        assert_eq!(c.pending_timers(), 0);
        assert_eq!(c.tick(t0 + secs(60)), 0);
        assert_eq!(c.game_state(), GameState::Ended);
        assert!(!c.snapshot().advance_pending);
        let ch = c.challenge().unwrap();
        assert!(!ch.active);
        assert!(!ch.awaiting_response);
        assert_eq!(c.snapshot().total, 1);
        assert_eq!(c.duration_secs(), Some(2));
    }

    #[test]
    fn test_end_session_mid_countdown() {
        let t0 = Instant::now();
        let mut c = controller(&[1], Difficulty::Expert);
        c.generate_challenge(t0).unwrap();
        c.tick(t0 + ms(1400));
        c.end_session(t0 + ms(1400)).unwrap();

        c.tick(t0 + secs(5));
        let ch = c.challenge().unwrap();
        assert_eq!(ch.countdown, 2);
        assert!(!ch.awaiting_response);
        assert_eq!(c.duration_secs(), Some(1));
    }

    #[test]
    fn test_lifecycle_guards() {
        let t0 = Instant::now();
        let mut c = controller(&[6], Difficulty::Beginner);
        assert_eq!(c.end_session(t0), Err(InvalidOperation::NotPlaying));
        assert_eq!(c.start_new_session(), Err(InvalidOperation::NotEnded));
        assert_eq!(c.duration_secs(), None);

        c.generate_challenge(t0).unwrap();
        assert_eq!(c.start_new_session(), Err(InvalidOperation::NotEnded));
        c.end_session(t0 + secs(3)).unwrap();
        assert_eq!(
            c.generate_challenge(t0 + secs(4)),
            Err(InvalidOperation::SessionEnded)
        );
        assert_eq!(c.end_session(t0 + secs(4)), Err(InvalidOperation::NotPlaying));
    }

    #[test]
    fn test_new_session_after_end_resets() {
        let t0 = Instant::now();
        let mut c = controller(&[6, 5], Difficulty::Beginner);
        c.generate_challenge(t0).unwrap();
        c.tick(t0 + secs(8));
        c.mark_correct(t0 + secs(8)).unwrap();
        c.end_session(t0 + secs(9)).unwrap();
        c.start_new_session().unwrap();

        let snap = c.snapshot();
        assert_eq!(snap.game_state, GameState::Idle);
        assert_eq!((snap.correct, snap.total), (0, 0));
        assert!(c.challenge().is_none());
        assert!(c.session().start_time.is_none());
        assert!(c.session().end_time.is_none());
        assert_eq!(c.pending_timers(), 0);

        let later = t0 + secs(100);
        c.generate_challenge(later).unwrap();
        assert_eq!(c.session().start_time, Some(later));
    }

    #[test]
    fn test_reset_score_keeps_game_running() {
        let t0 = Instant::now();
        let mut c = controller(&[3], Difficulty::Beginner);
        c.generate_challenge(t0).unwrap();
        c.reveal_answer().unwrap();
        c.mark_correct(t0).unwrap();
        c.reset_score();

        let snap = c.snapshot();
        assert_eq!((snap.correct, snap.total), (0, 0));
        assert_eq!(snap.game_state, GameState::Playing);
        assert!(snap.advance_pending);
    }

    #[test]
    fn test_score_never_decreases_within_session() {
        let mut now = Instant::now();
        let mut c = controller(&[6, 5, 4, 3, 2, 1], Difficulty::Expert);
        c.generate_challenge(now).unwrap();
        let (mut last_correct, mut last_total) = (0, 0);

        for round in 0..60 {
            now += secs(3);
            c.tick(now);
            if round % 3 == 0 {
                c.mark_correct(now).unwrap();
            } else {
                c.mark_incorrect(now).unwrap();
            }
            now += ADVANCE_DELAY;
            c.tick(now);

            let snap = c.snapshot();
            assert!(snap.total >= snap.correct);
            assert!(snap.correct >= last_correct && snap.total >= last_total);
            last_correct = snap.correct;
            last_total = snap.total;
        }
        assert_eq!((last_correct, last_total), (20, 60));
        assert_eq!(c.accuracy(), 33);
    }

    #[test]
    fn test_note_cue_plays_after_delay() {
        let t0 = Instant::now();
        let player = RecordingPlayer::default();
        let played = player.played.clone();
        let mut c = controller_with(&[6], Difficulty::Beginner, true, player);

        let ch = c.generate_challenge(t0).unwrap();
        assert!(played.borrow().is_empty());

        c.tick(t0 + NOTE_CUE_DELAY);
        assert_eq!(
            *played.borrow(),
            vec![(ch.pitch, octave_for(ch.string, ch.fret))]
        );
        // Cue is independent of the clock
        assert_eq!(c.challenge().unwrap().countdown, 8);

        c.replay_current_note().unwrap();
        assert_eq!(played.borrow().len(), 2);
    }

    #[test]
    fn test_no_sound_when_audio_disabled() {
        let t0 = Instant::now();
        let player = RecordingPlayer::default();
        let played = player.played.clone();
        let mut c = controller_with(&[6], Difficulty::Beginner, false, player);

        c.generate_challenge(t0).unwrap();
        c.tick(t0 + secs(1));
        c.replay_current_note().unwrap();
        assert!(played.borrow().is_empty());

        c.set_audio_enabled(true);
        c.replay_current_note().unwrap();
        assert_eq!(played.borrow().len(), 1);
    }

    #[test]
    fn test_disabling_audio_cancels_cue() {
        let t0 = Instant::now();
        let player = RecordingPlayer::default();
        let played = player.played.clone();
        let mut c = controller_with(&[5], Difficulty::Beginner, true, player);

        c.generate_challenge(t0).unwrap();
        c.set_audio_enabled(false);
        c.tick(t0 + secs(1));
        assert!(played.borrow().is_empty());
    }

    #[test]
    fn test_audio_failure_does_not_affect_drill() {
        let t0 = Instant::now();
        let player = RecordingPlayer {
            fail: true,
            ..Default::default()
        };
        let inits = player.inits.clone();
        let mut c = controller_with(&[6, 1], Difficulty::Beginner, true, player);
        assert_eq!(*inits.borrow(), 1);

        c.generate_challenge(t0).unwrap();
        c.tick(t0 + secs(8));
        assert!(c.challenge().unwrap().awaiting_response);
        assert!(c.replay_current_note().is_ok());
        c.mark_correct(t0 + secs(8)).unwrap();
        assert_eq!(c.snapshot().correct, 1);
    }

    #[test]
    fn test_replay_without_challenge() {
        let mut c = controller(&[6], Difficulty::Beginner);
        assert_eq!(c.replay_current_note(), Err(InvalidOperation::NoChallenge));
    }

    #[test]
    fn test_low_e_alone_at_beginner() {
        let t0 = Instant::now();
        let mut c = controller(&[6], Difficulty::Beginner);
        let mut saw_a = false;
        for i in 0..100 {
            let ch = c.generate_challenge(t0 + secs(i)).unwrap();
            if ch.pitch == PitchClass::A {
                saw_a = true;
                assert_eq!(ch.string, s(6));
                assert_eq!(ch.fret, 5);
            }
            assert!(matches!(
                ch.pitch,
                PitchClass::E
                    | PitchClass::F
                    | PitchClass::FSharp
                    | PitchClass::G
                    | PitchClass::GSharp
                    | PitchClass::A
            ));
        }
        assert!(saw_a);
    }
}
