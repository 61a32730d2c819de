//! Cancelable one-shot timers owned by the session controller
//!
//! Timers live in an arena of slots. A `TimerHandle` names a slot plus the
//! generation it was armed with, so a handle kept past cancellation can never
//! fire, nor cancel whatever timer later reuses the slot.

use std::time::Instant;

/// What a timer does when it fires
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// One-second countdown step
    CountdownTick,
    /// Deferred generation of the next challenge
    Advance,
    /// Delayed playback of the new challenge's note
    NoteCue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerHandle {
    slot: usize,
    generation: u64,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    kind: TimerKind,
    deadline: Instant,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct Timers {
    slots: Vec<Option<Entry>>,
    next_generation: u64,
}

/// A timer that came due
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fired {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    pub deadline: Instant,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot timer due at `deadline`
    pub fn arm(&mut self, kind: TimerKind, deadline: Instant) -> TimerHandle {
        self.next_generation += 1;
        let entry = Entry {
            kind,
            deadline,
            generation: self.next_generation,
        };

        let slot = match self.slots.iter().position(Option::is_none) {
            Some(free) => {
                self.slots[free] = Some(entry);
                free
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };

        TimerHandle {
            slot,
            generation: entry.generation,
        }
    }

    /// Returns false if the timer already fired or was cancelled
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.slots.get_mut(handle.slot) {
            Some(slot) if slot.is_some_and(|e| e.generation == handle.generation) => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel_all(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    #[cfg(test)]
    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.slots
            .get(handle.slot)
            .copied()
            .flatten()
            .is_some_and(|e| e.generation == handle.generation)
    }

    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Earliest deadline among armed timers
    #[cfg(test)]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slots.iter().flatten().map(|e| e.deadline).min()
    }

    /// Disarm and return the earliest timer due at or before `now`
    ///
    /// Ties go to the timer armed first.
    pub fn pop_due(&mut self, now: Instant) -> Option<Fired> {
        let (slot, entry) = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|e| (i, e)))
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.generation))?;

        self.slots[slot] = None;
        Some(Fired {
            handle: TimerHandle {
                slot,
                generation: entry.generation,
            },
            kind: entry.kind,
            deadline: entry.deadline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_pop_due_in_deadline_order() {
        let t0 = Instant::now();
        let mut timers = Timers::new();
        timers.arm(TimerKind::Advance, t0 + Duration::from_millis(1500));
        timers.arm(TimerKind::CountdownTick, t0 + Duration::from_secs(1));

        assert!(timers.pop_due(t0).is_none());

        let now = t0 + Duration::from_secs(2);
        assert_eq!(timers.pop_due(now).map(|f| f.kind), Some(TimerKind::CountdownTick));
        assert_eq!(timers.pop_due(now).map(|f| f.kind), Some(TimerKind::Advance));
        assert!(timers.pop_due(now).is_none());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let t0 = Instant::now();
        let mut timers = Timers::new();
        let handle = timers.arm(TimerKind::Advance, t0);
        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert!(timers.pop_due(t0 + Duration::from_secs(10)).is_none());
    }

    #[test]
    fn test_stale_handle_does_not_cancel_reused_slot() {
        let t0 = Instant::now();
        let mut timers = Timers::new();
        let old = timers.arm(TimerKind::CountdownTick, t0);
        timers.cancel(old);
        let new = timers.arm(TimerKind::NoteCue, t0);

        assert!(!timers.cancel(old));
        assert!(timers.is_armed(new));
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn test_cancel_all() {
        let t0 = Instant::now();
        let mut timers = Timers::new();
        timers.arm(TimerKind::CountdownTick, t0);
        timers.arm(TimerKind::Advance, t0);
        timers.cancel_all();
        assert_eq!(timers.pending(), 0);
        assert!(timers.next_deadline().is_none());
    }
}
