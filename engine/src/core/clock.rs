//! Discrete-event clock.
//!
//! The simulation advances in integer ticks along a single virtual
//! timeline. Every process (the decay sweep, each staff lifeline) has at
//! most one pending wake entry; the clock repeatedly hands back the
//! earliest one and the engine resumes that process.
//!
//! # Ordering
//!
//! Wake entries are ordered by `(tick, process_id)`. Process ids are
//! assigned in registration order — the decay process is id 0, staff
//! lifelines follow in creation order — so processes waking on the same
//! tick always resume in registration order. Combined with a single
//! seeded RNG consumed strictly in resume order, this makes the whole
//! run replayable.
//!
//! # Termination
//!
//! The run ends when the earliest pending wake reaches the configured
//! tick ceiling: that entry is *not* resumed, the clock pins itself to
//! the ceiling, and no cancellation signal is delivered to anything.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

/// A pending wake: process `process` wants to resume at `tick`.
///
/// Derived ordering is lexicographic on `(tick, process)`, which is
/// exactly the same-tick tie-break rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WakeEntry {
    /// Virtual time of the wake, in ticks.
    pub tick: u64,
    /// Registration-order process id (0 = decay, then lifelines).
    pub process: usize,
}

/// Min-ordered wake queue plus the current virtual time.
///
/// # Example
/// ```
/// use hai_simulator_core_rs::EventClock;
///
/// let mut clock = EventClock::new(10);
/// clock.schedule(0, 3);
/// clock.schedule(1, 3);
/// assert_eq!(clock.next_wake(), Some((3, 0))); // same tick: lower id first
/// assert_eq!(clock.next_wake(), Some((3, 1)));
/// assert_eq!(clock.next_wake(), None);
/// assert_eq!(clock.now(), 10); // pinned to the ceiling
/// ```
#[derive(Debug, Clone)]
pub struct EventClock {
    now: u64,
    ceiling: u64,
    wakes: BinaryHeap<Reverse<WakeEntry>>,
}

impl EventClock {
    /// New clock at tick 0 with the given tick ceiling.
    pub fn new(ceiling: u64) -> Self {
        Self {
            now: 0,
            ceiling,
            wakes: BinaryHeap::new(),
        }
    }

    /// Rebuild a clock from checkpointed state.
    pub fn restore(ceiling: u64, now: u64, pending: Vec<WakeEntry>) -> Self {
        Self {
            now,
            ceiling,
            wakes: pending.into_iter().map(Reverse).collect(),
        }
    }

    /// Queue a wake for `process` at `tick`.
    pub fn schedule(&mut self, process: usize, tick: u64) {
        self.wakes.push(Reverse(WakeEntry { tick, process }));
    }

    /// Pop the earliest wake and advance the clock to it.
    ///
    /// Returns `None` once the earliest pending wake is at or past the
    /// ceiling (or the queue is empty); the clock then reads the ceiling
    /// and never moves again. Entries past the ceiling stay queued —
    /// they are simply never resumed.
    pub fn next_wake(&mut self) -> Option<(u64, usize)> {
        match self.wakes.peek() {
            Some(Reverse(entry)) if entry.tick < self.ceiling => {
                let entry = *entry;
                self.wakes.pop();
                self.now = entry.tick;
                Some((entry.tick, entry.process))
            }
            _ => {
                self.now = self.ceiling;
                None
            }
        }
    }

    /// Current virtual time in ticks.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Configured tick ceiling.
    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    /// Pending wakes in resume order, for checkpointing.
    pub fn pending(&self) -> Vec<WakeEntry> {
        let mut entries: Vec<WakeEntry> = self.wakes.iter().map(|r| r.0).collect();
        entries.sort();
        entries
    }
}
