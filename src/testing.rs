//! Deterministic capabilities for tests.
//!
//! Available to unit tests and, through the `testing-support` feature, to the
//! integration tests under `tests/`. Every double is cheaply cloneable and
//! clones share state, so a test keeps one handle while the application owns
//! the other.

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::audio::AudioPlayer;
use crate::fortune::RandomSource;
use crate::scheduler::Clock;

/// Wall clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Local>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Clock starting at a fixed instant (2023-11-14 22:13:20 UTC).
    pub fn at_epoch() -> Self {
        let start = Local
            .timestamp_opt(1_700_000_000, 0)
            .single()
            .unwrap_or_else(Local::now);
        Self::new(start)
    }

    pub fn advance(&self, by: Duration) {
        let delta = chrono::Duration::from_std(by).unwrap_or(chrono::Duration::zero());
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        self.now.get()
    }
}

/// Replays a fixed list of indices, wrapping around.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Rc<Vec<usize>>,
    position: Rc<Cell<usize>>,
}

impl SequenceRandom {
    pub fn new(values: Vec<usize>) -> Self {
        Self {
            values: Rc::new(values),
            position: Rc::new(Cell::new(0)),
        }
    }

    /// How many indices have been drawn.
    pub fn draws(&self) -> usize {
        self.position.get()
    }
}

impl RandomSource for SequenceRandom {
    fn next_index(&mut self, len: usize) -> usize {
        let position = self.position.get();
        self.position.set(position + 1);
        if self.values.is_empty() || len == 0 {
            return 0;
        }
        self.values[position % self.values.len()] % len
    }
}

/// Counts play requests and can be told to fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    plays: Rc<Cell<usize>>,
    failure: Rc<RefCell<Option<String>>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plays(&self) -> usize {
        self.plays.get()
    }

    /// Make every following `play` return an error with this message.
    pub fn fail_with(&self, message: &str) {
        *self.failure.borrow_mut() = Some(message.to_string());
    }
}

impl AudioPlayer for RecordingAudio {
    fn play(&mut self) -> Result<()> {
        self.plays.set(self.plays.get() + 1);
        match self.failure.borrow().as_deref() {
            Some(message) => anyhow::bail!("{}", message),
            None => Ok(()),
        }
    }

    fn player_name(&self) -> &'static str {
        "recording"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shares_time() {
        let clock = ManualClock::at_epoch();
        let handle = clock.clone();
        let start = clock.now();
        handle.advance(Duration::from_secs(61));
        assert_eq!((clock.now() - start).num_seconds(), 61);
    }

    #[test]
    fn test_sequence_random_wraps() {
        let mut random = SequenceRandom::new(vec![3, 12]);
        assert_eq!(random.next_index(10), 3);
        assert_eq!(random.next_index(10), 2);
        assert_eq!(random.next_index(10), 3);
        assert_eq!(random.draws(), 3);
    }

    #[test]
    fn test_recording_audio_counts_failures_too() {
        let audio = RecordingAudio::new();
        let mut player = audio.clone();
        assert!(player.play().is_ok());
        audio.fail_with("no device");
        assert!(player.play().is_err());
        assert_eq!(audio.plays(), 2);
    }
}
