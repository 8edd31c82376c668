//! Fortune message selection and the cooldown that limits how often it changes.

use chrono::{DateTime, Local};
use rand::Rng;
use std::time::Duration;

use crate::constants::FORTUNE_MESSAGES;

/// Source of uniformly distributed indices.
pub trait RandomSource {
    /// Return an index in `0..len`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;
}

/// Thread-local RNG backed source.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Draw one message from the fixed pool.
///
/// Out-of-range indices from a misbehaving source wrap instead of panicking.
pub fn pick_message(random: &mut dyn RandomSource) -> &'static str {
    let index = random.next_index(FORTUNE_MESSAGES.len()) % FORTUNE_MESSAGES.len();
    FORTUNE_MESSAGES[index]
}

/// Remembers when a message was last drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MessageCooldown {
    window: Duration,
    last_shown_at: Option<DateTime<Local>>,
}

impl MessageCooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_shown_at: None,
        }
    }

    /// True when nothing was drawn yet or the last draw is at least one
    /// window old. A clock that went backwards counts as still cooling down.
    pub fn is_ready(&self, now: DateTime<Local>) -> bool {
        match self.last_shown_at {
            None => true,
            Some(last) => (now - last)
                .to_std()
                .map(|elapsed| elapsed >= self.window)
                .unwrap_or(false),
        }
    }

    pub fn mark_shown(&mut self, now: DateTime<Local>) {
        self.last_shown_at = Some(now);
    }

    /// Time left until the next draw is allowed.
    pub fn remaining(&self, now: DateTime<Local>) -> Duration {
        match self.last_shown_at {
            None => Duration::ZERO,
            Some(last) => {
                let elapsed = (now - last).to_std().unwrap_or(Duration::ZERO);
                self.window.saturating_sub(elapsed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Fixed(usize);

    impl RandomSource for Fixed {
        fn next_index(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    fn at(secs: i64) -> DateTime<Local> {
        Local
            .timestamp_opt(1_700_000_000 + secs, 0)
            .single()
            .unwrap()
    }

    #[test]
    fn test_pick_message_uses_index() {
        assert_eq!(pick_message(&mut Fixed(0)), FORTUNE_MESSAGES[0]);
        assert_eq!(pick_message(&mut Fixed(9)), FORTUNE_MESSAGES[9]);
        assert_eq!(pick_message(&mut Fixed(12)), FORTUNE_MESSAGES[2]);
    }

    #[test]
    fn test_thread_random_stays_in_range() {
        let mut random = ThreadRandom;
        for _ in 0..200 {
            assert!(random.next_index(FORTUNE_MESSAGES.len()) < FORTUNE_MESSAGES.len());
        }
    }

    #[test]
    fn test_cooldown_window() {
        let mut cooldown = MessageCooldown::new(Duration::from_secs(60));
        assert!(cooldown.is_ready(at(0)));

        cooldown.mark_shown(at(0));
        assert!(!cooldown.is_ready(at(30)));
        assert!(!cooldown.is_ready(at(59)));
        assert!(cooldown.is_ready(at(60)));
        assert_eq!(cooldown.remaining(at(45)), Duration::from_secs(15));
        assert_eq!(cooldown.remaining(at(90)), Duration::ZERO);
    }

    #[test]
    fn test_clock_going_backwards_keeps_cooldown() {
        let mut cooldown = MessageCooldown::new(Duration::from_secs(60));
        cooldown.mark_shown(at(100));
        assert!(!cooldown.is_ready(at(10)));
    }
}
