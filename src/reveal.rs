//! Spring-driven entrance animation for the fortune modal.
//!
//! The modal content grows and fades in following a damped spring from 0 to
//! 1. The spring is described by a friction/tension pair and converted to
//! physical stiffness and damping with the usual Origami mapping, so the
//! default pair (friction 5, tension 50) gives a visibly bouncy entrance.

use std::time::Duration;

use crate::constants::{
    REVEAL_FRICTION, REVEAL_MAX_STEP_MS, REVEAL_REST_THRESHOLD, REVEAL_TENSION,
};
use crate::utils::interpolate_f32;

/// Damped spring with unit mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringAnimation {
    value: f32,
    velocity: f32,
    from: f32,
    target: f32,
    stiffness: f32,
    damping: f32,
    settled: bool,
}

impl SpringAnimation {
    /// Build a spring from Origami friction/tension values.
    pub fn from_friction_tension(friction: f32, tension: f32, from: f32, target: f32) -> Self {
        let stiffness = (tension - 30.0) * 3.62 + 194.0;
        let damping = (friction - 8.0) * 3.0 + 25.0;
        Self {
            value: from,
            velocity: 0.0,
            from,
            target,
            stiffness,
            damping,
            settled: from == target,
        }
    }

    /// The modal entrance: 0 to 1 with the configured friction and tension.
    pub fn reveal() -> Self {
        Self::from_friction_tension(REVEAL_FRICTION, REVEAL_TENSION, 0.0, 1.0)
    }

    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Raw spring position; may overshoot the target.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Opacity for the current frame, clamped to [0, 1].
    pub fn opacity(&self) -> f32 {
        interpolate_f32(0.0, 1.0, self.progress())
    }

    /// Scale factor for the current frame, overshoot included.
    pub fn scale(&self) -> f32 {
        self.value.max(0.0)
    }

    fn progress(&self) -> f32 {
        let span = self.target - self.from;
        if span == 0.0 {
            1.0
        } else {
            (self.value - self.from) / span
        }
    }

    /// Integrate the spring forward by `elapsed`.
    pub fn step(&mut self, elapsed: Duration) {
        if self.settled {
            return;
        }

        let max_step = Duration::from_millis(REVEAL_MAX_STEP_MS);
        let mut remaining = elapsed;
        while !remaining.is_zero() {
            let dt = remaining.min(max_step);
            remaining -= dt;

            // semi-implicit Euler: velocity first, then position
            let force = -self.stiffness * (self.value - self.target) - self.damping * self.velocity;
            self.velocity += force * dt.as_secs_f32();
            self.value += self.velocity * dt.as_secs_f32();

            if self.velocity.abs() < REVEAL_REST_THRESHOLD
                && (self.value - self.target).abs() < REVEAL_REST_THRESHOLD
            {
                self.value = self.target;
                self.velocity = 0.0;
                self.settled = true;
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origami_conversion() {
        let spring = SpringAnimation::reveal();
        assert!((spring.stiffness() - 266.4).abs() < 0.001);
        assert!((spring.damping() - 16.0).abs() < 0.001);
    }

    #[test]
    fn test_starts_hidden() {
        let spring = SpringAnimation::reveal();
        assert_eq!(spring.value(), 0.0);
        assert_eq!(spring.opacity(), 0.0);
        assert!(!spring.is_settled());
    }

    #[test]
    fn test_overshoots_then_settles() {
        let mut spring = SpringAnimation::reveal();
        let mut peak: f32 = 0.0;
        for _ in 0..300 {
            spring.step(Duration::from_millis(16));
            peak = peak.max(spring.value());
        }
        assert!(peak > 1.0, "underdamped spring should overshoot, peak {}", peak);
        assert!(spring.is_settled());
        assert_eq!(spring.value(), 1.0);
        assert_eq!(spring.opacity(), 1.0);
    }

    #[test]
    fn test_opacity_is_clamped() {
        let mut spring = SpringAnimation::reveal();
        for _ in 0..20 {
            spring.step(Duration::from_millis(16));
            assert!((0.0..=1.0).contains(&spring.opacity()));
        }
    }

    #[test]
    fn test_settled_spring_ignores_steps() {
        let mut spring = SpringAnimation::from_friction_tension(5.0, 50.0, 1.0, 1.0);
        assert!(spring.is_settled());
        spring.step(Duration::from_secs(1));
        assert_eq!(spring.value(), 1.0);
    }
}
