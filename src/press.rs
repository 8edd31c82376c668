//! Press-and-hold state machine behind the fingerprint icon.
//!
//! Holding the icon plays the press sound, then raises a 0-100 progress
//! counter by one on every tick. When the counter reaches 100 the fortune
//! modal opens with a spring entrance. Releasing early cancels the pending
//! tick and drops progress back to 0.
//!
//! ## States
//!
//! ```text
//! Idle ──press (form valid)──▶ Pressing ──tick × 100──▶ ModalOpen ──close──▶ Idle
//!                               │   ▲                       │
//!                               │   └──press (form valid)───┘
//!                               └──release──▶ Idle, or ModalOpen if the modal is still up
//! ```
//!
//! The fortune modal does not block the fingerprint. A press made while it is
//! still open starts a new session underneath it and may stage a new fortune.
//!
//! ## Fortune selection
//!
//! A message is drawn when a press starts, not when it completes, and only if
//! the cooldown allows it. The cooldown is checked at press start only, so a
//! message drawn on an aborted press is the one the next completed press
//! reveals, as long as the window has not run out in between.
//!
//! ## Ticks
//!
//! At most one tick task is outstanding. Every tick carries the handle it was
//! scheduled under; ticks whose handle is not the outstanding one (for
//! example one that fired after a release cancelled it) are ignored.

use std::time::Duration;

use crate::audio::AudioPlayer;
use crate::config::Config;
use crate::constants::*;
use crate::fortune::{MessageCooldown, RandomSource, pick_message};
use crate::logger::Log;
use crate::reveal::SpringAnimation;
use crate::scheduler::{Clock, Scheduler, TaskHandle};

/// Phase of the press-and-hold interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressState {
    Idle,     // Nothing held, modal closed
    Pressing, // Icon held, ticks running; the modal may still be up
    ModalOpen, // Fortune visible, nothing held
}

/// Result of delivering a tick to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale or unexpected tick; nothing changed.
    Ignored,
    /// Progress moved to the contained value and the next tick is scheduled.
    Advanced(u8),
    /// Progress reached 100 and the modal opened.
    Completed,
}

/// Snapshot of the current press session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressSession {
    pub progress: u8,
    pub active: bool,
}

/// Timing parameters of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressConfig {
    pub tick_interval: Duration,
    pub cooldown: Duration,
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            cooldown: Duration::from_secs(DEFAULT_COOLDOWN_SECS),
        }
    }
}

impl From<&Config> for PressConfig {
    fn from(config: &Config) -> Self {
        Self {
            tick_interval: Duration::from_millis(
                config.tick_interval_ms.unwrap_or(DEFAULT_TICK_INTERVAL_MS),
            ),
            cooldown: Duration::from_secs(config.cooldown_secs.unwrap_or(DEFAULT_COOLDOWN_SECS)),
        }
    }
}

/// Drives progress, sound, fortune selection and the modal reveal.
pub struct PressHoldController {
    config: PressConfig,
    state: PressState,
    progress: u8,
    pending_tick: Option<TaskHandle>,
    message: Option<&'static str>,
    cooldown: MessageCooldown,
    modal_open: bool,
    reveal: Option<SpringAnimation>,
    selections: u32,
    audio: Box<dyn AudioPlayer>,
    random: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
}

impl PressHoldController {
    pub fn new(
        config: PressConfig,
        audio: Box<dyn AudioPlayer>,
        random: Box<dyn RandomSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            config,
            state: PressState::Idle,
            progress: 0,
            pending_tick: None,
            message: None,
            cooldown: MessageCooldown::new(config.cooldown),
            modal_open: false,
            reveal: None,
            selections: 0,
            audio,
            random,
            clock,
        }
    }

    pub fn state(&self) -> PressState {
        self.state
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn session(&self) -> PressSession {
        PressSession {
            progress: self.progress,
            active: self.state == PressState::Pressing,
        }
    }

    /// The staged fortune, if one was ever drawn.
    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn reveal(&self) -> Option<&SpringAnimation> {
        self.reveal.as_ref()
    }

    /// How many fortunes have been drawn so far.
    pub fn selections(&self) -> u32 {
        self.selections
    }

    pub fn pending_tick(&self) -> Option<TaskHandle> {
        self.pending_tick
    }

    /// Begin a press session.
    ///
    /// Does nothing and returns `false` unless the form is valid and no
    /// session is active. An open modal stays open.
    pub fn press_start(&mut self, form_valid: bool, scheduler: &mut dyn Scheduler) -> bool {
        if !form_valid {
            Log::log_debug("Press ignored: form is not valid");
            return false;
        }
        if self.state == PressState::Pressing {
            Log::log_debug("Press ignored: a press is already running");
            return false;
        }

        self.cancel_pending(scheduler);
        self.state = PressState::Pressing;
        self.progress = 0;

        if let Err(e) = self.audio.play() {
            Log::log_warning(&format!("Press sound failed: {}", e));
        }

        let now = self.clock.now();
        if self.cooldown.is_ready(now) {
            self.message = Some(pick_message(self.random.as_mut()));
            self.cooldown.mark_shown(now);
            self.selections += 1;
            Log::log_debug("New fortune staged");
        } else {
            Log::log_debug(&format!(
                "Keeping the current fortune for another {}s",
                self.cooldown.remaining(now).as_secs()
            ));
        }

        self.pending_tick = Some(scheduler.schedule_once(self.config.tick_interval));
        true
    }

    /// End a press session because the icon was released.
    ///
    /// Idempotent. Returns `true` when an active session was cancelled.
    pub fn press_end(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        match self.state {
            PressState::Pressing => {
                self.cancel_pending(scheduler);
                self.progress = 0;
                self.state = if self.modal_open {
                    PressState::ModalOpen
                } else {
                    PressState::Idle
                };
                Log::log_debug("Press released before completion");
                true
            }
            PressState::ModalOpen => {
                // finger lifted after completion: the modal stays, the bar empties
                self.progress = 0;
                false
            }
            PressState::Idle => false,
        }
    }

    /// Deliver a fired tick.
    pub fn on_tick(&mut self, handle: TaskHandle, scheduler: &mut dyn Scheduler) -> TickOutcome {
        if self.state != PressState::Pressing || self.pending_tick != Some(handle) {
            return TickOutcome::Ignored;
        }
        self.pending_tick = None;

        self.progress = self
            .progress
            .saturating_add(PROGRESS_STEP)
            .min(PROGRESS_COMPLETE);

        if self.progress >= PROGRESS_COMPLETE {
            self.state = PressState::ModalOpen;
            self.modal_open = true;
            self.reveal = Some(SpringAnimation::reveal());
            Log::log_debug("Progress complete, opening fortune");
            return TickOutcome::Completed;
        }

        self.pending_tick = Some(scheduler.schedule_once(self.config.tick_interval));
        TickOutcome::Advanced(self.progress)
    }

    /// Dismiss the modal. Progress and any running session are left as they are.
    pub fn close_modal(&mut self) -> bool {
        if !self.modal_open {
            return false;
        }
        self.modal_open = false;
        self.reveal = None;
        if self.state == PressState::ModalOpen {
            self.state = PressState::Idle;
        }
        true
    }

    /// Advance the modal entrance animation.
    pub fn step_reveal(&mut self, elapsed: Duration) {
        if let Some(reveal) = self.reveal.as_mut() {
            reveal.step(elapsed);
        }
    }

    fn cancel_pending(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(handle) = self.pending_tick.take() {
            scheduler.cancel(handle);
        }
    }
}
