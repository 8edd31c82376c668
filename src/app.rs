//! Application store for the fortune screen.
//!
//! `FortuneApp` owns everything the screen shows: the form, the values
//! derived from it (validity and zodiac sign), the theme, the press
//! controller and the timer queue the controller schedules its ticks on.
//! Hosts feed it input events and elapsed time, then render [`AppView`].
//!
//! Derived values are recomputed on every field change, so the view never
//! shows a sign or validity that is out of date with the fields.

use std::time::Duration;

use crate::audio::AudioPlayer;
use crate::config::Config;
use crate::constants::*;
use crate::form::{self, Field, FormCheck, FormFields};
use crate::fortune::RandomSource;
use crate::logger::Log;
use crate::press::{PressConfig, PressHoldController, PressState, TickOutcome};
use crate::scheduler::{Clock, TimerQueue};
use crate::theme::{Palette, Rgb, Theme};
use crate::zodiac::{self, ZodiacSign};

/// Everything the screen needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AppView {
    pub fields: FormFields,
    pub check: FormCheck,
    /// `"Burcunuz: X"`, present once a full birth date resolves to a sign.
    pub sign_text: Option<String>,
    pub progress: u8,
    pub progress_text: String,
    pub bar_color: Rgb,
    /// Whether the fingerprint accepts presses.
    pub fingerprint_enabled: bool,
    pub pressing: bool,
    pub modal: Option<ModalView>,
    pub theme: Theme,
    pub palette: Palette,
}

/// Fortune modal contents and its entrance animation state.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub message: &'static str,
    pub scale: f32,
    pub opacity: f32,
}

pub struct FortuneApp {
    fields: FormFields,
    check: FormCheck,
    sign: Option<ZodiacSign>,
    theme: Theme,
    controller: PressHoldController,
    timers: TimerQueue,
}

impl FortuneApp {
    /// Build the store from loaded configuration and the injected capabilities.
    pub fn new(
        config: &Config,
        audio: Box<dyn AudioPlayer>,
        random: Box<dyn RandomSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let theme = Theme::from_dark_mode(config.dark_mode.unwrap_or(DEFAULT_DARK_MODE));
        let controller = PressHoldController::new(PressConfig::from(config), audio, random, clock);
        Self::from_parts(theme, controller)
    }

    fn from_parts(theme: Theme, controller: PressHoldController) -> Self {
        let fields = FormFields::default();
        let check = form::check(&fields);
        Self {
            fields,
            check,
            sign: None,
            theme,
            controller,
            timers: TimerQueue::new(),
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn controller(&self) -> &PressHoldController {
        &self.controller
    }

    /// Replace a field's value. Characters the field does not accept are dropped.
    pub fn set_field(&mut self, field: Field, value: &str) {
        self.fields.set(field, value);
        self.refresh();
    }

    /// Append one typed character. Returns `false` when it was rejected.
    pub fn push_char(&mut self, field: Field, c: char) -> bool {
        let accepted = self.fields.push_char(field, c);
        if accepted {
            self.refresh();
        }
        accepted
    }

    pub fn pop_char(&mut self, field: Field) -> bool {
        let removed = self.fields.pop_char(field);
        if removed {
            self.refresh();
        }
        removed
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        Log::log_debug(&format!("Theme switched to {:?}", self.theme));
    }

    pub fn press_start(&mut self) -> bool {
        let valid = self.check.is_valid();
        self.controller.press_start(valid, &mut self.timers)
    }

    pub fn press_end(&mut self) -> bool {
        self.controller.press_end(&mut self.timers)
    }

    pub fn close_modal(&mut self) -> bool {
        self.controller.close_modal()
    }

    /// Move time forward by `by`, firing every tick that falls due and
    /// stepping the modal entrance.
    ///
    /// Returns the outcome of the last delivered tick, or
    /// [`TickOutcome::Ignored`] when none fired.
    pub fn advance(&mut self, by: Duration) -> TickOutcome {
        let start = self.timers.now();
        let until = start + by;
        let was_open = self.controller.is_modal_open();
        let mut opened_at = None;
        let mut last = TickOutcome::Ignored;

        while let Some(handle) = self.timers.pop_due(until) {
            last = self.controller.on_tick(handle, &mut self.timers);
            if last == TickOutcome::Completed {
                opened_at = Some(self.timers.now());
            }
        }
        self.timers.advance_to(until);

        // the entrance only runs for the time the modal has actually been open
        match opened_at {
            Some(at) => self.controller.step_reveal(until.saturating_sub(at)),
            None if was_open => self.controller.step_reveal(by),
            None => {}
        }

        last
    }

    pub fn view(&self) -> AppView {
        let palette = self.theme.palette();
        let progress = self.controller.progress();

        let modal = if self.controller.is_modal_open() {
            let (scale, opacity) = self
                .controller
                .reveal()
                .map(|reveal| (reveal.scale(), reveal.opacity()))
                .unwrap_or((1.0, 1.0));
            Some(ModalView {
                message: self.controller.message().unwrap_or_default(),
                scale,
                opacity,
            })
        } else {
            None
        };

        AppView {
            fields: self.fields.clone(),
            check: self.check,
            sign_text: self
                .sign
                .map(|sign| format!("{}: {}", ZODIAC_LABEL, sign.name())),
            progress,
            progress_text: format!("{}: {}%", PROGRESS_LABEL, progress),
            bar_color: palette.progress_color(progress),
            fingerprint_enabled: self.check.is_valid(),
            pressing: self.controller.state() == PressState::Pressing,
            modal,
            theme: self.theme,
            palette,
        }
    }

    fn refresh(&mut self) {
        self.check = form::check(&self.fields);
        let sign = zodiac::resolve_fields(&self.fields);
        if sign != self.sign {
            if let Some(sign) = sign {
                Log::log_debug(&format!("Zodiac sign resolved: {}", sign));
            }
            self.sign = sign;
        }
    }
}
