//! Interactive terminal screen.
//!
//! Runs the fortune form on the alternate screen with raw mode and mouse
//! capture. The loop polls for input, feeds wall-clock elapsed time into the
//! application store and redraws only when the rendered view changes.
//!
//! ## Controls
//!
//! - `Tab`/`↓` and `Shift+Tab`/`↑` move focus between the five fields and
//!   the fingerprint row
//! - typing edits the focused field, `Backspace` deletes
//! - `Space` on the fingerprint row, or the left mouse button on it, is the
//!   press target: holding it runs the progress bar
//! - `F2`/`Ctrl+T` toggle the theme
//! - `Enter`/`Esc` close the fortune; `Esc` quits when no fortune is shown
//! - `Ctrl+C` quits
//!
//! ## Key release
//!
//! Terminals only report key releases when the keyboard enhancement protocol
//! is available. Without it a held `Space` shows up as a press followed by
//! auto-repeats, and the key counts as released once no repeat has arrived
//! for `release_timeout_ms`.
//!
//! Logging is switched off while the screen is active so log lines never
//! land on top of the drawing.

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{Write, stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::app::{AppView, FortuneApp};
use crate::config::Config;
use crate::constants::*;
use crate::form::Field;
use crate::logger::Log;
use crate::theme::Rgb;
use crate::utils::{render_progress_bar, wrap_text};

/// Rows of the form, top to bottom. Used for vertical centering.
const CONTENT_HEIGHT: u16 = 18;

/// Focusable rows of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    Fingerprint,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Field(Field::Name),
        Focus::Field(Field::Surname),
        Focus::Field(Field::BirthYear),
        Focus::Field(Field::BirthMonth),
        Focus::Field(Field::BirthDay),
        Focus::Fingerprint,
    ];

    pub fn next(&self) -> Focus {
        let index = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }

    pub fn previous(&self) -> Focus {
        let index = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(index + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Whether the loop should keep going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Clickable rows from the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub field_rows: [u16; 5],
    pub fingerprint_row: u16,
    pub theme_row: u16,
    pub close_row: Option<u16>,
}

impl ScreenLayout {
    /// Field drawn on `row`, if any.
    fn field_at(&self, row: u16) -> Option<Field> {
        self.field_rows
            .iter()
            .position(|r| *r == row)
            .map(|index| Field::ALL[index])
    }
}

/// Which input is currently holding the fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hold {
    Key { last_seen: Instant },
    Mouse,
}

/// Translates terminal events into store transitions.
#[derive(Debug)]
pub struct InputState {
    focus: Focus,
    hold: Option<Hold>,
    release_timeout: Duration,
    key_release_events: bool,
}

impl InputState {
    pub fn new(release_timeout: Duration, key_release_events: bool) -> Self {
        Self {
            focus: Focus::Field(Field::Name),
            hold: None,
            release_timeout,
            key_release_events,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn is_holding(&self) -> bool {
        self.hold.is_some()
    }

    pub fn handle_event(
        &mut self,
        app: &mut FortuneApp,
        event: &Event,
        layout: &ScreenLayout,
        now: Instant,
    ) -> Control {
        match event {
            Event::Key(key) => self.handle_key(app, key, now),
            Event::Mouse(mouse) => {
                self.handle_mouse(app, mouse, layout);
                Control::Continue
            }
            _ => Control::Continue,
        }
    }

    /// Release a key hold whose auto-repeat has gone quiet.
    ///
    /// Only used when the terminal cannot report releases itself.
    pub fn check_release(&mut self, app: &mut FortuneApp, now: Instant) {
        if self.key_release_events {
            return;
        }
        if let Some(Hold::Key { last_seen }) = self.hold {
            if now.saturating_duration_since(last_seen) > self.release_timeout {
                self.release(app);
            }
        }
    }

    fn handle_key(&mut self, app: &mut FortuneApp, key: &KeyEvent, now: Instant) -> Control {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // the hold key is the only one whose release and repeats matter
        if key.code == KeyCode::Char(' ') && self.focus == Focus::Fingerprint && !ctrl {
            self.handle_space(app, key.kind, now);
            return Control::Continue;
        }
        if key.kind == KeyEventKind::Release {
            return Control::Continue;
        }

        let modal_open = app.view().modal.is_some();
        match key.code {
            KeyCode::Char('c') if ctrl => return Control::Quit,
            KeyCode::Char('t') if ctrl => app.toggle_theme(),
            KeyCode::F(2) => app.toggle_theme(),
            KeyCode::Esc if modal_open => {
                app.close_modal();
            }
            KeyCode::Esc => return Control::Quit,
            KeyCode::Enter if modal_open => {
                app.close_modal();
            }
            _ if modal_open => {}
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::Backspace => {
                if let Focus::Field(field) = self.focus {
                    app.pop_char(field);
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Focus::Field(field) = self.focus {
                    app.push_char(field, c);
                }
            }
            _ => {}
        }
        Control::Continue
    }

    fn handle_space(&mut self, app: &mut FortuneApp, kind: KeyEventKind, now: Instant) {
        match (kind, self.hold) {
            (KeyEventKind::Release, Some(Hold::Key { .. })) => self.release(app),
            (KeyEventKind::Release, _) => {}
            (_, Some(Hold::Key { .. })) => {
                self.hold = Some(Hold::Key { last_seen: now });
            }
            (_, Some(Hold::Mouse)) => {}
            (KeyEventKind::Repeat, None) => {}
            (_, None) => {
                if app.press_start() {
                    self.hold = Some(Hold::Key { last_seen: now });
                }
            }
        }
    }

    fn handle_mouse(&mut self, app: &mut FortuneApp, mouse: &MouseEvent, layout: &ScreenLayout) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(close_row) = layout.close_row {
                    if mouse.row == close_row {
                        app.close_modal();
                    }
                    return;
                }
                if mouse.row == layout.fingerprint_row {
                    self.focus = Focus::Fingerprint;
                    if self.hold.is_none() && app.press_start() {
                        self.hold = Some(Hold::Mouse);
                    }
                } else if mouse.row == layout.theme_row {
                    app.toggle_theme();
                } else if let Some(field) = layout.field_at(mouse.row) {
                    self.focus = Focus::Field(field);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.hold == Some(Hold::Mouse) {
                    self.release(app);
                }
            }
            _ => {}
        }
    }

    fn release(&mut self, app: &mut FortuneApp) {
        self.hold = None;
        app.press_end();
    }
}

/// Restores the terminal when dropped, including on early return.
struct ScreenGuard {
    key_release_events: bool,
    logging_was_enabled: bool,
}

impl ScreenGuard {
    fn enter() -> Result<Self> {
        let logging_was_enabled = Log::is_enabled();
        let mut out = stdout();
        out.flush()?;

        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        Log::set_enabled(false);
        let mut guard = Self {
            key_release_events: false,
            logging_was_enabled,
        };

        execute!(out, EnterAlternateScreen, EnableMouseCapture, Hide)
            .context("Failed to enter alternate screen")?;

        if matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
            execute!(
                out,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )
            .context("Failed to enable key release reporting")?;
            guard.key_release_events = true;
        }

        Ok(guard)
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.key_release_events {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            out,
            ResetColor,
            Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        Log::set_enabled(self.logging_was_enabled);
    }
}

/// Run the interactive screen until the user quits or `running` clears.
pub fn run(app: &mut FortuneApp, config: &Config, running: &AtomicBool) -> Result<()> {
    let guard = ScreenGuard::enter()?;
    let release_timeout = Duration::from_millis(
        config
            .release_timeout_ms
            .unwrap_or(DEFAULT_RELEASE_TIMEOUT_MS),
    );
    let mut input = InputState::new(release_timeout, guard.key_release_events);
    let poll_interval = Duration::from_millis(INPUT_POLL_INTERVAL_MS);

    let mut out = stdout();
    let mut layout = ScreenLayout::default();
    let mut last_frame: Option<(AppView, Focus, (u16, u16))> = None;
    let mut last_tick = Instant::now();

    while running.load(Ordering::SeqCst) {
        if event::poll(poll_interval)? {
            loop {
                let event = event::read()?;
                let now = Instant::now();
                catch_up(app, &mut last_tick, now);
                if input.handle_event(app, &event, &layout, now) == Control::Quit {
                    return Ok(());
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        let now = Instant::now();
        catch_up(app, &mut last_tick, now);
        input.check_release(app, now);

        let frame = (app.view(), input.focus(), terminal::size()?);
        if last_frame.as_ref() != Some(&frame) {
            layout = render(&mut out, &frame.0, frame.1, frame.2)?;
            last_frame = Some(frame);
        }
    }

    Ok(())
}

/// Bring the app's timers up to `now`, so input handled next lands at the
/// current time and not at the previous frame's.
fn catch_up(app: &mut FortuneApp, last_tick: &mut Instant, now: Instant) {
    app.advance(now.saturating_duration_since(*last_tick));
    *last_tick = now;
}

/// Draw one frame and return where its clickable rows ended up.
pub fn render<W: Write>(
    out: &mut W,
    view: &AppView,
    focus: Focus,
    size: (u16, u16),
) -> Result<ScreenLayout> {
    let (width, height) = size;
    let palette = view.palette;
    let top = height.saturating_sub(CONTENT_HEIGHT) / 2;

    queue!(
        out,
        SetBackgroundColor(palette.background.into()),
        Clear(ClearType::All)
    )?;

    queue!(out, SetAttribute(Attribute::Bold))?;
    print_centered(out, width, top + 1, HEADER_TEXT, palette.header_glow)?;
    queue!(out, SetAttribute(Attribute::Reset))?;
    queue!(out, SetBackgroundColor(palette.background.into()))?;

    let mut field_rows = [0u16; 5];
    for (index, field) in Field::ALL.iter().enumerate() {
        let row = top + 3 + index as u16;
        field_rows[index] = row;

        let value = view.fields.get(*field);
        let marker = if focus == Focus::Field(*field) { "▶ " } else { "  " };
        // only complain about fields the user has started filling in
        let hint = if !value.is_empty() && !view.check.field(*field) {
            " ✗"
        } else {
            ""
        };
        let (text, color) = if value.is_empty() {
            (format!("{}{}", marker, field.placeholder()), palette.placeholder)
        } else {
            (format!("{}{}: {}{}", marker, field.placeholder(), value, hint), palette.text)
        };
        print_centered(out, width, row, &text, color)?;
    }

    if let Some(sign_text) = &view.sign_text {
        print_centered(out, width, top + 9, sign_text, palette.text)?;
    }

    let fingerprint_row = top + 11;
    let marker = if focus == Focus::Fingerprint { "▶ " } else { "  " };
    let icon = if view.pressing { "(◉)" } else { "( )" };
    print_centered(
        out,
        width,
        fingerprint_row,
        &format!("{}{} {}", marker, icon, FINGERPRINT_LABEL),
        palette.fingerprint_color(view.fingerprint_enabled),
    )?;

    print_progress_bar(out, view, width, top + 13)?;
    print_centered(out, width, top + 14, &view.progress_text, palette.text)?;

    let theme_row = top + 16;
    print_centered(
        out,
        width,
        theme_row,
        &format!("[ {} ]", THEME_BUTTON_TEXT),
        palette.accent,
    )?;

    let close_row = match &view.modal {
        Some(modal) => Some(render_modal(out, view, modal, size)?),
        None => None,
    };

    queue!(out, ResetColor)?;
    out.flush()?;

    Ok(ScreenLayout {
        field_rows,
        fingerprint_row,
        theme_row,
        close_row,
    })
}

/// Draw the fortune box over the form. Returns the close button row.
fn render_modal<W: Write>(
    out: &mut W,
    view: &AppView,
    modal: &crate::app::ModalView,
    size: (u16, u16),
) -> Result<u16> {
    let (width, height) = size;
    let palette = view.palette;

    let box_width = ((MODAL_WIDTH as f32 * modal.scale).round() as usize)
        .clamp(4, width.max(4) as usize);
    let text_color = palette.modal_background.mix(palette.modal_text, modal.opacity);
    let button_color = palette.modal_background.mix(palette.success, modal.opacity);

    let lines = if box_width > 8 {
        wrap_text(modal.message, box_width - 4)
    } else {
        Vec::new()
    };

    // border, padding, text, padding, button, border
    let box_height = lines.len() as u16 + 5;
    let top = height.saturating_sub(box_height) / 2;
    let blank = " ".repeat(box_width);

    queue!(out, SetBackgroundColor(palette.modal_background.into()))?;
    for row in top..top + box_height {
        print_centered(out, width, row, &blank, text_color)?;
    }
    for (index, line) in lines.iter().enumerate() {
        print_centered(out, width, top + 1 + index as u16, line, text_color)?;
    }

    let close_row = top + box_height - 2;
    print_centered(
        out,
        width,
        close_row,
        &format!("[ {} ]", CLOSE_BUTTON_TEXT),
        button_color,
    )?;
    queue!(out, SetBackgroundColor(palette.background.into()))?;

    Ok(close_row)
}

/// Draw the empty track, then the filled part over it in the progress color.
fn print_progress_bar<W: Write>(out: &mut W, view: &AppView, width: u16, row: u16) -> Result<()> {
    let track = format!("[{}]", "─".repeat(PROGRESS_BAR_WIDTH));
    let column = width.saturating_sub(track.chars().count() as u16) / 2;
    print_centered(out, width, row, &track, view.palette.bar_track)?;

    let bar = render_progress_bar(view.progress, PROGRESS_BAR_WIDTH);
    let filled = bar.trim_end();
    if !filled.is_empty() {
        queue!(
            out,
            MoveTo(column + 1, row),
            SetForegroundColor(view.bar_color.into()),
            Print(filled)
        )?;
    }
    Ok(())
}

fn print_centered<W: Write>(out: &mut W, width: u16, row: u16, text: &str, color: Rgb) -> Result<()> {
    let length = text.chars().count() as u16;
    let column = width.saturating_sub(length) / 2;
    queue!(
        out,
        MoveTo(column, row),
        SetForegroundColor(color.into()),
        Print(text)
    )?;
    Ok(())
}
