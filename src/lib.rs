//! # Falbak
//!
//! A fingerprint fortune-telling toy for the terminal.
//!
//! The user fills in name, surname and birth date, sees their zodiac sign,
//! then holds the fingerprint until the progress bar fills up and a fortune
//! message is revealed.
//!
//! ## Architecture
//!
//! - **app**: Application store tying the form, zodiac and press controller together
//! - **args**: Command-line parsing
//! - **audio**: Press sound players
//! - **config**: Configuration loading, validation, and default generation
//! - **constants**: Application-wide constants, defaults and fixed texts
//! - **form**: Form fields, input filtering and validation
//! - **fortune**: Fortune messages, random selection and cooldown
//! - **logger**: Structured logging with visual formatting
//! - **press**: Press-and-hold state machine
//! - **reveal**: Spring animation for the fortune modal
//! - **scheduler**: Timer queue and clock capabilities
//! - **signals**: Shutdown signal handling
//! - **terminal**: Interactive crossterm screen
//! - **theme**: Light and dark palettes
//! - **utils**: Interpolation, drawing and text helpers
//! - **zodiac**: Birth date to zodiac sign resolution

pub mod app;
pub mod args;
pub mod audio;
pub mod config;
pub mod constants;
pub mod form;
pub mod fortune;
pub mod logger;
pub mod press;
pub mod reveal;
pub mod scheduler;
pub mod signals;
pub mod terminal;
pub mod theme;
pub mod utils;
pub mod zodiac;

#[cfg(any(test, feature = "testing-support"))]
pub mod testing;

// Re-export important types for easier access
pub use app::{AppView, FortuneApp};
pub use config::Config;
pub use form::{Field, FormCheck, FormFields, validate};
pub use logger::{Log, LogLevel};
pub use press::{PressHoldController, PressSession, PressState};
pub use zodiac::{ZodiacSign, resolve};
