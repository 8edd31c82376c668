//! Shutdown signal handling.
//!
//! SIGTERM, SIGINT and SIGHUP clear a shared `running` flag that the screen
//! loop checks on every frame. Inside the screen `Ctrl+C` arrives as a key
//! event rather than SIGINT because of raw mode.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM},
    iterator::Signals,
};
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

use crate::logger::Log;

/// Signal handling state shared between threads
pub struct SignalState {
    /// Atomic flag indicating if the application should keep running
    pub running: Arc<AtomicBool>,
}

impl SignalState {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Spawn the signal watcher thread.
pub fn setup_signal_handler() -> Result<SignalState> {
    let running = Arc::new(AtomicBool::new(true));

    let mut signals =
        Signals::new([SIGINT, SIGTERM, SIGHUP]).context("failed to register signal handlers")?;

    let running_clone = running.clone();
    thread::spawn(move || {
        for sig in signals.forever() {
            Log::log_pipe();
            Log::log_info(&format!("Shutdown signal received: {}", sig));
            running_clone.store(false, Ordering::SeqCst);
        }
    });

    Ok(SignalState { running })
}
