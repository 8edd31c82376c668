//! Sound playback for the fingerprint press.
//!
//! Playback is fire-and-forget: the press flow never waits for the clip and
//! never fails because of it. Errors returned by [`AudioPlayer::play`] are
//! logged by the caller and otherwise ignored.
//!
//! ## Players
//!
//! - **CommandAudioPlayer**: spawns a system player (`paplay`, `aplay`,
//!   `afplay` or a configured command) on the configured clip
//! - **BellAudioPlayer**: rings the terminal bell when no clip is configured
//!   or the configured clip does not exist
//! - **SilentAudioPlayer**: used with `--mute` or `sound = false`

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::config::Config;
use crate::constants::{DEFAULT_AUDIO_COMMANDS, DEFAULT_SOUND};
use crate::logger::Log;

/// Capability to play the fixed press sound.
#[cfg_attr(test, mockall::automock)]
pub trait AudioPlayer {
    /// Start playback and return immediately.
    fn play(&mut self) -> Result<()>;

    /// Human-readable player name for logging.
    fn player_name(&self) -> &'static str;
}

/// Plays the clip through an external command.
pub struct CommandAudioPlayer {
    command: String,
    clip: PathBuf,
    current: Option<Child>,
}

impl CommandAudioPlayer {
    pub fn new(command: &str, clip: &Path) -> Self {
        Self {
            command: command.to_string(),
            clip: clip.to_path_buf(),
            current: None,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Pick the first available default player from `PATH`.
    pub fn detect(clip: &Path) -> Option<Self> {
        DEFAULT_AUDIO_COMMANDS
            .iter()
            .find(|cmd| command_exists(cmd))
            .map(|cmd| Self::new(cmd, clip))
    }

    /// Whether the previously spawned playback is still running.
    ///
    /// Reaps it when it has finished.
    fn is_playing(&mut self) -> bool {
        match self.current.as_mut().map(|child| child.try_wait()) {
            Some(Ok(None)) => true,
            Some(Ok(Some(_))) | Some(Err(_)) => {
                self.current = None;
                false
            }
            None => false,
        }
    }
}

impl AudioPlayer for CommandAudioPlayer {
    fn play(&mut self) -> Result<()> {
        // a clip that is still loading or playing is not started twice
        if self.is_playing() {
            Log::log_debug("Previous playback still running, not restarting");
            return Ok(());
        }

        let child = Command::new(&self.command)
            .arg(&self.clip)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| {
                format!(
                    "Failed to start '{}' for {}",
                    self.command,
                    self.clip.display()
                )
            })?;

        Log::log_debug(&format!("Playback started with PID {}", child.id()));
        self.current = Some(child);
        Ok(())
    }

    fn player_name(&self) -> &'static str {
        "command"
    }
}

impl Drop for CommandAudioPlayer {
    fn drop(&mut self) {
        if let Some(mut child) = self.current.take() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }
}

/// Rings the terminal bell.
#[derive(Debug, Default)]
pub struct BellAudioPlayer;

impl AudioPlayer for BellAudioPlayer {
    fn play(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(b"\x07").context("Failed to ring terminal bell")?;
        stdout.flush().context("Failed to ring terminal bell")?;
        Ok(())
    }

    fn player_name(&self) -> &'static str {
        "bell"
    }
}

/// Does nothing.
#[derive(Debug, Default)]
pub struct SilentAudioPlayer;

impl AudioPlayer for SilentAudioPlayer {
    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn player_name(&self) -> &'static str {
        "silent"
    }
}

/// Choose a player from the configuration.
///
/// Falls back to the bell when no clip is configured or no player command is
/// available, and to silence when sound is disabled.
pub fn create_player(config: &Config, mute: bool) -> Box<dyn AudioPlayer> {
    if mute || !config.sound.unwrap_or(DEFAULT_SOUND) {
        return Box::new(SilentAudioPlayer);
    }

    let Some(clip) = config.sound_file.as_deref() else {
        return Box::new(BellAudioPlayer);
    };
    let clip = Path::new(clip);
    if !clip.is_file() {
        Log::log_warning(&format!(
            "Sound file not found: {}, using the terminal bell instead",
            crate::utils::path_for_display(clip)
        ));
        return Box::new(BellAudioPlayer);
    }

    let player = match config.audio_command.as_deref() {
        Some(command) => Some(CommandAudioPlayer::new(command, clip)),
        None => CommandAudioPlayer::detect(clip),
    };

    match player {
        Some(player) => {
            Log::log_indented(&format!("Sound player: {}", player.command()));
            Box::new(player)
        }
        None => {
            Log::log_warning("No audio player found, using the terminal bell instead");
            Box::new(BellAudioPlayer)
        }
    }
}

/// Check whether a command can be found on `PATH`.
fn command_exists(command: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(command).is_file()))
        .unwrap_or(false)
}
