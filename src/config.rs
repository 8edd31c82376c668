//! Configuration system for falbak.
//!
//! Settings are read from `falbak.toml` in `$XDG_CONFIG_HOME/falbak/`
//! (`dirs::config_dir()`). A commented default file is written on first run.
//! Every key is optional:
//!
//! ```toml
//! dark_mode = true            # Start in the dark theme
//! tick_interval_ms = 50       # Milliseconds per 1% of progress
//! cooldown_secs = 60          # Seconds before a new fortune is drawn
//! sound = true                # Play a sound when the fingerprint is pressed
//! sound_file = "~/mystic.mp3" # Clip to play; the terminal bell is used when unset or missing
//! audio_command = "paplay"    # Player command; auto-detected when unset
//! release_timeout_ms = 700    # Key repeat silence treated as release
//! ```
//!
//! ## Validation
//!
//! Numeric settings are range checked against the limits in `constants.rs`.
//! Invalid configurations stop startup with a message naming the offending
//! key. A `sound_file` that does not exist is not an error here; the audio
//! setup warns and falls back to the terminal bell.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::logger::Log;

/// Configuration structure for falbak settings.
///
/// Missing values are filled with defaults during loading, so after
/// [`Config::load_from_path`] every `Option` except `sound_file` and
/// `audio_command` is `Some`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Whether the screen starts in the dark theme.
    pub dark_mode: Option<bool>,
    /// Milliseconds between progress increments.
    pub tick_interval_ms: Option<u64>,
    /// Seconds before a new fortune may be drawn.
    pub cooldown_secs: Option<u64>,
    pub sound: Option<bool>,
    pub sound_file: Option<String>, // `~/` is expanded
    pub audio_command: Option<String>,
    pub release_timeout_ms: Option<u64>, // keyboard fallback only
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("falbak").join("falbak.toml"))
    }

    /// Write a default configuration file with explanatory comments.
    pub fn create_default_config(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_content = ConfigBuilder::new()
            .add_section("Falbak configuration")
            .add_setting(
                "dark_mode",
                &DEFAULT_DARK_MODE.to_string(),
                "Start in the dark theme",
            )
            .add_setting(
                "sound",
                &DEFAULT_SOUND.to_string(),
                "Play a sound when the fingerprint is pressed",
            )
            .add_section("Timing")
            .add_setting(
                "tick_interval_ms",
                &DEFAULT_TICK_INTERVAL_MS.to_string(),
                &format!(
                    "Milliseconds per 1% of progress ({}-{})",
                    MINIMUM_TICK_INTERVAL_MS, MAXIMUM_TICK_INTERVAL_MS
                ),
            )
            .add_setting(
                "cooldown_secs",
                &DEFAULT_COOLDOWN_SECS.to_string(),
                &format!(
                    "Seconds before a new fortune is drawn ({}-{})",
                    MINIMUM_COOLDOWN_SECS, MAXIMUM_COOLDOWN_SECS
                ),
            )
            .add_setting(
                "release_timeout_ms",
                &DEFAULT_RELEASE_TIMEOUT_MS.to_string(),
                &format!(
                    "Key repeat silence treated as release ({}-{})",
                    MINIMUM_RELEASE_TIMEOUT_MS, MAXIMUM_RELEASE_TIMEOUT_MS
                ),
            )
            .add_section("Sound")
            .add_comment("sound_file = \"~/mystic-sound.mp3\"  # Clip to play (terminal bell when unset)")
            .add_comment("audio_command = \"paplay\"           # Player command (auto-detected when unset)")
            .build();

        fs::write(path, config_content).context("Failed to write default config file")?;
        Ok(())
    }

    fn apply_defaults_and_validate_fields(config: &mut Config) -> Result<()> {
        if config.dark_mode.is_none() {
            config.dark_mode = Some(DEFAULT_DARK_MODE);
        }
        if config.sound.is_none() {
            config.sound = Some(DEFAULT_SOUND);
        }
        if config.tick_interval_ms.is_none() {
            config.tick_interval_ms = Some(DEFAULT_TICK_INTERVAL_MS);
        }
        if config.cooldown_secs.is_none() {
            config.cooldown_secs = Some(DEFAULT_COOLDOWN_SECS);
        }
        if config.release_timeout_ms.is_none() {
            config.release_timeout_ms = Some(DEFAULT_RELEASE_TIMEOUT_MS);
        }

        if let Some(file) = config.sound_file.take() {
            config.sound_file = Some(expand_home(&file));
        }

        validate_config(config)
    }

    /// Load from a specific path. Does NOT create a default config.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Configuration file not found at specified path: {}",
                path.display()
            );
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        Self::apply_defaults_and_validate_fields(&mut config)?;

        Ok(config)
    }

    /// Load from the default location, creating the file when missing.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)
                .context("Failed to create default config during load")?;
            Log::log_indented(&format!(
                "Created default configuration at {}",
                crate::utils::path_for_display(&config_path)
            ));
        }

        Self::load_from_path(&config_path).with_context(|| {
            Log::log_pipe();
            format!(
                "Failed to load configuration from {}",
                config_path.display()
            )
        })
    }

    pub fn log_config(&self, path: &Path) {
        Log::log_block_start(&format!(
            "Loaded configuration from {}",
            crate::utils::path_for_display(path)
        ));

        Log::log_indented(&format!(
            "Theme: {}",
            if self.dark_mode.unwrap_or(DEFAULT_DARK_MODE) {
                "dark"
            } else {
                "light"
            }
        ));
        Log::log_indented(&format!(
            "Tick interval: {}ms",
            self.tick_interval_ms.unwrap_or(DEFAULT_TICK_INTERVAL_MS)
        ));
        Log::log_indented(&format!(
            "Fortune cooldown: {} seconds",
            self.cooldown_secs.unwrap_or(DEFAULT_COOLDOWN_SECS)
        ));
        Log::log_indented(&format!(
            "Sound: {}",
            self.sound.unwrap_or(DEFAULT_SOUND)
        ));

        // Only show the clip when sound is enabled
        if self.sound.unwrap_or(DEFAULT_SOUND) {
            match self.sound_file.as_deref() {
                Some(file) => Log::log_indented(&format!(
                    "Sound file: {}",
                    crate::utils::path_for_display(Path::new(file))
                )),
                None => Log::log_indented("Sound file: none (terminal bell)"),
            }
        }
    }
}

/// Range checks for every numeric setting plus sound file existence.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(interval) = config.tick_interval_ms {
        if !(MINIMUM_TICK_INTERVAL_MS..=MAXIMUM_TICK_INTERVAL_MS).contains(&interval) {
            anyhow::bail!(
                "Tick interval must be between {} and {} milliseconds (got {})",
                MINIMUM_TICK_INTERVAL_MS,
                MAXIMUM_TICK_INTERVAL_MS,
                interval
            );
        }
    }

    if let Some(cooldown) = config.cooldown_secs {
        if !(MINIMUM_COOLDOWN_SECS..=MAXIMUM_COOLDOWN_SECS).contains(&cooldown) {
            anyhow::bail!(
                "Cooldown must be between {} and {} seconds (got {})",
                MINIMUM_COOLDOWN_SECS,
                MAXIMUM_COOLDOWN_SECS,
                cooldown
            );
        }
    }

    if let Some(timeout) = config.release_timeout_ms {
        if !(MINIMUM_RELEASE_TIMEOUT_MS..=MAXIMUM_RELEASE_TIMEOUT_MS).contains(&timeout) {
            anyhow::bail!(
                "Release timeout must be between {} and {} milliseconds (got {})",
                MINIMUM_RELEASE_TIMEOUT_MS,
                MAXIMUM_RELEASE_TIMEOUT_MS,
                timeout
            );
        }
    }

    if let Some(ref command) = config.audio_command {
        if command.trim().is_empty() {
            anyhow::bail!("audio_command must not be empty");
        }
    }

    Ok(())
}

fn expand_home(path: &str) -> String {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest).display().to_string(),
        _ => path.to_string(),
    }
}

/// Builds aligned `key = value  # comment` config text.
struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
    Comment(String),
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{}]", title)));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{} = {}", key, value),
            comment: format!("# {}", comment),
        });
        self
    }

    /// A commented-out line, written as is after a `# `.
    fn add_comment(mut self, text: &str) -> Self {
        self.entries.push(ConfigEntry::Comment(format!("# {}", text)));
        self
    }

    fn build(self) -> String {
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                _ => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut result = Vec::new();
        let mut first_section = true;

        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !first_section {
                        result.push(String::new());
                    }
                    result.push(title);
                    first_section = false;
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{}{}{}", line, padding, comment));
                }
                ConfigEntry::Comment(text) => result.push(text),
            }
        }

        let mut content = result.join("\n");
        content.push('\n');
        content
    }
}
