//! Command-line argument parsing and processing.
//!
//! Arguments are parsed with clap and reduced to a [`CliAction`]. Help and
//! version output go through the logger so they match the rest of the
//! program's output, and unknown options fall back to the help text.

use clap::Parser;
use std::path::PathBuf;

use crate::logger::Log;

#[derive(Parser, Debug)]
#[command(name = "falbak", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Enable detailed debug output
    #[arg(short, long)]
    debug: bool,

    /// Use this configuration file instead of the default one
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Start in the light theme
    #[arg(long)]
    light: bool,

    /// Never play the press sound
    #[arg(long)]
    mute: bool,

    #[arg(short, long)]
    help: bool,

    #[arg(short = 'V', long, short_alias = 'v')]
    version: bool,
}

/// Settings for a normal run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    pub debug_enabled: bool,
    pub config_path: Option<PathBuf>,
    pub light: bool,
    pub mute: bool,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Open the fortune screen
    Run(RunOptions),
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to invalid arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments, program name first.
    ///
    /// Version takes precedence over help, and help over running.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: Into<std::ffi::OsString> + Clone,
    {
        let action = match Cli::try_parse_from(args) {
            Ok(cli) if cli.version => CliAction::ShowVersion,
            Ok(cli) if cli.help => CliAction::ShowHelp,
            Ok(cli) => CliAction::Run(RunOptions {
                debug_enabled: cli.debug,
                config_path: cli.config,
                light: cli.light,
                mute: cli.mute,
            }),
            Err(e) => {
                let message = e.to_string();
                let first_line = message.lines().next().unwrap_or("invalid arguments");
                Log::log_warning(first_line.trim_start_matches("error: "));
                CliAction::ShowHelpDueToError
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args_os())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    Log::log_version();
    Log::log_pipe();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    Log::log_version();
    Log::log_block_start(env!("CARGO_PKG_DESCRIPTION"));
    Log::log_block_start("Usage: falbak [OPTIONS]");
    Log::log_block_start("Options:");
    Log::log_indented("-c, --config <PATH>       Use a specific configuration file");
    Log::log_indented("-d, --debug               Enable detailed debug output");
    Log::log_indented("-h, --help                Print help information");
    Log::log_indented("    --light               Start in the light theme");
    Log::log_indented("    --mute                Never play the press sound");
    Log::log_indented("-V, --version             Print version information");
    Log::log_block_start("Controls:");
    Log::log_indented("Tab/↑/↓                   Move between fields");
    Log::log_indented("Space, left click         Hold the fingerprint to read your fortune");
    Log::log_indented("F2, Ctrl+T                Toggle the theme");
    Log::log_indented("Enter/Esc                 Close the fortune, Esc again to quit");
    Log::log_end();
}
