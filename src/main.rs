use anyhow::Result;

use falbak::{
    FortuneApp,
    args::{CliAction, ParsedArgs, RunOptions, display_help, display_version_info},
    audio::create_player,
    config::Config,
    constants::EXIT_FAILURE,
    fortune::ThreadRandom,
    logger::Log,
    scheduler::SystemClock,
    signals::setup_signal_handler,
    terminal,
};

fn main() -> Result<()> {
    let options = match ParsedArgs::from_env().action {
        CliAction::ShowVersion => {
            display_version_info();
            return Ok(());
        }
        CliAction::ShowHelp => {
            display_help();
            return Ok(());
        }
        CliAction::ShowHelpDueToError => {
            display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Run(options) => options,
    };

    Log::set_debug(options.debug_enabled);
    Log::log_version();

    if let Err(e) = run(options) {
        Log::log_pipe();
        Log::log_critical(&format!("{:#}", e));
        Log::log_end();
        std::process::exit(EXIT_FAILURE);
    }

    Ok(())
}

fn run(options: RunOptions) -> Result<()> {
    let signal_state = setup_signal_handler()?;

    let (mut config, config_path) = match options.config_path {
        Some(path) => (Config::load_from_path(&path)?, path),
        None => (Config::load()?, Config::get_config_path()?),
    };
    if options.light {
        config.dark_mode = Some(false);
    }
    config.log_config(&config_path);

    let audio = create_player(&config, options.mute);
    Log::log_debug(&format!("Using the {} sound player", audio.player_name()));

    let mut app = FortuneApp::new(
        &config,
        audio,
        Box::new(ThreadRandom),
        Box::new(SystemClock),
    );

    Log::log_block_start("Opening the fortune screen...");
    terminal::run(&mut app, &config, &signal_state.running)?;

    Log::log_decorated(&format!(
        "Fortunes drawn this session: {}",
        app.controller().selections()
    ));
    if !signal_state.is_running() {
        Log::log_decorated("Stopped by signal");
    }
    Log::log_end();

    Ok(())
}
