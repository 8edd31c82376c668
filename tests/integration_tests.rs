use serial_test::serial;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

use falbak::audio::{AudioPlayer, create_player};
use falbak::constants::FORTUNE_MESSAGES;
use falbak::press::TickOutcome;
use falbak::testing::{ManualClock, RecordingAudio, SequenceRandom};
use falbak::{Config, Field, FortuneApp, PressState};

fn create_test_config_file(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("falbak").join("falbak.toml");

    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, content).unwrap();

    (temp_dir, config_path)
}

struct Harness {
    app: FortuneApp,
    audio: RecordingAudio,
    clock: ManualClock,
    random: SequenceRandom,
}

impl Harness {
    fn new(config: &Config) -> Self {
        let audio = RecordingAudio::new();
        let clock = ManualClock::at_epoch();
        let random = SequenceRandom::new(vec![2, 7, 5]);
        let app = FortuneApp::new(
            config,
            Box::new(audio.clone()),
            Box::new(random.clone()),
            Box::new(clock.clone()),
        );
        Self {
            app,
            audio,
            clock,
            random,
        }
    }

    fn fill_valid(&mut self) {
        self.app.set_field(Field::Name, "Ayşe");
        self.app.set_field(Field::Surname, "Yılmaz");
        self.app.set_field(Field::BirthYear, "1990");
        self.app.set_field(Field::BirthMonth, "5");
        self.app.set_field(Field::BirthDay, "20");
    }

    /// Hold for `held`, moving the wall clock along with virtual time.
    fn hold(&mut self, held: Duration) -> TickOutcome {
        self.app.press_start();
        self.clock.advance(held);
        self.app.advance(held)
    }
}

#[test]
#[serial]
fn test_integration_config_drives_timing() {
    let (_temp_dir, config_path) = create_test_config_file(
        r#"
tick_interval_ms = 20
cooldown_secs = 5
dark_mode = false
"#,
    );
    let config = Config::load_from_path(&config_path).unwrap();
    assert_eq!(config.tick_interval_ms, Some(20));
    assert_eq!(config.release_timeout_ms, Some(700));

    let mut harness = Harness::new(&config);
    harness.fill_valid();
    assert!(!harness.app.theme().is_dark());

    // 100 ticks at 20ms
    assert_eq!(harness.hold(Duration::from_millis(1999)), TickOutcome::Advanced(99));
    assert_eq!(harness.app.advance(Duration::from_millis(1)), TickOutcome::Completed);
}

#[test]
#[serial]
fn test_integration_invalid_config_is_rejected() {
    let (_temp_dir, config_path) = create_test_config_file("tick_interval_ms = 1\n");
    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(format!("{:#}", err).contains("Tick interval"));
}

#[test]
fn test_integration_full_reading() {
    let mut harness = Harness::new(&Config::default());
    harness.fill_valid();

    let view = harness.app.view();
    assert!(view.fingerprint_enabled);
    assert_eq!(view.sign_text.as_deref(), Some("Burcunuz: Boğa"));

    assert_eq!(harness.hold(Duration::from_secs(5)), TickOutcome::Completed);
    assert_eq!(harness.audio.plays(), 1);

    let view = harness.app.view();
    assert_eq!(view.progress, 100);
    assert_eq!(view.modal.unwrap().message, FORTUNE_MESSAGES[2]);

    assert!(harness.app.close_modal());
    assert!(harness.app.view().modal.is_none());
}

#[test]
fn test_integration_release_halfway() {
    let mut harness = Harness::new(&Config::default());
    harness.fill_valid();

    assert_eq!(harness.hold(Duration::from_millis(2500)), TickOutcome::Advanced(50));
    assert!(harness.app.press_end());

    harness.app.advance(Duration::from_secs(10));
    let view = harness.app.view();
    assert_eq!(view.progress, 0);
    assert!(view.modal.is_none());
    assert!(!view.pressing);
    assert_eq!(harness.app.controller().state(), PressState::Idle);
}

#[test]
fn test_integration_invalid_form_never_presses() {
    let mut harness = Harness::new(&Config::default());
    harness.fill_valid();
    harness.app.set_field(Field::BirthMonth, "13");

    assert!(!harness.app.view().fingerprint_enabled);
    assert_eq!(harness.hold(Duration::from_secs(10)), TickOutcome::Ignored);
    assert_eq!(harness.app.view().progress, 0);
    assert_eq!(harness.audio.plays(), 0);
    assert_eq!(harness.random.draws(), 0);
}

#[test]
fn test_integration_cooldown_between_readings() {
    let mut harness = Harness::new(&Config::default());
    harness.fill_valid();

    harness.hold(Duration::from_secs(5));
    let first = harness.app.view().modal.unwrap().message;
    harness.app.press_end();
    harness.app.close_modal();

    // 10 seconds later the same fortune comes back
    harness.clock.advance(Duration::from_secs(5));
    harness.hold(Duration::from_secs(5));
    assert_eq!(harness.app.view().modal.unwrap().message, first);
    harness.app.press_end();
    harness.app.close_modal();
    assert_eq!(harness.random.draws(), 1);

    // after the window a new one is drawn
    harness.clock.advance(Duration::from_secs(60));
    harness.hold(Duration::from_secs(5));
    assert_eq!(harness.app.view().modal.unwrap().message, FORTUNE_MESSAGES[7]);
    assert_eq!(harness.random.draws(), 2);
    assert_eq!(harness.app.controller().selections(), 2);
}

#[test]
fn test_integration_audio_failure_is_not_fatal() {
    let mut harness = Harness::new(&Config::default());
    harness.fill_valid();
    harness.audio.fail_with("no output device");

    assert_eq!(harness.hold(Duration::from_secs(5)), TickOutcome::Completed);
    assert_eq!(harness.audio.plays(), 1);
}

#[test]
#[serial]
fn test_integration_missing_sound_file_rings_bell() {
    let (_temp_dir, config_path) =
        create_test_config_file("sound_file = \"/nonexistent/falbak/mystic.mp3\"\n");
    let config = Config::load_from_path(&config_path).unwrap();

    let player = create_player(&config, false);
    assert_eq!(player.player_name(), "bell");
}

#[test]
fn test_integration_open_modal_does_not_pin_fortune() {
    let mut harness = Harness::new(&Config::default());
    harness.fill_valid();

    harness.hold(Duration::from_secs(5));
    harness.app.press_end();
    assert_eq!(harness.app.view().modal.unwrap().message, FORTUNE_MESSAGES[2]);

    // the modal is never dismissed
    harness.clock.advance(Duration::from_secs(61));
    assert_eq!(harness.hold(Duration::from_secs(5)), TickOutcome::Completed);
    assert_eq!(harness.app.view().modal.unwrap().message, FORTUNE_MESSAGES[7]);
    assert_eq!(harness.random.draws(), 2);
}
