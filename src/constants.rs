//! Application constants and default values for falbak.
//!
//! This module contains the configuration defaults, validation limits,
//! fixed Turkish texts and operational constants used throughout the application.

// ═══ Application Configuration Defaults ═══
// These values are used when config options are not specified by the user

pub const DEFAULT_DARK_MODE: bool = true; // The screen opens in the dark theme
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50; // milliseconds between progress increments
pub const DEFAULT_COOLDOWN_SECS: u64 = 60; // seconds before a new fortune may be drawn
pub const DEFAULT_SOUND: bool = true;
pub const DEFAULT_RELEASE_TIMEOUT_MS: u64 = 700; // key auto-repeat silence treated as release
pub const DEFAULT_AUDIO_COMMANDS: &[&str] = &["paplay", "aplay", "afplay"]; // tried in order

// ═══ Validation Limits ═══
// These limits keep user inputs within sensible ranges

pub const MINIMUM_TICK_INTERVAL_MS: u64 = 10;
pub const MAXIMUM_TICK_INTERVAL_MS: u64 = 500; // 100 ticks at 500ms is already 50 seconds

pub const MINIMUM_COOLDOWN_SECS: u64 = 1;
pub const MAXIMUM_COOLDOWN_SECS: u64 = 3600;

pub const MINIMUM_RELEASE_TIMEOUT_MS: u64 = 100;
pub const MAXIMUM_RELEASE_TIMEOUT_MS: u64 = 3000;

// ═══ Form Rules ═══

pub const MINIMUM_NAME_LENGTH: usize = 3; // applies to name and surname
pub const BIRTH_YEAR_LENGTH: usize = 4;
pub const BIRTH_MONTH_MAX_LENGTH: usize = 2;
pub const BIRTH_DAY_MAX_LENGTH: usize = 2;
pub const MINIMUM_MONTH: u32 = 1;
pub const MAXIMUM_MONTH: u32 = 12;
pub const MINIMUM_DAY: u32 = 1;
pub const MAXIMUM_DAY: u32 = 31; // not checked against the month's real length

// ═══ Press-and-Hold Progress ═══

pub const PROGRESS_COMPLETE: u8 = 100;
pub const PROGRESS_STEP: u8 = 1;

// ═══ Modal Reveal Spring ═══
// Friction/tension pair of the entrance animation, converted to
// stiffness/damping by `reveal::SpringAnimation::from_friction_tension`.

pub const REVEAL_FRICTION: f32 = 5.0;
pub const REVEAL_TENSION: f32 = 50.0;
pub const REVEAL_REST_THRESHOLD: f32 = 0.001; // displacement and speed
pub const REVEAL_MAX_STEP_MS: u64 = 4; // integration sub-step

// ═══ Fortune Messages ═══

pub const FORTUNE_MESSAGES: [&str; 10] = [
    "Geleceğinde büyük değişimler var, ama bu değişimler seni daha güçlü yapacak.",
    "Bir süredir içinde sıkışmış hissettiğini biliyorum, ancak yakında özgürlüğünü bulacaksın.",
    "Kalbinde bir çatlak var, ama sevgi seni iyileştirecek.",
    "Geçmişte yaşadığın bir kırgınlık seni geride tutuyor, ancak şifa yolda.",
    "Yolunda bir engel var, ama senin azmin onu aşmanı sağlayacak.",
    "Gözlerinde bir parıltı görüyorum, bu senin içindeki potansiyelin işareti.",
    "Bugün alacağın bir karar, gelecekte büyük bir fırsata dönüşecek.",
    "Bir sırrın peşindesin, ama unutma, gerçeğin ortaya çıkması için zaman lazım.",
    "Yakında bir kişi hayatına girecek ve sana büyük bir ilham verecek.",
    "Hayatında önemli bir dönüm noktasına geldin, ama doğru yolu bulmak için kalbini dinlemelisin!",
];

// ═══ User Interface Texts ═══

pub const HEADER_TEXT: &str = "Parmağını okut falına bak!";
pub const NAME_PLACEHOLDER: &str = "Ad";
pub const SURNAME_PLACEHOLDER: &str = "Soyad";
pub const YEAR_PLACEHOLDER: &str = "Yıl";
pub const MONTH_PLACEHOLDER: &str = "Ay";
pub const DAY_PLACEHOLDER: &str = "Gün";
pub const ZODIAC_LABEL: &str = "Burcunuz";
pub const FINGERPRINT_LABEL: &str = "Parmak izinizi okuturken bekleyin...";
pub const PROGRESS_LABEL: &str = "Yükleniyor";
pub const CLOSE_BUTTON_TEXT: &str = "Kapat";
pub const THEME_BUTTON_TEXT: &str = "Tema Değiştir";

pub const PROGRESS_BAR_WIDTH: usize = 40; // Characters width for progress bar display
pub const MODAL_WIDTH: usize = 56;

// ═══ Operational Timing Constants ═══

pub const INPUT_POLL_INTERVAL_MS: u64 = 10; // upper bound on event wait per frame

// ═══ Exit Codes ═══

pub const EXIT_FAILURE: i32 = 1; // General failure
