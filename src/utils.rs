//! Utility functions shared across the codebase.
//!
//! Interpolation, progress bar drawing, word wrapping for the modal text and
//! path display helpers.

use std::path::Path;

/// Interpolate between two f32 values based on progress (0.0 to 1.0).
///
/// # Arguments
/// * `start` - Starting value (returned when progress = 0.0)
/// * `end` - Ending value (returned when progress = 1.0)
/// * `progress` - Interpolation progress, automatically clamped to [0.0, 1.0]
///
/// # Examples
/// ```
/// use falbak::utils::interpolate_f32;
/// assert_eq!(interpolate_f32(0.0, 1.0, 0.5), 0.5);
/// assert_eq!(interpolate_f32(0.0, 1.0, 1.7), 1.0);
/// ```
pub fn interpolate_f32(start: f32, end: f32, progress: f32) -> f32 {
    start + (end - start) * progress.clamp(0.0, 1.0)
}

/// Render a fixed-width progress bar for a 0-100 percentage.
///
/// The filled part ends in `>` while loading and is all `=` once complete.
///
/// # Examples
/// ```
/// use falbak::utils::render_progress_bar;
/// assert_eq!(render_progress_bar(0, 4), "    ");
/// assert_eq!(render_progress_bar(50, 4), "=>  ");
/// assert_eq!(render_progress_bar(100, 4), "====");
/// ```
pub fn render_progress_bar(percent: u8, width: usize) -> String {
    let percent = percent.min(100) as usize;
    let filled = width * percent / 100;
    let empty = width - filled;

    if filled == 0 {
        " ".repeat(width)
    } else if percent == 100 {
        "=".repeat(width)
    } else {
        format!("{}>{}", "=".repeat(filled - 1), " ".repeat(empty))
    }
}

/// Greedy word wrap on character counts.
///
/// Words longer than `width` are placed on their own line unbroken.
///
/// # Examples
/// ```
/// use falbak::utils::wrap_text;
/// assert_eq!(wrap_text("bir iki üç", 7), vec!["bir iki", "üç"]);
/// ```
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Show a path with the home directory replaced by `~`.
pub fn path_for_display(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_f32_basic() {
        assert_eq!(interpolate_f32(0.0, 100.0, 0.0), 0.0);
        assert_eq!(interpolate_f32(0.0, 100.0, 1.0), 100.0);
        assert_eq!(interpolate_f32(0.0, 100.0, 0.5), 50.0);
    }

    #[test]
    fn test_interpolate_f32_clamping() {
        assert_eq!(interpolate_f32(0.0, 100.0, -0.5), 0.0);
        assert_eq!(interpolate_f32(0.0, 100.0, 1.5), 100.0);
    }

    #[test]
    fn test_progress_bar_width_is_constant() {
        for percent in [0u8, 1, 33, 50, 99, 100, 150] {
            assert_eq!(render_progress_bar(percent, 40).chars().count(), 40);
        }
    }

    #[test]
    fn test_progress_bar_completion() {
        assert_eq!(render_progress_bar(100, 10), "==========");
        assert_eq!(render_progress_bar(99, 10), "========> ");
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let text = crate::constants::FORTUNE_MESSAGES[9];
        for line in wrap_text(text, 30) {
            assert!(line.chars().count() <= 30, "line too long: {}", line);
        }
        assert_eq!(wrap_text(text, 30).join(" "), text);
    }

    #[test]
    fn test_wrap_text_long_word() {
        assert_eq!(wrap_text("a uzunkelime b", 4), vec!["a", "uzunkelime", "b"]);
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn test_path_for_display_outside_home() {
        assert_eq!(path_for_display(Path::new("/etc/falbak.toml")), "/etc/falbak.toml");
    }
}
