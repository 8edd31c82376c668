//! Light and dark color palettes.

use crossterm::style::Color;

use crate::utils::interpolate_f32;

/// Selected theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Theme::Dark } else { Theme::Light }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: Rgb::from_hex(0x1e0033),
                text: Rgb::from_hex(0xffffff),
                placeholder: Rgb::from_hex(0xcccccc),
                ..Palette::SHARED
            },
            Theme::Light => Palette {
                background: Rgb::from_hex(0xffffff),
                text: Rgb::from_hex(0x000000),
                placeholder: Rgb::from_hex(0x333333),
                ..Palette::SHARED
            },
        }
    }
}

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub fn to_hex_string(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Blend towards `other`; `amount` 0 keeps `self`, 1 gives `other`.
    pub fn mix(&self, other: Rgb, amount: f32) -> Rgb {
        let channel = |a: u8, b: u8| interpolate_f32(a as f32, b as f32, amount).round() as u8;
        Rgb {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// Colors used by the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub text: Rgb,
    pub placeholder: Rgb,
    pub accent: Rgb,       // enabled fingerprint, loading bar, theme button
    pub success: Rgb,      // completed bar, close button
    pub disabled: Rgb,     // fingerprint while the form is invalid
    pub bar_track: Rgb,
    pub header_glow: Rgb,
    pub modal_background: Rgb,
    pub modal_text: Rgb,
}

impl Palette {
    const SHARED: Palette = Palette {
        background: Rgb::from_hex(0x000000),
        text: Rgb::from_hex(0x000000),
        placeholder: Rgb::from_hex(0x000000),
        accent: Rgb::from_hex(0xff9900),
        success: Rgb::from_hex(0x4caf50),
        disabled: Rgb::from_hex(0xcccccc),
        bar_track: Rgb::from_hex(0xcccccc),
        header_glow: Rgb::from_hex(0xffcc00),
        modal_background: Rgb::from_hex(0x1e0033),
        modal_text: Rgb::from_hex(0xffffff),
    };

    /// Bar color for a progress value: accent while loading, success when full.
    pub fn progress_color(&self, progress: u8) -> Rgb {
        if progress >= crate::constants::PROGRESS_COMPLETE {
            self.success
        } else {
            self.accent
        }
    }

    pub fn fingerprint_color(&self, enabled: bool) -> Rgb {
        if enabled { self.accent } else { self.disabled }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(Theme::from_dark_mode(true), Theme::Dark);
        assert_eq!(Theme::from_dark_mode(false), Theme::Light);
    }

    #[test]
    fn test_palette_colors() {
        assert_eq!(Theme::Dark.palette().background.to_hex_string(), "#1e0033");
        assert_eq!(Theme::Light.palette().background.to_hex_string(), "#ffffff");
        assert_eq!(Theme::Light.palette().text.to_hex_string(), "#000000");
        assert_eq!(Theme::Dark.palette().placeholder.to_hex_string(), "#cccccc");
        assert_eq!(Theme::Light.palette().accent, Theme::Dark.palette().accent);
    }

    #[test]
    fn test_progress_and_fingerprint_colors() {
        let palette = Theme::Dark.palette();
        assert_eq!(palette.progress_color(99).to_hex_string(), "#ff9900");
        assert_eq!(palette.progress_color(100).to_hex_string(), "#4caf50");
        assert_eq!(palette.fingerprint_color(false).to_hex_string(), "#cccccc");
    }

    #[test]
    fn test_mix() {
        let black = Rgb::from_hex(0x000000);
        let white = Rgb::from_hex(0xffffff);
        assert_eq!(black.mix(white, 0.0), black);
        assert_eq!(black.mix(white, 1.0), white);
        assert_eq!(black.mix(white, 0.5).to_hex_string(), "#808080");
        assert_eq!(black.mix(white, 2.0), white);
    }

    #[test]
    fn test_crossterm_conversion() {
        let color: Color = Rgb::from_hex(0x4caf50).into();
        assert_eq!(color, Color::Rgb { r: 0x4c, g: 0xaf, b: 0x50 });
    }
}
