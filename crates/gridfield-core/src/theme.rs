//! User-facing appearance settings.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Tint applied to every widget glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    White,
    Cyan,
    Green,
    Magenta,
    Yellow,
    Red,
    Blue,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::White => ColorTheme::Cyan,
            ColorTheme::Cyan => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Yellow,
            ColorTheme::Yellow => ColorTheme::Red,
            ColorTheme::Red => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::White,
        }
    }

    /// Full-brightness RGB value; widgets scale it by their opacity.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorTheme::White => (255, 255, 255),
            ColorTheme::Cyan => (80, 220, 230),
            ColorTheme::Green => (90, 230, 120),
            ColorTheme::Magenta => (220, 110, 230),
            ColorTheme::Yellow => (240, 220, 100),
            ColorTheme::Red => (240, 100, 90),
            ColorTheme::Blue => (100, 150, 250),
        }
    }

    /// Convert theme to Ratatui Color.
    pub fn color(self) -> Color {
        let (r, g, b) = self.rgb();
        Color::Rgb(r, g, b)
    }
}

/// Global animation tempo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Cycle to the next speed.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Stretch or shrink a widget tick period.
    pub fn scale_period(self, period_ms: u64) -> u64 {
        let scaled = match self {
            AnimationSpeed::Slow => period_ms * 3 / 2,
            AnimationSpeed::Medium => period_ms,
            AnimationSpeed::Fast => period_ms * 3 / 5,
        };
        scaled.max(1)
    }

    pub fn label(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle_returns_to_start() {
        let mut theme = ColorTheme::default();
        for _ in 0..7 {
            theme = theme.next();
        }
        assert_eq!(theme, ColorTheme::White);
    }

    #[test]
    fn test_speed_scaling() {
        assert_eq!(AnimationSpeed::Medium.scale_period(250), 250);
        assert_eq!(AnimationSpeed::Slow.scale_period(100), 150);
        assert_eq!(AnimationSpeed::Fast.scale_period(100), 60);
        assert_eq!(AnimationSpeed::Fast.scale_period(1), 1);
    }
}
