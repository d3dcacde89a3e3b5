//! Opacity-to-colour mapping for widget glyphs.

use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// Opacities are tuned for white-on-black at low alpha; terminals need them
/// brighter to read as the same faint texture.
const GAIN: f32 = 2.2;

/// Base colour and fade level applied to every glyph of one widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    rgb: (u8, u8, u8),
    fade: f32,
}

impl Tint {
    pub fn new(rgb: (u8, u8, u8)) -> Self {
        Self { rgb, fade: 1.0 }
    }

    /// Same colour at a fade level in `0.0..=1.0`.
    pub fn with_fade(self, fade: f32) -> Self {
        Self {
            fade: fade.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn fade(&self) -> f32 {
        self.fade
    }

    /// Colour for a glyph drawn at `opacity`.
    pub fn color(&self, opacity: f32) -> Color {
        let alpha = (opacity * GAIN * self.fade).clamp(0.0, 1.0);
        let scale = |v: u8| (v as f32 * alpha).round() as u8;
        Color::Rgb(scale(self.rgb.0), scale(self.rgb.1), scale(self.rgb.2))
    }

    pub fn style(&self, opacity: f32) -> Style {
        Style::new().fg(self.color(opacity))
    }

    pub fn glyph(&self, ch: char, opacity: f32) -> Span<'static> {
        Span::styled(ch.to_string(), self.style(opacity))
    }
}
