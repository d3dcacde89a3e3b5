//! The closed set of widget kinds that can occupy a grid cell.

use serde::{Deserialize, Serialize};

/// One kind of self-contained decorative animation.
///
/// Parameters only seed the widget's own animation; two instances never share
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum WidgetKind {
    /// Trail of lit dots tracing the perimeter of a dot grid.
    DotMatrix { offset: u16 },
    /// Vertical column of glyphs that mutate one at a time.
    CharColumn,
    /// Radial ripple across a small dot grid.
    PulseGrid { phase: u16 },
    /// Equalizer bars.
    SignalBars,
    /// Braille spinner.
    Spinner,
    /// Satellite dot circling a centre dot.
    Orbit,
    /// Conway's Game of Life on a small torus.
    LifeGrid,
    /// Oscillating vertical bars.
    Waveform,
    /// A bright spot sweeping along a row of dots.
    FadeChain { phase: u16 },
    /// Ring expanding out of a centre dot.
    Breathe,
    /// Stripes toggling on and off.
    BarCode,
    /// Static dot.
    Dot,
    /// Static square.
    Square,
    /// Falling-character rain.
    Rain,
    /// Phrases typed out and erased.
    Typewriter { phrase: u16 },
    /// Self-playing block stacking game.
    Tetris,
    /// Word resolving out of random glyphs.
    Scramble { word: u16 },
    /// Sparse block of pulsing glyphs.
    AsciiPulse,
}

impl WidgetKind {
    /// Number of distinct kinds.
    pub const COUNT: usize = 18;

    /// Build the kind at `index` (modulo [`Self::COUNT`]), using `seed` for
    /// kinds that take a parameter.
    pub fn from_index(index: usize, seed: u16) -> Self {
        match index % Self::COUNT {
            0 => WidgetKind::DotMatrix { offset: seed },
            1 => WidgetKind::CharColumn,
            2 => WidgetKind::PulseGrid { phase: seed },
            3 => WidgetKind::SignalBars,
            4 => WidgetKind::Spinner,
            5 => WidgetKind::Orbit,
            6 => WidgetKind::LifeGrid,
            7 => WidgetKind::Waveform,
            8 => WidgetKind::FadeChain { phase: seed },
            9 => WidgetKind::Breathe,
            10 => WidgetKind::BarCode,
            11 => WidgetKind::Dot,
            12 => WidgetKind::Square,
            13 => WidgetKind::Rain,
            14 => WidgetKind::Typewriter { phrase: seed },
            15 => WidgetKind::Tetris,
            16 => WidgetKind::Scramble { word: seed },
            _ => WidgetKind::AsciiPulse,
        }
    }

    /// Position of this kind in [`Self::from_index`] order.
    pub fn index(self) -> usize {
        match self {
            WidgetKind::DotMatrix { .. } => 0,
            WidgetKind::CharColumn => 1,
            WidgetKind::PulseGrid { .. } => 2,
            WidgetKind::SignalBars => 3,
            WidgetKind::Spinner => 4,
            WidgetKind::Orbit => 5,
            WidgetKind::LifeGrid => 6,
            WidgetKind::Waveform => 7,
            WidgetKind::FadeChain { .. } => 8,
            WidgetKind::Breathe => 9,
            WidgetKind::BarCode => 10,
            WidgetKind::Dot => 11,
            WidgetKind::Square => 12,
            WidgetKind::Rain => 13,
            WidgetKind::Typewriter { .. } => 14,
            WidgetKind::Tetris => 15,
            WidgetKind::Scramble { .. } => 16,
            WidgetKind::AsciiPulse => 17,
        }
    }

    /// Kebab-case name, matching the config file spelling.
    pub fn name(self) -> &'static str {
        match self {
            WidgetKind::DotMatrix { .. } => "dot-matrix",
            WidgetKind::CharColumn => "char-column",
            WidgetKind::PulseGrid { .. } => "pulse-grid",
            WidgetKind::SignalBars => "signal-bars",
            WidgetKind::Spinner => "spinner",
            WidgetKind::Orbit => "orbit",
            WidgetKind::LifeGrid => "life-grid",
            WidgetKind::Waveform => "waveform",
            WidgetKind::FadeChain { .. } => "fade-chain",
            WidgetKind::Breathe => "breathe",
            WidgetKind::BarCode => "bar-code",
            WidgetKind::Dot => "dot",
            WidgetKind::Square => "square",
            WidgetKind::Rain => "rain",
            WidgetKind::Typewriter { .. } => "typewriter",
            WidgetKind::Tetris => "tetris",
            WidgetKind::Scramble { .. } => "scramble",
            WidgetKind::AsciiPulse => "ascii-pulse",
        }
    }
}
