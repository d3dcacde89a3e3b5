//! Sine-driven widgets: pulse grid, signal bars, waveform and fade chain.

use ratatui::{
    layout::Size,
    text::{Line, Span},
};

use crate::chars::{DOT, EIGHTHS, WAVE};
use crate::color::Tint;

/// Interleave `spans` with single-space gaps.
fn spaced(spans: impl IntoIterator<Item = Span<'static>>) -> Line<'static> {
    let mut out = Vec::new();
    for (i, span) in spans.into_iter().enumerate() {
        if i > 0 {
            out.push(Span::raw(" "));
        }
        out.push(span);
    }
    Line::from(out)
}

const PULSE_COLS: usize = 4;

/// Dot grid with a ripple spreading out from its centre.
#[derive(Debug, Clone)]
pub struct PulseGrid {
    rows: usize,
    tick: u32,
}

impl PulseGrid {
    pub fn new(size: Size, phase: u16) -> Self {
        Self {
            rows: (size.height as usize).clamp(2, 6),
            tick: phase as u32 * 10,
        }
    }

    pub fn step(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn opacity_at(&self, row: usize, col: usize) -> f32 {
        let cy = (self.rows as f32 - 1.0) / 2.0;
        let cx = (PULSE_COLS as f32 - 1.0) / 2.0;
        let dist = ((row as f32 - cy).powi(2) + (col as f32 - cx).powi(2)).sqrt();
        let wave = (self.tick as f32 * 0.12 - dist * 1.2).sin();
        0.03 + 0.22 * wave.max(0.0)
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        (0..self.rows)
            .map(|r| spaced((0..PULSE_COLS).map(|c| tint.glyph(DOT, self.opacity_at(r, c)))))
            .collect()
    }
}

/// Glyph for one row of a bar `eighths` tall, counting rows from the bottom.
fn bar_glyph(eighths: usize, row_from_bottom: usize) -> char {
    let below = row_from_bottom * 8;
    match eighths.saturating_sub(below) {
        0 => ' ',
        n if n >= 8 => EIGHTHS[7],
        n => EIGHTHS[n - 1],
    }
}

const SIGNAL_BARS: usize = 5;
const SIGNAL_OPACITY: f32 = 0.15;
/// Shortest bar as a fraction of full height.
const SIGNAL_FLOOR: f32 = 3.0 / 36.0;

/// Equalizer of bars rising and falling out of phase.
#[derive(Debug, Clone)]
pub struct SignalBars {
    rows: usize,
    tick: u32,
}

impl SignalBars {
    pub fn new(size: Size) -> Self {
        Self {
            rows: (size.height as usize).clamp(1, 4),
            tick: 0,
        }
    }

    pub fn step(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Height of bar `i` in eighths of a row.
    pub fn level(&self, i: usize) -> usize {
        let wave = (self.tick as f32 * 0.1 - i as f32 * 1.3).sin();
        let fraction = SIGNAL_FLOOR + (1.0 - SIGNAL_FLOOR) * (wave * 0.5 + 0.5);
        ((fraction * (self.rows * 8) as f32).round() as usize).max(1)
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        (0..self.rows)
            .rev()
            .map(|row| {
                spaced(
                    (0..SIGNAL_BARS).map(|i| tint.glyph(bar_glyph(self.level(i), row), SIGNAL_OPACITY)),
                )
            })
            .collect()
    }
}

const WAVE_BARS: usize = 12;
const WAVE_OPACITY: f32 = 0.12;

/// Row of thin bars stretching around a centre line.
#[derive(Debug, Clone)]
pub struct Waveform {
    rows: usize,
    bars: usize,
    tick: u32,
}

impl Waveform {
    pub fn new(size: Size) -> Self {
        Self {
            rows: (size.height as usize).clamp(1, 5),
            bars: (size.width as usize).clamp(1, WAVE_BARS),
            tick: 0,
        }
    }

    pub fn step(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Rows covered by bar `i`, always at least one.
    pub fn span(&self, i: usize) -> usize {
        let wave = (self.tick as f32 * 0.15 - i as f32 * 0.6).sin();
        let fraction = 0.1 + 0.7 * (wave * 0.5 + 0.5);
        ((fraction * self.rows as f32).round() as usize).clamp(1, self.rows)
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        let spans: Vec<(usize, usize)> = (0..self.bars)
            .map(|i| {
                let len = self.span(i);
                let top = (self.rows - len) / 2;
                (top, top + len)
            })
            .collect();
        (0..self.rows)
            .map(|row| {
                let glyphs: Vec<Span> = spans
                    .iter()
                    .map(|&(top, bottom)| {
                        if (top..bottom).contains(&row) {
                            tint.glyph(WAVE, WAVE_OPACITY)
                        } else {
                            Span::raw(" ")
                        }
                    })
                    .collect();
                Line::from(glyphs)
            })
            .collect()
    }
}

const CHAIN_LEN: usize = 6;

/// Row of dots with a bright spot sweeping across.
#[derive(Debug, Clone)]
pub struct FadeChain {
    count: usize,
    tick: usize,
}

impl FadeChain {
    pub fn new(size: Size, phase: u16) -> Self {
        Self {
            count: ((size.width as usize + 1) / 2).clamp(2, CHAIN_LEN),
            tick: phase as usize,
        }
    }

    pub fn step(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn active(&self) -> usize {
        self.tick % self.count
    }

    pub fn opacity_at(&self, i: usize) -> f32 {
        match i.abs_diff(self.active()) {
            0 => 0.3,
            1 => 0.12,
            _ => 0.03,
        }
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        vec![spaced((0..self.count).map(|i| tint.glyph(DOT, self.opacity_at(i))))]
    }
}
