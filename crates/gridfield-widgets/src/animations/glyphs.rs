//! Text-based widgets: mutating glyph column, bar code, scrambled words and
//! the pulsing ASCII block.

use std::f32::consts::PI;

use rand::Rng;
use ratatui::{
    layout::Size,
    text::{Line, Span},
};

use crate::chars::{ASCII_CHARSET, CHAR_POOL, SCRAMBLE_CHARS, STRIPE, WORDS};
use crate::color::Tint;

fn pick<R: Rng + ?Sized>(pool: &[char], rng: &mut R) -> char {
    pool[rng.random_range(0..pool.len())]
}

const COLUMN_OPACITY: f32 = 0.15;
const MAX_COLUMN_HEIGHT: usize = 14;

/// Vertical column of glyphs; one random position changes per tick.
#[derive(Debug, Clone)]
pub struct CharColumn {
    glyphs: Vec<char>,
}

impl CharColumn {
    pub fn new<R: Rng + ?Sized>(size: Size, rng: &mut R) -> Self {
        let height = (size.height as usize).clamp(1, MAX_COLUMN_HEIGHT);
        Self {
            glyphs: (0..height).map(|_| pick(CHAR_POOL, rng)).collect(),
        }
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let i = rng.random_range(0..self.glyphs.len());
        self.glyphs[i] = pick(CHAR_POOL, rng);
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        self.glyphs
            .iter()
            .map(|&ch| Line::from(tint.glyph(ch, COLUMN_OPACITY)))
            .collect()
    }
}

const BAR_COUNT: usize = 8;
const BAR_ON: f32 = 0.15;
const BAR_OFF: f32 = 0.04;
const MAX_BAR_HEIGHT: usize = 4;

/// Row of stripes that flip between bright and dim one at a time.
#[derive(Debug, Clone)]
pub struct BarCode {
    bars: Vec<bool>,
    height: usize,
}

impl BarCode {
    pub fn new<R: Rng + ?Sized>(size: Size, rng: &mut R) -> Self {
        let count = (size.width as usize).clamp(1, BAR_COUNT);
        Self {
            bars: (0..count).map(|_| rng.random_bool(0.5)).collect(),
            height: (size.height as usize).clamp(1, MAX_BAR_HEIGHT),
        }
    }

    pub fn bars(&self) -> &[bool] {
        &self.bars
    }

    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let i = rng.random_range(0..self.bars.len());
        self.bars[i] = !self.bars[i];
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        let row: Vec<Span> = self
            .bars
            .iter()
            .map(|&on| tint.glyph(STRIPE, if on { BAR_ON } else { BAR_OFF }))
            .collect();
        vec![Line::from(row); self.height]
    }
}

/// Ticks a word takes to resolve completely.
const RESOLVE_TICKS: usize = 14;
/// Ticks a resolved word stays before the next one starts.
const WORD_HOLD_TICKS: usize = 30;
const RESOLVED_OPACITY: f32 = 0.25;
const SCRAMBLED_OPACITY: f32 = 0.12;

/// A word that resolves left to right out of random glyphs.
#[derive(Debug, Clone)]
pub struct Scramble {
    word: usize,
    tick: usize,
    noise: Vec<char>,
}

impl Scramble {
    pub fn new<R: Rng + ?Sized>(word: u16, rng: &mut R) -> Self {
        let mut scramble = Self {
            word: word as usize % WORDS.len(),
            tick: 0,
            noise: Vec::new(),
        };
        scramble.reroll(rng);
        scramble
    }

    pub fn word(&self) -> &'static str {
        WORDS[self.word]
    }

    /// Leading characters of the word already resolved.
    pub fn resolved(&self) -> usize {
        let len = self.word().chars().count();
        (self.tick * len).div_ceil(RESOLVE_TICKS).min(len)
    }

    fn reroll<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let len = self.word().chars().count();
        self.noise = (0..len).map(|_| pick(SCRAMBLE_CHARS, rng)).collect();
    }

    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tick += 1;
        if self.tick > RESOLVE_TICKS + WORD_HOLD_TICKS {
            self.tick = 0;
            self.word = (self.word + 1) % WORDS.len();
        }
        self.reroll(rng);
    }

    /// Current text: resolved prefix followed by noise.
    pub fn text(&self) -> String {
        let resolved = self.resolved();
        self.word()
            .chars()
            .take(resolved)
            .chain(self.noise.iter().skip(resolved).copied())
            .collect()
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        let resolved = self.resolved();
        let text = self.text();
        let head: String = text.chars().take(resolved).collect();
        let tail: String = text.chars().skip(resolved).collect();
        vec![Line::from(vec![
            Span::styled(head, tint.style(RESOLVED_OPACITY)),
            Span::styled(tail, tint.style(SCRAMBLED_OPACITY)),
        ])]
    }
}

const ASCII_DENSITY: f64 = 0.2;
const ASCII_MAX_ROWS: usize = 4;
const ASCII_MAX_COLS: usize = 28;
const PULSE_BASE: f32 = 0.05;
const PULSE_SWING: f32 = 0.3;

/// One lit position in the ASCII block, timed in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub ch: char,
    pub delay: u32,
    pub duration: u32,
}

impl Pulse {
    pub fn opacity(&self, tick: u32) -> f32 {
        if tick < self.delay {
            return PULSE_BASE;
        }
        let phase = ((tick - self.delay) % self.duration) as f32 / self.duration as f32;
        PULSE_BASE + PULSE_SWING * (PI * phase).sin()
    }
}

/// Sparse block of glyphs, each pulsing on its own schedule.
#[derive(Debug, Clone)]
pub struct AsciiPulse {
    cells: Vec<Vec<Option<Pulse>>>,
    tick: u32,
}

impl AsciiPulse {
    pub fn new<R: Rng + ?Sized>(size: Size, rng: &mut R) -> Self {
        let rows = (size.height as usize).clamp(1, ASCII_MAX_ROWS);
        let cols = (size.width as usize).clamp(1, ASCII_MAX_COLS);
        let cells = (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| {
                        rng.random_bool(ASCII_DENSITY).then(|| Pulse {
                            ch: pick(ASCII_CHARSET, rng),
                            // 0-8 s delay, 2-7 s duration at 100 ms per tick
                            delay: rng.random_range(0..80),
                            duration: rng.random_range(20..70),
                        })
                    })
                    .collect()
            })
            .collect();
        Self { cells, tick: 0 }
    }

    pub fn pulses(&self) -> impl Iterator<Item = &Pulse> {
        self.cells.iter().flatten().flatten()
    }

    pub fn step(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        self.cells
            .iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| match cell {
                        Some(pulse) => tint.glyph(pulse.ch, pulse.opacity(self.tick)),
                        None => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn white() -> Tint {
        Tint::new((255, 255, 255))
    }

    #[test]
    fn test_char_column_changes_at_most_one_glyph() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut column = CharColumn::new(Size::new(1, 8), &mut rng);
        assert_eq!(column.glyphs().len(), 8);
        for _ in 0..50 {
            let before = column.glyphs().to_vec();
            column.step(&mut rng);
            let changed = before
                .iter()
                .zip(column.glyphs())
                .filter(|(a, b)| a != b)
                .count();
            assert!(changed <= 1);
            assert!(column.glyphs().iter().all(|ch| CHAR_POOL.contains(ch)));
        }
        assert_eq!(column.lines(white()).len(), 8);
    }

    #[test]
    fn test_bar_code_flips_exactly_one_bar() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut bars = BarCode::new(Size::new(20, 10), &mut rng);
        assert_eq!(bars.bars().len(), BAR_COUNT);
        for _ in 0..20 {
            let before = bars.bars().to_vec();
            bars.step(&mut rng);
            let flipped = before.iter().zip(bars.bars()).filter(|(a, b)| a != b).count();
            assert_eq!(flipped, 1);
        }
        let lines = bars.lines(white());
        assert_eq!(lines.len(), MAX_BAR_HEIGHT);
        assert!(lines.iter().all(|l| l.width() == BAR_COUNT));
    }

    #[test]
    fn test_narrow_bar_code_fits() {
        let mut rng = SmallRng::seed_from_u64(3);
        let bars = BarCode::new(Size::new(3, 1), &mut rng);
        assert_eq!(bars.bars().len(), 3);
        assert_eq!(bars.lines(white()).len(), 1);
    }

    #[test]
    fn test_scramble_resolves_then_moves_to_next_word() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut scramble = Scramble::new(1, &mut rng);
        assert_eq!(scramble.word(), WORDS[1]);
        assert_eq!(scramble.resolved(), 0);

        let mut last = 0;
        for _ in 0..RESOLVE_TICKS {
            scramble.step(&mut rng);
            assert!(scramble.resolved() >= last);
            last = scramble.resolved();
            assert!(scramble.text().starts_with(&WORDS[1][..last]));
            assert_eq!(scramble.text().chars().count(), WORDS[1].len());
        }
        assert_eq!(scramble.text(), WORDS[1]);

        for _ in 0..=WORD_HOLD_TICKS {
            scramble.step(&mut rng);
        }
        assert_eq!(scramble.word(), WORDS[2]);
        assert_eq!(scramble.resolved(), 0);
    }

    #[test]
    fn test_pulse_waits_for_its_delay() {
        let pulse = Pulse {
            ch: '#',
            delay: 10,
            duration: 20,
        };
        assert_eq!(pulse.opacity(0), PULSE_BASE);
        assert_eq!(pulse.opacity(10), PULSE_BASE);
        assert!((pulse.opacity(20) - (PULSE_BASE + PULSE_SWING)).abs() < 1e-6);
        assert!(pulse.opacity(29) < pulse.opacity(20));
        assert_eq!(pulse.opacity(30), PULSE_BASE);
    }

    #[test]
    fn test_ascii_block_is_sparse_and_bounded() {
        let mut rng = SmallRng::seed_from_u64(5);
        let block = AsciiPulse::new(Size::new(60, 10), &mut rng);
        let lines = block.lines(white());
        assert_eq!(lines.len(), ASCII_MAX_ROWS);
        assert!(lines.iter().all(|l| l.width() == ASCII_MAX_COLS));

        let lit = block.pulses().count();
        assert!(lit > 0 && lit < ASCII_MAX_ROWS * ASCII_MAX_COLS / 2);
        for pulse in block.pulses() {
            assert!(pulse.delay < 80);
            assert!((20..70).contains(&pulse.duration));
            assert!(ASCII_CHARSET.contains(&pulse.ch));
        }
    }
}
