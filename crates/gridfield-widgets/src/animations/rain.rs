//! Falling-character rain.

use rand::Rng;
use ratatui::{
    layout::Size,
    text::{Line, Span},
};

use crate::chars::CHAR_POOL;
use crate::color::Tint;

/// Rows a speed-1.0 drop falls per tick.
const FALL_PER_TICK: f32 = 0.5;
const HEAD_OPACITY: f32 = 0.35;
const TRAIL_OPACITY: f32 = 0.2;
const MAX_COLUMNS: usize = 6;

/// State for a single rain column.
#[derive(Debug, Clone)]
pub struct RainColumn {
    /// Current y position of the raindrop head.
    pub y: f32,
    /// Speed multiplier for this column.
    pub speed: f32,
    /// Length of the trail.
    pub trail_length: usize,
    /// Seed for character generation.
    pub char_seed: usize,
}

/// Rain widget: a few columns of falling glyphs.
#[derive(Debug, Clone)]
pub struct Rain {
    columns: Vec<RainColumn>,
    height: u16,
}

impl Rain {
    pub fn new<R: Rng + ?Sized>(size: Size, rng: &mut R) -> Self {
        let height = size.height.max(1);
        let count = ((size.width as usize + 1) / 2).clamp(1, MAX_COLUMNS);
        let columns = (0..count)
            .map(|_| RainColumn {
                // Stagger start positions so columns don't all start at top
                y: -(rng.random_range(0..height as usize * 2 + 1) as f32),
                speed: rng.random_range(0.4..1.0),
                trail_length: rng.random_range(2..=(height as usize / 2 + 2)),
                char_seed: rng.random_range(0..CHAR_POOL.len()),
            })
            .collect();
        Self { columns, height }
    }

    pub fn columns(&self) -> &[RainColumn] {
        &self.columns
    }

    /// Move every drop down; drops that leave the bottom restart above the top.
    pub fn step(&mut self) {
        for col in &mut self.columns {
            col.y += FALL_PER_TICK * col.speed;
            if col.y > self.height as f32 + col.trail_length as f32 {
                col.y = -(col.trail_length as f32);
                col.char_seed = col.char_seed.wrapping_add(1);
            }
        }
    }

    fn glyph(&self, col: &RainColumn, y: u16, tint: Tint) -> Span<'static> {
        let y = y as f32;
        let head_y = col.y;
        let tail_y = head_y - col.trail_length as f32;

        if y < tail_y || y > head_y {
            return Span::raw(" ");
        }

        let distance_from_head = head_y - y;
        let intensity = 1.0 - (distance_from_head / col.trail_length as f32);
        let char_idx = col.char_seed.wrapping_add(y as usize) % CHAR_POOL.len();
        let opacity = if distance_from_head < 1.0 {
            HEAD_OPACITY
        } else {
            TRAIL_OPACITY * intensity
        };
        tint.glyph(CHAR_POOL[char_idx], opacity)
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        (0..self.height)
            .map(|y| {
                let mut spans = Vec::with_capacity(self.columns.len() * 2);
                for (i, col) in self.columns.iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::raw(" "));
                    }
                    spans.push(self.glyph(col, y, tint));
                }
                Line::from(spans)
            })
            .collect()
    }
}
