//! Dot matrix with a short trail tracing its perimeter.

use ratatui::{
    layout::Size,
    text::{Line, Span},
};

use crate::chars::BLOCK;
use crate::color::Tint;

/// Opacity of the trail, head first.
const TRAIL: [f32; 3] = [0.35, 0.2, 0.1];
/// Opacity of an unlit dot.
const BASE_OPACITY: f32 = 0.04;
const MAX_COLS: usize = 5;
const MAX_ROWS: usize = 6;

/// Perimeter-tracing dot matrix.
#[derive(Debug, Clone)]
pub struct DotMatrix {
    rows: usize,
    cols: usize,
    /// Perimeter cells in clockwise order starting top-left.
    perimeter: Vec<(usize, usize)>,
    tick: usize,
}

impl DotMatrix {
    pub fn new(size: Size, offset: u16) -> Self {
        let cols = ((size.width as usize + 1) / 2).clamp(2, MAX_COLS);
        let rows = (size.height as usize).clamp(2, MAX_ROWS);
        Self {
            rows,
            cols,
            perimeter: perimeter(rows, cols),
            tick: offset as usize,
        }
    }

    pub fn step(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Cell currently at the head of the trail.
    pub fn head(&self) -> (usize, usize) {
        self.perimeter[self.tick % self.perimeter.len()]
    }

    pub fn opacity_at(&self, row: usize, col: usize) -> f32 {
        let len = self.perimeter.len();
        for (age, opacity) in TRAIL.iter().enumerate() {
            let idx = (self.tick % len + len - age) % len;
            if self.perimeter[idx] == (row, col) {
                return *opacity;
            }
        }
        BASE_OPACITY
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        (0..self.rows)
            .map(|r| {
                let mut spans = Vec::with_capacity(self.cols * 2);
                for c in 0..self.cols {
                    if c > 0 {
                        spans.push(Span::raw(" "));
                    }
                    spans.push(tint.glyph(BLOCK, self.opacity_at(r, c)));
                }
                Line::from(spans)
            })
            .collect()
    }
}

/// Clockwise perimeter of a `rows` x `cols` grid, starting at the top-left.
fn perimeter(rows: usize, cols: usize) -> Vec<(usize, usize)> {
    let mut cells = Vec::with_capacity(2 * (rows + cols));
    for c in 0..cols {
        cells.push((0, c));
    }
    for r in 1..rows {
        cells.push((r, cols - 1));
    }
    for c in (0..cols.saturating_sub(1)).rev() {
        cells.push((rows - 1, c));
    }
    for r in (1..rows.saturating_sub(1)).rev() {
        cells.push((r, 0));
    }
    cells
}
