//! Self-playing block stacking.
//!
//! Pieces spawn at a random column and rotation, fall one row per tick, lock
//! when they land, and full rows clear. A piece that cannot spawn empties the
//! well and play starts over.

use rand::Rng;
use ratatui::{
    layout::Size,
    text::{Line, Span},
};

use crate::color::Tint;

/// The seven tetrominoes in their spawn orientation, as (x, y) offsets.
const SHAPES: [[(i16, i16); 4]; 7] = [
    [(0, 0), (1, 0), (2, 0), (3, 0)], // I
    [(0, 0), (1, 0), (0, 1), (1, 1)], // O
    [(0, 0), (1, 0), (2, 0), (1, 1)], // T
    [(1, 0), (2, 0), (0, 1), (1, 1)], // S
    [(0, 0), (1, 0), (1, 1), (2, 1)], // Z
    [(0, 0), (0, 1), (1, 1), (2, 1)], // J
    [(2, 0), (0, 1), (1, 1), (2, 1)], // L
];

const MIN_COLS: usize = 4;
const MAX_COLS: usize = 8;
const MIN_ROWS: usize = 4;
const MAX_ROWS: usize = 12;
const PIECE_OPACITY: f32 = 0.3;
const STACK_OPACITY: f32 = 0.15;
const EMPTY_OPACITY: f32 = 0.03;

/// A falling piece: cell offsets plus its position in the well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    cells: [(i16, i16); 4],
    x: i16,
    y: i16,
}

impl Piece {
    /// Shape `shape` turned clockwise `turns` times, normalized to the origin.
    fn new(shape: usize, turns: usize) -> Self {
        let mut cells = SHAPES[shape % SHAPES.len()];
        for _ in 0..turns % 4 {
            for cell in &mut cells {
                *cell = (-cell.1, cell.0);
            }
        }
        let min_x = cells.iter().map(|c| c.0).min().unwrap_or(0);
        let min_y = cells.iter().map(|c| c.1).min().unwrap_or(0);
        for cell in &mut cells {
            cell.0 -= min_x;
            cell.1 -= min_y;
        }
        Self { cells, x: 0, y: 0 }
    }

    fn width(&self) -> i16 {
        self.cells.iter().map(|c| c.0).max().unwrap_or(0) + 1
    }

    fn positions(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.cells.iter().map(|&(dx, dy)| (self.x + dx, self.y + dy))
    }

    fn moved_down(&self) -> Self {
        Self {
            y: self.y + 1,
            ..*self
        }
    }
}

/// The well and the piece currently falling through it.
#[derive(Debug, Clone)]
pub struct Tetris {
    cols: usize,
    rows: usize,
    filled: Vec<bool>,
    piece: Option<Piece>,
    cleared: u32,
    resets: u32,
}

impl Tetris {
    pub fn new(size: Size) -> Self {
        let cols = (size.width as usize / 2).clamp(MIN_COLS, MAX_COLS);
        let rows = (size.height as usize).clamp(MIN_ROWS, MAX_ROWS);
        Self::with_well(cols, rows)
    }

    fn with_well(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            filled: vec![false; cols * rows],
            piece: None,
            cleared: 0,
            resets: 0,
        }
    }

    /// Rows cleared since mount.
    pub fn cleared(&self) -> u32 {
        self.cleared
    }

    /// Times the well overflowed and was emptied.
    pub fn resets(&self) -> u32 {
        self.resets
    }

    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        self.filled[row * self.cols + col]
    }

    fn collides(&self, piece: &Piece) -> bool {
        piece.positions().any(|(x, y)| {
            x < 0
                || y < 0
                || x as usize >= self.cols
                || y as usize >= self.rows
                || self.is_filled(x as usize, y as usize)
        })
    }

    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self.piece {
            None => self.spawn(rng),
            Some(piece) => {
                let next = piece.moved_down();
                if self.collides(&next) {
                    self.lock(&piece);
                    self.piece = None;
                } else {
                    self.piece = Some(next);
                }
            }
        }
    }

    fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut piece = Piece::new(rng.random_range(0..SHAPES.len()), rng.random_range(0..4));
        let span = (self.cols as i16 - piece.width()).max(0);
        piece.x = rng.random_range(0..=span);
        if self.collides(&piece) {
            self.filled.fill(false);
            self.resets += 1;
            self.piece = None;
        } else {
            self.piece = Some(piece);
        }
    }

    fn lock(&mut self, piece: &Piece) {
        for (x, y) in piece.positions() {
            self.filled[y as usize * self.cols + x as usize] = true;
        }
        self.clear_rows();
    }

    fn clear_rows(&mut self) -> usize {
        let cols = self.cols;
        let kept: Vec<bool> = self
            .filled
            .chunks(cols)
            .filter(|row| !row.iter().all(|&f| f))
            .flatten()
            .copied()
            .collect();
        let cleared = self.rows - kept.len() / cols;
        let mut filled = vec![false; cleared * cols];
        filled.extend(kept);
        self.filled = filled;
        self.cleared += cleared as u32;
        cleared
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        let falling: Vec<(i16, i16)> = self
            .piece
            .as_ref()
            .map(|p| p.positions().collect())
            .unwrap_or_default();

        (0..self.rows)
            .map(|row| {
                let spans: Vec<Span> = (0..self.cols)
                    .map(|col| {
                        if falling.contains(&(col as i16, row as i16)) {
                            Span::styled("██", tint.style(PIECE_OPACITY))
                        } else if self.is_filled(col, row) {
                            Span::styled("▓▓", tint.style(STACK_OPACITY))
                        } else {
                            Span::styled(" ·", tint.style(EMPTY_OPACITY))
                        }
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

    #[test]
    fn test_rotation_keeps_piece_at_origin() {
        let vertical_i = Piece::new(0, 1);
        let mut cells = vertical_i.cells;
        cells.sort_unstable();
        assert_eq!(cells, [(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(vertical_i.width(), 1);
        assert_eq!(Piece::new(2, 4), Piece::new(2, 0));
    }

    #[test]
    fn test_piece_falls_one_row_per_tick() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut tetris = Tetris::with_well(6, 8);
        tetris.step(&mut rng);
        let spawned = tetris.piece.expect("spawned");
        assert_eq!(spawned.y, 0);
        tetris.step(&mut rng);
        assert_eq!(tetris.piece.expect("falling").y, 1);
    }

    #[test]
    fn test_landing_locks_and_clears_full_row() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut tetris = Tetris::with_well(4, 4);
        tetris.piece = Some(Piece {
            y: 2,
            ..Piece::new(0, 0)
        });

        tetris.step(&mut rng);
        assert_eq!(tetris.piece.map(|p| p.y), Some(3));
        tetris.step(&mut rng);
        assert!(tetris.piece.is_none());
        assert_eq!(tetris.cleared(), 1);
        assert!(tetris.filled.iter().all(|&f| !f));
    }

    #[test]
    fn test_rows_above_a_clear_shift_down() {
        let mut tetris = Tetris::with_well(4, 4);
        tetris.filled[2 * 4] = true;
        for col in 0..4 {
            tetris.filled[3 * 4 + col] = true;
        }
        assert_eq!(tetris.clear_rows(), 1);
        assert!(tetris.is_filled(0, 3));
        assert!(!tetris.is_filled(0, 2));
        assert_eq!(tetris.filled.iter().filter(|&&f| f).count(), 1);
    }

    #[test]
    fn test_overflow_resets_the_well() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut tetris = Tetris::with_well(4, 4);
        for row in 0..4 {
            for col in 0..3 {
                tetris.filled[row * 4 + col] = true;
            }
        }
        for col in 0..4 {
            tetris.filled[col] = true;
        }
        tetris.step(&mut rng);
        assert_eq!(tetris.resets(), 1);
        assert!(tetris.piece.is_none());
        assert!(tetris.filled.iter().all(|&f| !f));
    }

    #[test]
    fn test_long_run_stays_inside_the_well() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut tetris = Tetris::new(Size::new(12, 8));
        for _ in 0..5_000 {
            tetris.step(&mut rng);
            if let Some(piece) = tetris.piece {
                assert!(!tetris.collides(&piece));
            }
        }
        assert!(tetris.resets() > 0 || tetris.cleared() > 0);
        let lines = tetris.lines(Tint::new((255, 255, 255)));
        assert_eq!(lines.len(), 8);
        assert!(lines.iter().all(|l| l.width() == 12));
    }
}
