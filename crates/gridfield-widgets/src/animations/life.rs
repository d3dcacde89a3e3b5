//! Conway's Game of Life on a small torus.

use rand::Rng;
use ratatui::{
    layout::Size,
    text::{Line, Span},
};

use crate::chars::BLOCK;
use crate::color::Tint;

/// Live fraction of a freshly seeded board.
pub const SEED_DENSITY: f64 = 0.4;
const ALIVE_OPACITY: f32 = 0.3;
const DEAD_OPACITY: f32 = 0.03;
const MAX_ROWS: usize = 14;
const MAX_COLS: usize = 5;

/// Wrapping grid of live/dead cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Board {
    /// All-dead board.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Board where each cell is alive with probability `density`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, density: f64, rng: &mut R) -> Self {
        Self {
            rows,
            cols,
            cells: (0..rows * cols).map(|_| rng.random_bool(density)).collect(),
        }
    }

    /// Parse rows of `#` (alive) and `.` (dead).
    #[cfg(test)]
    pub fn from_pattern(pattern: &[&str]) -> Self {
        let rows = pattern.len();
        let cols = pattern.first().map_or(0, |r| r.len());
        let cells = pattern
            .iter()
            .flat_map(|row| row.chars().map(|ch| ch == '#'))
            .collect();
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_extinct(&self) -> bool {
        !self.cells.contains(&true)
    }

    /// Live neighbours in the Moore neighbourhood, wrapping at the edges.
    pub fn live_neighbours(&self, row: usize, col: usize) -> usize {
        let mut n = 0;
        for dr in [self.rows - 1, 0, 1] {
            for dc in [self.cols - 1, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = (row + dr) % self.rows;
                let c = (col + dc) % self.cols;
                if self.is_alive(r, c) {
                    n += 1;
                }
            }
        }
        n
    }

    /// One generation: survive on 2 or 3 neighbours, birth on exactly 3.
    pub fn step(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for r in 0..self.rows {
            for c in 0..self.cols {
                let n = self.live_neighbours(r, c);
                cells.push(n == 3 || (self.is_alive(r, c) && n == 2));
            }
        }
        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }
}

/// Next generation, reseeding at [`SEED_DENSITY`] when everything died.
pub fn advance<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Board {
    let next = board.step();
    if next.is_extinct() {
        Board::random(board.rows, board.cols, SEED_DENSITY, rng)
    } else {
        next
    }
}

/// Game of Life widget.
#[derive(Debug, Clone)]
pub struct LifeGrid {
    board: Board,
}

impl LifeGrid {
    pub fn new<R: Rng + ?Sized>(size: Size, rng: &mut R) -> Self {
        let rows = (size.height as usize).clamp(3, MAX_ROWS);
        let cols = ((size.width as usize + 1) / 2).clamp(3, MAX_COLS);
        Self {
            board: Board::random(rows, cols, SEED_DENSITY, rng),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.board = advance(&self.board, rng);
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        (0..self.board.rows)
            .map(|r| {
                let mut spans = Vec::with_capacity(self.board.cols * 2);
                for c in 0..self.board.cols {
                    if c > 0 {
                        spans.push(Span::raw(" "));
                    }
                    let opacity = if self.board.is_alive(r, c) {
                        ALIVE_OPACITY
                    } else {
                        DEAD_OPACITY
                    };
                    spans.push(tint.glyph(BLOCK, opacity));
                }
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
    fn test_block_is_still_life() {
        let block = Board::from_pattern(&[
            "......",
            "......",
            "..##..",
            "..##..",
            "......",
            "......",
        ]);
        assert_eq!(block.step(), block);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = Board::from_pattern(&[".....", ".....", ".###.", ".....", "....."]);
        let vertical = Board::from_pattern(&[".....", "..#..", "..#..", "..#..", "....."]);
        assert_eq!(horizontal.step(), vertical);
        assert_eq!(vertical.step(), horizontal);
    }

    #[test]
    fn test_neighbours_wrap_around_edges() {
        let board = Board::from_pattern(&["#...#", ".....", ".....", "#...#"]);
        assert_eq!(board.live_neighbours(0, 0), 3);
        assert_eq!(board.live_neighbours(1, 2), 0);
    }

    #[test]
    fn test_lonely_cell_dies_and_board_reseeds() {
        let mut rng = SmallRng::seed_from_u64(1);
        let lonely = Board::from_pattern(&["....", ".#..", "....", "...."]);
        assert!(lonely.step().is_extinct());

        let next = advance(&lonely, &mut rng);
        assert!(!next.is_extinct());
        assert_eq!((next.rows(), next.cols()), (4, 4));
    }

    #[test]
    fn test_reseed_density_is_about_forty_percent() {
        let empty = Board::new(10, 10);
        let mut live = 0;
        let boards = 300;
        for seed in 0..boards {
            let mut rng = SmallRng::seed_from_u64(seed);
            let board = advance(&empty, &mut rng);
            live += board.live_count();
        }
        let fraction = live as f64 / (boards as f64 * 100.0);
        assert!((0.37..0.43).contains(&fraction), "live fraction {fraction}");
    }

    #[test]
    fn test_widget_size_is_clamped() {
        let mut rng = SmallRng::seed_from_u64(3);
        let grid = LifeGrid::new(Size::new(40, 30), &mut rng);
        assert_eq!(grid.board().rows(), MAX_ROWS);
        assert_eq!(grid.board().cols(), MAX_COLS);

        let small = LifeGrid::new(Size::new(1, 1), &mut rng);
        assert_eq!((small.board().rows(), small.board().cols()), (3, 3));
        assert_eq!(small.lines(Tint::new((255, 255, 255))).len(), 3);
    }
}
