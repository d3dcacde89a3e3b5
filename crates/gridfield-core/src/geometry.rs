//! Grid geometry and cell coordinates.

use serde::{Deserialize, Serialize};

use crate::WidgetKind;

/// A cell of the grid, addressed by zero-based column and row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub col: u16,
    pub row: u16,
}

impl GridCell {
    pub const fn new(col: u16, row: u16) -> Self {
        Self { col, row }
    }
}

/// Fixed grid arrangement.
///
/// The reserved column holds page content and never receives a placement.
/// Row heights are measured in terminal lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    /// Total number of columns, reserved column included.
    pub columns: u16,
    /// Index of the column kept free for page content.
    pub reserved_column: u16,
    /// Height of every row, top to bottom.
    pub row_heights: Vec<u16>,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::symmetric(4, vec![3, 4, 3, 3, 6, 3, 4, 3, 3, 4, 3, 6, 3, 4])
    }
}

impl Geometry {
    /// Build a grid with `cols_per_side` columns on each side of a central
    /// reserved column.
    pub fn symmetric(cols_per_side: u16, row_heights: Vec<u16>) -> Self {
        Self {
            columns: cols_per_side * 2 + 1,
            reserved_column: cols_per_side,
            row_heights,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> u16 {
        self.row_heights.len() as u16
    }

    /// Height of a row in terminal lines, zero when out of range.
    pub fn row_height(&self, row: u16) -> u16 {
        self.row_heights.get(row as usize).copied().unwrap_or(0)
    }

    pub fn is_reserved(&self, cell: GridCell) -> bool {
        cell.col == self.reserved_column
    }

    /// Whether a cell lies inside the grid and outside the reserved column.
    pub fn is_candidate(&self, cell: GridCell) -> bool {
        cell.col < self.columns && cell.row < self.rows() && !self.is_reserved(cell)
    }

    /// Every cell that may host a placement, in row-major order.
    pub fn candidate_cells(&self) -> Vec<GridCell> {
        (0..self.rows())
            .flat_map(|row| (0..self.columns).map(move |col| GridCell::new(col, row)))
            .filter(|&cell| !self.is_reserved(cell))
            .collect()
    }

    /// Number of cells that may host a placement.
    pub fn candidate_count(&self) -> usize {
        let usable_cols = if self.reserved_column < self.columns {
            self.columns - 1
        } else {
            self.columns
        };
        usable_cols as usize * self.row_heights.len()
    }

    /// At least one column and row, a reserved column inside the grid, and
    /// at least one cell left over for placements.
    pub fn is_well_formed(&self) -> bool {
        self.columns >= 1
            && !self.row_heights.is_empty()
            && self.reserved_column < self.columns
            && self.candidate_count() > 0
    }
}

/// A widget placed at a fixed cell when the grid is first mounted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialPlacement {
    pub col: u16,
    pub row: u16,
    pub kind: WidgetKind,
}

impl InitialPlacement {
    pub const fn new(col: u16, row: u16, kind: WidgetKind) -> Self {
        Self { col, row, kind }
    }

    pub fn cell(&self) -> GridCell {
        GridCell::new(self.col, self.row)
    }
}
