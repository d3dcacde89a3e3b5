//! Placement table: which widget sits in which cell.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use gridfield_core::{Geometry, GridCell, InitialPlacement, WidgetKind};
use tracing::warn;

/// Synthetic identifier of a placement, stable across relocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlacementId(pub u32);

impl fmt::Display for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A widget kind assigned to a cell, with its visibility flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub cell: GridCell,
    pub kind: WidgetKind,
    pub visible: bool,
}

/// Active placements keyed by id, plus the occupancy set derived from them.
///
/// Every mutation goes through methods that keep `occupied` equal to the set
/// of placement cells, so two placements never share a cell.
#[derive(Debug, Clone, Default)]
pub struct PlacementTable {
    placements: BTreeMap<PlacementId, Placement>,
    occupied: HashSet<GridCell>,
}

impl PlacementTable {
    /// Seed the table from an initial layout.
    ///
    /// Entries outside the candidate region or on an already occupied cell
    /// are skipped. Ids are dense: the n-th accepted entry gets id `n`.
    pub fn seed(geometry: &Geometry, initial: &[InitialPlacement]) -> Self {
        let mut table = Self::default();
        for entry in initial {
            let cell = entry.cell();
            if !geometry.is_candidate(cell) {
                warn!(col = cell.col, row = cell.row, kind = entry.kind.name(), "skipping placement outside the grid");
                continue;
            }
            if table.occupied.contains(&cell) {
                warn!(col = cell.col, row = cell.row, kind = entry.kind.name(), "skipping placement on an occupied cell");
                continue;
            }
            let id = PlacementId(table.placements.len() as u32);
            table.occupied.insert(cell);
            table.placements.insert(
                id,
                Placement {
                    cell,
                    kind: entry.kind,
                    visible: true,
                },
            );
        }
        table
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn get(&self, id: PlacementId) -> Option<&Placement> {
        self.placements.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlacementId, &Placement)> {
        self.placements.iter().map(|(id, p)| (*id, p))
    }

    pub fn ids(&self) -> impl Iterator<Item = PlacementId> + '_ {
        self.placements.keys().copied()
    }

    pub fn is_occupied(&self, cell: GridCell) -> bool {
        self.occupied.contains(&cell)
    }

    /// Placement occupying `cell`, if any.
    pub fn at(&self, cell: GridCell) -> Option<(PlacementId, &Placement)> {
        if !self.is_occupied(cell) {
            return None;
        }
        self.iter().find(|(_, p)| p.cell == cell)
    }

    pub(crate) fn set_visible(&mut self, id: PlacementId, visible: bool) -> bool {
        match self.placements.get_mut(&id) {
            Some(p) if p.visible != visible => {
                p.visible = visible;
                true
            }
            _ => false,
        }
    }

    /// Candidate cells not held by any placement outside `leaving`.
    ///
    /// Cells currently held by `leaving` are included because those
    /// placements are about to move.
    pub fn free_cells(&self, geometry: &Geometry, leaving: &[PlacementId]) -> Vec<GridCell> {
        let vacating: HashSet<GridCell> = leaving
            .iter()
            .filter_map(|id| self.placements.get(id).map(|p| p.cell))
            .collect();
        geometry
            .candidate_cells()
            .into_iter()
            .filter(|cell| !self.occupied.contains(cell) || vacating.contains(cell))
            .collect()
    }

    /// Move a batch of placements to new cells with new kinds.
    ///
    /// All moving placements vacate first so that one of them may take a cell
    /// another just left. Returns `(id, from, to, kind)` for every move applied.
    /// A move whose target is held by a placement outside the batch is dropped.
    pub(crate) fn relocate(
        &mut self,
        moves: &[(PlacementId, GridCell, WidgetKind)],
    ) -> Vec<(PlacementId, GridCell, GridCell, WidgetKind)> {
        for (id, _, _) in moves {
            if let Some(p) = self.placements.get(id) {
                self.occupied.remove(&p.cell);
            }
        }

        let mut applied = Vec::with_capacity(moves.len());
        for &(id, to, kind) in moves {
            let Some(p) = self.placements.get_mut(&id) else {
                continue;
            };
            let from = p.cell;
            if self.occupied.insert(to) {
                p.cell = to;
                p.kind = kind;
                applied.push((id, from, to, kind));
            } else {
                warn!(%id, col = to.col, row = to.row, "relocation target already taken");
                self.occupied.insert(from);
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    fn geometry() -> Geometry {
        Geometry::symmetric(2, vec![3, 3, 3])
    }

    #[traced_test]
    #[test]
    fn test_seed_skips_invalid_entries() {
        let initial = vec![
            InitialPlacement::new(0, 0, WidgetKind::Dot),
            InitialPlacement::new(2, 1, WidgetKind::Square),
            InitialPlacement::new(9, 0, WidgetKind::Spinner),
            InitialPlacement::new(0, 0, WidgetKind::Orbit),
            InitialPlacement::new(3, 2, WidgetKind::LifeGrid),
        ];
        let table = PlacementTable::seed(&geometry(), &initial);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(PlacementId(0)).map(|p| p.kind), Some(WidgetKind::Dot));
        assert_eq!(
            table.get(PlacementId(1)).map(|p| p.cell),
            Some(GridCell::new(3, 2))
        );
        assert!(table.iter().all(|(_, p)| p.visible));
        assert!(logs_contain("skipping placement outside the grid"));
        assert!(logs_contain("skipping placement on an occupied cell"));
    }

    #[test]
    fn test_free_cells_include_vacating_cells() {
        let initial = vec![
            InitialPlacement::new(0, 0, WidgetKind::Dot),
            InitialPlacement::new(1, 0, WidgetKind::Dot),
        ];
        let table = PlacementTable::seed(&geometry(), &initial);
        let all = geometry().candidate_count();

        assert_eq!(table.free_cells(&geometry(), &[]).len(), all - 2);
        let free = table.free_cells(&geometry(), &[PlacementId(0)]);
        assert_eq!(free.len(), all - 1);
        assert!(free.contains(&GridCell::new(0, 0)));
        assert!(!free.contains(&GridCell::new(1, 0)));
    }

    #[test]
    fn test_relocate_allows_swapping_vacated_cells() {
        let initial = vec![
            InitialPlacement::new(0, 0, WidgetKind::Dot),
            InitialPlacement::new(1, 0, WidgetKind::Square),
        ];
        let mut table = PlacementTable::seed(&geometry(), &initial);
        let applied = table.relocate(&[
            (PlacementId(0), GridCell::new(1, 0), WidgetKind::Spinner),
            (PlacementId(1), GridCell::new(0, 0), WidgetKind::Orbit),
        ]);

        assert_eq!(applied.len(), 2);
        assert_eq!(table.at(GridCell::new(1, 0)).map(|(id, _)| id), Some(PlacementId(0)));
        assert_eq!(table.at(GridCell::new(0, 0)).map(|(_, p)| p.kind), Some(WidgetKind::Orbit));
    }

    #[test]
    fn test_relocate_refuses_occupied_target() {
        let initial = vec![
            InitialPlacement::new(0, 0, WidgetKind::Dot),
            InitialPlacement::new(1, 0, WidgetKind::Square),
        ];
        let mut table = PlacementTable::seed(&geometry(), &initial);
        let applied = table.relocate(&[(PlacementId(0), GridCell::new(1, 0), WidgetKind::Spinner)]);

        assert!(applied.is_empty());
        assert_eq!(table.get(PlacementId(0)).map(|p| p.cell), Some(GridCell::new(0, 0)));
        assert!(table.is_occupied(GridCell::new(0, 0)));
        assert_eq!(table.len(), 2);
    }
}
