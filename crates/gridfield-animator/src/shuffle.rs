//! The reshuffle cycle: hide, relocate, reveal, wait, repeat.

use std::collections::HashSet;

use gridfield_core::{Bounds, Geometry, GridCell, InitialPlacement, ShuffleTiming, WidgetKind};
use rand::Rng;
use rand::distr::uniform::SampleUniform;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::placement::{PlacementId, PlacementTable};

/// Where the animator is within the current cycle.
///
/// Deadlines are absolute milliseconds on the animator's clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CyclePhase {
    /// Waiting for the next cycle to start.
    Idle { due_ms: u64 },
    /// Retiring placements are hidden and fading out at their old cells.
    Retiring {
        retiring: Vec<PlacementId>,
        relocate_ms: u64,
    },
    /// Relocated placements sit hidden at their new cells.
    Settling {
        hidden: Vec<PlacementId>,
        reveal_ms: u64,
    },
    /// Torn down; nothing is scheduled and nothing will change.
    TornDown,
}

/// State changes produced by [`GridAnimator::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleEvent {
    Hidden {
        id: PlacementId,
    },
    Relocated {
        id: PlacementId,
        from: GridCell,
        to: GridCell,
        kind: WidgetKind,
    },
    Revealed {
        id: PlacementId,
    },
}

/// Owns the placement table and cycles random subsets of it through
/// hide → relocate → reveal until torn down.
#[derive(Debug)]
pub struct GridAnimator<R> {
    geometry: Geometry,
    timing: ShuffleTiming,
    table: PlacementTable,
    rng: R,
    phase: CyclePhase,
    /// Placements left hidden at their old cell because no free cell was
    /// available; retired first next cycle.
    ///
    /// Vacated cells always cover the retiring set, so this stays empty unless
    /// the table holds cells outside the current geometry.
    stranded: Vec<PlacementId>,
    cycles: u64,
}

impl<R: Rng> GridAnimator<R> {
    /// Seed the placement table and schedule the first cycle.
    pub fn new(
        geometry: Geometry,
        initial: &[InitialPlacement],
        timing: ShuffleTiming,
        mut rng: R,
        now_ms: u64,
    ) -> Self {
        let table = PlacementTable::seed(&geometry, initial);
        let delay = sample(&mut rng, timing.first_delay_ms);
        debug!(
            placements = table.len(),
            candidates = geometry.candidate_count(),
            first_cycle_in_ms = delay,
            "grid animator initialized"
        );
        Self {
            geometry,
            timing,
            table,
            rng,
            phase: CyclePhase::Idle {
                due_ms: now_ms.saturating_add(delay),
            },
            stranded: Vec::new(),
            cycles: 0,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn timing(&self) -> &ShuffleTiming {
        &self.timing
    }

    /// Current placements.
    pub fn table(&self) -> &PlacementTable {
        &self.table
    }

    pub fn phase(&self) -> &CyclePhase {
        &self.phase
    }

    /// Number of completed cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn is_torn_down(&self) -> bool {
        self.phase == CyclePhase::TornDown
    }

    /// Time of the next scheduled transition, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        match self.phase {
            CyclePhase::Idle { due_ms } => Some(due_ms),
            CyclePhase::Retiring { relocate_ms, .. } => Some(relocate_ms),
            CyclePhase::Settling { reveal_ms, .. } => Some(reveal_ms),
            CyclePhase::TornDown => None,
        }
    }

    /// Advance to the clock's current time.
    pub fn poll(&mut self, clock: &impl Clock) -> Vec<ShuffleEvent> {
        self.advance(clock.now_ms())
    }

    /// Run every transition due at or before `now_ms`, in order.
    ///
    /// Each transition runs at its own deadline, so a large jump in time
    /// still produces hide, relocate and reveal in sequence.
    pub fn advance(&mut self, now_ms: u64) -> Vec<ShuffleEvent> {
        let mut events = Vec::new();
        loop {
            match self.phase {
                CyclePhase::Idle { due_ms } if now_ms >= due_ms => {
                    self.retire(due_ms, &mut events);
                }
                CyclePhase::Retiring { relocate_ms, .. } if now_ms >= relocate_ms => {
                    self.relocate(relocate_ms, &mut events);
                }
                CyclePhase::Settling { reveal_ms, .. } if now_ms >= reveal_ms => {
                    self.reveal(reveal_ms, &mut events);
                }
                _ => break,
            }
        }
        events
    }

    /// Start a cycle at `now_ms` instead of waiting for the scheduled one.
    ///
    /// Ignored while a cycle is in flight or after teardown.
    pub fn force_cycle(&mut self, now_ms: u64) {
        if let CyclePhase::Idle { due_ms } = &mut self.phase {
            *due_ms = (*due_ms).min(now_ms);
        }
    }

    /// Cancel everything pending. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.phase != CyclePhase::TornDown {
            debug!(cycles = self.cycles, "grid animator torn down");
        }
        self.phase = CyclePhase::TornDown;
        self.stranded.clear();
    }

    fn retire(&mut self, at_ms: u64, events: &mut Vec<ShuffleEvent>) {
        let count = sample(&mut self.rng, self.timing.retire_count)
            .max(self.stranded.len())
            .min(self.table.len());

        let mut retiring: Vec<PlacementId> = std::mem::take(&mut self.stranded)
            .into_iter()
            .filter(|id| self.table.get(*id).is_some())
            .collect();
        let mut others: Vec<PlacementId> = self
            .table
            .ids()
            .filter(|id| !retiring.contains(id))
            .collect();
        others.shuffle(&mut self.rng);
        let wanted = count.saturating_sub(retiring.len());
        retiring.extend(others.into_iter().take(wanted));

        if retiring.is_empty() {
            self.schedule_next(at_ms);
            return;
        }

        for &id in &retiring {
            if self.table.set_visible(id, false) {
                events.push(ShuffleEvent::Hidden { id });
            }
        }
        debug!(cycle = self.cycles, retiring = retiring.len(), at_ms, "retiring placements");
        self.phase = CyclePhase::Retiring {
            retiring,
            relocate_ms: at_ms.saturating_add(self.timing.settle_ms),
        };
    }

    fn relocate(&mut self, at_ms: u64, events: &mut Vec<ShuffleEvent>) {
        let retiring = match &mut self.phase {
            CyclePhase::Retiring { retiring, .. } => std::mem::take(retiring),
            _ => return,
        };

        let free = self.table.free_cells(&self.geometry, &retiring);
        let vacated: HashSet<GridCell> = retiring
            .iter()
            .filter_map(|id| self.table.get(*id).map(|p| p.cell))
            .collect();
        let targets = order_targets(free, &vacated, &mut self.rng);
        let (moves, mut stranded) = assign_cells(&retiring, &targets, &mut self.rng);
        if !stranded.is_empty() {
            warn!(
                retiring = retiring.len(),
                free = targets.len(),
                "not enough free cells, leaving placements hidden until next cycle"
            );
        }

        let applied = self.table.relocate(&moves);
        let mut hidden = Vec::with_capacity(applied.len());
        for (id, from, to, kind) in applied {
            events.push(ShuffleEvent::Relocated { id, from, to, kind });
            hidden.push(id);
        }
        stranded.extend(moves.iter().map(|m| m.0).filter(|id| !hidden.contains(id)));
        self.stranded = stranded;

        debug!(cycle = self.cycles, relocated = hidden.len(), at_ms, "placements relocated");
        self.phase = CyclePhase::Settling {
            hidden,
            reveal_ms: at_ms.saturating_add(self.timing.reveal_ms),
        };
    }

    fn reveal(&mut self, at_ms: u64, events: &mut Vec<ShuffleEvent>) {
        let hidden = match &mut self.phase {
            CyclePhase::Settling { hidden, .. } => std::mem::take(hidden),
            _ => return,
        };
        for id in hidden {
            if self.table.set_visible(id, true) {
                events.push(ShuffleEvent::Revealed { id });
            }
        }
        self.schedule_next(at_ms);
    }

    fn schedule_next(&mut self, at_ms: u64) {
        self.cycles += 1;
        let delay = sample(&mut self.rng, self.timing.cycle_delay_ms);
        debug!(cycle = self.cycles, next_in_ms = delay, "cycle complete");
        self.phase = CyclePhase::Idle {
            due_ms: at_ms.saturating_add(delay),
        };
    }
}

/// Shuffle free cells, putting cells the retiring placements just left at the
/// back so they are only reused when nothing else is available.
fn order_targets<R: Rng + ?Sized>(
    free: Vec<GridCell>,
    vacated: &HashSet<GridCell>,
    rng: &mut R,
) -> Vec<GridCell> {
    let (mut fresh, mut reused): (Vec<GridCell>, Vec<GridCell>) =
        free.into_iter().partition(|cell| !vacated.contains(cell));
    fresh.shuffle(rng);
    reused.shuffle(rng);
    fresh.extend(reused);
    fresh
}

/// Pair retiring placements with target cells and fresh random kinds.
///
/// Returns the moves and the placements left without a cell.
fn assign_cells<R: Rng + ?Sized>(
    retiring: &[PlacementId],
    targets: &[GridCell],
    rng: &mut R,
) -> (Vec<(PlacementId, GridCell, WidgetKind)>, Vec<PlacementId>) {
    let moves = retiring
        .iter()
        .zip(targets)
        .map(|(&id, &cell)| (id, cell, random_kind(rng)))
        .collect();
    let stranded = retiring.iter().skip(targets.len()).copied().collect();
    (moves, stranded)
}

/// Pick a kind uniformly, with a random seed parameter.
pub fn random_kind<R: Rng + ?Sized>(rng: &mut R) -> WidgetKind {
    let index = rng.random_range(0..WidgetKind::COUNT);
    WidgetKind::from_index(index, rng.random_range(0..32))
}

fn sample<T, R>(rng: &mut R, bounds: Bounds<T>) -> T
where
    T: SampleUniform + PartialOrd + Copy,
    R: Rng + ?Sized,
{
    if bounds.min >= bounds.max {
        bounds.min
    } else {
        rng.random_range(bounds.min..=bounds.max)
    }
}
