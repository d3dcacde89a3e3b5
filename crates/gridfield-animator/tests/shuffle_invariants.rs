//! Placement invariants across many reshuffle cycles.

use std::collections::{HashMap, HashSet};

use gridfield_animator::{Clock, GridAnimator, ManualClock, PlacementId, ShuffleEvent};
use gridfield_core::{Bounds, Geometry, GridCell, InitialPlacement, ShuffleTiming, WidgetKind};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// Assert cells are pairwise distinct and inside the placement region.
fn assert_valid_layout(animator: &GridAnimator<SmallRng>) {
    let geometry = animator.geometry();
    let mut seen = HashSet::new();
    for (id, placement) in animator.table().iter() {
        assert!(
            geometry.is_candidate(placement.cell),
            "{id} sits outside the placement region at {:?}",
            placement.cell
        );
        assert!(seen.insert(placement.cell), "{id} shares {:?}", placement.cell);
    }
}

fn random_layout(geometry: &Geometry, count: usize, seed: u64) -> Vec<InitialPlacement> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut cells = geometry.candidate_cells();
    cells.shuffle(&mut rng);
    cells
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(i, cell)| InitialPlacement::new(cell.col, cell.row, WidgetKind::from_index(i, 0)))
        .collect()
}

#[test]
fn one_cycle_moves_exactly_the_retired_placements() {
    // 14 rows, one reserved column out of ten: 126 candidate cells.
    let geometry = Geometry {
        columns: 10,
        reserved_column: 4,
        row_heights: vec![3, 4, 3, 3, 6, 3, 4, 3, 3, 4, 3, 6, 3, 4],
    };
    assert_eq!(geometry.candidate_count(), 126);

    let initial = random_layout(&geometry, 29, 42);
    let timing = ShuffleTiming {
        retire_count: Bounds::exactly(4),
        ..Default::default()
    };

    for seed in 0..25 {
        let clock = ManualClock::new(0);
        let mut animator = GridAnimator::new(
            geometry.clone(),
            &initial,
            timing.clone(),
            SmallRng::seed_from_u64(seed),
            clock.now_ms(),
        );
        assert_eq!(animator.table().len(), 29);
        let before: HashMap<PlacementId, GridCell> =
            animator.table().iter().map(|(id, p)| (id, p.cell)).collect();

        clock.set(6_000 + 1_000);
        let events = animator.poll(&clock);
        assert_eq!(animator.cycles(), 1);

        let moved: Vec<PlacementId> = animator
            .table()
            .iter()
            .filter(|(id, p)| before[id] != p.cell)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(moved.len(), 4);
        assert_eq!(animator.table().len(), 29);
        assert!(animator.table().iter().all(|(_, p)| p.visible));

        let relocated: HashSet<PlacementId> = events
            .iter()
            .filter_map(|e| match e {
                ShuffleEvent::Relocated { id, .. } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(relocated, moved.into_iter().collect::<HashSet<_>>());
        assert_valid_layout(&animator);
    }
}

#[test]
fn teardown_mid_cycle_freezes_the_table() {
    let geometry = Geometry::default();
    let initial = random_layout(&geometry, 20, 1);
    let clock = ManualClock::new(0);
    let mut animator = GridAnimator::new(
        geometry,
        &initial,
        ShuffleTiming::default(),
        SmallRng::seed_from_u64(5),
        clock.now_ms(),
    );

    let due = animator.next_deadline().expect("first cycle scheduled");
    clock.set(due + 400);
    let hidden = animator.poll(&clock);
    assert!(hidden.iter().all(|e| matches!(e, ShuffleEvent::Hidden { .. })));
    assert!(!hidden.is_empty());

    animator.teardown();
    let snapshot: Vec<_> = animator.table().iter().map(|(id, p)| (id, *p)).collect();
    for _ in 0..10 {
        clock.advance(5_000);
        assert!(animator.poll(&clock).is_empty());
    }
    let after: Vec<_> = animator.table().iter().map(|(id, p)| (id, *p)).collect();
    assert_eq!(snapshot, after);
}

/// Visibility of each placement as seen through the event stream.
fn check_event_order(events: &[ShuffleEvent], hidden: &mut HashSet<PlacementId>) {
    for event in events {
        match *event {
            ShuffleEvent::Hidden { id } => {
                assert!(hidden.insert(id), "{id} hidden twice");
            }
            ShuffleEvent::Relocated { id, .. } => {
                assert!(hidden.contains(&id), "{id} moved while visible");
            }
            ShuffleEvent::Revealed { id } => {
                assert!(hidden.remove(&id), "{id} revealed without being hidden");
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn placements_stay_distinct_and_constant(
        seed in any::<u64>(),
        cols_per_side in 1u16..5,
        rows in 1usize..10,
        fill in 0.0f64..1.0,
        steps in prop::collection::vec(1u64..3_000, 1..60),
    ) {
        let geometry = Geometry::symmetric(cols_per_side, vec![3; rows]);
        let count = (geometry.candidate_count() as f64 * fill) as usize;
        let initial = random_layout(&geometry, count, seed);
        let clock = ManualClock::new(0);
        let mut animator = GridAnimator::new(
            geometry,
            &initial,
            ShuffleTiming::default(),
            SmallRng::seed_from_u64(seed),
            clock.now_ms(),
        );
        prop_assert_eq!(animator.table().len(), count);

        let mut hidden = HashSet::new();
        for step in steps {
            clock.advance(step);
            let events = animator.poll(&clock);
            check_event_order(&events, &mut hidden);
            assert_valid_layout(&animator);
            prop_assert_eq!(animator.table().len(), count);
        }
    }
}
