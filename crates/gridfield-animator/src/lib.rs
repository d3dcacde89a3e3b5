//! Placement and reshuffle scheduling for the ambient grid.
//!
//! [`GridAnimator`] owns which widget kind sits in which cell and, driven by a
//! [`Clock`], periodically hides a random handful of placements, moves them to
//! free cells with new kinds, and reveals them again. It knows nothing about
//! what a widget draws.

mod clock;
mod placement;
mod shuffle;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use placement::{Placement, PlacementId, PlacementTable};
pub use shuffle::{CyclePhase, GridAnimator, ShuffleEvent, random_kind};
