//! Core types shared by the gridfield crates.
//!
//! Grid geometry and cell coordinates, the closed set of widget kinds, the
//! reshuffle timing parameters and the user-facing theme/speed settings.

mod geometry;
mod kind;
mod theme;
mod timing;

pub use geometry::{Geometry, GridCell, InitialPlacement};
pub use kind::WidgetKind;
pub use theme::{AnimationSpeed, ColorTheme};
pub use timing::{Bounds, ShuffleTiming};
