//! Leaf animations for the gridfield background.
//!
//! Every widget kind owns its state and advances on its own fixed-period
//! ticker. Nothing here knows about the grid: a widget only sees the size of
//! the cell it is mounted in and draws itself centred inside it.

pub mod animations;
mod chars;
mod color;
mod state;
mod ticker;

pub use color::Tint;
pub use state::{Animation, WidgetState};
pub use ticker::Ticker;
