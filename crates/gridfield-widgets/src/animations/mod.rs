//! Leaf animation implementations.

pub mod dot_matrix;
pub mod glyphs;
pub mod life;
pub mod ornaments;
pub mod rain;
pub mod tetris;
pub mod typewriter;
pub mod waves;
