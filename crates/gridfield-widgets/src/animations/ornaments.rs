//! Small single-glyph and ring widgets.

use ratatui::text::{Line, Span};

use crate::chars::{DOT, SPINNER_FRAMES};
use crate::color::Tint;

const SPINNER_OPACITY: f32 = 0.2;

#[derive(Debug, Clone, Default)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    pub fn frame(&self) -> char {
        SPINNER_FRAMES[self.frame]
    }

    pub fn step(&mut self) {
        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        vec![Line::from(tint.glyph(self.frame(), SPINNER_OPACITY))]
    }
}

/// Blank 3x5 box used by the ring widgets, centre at (1, 2).
fn ring_box() -> [[Option<(char, f32)>; 5]; 3] {
    [[None; 5]; 3]
}

fn render_box(cells: &[[Option<(char, f32)>; 5]; 3], tint: Tint) -> Vec<Line<'static>> {
    cells
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| match cell {
                    Some((ch, opacity)) => tint.glyph(*ch, *opacity),
                    None => Span::raw(" "),
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Satellite positions, clockwise from the top.
const ORBIT_PATH: [(usize, usize); 8] = [
    (0, 2),
    (0, 4),
    (1, 4),
    (2, 4),
    (2, 2),
    (2, 0),
    (1, 0),
    (0, 0),
];
const SATELLITE: char = '•';
const ORBIT_CENTRE_OPACITY: f32 = 0.1;
const SATELLITE_OPACITY: f32 = 0.25;

/// A satellite circling a centre dot.
#[derive(Debug, Clone, Default)]
pub struct Orbit {
    position: usize,
}

impl Orbit {
    pub fn satellite(&self) -> (usize, usize) {
        ORBIT_PATH[self.position]
    }

    pub fn step(&mut self) {
        self.position = (self.position + 1) % ORBIT_PATH.len();
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        let mut cells = ring_box();
        cells[1][2] = Some((DOT, ORBIT_CENTRE_OPACITY));
        let (r, c) = self.satellite();
        cells[r][c] = Some((SATELLITE, SATELLITE_OPACITY));
        render_box(&cells, tint)
    }
}

/// Ticks per breath.
pub const BREATHE_TICKS: u32 = 30;
const BREATHE_OPACITY: f32 = 0.15;
const INNER_RING: [(usize, usize); 4] = [(0, 2), (1, 1), (1, 3), (2, 2)];
const OUTER_RING: [(usize, usize); 6] = [(0, 1), (0, 3), (1, 0), (1, 4), (2, 1), (2, 3)];

/// A ring that expands from a centre dot and fades as it grows.
#[derive(Debug, Clone, Default)]
pub struct Breathe {
    tick: u32,
}

impl Breathe {
    /// Progress through the current breath, `0.0..1.0`.
    pub fn progress(&self) -> f32 {
        self.tick as f32 / BREATHE_TICKS as f32
    }

    pub fn step(&mut self) {
        self.tick = (self.tick + 1) % BREATHE_TICKS;
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        let mut cells = ring_box();
        cells[1][2] = Some((DOT, BREATHE_OPACITY));
        let progress = self.progress();
        let ring: &[(usize, usize)] = if progress < 0.5 {
            &INNER_RING
        } else {
            &OUTER_RING
        };
        let opacity = BREATHE_OPACITY * (1.0 - progress);
        for &(r, c) in ring {
            cells[r][c] = Some(('·', opacity));
        }
        render_box(&cells, tint)
    }
}

const DOT_GLYPH: char = '·';
const DOT_OPACITY: f32 = 0.1;
const SQUARE_GLYPH: char = '▪';
const SQUARE_OPACITY: f32 = 0.06;

pub fn dot(tint: Tint) -> Vec<Line<'static>> {
    vec![Line::from(tint.glyph(DOT_GLYPH, DOT_OPACITY))]
}

pub fn square(tint: Tint) -> Vec<Line<'static>> {
    vec![Line::from(tint.glyph(SQUARE_GLYPH, SQUARE_OPACITY))]
}
