//! Built-in initial layout for the default 9x14 grid.

use gridfield_core::{InitialPlacement, WidgetKind};

/// Starting placements, as (column, row, kind).
const DEFAULT_LAYOUT: &[(u16, u16, WidgetKind)] = &[
    (2, 1, WidgetKind::DotMatrix { offset: 0 }),
    (6, 4, WidgetKind::DotMatrix { offset: 5 }),
    (0, 11, WidgetKind::Tetris),
    (8, 6, WidgetKind::CharColumn),
    (1, 9, WidgetKind::Rain),
    (7, 0, WidgetKind::PulseGrid { phase: 0 }),
    (5, 13, WidgetKind::Typewriter { phrase: 0 }),
    (8, 5, WidgetKind::SignalBars),
    (3, 11, WidgetKind::SignalBars),
    (0, 2, WidgetKind::Spinner),
    (7, 10, WidgetKind::Scramble { word: 0 }),
    (1, 8, WidgetKind::Orbit),
    (3, 4, WidgetKind::LifeGrid),
    (7, 9, WidgetKind::LifeGrid),
    (0, 6, WidgetKind::Waveform),
    (8, 13, WidgetKind::AsciiPulse),
    (1, 0, WidgetKind::FadeChain { phase: 0 }),
    (6, 5, WidgetKind::FadeChain { phase: 3 }),
    (6, 2, WidgetKind::Breathe),
    (2, 7, WidgetKind::Breathe),
    (8, 2, WidgetKind::BarCode),
    (3, 8, WidgetKind::BarCode),
    (3, 3, WidgetKind::Dot),
    (5, 1, WidgetKind::Square),
    (5, 10, WidgetKind::Square),
    (7, 3, WidgetKind::Dot),
    (0, 12, WidgetKind::Typewriter { phrase: 2 }),
    (5, 7, WidgetKind::Dot),
];

pub fn default_placements() -> Vec<InitialPlacement> {
    DEFAULT_LAYOUT
        .iter()
        .map(|&(col, row, kind)| InitialPlacement::new(col, row, kind))
        .collect()
}
