//! Mounted widget state.

use gridfield_core::{AnimationSpeed, WidgetKind};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::animations::{
    dot_matrix::DotMatrix,
    glyphs::{AsciiPulse, BarCode, CharColumn, Scramble},
    life::LifeGrid,
    ornaments::{self, Breathe, Orbit, Spinner},
    rain::Rain,
    tetris::Tetris,
    typewriter::Typewriter,
    waves::{FadeChain, PulseGrid, SignalBars, Waveform},
};
use crate::color::Tint;
use crate::ticker::Ticker;

/// Animation state for one widget kind.
#[derive(Debug, Clone)]
pub enum Animation {
    DotMatrix(DotMatrix),
    CharColumn(CharColumn),
    PulseGrid(PulseGrid),
    SignalBars(SignalBars),
    Spinner(Spinner),
    Orbit(Orbit),
    LifeGrid(LifeGrid),
    Waveform(Waveform),
    FadeChain(FadeChain),
    Breathe(Breathe),
    BarCode(BarCode),
    Dot,
    Square,
    Rain(Rain),
    Typewriter(Typewriter),
    Tetris(Tetris),
    Scramble(Scramble),
    AsciiPulse(AsciiPulse),
}

impl Animation {
    /// Fresh state for `kind` sized to fit `size`.
    pub fn build<R: Rng + ?Sized>(kind: WidgetKind, size: Size, rng: &mut R) -> Self {
        match kind {
            WidgetKind::DotMatrix { offset } => Animation::DotMatrix(DotMatrix::new(size, offset)),
            WidgetKind::CharColumn => Animation::CharColumn(CharColumn::new(size, rng)),
            WidgetKind::PulseGrid { phase } => Animation::PulseGrid(PulseGrid::new(size, phase)),
            WidgetKind::SignalBars => Animation::SignalBars(SignalBars::new(size)),
            WidgetKind::Spinner => Animation::Spinner(Spinner::default()),
            WidgetKind::Orbit => Animation::Orbit(Orbit::default()),
            WidgetKind::LifeGrid => Animation::LifeGrid(LifeGrid::new(size, rng)),
            WidgetKind::Waveform => Animation::Waveform(Waveform::new(size)),
            WidgetKind::FadeChain { phase } => Animation::FadeChain(FadeChain::new(size, phase)),
            WidgetKind::Breathe => Animation::Breathe(Breathe::default()),
            WidgetKind::BarCode => Animation::BarCode(BarCode::new(size, rng)),
            WidgetKind::Dot => Animation::Dot,
            WidgetKind::Square => Animation::Square,
            WidgetKind::Rain => Animation::Rain(Rain::new(size, rng)),
            WidgetKind::Typewriter { phrase } => {
                Animation::Typewriter(Typewriter::new(size, phrase))
            }
            WidgetKind::Tetris => Animation::Tetris(Tetris::new(size)),
            WidgetKind::Scramble { word } => Animation::Scramble(Scramble::new(word, rng)),
            WidgetKind::AsciiPulse => Animation::AsciiPulse(AsciiPulse::new(size, rng)),
        }
    }

    /// Tick period at medium speed, or `None` for static widgets.
    pub fn period_ms(&self) -> Option<u64> {
        match self {
            Animation::DotMatrix(_) => Some(250),
            Animation::CharColumn(_) => Some(250),
            Animation::PulseGrid(_) => Some(100),
            Animation::SignalBars(_) => Some(120),
            Animation::Spinner(_) => Some(80),
            Animation::Orbit(_) => Some(500),
            Animation::LifeGrid(_) => Some(400),
            Animation::Waveform(_) => Some(80),
            Animation::FadeChain(_) => Some(150),
            Animation::Breathe(_) => Some(100),
            Animation::BarCode(_) => Some(300),
            Animation::Dot | Animation::Square => None,
            Animation::Rain(_) => Some(80),
            Animation::Typewriter(_) => Some(120),
            Animation::Tetris(_) => Some(300),
            Animation::Scramble(_) => Some(60),
            Animation::AsciiPulse(_) => Some(100),
        }
    }

    /// Advance one tick.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self {
            Animation::DotMatrix(a) => a.step(),
            Animation::CharColumn(a) => a.step(rng),
            Animation::PulseGrid(a) => a.step(),
            Animation::SignalBars(a) => a.step(),
            Animation::Spinner(a) => a.step(),
            Animation::Orbit(a) => a.step(),
            Animation::LifeGrid(a) => a.step(rng),
            Animation::Waveform(a) => a.step(),
            Animation::FadeChain(a) => a.step(),
            Animation::Breathe(a) => a.step(),
            Animation::BarCode(a) => a.step(rng),
            Animation::Dot | Animation::Square => {}
            Animation::Rain(a) => a.step(),
            Animation::Typewriter(a) => a.step(),
            Animation::Tetris(a) => a.step(rng),
            Animation::Scramble(a) => a.step(rng),
            Animation::AsciiPulse(a) => a.step(),
        }
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        match self {
            Animation::DotMatrix(a) => a.lines(tint),
            Animation::CharColumn(a) => a.lines(tint),
            Animation::PulseGrid(a) => a.lines(tint),
            Animation::SignalBars(a) => a.lines(tint),
            Animation::Spinner(a) => a.lines(tint),
            Animation::Orbit(a) => a.lines(tint),
            Animation::LifeGrid(a) => a.lines(tint),
            Animation::Waveform(a) => a.lines(tint),
            Animation::FadeChain(a) => a.lines(tint),
            Animation::Breathe(a) => a.lines(tint),
            Animation::BarCode(a) => a.lines(tint),
            Animation::Dot => ornaments::dot(tint),
            Animation::Square => ornaments::square(tint),
            Animation::Rain(a) => a.lines(tint),
            Animation::Typewriter(a) => a.lines(tint),
            Animation::Tetris(a) => a.lines(tint),
            Animation::Scramble(a) => a.lines(tint),
            Animation::AsciiPulse(a) => a.lines(tint),
        }
    }
}

/// A widget mounted in a grid cell, together with the ticker that drives it.
///
/// Dropping the state releases the ticker; nothing outlives an unmount.
#[derive(Debug, Clone)]
pub struct WidgetState {
    kind: WidgetKind,
    size: Size,
    animation: Animation,
    ticker: Option<Ticker>,
}

impl WidgetState {
    pub fn mount<R: Rng + ?Sized>(
        kind: WidgetKind,
        size: Size,
        speed: AnimationSpeed,
        now_ms: u64,
        rng: &mut R,
    ) -> Self {
        let animation = Animation::build(kind, size, rng);
        let ticker = animation
            .period_ms()
            .map(|period| Ticker::new(speed.scale_period(period), now_ms));
        Self {
            kind,
            size,
            animation,
            ticker,
        }
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Whether this widget has a running ticker.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Apply every tick due at `now_ms`; returns how many ran.
    pub fn update<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> u32 {
        let Some(ticker) = self.ticker.as_mut() else {
            return 0;
        };
        let due = ticker.due(now_ms);
        for _ in 0..due {
            self.animation.step(rng);
        }
        due
    }

    /// Rescale the tick period; animation state is kept.
    pub fn set_speed(&mut self, speed: AnimationSpeed, now_ms: u64) {
        if let (Some(ticker), Some(period)) = (self.ticker.as_mut(), self.animation.period_ms()) {
            ticker.retime(speed.scale_period(period), now_ms);
        }
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        self.animation.lines(tint)
    }

    /// Draw centred in `area`, clipping whatever does not fit.
    pub fn render(&self, area: Rect, buf: &mut Buffer, tint: Tint) {
        if area.is_empty() {
            return;
        }
        let lines = self.lines(tint);
        let height = (lines.len() as u16).min(area.height);
        let top = area.y + (area.height - height) / 2;
        let target = Rect::new(area.x, top, area.width, height);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(target, buf);
    }
}
