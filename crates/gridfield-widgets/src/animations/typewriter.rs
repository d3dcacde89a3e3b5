//! Phrases typed out, held, and erased one character per tick.

use ratatui::{
    layout::Size,
    text::{Line, Span},
};

use crate::chars::{CURSOR, PHRASES};
use crate::color::Tint;

/// Ticks a finished phrase stays on screen.
const HOLD_TICKS: u16 = 14;
/// Ticks between erasing one phrase and typing the next.
const PAUSE_TICKS: u16 = 4;
/// Ticks per cursor blink half-period.
const BLINK_TICKS: u64 = 4;
const PROMPT: &str = "> ";
const TEXT_OPACITY: f32 = 0.25;
const PROMPT_OPACITY: f32 = 0.12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Typing,
    Holding(u16),
    Erasing,
    Pausing(u16),
}

/// Typewriter widget.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrase: usize,
    shown: usize,
    stage: Stage,
    ticks: u64,
    width: usize,
}

impl Typewriter {
    pub fn new(size: Size, phrase: u16) -> Self {
        Self {
            phrase: phrase as usize % PHRASES.len(),
            shown: 0,
            stage: Stage::Typing,
            ticks: 0,
            width: size.width as usize,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn phrase_len(&self) -> usize {
        PHRASES[self.phrase].chars().count()
    }

    /// Text typed so far.
    pub fn text(&self) -> String {
        PHRASES[self.phrase].chars().take(self.shown).collect()
    }

    pub fn step(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
        self.stage = match self.stage {
            Stage::Typing => {
                self.shown = (self.shown + 1).min(self.phrase_len());
                if self.shown == self.phrase_len() {
                    Stage::Holding(HOLD_TICKS)
                } else {
                    Stage::Typing
                }
            }
            Stage::Holding(0) => Stage::Erasing,
            Stage::Holding(n) => Stage::Holding(n - 1),
            Stage::Erasing => {
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    self.phrase = (self.phrase + 1) % PHRASES.len();
                    Stage::Pausing(PAUSE_TICKS)
                } else {
                    Stage::Erasing
                }
            }
            Stage::Pausing(0) => Stage::Typing,
            Stage::Pausing(n) => Stage::Pausing(n - 1),
        };
    }

    fn cursor_on(&self) -> bool {
        match self.stage {
            Stage::Typing | Stage::Erasing => true,
            Stage::Holding(_) | Stage::Pausing(_) => (self.ticks / BLINK_TICKS) % 2 == 0,
        }
    }

    pub fn lines(&self, tint: Tint) -> Vec<Line<'static>> {
        // Keep the tail of long phrases visible next to the cursor.
        let room = self.width.saturating_sub(PROMPT.len() + 1);
        let text = self.text();
        let skip = text.chars().count().saturating_sub(room);
        let visible: String = text.chars().skip(skip).collect();

        let cursor = if self.cursor_on() { CURSOR } else { ' ' };
        vec![Line::from(vec![
            Span::styled(PROMPT, tint.style(PROMPT_OPACITY)),
            Span::styled(visible, tint.style(TEXT_OPACITY)),
            tint.glyph(cursor, TEXT_OPACITY),
        ])]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_holds_erases_then_moves_on() {
        let mut typewriter = Typewriter::new(Size::new(30, 1), 3);
        let phrase = PHRASES[3];
        let len = phrase.chars().count();

        for i in 1..=len {
            typewriter.step();
            assert_eq!(typewriter.text(), phrase.chars().take(i).collect::<String>());
        }
        assert_eq!(typewriter.stage(), Stage::Holding(HOLD_TICKS));

        for _ in 0..=HOLD_TICKS {
            typewriter.step();
            assert_eq!(typewriter.text(), phrase);
        }
        assert_eq!(typewriter.stage(), Stage::Erasing);

        for _ in 0..len {
            typewriter.step();
        }
        assert_eq!(typewriter.text(), "");
        assert_eq!(typewriter.stage(), Stage::Pausing(PAUSE_TICKS));

        for _ in 0..=PAUSE_TICKS {
            typewriter.step();
        }
        assert_eq!(typewriter.stage(), Stage::Typing);
        typewriter.step();
        assert_eq!(typewriter.text(), PHRASES[4].chars().take(1).collect::<String>());
    }

    #[test]
    fn test_phrase_index_wraps() {
        let typewriter = Typewriter::new(Size::new(30, 1), PHRASES.len() as u16 + 1);
        assert_eq!(typewriter.phrase, 1);
    }

    #[test]
    fn test_narrow_cell_shows_tail() {
        let mut typewriter = Typewriter::new(Size::new(6, 1), 2);
        for _ in 0..PHRASES[2].len() {
            typewriter.step();
        }
        let line = &typewriter.lines(Tint::new((255, 255, 255)))[0];
        assert_eq!(line.width(), 6);
        let shown = line.to_string();
        assert!(shown.starts_with("> "));
        assert!(shown.contains("{}"));
        assert!(!shown.contains("fn"));
    }
}
