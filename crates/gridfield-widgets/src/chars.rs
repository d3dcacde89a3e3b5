//! Glyph tables for the leaf animations.

/// Glyphs for the mutating character column and the rain.
pub const CHAR_POOL: &[char] = &[
    '0', '1', '{', '}', '[', ']', '<', '>', '+', '-', '*', '/', '=', '_', ':', '|', '~', '&',
];

/// Glyphs a scrambled word flickers through before resolving.
pub const SCRAMBLE_CHARS: &[char] = &[
    '!', '@', '#', '$', '%', '&', '*', '_', '+', '-', '=', '<', '>', '[', ']', '{', '}', '|',
    '/', '\\', '?', '~', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// Glyphs scattered across the pulsing ASCII block.
pub const ASCII_CHARSET: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '+', '-', '=', '[', ']', '{', '}', '|', ';', ':',
    '<', '>', '?', '/', '~', '\\', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b',
    'c', 'd', 'e', 'f', '_',
];

/// Braille spinner frames.
pub const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Partial block glyphs, one eighth to full.
pub const EIGHTHS: &[char] = &['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Phrases for the typewriter.
pub const PHRASES: &[&str] = &[
    "cargo run",
    "git push",
    "fn main() {}",
    "ship it",
    "hello, world",
    "make check",
    "ls -la",
    "cd ~/code",
    "todo: sleep",
    "it works",
];

/// Words for the scramble.
pub const WORDS: &[&str] = &[
    "build", "ship", "learn", "write", "debug", "share", "iterate", "deploy",
];

pub const DOT: char = '●';
pub const BLOCK: char = '■';
pub const STRIPE: char = '▌';
pub const WAVE: char = '│';
pub const CURSOR: char = '▋';
