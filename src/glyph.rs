// src/glyph.rs

//! Defines the board's glyph alphabet and the `GlyphCodec` that maps glyphs to
//! the device-native integer codes.
//!
//! A glyph is a single `char`: an upper-case letter, a digit, one of a small set of
//! punctuation marks, the degree sign, or one of the color tiles (`Tile`). The
//! special `UNSET` character is not displayable; it marks cells that the
//! background should fill (see `crate::grid`).
//!
//! Both lookup directions are built once from `GLYPH_TABLE`, so adding a glyph to
//! that table updates encoding and decoding together.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Device-native integer representation of a glyph.
pub type GlyphCode = u8;

/// Placeholder meaning "let the background show through". Never sent to the board.
pub const UNSET: char = '\u{2400}';

/// Reserved code for `UNSET`. Lies outside the device alphabet (0-71).
pub const UNSET_CODE: GlyphCode = 255;

/// The blank glyph (code 0).
pub const BLANK: char = ' ';

/// Color tiles supported by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tile {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Violet,
    White,
    Black,
    /// Solid fill; its color depends on the board model.
    Filled,
}

/// The eight color tiles used for randomized backgrounds.
pub const PALETTE: [Tile; 8] = [
    Tile::Red,
    Tile::Orange,
    Tile::Yellow,
    Tile::Green,
    Tile::Blue,
    Tile::Violet,
    Tile::White,
    Tile::Black,
];

impl Tile {
    /// The glyph used to represent this tile in board text.
    pub const fn glyph(self) -> char {
        match self {
            Tile::Red => '🟥',
            Tile::Orange => '🟧',
            Tile::Yellow => '🟨',
            Tile::Green => '🟩',
            Tile::Blue => '🟦',
            Tile::Violet => '🟪',
            Tile::White => '⬜',
            Tile::Black => '⬛',
            Tile::Filled => '🟫',
        }
    }

    /// Returns the tile for a glyph, if the glyph is a tile.
    pub fn from_glyph(c: char) -> Option<Tile> {
        PALETTE
            .iter()
            .chain(std::iter::once(&Tile::Filled))
            .copied()
            .find(|tile| tile.glyph() == c)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// The single declarative table both codec directions are built from.
const GLYPH_TABLE: &[(char, GlyphCode)] = &[
    (' ', 0),
    ('A', 1),
    ('B', 2),
    ('C', 3),
    ('D', 4),
    ('E', 5),
    ('F', 6),
    ('G', 7),
    ('H', 8),
    ('I', 9),
    ('J', 10),
    ('K', 11),
    ('L', 12),
    ('M', 13),
    ('N', 14),
    ('O', 15),
    ('P', 16),
    ('Q', 17),
    ('R', 18),
    ('S', 19),
    ('T', 20),
    ('U', 21),
    ('V', 22),
    ('W', 23),
    ('X', 24),
    ('Y', 25),
    ('Z', 26),
    ('1', 27),
    ('2', 28),
    ('3', 29),
    ('4', 30),
    ('5', 31),
    ('6', 32),
    ('7', 33),
    ('8', 34),
    ('9', 35),
    ('0', 36),
    ('!', 37),
    ('@', 38),
    ('#', 39),
    ('$', 40),
    ('(', 41),
    (')', 42),
    ('-', 44),
    ('+', 46),
    ('&', 47),
    ('=', 48),
    (';', 49),
    (':', 50),
    ('\'', 52),
    ('"', 53),
    ('%', 54),
    (',', 55),
    ('.', 56),
    ('/', 59),
    ('?', 60),
    ('°', 62),
    (Tile::Red.glyph(), 63),
    (Tile::Orange.glyph(), 64),
    (Tile::Yellow.glyph(), 65),
    (Tile::Green.glyph(), 66),
    (Tile::Blue.glyph(), 67),
    (Tile::Violet.glyph(), 68),
    (Tile::White.glyph(), 69),
    (Tile::Black.glyph(), 70),
    (Tile::Filled.glyph(), 71),
];

/// Bidirectional glyph <-> code mapping. Immutable once built.
#[derive(Debug, Clone)]
pub struct GlyphCodec {
    to_code: HashMap<char, GlyphCode>,
    to_glyph: HashMap<GlyphCode, char>,
}

/// Process-wide codec, built on first use.
pub static CODEC: Lazy<GlyphCodec> = Lazy::new(|| GlyphCodec::from_table(GLYPH_TABLE));

impl GlyphCodec {
    /// Builds both lookup maps from one table.
    ///
    /// # Panics
    /// Panics if the table maps a glyph or a code twice; the mapping must be a bijection.
    pub fn from_table(table: &[(char, GlyphCode)]) -> Self {
        let mut to_code = HashMap::with_capacity(table.len());
        let mut to_glyph = HashMap::with_capacity(table.len());
        for &(glyph, code) in table {
            assert!(
                to_code.insert(glyph, code).is_none(),
                "glyph {:?} defined twice",
                glyph
            );
            assert!(
                to_glyph.insert(code, glyph).is_none(),
                "code {} defined twice",
                code
            );
        }
        Self { to_code, to_glyph }
    }

    /// Code for the upper-cased glyph, or `UNSET_CODE` if the glyph is not in the alphabet.
    pub fn encode(&self, glyph: char) -> GlyphCode {
        self.to_code
            .get(&canonical(glyph))
            .copied()
            .unwrap_or(UNSET_CODE)
    }

    /// Glyph for a code, or `UNSET` if the code is not in the alphabet.
    pub fn decode(&self, code: GlyphCode) -> char {
        self.to_glyph.get(&code).copied().unwrap_or(UNSET)
    }

    /// Whether the glyph (after upper-casing) is displayable.
    pub fn is_defined(&self, glyph: char) -> bool {
        self.to_code.contains_key(&canonical(glyph))
    }

    /// Iterates over every defined `(glyph, code)` pair in code order.
    pub fn entries(&self) -> impl Iterator<Item = (char, GlyphCode)> + '_ {
        let mut codes: Vec<GlyphCode> = self.to_glyph.keys().copied().collect();
        codes.sort_unstable();
        codes.into_iter().map(move |code| (self.to_glyph[&code], code))
    }
}

/// Shorthand for `CODEC.encode`.
pub fn encode(glyph: char) -> GlyphCode {
    CODEC.encode(glyph)
}

/// Shorthand for `CODEC.decode`.
pub fn decode(code: GlyphCode) -> char {
    CODEC.decode(code)
}

/// Upper-cases a single glyph. Multi-char upper-case expansions (e.g. `ß`) are left alone.
fn canonical(glyph: char) -> char {
    let mut upper = glyph.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(c), None) => c,
        _ => glyph,
    }
}

/// Normalizes free text to the board alphabet.
///
/// Upper-cases, folds typographic quotes and dashes to their plain forms, and replaces
/// anything else the board cannot show with a blank. `UNSET` and `'\n'` pass through
/// untouched, so multi-line text keeps its line structure.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '`' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\t' => BLANK,
            other => other,
        })
        .map(|c| {
            if c == UNSET || c == '\n' {
                c
            } else if CODEC.is_defined(c) {
                canonical(c)
            } else {
                BLANK
            }
        })
        .collect()
}

/// Like `normalize_text`, but line breaks become blanks too.
pub fn normalize_line(text: &str) -> String {
    normalize_text(text).replace('\n', " ")
}
