// src/layout/haiku.rs

//! Haiku layout: centered poem lines over a random two-color checkerboard.

use super::{check_width, LayoutError, LayoutResult, COLS};
use crate::glyph::{normalize_text, Tile, PALETTE};
use crate::grid::{Background, ROWS};
use crate::wrap::{center, split_lines, wrap_line};
use log::debug;
use rand::Rng;

/// Two columns stay free as margin.
const TEXT_WIDTH: usize = COLS - 2;

/// Poems with at most this many lines get a blank line on top.
const SHORT_POEM_LINES: usize = 4;

/// Lays out a poem.
///
/// Lines are wrapped to `COLS - 2`, centered across the board, and nudged down a
/// row when the poem is short.
///
/// # Errors
/// Propagates `Unsplittable`; `LineTooWide` if a wrapped segment is still wider
/// than `COLS - 2`; `TooManyLines` if the poem needs more than `ROWS` rows; `EmptyContent`
/// for a blank poem.
pub fn layout(text: &str, rng: &mut impl Rng) -> Result<LayoutResult, LayoutError> {
    let mut lines = Vec::new();
    for line in split_lines(text) {
        for segment in wrap_line(&normalize_text(&line), TEXT_WIDTH)? {
            if segment.is_empty() {
                continue;
            }
            check_width(&segment, TEXT_WIDTH)?;
            lines.push(center(&segment, COLS));
        }
    }
    if lines.is_empty() {
        return Err(LayoutError::EmptyContent("haiku"));
    }
    if lines.len() > ROWS {
        return Err(LayoutError::TooManyLines { lines: lines.len() });
    }
    if lines.len() <= SHORT_POEM_LINES {
        lines.insert(0, String::new());
    }

    let colors = pick_two(rng);
    debug!("haiku: {} rows, checkerboard {}{}", lines.len(), colors[0], colors[1]);
    LayoutResult::new(lines, Background::Checkerboard(colors))
}

/// Two distinct palette colors, uniformly at random.
pub(crate) fn pick_two(rng: &mut impl Rng) -> [Tile; 2] {
    let first = rng.gen_range(0..PALETTE.len());
    // Draw from the remaining entries, then skip over `first`.
    let mut second = rng.gen_range(0..PALETTE.len() - 1);
    if second >= first {
        second += 1;
    }
    [PALETTE[first], PALETTE[second]]
}
