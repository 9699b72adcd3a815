// src/layout/quotes.rs

//! Quote layout: one randomly chosen quotation, centered, with its attribution
//! beneath and a colored stripe down each side of the board.

use super::haiku::pick_two;
use super::{LayoutError, LayoutResult, COLS};
use crate::glyph::{normalize_line, normalize_text};
use crate::grid::{Background, ROWS};
use crate::records::Quote;
use crate::wrap::{center, word_wrap};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Text and attribution stay clear of the border columns.
const TEXT_WIDTH: usize = COLS - 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Blank,
    Text(usize),
    Attribution,
}

use Slot::{Attribution as A, Blank as B, Text as T};

/// Row placement by number of wrapped text lines (1 through 5).
const PLACEMENTS: [[Slot; ROWS]; ROWS - 1] = [
    [B, T(0), B, B, A, B],
    [B, T(0), T(1), B, A, B],
    [B, T(0), T(1), T(2), A, B],
    [T(0), T(1), T(2), T(3), A, B],
    [T(0), T(1), T(2), T(3), T(4), A],
];

/// A quote that fits the board, already wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FittedQuote {
    pub lines: Vec<String>,
    pub attribution: String,
}

/// Wraps a quote, or `None` if it cannot fit alongside its attribution.
pub fn fit_quote(quote: &Quote) -> Option<FittedQuote> {
    let lines = word_wrap(&normalize_text(&quote.text), TEXT_WIDTH);
    let attribution = format!("- {}", normalize_line(quote.author.trim()));
    let fits = !lines.is_empty()
        && lines.len() < ROWS
        && lines.iter().all(|l| l.chars().count() <= TEXT_WIDTH)
        && attribution.chars().count() <= TEXT_WIDTH;
    fits.then_some(FittedQuote { lines, attribution })
}

/// Places a fitted quote on the board rows.
pub fn place(quote: &FittedQuote) -> Vec<String> {
    let placement = &PLACEMENTS[quote.lines.len() - 1];
    placement
        .iter()
        .map(|slot| match slot {
            Slot::Blank => String::new(),
            Slot::Text(i) => center(&quote.lines[*i], COLS),
            Slot::Attribution => center(&quote.attribution, COLS),
        })
        .collect()
}

/// Picks one fitting quote from `pool` and lays it out.
///
/// # Errors
/// `NoFittingQuote` if nothing in the pool fits.
pub fn layout(pool: &[Quote], rng: &mut impl Rng) -> Result<LayoutResult, LayoutError> {
    let fitting: Vec<FittedQuote> = pool.iter().filter_map(fit_quote).collect();
    let chosen = fitting
        .choose(rng)
        .ok_or(LayoutError::NoFittingQuote { pool: pool.len() })?;
    debug!(
        "quotes: {} of {} fit, chose {:?}",
        fitting.len(),
        pool.len(),
        chosen.attribution
    );
    LayoutResult::new(place(chosen), Background::SideBorder(pick_two(rng)))
}
