// src/layout/mod.rs

//! Content layouts.
//!
//! Each layout turns typed records into a `LayoutResult`: up to `ROWS` display
//! lines (already normalized to the board alphabet, possibly left-padded with
//! `UNSET` for centering) and a `Background` for the cells the lines leave open.
//! Layouts never truncate generated content to make it fit; they fail instead.
//!
//! Layouts that make random choices take the random source as a parameter.

pub mod haiku;
pub mod quotes;
pub mod tasks;
pub mod ticker;
pub mod weather;

use crate::grid::{self, Background, Grid, ROWS};
use thiserror::Error;

pub use crate::grid::COLS;

/// Reasons a layout cannot produce a legal board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("cannot split line to fit {width} columns: {line:?}")]
    Unsplittable { line: String, width: usize },
    #[error("line is {len} characters wide, limit is {width}: {line:?}")]
    LineTooWide {
        line: String,
        len: usize,
        width: usize,
    },
    #[error("layout needs {lines} rows, board has {}", ROWS)]
    TooManyLines { lines: usize },
    #[error("no quote fits the board (pool of {pool})")]
    NoFittingQuote { pool: usize },
    #[error("no task belongs to a known category (of {total})")]
    NoTasks { total: usize },
    #[error("nothing to display for {0}")]
    EmptyContent(&'static str),
}

/// Display lines plus the fill rule for unclaimed cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutResult {
    pub lines: Vec<String>,
    pub background: Background,
}

impl LayoutResult {
    /// Builds a result, rejecting more than `ROWS` lines.
    ///
    /// # Errors
    /// `LayoutError::TooManyLines`.
    pub fn new(lines: Vec<String>, background: Background) -> Result<Self, LayoutError> {
        if lines.len() > ROWS {
            return Err(LayoutError::TooManyLines { lines: lines.len() });
        }
        Ok(Self { lines, background })
    }

    /// Composes the final dense grid.
    pub fn compose(&self) -> Grid {
        let background = self.background;
        grid::compose(&self.lines, move |r, c| background.glyph_at(r, c))
    }
}

/// Returns an error if `line` is wider than `width` characters.
pub(crate) fn check_width(line: &str, width: usize) -> Result<(), LayoutError> {
    let len = line.chars().count();
    if len > width {
        return Err(LayoutError::LineTooWide {
            line: line.to_string(),
            len,
            width,
        });
    }
    Ok(())
}

/// Pads `text` with spaces, or cuts it, to exactly `width` characters.
pub(crate) fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}
