// src/grid.rs

//! The fixed-size board matrix and grid composition.
//!
//! A `Grid` is always dense: every cell holds a displayable glyph. Layouts produce
//! sparse lines (which may contain `UNSET` padding) and a `Background`; `compose`
//! overlays the lines on the background so that nothing is left unset.

use crate::glyph::{self, GlyphCode, Tile, BLANK, UNSET, UNSET_CODE};
use log::trace;
use std::fmt;

/// Number of rows on the board.
pub const ROWS: usize = 6;
/// Number of columns on the board.
pub const COLS: usize = 22;

/// The board payload: one code per cell.
pub type CodeMatrix = [[GlyphCode; COLS]; ROWS];

/// Fill rule for cells that content lines do not claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    /// Every cell blank.
    Blank,
    /// Alternating tiles: `colors[(row + col) % 2]`.
    Checkerboard([Tile; 2]),
    /// Left column in the first tile, right column in the second, blank in between.
    SideBorder([Tile; 2]),
}

impl Background {
    /// Glyph for cell `(row, col)`.
    pub fn glyph_at(&self, row: usize, col: usize) -> char {
        match self {
            Background::Blank => BLANK,
            Background::Checkerboard(colors) => colors[(row + col) % 2].glyph(),
            Background::SideBorder([left, right]) => {
                if col == 0 {
                    left.glyph()
                } else if col == COLS - 1 {
                    right.glyph()
                } else {
                    BLANK
                }
            }
        }
    }
}

/// A dense `ROWS` x `COLS` matrix of glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[char; COLS]; ROWS],
}

impl Grid {
    /// A grid filled entirely from `background`.
    pub fn filled(background: impl Fn(usize, usize) -> char) -> Self {
        let mut cells = [[BLANK; COLS]; ROWS];
        for (r, row) in cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = background(r, c);
            }
        }
        Self { cells }
    }

    /// Glyph at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the position is outside the board.
    pub fn get(&self, row: usize, col: usize) -> char {
        self.cells[row][col]
    }

    /// The grid's rows.
    pub fn rows(&self) -> &[[char; COLS]; ROWS] {
        &self.cells
    }

    /// Row `row` as a string.
    pub fn row_string(&self, row: usize) -> String {
        self.cells[row].iter().collect()
    }

    /// True if no cell holds `UNSET`.
    pub fn is_dense(&self) -> bool {
        self.cells.iter().flatten().all(|&c| c != UNSET)
    }

    /// Encodes every cell through the glyph codec.
    pub fn encode(&self) -> CodeMatrix {
        let mut codes = [[0; COLS]; ROWS];
        for (out_row, row) in codes.iter_mut().zip(self.cells.iter()) {
            for (code, &c) in out_row.iter_mut().zip(row.iter()) {
                *code = glyph::encode(c);
            }
        }
        codes
    }

    /// Decodes a code matrix. Undefined codes become `UNSET`.
    pub fn decode(codes: &CodeMatrix) -> Self {
        let mut cells = [[UNSET; COLS]; ROWS];
        for (out_row, row) in cells.iter_mut().zip(codes.iter()) {
            for (cell, &code) in out_row.iter_mut().zip(row.iter()) {
                *cell = glyph::decode(code);
            }
        }
        Self { cells }
    }

    /// Positions whose code is `UNSET_CODE`, i.e. cells the board cannot show.
    pub fn unencodable_cells(&self) -> Vec<(usize, usize)> {
        let codes = self.encode();
        let mut bad = Vec::new();
        for (r, row) in codes.iter().enumerate() {
            for (c, &code) in row.iter().enumerate() {
                if code == UNSET_CODE {
                    bad.push((r, c));
                }
            }
        }
        bad
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            writeln!(f, "{}", self.row_string(row))?;
        }
        Ok(())
    }
}

/// Overlays content `lines` onto `background`.
///
/// Line `r` claims column `c` when it has a character there that is not `UNSET`;
/// every other cell comes from `background(r, c)`.
///
/// # Panics
/// Panics if there are more than `ROWS` lines or any line is longer than `COLS`
/// characters. Both indicate a layout bug.
pub fn compose<S: AsRef<str>>(lines: &[S], background: impl Fn(usize, usize) -> char) -> Grid {
    assert!(
        lines.len() <= ROWS,
        "layout produced {} lines, board has {} rows",
        lines.len(),
        ROWS
    );
    let mut grid = Grid::filled(background);
    for (r, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let width = line.chars().count();
        assert!(
            width <= COLS,
            "line {} is {} characters wide, board has {} columns: {:?}",
            r,
            width,
            COLS,
            line
        );
        for (c, ch) in line.chars().enumerate() {
            if ch != UNSET {
                grid.cells[r][c] = ch;
            }
        }
        trace!("compose: row {} = {:?}", r, grid.row_string(r));
    }
    grid
}

#[cfg(test)]
mod tests;
