// src/layout/ticker.rs

//! Ticker tape layout.
//!
//! Two strategies are picked between at random on every refresh:
//!
//! * `SingleColumn` shows the six biggest movers with their prices:
//!   `AAPL 🟩  1.23% 150.00`
//! * `TwoColumn` shows twelve movers side by side, short symbols on the left and
//!   five-letter symbols on the right: `IBM 🟩 1.2% GOOGL🟥-3.4%`
//!
//! The tile after the symbol is red for a loss and green otherwise.

use super::{check_width, LayoutError, LayoutResult, COLS};
use crate::glyph::{normalize_line, Tile};
use crate::grid::{Background, ROWS};
use crate::records::TickerQuote;
use log::{debug, warn};
use rand::Rng;
use std::cmp::Ordering;

/// Widest symbol the columns can align.
const MAX_SYMBOL_LEN: usize = 5;
/// Symbol field width in the left half of the two-column layout.
const SHORT_SYMBOL_LEN: usize = 4;
/// Percent field of a two-column cell.
const PERCENT_WIDTH: usize = 4;
/// Prices at or above this are shown as grouped whole numbers.
const WHOLE_PRICE_THRESHOLD: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    SingleColumn,
    TwoColumn,
}

/// Lays out quotes with a randomly chosen strategy.
///
/// # Errors
/// See `layout_with`.
pub fn layout(quotes: &[TickerQuote], rng: &mut impl Rng) -> Result<LayoutResult, LayoutError> {
    let strategy = if rng.gen_bool(0.5) {
        Strategy::SingleColumn
    } else {
        Strategy::TwoColumn
    };
    layout_with(quotes, strategy)
}

/// Lays out quotes with the given strategy.
///
/// Falls back to `SingleColumn` when the two-column split would put a five-letter
/// symbol in the left half.
///
/// # Errors
/// `EmptyContent` if no quote has a usable symbol; `LineTooWide` if a price or
/// percentage is too large for its column.
pub fn layout_with(
    quotes: &[TickerQuote],
    strategy: Strategy,
) -> Result<LayoutResult, LayoutError> {
    let quotes = usable(quotes);
    if quotes.is_empty() {
        return Err(LayoutError::EmptyContent("ticker"));
    }
    let lines = match strategy {
        Strategy::SingleColumn => single_column(quotes),
        Strategy::TwoColumn => {
            let paired = two_column(&quotes);
            paired.unwrap_or_else(|| {
                debug!("ticker: left column has a long symbol, using single column");
                single_column(quotes)
            })
        }
    };
    for line in &lines {
        check_width(line, COLS)?;
    }
    LayoutResult::new(lines, Background::Blank)
}

/// Normalizes symbols and drops quotes whose symbol cannot be aligned.
fn usable(quotes: &[TickerQuote]) -> Vec<TickerQuote> {
    quotes
        .iter()
        .filter_map(|quote| {
            let symbol = normalize_line(quote.symbol.trim());
            let len = symbol.chars().count();
            if len == 0 || len > MAX_SYMBOL_LEN {
                warn!("ticker: dropping quote with symbol {:?}", quote.symbol);
                return None;
            }
            Some(TickerQuote {
                symbol,
                ..quote.clone()
            })
        })
        .collect()
}

/// Descending by absolute percent change. Stable, so equal movers keep input order.
fn sort_by_move(quotes: &mut [TickerQuote]) {
    quotes.sort_by(|a, b| {
        b.percent_change
            .abs()
            .partial_cmp(&a.percent_change.abs())
            .unwrap_or(Ordering::Equal)
    });
}

fn sign_tile(change: f64) -> char {
    if change < 0.0 {
        Tile::Red.glyph()
    } else {
        Tile::Green.glyph()
    }
}

fn single_column(mut quotes: Vec<TickerQuote>) -> Vec<String> {
    sort_by_move(&mut quotes);
    let price_width = COLS - (MAX_SYMBOL_LEN + 1 + 6 + 2);
    quotes
        .iter()
        .take(ROWS)
        .map(|q| {
            format!(
                "{:<5}{}{:>6.2}% {:>width$}",
                q.symbol,
                sign_tile(q.percent_change),
                q.percent_change,
                format_price(q.price),
                width = price_width
            )
        })
        .collect()
}

/// `None` when a five-letter symbol lands in the left half.
fn two_column(quotes: &[TickerQuote]) -> Option<Vec<String>> {
    let mut top = quotes.to_vec();
    sort_by_move(&mut top);
    top.truncate(2 * ROWS);

    let (mut ordered, long): (Vec<TickerQuote>, Vec<TickerQuote>) = top
        .into_iter()
        .partition(|q| q.symbol.chars().count() <= SHORT_SYMBOL_LEN);
    ordered.extend(long);

    let split = ordered.len().min(ROWS);
    let mut right = ordered.split_off(split);
    let mut left = ordered;
    if left
        .iter()
        .any(|q| q.symbol.chars().count() > SHORT_SYMBOL_LEN)
    {
        return None;
    }
    sort_by_move(&mut left);
    sort_by_move(&mut right);

    let rows = left
        .iter()
        .enumerate()
        .map(|(i, l)| {
            let left_cell = format!(
                "{:<4}{}{:>4}%",
                l.symbol,
                sign_tile(l.percent_change),
                compact_percent(l.percent_change)
            );
            match right.get(i) {
                Some(r) => format!(
                    "{} {:<5}{}{:>4}%",
                    left_cell,
                    r.symbol,
                    sign_tile(r.percent_change),
                    compact_percent(r.percent_change)
                ),
                None => left_cell,
            }
        })
        .collect();
    Some(rows)
}

/// One decimal when that fits in four columns, otherwise none.
pub fn compact_percent(change: f64) -> String {
    let one_decimal = format!("{:.1}", change);
    if one_decimal.len() <= PERCENT_WIDTH {
        one_decimal
    } else {
        format!("{:.0}", change)
    }
}

/// Two decimals under 10,000; grouped whole numbers above.
pub fn format_price(price: f64) -> String {
    if price < WHOLE_PRICE_THRESHOLD {
        return format!("{:.2}", price);
    }
    let digits = format!("{:.0}", price);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
