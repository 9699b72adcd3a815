// src/render.rs

//! Runs one content job: record in, dense grid out, optionally sent to a transport.
//!
//! A job that fails to lay out is aborted before anything reaches the board.

use crate::grid::{Grid, COLS};
use crate::layout::tasks::TaskCategory;
use crate::layout::weather::{self, DescriptionCache};
use crate::layout::{haiku, quotes, tasks, ticker, LayoutError, LayoutResult};
use crate::records::{ContentRecord, ForecastDay, HourlyPeriod};
use crate::transport::Transport;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use log::{error, info};
use rand::Rng;
use serde::Deserialize;

/// Job kinds accepted by [`parse_record`].
pub const KINDS: [&str; 5] = ["haiku", "weather", "ticker", "tasks", "quotes"];

/// Everything a layout needs besides its record and randomness.
#[derive(Debug)]
pub struct RenderContext<'a> {
    /// The date weather rows are compared against.
    pub today: NaiveDate,
    pub categories: &'a [TaskCategory],
    /// Memoizes weather description normalization across jobs.
    pub cache: Option<&'a mut DescriptionCache>,
}

/// Dispatches a record to its layout.
pub fn layout_record(
    record: &ContentRecord,
    ctx: &mut RenderContext<'_>,
    rng: &mut impl Rng,
) -> Result<LayoutResult, LayoutError> {
    match record {
        ContentRecord::Haiku(text) => haiku::layout(text, rng),
        ContentRecord::Weather(days) => weather::layout(days, ctx.today, ctx.cache.as_deref_mut()),
        ContentRecord::Ticker(quotes) => ticker::layout(quotes, rng),
        ContentRecord::Tasks(list) => tasks::layout(list, ctx.categories, rng),
        ContentRecord::Quotes(pool) => quotes::layout(pool, rng),
    }
}

/// Lays out and composes a record.
pub fn render(
    record: &ContentRecord,
    ctx: &mut RenderContext<'_>,
    rng: &mut impl Rng,
) -> Result<Grid, LayoutError> {
    match layout_record(record, ctx, rng) {
        Ok(result) => {
            info!(
                "Rendered {} job: {} line(s), {:?}",
                record.kind(),
                result.lines.len(),
                result.background
            );
            Ok(result.compose())
        }
        Err(err) => {
            error!("{} job aborted: {}", record.kind(), err);
            Err(err)
        }
    }
}

/// Renders a record and writes it to `transport`.
pub fn send(
    record: &ContentRecord,
    ctx: &mut RenderContext<'_>,
    rng: &mut impl Rng,
    transport: &mut dyn Transport,
) -> Result<Grid> {
    let grid = render(record, ctx, rng)
        .with_context(|| format!("Failed to lay out {} job", record.kind()))?;
    transport
        .write(&grid)
        .with_context(|| format!("Failed to send {} job", record.kind()))?;
    info!("{} job sent.", record.kind());
    Ok(grid)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WeatherInput {
    Daily(Vec<ForecastDay>),
    Hourly(Vec<HourlyPeriod>),
}

/// Builds a record of `kind` from a JSON document.
///
/// Weather accepts either daily aggregates or raw hourly periods. A haiku may be a
/// JSON string or plain text.
pub fn parse_record(kind: &str, text: &str) -> Result<ContentRecord> {
    let record = match kind {
        "haiku" => ContentRecord::Haiku(
            serde_json::from_str::<String>(text).unwrap_or_else(|_| text.trim_end().to_string()),
        ),
        "weather" => match serde_json::from_str(text).context("Invalid weather data")? {
            WeatherInput::Daily(days) => ContentRecord::Weather(days),
            WeatherInput::Hourly(periods) => {
                ContentRecord::Weather(weather::aggregate_days(&periods))
            }
        },
        "ticker" => ContentRecord::Ticker(serde_json::from_str(text).context("Invalid ticker data")?),
        "tasks" => ContentRecord::Tasks(serde_json::from_str(text).context("Invalid task data")?),
        "quotes" => ContentRecord::Quotes(serde_json::from_str(text).context("Invalid quote data")?),
        other => bail!("unknown job kind {:?}, expected one of {:?}", other, KINDS),
    };
    Ok(record)
}

/// Frames a grid for printing on a terminal.
pub fn preview(grid: &Grid) -> String {
    let edge = format!("+{}+", "-".repeat(COLS));
    let mut out = String::new();
    out.push_str(&edge);
    out.push('\n');
    for row in grid.rows() {
        out.push('|');
        out.extend(row.iter());
        out.push_str("|\n");
    }
    out.push_str(&edge);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests;
