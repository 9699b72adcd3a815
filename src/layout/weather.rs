// src/layout/weather.rs

//! Weather layout: one row per forecast day.
//!
//! Each row is `WWW` (weekday), the temperature right-justified in four columns
//! (`" 72°"`), a condition icon tile, a space, and the day's most frequent short
//! forecast squeezed into the remaining columns.
//!
//! Short forecasts are normalized first: alternate text after `/` is dropped,
//! qualifiers are removed or folded to `SLIGHT`, and precipitation synonyms fold
//! into `RAIN`, `SNOW` and `TSTMS`. The icon comes from the first condition whose
//! keywords appear in the normalized text.

use super::{fit, LayoutError, LayoutResult, COLS};
use crate::glyph::{normalize_line, Tile};
use crate::grid::{Background, ROWS};
use crate::records::{ForecastDay, HourlyPeriod};
use chrono::{NaiveDate, Timelike};
use log::{debug, trace};
use std::collections::{BTreeMap, HashMap};

/// Weekday (3) + temperature (4) + icon (1) + space (1).
const PREFIX_WIDTH: usize = 9;
/// Columns left for the description.
pub const DESCRIPTION_WIDTH: usize = COLS - PREFIX_WIDTH;

/// Glyph shown when no condition matches.
pub const UNKNOWN_ICON: char = '?';

/// Last hour of the day; a "today" bucket reaching it is treated as evening.
const NIGHT_END_HOUR: u32 = 23;

/// Multi-word phrases rewritten before token folding.
const PHRASES: &[(&str, &str)] = &[
    ("SHOWERS AND THUNDERSTORMS", "TSTMS"),
    ("RAIN SHOWERS", "RAIN"),
    ("SNOW SHOWERS", "SNOW"),
    ("SLIGHT CHANCE", "SLIGHT"),
    ("AREAS OF", ""),
];

/// Folds one token. `None` drops it.
fn fold_token(token: &str) -> Option<&str> {
    match token {
        "INCREASING" | "BECOMING" | "PATCHY" | "AREAS" | "FREEZING" => None,
        "CHANCE" | "ISOLATED" | "SCATTERED" => Some("SLIGHT"),
        "SHOWERS" | "SHOWER" | "DRIZZLE" | "SPRINKLES" => Some("RAIN"),
        "FLURRIES" | "SNOWFALL" => Some("SNOW"),
        "THUNDERSTORMS" | "THUNDERSTORM" | "T-STORMS" | "TSTORMS" => Some("TSTMS"),
        other => Some(other),
    }
}

/// Normalizes one raw short forecast to upper-case canonical words.
pub fn normalize_description(raw: &str) -> String {
    let primary = raw.split('/').next().unwrap_or_default();
    let mut text = normalize_line(primary.trim());
    for (phrase, replacement) in PHRASES {
        text = text.replace(phrase, replacement);
    }

    let mut words: Vec<&str> = Vec::new();
    for token in text.split_whitespace().filter_map(fold_token) {
        if words.last() != Some(&token) {
            words.push(token);
        }
    }
    words.join(" ")
}

/// Packs words into exactly `width` columns.
///
/// Words are appended while they fit; the first word that would overflow ends the
/// line and everything after it is dropped.
pub fn pack(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut len = 0;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let needed = if len == 0 { word_len } else { len + 1 + word_len };
        if needed > width {
            break;
        }
        if len > 0 {
            out.push(' ');
        }
        out.push_str(word);
        len = needed;
    }
    fit(&out, width)
}

/// Memo of `normalize_description`, keyed by raw text.
///
/// Purely an optimization; results are identical with or without it.
#[derive(Debug, Default)]
pub struct DescriptionCache {
    entries: HashMap<String, String>,
}

impl DescriptionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalized form of `raw`, computed once per distinct input.
    pub fn normalize(&mut self, raw: &str) -> String {
        if let Some(hit) = self.entries.get(raw) {
            return hit.clone();
        }
        let normalized = normalize_description(raw);
        self.entries.insert(raw.to_string(), normalized.clone());
        normalized
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Weather condition categories, in icon priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Hot,
    Dust,
    Sunny,
    Windy,
    Cold,
    Cloudy,
    Rain,
    Snow,
}

const CONDITIONS: &[(Condition, &[&str])] = &[
    (Condition::Hot, &["HOT"]),
    (Condition::Dust, &["DUST", "SAND"]),
    (Condition::Sunny, &["SUNNY", "CLEAR", "FAIR", "HAZE"]),
    (Condition::Windy, &["WINDY", "BREEZY", "BLUSTERY"]),
    (Condition::Cold, &["FROST", "COLD"]),
    (
        Condition::Cloudy,
        &["CLOUD", "OVERCAST", "FOG", "SMOKE", "ASH", "TSTMS"],
    ),
    (Condition::Rain, &["SLEET", "RAIN", "SHOWER", "SPOUTS"]),
    (Condition::Snow, &["SNOW", "ICE", "BLIZZARD"]),
];

impl Condition {
    /// First condition with a keyword contained in one of the words of `normalized`.
    pub fn classify(normalized: &str) -> Option<Condition> {
        let words: Vec<&str> = normalized.split_whitespace().collect();
        CONDITIONS
            .iter()
            .find(|(_, keywords)| {
                keywords
                    .iter()
                    .any(|keyword| words.iter().any(|word| word.contains(keyword)))
            })
            .map(|(condition, _)| *condition)
    }

    /// Tile for this condition at `temperature` (°F).
    pub fn tile(self, temperature: f64) -> Tile {
        match self {
            Condition::Hot => Tile::Red,
            Condition::Dust => Tile::Orange,
            Condition::Sunny => sun_tile(temperature),
            Condition::Windy => Tile::Green,
            Condition::Cold => Tile::Violet,
            Condition::Cloudy => Tile::Black,
            Condition::Rain => Tile::Blue,
            Condition::Snow => Tile::White,
        }
    }

    /// Whether the tile depicts daylight and should give way to the night tile.
    fn is_daylight(self) -> bool {
        matches!(self, Condition::Dust | Condition::Sunny | Condition::Windy)
    }
}

fn sun_tile(temperature: f64) -> Tile {
    if temperature < 40.0 {
        Tile::Violet
    } else if temperature < 55.0 {
        Tile::Green
    } else if temperature < 70.0 {
        Tile::Yellow
    } else if temperature < 80.0 {
        Tile::Orange
    } else {
        Tile::Red
    }
}

/// Icon glyph for a normalized description.
///
/// With `night` set, daylight icons (sun, wind, sand) become the cloud/night tile.
pub fn select_icon(normalized: &str, temperature: f64, night: bool) -> char {
    match Condition::classify(normalized) {
        Some(condition) if night && condition.is_daylight() => Tile::Black.glyph(),
        Some(condition) => condition.tile(temperature).glyph(),
        None => UNKNOWN_ICON,
    }
}

/// Most frequent normalized description; ties go to the earliest.
pub fn modal_description(
    descriptions: &[String],
    mut cache: Option<&mut DescriptionCache>,
) -> String {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for raw in descriptions {
        let normalized = match cache.as_deref_mut() {
            Some(cache) => cache.normalize(raw),
            None => normalize_description(raw),
        };
        let count = counts.entry(normalized.clone()).or_insert(0);
        if *count == 0 {
            order.push(normalized);
        }
        *count += 1;
    }

    let mut best: Option<(&String, usize)> = None;
    for description in &order {
        let count = counts.get(description).copied().unwrap_or(0);
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((description, count));
        }
    }
    best.map(|(d, _)| d.clone()).unwrap_or_default()
}

/// Renders a single forecast row, exactly `COLS` wide.
pub fn format_row(
    day: &ForecastDay,
    today: NaiveDate,
    cache: Option<&mut DescriptionCache>,
) -> String {
    let description = modal_description(&day.descriptions, cache);
    let night = day.date == today && day.day_end_hour == NIGHT_END_HOUR;
    let icon = select_icon(&description, day.temperature, night);
    let weekday = day.date.format("%a").to_string().to_uppercase();
    let temperature = day.temperature.round().clamp(-99.0, 999.0) as i64;
    let row = format!(
        "{}{:>3}°{} {}",
        weekday,
        temperature,
        icon,
        pack(&description, DESCRIPTION_WIDTH)
    );
    trace!("weather row {}: {:?}", day.date, row);
    row
}

/// Lays out up to `ROWS` days, earliest first.
///
/// # Errors
/// `EmptyContent` when there are no days.
pub fn layout(
    days: &[ForecastDay],
    today: NaiveDate,
    mut cache: Option<&mut DescriptionCache>,
) -> Result<LayoutResult, LayoutError> {
    if days.is_empty() {
        return Err(LayoutError::EmptyContent("weather"));
    }
    let mut sorted: Vec<&ForecastDay> = days.iter().collect();
    sorted.sort_by_key(|day| day.date);

    let lines: Vec<String> = sorted
        .into_iter()
        .take(ROWS)
        .map(|day| format_row(day, today, cache.as_deref_mut()))
        .collect();
    debug!("weather: {} days from {}", lines.len(), today);
    LayoutResult::new(lines, Background::Blank)
}

/// Buckets hourly periods by calendar day.
///
/// Temperatures are averaged; start/end hours come from the first and last period
/// of each day; every period contributes its short forecast.
pub fn aggregate_days(periods: &[HourlyPeriod]) -> Vec<ForecastDay> {
    let mut sorted: Vec<&HourlyPeriod> = periods.iter().collect();
    sorted.sort_by_key(|period| period.start_time);

    let mut buckets: BTreeMap<NaiveDate, Vec<&HourlyPeriod>> = BTreeMap::new();
    for period in sorted {
        buckets
            .entry(period.start_time.date())
            .or_default()
            .push(period);
    }

    buckets
        .into_iter()
        .filter_map(|(date, periods)| {
            let first = periods.first()?;
            let last = periods.last()?;
            let total: f64 = periods.iter().map(|p| p.temperature).sum();
            Some(ForecastDay {
                date,
                temperature: total / periods.len() as f64,
                day_start_hour: first.start_time.hour(),
                day_end_hour: last.start_time.hour(),
                descriptions: periods.iter().map(|p| p.short_forecast.clone()).collect(),
            })
        })
        .collect()
}
