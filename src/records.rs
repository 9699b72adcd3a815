// src/records.rs

//! Typed content records fed into the layouts.
//!
//! These are produced by external fetchers (weather service, quote/ticker service,
//! task lists, a poem generator) and are immutable inputs to layout. All of them
//! deserialize from JSON so the CLI can render captured data.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A daily forecast aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub date: NaiveDate,
    /// Mean temperature over the day's periods (°F).
    pub temperature: f64,
    /// Hour of the first period in the bucket.
    pub day_start_hour: u32,
    /// Hour of the last period in the bucket.
    pub day_end_hour: u32,
    /// One short description per hourly period, in period order.
    pub descriptions: Vec<String>,
}

/// One hourly period as reported by the forecast service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPeriod {
    pub start_time: NaiveDateTime,
    pub temperature: f64,
    pub short_forecast: String,
}

/// A stock or index quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerQuote {
    pub symbol: String,
    #[serde(default)]
    pub display_name: String,
    pub percent_change: f64,
    pub price: f64,
}

/// A task from a named list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub list_name: String,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A quotation with attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

/// Any record a layout can consume, tagged by job kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum ContentRecord {
    Haiku(String),
    Weather(Vec<ForecastDay>),
    Ticker(Vec<TickerQuote>),
    Tasks(Vec<Task>),
    Quotes(Vec<Quote>),
}

impl ContentRecord {
    /// Short name of the job kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentRecord::Haiku(_) => "haiku",
            ContentRecord::Weather(_) => "weather",
            ContentRecord::Ticker(_) => "ticker",
            ContentRecord::Tasks(_) => "tasks",
            ContentRecord::Quotes(_) => "quotes",
        }
    }
}
