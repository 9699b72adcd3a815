// src/render/tests.rs

use super::*;
use crate::layout::tasks::default_categories;
use crate::records::{Quote, Task, TickerQuote};
use crate::transport::MockTransport;
use rand::rngs::StdRng;
use rand::SeedableRng;
use test_log::test;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

#[test]
fn test_parse_haiku_from_json_or_plain_text() {
    assert_eq!(
        parse_record("haiku", r#""Morning light\nQuiet snow""#).unwrap(),
        ContentRecord::Haiku("Morning light\nQuiet snow".to_string())
    );
    assert_eq!(
        parse_record("haiku", "Morning light\nQuiet snow\n").unwrap(),
        ContentRecord::Haiku("Morning light\nQuiet snow".to_string())
    );
}

#[test]
fn test_parse_weather_daily_and_hourly() {
    let daily = r#"[{"date": "2024-01-15", "temperature": 41.5, "dayStartHour": 6,
                     "dayEndHour": 18, "descriptions": ["Sunny"]}]"#;
    let ContentRecord::Weather(days) = parse_record("weather", daily).unwrap() else {
        panic!("expected weather");
    };
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].day_end_hour, 18);

    let hourly = r#"[
        {"startTime": "2024-01-15T06:00:00", "temperature": 40, "shortForecast": "Sunny"},
        {"startTime": "2024-01-15T07:00:00", "temperature": 44, "shortForecast": "Sunny"},
        {"startTime": "2024-01-16T06:00:00", "temperature": 30, "shortForecast": "Snow"}
    ]"#;
    let ContentRecord::Weather(days) = parse_record("weather", hourly).unwrap() else {
        panic!("expected weather");
    };
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].temperature, 42.0);
    assert_eq!(days[0].descriptions.len(), 2);
}

#[test]
fn test_parse_rejects_unknown_kind_and_bad_json() {
    assert!(parse_record("horoscope", "[]").is_err());
    assert!(parse_record("ticker", "{").is_err());
}

#[test]
fn test_every_kind_renders_dense() {
    let records = vec![
        ContentRecord::Haiku("Morning light\nQuiet snow falls\nThe kettle sings".to_string()),
        ContentRecord::Weather(vec![ForecastDay {
            date: today(),
            temperature: 50.0,
            day_start_hour: 6,
            day_end_hour: 18,
            descriptions: vec!["Rain".to_string()],
        }]),
        ContentRecord::Ticker(vec![TickerQuote {
            symbol: "AAPL".to_string(),
            display_name: "Apple".to_string(),
            percent_change: 1.25,
            price: 190.5,
        }]),
        ContentRecord::Tasks(vec![Task {
            list_name: "Work".to_string(),
            title: "Ship it".to_string(),
            notes: None,
        }]),
        ContentRecord::Quotes(vec![Quote {
            text: "Stay hungry, stay foolish.".to_string(),
            author: "Steve Jobs".to_string(),
        }]),
    ];
    let categories = default_categories();
    let mut cache = DescriptionCache::new();
    let mut rng = StdRng::seed_from_u64(7);
    for record in &records {
        let mut ctx = RenderContext {
            today: today(),
            categories: &categories,
            cache: Some(&mut cache),
        };
        let grid = render(record, &mut ctx, &mut rng).unwrap();
        assert!(grid.is_dense(), "{} grid:\n{}", record.kind(), grid);
    }
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_send_writes_once() {
    let record = ContentRecord::Haiku("Morning light".to_string());
    let mut ctx = RenderContext {
        today: today(),
        categories: &[],
        cache: None,
    };
    let mut mock = MockTransport::new();
    let grid = send(&record, &mut ctx, &mut StdRng::seed_from_u64(1), &mut mock).unwrap();
    assert_eq!(mock.writes().len(), 1);
    assert_eq!(mock.read().unwrap(), grid);
}

#[test]
fn test_failed_layout_sends_nothing() {
    let record = ContentRecord::Quotes(Vec::new());
    let mut ctx = RenderContext {
        today: today(),
        categories: &[],
        cache: None,
    };
    let mut mock = MockTransport::new();
    let err = send(&record, &mut ctx, &mut StdRng::seed_from_u64(1), &mut mock).unwrap_err();
    assert!(format!("{:#}", err).contains("no quote fits"), "{:#}", err);
    assert!(mock.writes().is_empty());
}

#[test]
fn test_preview_frames_the_board() {
    let record = ContentRecord::Haiku("Hi".to_string());
    let mut ctx = RenderContext {
        today: today(),
        categories: &[],
        cache: None,
    };
    let grid = render(&record, &mut ctx, &mut StdRng::seed_from_u64(3)).unwrap();
    let text = preview(&grid);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], format!("+{}+", "-".repeat(22)));
    assert!(lines.iter().all(|l| l.chars().count() == 24));
}
