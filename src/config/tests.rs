// src/config/tests.rs

use super::*;
use crate::glyph::Tile;
use test_log::test;

#[test]
fn test_empty_document_gives_defaults() {
    let config = Config::from_toml("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.board.base_url, "https://rw.vestaboard.com/");
    assert_eq!(config.tasks.categories.len(), 4);
}

#[test]
fn test_default_retry_budget_fits_display_time() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.retry.total_backoff(), Duration::from_secs(7));
    assert_eq!(config.worst_case_call_time(), Duration::from_secs(27));
}

#[test]
fn test_partial_sections_keep_other_defaults() {
    let config = Config::from_toml(
        r#"
        [board]
        timeout_ms = 2000

        [[tasks.categories]]
        keyword = "Garden"
        tile = "green"
        "#,
    )
    .unwrap();
    assert_eq!(config.board.timeout_ms, 2000);
    assert_eq!(config.board.base_url, BoardConfig::default().base_url);
    assert_eq!(config.retry, RetryConfig::default());
    assert_eq!(
        config.tasks.categories,
        vec![TaskCategory::new("Garden", Tile::Green)]
    );
}

#[test]
fn test_retry_budget_over_display_time_is_rejected() {
    let err = Config::from_toml(
        r#"
        [retry]
        backoff_ms = [10000, 20000, 40000]
        min_display_secs = 60
        "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("minimum display time"), "{:#}", err);
}

#[test]
fn test_unknown_tile_is_rejected() {
    let result = Config::from_toml(
        r#"
        [[tasks.categories]]
        keyword = "Garden"
        tile = "mauve"
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn test_parse_flag() {
    assert!(parse_flag("1"));
    assert!(parse_flag(" TRUE "));
    assert!(parse_flag("yes"));
    assert!(!parse_flag("0"));
    assert!(!parse_flag(""));
    assert!(!parse_flag("nope"));
}
