//! Unit tests for full indicator-set computation

use chrono::{Duration, TimeZone, Utc};
use tactrix::indicators::{self, IndicatorError, MIN_BARS};
use tactrix::models::Candle;

fn flat_candles(count: usize, close: f64) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            Candle::new(
                close,
                close,
                close,
                close,
                1000.0,
                start + Duration::minutes(5 * i as i64),
            )
        })
        .collect()
}

#[test]
fn test_short_window_is_rejected() {
    let window = flat_candles(MIN_BARS - 1, 2600.0);
    let err = indicators::compute(&window, 0.5).unwrap_err();
    match err {
        IndicatorError::InsufficientData { have, need } => {
            assert_eq!(have, MIN_BARS - 1);
            assert_eq!(need, MIN_BARS);
        }
    }
}

#[test]
fn test_minimum_window_is_accepted() {
    let window = flat_candles(MIN_BARS, 2600.0);
    assert!(indicators::compute(&window, 0.5).is_ok());
}

#[test]
fn test_flat_window_substitutes_atr_fallback() {
    // Zero true range everywhere: the computed ATR is degenerate and must be
    // replaced by the fallback so scoring never divides by zero.
    let window = flat_candles(50, 2600.0);
    let ind = indicators::compute(&window, 0.5).unwrap();

    assert_eq!(ind.price, 2600.0);
    assert_eq!(ind.atr14, 0.5);
    assert!((ind.ema20 - 2600.0).abs() < 1e-9);
    assert!((ind.ema60 - 2600.0).abs() < 1e-9);
    assert!((ind.ema240 - 2600.0).abs() < 1e-9);
}

#[test]
fn test_minimum_window_uses_degraded_atr_not_the_fallback() {
    // Ten bars each spanning 2.0: the ATR degrades to the mean true range
    // rather than silently taking the fallback constant.
    let start = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
    let window: Vec<Candle> = (0..MIN_BARS)
        .map(|i| {
            Candle::new(
                2600.0,
                2601.0,
                2599.0,
                2600.0,
                1000.0,
                start + Duration::minutes(5 * i as i64),
            )
        })
        .collect();

    let ind = indicators::compute(&window, 0.5).unwrap();
    assert!((ind.atr14 - 2.0).abs() < 1e-9);
}

#[test]
fn test_price_is_last_close() {
    let start = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
    let mut window = flat_candles(30, 100.0);
    window.push(Candle::new(
        100.0,
        105.0,
        99.0,
        104.0,
        1000.0,
        start + Duration::minutes(5 * 30),
    ));

    let ind = indicators::compute(&window, 0.5).unwrap();
    assert_eq!(ind.price, 104.0);
}

#[test]
fn test_rising_window_orders_the_averages() {
    let start = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
    let window: Vec<Candle> = (0..250)
        .map(|i| {
            let close = 1000.0 + i as f64;
            Candle::new(
                close - 0.5,
                close + 1.0,
                close - 1.0,
                close,
                1000.0,
                start + Duration::minutes(5 * i as i64),
            )
        })
        .collect();

    let ind = indicators::compute(&window, 0.5).unwrap();
    assert!(ind.price > ind.ema20);
    assert!(ind.ema20 > ind.ema60);
    assert!(ind.ema60 > ind.ema240);
    assert!(ind.atr14 > 0.0);
}
