//! Unit tests for the scoring engine decision tree

use chrono::{Duration, TimeZone, Utc};
use tactrix::models::{
    Candle, DiscretionaryInput, FlowState, IndicatorSet, InstrumentSpec, Marker, SymbolId,
    Timeframe, TradeAction, TrendContext, VolatilityRegime,
};
use tactrix::signals::engine::{Evaluation, ScoringEngine};

fn gold_spec() -> InstrumentSpec {
    InstrumentSpec {
        display_name: "Gold".to_string(),
        data_symbol: "XAUUSD=X".to_string(),
        contract_size: 100.0,
        survival_distance: 100.0,
        volatility_floor: 1.0,
        quote_converted: false,
    }
}

fn active_set() -> IndicatorSet {
    // Price above the full EMA stack with a healthy ATR.
    IndicatorSet {
        price: 2605.0,
        ema20: 2600.0,
        ema60: 2590.0,
        ema240: 2550.0,
        atr14: 2.0,
    }
}

fn score(
    ind: &IndicatorSet,
    trend: TrendContext,
    marker: Marker,
    flow: FlowState,
) -> tactrix::models::Recommendation {
    let engine = ScoringEngine::default();
    let symbol = SymbolId::from("gold");
    engine.score(
        &symbol,
        Timeframe::M5,
        &gold_spec(),
        ind,
        trend,
        DiscretionaryInput { marker, flow },
        1000.0,
    )
}

#[test]
fn test_bull_marker_with_confirming_flow_fires_long() {
    let rec = score(
        &active_set(),
        TrendContext::Unknown,
        Marker::Bull,
        FlowState::StrongBuy,
    );
    assert_eq!(rec.action, TradeAction::FireLong);
    // 95 base + 0 trend + 5 location.
    assert_eq!(rec.confidence, 100);
    assert_eq!(rec.regime, VolatilityRegime::Active);
}

#[test]
fn test_absorption_confirms_a_bull_marker() {
    let rec = score(
        &active_set(),
        TrendContext::Unknown,
        Marker::Bull,
        FlowState::Absorption,
    );
    assert_eq!(rec.action, TradeAction::FireLong);
}

#[test]
fn test_confidence_clamps_at_100() {
    // 95 + 10 + 5 = 110 before clamping.
    let rec = score(
        &active_set(),
        TrendContext::Bullish,
        Marker::Bull,
        FlowState::StrongBuy,
    );
    assert_eq!(rec.confidence, 100);
}

#[test]
fn test_bull_marker_without_flow_confirmation_attempts() {
    let rec = score(
        &active_set(),
        TrendContext::Unknown,
        Marker::Bull,
        FlowState::Neutral,
    );
    assert_eq!(rec.action, TradeAction::AttemptLong);
    // 75 + 0 + 5.
    assert_eq!(rec.confidence, 80);
}

#[test]
fn test_strong_sell_vetoes_a_bull_marker() {
    for trend in [
        TrendContext::Bullish,
        TrendContext::Bearish,
        TrendContext::Unknown,
    ] {
        let rec = score(&active_set(), trend, Marker::Bull, FlowState::StrongSell);
        assert_eq!(rec.action, TradeAction::FalseSignal);
        assert_eq!(rec.confidence, 0);
    }
}

#[test]
fn test_strong_buy_vetoes_a_bear_marker() {
    let rec = score(
        &active_set(),
        TrendContext::Bearish,
        Marker::Bear,
        FlowState::StrongBuy,
    );
    assert_eq!(rec.action, TradeAction::FalseSignal);
    assert_eq!(rec.confidence, 0);
}

#[test]
fn test_absorption_vetoes_a_bear_marker() {
    let rec = score(
        &active_set(),
        TrendContext::Unknown,
        Marker::Bear,
        FlowState::Absorption,
    );
    assert_eq!(rec.action, TradeAction::FalseSignal);
}

#[test]
fn test_bear_marker_with_confirming_flow_fires_short() {
    // Price below the whole stack: location -5, so a short gains from it.
    let ind = IndicatorSet {
        price: 2540.0,
        ema20: 2560.0,
        ema60: 2580.0,
        ema240: 2600.0,
        atr14: 10.0,
    };
    let rec = score(&ind, TrendContext::Bearish, Marker::Bear, FlowState::StrongSell);
    assert_eq!(rec.action, TradeAction::FireShort);
    // 95 - (-10) - (-5) = 110, clamped.
    assert_eq!(rec.confidence, 100);
    // Short-side levels: stop above, target below.
    assert!(rec.stop_loss > rec.price);
    assert!(rec.take_profit < rec.price);
}

#[test]
fn test_trap_flow_confirms_a_bear_marker() {
    let rec = score(
        &active_set(),
        TrendContext::Unknown,
        Marker::Bear,
        FlowState::Trap,
    );
    assert_eq!(rec.action, TradeAction::FireShort);
    // 95 - 0 - 5 (location favors longs here).
    assert_eq!(rec.confidence, 90);
}

#[test]
fn test_bear_marker_without_flow_confirmation_attempts_short() {
    let rec = score(
        &active_set(),
        TrendContext::Unknown,
        Marker::Bear,
        FlowState::Neutral,
    );
    assert_eq!(rec.action, TradeAction::AttemptShort);
    // 75 - 0 - 5.
    assert_eq!(rec.confidence, 70);
}

#[test]
fn test_dead_tape_without_marker_stands_down() {
    let ind = IndicatorSet {
        atr14: 0.5,
        ..active_set()
    };
    let rec = score(&ind, TrendContext::Bullish, Marker::None, FlowState::Neutral);
    assert_eq!(rec.action, TradeAction::InsufficientVolatility);
    assert_eq!(rec.confidence, 10);
    assert_eq!(rec.regime, VolatilityRegime::Dead);
    // Long-side placeholder levels.
    assert!(rec.stop_loss < rec.price);
    assert!(rec.take_profit > rec.price);
}

#[test]
fn test_marker_overrides_the_volatility_gate() {
    let ind = IndicatorSet {
        atr14: 0.5,
        ..active_set()
    };
    let rec = score(&ind, TrendContext::Unknown, Marker::Bull, FlowState::StrongBuy);
    assert_eq!(rec.action, TradeAction::FireLong);
    // The regime is still reported as dead even though scoring proceeded.
    assert_eq!(rec.regime, VolatilityRegime::Dead);
}

#[test]
fn test_automated_pullback_to_fast_average_watches_long() {
    let ind = IndicatorSet {
        price: 2602.0,
        ema20: 2605.0,
        ema60: 2600.0,
        ema240: 2590.0,
        atr14: 2.0,
    };
    let rec = score(&ind, TrendContext::Bullish, Marker::None, FlowState::Neutral);
    assert_eq!(rec.action, TradeAction::WatchLong);
    assert_eq!(rec.confidence, 70); // 60 + 10
}

#[test]
fn test_automated_deeper_pullback_holds_defensively() {
    let ind = IndicatorSet {
        price: 2595.0,
        ema20: 2610.0,
        ema60: 2600.0,
        ema240: 2590.0,
        atr14: 10.0,
    };
    let rec = score(&ind, TrendContext::Bearish, Marker::None, FlowState::Neutral);
    assert_eq!(rec.action, TradeAction::DefensiveHold);
    assert_eq!(rec.confidence, 45); // 55 - 10
}

#[test]
fn test_automated_overextension_flags_short() {
    // Stretch = (2620 - 2600) / 2 = 10 ATRs above the fast average.
    let ind = IndicatorSet {
        price: 2620.0,
        ema20: 2600.0,
        ema60: 2590.0,
        ema240: 2550.0,
        atr14: 2.0,
    };
    let rec = score(&ind, TrendContext::Bullish, Marker::None, FlowState::Neutral);
    assert_eq!(rec.action, TradeAction::Overextended);
    assert_eq!(rec.confidence, 60); // 70 - 10: stretch against the trend
    assert!(rec.stop_loss > rec.price);
}

#[test]
fn test_automated_oversold_flags_long() {
    let ind = IndicatorSet {
        price: 2580.0,
        ema20: 2600.0,
        ema60: 2610.0,
        ema240: 2620.0,
        atr14: 2.0,
    };
    let rec = score(&ind, TrendContext::Bullish, Marker::None, FlowState::Neutral);
    assert_eq!(rec.action, TradeAction::Oversold);
    assert_eq!(rec.confidence, 80); // 70 + 10
}

#[test]
fn test_automated_no_structure_is_range_bound() {
    let ind = IndicatorSet {
        price: 2601.0,
        ema20: 2600.0,
        ema60: 2590.0,
        ema240: 2550.0,
        atr14: 2.0,
    };
    let rec = score(&ind, TrendContext::Unknown, Marker::None, FlowState::Neutral);
    assert_eq!(rec.action, TradeAction::RangeBound);
    assert_eq!(rec.confidence, 20);
}

#[test]
fn test_protective_levels_use_atr_multiples() {
    let rec = score(
        &active_set(),
        TrendContext::Unknown,
        Marker::Bull,
        FlowState::StrongBuy,
    );
    assert!((rec.stop_loss - (2605.0 - 1.5 * 2.0)).abs() < 1e-9);
    assert!((rec.take_profit - (2605.0 + 2.5 * 2.0)).abs() < 1e-9);
}

fn flat_window(count: usize, close: f64) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            Candle::new(
                close,
                close + 1.0,
                close - 1.0,
                close,
                1000.0,
                start + Duration::minutes(5 * i as i64),
            )
        })
        .collect()
}

#[test]
fn test_evaluate_rejects_a_short_window() {
    let engine = ScoringEngine::default();
    let symbol = SymbolId::from("gold");
    let spec = gold_spec();
    let window = flat_window(5, 2600.0);
    let eval = Evaluation {
        symbol: &symbol,
        timeframe: Timeframe::M5,
        spec: &spec,
        window: &window,
        trend: TrendContext::Unknown,
        discretionary: DiscretionaryInput::default(),
        balance: 1000.0,
        tick_price: None,
    };
    assert!(engine.evaluate(&eval).is_err());
}

#[test]
fn test_evaluate_is_deterministic() {
    let engine = ScoringEngine::default();
    let symbol = SymbolId::from("gold");
    let spec = gold_spec();
    let window = flat_window(50, 2600.0);
    let eval = Evaluation {
        symbol: &symbol,
        timeframe: Timeframe::M15,
        spec: &spec,
        window: &window,
        trend: TrendContext::Bullish,
        discretionary: DiscretionaryInput {
            marker: Marker::Bull,
            flow: FlowState::Absorption,
        },
        balance: 1000.0,
        tick_price: None,
    };

    let first = engine.evaluate(&eval).unwrap();
    let second = engine.evaluate(&eval).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_tick_price_moves_the_scored_price() {
    let engine = ScoringEngine::default();
    let symbol = SymbolId::from("gold");
    let spec = gold_spec();
    let window = flat_window(50, 2600.0);
    let eval = Evaluation {
        symbol: &symbol,
        timeframe: Timeframe::M5,
        spec: &spec,
        window: &window,
        trend: TrendContext::Unknown,
        discretionary: DiscretionaryInput::default(),
        balance: 1000.0,
        tick_price: Some(2610.0),
    };

    let rec = engine.evaluate(&eval).unwrap();
    assert_eq!(rec.price, 2610.0);
}
