//! Technical indicator computation over ordered price history
//!
//! [`compute_indicators`] is a pure function: it takes an immutable slice of
//! bars and produces a fresh point-in-time snapshot. Fields whose defining
//! window exceeds the available history are `None` rather than a sentinel
//! number, and no field is ever NaN or infinite.

use serde::{Deserialize, Serialize};
use ta::Next;
use ta::indicators::ExponentialMovingAverage;

use crate::bar::PriceBar;
use crate::error::{Result, StockError};

const RSI_PERIOD: usize = 14;
const MACD_FAST_SPAN: usize = 12;
const MACD_SLOW_SPAN: usize = 26;
const MACD_SIGNAL_SPAN: usize = 9;
const BB_PERIOD: usize = 20;
const BB_WIDTH_FACTOR: f64 = 2.0;
const VOLATILITY_WINDOW: usize = 30;
const VOLUME_WINDOW: usize = 20;
const CROSS_MIN_BARS: usize = 21;

/// Substituted for a zero average loss so the relative-strength ratio stays
/// finite and RSI saturates toward 100 instead of dividing by zero.
const RSI_LOSS_EPSILON: f64 = 1e-10;

/// Moving-average crossover event between the 5-bar and 20-bar means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossSignal {
    /// Short mean broke above the long mean (bullish)
    GoldenCross,
    /// Short mean broke below the long mean (bearish)
    DeadCross,
}

/// Point-in-time technical snapshot of a price series.
///
/// Optional fields are `None` when the series is shorter than the window
/// that defines them. Values are unrounded; rounding for display is the
/// caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Close of the most recent bar
    pub current_price: f64,
    /// Percent change of the last close against the first close
    pub period_return: f64,
    pub ma5: Option<f64>,
    pub ma20: Option<f64>,
    pub ma60: Option<f64>,
    /// 14-bar Relative Strength Index, in [0, 100]
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    /// Position within the 20-bar Bollinger envelope: 0 = lower band,
    /// 100 = upper band, 50 on a zero-width band
    pub bb_position: Option<f64>,
    pub cross_signal: Option<CrossSignal>,
    /// High-low range of the trailing 30 bars as a percent of the minimum low
    pub volatility: f64,
    /// Last volume as a percent of the trailing 20-bar mean volume
    pub volume_ratio: f64,
    /// Highest high over the whole series
    pub highest: f64,
    /// Lowest low over the whole series
    pub lowest: f64,
}

/// Compute a full indicator snapshot for an ascending-ordered price series.
///
/// Returns [`StockError::NoData`] when `bars` is empty; every other numeric
/// edge case (zero denominators, short history) is absorbed into a default
/// or an absent field.
pub fn compute_indicators(bars: &[PriceBar]) -> Result<IndicatorSnapshot> {
    if bars.is_empty() {
        return Err(StockError::NoData);
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let len = closes.len();
    let current_price = closes[len - 1];

    let highest = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let lowest = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);

    let first_close = closes[0];
    let period_return = if first_close > 0.0 {
        (current_price - first_close) / first_close * 100.0
    } else {
        0.0
    };

    let macd_set = macd(&closes);

    Ok(IndicatorSnapshot {
        current_price,
        period_return,
        ma5: trailing_mean(&closes, 5),
        ma20: trailing_mean(&closes, 20),
        ma60: trailing_mean(&closes, 60),
        rsi: rsi(&closes),
        macd: macd_set.map(|(line, _, _)| line),
        macd_signal: macd_set.map(|(_, signal, _)| signal),
        macd_histogram: macd_set.map(|(_, _, histogram)| histogram),
        bb_position: bollinger_position(&closes, current_price),
        cross_signal: detect_cross(&closes),
        volatility: range_volatility(bars),
        volume_ratio: volume_ratio(bars),
        highest,
        lowest,
    })
}

/// Arithmetic mean of the trailing `window` values.
/// `None` on short input or when the window contains non-finite values.
fn trailing_mean(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    let mean = values[values.len() - window..].iter().sum::<f64>() / window as f64;
    mean.is_finite().then_some(mean)
}

/// 14-bar RSI from trailing simple means of gains and losses.
///
/// The gain/loss series carry a zero at index 0 (there is no delta for the
/// first bar), so a series of exactly 14 bars still yields a value.
fn rsi(closes: &[f64]) -> Option<f64> {
    if closes.len() < RSI_PERIOD {
        return None;
    }

    let mut gains = vec![0.0; closes.len()];
    let mut losses = vec![0.0; closes.len()];
    for t in 1..closes.len() {
        let delta = closes[t] - closes[t - 1];
        if delta > 0.0 {
            gains[t] = delta;
        } else if delta < 0.0 {
            losses[t] = -delta;
        }
    }

    let tail = closes.len() - RSI_PERIOD;
    let avg_gain: f64 = gains[tail..].iter().sum::<f64>() / RSI_PERIOD as f64;
    let avg_loss: f64 = losses[tail..].iter().sum::<f64>() / RSI_PERIOD as f64;

    let denominator = if avg_loss == 0.0 { RSI_LOSS_EPSILON } else { avg_loss };
    let rs = avg_gain / denominator;
    let value = 100.0 - 100.0 / (1.0 + rs);
    value.is_finite().then_some(value)
}

/// MACD line, signal line and histogram from span-12/26 EMAs with a span-9
/// signal. Each EMA is seeded by its own recursive update from the first
/// close, matching an `ewm(adjust=False)` recursion.
fn macd(closes: &[f64]) -> Option<(f64, f64, f64)> {
    if closes.len() < MACD_SLOW_SPAN {
        return None;
    }

    let mut ema_fast = ExponentialMovingAverage::new(MACD_FAST_SPAN).ok()?;
    let mut ema_slow = ExponentialMovingAverage::new(MACD_SLOW_SPAN).ok()?;
    let mut ema_signal = ExponentialMovingAverage::new(MACD_SIGNAL_SPAN).ok()?;

    let mut line = 0.0;
    let mut signal = 0.0;
    for &close in closes {
        line = ema_fast.next(close) - ema_slow.next(close);
        signal = ema_signal.next(line);
    }

    let histogram = line - signal;
    (line.is_finite() && signal.is_finite()).then_some((line, signal, histogram))
}

/// Position of the current price within the 20-bar Bollinger envelope.
///
/// The band is the trailing mean plus/minus two trailing sample standard
/// deviations; a band of zero width (flat price run) pins the position to 50.
fn bollinger_position(closes: &[f64], current_price: f64) -> Option<f64> {
    if closes.len() < BB_PERIOD {
        return None;
    }

    let window = &closes[closes.len() - BB_PERIOD..];
    let middle = window.iter().sum::<f64>() / BB_PERIOD as f64;
    let variance = window
        .iter()
        .map(|close| (close - middle).powi(2))
        .sum::<f64>()
        / (BB_PERIOD - 1) as f64;
    let std_dev = variance.sqrt();

    let lower = middle - BB_WIDTH_FACTOR * std_dev;
    let upper = middle + BB_WIDTH_FACTOR * std_dev;
    let width = upper - lower;

    let position = if width > 0.0 {
        (current_price - lower) / width * 100.0
    } else {
        50.0
    };
    position.is_finite().then_some(position)
}

/// Crossover edge detection between ma5 and ma20.
///
/// Compares the pair at the second-to-last bar against the last bar; only a
/// sign change counts, a persistent level difference does not.
fn detect_cross(closes: &[f64]) -> Option<CrossSignal> {
    if closes.len() < CROSS_MIN_BARS {
        return None;
    }

    let previous = &closes[..closes.len() - 1];
    let ma5 = trailing_mean(closes, 5)?;
    let ma20 = trailing_mean(closes, 20)?;
    let prev_ma5 = trailing_mean(previous, 5)?;
    let prev_ma20 = trailing_mean(previous, 20)?;

    if prev_ma5 <= prev_ma20 && ma5 > ma20 {
        Some(CrossSignal::GoldenCross)
    } else if prev_ma5 >= prev_ma20 && ma5 < ma20 {
        Some(CrossSignal::DeadCross)
    } else {
        None
    }
}

/// High-low range of the trailing 30 bars relative to the minimum low.
/// A non-positive minimum low would poison the ratio, so it yields 0.
fn range_volatility(bars: &[PriceBar]) -> f64 {
    let start = bars.len().saturating_sub(VOLATILITY_WINDOW);
    let window = &bars[start..];
    if window.is_empty() {
        return 0.0;
    }

    let max_high = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let min_low = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);

    if min_low > 0.0 {
        (max_high - min_low) / min_low * 100.0
    } else {
        0.0
    }
}

/// Last bar's volume relative to the trailing 20-bar mean volume
fn volume_ratio(bars: &[PriceBar]) -> f64 {
    let start = bars.len().saturating_sub(VOLUME_WINDOW);
    let window = &bars[start..];
    if window.is_empty() {
        return 0.0;
    }

    let mean_volume =
        window.iter().map(|b| b.volume as f64).sum::<f64>() / window.len() as f64;
    let last_volume = bars[bars.len() - 1].volume as f64;

    if mean_volume > 0.0 {
        last_volume / mean_volume * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    fn timestamp(day: usize) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap() + Duration::days(day as i64)
    }

    /// Synthetic daily bars with high/low one unit around the close
    fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                timestamp: timestamp(i),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1000,
            })
            .collect()
    }

    fn constant_closes(value: f64, count: usize) -> Vec<f64> {
        vec![value; count]
    }

    #[test]
    fn empty_series_is_no_data() {
        let result = compute_indicators(&[]);
        assert!(matches!(result, Err(StockError::NoData)));
    }

    #[test]
    fn single_bar_snapshot() {
        let bars = bars_from_closes(&[100.0]);
        let snapshot = compute_indicators(&bars).unwrap();

        assert_eq!(snapshot.current_price, 100.0);
        assert_eq!(snapshot.highest, 101.0);
        assert_eq!(snapshot.lowest, 99.0);
        assert_eq!(snapshot.period_return, 0.0);
        assert!(snapshot.ma5.is_none());
        assert!(snapshot.rsi.is_none());
        assert!(snapshot.macd.is_none());
        assert!(snapshot.bb_position.is_none());
        assert!(snapshot.cross_signal.is_none());
        // Whole-series windows are still defined for a single bar
        assert!(snapshot.volatility > 0.0);
        assert_eq!(snapshot.volume_ratio, 100.0);
    }

    #[test]
    fn window_presence_thresholds() {
        for (field_len, present) in [(4, false), (5, true)] {
            let bars = bars_from_closes(&constant_closes(100.0, field_len));
            let snapshot = compute_indicators(&bars).unwrap();
            assert_eq!(snapshot.ma5.is_some(), present, "ma5 at {field_len} bars");
        }
        for (field_len, present) in [(13, false), (14, true)] {
            let bars = bars_from_closes(&constant_closes(100.0, field_len));
            let snapshot = compute_indicators(&bars).unwrap();
            assert_eq!(snapshot.rsi.is_some(), present, "rsi at {field_len} bars");
        }
        for (field_len, present) in [(19, false), (20, true)] {
            let bars = bars_from_closes(&constant_closes(100.0, field_len));
            let snapshot = compute_indicators(&bars).unwrap();
            assert_eq!(snapshot.ma20.is_some(), present, "ma20 at {field_len} bars");
            assert_eq!(
                snapshot.bb_position.is_some(),
                present,
                "bb_position at {field_len} bars"
            );
        }
        for (field_len, present) in [(25, false), (26, true)] {
            let bars = bars_from_closes(&constant_closes(100.0, field_len));
            let snapshot = compute_indicators(&bars).unwrap();
            assert_eq!(snapshot.macd.is_some(), present, "macd at {field_len} bars");
            assert_eq!(snapshot.macd_signal.is_some(), present);
            assert_eq!(snapshot.macd_histogram.is_some(), present);
        }
        for (field_len, present) in [(59, false), (60, true)] {
            let bars = bars_from_closes(&constant_closes(100.0, field_len));
            let snapshot = compute_indicators(&bars).unwrap();
            assert_eq!(snapshot.ma60.is_some(), present, "ma60 at {field_len} bars");
        }
    }

    #[test]
    fn trailing_means_use_most_recent_bars() {
        let closes: Vec<f64> = (1..=10).map(f64::from).collect();
        let bars = bars_from_closes(&closes);
        let snapshot = compute_indicators(&bars).unwrap();

        // mean of 6..=10
        assert!((snapshot.ma5.unwrap() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn period_return_against_first_close() {
        let bars = bars_from_closes(&[100.0, 104.0, 110.0]);
        let snapshot = compute_indicators(&bars).unwrap();
        assert!((snapshot.period_return - 10.0).abs() < 1e-9);
    }

    #[test]
    fn period_return_zero_when_first_close_not_positive() {
        let bars = bars_from_closes(&[0.0, 10.0, 12.0]);
        let snapshot = compute_indicators(&bars).unwrap();
        assert_eq!(snapshot.period_return, 0.0);
    }

    #[test]
    fn rsi_is_zero_on_a_flat_series() {
        // No gains at all: rs = 0 regardless of the epsilon substitution
        let value = rsi(&constant_closes(100.0, 14)).unwrap();
        assert!(value.abs() < 1e-9);
    }

    #[test]
    fn rsi_saturates_near_100_on_straight_gains() {
        let closes: Vec<f64> = (1..=15).map(f64::from).collect();
        let value = rsi(&closes).unwrap();
        assert!(value > 99.99, "rsi was {value}");
    }

    #[test]
    fn rsi_stays_in_bounds_for_arbitrary_series() {
        // Deterministic pseudo-random walk
        let mut state: u64 = 0x1234_5678;
        let mut closes = Vec::with_capacity(120);
        let mut price = 100.0;
        for _ in 0..120 {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let step = ((state >> 33) % 500) as f64 / 100.0 - 2.5;
            price = (price + step).max(1.0);
            closes.push(price);
        }

        for end in RSI_PERIOD..=closes.len() {
            let value = rsi(&closes[..end]).unwrap();
            assert!((0.0..=100.0).contains(&value), "rsi {value} at len {end}");
        }
    }

    #[test]
    fn macd_positive_in_an_uptrend() {
        let closes: Vec<f64> = (1..=40).map(|i| 100.0 + f64::from(i)).collect();
        let (line, signal, histogram) = macd(&closes).unwrap();
        assert!(line > 0.0);
        assert!((line - signal - histogram).abs() < 1e-12);
    }

    #[test]
    fn bollinger_position_is_50_on_zero_width_band() {
        let closes = constant_closes(100.0, 20);
        assert_eq!(bollinger_position(&closes, 100.0), Some(50.0));
    }

    #[test]
    fn bollinger_position_exceeds_100_above_the_upper_band() {
        let mut closes = constant_closes(100.0, 19);
        closes.push(110.0);
        let position = bollinger_position(&closes, 110.0).unwrap();
        assert!(position > 100.0, "position was {position}");
    }

    #[test]
    fn volatility_from_trailing_window_range() {
        let bars: Vec<PriceBar> = (0..10)
            .map(|i| PriceBar {
                timestamp: timestamp(i),
                open: 105.0,
                high: 110.0,
                low: 100.0,
                close: 105.0,
                volume: 1000,
            })
            .collect();
        let snapshot = compute_indicators(&bars).unwrap();
        assert!((snapshot.volatility - 10.0).abs() < 1e-9);
    }

    #[test]
    fn volatility_ignores_bars_older_than_30() {
        let mut bars: Vec<PriceBar> = (0..10)
            .map(|i| PriceBar {
                timestamp: timestamp(i),
                open: 500.0,
                high: 1000.0,
                low: 400.0,
                close: 500.0,
                volume: 1000,
            })
            .collect();
        bars.extend((10..40).map(|i| PriceBar {
            timestamp: timestamp(i),
            open: 105.0,
            high: 110.0,
            low: 100.0,
            close: 105.0,
            volume: 1000,
        }));
        let snapshot = compute_indicators(&bars).unwrap();
        assert!((snapshot.volatility - 10.0).abs() < 1e-9);
    }

    #[test]
    fn volatility_zero_when_minimum_low_not_positive() {
        let mut bars = bars_from_closes(&constant_closes(100.0, 5));
        bars[2].low = 0.0;
        let snapshot = compute_indicators(&bars).unwrap();
        assert_eq!(snapshot.volatility, 0.0);
    }

    #[test]
    fn volume_ratio_against_trailing_20_bar_mean() {
        let mut bars = bars_from_closes(&constant_closes(100.0, 30));
        for bar in bars.iter_mut().take(10) {
            bar.volume = 1_000_000; // outside the 20-bar window
        }
        let last = bars.len() - 1;
        bars[last].volume = 2000;

        let snapshot = compute_indicators(&bars).unwrap();
        // window mean = (19 * 1000 + 2000) / 20 = 1050
        assert!((snapshot.volume_ratio - 2000.0 / 1050.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn volume_ratio_zero_without_volume() {
        let mut bars = bars_from_closes(&constant_closes(100.0, 5));
        for bar in &mut bars {
            bar.volume = 0;
        }
        let snapshot = compute_indicators(&bars).unwrap();
        assert_eq!(snapshot.volume_ratio, 0.0);
    }

    #[test]
    fn golden_cross_on_upward_breakout() {
        let mut closes = constant_closes(100.0, 16);
        closes.extend([80.0, 80.0, 80.0, 80.0, 200.0]);
        assert_eq!(detect_cross(&closes), Some(CrossSignal::GoldenCross));
    }

    #[test]
    fn dead_cross_on_downward_breakout() {
        let mut closes = constant_closes(100.0, 16);
        closes.extend([120.0, 120.0, 120.0, 120.0, 10.0]);
        assert_eq!(detect_cross(&closes), Some(CrossSignal::DeadCross));
    }

    #[test]
    fn no_cross_without_a_sign_change() {
        // 19 flat bars then a dip and a recovery: the means touch but the
        // short mean never moves strictly above the long mean
        let mut closes = constant_closes(100.0, 19);
        closes.extend([99.0, 101.0]);
        assert_eq!(detect_cross(&closes), None);
    }

    #[test]
    fn no_cross_below_21_bars() {
        let mut closes = constant_closes(100.0, 15);
        closes.extend([80.0, 80.0, 80.0, 80.0, 200.0]);
        assert_eq!(closes.len(), 20);
        assert_eq!(detect_cross(&closes), None);
    }

    #[test]
    fn extremes_cover_the_whole_series() {
        let mut bars = bars_from_closes(&constant_closes(100.0, 40));
        bars[0].high = 250.0;
        bars[5].low = 10.0;
        let snapshot = compute_indicators(&bars).unwrap();
        assert_eq!(snapshot.highest, 250.0);
        assert_eq!(snapshot.lowest, 10.0);
    }

    #[test]
    fn cross_signal_serializes_snake_case() {
        let mut closes = constant_closes(100.0, 16);
        closes.extend([80.0, 80.0, 80.0, 80.0, 200.0]);
        let bars = bars_from_closes(&closes);
        let snapshot = compute_indicators(&bars).unwrap();

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["cross_signal"], "golden_cross");

        let short = compute_indicators(&bars[..5]).unwrap();
        let value = serde_json::to_value(&short).unwrap();
        assert!(value["cross_signal"].is_null());
        assert!(value["ma20"].is_null());
    }
}
