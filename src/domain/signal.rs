//! Raw signal generation from indicator rows.
//!
//! A raw signal is the instantaneous directional verdict for one row,
//! before any position-state logic: +1 buy, -1 sell, 0 neutral. Rows whose
//! required indicators are still in warmup always come out Neutral.

use crate::domain::indicator_table::IndicatorTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawSignal {
    Buy,
    Sell,
    Neutral,
}

impl RawSignal {
    pub fn as_i8(self) -> i8 {
        match self {
            RawSignal::Buy => 1,
            RawSignal::Sell => -1,
            RawSignal::Neutral => 0,
        }
    }
}

/// Moving-average crossover: buy when the short MA clears the long MA by
/// more than the tolerance, sell when it sits below that same threshold.
///
/// Both comparisons use the long MA times (1 + epsilon); the sell side
/// shares the buy threshold rather than using (1-eps), so the dead zone is
/// the single threshold line and only an exact tie is Neutral.
pub fn ma_crossover_signals(
    table: &IndicatorTable,
    short_window: usize,
    long_window: usize,
    epsilon: f64,
) -> Vec<RawSignal> {
    let short = table.sma(short_window);
    let long = table.sma(long_window);

    (0..table.len())
        .map(|i| {
            let short_ma = short.and_then(|s| s.simple_at(i));
            let long_ma = long.and_then(|s| s.simple_at(i));
            match (short_ma, long_ma) {
                (Some(s), Some(l)) => {
                    let threshold = l * (1.0 + epsilon);
                    if s > threshold {
                        RawSignal::Buy
                    } else if s < threshold {
                        RawSignal::Sell
                    } else {
                        RawSignal::Neutral
                    }
                }
                _ => RawSignal::Neutral,
            }
        })
        .collect()
}

/// Bollinger bounce: buy when the price has fallen to the lower band, sell
/// when it has risen to the upper band, each softened by the tolerance.
///
/// The sell test wins if the bands collapse far enough for both to hold.
pub fn bollinger_bounce_signals(
    table: &IndicatorTable,
    window: usize,
    epsilon: f64,
) -> Vec<RawSignal> {
    let bands = table.bands(window);

    (0..table.len())
        .map(|i| {
            let price = table.points[i].adj_close;
            match bands.and_then(|b| b.bands_at(i)) {
                Some((upper, _, lower)) => {
                    if price > upper * (1.0 - epsilon) {
                        RawSignal::Sell
                    } else if price < lower * (1.0 + epsilon) {
                        RawSignal::Buy
                    } else {
                        RawSignal::Neutral
                    }
                }
                None => RawSignal::Neutral,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator_table::compute_table;
    use crate::domain::price::PricePoint;
    use chrono::NaiveDate;

    fn make_table(prices: &[f64], ma_windows: &[usize]) -> IndicatorTable {
        let points: Vec<PricePoint> = prices
            .iter()
            .enumerate()
            .map(|(i, &adj_close)| PricePoint {
                symbol: "BTC".into(),
                date: NaiveDate::from_ymd_opt(2021, 1, (i + 1) as u32).unwrap(),
                adj_close,
            })
            .collect();
        compute_table("BTC", points, ma_windows, &[])
    }

    #[test]
    fn crossover_neutral_during_warmup() {
        // Long window of 3: the first two rows cannot have a long MA, so
        // they must be Neutral no matter how strong the trend is.
        let table = make_table(&[100.0, 200.0, 300.0, 400.0], &[1, 3]);
        let signals = ma_crossover_signals(&table, 1, 3, 0.1);

        assert_eq!(signals[0], RawSignal::Neutral);
        assert_eq!(signals[1], RawSignal::Neutral);
        assert_ne!(signals[2], RawSignal::Neutral);
    }

    #[test]
    fn crossover_buy_when_short_above_threshold() {
        // Rising prices: MA(1) tracks the price, MA(3) lags well below.
        let table = make_table(&[100.0, 200.0, 300.0, 400.0], &[1, 3]);
        let signals = ma_crossover_signals(&table, 1, 3, 0.1);

        // index 2: short=300, long=200, threshold=220 -> Buy
        assert_eq!(signals[2], RawSignal::Buy);
        assert_eq!(signals[3], RawSignal::Buy);
    }

    #[test]
    fn crossover_sell_when_short_below_threshold() {
        // Falling prices: MA(1) sits below the lagging MA(3).
        let table = make_table(&[400.0, 300.0, 200.0, 100.0], &[1, 3]);
        let signals = ma_crossover_signals(&table, 1, 3, 0.1);

        assert_eq!(signals[2], RawSignal::Sell);
        assert_eq!(signals[3], RawSignal::Sell);
    }

    #[test]
    fn crossover_sell_inside_asymmetric_dead_zone() {
        // Flat prices: short == long, threshold = long * 1.1, so the short
        // MA sits below the threshold and the verdict is Sell, not Neutral.
        let table = make_table(&[100.0, 100.0, 100.0, 100.0], &[1, 3]);
        let signals = ma_crossover_signals(&table, 1, 3, 0.1);

        assert_eq!(signals[2], RawSignal::Sell);
        assert_eq!(signals[3], RawSignal::Sell);
    }

    #[test]
    fn crossover_neutral_on_exact_threshold() {
        // short = long * (1 + eps) exactly: neither comparison fires.
        // MA(1) at index 2 is 450, MA(3) is (150+300+450)/3 = 300, and with
        // eps = 0.5 the threshold 300 * 1.5 = 450 is exact in binary.
        let table = make_table(&[150.0, 300.0, 450.0], &[1, 3]);
        let signals = ma_crossover_signals(&table, 1, 3, 0.5);

        assert_eq!(signals[2], RawSignal::Neutral);
    }

    #[test]
    fn crossover_missing_window_is_all_neutral() {
        let table = make_table(&[100.0, 200.0, 300.0], &[3]);
        let signals = ma_crossover_signals(&table, 7, 3, 0.1);

        assert!(signals.iter().all(|&s| s == RawSignal::Neutral));
    }

    #[test]
    fn bounce_neutral_during_warmup() {
        let table = make_table(&[10.0, 1000.0, 10.0, 1000.0], &[3]);
        let signals = bollinger_bounce_signals(&table, 3, 0.1);

        assert_eq!(signals[0], RawSignal::Neutral);
        assert_eq!(signals[1], RawSignal::Neutral);
    }

    #[test]
    fn bounce_buy_at_lower_band() {
        // Drop after a stable stretch: window [100,100,100,70] has mean 92.5
        // and stddev ~12.99, lower band ~66.5, lower*(1+eps) ~73.2 > 70.
        let table = make_table(&[100.0, 100.0, 100.0, 100.0, 70.0], &[4]);
        let signals = bollinger_bounce_signals(&table, 4, 0.1);

        assert_eq!(signals[4], RawSignal::Buy);
    }

    #[test]
    fn bounce_sell_at_upper_band() {
        // Mirror of the buy case: upper band ~133.5, upper*(1-eps) ~120.1 < 130.
        let table = make_table(&[100.0, 100.0, 100.0, 100.0, 130.0], &[4]);
        let signals = bollinger_bounce_signals(&table, 4, 0.1);

        assert_eq!(signals[4], RawSignal::Sell);
    }

    #[test]
    fn bounce_neutral_between_bands() {
        // Enough spread that the bands are wide and the price sits inside.
        let table = make_table(&[90.0, 110.0, 100.0, 105.0], &[3]);
        let signals = bollinger_bounce_signals(&table, 3, 0.01);

        assert_eq!(signals[3], RawSignal::Neutral);
    }

    #[test]
    fn bounce_sell_wins_on_collapsed_bands() {
        // Constant prices collapse the bands onto the price; with eps=0.1
        // both the buy and sell conditions hold and sell takes precedence.
        let table = make_table(&[100.0, 100.0, 100.0, 100.0], &[3]);
        let signals = bollinger_bounce_signals(&table, 3, 0.1);

        assert_eq!(signals[2], RawSignal::Sell);
        assert_eq!(signals[3], RawSignal::Sell);
    }

    #[test]
    fn raw_signal_numeric_values() {
        assert_eq!(RawSignal::Buy.as_i8(), 1);
        assert_eq!(RawSignal::Sell.as_i8(), -1);
        assert_eq!(RawSignal::Neutral.as_i8(), 0);
    }
}
