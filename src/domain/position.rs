//! Position state machine: raw signals to labeled trades.
//!
//! A single scan over the (signal, price) sequence, one output row per
//! input row. The machine rides an open position while the raw signal
//! agrees with its direction; the first disagreeing or neutral row closes
//! it and realises the price delta since entry. A position still open when
//! the sequence ends stays open and produces no result.

use crate::domain::signal::RawSignal;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionLabel {
    Wait,
    Buy,
    Hold,
    Sell,
    Close,
}

impl fmt::Display for PositionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PositionLabel::Wait => "Wait",
            PositionLabel::Buy => "Buy",
            PositionLabel::Hold => "Hold",
            PositionLabel::Sell => "Sell",
            PositionLabel::Close => "Close",
        };
        write!(f, "{}", s)
    }
}

/// Scan state carried between rows: direction plus the entry price.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PositionState {
    Flat,
    LongOpen { entry: f64 },
    ShortOpen { entry: f64 },
}

/// One output row of the scan. `result` is set only on a Close row.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRow {
    pub label: PositionLabel,
    pub result: Option<f64>,
}

/// Total over any signal sequence; never errors, performs no I/O.
///
/// `signals` and `prices` must be the same length (one price per row).
pub fn scan_positions(signals: &[RawSignal], prices: &[f64]) -> Vec<TradeRow> {
    debug_assert_eq!(signals.len(), prices.len());

    let mut rows = Vec::with_capacity(signals.len());
    let mut state = PositionState::Flat;

    for (&signal, &price) in signals.iter().zip(prices) {
        let (label, result, next) = match (state, signal) {
            (PositionState::Flat, RawSignal::Buy) => (
                PositionLabel::Buy,
                None,
                PositionState::LongOpen { entry: price },
            ),
            (PositionState::Flat, RawSignal::Sell) => (
                PositionLabel::Sell,
                None,
                PositionState::ShortOpen { entry: price },
            ),
            (PositionState::Flat, RawSignal::Neutral) => {
                (PositionLabel::Wait, None, PositionState::Flat)
            }
            (PositionState::LongOpen { entry }, RawSignal::Buy) => (
                PositionLabel::Hold,
                None,
                PositionState::LongOpen { entry },
            ),
            (PositionState::LongOpen { entry }, _) => (
                PositionLabel::Close,
                Some(price - entry),
                PositionState::Flat,
            ),
            (PositionState::ShortOpen { entry }, RawSignal::Sell) => (
                PositionLabel::Hold,
                None,
                PositionState::ShortOpen { entry },
            ),
            (PositionState::ShortOpen { entry }, _) => (
                PositionLabel::Close,
                Some(entry - price),
                PositionState::Flat,
            ),
        };

        rows.push(TradeRow { label, result });
        state = next;
    }

    rows
}
