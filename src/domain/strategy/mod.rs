//! Strategy implementations.
//!
//! Each strategy is a pure function from a price series (plus parameters)
//! to a `StrategyOutcome`. They share one trade-resolution rule: the daily
//! signal sequence is differenced, and a difference of +step books a BUY,
//! -step a SELL, at that day's close. Crossover-style strategies step
//! between 0 and 1 (step = 1); band strategies step between -1 and +1
//! (step = 2), so a brush against one band that returns to neutral books
//! nothing.

pub mod bollinger;
pub mod buy_hold;
pub mod ma_crossover;
pub mod rsi;

use crate::domain::signal::{Signal, SignalPoint, TradeAction, TradeEvent};

/// What a strategy run produced.
#[derive(Debug, Clone)]
pub struct StrategyOutcome {
    /// Percent return from the first BUY close to the last SELL close,
    /// 0.0 when no round trip completed.
    pub returns_pct: f64,
    /// [first BUY price, last SELL price], or empty without a round trip.
    pub trade_prices: Vec<f64>,
    /// All booked events, date-sorted; same-day BUY sorts before SELL.
    pub trade_log: Vec<TradeEvent>,
    /// The per-day signals the strategy actually evaluated.
    pub signals: Vec<SignalPoint>,
}

impl StrategyOutcome {
    /// Neutral outcome: nothing evaluated, nothing traded, 0% return.
    pub fn no_op() -> Self {
        StrategyOutcome {
            returns_pct: 0.0,
            trade_prices: Vec::new(),
            trade_log: Vec::new(),
            signals: Vec::new(),
        }
    }
}

/// One evaluated day: the close the strategy saw and the signal it held.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SignalRow {
    pub date: chrono::NaiveDate,
    pub close: f64,
    pub signal: Signal,
}

/// Difference consecutive signals and book trades at steps of `step`.
///
/// BUYs are assembled before SELLs, then one stable sort by date puts the
/// log in chronological order with same-day BUYs first. The return is only
/// computed when both sides exist; a one-sided log is kept but scores 0%.
pub(crate) fn resolve_trades(rows: &[SignalRow], step: i8) -> StrategyOutcome {
    let mut buys: Vec<TradeEvent> = Vec::new();
    let mut sells: Vec<TradeEvent> = Vec::new();

    for i in 1..rows.len() {
        let diff = rows[i].signal.value() - rows[i - 1].signal.value();
        if diff == step {
            buys.push(TradeEvent {
                action: TradeAction::Buy,
                date: rows[i].date,
                price: rows[i].close,
            });
        } else if diff == -step {
            sells.push(TradeEvent {
                action: TradeAction::Sell,
                date: rows[i].date,
                price: rows[i].close,
            });
        }
    }

    let signals = rows
        .iter()
        .map(|r| SignalPoint {
            date: r.date,
            signal: r.signal,
        })
        .collect();

    let (returns_pct, trade_prices) = match (buys.first(), sells.last()) {
        (Some(first_buy), Some(last_sell)) => (
            (last_sell.price - first_buy.price) / first_buy.price * 100.0,
            vec![first_buy.price, last_sell.price],
        ),
        _ => (0.0, Vec::new()),
    };

    let mut trade_log = buys;
    trade_log.append(&mut sells);
    trade_log.sort_by_key(|e| e.date);

    StrategyOutcome {
        returns_pct,
        trade_prices,
        trade_log,
        signals,
    }
}
