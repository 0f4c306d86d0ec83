//! Buy-and-hold benchmark.
//!
//! Buys at the first close, sells at the last, and reports the percent
//! change between them. The degenerate single-bar series books its BUY and
//! SELL on the same day and scores 0%.

use crate::domain::series::PriceSeries;
use crate::domain::signal::{TradeAction, TradeEvent};
use crate::domain::strategy::StrategyOutcome;

pub fn evaluate_buy_hold(series: &PriceSeries) -> StrategyOutcome {
    let (Some(first), Some(last)) = (series.bars.first(), series.bars.last()) else {
        return StrategyOutcome::no_op();
    };

    let returns_pct = (last.close - first.close) / first.close * 100.0;

    StrategyOutcome {
        returns_pct,
        trade_prices: vec![first.close, last.close],
        trade_log: vec![
            TradeEvent {
                action: TradeAction::Buy,
                date: first.date,
                price: first.close,
            },
            TradeEvent {
                action: TradeAction::Sell,
                date: last.date,
                price: last.close,
            },
        ],
        signals: Vec::new(),
    }
}
