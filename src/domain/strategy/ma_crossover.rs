//! Moving-average crossover strategy.
//!
//! Long while the short rolling mean sits above the long rolling mean,
//! flat otherwise. Days before index `short_window` are forced flat, and a
//! day on which either mean is still warming up compares as not-above.
//! Trades fire on flat/long transitions (step = 1).

use crate::domain::rolling::rolling_mean;
use crate::domain::series::PriceSeries;
use crate::domain::signal::Signal;
use crate::domain::strategy::{SignalRow, StrategyOutcome, resolve_trades};

pub fn evaluate_ma_crossover(
    series: &PriceSeries,
    short_window: usize,
    long_window: usize,
) -> StrategyOutcome {
    let closes = series.closes();
    let short_ma = rolling_mean(&closes, short_window);
    let long_ma = rolling_mean(&closes, long_window);

    let rows: Vec<SignalRow> = series
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let above = matches!((short_ma[i], long_ma[i]), (Some(s), Some(l)) if s > l);
            let signal = if i >= short_window && above {
                Signal::Long
            } else {
                Signal::Flat
            };
            SignalRow {
                date: bar.date,
                close: bar.close,
                signal,
            }
        })
        .collect();

    resolve_trades(&rows, 1)
}
