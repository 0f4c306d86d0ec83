//! Bollinger band mean-reversion strategy.
//!
//! middle = rolling mean, upper/lower = middle +- num_std * rolling sample
//! standard deviation. Bars whose bands are still warming up are dropped
//! before signals are read, so a window of 1 (sample deviation undefined
//! everywhere) evaluates nothing. Touching the lower band signals long,
//! touching the upper signals short; when the bands collapse onto the
//! close, the short side wins. Trades need a full band-to-band swing
//! (step = 2).

use crate::domain::rolling::{rolling_mean, rolling_std};
use crate::domain::series::PriceSeries;
use crate::domain::signal::Signal;
use crate::domain::strategy::{SignalRow, StrategyOutcome, resolve_trades};

#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub middle: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Band values per bar, `None` during warmup.
pub fn bollinger_bands(closes: &[f64], window: usize, num_std: f64) -> BollingerBands {
    let middle = rolling_mean(closes, window);
    let std = rolling_std(closes, window);

    let upper = middle
        .iter()
        .zip(&std)
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => Some(m + num_std * s),
            _ => None,
        })
        .collect();
    let lower = middle
        .iter()
        .zip(&std)
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => Some(m - num_std * s),
            _ => None,
        })
        .collect();

    BollingerBands {
        middle,
        upper,
        lower,
    }
}

pub fn evaluate_bollinger(series: &PriceSeries, window: usize, num_std: f64) -> StrategyOutcome {
    if series.len() < window {
        return StrategyOutcome::no_op();
    }

    let closes = series.closes();
    let bands = bollinger_bands(&closes, window, num_std);

    let rows: Vec<SignalRow> = series
        .bars
        .iter()
        .enumerate()
        .filter_map(|(i, bar)| {
            let (Some(upper), Some(lower)) = (bands.upper[i], bands.lower[i]) else {
                return None;
            };
            let signal = if bar.close >= upper {
                Signal::Short
            } else if bar.close <= lower {
                Signal::Long
            } else {
                Signal::Flat
            };
            Some(SignalRow {
                date: bar.date,
                close: bar.close,
                signal,
            })
        })
        .collect();

    if rows.is_empty() {
        return StrategyOutcome::no_op();
    }

    resolve_trades(&rows, 2)
}
