//! RSI mean-reversion strategy.
//!
//! Average gain/loss are plain rolling means over the period (not Wilder
//! smoothing). The first bar has no prior close; its delta counts as zero
//! on both sides. RSI = 100 - (100 / (1 + avg_gain / avg_loss)), undefined
//! during warmup and on any window whose average loss is zero, so a purely
//! rising window produces no signal rather than a hard 100.
//!
//! Signal: long below 30, short above 70, flat between or undefined.
//! Trades need a full short-to-long swing (step = 2); a drift back to
//! neutral books nothing.

use crate::domain::rolling::rolling_mean;
use crate::domain::series::PriceSeries;
use crate::domain::signal::Signal;
use crate::domain::strategy::{SignalRow, StrategyOutcome, resolve_trades};

pub const OVERSOLD: f64 = 30.0;
pub const OVERBOUGHT: f64 = 70.0;

/// RSI value per bar, `None` where undefined.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());

    for (i, &close) in closes.iter().enumerate() {
        let delta = if i == 0 { 0.0 } else { close - closes[i - 1] };
        gains.push(delta.max(0.0));
        losses.push((-delta).max(0.0));
    }

    let avg_gain = rolling_mean(&gains, period);
    let avg_loss = rolling_mean(&losses, period);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(gain, loss)| match (gain, loss) {
            (Some(g), Some(l)) if *l > 0.0 => Some(100.0 - 100.0 / (1.0 + g / l)),
            _ => None,
        })
        .collect()
}

pub fn evaluate_rsi(series: &PriceSeries, period: usize) -> StrategyOutcome {
    let closes = series.closes();
    let rsi = rsi_series(&closes, period);

    let rows: Vec<SignalRow> = series
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let signal = match rsi[i] {
                Some(v) if v < OVERSOLD => Signal::Long,
                Some(v) if v > OVERBOUGHT => Signal::Short,
                _ => Signal::Flat,
            };
            SignalRow {
                date: bar.date,
                close: bar.close,
                signal,
            }
        })
        .collect();

    resolve_trades(&rows, 2)
}
