//! Performance metrics over a price series.
//!
//! All statistics are derived from the close column. Undefined values are
//! reported as NaN rather than errors: volatility and Sharpe need at least
//! two daily returns, Sharpe additionally needs a nonzero return spread,
//! and max drawdown needs at least one return.

use crate::domain::series::PriceSeries;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Daily simple returns of the close column: (C[i] - C[i-1]) / C[i-1].
///
/// One entry shorter than the input; the first close has no predecessor.
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|w| {
            let prev = w[0];
            if prev > 0.0 { (w[1] - prev) / prev } else { 0.0 }
        })
        .collect()
}

/// Compounded growth of one unit: E[i] = prod(1 + r[0..=i]).
pub fn equity_curve(returns: &[f64]) -> Vec<f64> {
    let mut equity = 1.0;
    returns
        .iter()
        .map(|r| {
            equity *= 1.0 + r;
            equity
        })
        .collect()
}

/// Largest peak-to-trough equity loss, in percent (always <= 0).
///
/// Zero for a series that never dips below its running peak; NaN when
/// there are no returns to compound.
pub fn max_drawdown_pct(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return f64::NAN;
    }

    let mut peak = f64::NEG_INFINITY;
    let mut min_dd = 0.0_f64;

    for equity in equity_curve(returns) {
        if equity > peak {
            peak = equity;
        }
        let dd = (equity - peak) / peak;
        if dd < min_dd {
            min_dd = dd;
        }
    }

    min_dd * 100.0
}

/// Sample standard deviation (n - 1 divisor), NaN below two observations.
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsBundle {
    /// Annualized volatility of daily returns, percent.
    pub volatility_pct: f64,
    /// Annualized mean/deviation of daily returns, risk-free rate 0.
    pub sharpe_ratio: f64,
    /// Largest peak-to-trough loss, percent (<= 0).
    pub max_drawdown_pct: f64,
}

impl MetricsBundle {
    pub fn compute(series: &PriceSeries) -> Self {
        let returns = daily_returns(&series.closes());

        let sd = sample_std(&returns);
        let volatility_pct = sd * TRADING_DAYS_PER_YEAR.sqrt() * 100.0;

        let sharpe_ratio = if sd > 0.0 {
            let mean = returns.iter().sum::<f64>() / returns.len() as f64;
            mean / sd * TRADING_DAYS_PER_YEAR.sqrt()
        } else {
            f64::NAN
        };

        MetricsBundle {
            volatility_pct,
            sharpe_ratio,
            max_drawdown_pct: max_drawdown_pct(&returns),
        }
    }
}
