//! Backtest orchestration.
//!
//! `StrategySpec` names a strategy with its parameters; `run_backtest`
//! checks the series, dispatches to the strategy, computes the metrics and
//! assembles the final result. An empty series is the one data condition
//! escalated as an error here; everything thinner (short series, one-sided
//! logs) resolves to a neutral outcome inside the strategies.

use crate::domain::error::BackcastError;
use crate::domain::metrics::MetricsBundle;
use crate::domain::series::PriceSeries;
use crate::domain::signal::{SignalPoint, TradeEvent};
use crate::domain::strategy::StrategyOutcome;
use crate::domain::strategy::bollinger::evaluate_bollinger;
use crate::domain::strategy::buy_hold::evaluate_buy_hold;
use crate::domain::strategy::ma_crossover::evaluate_ma_crossover;
use crate::domain::strategy::rsi::evaluate_rsi;

pub const DEFAULT_SHORT_WINDOW: usize = 20;
pub const DEFAULT_LONG_WINDOW: usize = 50;
pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_BB_WINDOW: usize = 20;
pub const DEFAULT_BB_STD: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub enum StrategySpec {
    BuyHold,
    MaCrossover {
        short_window: usize,
        long_window: usize,
    },
    Rsi {
        period: usize,
    },
    Bollinger {
        window: usize,
        num_std: f64,
    },
}

impl std::fmt::Display for StrategySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategySpec::BuyHold => write!(f, "Buy & Hold"),
            StrategySpec::MaCrossover {
                short_window,
                long_window,
            } => write!(f, "MA Crossover ({}/{})", short_window, long_window),
            StrategySpec::Rsi { period } => write!(f, "RSI (period={})", period),
            StrategySpec::Bollinger { window, num_std } => {
                write!(f, "Bollinger Bands (window={}, std={})", window, num_std)
            }
        }
    }
}

/// Everything one backtest run produced.
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub strategy_label: String,
    pub symbol: String,
    pub returns_pct: f64,
    pub trade_prices: Vec<f64>,
    pub trade_log: Vec<TradeEvent>,
    pub signals: Vec<SignalPoint>,
    pub metrics: MetricsBundle,
}

/// Run the named strategy over a validated series.
pub fn run_strategy(
    spec: &StrategySpec,
    series: &PriceSeries,
) -> Result<StrategyOutcome, BackcastError> {
    if series.is_empty() {
        return Err(BackcastError::NoData {
            symbol: series.symbol.clone(),
        });
    }
    series.validate()?;

    let outcome = match *spec {
        StrategySpec::BuyHold => evaluate_buy_hold(series),
        StrategySpec::MaCrossover {
            short_window,
            long_window,
        } => evaluate_ma_crossover(series, short_window, long_window),
        StrategySpec::Rsi { period } => evaluate_rsi(series, period),
        StrategySpec::Bollinger { window, num_std } => {
            evaluate_bollinger(series, window, num_std)
        }
    };

    Ok(outcome)
}

/// Run the strategy and attach performance metrics.
pub fn run_backtest(
    spec: &StrategySpec,
    series: &PriceSeries,
) -> Result<BacktestResult, BackcastError> {
    let outcome = run_strategy(spec, series)?;
    let metrics = MetricsBundle::compute(series);

    Ok(BacktestResult {
        strategy_label: spec.to_string(),
        symbol: series.symbol.clone(),
        returns_pct: outcome.returns_pct,
        trade_prices: outcome.trade_prices,
        trade_log: outcome.trade_log,
        signals: outcome.signals,
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::PriceBar;
    use crate::domain::signal::TradeAction;
    use chrono::NaiveDate;

    fn make_series(closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Days::new(i as u64),
                open: close,
                high: close,
                low: close,
                close,
                volume: None,
            })
            .collect();
        PriceSeries::new("TEST", bars)
    }

    #[test]
    fn spec_labels() {
        assert_eq!(StrategySpec::BuyHold.to_string(), "Buy & Hold");
        assert_eq!(
            StrategySpec::MaCrossover {
                short_window: 20,
                long_window: 50
            }
            .to_string(),
            "MA Crossover (20/50)"
        );
        assert_eq!(
            StrategySpec::Rsi { period: 14 }.to_string(),
            "RSI (period=14)"
        );
        assert_eq!(
            StrategySpec::Bollinger {
                window: 20,
                num_std: 2.0
            }
            .to_string(),
            "Bollinger Bands (window=20, std=2)"
        );
    }

    #[test]
    fn fractional_std_label() {
        let spec = StrategySpec::Bollinger {
            window: 10,
            num_std: 1.5,
        };
        assert_eq!(spec.to_string(), "Bollinger Bands (window=10, std=1.5)");
    }

    #[test]
    fn empty_series_is_no_data() {
        let err = run_backtest(&StrategySpec::BuyHold, &make_series(&[])).unwrap_err();
        assert!(matches!(err, BackcastError::NoData { .. }));
    }

    #[test]
    fn unordered_series_is_rejected() {
        let mut series = make_series(&[100.0, 101.0]);
        series.bars.swap(0, 1);
        let err = run_backtest(&StrategySpec::BuyHold, &series).unwrap_err();
        assert!(matches!(err, BackcastError::InvalidSeries { .. }));
    }

    #[test]
    fn buy_hold_end_to_end() {
        let series = make_series(&[100.0, 105.0, 103.0, 110.0, 108.0]);
        let result = run_backtest(&StrategySpec::BuyHold, &series).unwrap();

        assert!((result.returns_pct - 8.0).abs() < 1e-10);
        assert_eq!(result.trade_log.len(), 2);
        assert_eq!(result.trade_log[0].action, TradeAction::Buy);
        assert_eq!(result.trade_log[0].price, 100.0);
        assert_eq!(result.trade_log[1].action, TradeAction::Sell);
        assert_eq!(result.trade_log[1].price, 108.0);
        assert_eq!(result.symbol, "TEST");
        assert_eq!(result.strategy_label, "Buy & Hold");
        assert!(result.metrics.volatility_pct > 0.0);
    }

    #[test]
    fn each_spec_dispatches() {
        let series = make_series(&[100.0, 101.0, 99.0, 102.0, 98.0, 103.0]);
        let specs = [
            StrategySpec::BuyHold,
            StrategySpec::MaCrossover {
                short_window: 2,
                long_window: 3,
            },
            StrategySpec::Rsi { period: 2 },
            StrategySpec::Bollinger {
                window: 3,
                num_std: 2.0,
            },
        ];
        for spec in &specs {
            let result = run_backtest(spec, &series).unwrap();
            assert_eq!(result.strategy_label, spec.to_string());
        }
    }

    #[test]
    fn oversized_windows_yield_neutral_result() {
        let series = make_series(&[100.0, 101.0, 102.0]);
        let spec = StrategySpec::MaCrossover {
            short_window: 10,
            long_window: 20,
        };
        let result = run_backtest(&spec, &series).unwrap();
        assert_eq!(result.returns_pct, 0.0);
        assert!(result.trade_log.is_empty());
    }
}
