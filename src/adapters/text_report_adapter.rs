//! Plain-text report adapter implementing ReportPort.
//!
//! Renders the backtest summary, performance metrics and trade log as
//! aligned text. The per-day signal section is opt-in since it grows
//! linearly with the series.

use std::fs;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::BackcastError;
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter {
    include_signals: bool,
}

impl TextReportAdapter {
    pub fn new(include_signals: bool) -> Self {
        Self { include_signals }
    }
}

impl Default for TextReportAdapter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ReportPort for TextReportAdapter {
    fn write(&self, result: &BacktestResult, output_path: &str) -> Result<(), BackcastError> {
        let content = render(result, self.include_signals);
        fs::write(output_path, content)?;
        Ok(())
    }
}

fn fmt_metric(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// Render the full report as a string ready to be written to a file.
pub fn render(result: &BacktestResult, include_signals: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!("Backtest Report: {}\n", result.strategy_label));
    out.push_str(&format!("Symbol: {}\n", result.symbol));
    out.push('\n');

    out.push_str(&format!(
        "{:<18} {}\n",
        "Returns (%):",
        fmt_metric(result.returns_pct)
    ));
    out.push_str(&format!(
        "{:<18} {}\n",
        "Volatility (%):",
        fmt_metric(result.metrics.volatility_pct)
    ));
    out.push_str(&format!(
        "{:<18} {}\n",
        "Sharpe Ratio:",
        fmt_metric(result.metrics.sharpe_ratio)
    ));
    out.push_str(&format!(
        "{:<18} {}\n",
        "Max Drawdown (%):",
        fmt_metric(result.metrics.max_drawdown_pct)
    ));
    out.push('\n');

    out.push_str("Trade Log\n");
    out.push_str("---------\n");
    if result.trade_log.is_empty() {
        out.push_str("No trades executed.\n");
    } else {
        for event in &result.trade_log {
            out.push_str(&format!(
                "{:<5} {} {:>10.2}\n",
                event.action.to_string(),
                event.date,
                event.price
            ));
        }
    }

    if include_signals && !result.signals.is_empty() {
        out.push('\n');
        out.push_str("Signals\n");
        out.push_str("-------\n");
        for point in &result.signals {
            out.push_str(&format!("{} {:>6}\n", point.date, point.signal.to_string()));
        }
    }

    out
}
