//! Signal and trade event types shared by all strategies.

use chrono::NaiveDate;

/// Desired position state on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Flat,
    Long,
    Short,
}

impl Signal {
    /// Numeric position state: Flat = 0, Long = 1, Short = -1.
    ///
    /// Trades fire on differences of consecutive values, so the spacing
    /// matters: a Short -> Long swing is a step of +2, Flat -> Long is +1.
    pub fn value(self) -> i8 {
        match self {
            Signal::Flat => 0,
            Signal::Long => 1,
            Signal::Short => -1,
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Flat => write!(f, "FLAT"),
            Signal::Long => write!(f, "LONG"),
            Signal::Short => write!(f, "SHORT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAction {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "BUY"),
            TradeAction::Sell => write!(f, "SELL"),
        }
    }
}

/// A discrete buy or sell at the close of a trading day.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeEvent {
    pub action: TradeAction,
    pub date: NaiveDate,
    pub price: f64,
}

/// The signal a strategy held on one evaluated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalPoint {
    pub date: NaiveDate,
    pub signal: Signal,
}
