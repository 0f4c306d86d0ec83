//! Core domain types and logic.

pub mod backtest;
pub mod config_validation;
pub mod error;
pub mod metrics;
pub mod rolling;
pub mod series;
pub mod signal;
pub mod strategy;
