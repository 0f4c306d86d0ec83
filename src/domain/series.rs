//! Daily price bar and price series representation.

use chrono::NaiveDate;

use crate::domain::error::BackcastError;

#[derive(Debug, Clone)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<i64>,
}

/// A symbol's daily bars, sorted ascending by date.
///
/// The series is immutable to the calculation layer: strategies and metrics
/// read it and allocate their own derived buffers.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub symbol: String,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Copy of the close column, in date order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Check series invariants: strictly increasing dates (no duplicates)
    /// and strictly positive closes. `NaN` closes fail the positivity check.
    pub fn validate(&self) -> Result<(), BackcastError> {
        for pair in self.bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(BackcastError::InvalidSeries {
                    symbol: self.symbol.clone(),
                    reason: format!(
                        "dates not strictly increasing at {} -> {}",
                        pair[0].date, pair[1].date
                    ),
                });
            }
        }
        for bar in &self.bars {
            if !(bar.close > 0.0) {
                return Err(BackcastError::InvalidSeries {
                    symbol: self.symbol.clone(),
                    reason: format!("non-positive close {} on {}", bar.close, bar.date),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: Some(1_000),
        }
    }

    #[test]
    fn closes_extracts_column_in_order() {
        let series = PriceSeries::new("BHP", vec![bar(1, 100.0), bar(2, 101.5), bar(3, 99.0)]);
        assert_eq!(series.closes(), vec![100.0, 101.5, 99.0]);
    }

    #[test]
    fn validate_accepts_ordered_positive_series() {
        let series = PriceSeries::new("BHP", vec![bar(1, 100.0), bar(2, 101.5)]);
        assert!(series.validate().is_ok());
    }

    #[test]
    fn validate_accepts_empty_series() {
        let series = PriceSeries::new("BHP", vec![]);
        assert!(series.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_date() {
        let series = PriceSeries::new("BHP", vec![bar(1, 100.0), bar(1, 101.0)]);
        assert!(matches!(
            series.validate(),
            Err(BackcastError::InvalidSeries { .. })
        ));
    }

    #[test]
    fn validate_rejects_out_of_order_dates() {
        let series = PriceSeries::new("BHP", vec![bar(2, 100.0), bar(1, 101.0)]);
        assert!(series.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_close() {
        let series = PriceSeries::new("BHP", vec![bar(1, 100.0), bar(2, 0.0)]);
        assert!(series.validate().is_err());
    }

    #[test]
    fn validate_rejects_nan_close() {
        let series = PriceSeries::new("BHP", vec![bar(1, f64::NAN)]);
        assert!(series.validate().is_err());
    }
}
