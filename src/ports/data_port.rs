//! Data access port trait.

use crate::domain::error::BackcastError;
use crate::domain::series::PriceSeries;
use chrono::NaiveDate;

pub trait DataPort {
    /// Bars for `symbol` within `[start_date, end_date]`, sorted ascending.
    fn fetch_series(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, BackcastError>;

    fn list_symbols(&self) -> Result<Vec<String>, BackcastError>;

    /// First date, last date and bar count for `symbol`, or `None` when the
    /// symbol has no rows.
    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, BackcastError>;
}
