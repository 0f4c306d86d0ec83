//! CSV file data adapter.
//!
//! Reads `{SYMBOL}.csv` files from a base directory. Columns are
//! positional: date,open,high,low,close and an optional sixth volume
//! column. Dates are ISO (YYYY-MM-DD). Rows may be unsorted on disk; the
//! fetched series is sorted ascending.

use crate::domain::error::BackcastError;
use crate::domain::series::{PriceBar, PriceSeries};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_series(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, BackcastError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| BackcastError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| BackcastError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| BackcastError::Data {
                reason: "missing date column".into(),
            })?;
            let date =
                NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| BackcastError::Data {
                    reason: format!("invalid date format: {}", e),
                })?;

            if date < start_date || date > end_date {
                continue;
            }

            let open: f64 = record
                .get(1)
                .ok_or_else(|| BackcastError::Data {
                    reason: "missing open column".into(),
                })?
                .parse()
                .map_err(|e| BackcastError::Data {
                    reason: format!("invalid open value: {}", e),
                })?;

            let high: f64 = record
                .get(2)
                .ok_or_else(|| BackcastError::Data {
                    reason: "missing high column".into(),
                })?
                .parse()
                .map_err(|e| BackcastError::Data {
                    reason: format!("invalid high value: {}", e),
                })?;

            let low: f64 = record
                .get(3)
                .ok_or_else(|| BackcastError::Data {
                    reason: "missing low column".into(),
                })?
                .parse()
                .map_err(|e| BackcastError::Data {
                    reason: format!("invalid low value: {}", e),
                })?;

            let close: f64 = record
                .get(4)
                .ok_or_else(|| BackcastError::Data {
                    reason: "missing close column".into(),
                })?
                .parse()
                .map_err(|e| BackcastError::Data {
                    reason: format!("invalid close value: {}", e),
                })?;

            let volume = match record.get(5) {
                Some(v) if !v.trim().is_empty() => {
                    Some(v.trim().parse::<i64>().map_err(|e| BackcastError::Data {
                        reason: format!("invalid volume value: {}", e),
                    })?)
                }
                _ => None,
            };

            bars.push(PriceBar {
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(PriceSeries::new(symbol, bars))
    }

    fn list_symbols(&self) -> Result<Vec<String>, BackcastError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| BackcastError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| BackcastError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, BackcastError> {
        let series = self.fetch_series(symbol, NaiveDate::MIN, NaiveDate::MAX)?;
        Ok(series
            .bars
            .first()
            .zip(series.bars.last())
            .map(|(first, last)| (first.date, last.date, series.len())))
    }
}
