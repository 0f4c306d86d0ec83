//! Domain error types.

/// Top-level error type for backcast.
///
/// Conditions that resolve to a neutral outcome (a window longer than the
/// series, a one-sided trade log, an undefined metric) are not errors and
/// never appear here. Only failures the caller must act on do: missing or
/// malformed input data, bad configuration, and an unrecognized strategy.
#[derive(Debug, thiserror::Error)]
pub enum BackcastError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown strategy: {name}")]
    UnknownStrategy { name: String },

    #[error("no price data for {symbol}")]
    NoData { symbol: String },

    #[error("invalid price series for {symbol}: {reason}")]
    InvalidSeries { symbol: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&BackcastError> for std::process::ExitCode {
    fn from(err: &BackcastError) -> Self {
        let code: u8 = match err {
            BackcastError::Io(_) => 1,
            BackcastError::ConfigParse { .. }
            | BackcastError::ConfigMissing { .. }
            | BackcastError::ConfigInvalid { .. } => 2,
            BackcastError::Data { .. } => 3,
            BackcastError::UnknownStrategy { .. } => 4,
            BackcastError::NoData { .. } | BackcastError::InvalidSeries { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
