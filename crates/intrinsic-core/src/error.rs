use thiserror::Error;

use crate::data_source::SourceError;

/// Validation errors raised while constructing domain values from user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("please enter a valid API key")]
    MissingApiKey,

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be positive")]
    NonPositiveValue { field: &'static str },
}

/// Errors raised while projecting future free cash flow.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    #[error("cannot forecast from an empty free cash flow history")]
    EmptyHistory,
    #[error("forecast input '{field}' must be finite")]
    NonFinite { field: &'static str },
}

/// Errors raised by the discounted cash flow engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValuationError {
    #[error(
        "undefined terminal value: discount rate equals terminal growth rate ({rate})"
    )]
    UndefinedTerminalValue { rate: f64 },
    #[error("discount rate must be greater than -1, got {rate}")]
    DiscountRateNotAboveMinusOne { rate: f64 },
    #[error("cannot value an empty forecast")]
    EmptyForecast,
    #[error("outstanding shares must be positive to derive a per-share value")]
    NonPositiveShares,
    #[error("valuation input '{field}' must be finite")]
    NonFinite { field: &'static str },
}

/// Top-level error for a full analysis run.
///
/// Each insufficient-data variant halts the run before any valuation is
/// attempted.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("unable to fetch valid free cash flow data for {symbol}; check the ticker or API response")]
    NoCashFlowData { symbol: String },

    #[error("unable to fetch valid outstanding shares data for {symbol}")]
    NoShareData { symbol: String },

    #[error("unable to fetch historical share price data for {symbol}")]
    NoPriceHistory { symbol: String },

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Valuation(#[from] ValuationError),
}

impl AnalysisError {
    /// Whether the run stopped because upstream data was missing or unusable.
    pub const fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            Self::NoCashFlowData { .. } | Self::NoShareData { .. } | Self::NoPriceHistory { .. }
        )
    }
}
