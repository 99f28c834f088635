//! # Intrinsic Core
//!
//! Fundamentals fetching, free cash flow forecasting and discounted cash flow
//! valuation.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Upstream adapters (Financial Modeling Prep) |
//! | [`analysis`] | Fetch, validate, forecast and value in one call |
//! | [`data_source`] | Fetcher trait and source errors |
//! | [`domain`] | Symbols, cash flow records, share counts, price history |
//! | [`error`] | Validation, forecast, valuation and analysis errors |
//! | [`forecast`] | Fixed-growth five year projection |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`valuation`] | Two-stage DCF engine |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use intrinsic_core::{analyze, AnalysisRequest, ApiKey, FmpAdapter, FmpConfig, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = FmpAdapter::new(ApiKey::parse("your-key")?, FmpConfig::default());
//!     let request = AnalysisRequest::new(Symbol::parse("META")?);
//!
//!     let report = analyze(&source, &request).await?;
//!     println!("estimated share price: ${:.2}", report.valuation.per_share);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / User     │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ analyze()       │────▶│ Forecast + DCF   │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Data Source     │────▶│ HTTP Client      │
//! │ (FMP adapter)   │     │ (reqwest)        │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Security
//!
//! API keys are wrapped in [`ApiKey`] and masked in every `Debug` and log
//! rendering of outgoing requests.

pub mod adapters;
pub mod analysis;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod http_client;
pub mod valuation;

pub use adapters::{FmpAdapter, FmpConfig};

pub use analysis::{analyze, AnalysisReport, AnalysisRequest};

pub use data_source::{Endpoint, FinancialDataSource, SourceError, SourceErrorKind};

pub use domain::{
    ApiKey, CashFlowHistory, CashFlowRecord, FieldValue, ForecastSeries, PriceHistory,
    PricePoint, ShareCount, Symbol, ValuationResult, FORECAST_YEARS,
};

pub use error::{AnalysisError, ForecastError, ValidationError, ValuationError};

pub use forecast::{forecast_free_cash_flows, GrowthOutlook, DEFAULT_GROWTH_RATE};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use valuation::{
    discounted_cash_flow, value_company, value_per_share, DcfBreakdown, DcfParameters,
};
