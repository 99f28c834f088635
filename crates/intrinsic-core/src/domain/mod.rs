//! # Domain Models
//!
//! Typed values that flow between the fetchers, the forecast and valuation
//! engine, and the presentation layer.
//!
//! ## Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated, uppercased ticker |
//! | [`ApiKey`] | Redacted upstream credential |
//! | [`FieldValue`] | Outcome of reading one numeric upstream field |
//! | [`CashFlowRecord`] | One statement period with derived free cash flow |
//! | [`CashFlowHistory`] | Periods in upstream order |
//! | [`ShareCount`] | Positive outstanding share count |
//! | [`PricePoint`] | Date and close pair |
//! | [`PriceHistory`] | Present closes or an explicit absence |
//! | [`ForecastSeries`] | Five projected annual free cash flows |
//! | [`ValuationResult`] | Present value and per-share estimate |
//!
//! Absence is always modelled explicitly: an empty price series and a
//! response without one are different values.

mod models;
mod symbol;

pub use models::{
    CashFlowHistory, CashFlowRecord, FieldValue, ForecastSeries, PriceHistory, PricePoint,
    ShareCount, ValuationResult, FORECAST_YEARS,
};
pub use symbol::{ApiKey, Symbol};
