//! End-to-end analysis: fetch, validate, forecast, value.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::data_source::FinancialDataSource;
use crate::forecast::{forecast_free_cash_flows, GrowthOutlook};
use crate::valuation::{value_company, DcfParameters};
use crate::{
    AnalysisError, CashFlowHistory, ForecastSeries, PriceHistory, ShareCount, Symbol,
    ValuationResult,
};

/// Inputs for one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub symbol: Symbol,
    pub outlook: GrowthOutlook,
    pub params: DcfParameters,
}

impl AnalysisRequest {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            outlook: GrowthOutlook::default(),
            params: DcfParameters::default(),
        }
    }

    pub fn with_outlook(mut self, outlook: GrowthOutlook) -> Self {
        self.outlook = outlook;
        self
    }

    pub fn with_params(mut self, params: DcfParameters) -> Self {
        self.params = params;
        self
    }
}

/// Everything a presentation layer needs to render a completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: Symbol,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub cash_flows: CashFlowHistory,
    pub free_cash_flows: Vec<f64>,
    pub degraded_periods: usize,
    pub outstanding_shares: ShareCount,
    pub outlook: GrowthOutlook,
    pub forecast: ForecastSeries,
    pub params: DcfParameters,
    pub valuation: ValuationResult,
    pub price_history: PriceHistory,
}

/// Run the full pipeline against `source`.
///
/// All three fetches complete before any validation, and validation runs in
/// a fixed order: cash flows, shares, prices.
#[instrument(skip_all, fields(symbol = %request.symbol))]
pub async fn analyze<S>(source: &S, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError>
where
    S: FinancialDataSource + ?Sized,
{
    request.params.validate()?;
    let symbol = &request.symbol;

    info!("fetching financial data");
    let cash_flows = source.cash_flows(symbol).await?;
    let shares = source.outstanding_shares(symbol).await?;
    let price_history = source.price_history(symbol).await?;

    if cash_flows.is_empty() || cash_flows.is_all_zero() {
        return Err(AnalysisError::NoCashFlowData {
            symbol: symbol.to_string(),
        });
    }
    let Some(outstanding_shares) = shares else {
        return Err(AnalysisError::NoShareData {
            symbol: symbol.to_string(),
        });
    };
    if price_history.is_unusable() {
        return Err(AnalysisError::NoPriceHistory {
            symbol: symbol.to_string(),
        });
    }

    let free_cash_flows = cash_flows.free_cash_flows();
    let forecast = forecast_free_cash_flows(&free_cash_flows, &request.outlook)?;
    let valuation = value_company(forecast.values(), &request.params, outstanding_shares)?;
    info!(
        total_valuation = valuation.total_valuation,
        per_share = valuation.per_share,
        "valuation complete"
    );

    Ok(AnalysisReport {
        symbol: symbol.clone(),
        generated_at: OffsetDateTime::now_utc(),
        degraded_periods: cash_flows.degraded_count(),
        free_cash_flows,
        cash_flows,
        outstanding_shares,
        outlook: request.outlook.clone(),
        forecast,
        params: request.params,
        valuation,
        price_history,
    })
}
