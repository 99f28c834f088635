//! Financial Modeling Prep adapter.
//!
//! Reads the v3 cash flow statement, company profile and full price history
//! endpoints. Field-level problems degrade locally (zero free cash flow, no
//! share count, skipped price point); only transport failures and unreadable
//! bodies surface as [`SourceError`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::data_source::{Endpoint, FinancialDataSource, SourceError};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::{
    ApiKey, CashFlowHistory, CashFlowRecord, FieldValue, PriceHistory, PricePoint, ShareCount,
    Symbol,
};

pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

const OPERATING_CASH_FLOW_FIELD: &str = "Operating Cash Flow";
const CAPITAL_EXPENDITURE_FIELD: &str = "Capital Expenditure";

/// Connection settings for the FMP adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FmpConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for FmpConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl FmpConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Financial Modeling Prep adapter.
#[derive(Clone)]
pub struct FmpAdapter {
    http_client: Arc<dyn HttpClient>,
    api_key: ApiKey,
    config: FmpConfig,
}

impl std::fmt::Debug for FmpAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FmpAdapter")
            .field("api_key", &self.api_key)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FmpAdapter {
    /// Adapter backed by the production reqwest transport.
    pub fn new(api_key: ApiKey, config: FmpConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), api_key, config)
    }

    pub fn with_http_client(
        http_client: Arc<dyn HttpClient>,
        api_key: ApiKey,
        config: FmpConfig,
    ) -> Self {
        Self {
            http_client,
            api_key,
            config,
        }
    }

    pub fn config(&self) -> &FmpConfig {
        &self.config
    }

    fn endpoint_url(&self, endpoint: Endpoint, symbol: &Symbol) -> String {
        let path = match endpoint {
            Endpoint::CashFlowStatement => "financials/cash-flow-statement",
            Endpoint::Profile => "profile",
            Endpoint::HistoricalPrices => "historical-price-full",
        };
        format!(
            "{}/{}/{}?apikey={}",
            self.config.base_url,
            path,
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(self.api_key.expose()),
        )
    }

    async fn fetch_json(&self, endpoint: Endpoint, symbol: &Symbol) -> Result<Value, SourceError> {
        let request = HttpRequest::get(self.endpoint_url(endpoint, symbol))
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms);
        debug!(%endpoint, %symbol, url = %request.redacted_url(), "requesting upstream");

        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.retryable() {
                SourceError::unavailable(format!("{endpoint} transport error: {}", error.message()))
            } else {
                SourceError::internal(format!("{endpoint} transport error: {}", error.message()))
            }
        })?;

        if !response.is_success() {
            warn!(%endpoint, %symbol, status = response.status, "upstream returned error status");
            return Err(SourceError::from_status(endpoint, response.status));
        }

        serde_json::from_str(&response.body).map_err(|e| {
            SourceError::malformed(format!("failed to parse {endpoint} response: {e}"))
        })
    }
}

impl FinancialDataSource for FmpAdapter {
    fn cash_flows<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<CashFlowHistory, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self.fetch_json(Endpoint::CashFlowStatement, symbol).await?;
            let history = parse_cash_flows(&body);

            let degraded = history.degraded_count();
            if degraded > 0 {
                warn!(%symbol, degraded, "cash flow periods with unparseable fields were zeroed");
            }
            debug!(%symbol, periods = history.len(), "parsed cash flow statement");
            Ok(history)
        })
    }

    fn outstanding_shares<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ShareCount>, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self.fetch_json(Endpoint::Profile, symbol).await?;
            let shares = parse_outstanding_shares(&body);
            if shares.is_none() {
                warn!(%symbol, "profile did not yield an outstanding share count");
            }
            Ok(shares)
        })
    }

    fn price_history<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<PriceHistory, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self.fetch_json(Endpoint::HistoricalPrices, symbol).await?;
            let history = parse_price_history(&body);
            if let Some(points) = history.points() {
                debug!(%symbol, points = points.len(), "parsed price history");
            }
            Ok(history)
        })
    }
}

/// Derive free cash flow per period from a cash flow statement payload.
pub fn parse_cash_flows(body: &Value) -> CashFlowHistory {
    let Some(statements) = body.get("financials").and_then(Value::as_array) else {
        return CashFlowHistory::default();
    };

    let records = statements
        .iter()
        .map(|entry| match entry.as_object() {
            Some(fields) => CashFlowRecord::new(
                period_label(fields),
                FieldValue::from_json(fields.get(OPERATING_CASH_FLOW_FIELD)),
                FieldValue::from_json(fields.get(CAPITAL_EXPENDITURE_FIELD)),
            ),
            None => CashFlowRecord::unreadable(None, entry.to_string()),
        })
        .collect();

    CashFlowHistory::new(records)
}

fn period_label(fields: &Map<String, Value>) -> Option<String> {
    fields
        .get("date")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Approximate outstanding shares as `mktCap / price` from a profile payload.
///
/// A missing market cap counts as zero and a missing price as one.
pub fn parse_outstanding_shares(body: &Value) -> Option<ShareCount> {
    let profile = body.as_array()?.first()?.as_object()?;
    let market_cap = FieldValue::from_json(profile.get("mktCap")).or_default(0.0)?;
    let price = FieldValue::from_json(profile.get("price")).or_default(1.0)?;
    ShareCount::from_market_cap(market_cap, price)
}

/// Project a historical price payload down to `(date, close)` pairs.
pub fn parse_price_history(body: &Value) -> PriceHistory {
    let Some(historical) = body.get("historical") else {
        return PriceHistory::Absent;
    };
    let Some(entries) = historical.as_array() else {
        warn!("historical price field is not a list");
        return PriceHistory::Absent;
    };

    let mut skipped = 0_usize;
    let points = entries
        .iter()
        .filter_map(|entry| {
            let date = entry.get("date").and_then(Value::as_str);
            let close = FieldValue::from_json(entry.get("close"));
            match (date, close) {
                (Some(date), FieldValue::Present(close)) => Some(PricePoint::new(date, close)),
                _ => {
                    skipped += 1;
                    None
                }
            }
        })
        .collect::<Vec<_>>();

    if skipped > 0 {
        warn!(skipped, "skipped price entries without a readable date or close");
    }

    PriceHistory::Present(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cash_flows_preserve_upstream_order() {
        let body = json!({
            "symbol": "META",
            "financials": [
                { "date": "2022-12-31", "Operating Cash Flow": "500", "Capital Expenditure": "200" },
                { "date": "2023-12-31", "Operating Cash Flow": 700.5, "Capital Expenditure": 100 }
            ]
        });

        let history = parse_cash_flows(&body);
        assert_eq!(history.free_cash_flows(), vec![300.0, 600.5]);
        assert_eq!(
            history.latest().and_then(|r| r.period.as_deref()),
            Some("2023-12-31")
        );
    }

    #[test]
    fn non_numeric_cash_flow_entry_becomes_zero() {
        let body = json!({
            "financials": [
                { "Operating Cash Flow": "n/a", "Capital Expenditure": "10" },
                { "Operating Cash Flow": "50", "Capital Expenditure": "10" },
                "garbage"
            ]
        });

        let history = parse_cash_flows(&body);
        assert_eq!(history.free_cash_flows(), vec![0.0, 40.0, 0.0]);
        assert_eq!(history.degraded_count(), 2);
    }

    #[test]
    fn cash_flows_without_statements_are_empty() {
        assert!(parse_cash_flows(&json!({ "Error Message": "Invalid API KEY." })).is_empty());
        assert!(parse_cash_flows(&json!([])).is_empty());
    }

    #[test]
    fn shares_are_market_cap_over_price() {
        let body = json!([{ "symbol": "META", "mktCap": 1_000_000_000.0, "price": "250" }]);
        let shares = parse_outstanding_shares(&body).expect("shares should derive");
        assert_eq!(shares.get(), 4_000_000.0);
    }

    #[test]
    fn missing_price_defaults_to_one() {
        let body = json!([{ "mktCap": 1234.0 }]);
        let shares = parse_outstanding_shares(&body).expect("shares should derive");
        assert_eq!(shares.get(), 1234.0);
    }

    #[test]
    fn zero_price_yields_no_shares() {
        let body = json!([{ "mktCap": 1234.0, "price": 0 }]);
        assert_eq!(parse_outstanding_shares(&body), None);
    }

    #[test]
    fn unusable_profiles_yield_no_shares() {
        assert_eq!(parse_outstanding_shares(&json!([])), None);
        assert_eq!(parse_outstanding_shares(&json!({ "mktCap": 10 })), None);
        assert_eq!(
            parse_outstanding_shares(&json!([{ "mktCap": "lots", "price": 3 }])),
            None
        );
    }

    #[test]
    fn price_history_projects_date_and_close() {
        let body = json!({
            "symbol": "META",
            "historical": [
                { "date": "2024-01-03", "open": 1.0, "close": 344.47, "volume": 10 },
                { "date": "2024-01-02", "close": 346.29 }
            ]
        });

        let history = parse_price_history(&body);
        assert_eq!(
            history,
            PriceHistory::Present(vec![
                PricePoint::new("2024-01-03", 344.47),
                PricePoint::new("2024-01-02", 346.29),
            ])
        );
    }

    #[test]
    fn price_history_skips_incomplete_entries() {
        let body = json!({ "historical": [{ "date": "2024-01-03" }, { "close": 1.0 }] });
        assert_eq!(parse_price_history(&body), PriceHistory::Present(Vec::new()));
    }

    #[test]
    fn missing_historical_field_is_absent() {
        assert_eq!(parse_price_history(&json!({})), PriceHistory::Absent);
        assert_eq!(parse_price_history(&json!([])), PriceHistory::Absent);
    }

    #[test]
    fn endpoint_urls_carry_symbol_and_key() {
        let adapter = FmpAdapter::new(
            ApiKey::parse("k&y").expect("key"),
            FmpConfig::default().with_base_url("https://example.test/api/v3/"),
        );
        let symbol = Symbol::parse("meta").expect("symbol");

        assert_eq!(
            adapter.endpoint_url(Endpoint::Profile, &symbol),
            "https://example.test/api/v3/profile/META?apikey=k%26y"
        );
        assert_eq!(
            adapter.endpoint_url(Endpoint::CashFlowStatement, &symbol),
            "https://example.test/api/v3/financials/cash-flow-statement/META?apikey=k%26y"
        );
    }
}
