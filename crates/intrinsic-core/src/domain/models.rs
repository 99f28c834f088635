use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ValidationError;

/// Number of projected annual periods in every forecast.
pub const FORECAST_YEARS: usize = 5;

/// Outcome of reading one numeric field from an upstream payload.
///
/// Keeps "genuinely zero" apart from "absent" and "garbage" so callers can
/// decide how to degrade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Present(f64),
    Missing,
    Unparseable(String),
}

impl FieldValue {
    /// Read a numeric field that may arrive as a JSON number or numeric string.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::Number(number)) => match number.as_f64() {
                Some(parsed) if parsed.is_finite() => Self::Present(parsed),
                _ => Self::Unparseable(number.to_string()),
            },
            Some(Value::String(raw)) => match raw.trim().parse::<f64>() {
                Ok(parsed) if parsed.is_finite() => Self::Present(parsed),
                _ => Self::Unparseable(raw.clone()),
            },
            Some(other) => Self::Unparseable(other.to_string()),
        }
    }

    /// Present value, `default` when missing, `None` when unparseable.
    pub fn or_default(&self, default: f64) -> Option<f64> {
        match self {
            Self::Present(value) => Some(*value),
            Self::Missing => Some(default),
            Self::Unparseable(_) => None,
        }
    }

    pub const fn is_unparseable(&self) -> bool {
        matches!(self, Self::Unparseable(_))
    }
}

/// One reporting period of the cash flow statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowRecord {
    pub period: Option<String>,
    pub operating_cash_flow: FieldValue,
    pub capital_expenditure: FieldValue,
    pub free_cash_flow: f64,
}

impl CashFlowRecord {
    /// Derive free cash flow as operating cash flow minus capital expenditure.
    ///
    /// Missing fields count as zero. An unparseable field zeroes the period.
    pub fn new(
        period: Option<String>,
        operating_cash_flow: FieldValue,
        capital_expenditure: FieldValue,
    ) -> Self {
        let free_cash_flow = match (
            operating_cash_flow.or_default(0.0),
            capital_expenditure.or_default(0.0),
        ) {
            (Some(ocf), Some(capex)) => ocf - capex,
            _ => 0.0,
        };

        Self {
            period,
            operating_cash_flow,
            capital_expenditure,
            free_cash_flow,
        }
    }

    /// A period whose entry could not be read at all.
    pub fn unreadable(period: Option<String>, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self::new(
            period,
            FieldValue::Unparseable(raw.clone()),
            FieldValue::Unparseable(raw),
        )
    }

    pub const fn is_degraded(&self) -> bool {
        self.operating_cash_flow.is_unparseable() || self.capital_expenditure.is_unparseable()
    }
}

/// Cash flow periods in upstream order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CashFlowHistory {
    pub records: Vec<CashFlowRecord>,
}

impl CashFlowHistory {
    pub fn new(records: Vec<CashFlowRecord>) -> Self {
        Self { records }
    }

    pub fn free_cash_flows(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(|record| record.free_cash_flow)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_all_zero(&self) -> bool {
        self.records.iter().all(|record| record.free_cash_flow == 0.0)
    }

    pub fn latest(&self) -> Option<&CashFlowRecord> {
        self.records.last()
    }

    pub fn degraded_count(&self) -> usize {
        self.records.iter().filter(|record| record.is_degraded()).count()
    }
}

/// Outstanding share count. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ShareCount(f64);

impl ShareCount {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                field: "outstanding_shares",
            });
        }
        if value <= 0.0 {
            return Err(ValidationError::NonPositiveValue {
                field: "outstanding_shares",
            });
        }
        Ok(Self(value))
    }

    /// Approximate shares outstanding as market cap over share price.
    ///
    /// `None` when the price is zero or the quotient is not a valid count.
    pub fn from_market_cap(market_cap: f64, price: f64) -> Option<Self> {
        if price == 0.0 {
            return None;
        }
        Self::new(market_cap / price).ok()
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ShareCount {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShareCount> for f64 {
    fn from(value: ShareCount) -> Self {
        value.0
    }
}

/// Daily close used for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: impl Into<String>, close: f64) -> Self {
        Self {
            date: date.into(),
            close,
        }
    }
}

/// Historical closes, or an explicit marker that the upstream had none.
///
/// `Absent` is distinct from `Present(vec![])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "points", rename_all = "snake_case")]
pub enum PriceHistory {
    Present(Vec<PricePoint>),
    Absent,
}

impl PriceHistory {
    pub fn points(&self) -> Option<&[PricePoint]> {
        match self {
            Self::Present(points) => Some(points.as_slice()),
            Self::Absent => None,
        }
    }

    /// True when there is nothing to chart.
    pub fn is_unusable(&self) -> bool {
        self.points().map_or(true, <[PricePoint]>::is_empty)
    }
}

/// Projected annual free cash flow, rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub growth_rate: f64,
    pub values: [f64; FORECAST_YEARS],
}

impl ForecastSeries {
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Discounted cash flow outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub discounted_cash_flows: f64,
    pub terminal_value: f64,
    pub discounted_terminal_value: f64,
    pub total_valuation: f64,
    pub per_share: f64,
}
