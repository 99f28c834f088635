//! Fixed-growth free cash flow projection.

use serde::{Deserialize, Serialize};

use crate::{ForecastError, ForecastSeries, FORECAST_YEARS};

/// Annual growth applied to every projected period.
pub const DEFAULT_GROWTH_RATE: f64 = 0.05;

pub const DEFAULT_NARRATIVE: &str =
    "The company is expected to grow significantly over the next 5 years.";

/// Growth assumption for the forecast horizon.
///
/// The narrative is reported alongside the result but does not move the rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthOutlook {
    pub narrative: String,
    pub rate: f64,
}

impl GrowthOutlook {
    pub fn fixed(narrative: impl Into<String>) -> Self {
        Self {
            narrative: narrative.into(),
            rate: DEFAULT_GROWTH_RATE,
        }
    }
}

impl Default for GrowthOutlook {
    fn default() -> Self {
        Self::fixed(DEFAULT_NARRATIVE)
    }
}

/// Project [`FORECAST_YEARS`] annual values from the last historical figure.
///
/// Compounding runs on unrounded values; each emitted value is rounded to
/// cents.
pub fn forecast_free_cash_flows(
    history: &[f64],
    outlook: &GrowthOutlook,
) -> Result<ForecastSeries, ForecastError> {
    let seed = *history.last().ok_or(ForecastError::EmptyHistory)?;
    if !seed.is_finite() {
        return Err(ForecastError::NonFinite { field: "seed" });
    }
    if !outlook.rate.is_finite() {
        return Err(ForecastError::NonFinite {
            field: "growth_rate",
        });
    }

    let multiplier = 1.0 + outlook.rate;
    let mut values = [0.0; FORECAST_YEARS];
    let mut last = seed;
    for value in &mut values {
        last *= multiplier;
        *value = round_cents(last);
    }

    Ok(ForecastSeries {
        growth_rate: outlook.rate,
        values,
    })
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
