//! Two-stage discounted cash flow valuation.
//!
//! ```text
//! discounted  = Σ fcf[i] / (1 + r)^i            i = 1..=N
//! terminal    = fcf[N] * (1 + g) / (r - g)
//! valuation   = discounted + terminal / (1 + r)^N
//! per share   = valuation / shares
//! ```

use serde::{Deserialize, Serialize};

use crate::{ShareCount, ValuationError, ValuationResult};

pub const DEFAULT_DISCOUNT_RATE: f64 = 0.07;
pub const DEFAULT_TERMINAL_GROWTH_RATE: f64 = 0.04;

const RATE_EPSILON: f64 = 1e-12;

/// Discount and perpetuity growth rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DcfParameters {
    pub discount_rate: f64,
    pub terminal_growth_rate: f64,
}

impl Default for DcfParameters {
    fn default() -> Self {
        Self {
            discount_rate: DEFAULT_DISCOUNT_RATE,
            terminal_growth_rate: DEFAULT_TERMINAL_GROWTH_RATE,
        }
    }
}

impl DcfParameters {
    pub fn new(discount_rate: f64, terminal_growth_rate: f64) -> Result<Self, ValuationError> {
        let params = Self {
            discount_rate,
            terminal_growth_rate,
        };
        params.validate()?;
        Ok(params)
    }

    /// Reject rate pairs for which the terminal value is undefined.
    pub fn validate(&self) -> Result<(), ValuationError> {
        if !self.discount_rate.is_finite() {
            return Err(ValuationError::NonFinite {
                field: "discount_rate",
            });
        }
        if !self.terminal_growth_rate.is_finite() {
            return Err(ValuationError::NonFinite {
                field: "terminal_growth_rate",
            });
        }
        if self.discount_rate <= -1.0 {
            return Err(ValuationError::DiscountRateNotAboveMinusOne {
                rate: self.discount_rate,
            });
        }
        if (self.discount_rate - self.terminal_growth_rate).abs() < RATE_EPSILON {
            return Err(ValuationError::UndefinedTerminalValue {
                rate: self.discount_rate,
            });
        }
        Ok(())
    }
}

/// Present-value components of a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DcfBreakdown {
    pub discounted_cash_flows: f64,
    pub terminal_value: f64,
    pub discounted_terminal_value: f64,
    pub total_valuation: f64,
}

/// Discount `free_cash_flows` plus a perpetuity terminal value to today.
pub fn discounted_cash_flow(
    free_cash_flows: &[f64],
    params: &DcfParameters,
) -> Result<DcfBreakdown, ValuationError> {
    params.validate()?;
    let last = *free_cash_flows.last().ok_or(ValuationError::EmptyForecast)?;
    if free_cash_flows.iter().any(|value| !value.is_finite()) {
        return Err(ValuationError::NonFinite {
            field: "free_cash_flow",
        });
    }

    let base = 1.0 + params.discount_rate;
    let discounted_cash_flows = free_cash_flows
        .iter()
        .zip(1_i32..)
        .map(|(fcf, period)| fcf / base.powi(period))
        .sum::<f64>();

    let horizon = i32::try_from(free_cash_flows.len()).map_err(|_| ValuationError::NonFinite {
        field: "horizon",
    })?;
    let terminal_value = last * (1.0 + params.terminal_growth_rate)
        / (params.discount_rate - params.terminal_growth_rate);
    let discounted_terminal_value = terminal_value / base.powi(horizon);
    let total_valuation = discounted_cash_flows + discounted_terminal_value;

    if !total_valuation.is_finite() {
        return Err(ValuationError::NonFinite {
            field: "total_valuation",
        });
    }

    Ok(DcfBreakdown {
        discounted_cash_flows,
        terminal_value,
        discounted_terminal_value,
        total_valuation,
    })
}

/// Total valuation spread over outstanding shares.
pub fn value_per_share(total_valuation: f64, shares: ShareCount) -> Result<f64, ValuationError> {
    let count = shares.get();
    if count <= 0.0 {
        return Err(ValuationError::NonPositiveShares);
    }
    Ok(total_valuation / count)
}

/// Full valuation of a forecast for a company with `shares` outstanding.
pub fn value_company(
    free_cash_flows: &[f64],
    params: &DcfParameters,
    shares: ShareCount,
) -> Result<ValuationResult, ValuationError> {
    let breakdown = discounted_cash_flow(free_cash_flows, params)?;
    let per_share = value_per_share(breakdown.total_valuation, shares)?;

    Ok(ValuationResult {
        discounted_cash_flows: breakdown.discounted_cash_flows,
        terminal_value: breakdown.terminal_value,
        discounted_terminal_value: breakdown.discounted_terminal_value,
        total_valuation: breakdown.total_valuation,
        per_share,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-6
    }

    #[test]
    fn single_period_matches_closed_form() {
        for (r, g) in [(0.07, 0.04), (0.10, 0.02), (0.05, 0.08), (0.0, -0.03)] {
            let params = DcfParameters::new(r, g).expect("valid rates");
            let f = 250.0;
            let expected = f / (1.0 + r) + (f * (1.0 + g) / (r - g)) / (1.0 + r);

            let breakdown = discounted_cash_flow(&[f], &params).expect("valuation");
            assert!(
                close(breakdown.total_valuation, expected),
                "r={r} g={g}: {} vs {expected}",
                breakdown.total_valuation
            );
        }
    }

    #[test]
    fn five_year_forecast_reproduces_reference_valuation() {
        let forecast = [153.73, 161.42, 169.49, 177.96, 186.86];
        let breakdown =
            discounted_cash_flow(&forecast, &DcfParameters::default()).expect("valuation");

        assert!((breakdown.discounted_cash_flows - 692.01).abs() < 0.005);
        assert!((breakdown.terminal_value - 6477.81).abs() < 0.005);
        assert!((breakdown.total_valuation - 5310.60).abs() < 0.005);
    }

    #[test]
    fn equal_rates_are_rejected() {
        let err = DcfParameters::new(0.05, 0.05).expect_err("must fail");
        assert!(matches!(err, ValuationError::UndefinedTerminalValue { .. }));

        let params = DcfParameters {
            discount_rate: 0.06,
            terminal_growth_rate: 0.06,
        };
        let err = discounted_cash_flow(&[1.0], &params).expect_err("must fail");
        assert!(matches!(err, ValuationError::UndefinedTerminalValue { .. }));
    }

    #[test]
    fn discount_rate_at_minus_one_is_rejected() {
        let err = DcfParameters::new(-1.0, 0.02).expect_err("must fail");
        assert!(matches!(
            err,
            ValuationError::DiscountRateNotAboveMinusOne { .. }
        ));
    }

    #[test]
    fn empty_forecast_is_rejected() {
        let err = discounted_cash_flow(&[], &DcfParameters::default()).expect_err("must fail");
        assert_eq!(err, ValuationError::EmptyForecast);
    }

    #[test]
    fn per_share_divides_by_share_count() {
        let shares = ShareCount::new(10.0).expect("shares");
        let result = value_company(&[100.0], &DcfParameters::default(), shares).expect("valuation");
        assert!(close(result.per_share * 10.0, result.total_valuation));
    }
}
