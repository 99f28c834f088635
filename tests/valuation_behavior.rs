//! Behavior tests for the full analysis pipeline.
//!
//! These tests verify what a user sees after pressing "Analyze": either a
//! complete report or exactly one insufficient-data or undefined-valuation
//! error, raised before any downstream value is computed.

mod support;

use std::sync::Arc;

use intrinsic_core::{
    analyze, AnalysisError, AnalysisRequest, ApiKey, DcfParameters, GrowthOutlook, Symbol,
    ValidationError, ValuationError,
};

use support::{adapter, healthy_upstream, ScriptedHttpClient, CASH_FLOWS, PRICES, PROFILE};

fn request() -> AnalysisRequest {
    AnalysisRequest::new(Symbol::parse("META").expect("valid symbol"))
}

// =============================================================================
// Successful analysis
// =============================================================================

#[tokio::test]
async fn when_all_data_is_valid_report_reproduces_reference_valuation() {
    // Given: historical free cash flow of 100, 110, 121, 133.1, 146.41 and 10 shares
    let source = adapter(Arc::new(healthy_upstream()));

    // When: the analysis runs with default rates (7% discount, 4% terminal growth)
    let report = analyze(&source, &request()).await.expect("analysis should succeed");

    // Then: the forecast compounds 5% from the last figure
    assert_eq!(
        report.forecast.values,
        [153.73, 161.42, 169.49, 177.96, 186.86]
    );

    // And: the valuation matches to the cent
    assert!((report.valuation.total_valuation - 5310.60).abs() < 0.005);
    assert!((report.valuation.per_share - 531.06).abs() < 0.005);
    assert_eq!(report.outstanding_shares.get(), 10.0);
    assert_eq!(report.free_cash_flows.len(), 5);
    assert_eq!(report.degraded_periods, 0);
    assert!(report.price_history.points().is_some());
}

#[tokio::test]
async fn when_custom_rates_are_supplied_they_flow_into_the_report() {
    let source = adapter(Arc::new(healthy_upstream()));
    let params = DcfParameters::new(0.10, 0.02).expect("valid rates");

    let report = analyze(&source, &request().with_params(params))
        .await
        .expect("analysis should succeed");

    assert_eq!(report.params, params);
    assert!(report.valuation.total_valuation < 5310.60);
}

#[tokio::test]
async fn when_narrative_is_supplied_it_is_reported_but_rate_stays_fixed() {
    let source = adapter(Arc::new(healthy_upstream()));
    let outlook = GrowthOutlook::fixed("Headwinds everywhere.");

    let report = analyze(&source, &request().with_outlook(outlook))
        .await
        .expect("analysis should succeed");

    assert_eq!(report.outlook.narrative, "Headwinds everywhere.");
    assert_eq!(report.forecast.growth_rate, 0.05);
}

#[tokio::test]
async fn report_serializes_with_explicit_price_status() {
    let source = adapter(Arc::new(healthy_upstream()));
    let report = analyze(&source, &request()).await.expect("analysis should succeed");

    let json = serde_json::to_value(&report).expect("report should serialize");
    assert_eq!(json["symbol"], "META");
    assert_eq!(json["price_history"]["status"], "present");
    assert_eq!(json["outstanding_shares"], 10.0);
}

// =============================================================================
// Insufficient data
// =============================================================================

#[tokio::test]
async fn when_cash_flows_are_all_zero_analysis_halts_with_cash_flow_error() {
    let client = Arc::new(
        ScriptedHttpClient::new()
            .route(
                "/financials/cash-flow-statement/",
                r#"{ "financials": [{ "Operating Cash Flow": "x" }, {}] }"#,
            )
            .route("/profile/", PROFILE)
            .route("/historical-price-full/", PRICES),
    );

    let error = analyze(&adapter(client), &request())
        .await
        .expect_err("all-zero history must halt");

    assert!(matches!(error, AnalysisError::NoCashFlowData { .. }));
    assert!(error.is_insufficient_data());
}

#[tokio::test]
async fn when_shares_are_absent_analysis_halts_with_share_error() {
    let client = Arc::new(
        ScriptedHttpClient::new()
            .route("/financials/cash-flow-statement/", CASH_FLOWS)
            .route("/profile/", "[]")
            .route("/historical-price-full/", PRICES),
    );

    let error = analyze(&adapter(client), &request())
        .await
        .expect_err("missing shares must halt");

    assert!(matches!(error, AnalysisError::NoShareData { .. }));
}

#[tokio::test]
async fn when_price_history_is_absent_analysis_halts_with_price_error() {
    let client = Arc::new(
        ScriptedHttpClient::new()
            .route("/financials/cash-flow-statement/", CASH_FLOWS)
            .route("/profile/", PROFILE)
            .route("/historical-price-full/", "{}"),
    );

    let error = analyze(&adapter(client), &request())
        .await
        .expect_err("missing prices must halt");

    assert!(matches!(error, AnalysisError::NoPriceHistory { .. }));
    assert!(error.to_string().contains("META"));
}

#[tokio::test]
async fn when_several_inputs_are_missing_cash_flow_error_wins() {
    let client = Arc::new(
        ScriptedHttpClient::new()
            .route("/financials/cash-flow-statement/", "{}")
            .route("/profile/", "[]")
            .route("/historical-price-full/", "{}"),
    );

    let error = analyze(&adapter(client), &request())
        .await
        .expect_err("must halt");

    assert!(matches!(error, AnalysisError::NoCashFlowData { .. }));
}

// =============================================================================
// Undefined valuation and credentials
// =============================================================================

#[tokio::test]
async fn when_discount_equals_terminal_growth_run_is_rejected_before_fetching() {
    let client = Arc::new(healthy_upstream());
    let params = DcfParameters {
        discount_rate: 0.05,
        terminal_growth_rate: 0.05,
    };

    let error = analyze(&adapter(client.clone()), &request().with_params(params))
        .await
        .expect_err("r == g must be rejected");

    assert!(matches!(
        error,
        AnalysisError::Valuation(ValuationError::UndefinedTerminalValue { .. })
    ));
    assert!(client.recorded_urls().is_empty());
}

#[test]
fn when_api_key_is_blank_user_is_asked_for_a_valid_key() {
    let error = ApiKey::parse("").expect_err("blank key must fail");
    assert_eq!(error, ValidationError::MissingApiKey);
    assert_eq!(error.to_string(), "please enter a valid API key");
}
