//! Scripted transport shared by the behavior tests.

#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use intrinsic_core::{
    ApiKey, FmpAdapter, FmpConfig, HttpClient, HttpError, HttpRequest, HttpResponse,
};

/// Answers each request with the first route whose fragment appears in the URL.
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    routes: Vec<(String, Result<HttpResponse, HttpError>)>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, fragment: &str, body: &str) -> Self {
        self.routes
            .push((fragment.to_owned(), Ok(HttpResponse::ok_json(body))));
        self
    }

    pub fn route_status(mut self, fragment: &str, status: u16, body: &str) -> Self {
        self.routes.push((
            fragment.to_owned(),
            Ok(HttpResponse::with_status(status, body)),
        ));
        self
    }

    pub fn route_error(mut self, fragment: &str, error: HttpError) -> Self {
        self.routes.push((fragment.to_owned(), Err(error)));
        self
    }

    pub fn recorded_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .iter()
            .map(|request| request.url.clone())
            .collect()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = self
            .routes
            .iter()
            .find(|(fragment, _)| request.url.contains(fragment.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| Ok(HttpResponse::with_status(404, "{}")));
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        Box::pin(async move { response })
    }
}

pub const CASH_FLOWS: &str = r#"{
    "symbol": "META",
    "financials": [
        { "date": "2019-12-31", "Operating Cash Flow": "300", "Capital Expenditure": "200" },
        { "date": "2020-12-31", "Operating Cash Flow": "330", "Capital Expenditure": "220" },
        { "date": "2021-12-31", "Operating Cash Flow": "363", "Capital Expenditure": "242" },
        { "date": "2022-12-31", "Operating Cash Flow": "399.3", "Capital Expenditure": "266.2" },
        { "date": "2023-12-31", "Operating Cash Flow": "439.23", "Capital Expenditure": "292.82" }
    ]
}"#;

pub const PROFILE: &str = r#"[{ "symbol": "META", "mktCap": 5000, "price": 500 }]"#;

pub const PRICES: &str = r#"{
    "symbol": "META",
    "historical": [
        { "date": "2024-01-03", "close": 344.47 },
        { "date": "2024-01-02", "close": 346.29 }
    ]
}"#;

/// Scripted transport serving the reference fixtures for every endpoint.
pub fn healthy_upstream() -> ScriptedHttpClient {
    ScriptedHttpClient::new()
        .route("/financials/cash-flow-statement/", CASH_FLOWS)
        .route("/profile/", PROFILE)
        .route("/historical-price-full/", PRICES)
}

pub fn adapter(client: Arc<ScriptedHttpClient>) -> FmpAdapter {
    FmpAdapter::with_http_client(
        client,
        ApiKey::parse("test-key").expect("valid key"),
        FmpConfig::default().with_base_url("https://fmp.test/api/v3"),
    )
}
