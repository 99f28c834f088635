//! Data source trait and error types.
//!
//! This module defines the adapter contract (`FinancialDataSource`) the
//! analysis pipeline is written against, so upstream providers can be swapped
//! or scripted in tests.
//!
//! # Endpoints
//!
//! | Endpoint | Operation | Result |
//! |----------|-----------|--------|
//! | Cash flow statement | [`cash_flows`](FinancialDataSource::cash_flows) | [`CashFlowHistory`] |
//! | Company profile | [`outstanding_shares`](FinancialDataSource::outstanding_shares) | `Option<ShareCount>` |
//! | Historical prices | [`price_history`](FinancialDataSource::price_history) | [`PriceHistory`] |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::{CashFlowHistory, PriceHistory, ShareCount, Symbol};

/// Upstream endpoint, used for logging and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    CashFlowStatement,
    Profile,
    HistoricalPrices,
}

impl Endpoint {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashFlowStatement => "cash_flow_statement",
            Self::Profile => "profile",
            Self::HistoricalPrices => "historical_prices",
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    Unauthorized,
    RateLimited,
    Malformed,
    Internal,
}

/// Structured error for failures reaching or reading the upstream.
///
/// Individual malformed fields never produce one of these; only a failed
/// transport or an unreadable body does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unauthorized,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Malformed,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    /// Classify a non-2xx status from `endpoint`.
    pub fn from_status(endpoint: Endpoint, status: u16) -> Self {
        let message = format!("{endpoint} request returned status {status}");
        match status {
            401 | 403 => Self::unauthorized(message),
            429 => Self::rate_limited(message),
            _ => Self::unavailable(message),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::Unauthorized => "source.unauthorized",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::Malformed => "source.malformed",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Upstream contract for the three fetchers.
///
/// Implementations must be `Send + Sync`. Each call is independent and
/// stateless.
pub trait FinancialDataSource: Send + Sync {
    /// Fetches cash flow statement periods and derives free cash flow.
    ///
    /// A response with no statement data yields an empty history rather than
    /// an error. Malformed entries degrade to a zero free cash flow.
    fn cash_flows<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<CashFlowHistory, SourceError>> + Send + 'a>>;

    /// Derives outstanding shares from the company profile.
    ///
    /// `Ok(None)` means the profile could not support a share count.
    fn outstanding_shares<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ShareCount>, SourceError>> + Send + 'a>>;

    /// Fetches daily closes in upstream order.
    fn price_history<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<PriceHistory, SourceError>> + Send + 'a>>;
}
