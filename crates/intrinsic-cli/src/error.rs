use intrinsic_core::{AnalysisError, SourceError, ValidationError, ValuationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Valuation(#[from] ValuationError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Analysis(error) => match error {
                AnalysisError::Validation(_) => 2,
                AnalysisError::NoCashFlowData { .. }
                | AnalysisError::NoShareData { .. }
                | AnalysisError::NoPriceHistory { .. } => 3,
                AnalysisError::Forecast(_) | AnalysisError::Valuation(_) => 4,
                AnalysisError::Source(_) => 5,
            },
            Self::Valuation(_) => 4,
            Self::Source(_) => 5,
            Self::Serialization(_) => 6,
            Self::Io(_) => 10,
        }
    }
}
