use async_trait::async_trait;
use fraudshield::{AnalysisResult, LoadError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The upload itself is unusable; the message is meant for the user.
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Analysis worker failed: {0}")]
    Worker(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyzeTransactionsUseCase: Send + Sync {
    /// Runs the full pipeline over one uploaded CSV file.
    async fn analyze(&self, csv: Vec<u8>) -> Result<AnalysisResult, AnalysisError>;
}
