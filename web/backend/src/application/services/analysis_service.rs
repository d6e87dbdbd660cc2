use async_trait::async_trait;
use fraudshield::AnalysisResult;
use tracing::{info, warn};

use crate::application::ports::inbound::{AnalysisError, AnalyzeTransactionsUseCase};

/// Runs the fraudshield pipeline on the blocking pool, one upload per call.
#[derive(Debug, Default, Clone)]
pub struct AnalysisService;

impl AnalysisService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AnalyzeTransactionsUseCase for AnalysisService {
    async fn analyze(&self, csv: Vec<u8>) -> Result<AnalysisResult, AnalysisError> {
        let size = csv.len();

        let result = tokio::task::spawn_blocking(move || fraudshield::analyze(csv.as_slice()))
            .await
            .map_err(|e| AnalysisError::Worker(e.to_string()))?;

        match result {
            Ok(result) => {
                info!(
                    "Analyzed {} bytes: {} accounts, {} flagged",
                    size,
                    result.graph.node_count(),
                    result.report.flagged.len()
                );
                Ok(result)
            }
            Err(e) => {
                warn!("Rejected upload of {} bytes: {}", size, e);
                Err(e.into())
            }
        }
    }
}
