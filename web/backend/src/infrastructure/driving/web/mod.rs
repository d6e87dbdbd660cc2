pub mod api;
pub mod dashboard;

use std::sync::Arc;

use fraudshield::config::RenderConfig;

use crate::application::ports::inbound::AnalyzeTransactionsUseCase;
use crate::infrastructure::config::UploadConfig;

// AppState shared by every handler; the use case is the only seam into the engine
pub struct AppState<T: AnalyzeTransactionsUseCase> {
    pub analysis_service: Arc<T>,
    pub upload: UploadConfig,
    pub render: RenderConfig,
}
