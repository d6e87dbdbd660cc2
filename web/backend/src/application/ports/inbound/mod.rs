mod analysis_use_cases;

pub use analysis_use_cases::{AnalysisError, AnalyzeTransactionsUseCase};

#[cfg(test)]
pub use analysis_use_cases::MockAnalyzeTransactionsUseCase;
