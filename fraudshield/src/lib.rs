pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod render;
pub mod scorer;
pub mod stats;
pub mod tracing;

pub use analysis::AnalysisResult;
pub use analysis::TOP_SUSPICIOUS_LIMIT;
pub use analysis::analyze;
pub use analysis::analyze_table;
pub use error::LoadError;
pub use error::RenderError;
pub use error::Result;
pub use scorer::SUSPICIOUS_PERCENTILE;
pub use scorer::detect_fraud;
pub use scorer::percentile;
pub use self::tracing::setup_tracing;

// Test utilities - only compiled during testing
#[cfg(test)]
pub mod test_utils {
    pub mod assertions;
    pub mod fixtures;

    pub use assertions::TestAssertions;
    pub use fixtures::TestFixtures;
}
