use std::io::Read;

use serde::Deserialize;
use serde::Serialize;
use tracing::info;
use tracing::instrument;

use crate::error::LoadError;
use crate::loader::load_transactions;
use crate::model::TransactionGraph;
use crate::model::TransactionTable;
use crate::scorer::FraudReport;
use crate::scorer::OutgoingSum;
use crate::scorer::detect_fraud;
use crate::stats::SummaryStatistics;

/// Size of the "top suspicious accounts" table.
pub const TOP_SUSPICIOUS_LIMIT: usize = 5;

/// Everything one upload produces. Built fresh per call and never shared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub statistics:     SummaryStatistics,
    pub report:         FraudReport,
    pub top_suspicious: Vec<OutgoingSum>,
    pub graph:          TransactionGraph,
}

/// Runs the whole pipeline on one CSV stream: load, build the graph, score it
/// and summarize. Any presentation layer (web page, JSON API, CLI) starts here.
#[instrument(level = "info", skip(reader))]
pub fn analyze<R: Read>(reader: R) -> Result<AnalysisResult, LoadError> {
    let table = load_transactions(reader)?;
    Ok(analyze_table(&table))
}

pub fn analyze_table(table: &TransactionTable) -> AnalysisResult {
    let graph = TransactionGraph::from_transactions(&table.transactions);
    info!("analysis::graph_built::{}_accounts::{}_edges", graph.node_count(), graph.edge_count());

    let report = detect_fraud(&graph);
    let statistics = SummaryStatistics::from_transactions(&table.transactions);
    let top_suspicious = report.top_suspicious(TOP_SUSPICIOUS_LIMIT);

    AnalysisResult { statistics, report, top_suspicious, graph }
}
