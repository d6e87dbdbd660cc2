use std::collections::HashSet;

use crate::analysis::AnalysisResult;

/// Custom assertions for domain-specific testing
pub struct TestAssertions;

impl TestAssertions {
    /// Flagged accounts sit at or above the threshold, all others strictly below,
    /// and the outgoing table covers exactly the graph's accounts.
    pub fn assert_report_consistent(result: &AnalysisResult) {
        let report = &result.report;

        let graph_accounts: HashSet<&str> = result.graph.accounts().collect();
        let scored_accounts: HashSet<&str> = report.outgoing.iter().map(|o| o.account.as_str()).collect();
        assert_eq!(graph_accounts, scored_accounts, "Outgoing table does not match graph nodes");
        assert_eq!(report.outgoing.len(), result.graph.node_count(), "Outgoing table has duplicate accounts");

        let Some(threshold) = report.threshold else {
            assert!(report.flagged.is_empty(), "Flagged accounts without a threshold");
            assert!(result.graph.is_empty(), "Non-empty graph without a threshold");
            return;
        };

        for entry in &report.outgoing {
            if report.is_flagged(&entry.account) {
                assert!(
                    entry.total_outgoing >= threshold,
                    "Flagged account {} has outgoing {} below threshold {}",
                    entry.account,
                    entry.total_outgoing,
                    threshold
                );
            } else {
                assert!(
                    entry.total_outgoing < threshold,
                    "Account {} with outgoing {} should be flagged at threshold {}",
                    entry.account,
                    entry.total_outgoing,
                    threshold
                );
            }
        }
    }
}
