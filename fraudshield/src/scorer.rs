use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::instrument;

use crate::model::AccountId;
use crate::model::TransactionGraph;

/// Accounts at or above this percentile of outgoing volume are flagged.
pub const SUSPICIOUS_PERCENTILE: f64 = 0.95;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingSum {
    pub account:        AccountId,
    pub total_outgoing: f64,
}

/// Result of scoring one graph.
///
/// `outgoing` holds one entry per graph node, in node order. `flagged` is the
/// subset whose total is at or above `threshold`, in the same order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FraudReport {
    /// `None` only when the graph has no accounts.
    pub threshold: Option<f64>,
    pub outgoing:  Vec<OutgoingSum>,
    pub flagged:   Vec<AccountId>,
}

impl FraudReport {
    pub fn is_flagged(
        &self,
        account: &str,
    ) -> bool {
        self.flagged.iter().any(|a| a == account)
    }

    pub fn flagged_set(&self) -> HashSet<&str> { self.flagged.iter().map(String::as_str).collect() }

    pub fn outgoing_of(
        &self,
        account: &str,
    ) -> Option<f64> {
        self.outgoing.iter().find(|o| o.account == account).map(|o| o.total_outgoing)
    }

    /// Flagged accounts by outgoing amount, largest first. Ties keep node order.
    pub fn top_suspicious(
        &self,
        limit: usize,
    ) -> Vec<OutgoingSum> {
        let flagged = self.flagged_set();
        let mut top: Vec<OutgoingSum> =
            self.outgoing.iter().filter(|o| flagged.contains(o.account.as_str())).cloned().collect();
        top.sort_by(|a, b| b.total_outgoing.total_cmp(&a.total_outgoing));
        top.truncate(limit);
        top
    }
}

/// Linear-interpolation percentile: the value at position `(n - 1) * q` of the
/// sorted input, interpolated between its two neighbours. `q` is clamped to `[0, 1]`.
pub fn percentile(
    values: &[f64],
    q: f64,
) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let position = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    // Rounding must never push the result past the upper neighbour
    Some((sorted[lower] + (sorted[upper] - sorted[lower]) * fraction).min(sorted[upper]))
}

/// Sums every account's outgoing edges and flags the accounts whose sum is at
/// or above the [`SUSPICIOUS_PERCENTILE`] of all sums.
#[instrument(level = "debug", skip(graph), fields(accounts = graph.node_count()))]
pub fn detect_fraud(graph: &TransactionGraph) -> FraudReport {
    let outgoing: Vec<OutgoingSum> = graph
        .outgoing_totals()
        .into_iter()
        .map(|(account, total_outgoing)| OutgoingSum { account: account.to_string(), total_outgoing })
        .collect();

    let totals: Vec<f64> = outgoing.iter().map(|o| o.total_outgoing).collect();
    let Some(threshold) = percentile(&totals, SUSPICIOUS_PERCENTILE) else {
        debug!("scorer::empty_graph");
        return FraudReport::default();
    };

    let flagged: Vec<AccountId> =
        outgoing.iter().filter(|o| o.total_outgoing >= threshold).map(|o| o.account.clone()).collect();

    info!("scorer::threshold::{}::flagged::{}_of_{}", threshold, flagged.len(), outgoing.len());

    FraudReport { threshold: Some(threshold), outgoing, flagged }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::model::Transaction;

    #[rstest]
    #[case::single(&[7.0], 0.95, 7.0)]
    #[case::interpolated(&[15.0, 20.0, 0.0], 0.95, 19.5)]
    #[case::median_even(&[1.0, 2.0, 3.0, 4.0], 0.5, 2.5)]
    #[case::lowest(&[3.0, 1.0, 2.0], 0.0, 1.0)]
    #[case::highest(&[3.0, 1.0, 2.0], 1.0, 3.0)]
    #[case::twenty_values(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 19.0], 0.95, 18.05)]
    fn percentile_interpolates(
        #[case] values: &[f64],
        #[case] q: f64,
        #[case] expected: f64,
    ) {
        let got = percentile(values, q).unwrap();
        assert!((got - expected).abs() < 1e-9, "percentile({values:?}, {q}) = {got}, expected {expected}");
    }

    #[test]
    fn percentile_of_nothing_is_none() {
        assert_eq!(percentile(&[], 0.95), None);
    }

    #[test]
    fn flags_the_largest_sender() {
        let graph = TransactionGraph::from_transactions(&[
            Transaction::new("A", "B", 10.0),
            Transaction::new("B", "C", 20.0),
            Transaction::new("A", "C", 5.0),
        ]);

        let report = detect_fraud(&graph);

        assert!((report.threshold.unwrap() - 19.5).abs() < 1e-9);
        assert_eq!(report.flagged, vec!["B".to_string()]);
        assert_eq!(report.outgoing_of("A"), Some(15.0));
        assert_eq!(report.outgoing_of("C"), Some(0.0));
    }

    #[test]
    fn ties_at_the_threshold_are_all_flagged() {
        let graph = TransactionGraph::from_transactions(&[
            Transaction::new("A", "X", 50.0),
            Transaction::new("B", "X", 50.0),
            Transaction::new("C", "X", 50.0),
        ]);

        let report = detect_fraud(&graph);

        // X sends nothing; A, B and C share the maximum.
        assert_eq!(report.threshold, Some(50.0));
        assert_eq!(report.flagged, vec!["A", "B", "C"]);
    }

    #[test]
    fn zero_threshold_flags_zero_outgoing_accounts() {
        let graph = TransactionGraph::from_transactions(&[Transaction::new("A", "B", 0.0)]);

        let report = detect_fraud(&graph);

        assert_eq!(report.threshold, Some(0.0));
        assert_eq!(report.flagged, vec!["A", "B"]);
    }

    #[test]
    fn empty_graph_has_no_threshold() {
        let report = detect_fraud(&TransactionGraph::new());

        assert_eq!(report, FraudReport::default());
        assert!(report.top_suspicious(5).is_empty());
    }

    #[test]
    fn top_suspicious_sorts_descending_and_truncates() {
        let report = FraudReport {
            threshold: Some(1.0),
            outgoing:  vec![
                OutgoingSum { account: "low".into(), total_outgoing: 1.0 },
                OutgoingSum { account: "skip".into(), total_outgoing: 0.5 },
                OutgoingSum { account: "high".into(), total_outgoing: 9.0 },
                OutgoingSum { account: "mid".into(), total_outgoing: 4.0 },
                OutgoingSum { account: "mid2".into(), total_outgoing: 4.0 },
            ],
            flagged:   vec!["low".into(), "high".into(), "mid".into(), "mid2".into()],
        };

        let top: Vec<String> = report.top_suspicious(3).into_iter().map(|o| o.account).collect();

        assert_eq!(top, vec!["high", "mid", "mid2"]);
    }
}
