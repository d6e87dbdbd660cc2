use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Transaction;

/// Numbers shown in the dashboard's summary panel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub total_transactions: usize,
    pub total_amount:       f64,
    pub unique_senders:     usize,
    pub unique_receivers:   usize,
}

impl SummaryStatistics {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let senders: HashSet<&str> = transactions.iter().map(|tx| tx.sender.as_str()).collect();
        let receivers: HashSet<&str> = transactions.iter().map(|tx| tx.receiver.as_str()).collect();

        Self {
            total_transactions: transactions.len(),
            total_amount:       transactions.iter().map(|tx| tx.amount).sum(),
            unique_senders:     senders.len(),
            unique_receivers:   receivers.len(),
        }
    }
}
