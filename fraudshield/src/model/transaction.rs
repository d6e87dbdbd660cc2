use serde::Deserialize;
use serde::Serialize;

/// Raw account identifier, kept exactly as it appears in the uploaded file.
pub type AccountId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender:   AccountId,
    pub receiver: AccountId,
    pub amount:   f64,
}

impl Transaction {
    pub fn new(
        sender: impl Into<AccountId>,
        receiver: impl Into<AccountId>,
        amount: f64,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
        }
    }
}

/// One uploaded file after the schema check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionTable {
    /// Lowercased header row, including columns the analysis ignores.
    pub columns:      Vec<String>,
    pub transactions: Vec<Transaction>,
}

impl TransactionTable {
    pub fn len(&self) -> usize { self.transactions.len() }

    pub fn is_empty(&self) -> bool { self.transactions.is_empty() }
}
