use crate::model::Transaction;

/// Test fixtures for creating consistent test data
pub struct TestFixtures;

impl TestFixtures {
    /// The three-account chain A→B, B→C, A→C
    pub fn chain_csv() -> &'static str { "sender,receiver,amount\nA,B,10\nB,C,20\nA,C,5\n" }

    pub fn header_only_csv() -> &'static str { "sender,receiver,amount\n" }

    /// `count` accounts in a ring, account `i` sending `i + 1`
    pub fn ring(count: usize) -> Vec<Transaction> {
        (0..count)
            .map(|i| Transaction::new(format!("acct-{i}"), format!("acct-{}", (i + 1) % count), (i + 1) as f64))
            .collect()
    }

    /// Renders transactions back into CSV text with the given header casing
    pub fn to_csv(
        transactions: &[Transaction],
        header: &str,
    ) -> String {
        let mut csv = format!("{header}\n");
        for tx in transactions {
            csv.push_str(&format!("{},{},{}\n", tx.sender, tx.receiver, tx.amount));
        }
        csv
    }
}
