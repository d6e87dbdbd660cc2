pub mod graph;
pub mod transaction;

pub use graph::AccountNode;
pub use graph::Transfer;
pub use graph::TransactionGraph;
pub use graph::TransferEdge;
pub use transaction::AccountId;
pub use transaction::Transaction;
pub use transaction::TransactionTable;
