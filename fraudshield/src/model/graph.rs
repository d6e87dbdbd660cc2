use std::collections::HashMap;

use petgraph::Graph;
use petgraph::prelude::*;
use serde::Deserialize;
use serde::Serialize;

use super::transaction::AccountId;
use super::transaction::Transaction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountNode {
    pub account: AccountId,
}

/// All transfers from one account to another, folded into a single edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferEdge {
    pub amount:            f64,
    pub transaction_count: usize,
}

/// Borrowed view of one edge, used by renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transfer<'a> {
    pub sender:            &'a str,
    pub receiver:          &'a str,
    pub amount:            f64,
    pub transaction_count: usize,
}

/// Directed transaction graph with at most one edge per ordered account pair.
/// Repeated pairs accumulate into the existing edge.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TransactionGraph {
    graph:        Graph<AccountNode, TransferEdge>,
    #[serde(skip)]
    node_indices: HashMap<AccountId, NodeIndex>,
}

impl TransactionGraph {
    pub fn new() -> Self {
        Self {
            graph:        Graph::new(),
            node_indices: HashMap::new(),
        }
    }

    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut graph = Self::new();
        for tx in transactions {
            graph.add_transfer(&tx.sender, &tx.receiver, tx.amount);
        }
        graph
    }

    // Rebuild the node_indices HashMap from the graph (useful after deserialization)
    pub fn rebuild_indices(&mut self) {
        self.node_indices.clear();
        for node_index in self.graph.node_indices() {
            if let Some(node) = self.graph.node_weight(node_index) {
                self.node_indices.insert(node.account.clone(), node_index);
            }
        }
    }

    fn ensure_indices(&mut self) {
        if self.node_indices.len() != self.graph.node_count() {
            self.rebuild_indices();
        }
    }

    pub fn add_node(
        &mut self,
        account: &str,
    ) -> NodeIndex {
        self.ensure_indices();

        if let Some(&idx) = self.node_indices.get(account) {
            return idx;
        }

        let idx = self.graph.add_node(AccountNode { account: account.to_string() });
        self.node_indices.insert(account.to_string(), idx);

        idx
    }

    pub fn add_transfer(
        &mut self,
        sender: &str,
        receiver: &str,
        amount: f64,
    ) {
        let from_idx = self.add_node(sender);
        let to_idx = self.add_node(receiver);

        match self.graph.find_edge(from_idx, to_idx) {
            Some(edge_idx) => {
                let edge = &mut self.graph[edge_idx];
                edge.amount += amount;
                edge.transaction_count += 1;
            },
            None => {
                self.graph.add_edge(from_idx, to_idx, TransferEdge { amount, transaction_count: 1 });
            },
        }
    }

    pub fn node_count(&self) -> usize { self.graph.node_count() }

    pub fn edge_count(&self) -> usize { self.graph.edge_count() }

    pub fn is_empty(&self) -> bool { self.graph.node_count() == 0 }

    pub fn contains(&self, account: &str) -> bool {
        if self.node_indices.len() == self.graph.node_count() {
            return self.node_indices.contains_key(account);
        }
        self.accounts().any(|a| a == account)
    }

    /// Accounts in first-appearance order.
    pub fn accounts(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(|node| node.account.as_str())
    }

    pub fn transfers(&self) -> impl Iterator<Item = Transfer<'_>> + '_ {
        self.graph.edge_references().map(|edge| Transfer {
            sender:            self.graph[edge.source()].account.as_str(),
            receiver:          self.graph[edge.target()].account.as_str(),
            amount:            edge.weight().amount,
            transaction_count: edge.weight().transaction_count,
        })
    }

    pub fn transfer(
        &self,
        sender: &str,
        receiver: &str,
    ) -> Option<&TransferEdge> {
        self.transfers_from_index(sender)
            .find(|edge| self.graph[edge.target()].account == receiver)
            .map(|edge| edge.weight())
    }

    /// Sum of all amounts leaving `account`, or `None` if the account is not in the graph.
    pub fn outgoing_total(
        &self,
        account: &str,
    ) -> Option<f64> {
        let idx = self.index_of(account)?;
        Some(self.outgoing_total_at(idx))
    }

    /// Outgoing totals for every node, in node order.
    pub fn outgoing_totals(&self) -> Vec<(&str, f64)> {
        self.graph
            .node_indices()
            .map(|idx| (self.graph[idx].account.as_str(), self.outgoing_total_at(idx)))
            .collect()
    }

    fn outgoing_total_at(
        &self,
        idx: NodeIndex,
    ) -> f64 {
        self.graph.edges_directed(idx, Outgoing).map(|edge| edge.weight().amount).sum()
    }

    fn transfers_from_index<'a>(
        &'a self,
        account: &str,
    ) -> impl Iterator<Item = petgraph::graph::EdgeReference<'a, TransferEdge>> + 'a {
        self.index_of(account).into_iter().flat_map(move |idx| self.graph.edges_directed(idx, Outgoing))
    }

    fn index_of(
        &self,
        account: &str,
    ) -> Option<NodeIndex> {
        if self.node_indices.len() == self.graph.node_count() {
            return self.node_indices.get(account).copied();
        }
        self.graph.node_indices().find(|&idx| self.graph[idx].account == account)
    }
}
