use std::collections::HashSet;

use serde::Serialize;
use serde_json::json;

use super::escape_html;
use super::script_json;
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::model::TransactionGraph;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisNode {
    pub id:    String,
    pub label: String,
    pub title: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisEdge {
    pub from:  String,
    pub to:    String,
    /// Hover text.
    pub title: String,
    pub color: String,
    pub width: f64,
    pub value: f64,
}

/// Node and edge data sets for one vis-network diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkView {
    pub nodes: Vec<VisNode>,
    pub edges: Vec<VisEdge>,
}

impl NetworkView {
    /// Nodes in `flagged` get the flagged color, all others the normal color.
    pub fn build(
        graph: &TransactionGraph,
        flagged: Option<&HashSet<&str>>,
        config: &RenderConfig,
    ) -> Self {
        let nodes = graph
            .accounts()
            .map(|account| {
                let is_flagged = flagged.is_some_and(|set| set.contains(account));
                VisNode {
                    id:    account.to_string(),
                    label: account.to_string(),
                    title: if is_flagged { format!("{account} (suspicious)") } else { account.to_string() },
                    color: if is_flagged { config.flagged_color.clone() } else { config.normal_color.clone() },
                }
            })
            .collect();

        let edges = graph
            .transfers()
            .map(|transfer| VisEdge {
                from:  transfer.sender.to_string(),
                to:    transfer.receiver.to_string(),
                title: edge_title(transfer.amount, transfer.transaction_count),
                color: config.edge_color.clone(),
                width: config.edge_width,
                value: config.edge_width,
            })
            .collect();

        Self { nodes, edges }
    }

    /// A container `div` plus the script that draws the diagram into it.
    /// Expects the vis-network script to be loaded by the page.
    pub fn to_html(
        &self,
        container_id: &str,
        config: &RenderConfig,
    ) -> Result<String, RenderError> {
        let physics = &config.physics;
        let options = json!({
            "nodes": {
                "shape": "dot",
                "size": 10,
                "font": { "color": config.font_color },
            },
            "edges": {
                "arrows": { "to": { "enabled": true } },
                "smooth": { "type": "continuous" },
            },
            "interaction": { "hover": true },
            "physics": {
                "solver": "forceAtlas2Based",
                "forceAtlas2Based": {
                    "gravitationalConstant": physics.gravity,
                    "centralGravity": physics.central_gravity,
                    "springLength": physics.spring_length,
                    "springConstant": physics.spring_strength,
                    "damping": physics.damping,
                    "avoidOverlap": 0,
                },
            },
        });

        Ok(format!(
            r#"<div class="network" id="{container_attr}" style="height: {height}px; background-color: {background};"></div>
<script>
(function () {{
  var nodes = new vis.DataSet({nodes});
  var edges = new vis.DataSet({edges});
  var container = document.getElementById({container_json});
  new vis.Network(container, {{ nodes: nodes, edges: edges }}, {options});
}})();
</script>"#,
            container_attr = escape_html(container_id),
            height = config.height_px,
            background = escape_html(&config.background_color),
            nodes = script_json(&self.nodes)?,
            edges = script_json(&self.edges)?,
            container_json = script_json(container_id)?,
            options = script_json(&options)?,
        ))
    }
}

fn edge_title(
    amount: f64,
    transaction_count: usize,
) -> String {
    if transaction_count > 1 {
        format!("Amount: {amount} ({transaction_count} transactions)")
    } else {
        format!("Amount: {amount}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Transaction;

    fn graph() -> TransactionGraph {
        TransactionGraph::from_transactions(&[
            Transaction::new("A", "B", 10.0),
            Transaction::new("A", "B", 30.0),
            Transaction::new("B", "C", 2.5),
        ])
    }

    #[test]
    fn unfiltered_view_uses_normal_color_only() {
        let config = RenderConfig::default();
        let view = NetworkView::build(&graph(), None, &config);

        assert_eq!(view.nodes.len(), 3);
        assert!(view.nodes.iter().all(|n| n.color == config.normal_color));
    }

    #[test]
    fn flagged_nodes_are_highlighted() {
        let config = RenderConfig::default();
        let flagged: HashSet<&str> = ["A"].into_iter().collect();
        let view = NetworkView::build(&graph(), Some(&flagged), &config);

        let colors: Vec<(&str, &str)> = view.nodes.iter().map(|n| (n.id.as_str(), n.color.as_str())).collect();
        assert_eq!(colors, vec![("A", "yellow"), ("B", "red"), ("C", "red")]);
    }

    #[test]
    fn edges_carry_amount_titles() {
        let view = NetworkView::build(&graph(), None, &RenderConfig::default());

        let titles: Vec<&str> = view.edges.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Amount: 40 (2 transactions)", "Amount: 2.5"]);
    }

    #[test]
    fn html_embeds_data_and_physics() {
        let config = RenderConfig::default();
        let html = NetworkView::build(&graph(), None, &config).to_html("normal-graph", &config).unwrap();

        assert!(html.contains(r#"id="normal-graph""#));
        assert!(html.contains("height: 800px"));
        assert!(html.contains(r#""solver":"forceAtlas2Based""#));
        assert!(html.contains(r#""gravitationalConstant":-50.0"#));
        assert!(html.contains(r#""title":"Amount: 2.5""#));
    }

    #[test]
    fn container_lookup_matches_the_div_id() {
        let config = RenderConfig::default();
        let html = NetworkView::build(&graph(), None, &config).to_html("fraud&graph", &config).unwrap();

        assert!(html.contains(r#"id="fraud&amp;graph""#));
        // The script sees the decoded attribute value, so it looks up the raw id
        assert!(html.contains(r#"getElementById("fraud\u0026graph")"#));
        assert!(!html.contains(r"\u0026amp;"));
    }
}
