use std::fmt::Write as _;

use super::NetworkView;
use super::escape_html;
use super::format_currency;
use crate::analysis::AnalysisResult;
use crate::config::RenderConfig;
use crate::error::RenderError;

const PAGE_TITLE: &str = "FraudShield Dashboard";
const HEADING: &str = "FraudShield: Graph-Based Banking Fraud Detection";
pub const IDLE_PROMPT: &str = "Upload a CSV file to begin your fraud analysis.";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #0e1117; color: #fafafa; }
header { text-align: center; padding: 1rem; border-bottom: 1px solid #333; }
header h1 { color: #FF4B4B; margin: 0; }
main { padding: 1rem 2rem; }
form.upload { margin: 1rem 0; padding: 1rem; background: #262730; border-radius: 6px; }
.info { padding: 1rem; background: #1c3a5e; border-radius: 6px; }
.error { padding: 1rem; background: #5e1c1c; border-radius: 6px; }
details { margin: 1rem 0; border: 1px solid #333; border-radius: 6px; padding: 0.5rem 1rem; }
summary { cursor: pointer; font-weight: bold; }
.metrics { display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; }
.metric { background: #262730; border-radius: 6px; padding: 1rem; }
.metric .label { font-size: 0.9rem; color: #aaa; }
.metric .value { font-size: 1.8rem; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 0.4rem 0.8rem; border-bottom: 1px solid #333; }
"#;

/// Builds complete HTML pages. `upload_action` is the form target for new
/// uploads; without one the page is a static report.
#[derive(Debug, Clone, Copy)]
pub struct DashboardPage<'a> {
    pub config:        &'a RenderConfig,
    pub upload_action: Option<&'a str>,
}

impl<'a> DashboardPage<'a> {
    pub fn new(
        config: &'a RenderConfig,
        upload_action: Option<&'a str>,
    ) -> Self {
        Self { config, upload_action }
    }

    /// Nothing uploaded yet.
    pub fn idle(&self) -> String {
        self.page(&format!(r#"<div class="info">{IDLE_PROMPT}</div>"#), false)
    }

    /// The upload failed; `message` is shown inline next to a fresh upload form.
    pub fn error(
        &self,
        message: &str,
    ) -> String {
        self.page(
            &format!(r#"<div class="error"><strong>Could not analyze the file.</strong> {}</div>"#, escape_html(message)),
            false,
        )
    }

    pub fn analysis(
        &self,
        result: &AnalysisResult,
    ) -> Result<String, RenderError> {
        let flagged = result.report.flagged_set();
        let normal = NetworkView::build(&result.graph, None, self.config);
        let highlighted = NetworkView::build(&result.graph, Some(&flagged), self.config);

        let mut body = String::new();
        let _ = write!(
            body,
            r#"<details open>
<summary>View Normal Transaction Graph</summary>
<p><span style="color: {normal_color}">&#9679;</span> <strong>{normal_name} nodes</strong> = Accounts<br><strong>{edge_name} edges</strong> = Transactions</p>
<h3>Normal Transaction Graph</h3>
{normal_graph}
</details>
<details open>
<summary>View Fraud Detection Graph</summary>
<p><span style="color: {flagged_color}">&#9679;</span> <strong>{flagged_name} nodes</strong> = Suspicious accounts (Top 5% by amount sent)<br><span style="color: {normal_color}">&#9679;</span> <strong>{normal_name} nodes</strong> = Normal accounts</p>
<h3>Fraud Detection Graph</h3>
{highlighted_graph}
</details>
"#,
            normal_color = escape_html(&self.config.normal_color),
            flagged_color = escape_html(&self.config.flagged_color),
            normal_name = escape_html(&capitalize(&self.config.normal_color)),
            flagged_name = escape_html(&capitalize(&self.config.flagged_color)),
            edge_name = escape_html(&capitalize(&self.config.edge_color)),
            normal_graph = normal.to_html("normal-graph", self.config)?,
            highlighted_graph = highlighted.to_html("fraud-graph", self.config)?,
        );

        body.push_str(&self.statistics_section(result));
        body.push_str(&self.suspicious_section(result));

        Ok(self.page(&body, true))
    }

    fn statistics_section(
        &self,
        result: &AnalysisResult,
    ) -> String {
        let stats = &result.statistics;
        let threshold = match result.report.threshold {
            Some(t) => format_currency(t),
            None => "n/a".to_string(),
        };

        format!(
            r#"<h2>Summary Statistics</h2>
<div class="metrics">
<div class="metric"><div class="label">Total Transactions</div><div class="value">{}</div></div>
<div class="metric"><div class="label">Total Amount</div><div class="value">{}</div></div>
<div class="metric"><div class="label">Unique Senders</div><div class="value">{}</div></div>
<div class="metric"><div class="label">Unique Receivers</div><div class="value">{}</div></div>
</div>
<p>Suspicion threshold (95th percentile of outgoing amounts): {}</p>
"#,
            stats.total_transactions,
            format_currency(stats.total_amount),
            stats.unique_senders,
            stats.unique_receivers,
            threshold,
        )
    }

    fn suspicious_section(
        &self,
        result: &AnalysisResult,
    ) -> String {
        let mut section = String::from("<h2>Top Suspicious Accounts (By Outgoing Amount)</h2>\n");

        if result.top_suspicious.is_empty() {
            section.push_str("<p>No suspicious accounts.</p>\n");
            return section;
        }

        section.push_str("<table>\n<thead><tr><th>Account</th><th>Total Outgoing</th></tr></thead>\n<tbody>\n");
        for entry in &result.top_suspicious {
            let _ = writeln!(
                section,
                "<tr><td>{}</td><td>{}</td></tr>",
                escape_html(&entry.account),
                format_currency(entry.total_outgoing),
            );
        }
        section.push_str("</tbody>\n</table>\n");
        section
    }

    fn upload_form(&self) -> String {
        match self.upload_action {
            Some(action) => format!(
                r#"<form class="upload" method="post" action="{}" enctype="multipart/form-data">
<label for="file"><strong>Upload Transaction Data</strong> (CSV with sender, receiver, amount columns)</label><br>
<input type="file" id="file" name="file" accept=".csv,text/csv" required>
<button type="submit">Analyze</button>
</form>
"#,
                escape_html(action)
            ),
            None => String::new(),
        }
    }

    fn page(
        &self,
        body: &str,
        with_network_script: bool,
    ) -> String {
        let script = if with_network_script {
            format!(r#"<script src="{}"></script>"#, escape_html(&self.config.vis_network_url))
        } else {
            String::new()
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{PAGE_TITLE}</title>
{script}
<style>{STYLE}</style>
</head>
<body>
<header><h1>{HEADING}</h1></header>
<main>
{form}{body}</main>
</body>
</html>
"#,
            form = self.upload_form(),
        )
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    #[test]
    fn idle_page_prompts_for_upload() {
        let config = RenderConfig::default();
        let html = DashboardPage::new(&config, Some("/analyze")).idle();

        assert!(html.contains(IDLE_PROMPT));
        assert!(html.contains(r#"action="/analyze""#));
        assert!(!html.contains("vis-network"));
    }

    #[test]
    fn error_page_escapes_the_message() {
        let config = RenderConfig::default();
        let html = DashboardPage::new(&config, Some("/analyze")).error("Missing <amount>");

        assert!(html.contains("Missing &lt;amount&gt;"));
    }

    #[test]
    fn analysis_page_has_both_graphs_and_statistics() {
        let config = RenderConfig::default();
        let result = analyze("sender,receiver,amount\nA,B,1000\nB,C,2500.5\nA,C,5\n".as_bytes()).unwrap();

        let html = DashboardPage::new(&config, None).analysis(&result).unwrap();

        assert!(html.contains(r#"id="normal-graph""#));
        assert!(html.contains(r#"id="fraud-graph""#));
        assert!(html.contains(&config.vis_network_url));
        assert!(html.contains("$3,505.50"));
        assert!(html.contains("<tr><td>B</td><td>$2,500.50</td></tr>"));
        assert!(!html.contains("<form"));
    }

    #[test]
    fn empty_upload_renders_without_suspicious_accounts() {
        let config = RenderConfig::default();
        let result = analyze("sender,receiver,amount\n".as_bytes()).unwrap();

        let html = DashboardPage::new(&config, Some("/analyze")).analysis(&result).unwrap();

        assert!(html.contains("No suspicious accounts."));
        assert!(html.contains("n/a"));
    }

    #[test]
    fn account_names_are_escaped_in_the_table() {
        let config = RenderConfig::default();
        let result = analyze("sender,receiver,amount\n<img>,B,10\n".as_bytes()).unwrap();

        let html = DashboardPage::new(&config, None).analysis(&result).unwrap();

        assert!(html.contains("<td>&lt;img&gt;</td>"));
        assert!(!html.contains("<img>"));
    }
}
