//! Report fetching and rendering.

use super::output::{print_json, OutputFormat};
use super::ui::{
    print_empty, print_error, print_header, print_item, print_kv, print_section,
    print_table_header, print_table_row,
};
use crate::client::handle_error;
use hostvitals_core::{default_registry, Aggregator, SystemProbe};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct FacetSummary {
    name: String,
    timeout_ms: u64,
}

/// Fetch and print the full report.
pub async fn show_report(
    client: &reqwest::Client,
    base: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let resp = client.get(format!("{}/", base)).send().await?;
    let report: Value = handle_error(resp).await?.json().await?;
    print_report("HOST REPORT", &report, output)
}

/// Fetch and print a single facet.
pub async fn show_facet(
    client: &reqwest::Client,
    base: &str,
    name: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let resp = client
        .get(format!("{}/facets/{}", base, name))
        .send()
        .await?;
    let report: Value = handle_error(resp).await?.json().await?;
    print_report(&name.to_uppercase(), &report, output)
}

/// List registered facets with their effective timeouts.
pub async fn list_facets(
    client: &reqwest::Client,
    base: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let resp = client.get(format!("{}/facets", base)).send().await?;
    let facets: Vec<FacetSummary> = handle_error(resp).await?.json().await?;

    if output == OutputFormat::Json {
        let value: Vec<Value> = facets
            .iter()
            .map(|f| serde_json::json!({ "name": f.name, "timeout_ms": f.timeout_ms }))
            .collect();
        return print_json(&value);
    }

    print_header("FACETS");
    println!();
    print_table_header(&[("NAME", 24), ("TIMEOUT (ms)", 12)]);
    for facet in &facets {
        let timeout = facet.timeout_ms.to_string();
        print_table_row(&[(facet.name.as_str(), 24), (timeout.as_str(), 12)]);
    }
    Ok(())
}

/// Collect a report in-process, without a server.
pub async fn local_report(timeout_ms: u64, output: OutputFormat) -> anyhow::Result<()> {
    if timeout_ms == 0 {
        anyhow::bail!("--timeout-ms must be greater than zero");
    }
    let registry = default_registry(Arc::new(SystemProbe::new()))?;
    tracing::debug!(facets = registry.len(), timeout_ms, "collecting locally");
    let report = Aggregator::new(Duration::from_millis(timeout_ms))
        .collect(&registry)
        .await;
    print_report("LOCAL HOST REPORT", &serde_json::to_value(&report)?, output)
}

fn print_report(title: &str, report: &Value, output: OutputFormat) -> anyhow::Result<()> {
    if output == OutputFormat::Json {
        return print_json(report);
    }
    let facets = report
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("unexpected report body: {}", report))?;

    print_header(title);
    for (name, value) in facets {
        print_section(name);
        print_value(0, value);
    }
    println!();
    Ok(())
}

fn print_value(indent: usize, value: &Value) {
    if let Some(message) = failure_message(value) {
        print_error(indent, message);
        return;
    }
    match value {
        Value::Object(fields) => print_fields(indent, fields),
        Value::Array(items) if items.is_empty() => print_empty(indent, "none"),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                print_item(indent, &format!("#{}", index + 1));
                print_value(indent + 1, item);
            }
        }
        other => print_kv(indent, "Value", &value_text(other)),
    }
}

fn print_fields(indent: usize, fields: &Map<String, Value>) {
    for (key, value) in fields {
        match value {
            Value::Array(_) | Value::Object(_) => {
                print_item(indent, key);
                print_value(indent + 1, value);
            }
            scalar => print_kv(indent, key, &value_text(scalar)),
        }
    }
}

/// `{"error": "..."}` and nothing else.
fn failure_message(value: &Value) -> Option<&str> {
    let object = value.as_object()?;
    if object.len() != 1 {
        return None;
    }
    object.get("error")?.as_str()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => hostvitals_core::shape::NOT_AVAILABLE.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recognizes_failure_markers() {
        assert_eq!(failure_message(&json!({ "error": "Timeout" })), Some("Timeout"));
        assert_eq!(failure_message(&json!({ "error": "x", "Cores": 4 })), None);
        assert_eq!(failure_message(&json!([{ "error": "x" }])), None);
        assert_eq!(failure_message(&json!({ "Error Count": 1 })), None);
    }

    #[test]
    fn scalar_text() {
        assert_eq!(value_text(&json!("8.00")), "8.00");
        assert_eq!(value_text(&json!(16)), "16");
        assert_eq!(value_text(&json!(true)), "true");
        assert_eq!(value_text(&Value::Null), "N/A");
    }
}
