//! Usage and cost accounting
//!
//! Purely diagnostic: the report goes to the logger and never into an RPC
//! result.

mod info;
mod pricing;

use serde_json::Value;

use crate::logging::SharedLogger;
use crate::types::SonarModel;

pub use info::{parse_usage, UsageInfo};
pub use pricing::{compute_cost, compute_cost_for, pricing_for, CostInfo, PricingRow, SEARCH_CONTEXT_FEE};

/// Render the usage and cost report, one entry per line
pub fn format_usage_report(model_name: &str, usage: &UsageInfo, cost: &CostInfo) -> Vec<String> {
    let mut lines = vec![
        "=== Usage & Cost Report ===".to_string(),
        format!("Model: {}", model_name),
        format!(
            "Tokens - Input: {}, Output: {}, Total: {}",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        ),
    ];

    if usage.citation_tokens > 0 {
        lines.push(format!("Citation tokens: {}", usage.citation_tokens));
    }
    if usage.reasoning_tokens > 0 {
        lines.push(format!("Reasoning tokens: {}", usage.reasoning_tokens));
    }
    if usage.num_search_queries > 0 {
        lines.push(format!("Search queries: {}", usage.num_search_queries));
    }
    if let Some(size) = &usage.search_context_size {
        lines.push(format!("Search context: {}", size));
    }

    let mut costs = format!(
        "Costs - Input: ${:.6}, Output: ${:.6}",
        cost.input_cost, cost.output_cost
    );
    if cost.citation_cost > 0.0 {
        costs.push_str(&format!(", Citation: ${:.6}", cost.citation_cost));
    }
    if cost.reasoning_cost > 0.0 {
        costs.push_str(&format!(", Reasoning: ${:.6}", cost.reasoning_cost));
    }
    if cost.search_cost > 0.0 {
        costs.push_str(&format!(", Search: ${:.6}", cost.search_cost));
    }
    lines.push(costs);
    lines.push(format!("Total Cost: ${:.6}", cost.total_cost));
    lines.push("========================".to_string());
    lines
}

/// Write the usage and cost report to the logger at info level
pub fn log_usage_and_cost(logger: &SharedLogger, model_name: &str, usage: &UsageInfo, cost: &CostInfo) {
    for line in format_usage_report(model_name, usage, cost) {
        logger.info(&line);
    }
}

/// Parses usage from completed responses and logs what they cost
#[derive(Clone)]
pub struct UsageAccountant {
    logger: SharedLogger,
}

impl UsageAccountant {
    pub fn new(logger: SharedLogger) -> Self {
        Self { logger }
    }

    /// Account for one completion response; returns the cost when a
    /// `usage` object was present
    pub fn record(&self, model: SonarModel, response: &Value) -> Option<CostInfo> {
        let usage = parse_usage(response)?;
        let cost = compute_cost_for(&usage, model);
        log_usage_and_cost(&self.logger, model.id(), &usage, &cost);
        Some(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemoryLogger;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_report_omits_zero_lines() {
        let usage = UsageInfo {
            prompt_tokens: 10,
            completion_tokens: 20,
            total_tokens: 30,
            ..Default::default()
        };
        let cost = compute_cost_for(&usage, SonarModel::SonarPro);
        let lines = format_usage_report("sonar-pro", &usage, &cost);

        assert_eq!(lines[1], "Model: sonar-pro");
        assert_eq!(lines[2], "Tokens - Input: 10, Output: 20, Total: 30");
        assert!(!lines.iter().any(|l| l.starts_with("Citation tokens")));
        assert!(!lines.iter().any(|l| l.starts_with("Reasoning tokens")));
        assert_eq!(
            lines[3],
            "Costs - Input: $0.000030, Output: $0.000300, Search: $0.005000"
        );
        assert_eq!(lines[4], "Total Cost: $0.005330");
    }

    #[test]
    fn test_accountant_logs_when_usage_present() {
        let memory = Arc::new(MemoryLogger::new());
        let accountant = UsageAccountant::new(memory.clone());

        let response = json!({
            "usage": {"prompt_tokens": 1000, "completion_tokens": 2000, "reasoning_tokens": 3000}
        });
        let cost = accountant.record(SonarModel::SonarDeepResearch, &response).unwrap();
        assert!(cost.reasoning_cost > 0.0);
        assert!(memory.contains("Model: sonar-deep-research"));
        assert!(memory.contains("Reasoning tokens: 3000"));

        memory.clear();
        assert!(accountant.record(SonarModel::SonarPro, &json!({})).is_none());
        assert!(memory.messages().is_empty());
    }
}
