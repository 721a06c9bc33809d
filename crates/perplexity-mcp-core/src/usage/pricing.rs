//! Static per-model pricing and cost computation

use serde::{Deserialize, Serialize};

use crate::types::SonarModel;

use super::info::UsageInfo;

/// Flat search-context fee charged per request on non-deep-research models
pub const SEARCH_CONTEXT_FEE: f64 = 0.005;

/// USD rates for one model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingRow {
    pub input_per_million: f64,
    pub output_per_million: f64,
    pub citation_per_million: f64,
    pub search_per_thousand: f64,
    pub reasoning_per_million: f64,
}

impl PricingRow {
    const fn new(input: f64, output: f64, citation: f64, search: f64, reasoning: f64) -> Self {
        Self {
            input_per_million: input,
            output_per_million: output,
            citation_per_million: citation,
            search_per_thousand: search,
            reasoning_per_million: reasoning,
        }
    }
}

/// Pricing row for a model
pub fn pricing_for(model: SonarModel) -> PricingRow {
    match model {
        SonarModel::Sonar => PricingRow::new(1.0, 1.0, 0.0, 5.0, 0.0),
        SonarModel::SonarPro => PricingRow::new(3.0, 15.0, 0.0, 5.0, 0.0),
        SonarModel::SonarReasoning => PricingRow::new(1.0, 5.0, 0.0, 5.0, 0.0),
        SonarModel::SonarReasoningPro => PricingRow::new(2.0, 8.0, 0.0, 5.0, 0.0),
        SonarModel::SonarDeepResearch => PricingRow::new(2.0, 8.0, 2.0, 5.0, 3.0),
    }
}

/// Estimated USD cost of one completion
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostInfo {
    pub input_cost: f64,
    pub output_cost: f64,
    pub citation_cost: f64,
    pub search_cost: f64,
    pub reasoning_cost: f64,
    pub total_cost: f64,
}

/// Compute cost for a model identifier; unknown models yield `None`
pub fn compute_cost(usage: &UsageInfo, model_name: &str) -> Option<CostInfo> {
    let model = model_name.parse::<SonarModel>().ok()?;
    Some(compute_cost_for(usage, model))
}

/// Compute cost for a known model
pub fn compute_cost_for(usage: &UsageInfo, model: SonarModel) -> CostInfo {
    let rates = pricing_for(model);
    let per_million = |tokens: u64, rate: f64| tokens as f64 / 1_000_000.0 * rate;

    let input_cost = per_million(usage.prompt_tokens, rates.input_per_million);
    let output_cost = per_million(usage.completion_tokens, rates.output_per_million);
    let citation_cost = per_million(usage.citation_tokens, rates.citation_per_million);
    let reasoning_cost = per_million(usage.reasoning_tokens, rates.reasoning_per_million);

    let mut search_cost = usage.num_search_queries as f64 / 1_000.0 * rates.search_per_thousand;
    if !model.is_deep_research() {
        search_cost += SEARCH_CONTEXT_FEE;
    }

    CostInfo {
        input_cost,
        output_cost,
        citation_cost,
        search_cost,
        reasoning_cost,
        total_cost: input_cost + output_cost + citation_cost + reasoning_cost + search_cost,
    }
}
