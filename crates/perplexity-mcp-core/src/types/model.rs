//! Sonar model identifiers

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Perplexity Sonar models known to the bridge
///
/// Only `SonarPro`, `SonarReasoningPro` and `SonarDeepResearch` are routed
/// to; the remaining variants exist so usage reports for them can be priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SonarModel {
    Sonar,
    SonarPro,
    SonarReasoning,
    SonarReasoningPro,
    SonarDeepResearch,
}

impl SonarModel {
    /// All models, in pricing-table order
    pub const ALL: [SonarModel; 5] = [
        SonarModel::Sonar,
        SonarModel::SonarPro,
        SonarModel::SonarReasoning,
        SonarModel::SonarReasoningPro,
        SonarModel::SonarDeepResearch,
    ];

    /// Model identifier as used by the Perplexity API
    pub fn id(&self) -> &'static str {
        match self {
            SonarModel::Sonar => "sonar",
            SonarModel::SonarPro => "sonar-pro",
            SonarModel::SonarReasoning => "sonar-reasoning",
            SonarModel::SonarReasoningPro => "sonar-reasoning-pro",
            SonarModel::SonarDeepResearch => "sonar-deep-research",
        }
    }

    /// Whether this is the deep-research model
    pub fn is_deep_research(&self) -> bool {
        matches!(self, SonarModel::SonarDeepResearch)
    }

    /// Reasoning effort sent with async submissions, if any
    pub fn reasoning_effort(&self) -> Option<&'static str> {
        self.is_deep_research().then_some("medium")
    }
}

impl std::fmt::Display for SonarModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when a model identifier is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown model: {0}")]
pub struct UnknownModel(pub String);

impl FromStr for SonarModel {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SonarModel::ALL
            .into_iter()
            .find(|m| m.id() == s)
            .ok_or_else(|| UnknownModel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_ids_roundtrip() {
        for model in SonarModel::ALL {
            assert_eq!(model.id().parse::<SonarModel>().unwrap(), model);
            assert_eq!(model.to_string(), model.id());
        }
    }

    #[test]
    fn test_unknown_model() {
        let err = "gpt-4o".parse::<SonarModel>().unwrap_err();
        assert_eq!(err, UnknownModel("gpt-4o".to_string()));
        // Identifiers are case sensitive on the wire
        assert!("Sonar-Pro".parse::<SonarModel>().is_err());
    }

    #[test]
    fn test_reasoning_effort_only_for_deep_research() {
        assert_eq!(SonarModel::SonarDeepResearch.reasoning_effort(), Some("medium"));
        assert_eq!(SonarModel::SonarPro.reasoning_effort(), None);
        assert_eq!(SonarModel::SonarReasoningPro.reasoning_effort(), None);
    }

    #[test]
    fn test_serde_uses_api_ids() {
        let json = serde_json::to_string(&SonarModel::SonarReasoningPro).unwrap();
        assert_eq!(json, "\"sonar-reasoning-pro\"");
    }
}
