//! Keyword and length heuristic for research queries

/// Terms that suggest a quick factual or arithmetic question
pub const SIMPLE_TERMS: &[&str] = &[
    "how many",
    "what is",
    "calculate",
    "solve",
    "math",
    "arithmetic",
    "add",
    "subtract",
    "multiply",
    "divide",
    "plus",
    "minus",
    "apples",
    "oranges",
    "basic",
    "simple",
    "quick question",
];

/// Terms that suggest a query worth a deep research job
pub const COMPLEX_TERMS: &[&str] = &[
    "analysis",
    "comprehensive",
    "report",
    "industry",
    "market",
    "economic",
    "policy",
    "framework",
    "strategy",
    "trends",
    "future",
    "projection",
    "forecast",
    "impact",
    "implications",
    "comparison",
    "evaluate",
    "assess",
    "study",
    "research",
    "technological",
    "regulatory",
    "commercial viability",
    "net-zero",
    "carbon emissions",
    "heavy industry",
];

const SIMPLE_WEIGHT: u32 = 2;
const COMPLEX_WEIGHT: u32 = 3;

/// Verdict of the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    Simple,
    Complex,
}

/// Raw scores behind a verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplexityScore {
    pub simple: u32,
    pub complex: u32,
}

impl ComplexityScore {
    /// Complex only when the complex score clears the simple score by more
    /// than one point
    pub fn verdict(&self) -> Complexity {
        if self.complex > self.simple + 1 {
            Complexity::Complex
        } else {
            Complexity::Simple
        }
    }
}

/// Score a text. Matching is case-insensitive substring search and each
/// term counts at most once.
pub fn score(text: &str) -> ComplexityScore {
    let folded = text.to_lowercase();
    let hits = |terms: &[&str]| terms.iter().filter(|t| folded.contains(*t)).count() as u32;

    let mut complex = hits(COMPLEX_TERMS) * COMPLEX_WEIGHT;
    let length = text.chars().count();
    if length > 200 {
        complex += 2;
    }
    if length > 500 {
        complex += 3;
    }

    ComplexityScore {
        simple: hits(SIMPLE_TERMS) * SIMPLE_WEIGHT,
        complex,
    }
}

/// Classify a user query
pub fn classify(text: &str) -> Complexity {
    score(text).verdict()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_is_simple() {
        assert_eq!(classify("What is 2 + 2?"), Complexity::Simple);
        assert_eq!(
            classify("If I have 3 apples and add 2 oranges, how many fruits do I have?"),
            Complexity::Simple
        );
    }

    #[test]
    fn test_long_research_prompt_is_complex() {
        let mut text = String::from(
            "Please write a comprehensive market analysis of green steel, covering the \
             regulatory framework in the EU and the US. ",
        );
        while text.chars().count() <= 600 {
            text.push_str("Include supply chain considerations and pricing. ");
        }

        let s = score(&text);
        // comprehensive, market, analysis, regulatory, framework, plus both length bonuses
        assert_eq!(s.complex, 5 * 3 + 2 + 3);
        assert_eq!(classify(&text), Complexity::Complex);
    }

    #[test]
    fn test_case_insensitive() {
        let text = "Assess the economic IMPACT of Policy changes";
        assert_eq!(classify(text), classify(&text.to_uppercase()));
        assert_eq!(classify(text), classify(&text.to_lowercase()));
        assert_eq!(classify(text), Complexity::Complex);
    }

    #[test]
    fn test_repeated_terms_count_once() {
        assert_eq!(score("market").complex, 3);
        assert_eq!(score("market market market").complex, 3);
    }

    #[test]
    fn test_tie_goes_to_simple() {
        // one complex hit (3) against one simple hit (2): 3 > 2 + 1 is false
        let s = score("basic report");
        assert_eq!(s, ComplexityScore { simple: 2, complex: 3 });
        assert_eq!(s.verdict(), Complexity::Simple);
    }

    #[test]
    fn test_length_thresholds_use_characters() {
        let at_200 = "x".repeat(200);
        assert_eq!(score(&at_200).complex, 0);
        assert_eq!(score(&"x".repeat(201)).complex, 2);
        assert_eq!(score(&"x".repeat(501)).complex, 5);
        // 300 bytes but only 150 characters
        assert_eq!(score(&"é".repeat(150)).complex, 0);
    }

    #[test]
    fn test_empty_text_is_simple() {
        assert_eq!(score(""), ComplexityScore::default());
        assert_eq!(classify(""), Complexity::Simple);
    }
}
