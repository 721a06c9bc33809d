//! Model routing
//!
//! `perplexity_research` calls are scored by a keyword heuristic; simple
//! questions go to `sonar-pro` synchronously, everything else becomes a
//! deep research job. The other tools map to a fixed model.

mod classifier;
mod router;

pub use classifier::{classify, score, Complexity, ComplexityScore, COMPLEX_TERMS, SIMPLE_TERMS};
pub use router::{plan, Route, Router};
