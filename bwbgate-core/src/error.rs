//! Structured error types for the decision engine.
//!
//! These never escape `Engine::evaluate` — each variant is recovered at its
//! stage boundary and converted into a failing `RuleResult`. They exist so
//! that internal helpers can report *why* a rule could not be evaluated
//! instead of silently defaulting.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Missing, stale, or inconsistent required input.
    #[error("data integrity: {0}")]
    DataIntegrity(String),

    /// A rule could not be conclusively evaluated.
    #[error("ambiguous rule: {0}")]
    Ambiguous(String),

    /// A candidate structure violates construction constraints.
    #[error("invalid structure: {0}")]
    InvalidStructure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        let err = EvalError::DataIntegrity("price series is empty".into());
        assert_eq!(err.to_string(), "data integrity: price series is empty");

        let err = EvalError::Ambiguous("calendar does not cover 2024-01-08".into());
        assert!(err.to_string().starts_with("ambiguous rule:"));

        let err = EvalError::InvalidStructure("no put options in chain".into());
        assert!(err.to_string().starts_with("invalid structure:"));
    }
}
