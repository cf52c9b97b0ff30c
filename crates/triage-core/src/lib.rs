//! Core types and error definitions for the triage bot.
//!
//! This crate provides the foundational types shared across all triage crates:
//! the unified error type and the trigger → response table that seeds the
//! embedding index.
//!
//! # Main types
//!
//! - [`TriageError`] — Unified error enum for all triage subsystems.
//! - [`TriageResult`] — Convenience alias for `Result<T, TriageError>`.
//! - [`TriggerResponse`] — A trigger phrase paired with its canned response.

/// Error types.
pub mod error;

pub use error::{TriageError, TriageResult};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Response returned when nothing in the index can answer a query.
pub const DEFAULT_FALLBACK_RESPONSE: &str = "Call 911 immediately.";

// --- Response table ---

/// A trigger phrase and the first-aid instruction it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerResponse {
    /// Short canonical description of the emergency, used only to seed the index.
    pub trigger: String,
    /// The instruction text returned to the user.
    pub response: String,
}

impl TriggerResponse {
    /// Creates a new entry.
    pub fn new(trigger: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            response: response.into(),
        }
    }
}

/// The built-in first-aid table, in insertion order.
pub fn default_responses() -> Vec<TriggerResponse> {
    vec![
        TriggerResponse::new(
            "not breathing",
            "perform CPR by pushing firmly downwards in the middle of the chest and then releasing.",
        ),
        TriggerResponse::new("bleeding", "apply pressure to the wound with a clean cloth."),
        TriggerResponse::new(
            "choking",
            "perform the Heimlich maneuver by standing behind the person and using your hands to exert pressure on the bottom of the diaphragm.",
        ),
    ]
}

/// Checks that every trigger is non-blank and unique.
///
/// Triggers are compared exactly; `"Bleeding"` and `"bleeding"` are distinct.
pub fn validate_responses(entries: &[TriggerResponse]) -> TriageResult<()> {
    let mut seen = HashSet::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        if entry.trigger.trim().is_empty() {
            return Err(TriageError::Config(format!(
                "response entry {i} has an empty trigger"
            )));
        }
        if !seen.insert(entry.trigger.as_str()) {
            return Err(TriageError::Config(format!(
                "duplicate trigger '{}'",
                entry.trigger
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_responses_order() {
        let table = default_responses();
        let triggers: Vec<&str> = table.iter().map(|e| e.trigger.as_str()).collect();
        assert_eq!(triggers, vec!["not breathing", "bleeding", "choking"]);
    }

    #[test]
    fn test_default_responses_valid() {
        assert!(validate_responses(&default_responses()).is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate() {
        let table = vec![
            TriggerResponse::new("bleeding", "a"),
            TriggerResponse::new("bleeding", "b"),
        ];
        let err = validate_responses(&table).unwrap_err();
        assert!(matches!(err, TriageError::Config(_)));
        assert!(err.to_string().contains("duplicate trigger 'bleeding'"));
    }

    #[test]
    fn test_validate_rejects_blank_trigger() {
        let table = vec![TriggerResponse::new("   ", "a")];
        assert!(validate_responses(&table).is_err());
    }

    #[test]
    fn test_validate_empty_table() {
        assert!(validate_responses(&[]).is_ok());
    }
}
