//! Semantic validators
//!
//! Cross-field rules the serde schema cannot express. Both checks run
//! immediately after schema construction, before a component can enter a
//! chain.
//!
//! The reasoning/status check is deliberately lexical: it scans for a
//! small set of marker phrases and flags the obvious contradictions
//! (failure language under `sustained`, success language under
//! `overruled`). The marker sets are policy constants, not a hard rule;
//! a stricter structured check can replace them wholesale.

use crate::error::{EngineError, Result};
use crate::types::VerdictStatus;

/// Failure language that contradicts a `sustained` status
pub const SUSTAINED_NEGATIVE_MARKERS: &[&str] = &[
    "the argument fails",
    "does not hold",
    "cannot stand",
    "is refuted",
    "is rejected",
    "collapses",
    "fallacious",
    "unsupported by the evidence",
];

/// Success language that contradicts an `overruled` status
pub const OVERRULED_POSITIVE_MARKERS: &[&str] = &[
    "the argument holds",
    "is validated",
    "stands firm",
    "is well supported",
    "is sound",
    "withstands the rebuttal",
    "claim is established",
];

/// Reject claim statements that read as questions.
///
/// A trailing `?` after trimming is rejected regardless of any other
/// field validity.
pub fn require_assertion(statement: &str) -> Result<()> {
    let trimmed = statement.trim();
    if trimmed.ends_with('?') {
        return Err(EngineError::NotAnAssertion {
            statement: trimmed.to_string(),
        });
    }
    Ok(())
}

/// Flag reasoning text that lexically contradicts the declared status.
///
/// `remanded` carries no check: it is compatible with both success and
/// failure language.
pub fn require_consistent_reasoning(status: VerdictStatus, reasoning: &str) -> Result<()> {
    let lowered = reasoning.to_lowercase();
    let markers: &[&str] = match status {
        VerdictStatus::Sustained => SUSTAINED_NEGATIVE_MARKERS,
        VerdictStatus::Overruled => OVERRULED_POSITIVE_MARKERS,
        VerdictStatus::Remanded => return Ok(()),
    };

    if let Some(marker) = markers.iter().find(|m| lowered.contains(*m)) {
        return Err(EngineError::InconsistentVerdict {
            status,
            marker: (*marker).to_string(),
        });
    }
    Ok(())
}
