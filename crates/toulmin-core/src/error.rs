//! Error types for the Toulmin engine
//!
//! Every failure the engine can produce is a structured, field-attributed
//! value. Callers pattern-match on the variant or serialize the payload;
//! nothing is ever reported as a bare message string.

use serde_json::{json, Value};
use thiserror::Error;

use crate::types::{RebuttalStrength, Strength, VerdictStatus};

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Reason codes for post-hoc verdict consistency failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InconsistencyReason {
    /// An absolute rebuttal forces the verdict to `overruled`
    AbsoluteRebuttal,
    /// Confidence below 30% forces `overruled` or `remanded`
    LowConfidence,
}

impl std::fmt::Display for InconsistencyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InconsistencyReason::AbsoluteRebuttal => write!(f, "absolute_rebuttal"),
            InconsistencyReason::LowConfidence => write!(f, "low_confidence"),
        }
    }
}

/// Main error type for the Toulmin engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Structural violation: bad length, bad enum, extra field, bad range
    #[error("schema violation in {component}.{field}: {constraint}")]
    SchemaViolation {
        component: String,
        field: String,
        constraint: String,
    },

    /// The supplied fragment is not parseable JSON at all
    #[error("{component} payload is not valid JSON: {detail}")]
    MalformedJson { component: String, detail: String },

    /// A claim statement reads as a question rather than an assertion
    #[error("claim statement is a question, not an assertion: {statement:?}")]
    NotAnAssertion { statement: String },

    /// Verdict reasoning lexically contradicts the declared status
    #[error("verdict reasoning contradicts status {status}: marker {marker:?}")]
    InconsistentVerdict {
        status: VerdictStatus,
        marker: String,
    },

    /// Circuit breaker tripped on warrant or backing strength
    #[error("chain terminated: {component} strength is {strength}")]
    ChainTerminated {
        component: String,
        strength: Strength,
    },

    /// A phase call arrived on a chain the breaker already killed
    #[error("chain already terminated at phase {phase}")]
    ChainAlreadyTerminated { phase: u8 },

    /// Post-hoc consistency rule between rebuttal/qualifier and verdict
    #[error("verdict inconsistent ({reason}): rebuttal {rebuttal}, confidence {confidence_pct}%, status {status}")]
    VerdictInconsistency {
        reason: InconsistencyReason,
        rebuttal: RebuttalStrength,
        confidence_pct: u8,
        status: VerdictStatus,
    },

    /// Required prior-phase fragments absent; names every missing one
    #[error("missing prior phase output: {}", missing.join(", "))]
    MissingPriorPhase { missing: Vec<String> },

    /// Phase-1 precondition on the query string
    #[error("query too short: {got} characters, minimum {min}")]
    QueryTooShort { got: usize, min: usize },

    /// An optional operation is switched off by configuration
    #[error("feature disabled by configuration: {feature}")]
    FeatureDisabled { feature: String },
}

impl EngineError {
    /// Stable machine-readable kind for each variant
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::SchemaViolation { .. } => "schema_violation",
            EngineError::MalformedJson { .. } => "malformed_json",
            EngineError::NotAnAssertion { .. } => "not_an_assertion",
            EngineError::InconsistentVerdict { .. } => "inconsistent_verdict",
            EngineError::ChainTerminated { .. } => "chain_terminated",
            EngineError::ChainAlreadyTerminated { .. } => "chain_already_terminated",
            EngineError::VerdictInconsistency { .. } => "verdict_inconsistency",
            EngineError::MissingPriorPhase { .. } => "missing_prior_phase",
            EngineError::QueryTooShort { .. } => "query_too_short",
            EngineError::FeatureDisabled { .. } => "feature_disabled",
        }
    }

    /// Whether the error represents a designed terminal outcome rather
    /// than malformed input. A tripped breaker is a verdict on the
    /// argument, not a bug in the call.
    pub fn is_terminal_outcome(&self) -> bool {
        matches!(
            self,
            EngineError::ChainTerminated { .. } | EngineError::ChainAlreadyTerminated { .. }
        )
    }

    /// Structured JSON payload with field attribution
    pub fn to_payload(&self) -> Value {
        let detail = match self {
            EngineError::SchemaViolation {
                component,
                field,
                constraint,
            } => json!({
                "component": component,
                "field": field,
                "constraint": constraint,
            }),
            EngineError::MalformedJson { component, detail } => json!({
                "component": component,
                "detail": detail,
            }),
            EngineError::NotAnAssertion { statement } => json!({
                "component": "claim",
                "field": "statement",
                "statement": statement,
            }),
            EngineError::InconsistentVerdict { status, marker } => json!({
                "component": "verdict",
                "field": "reasoning",
                "status": status,
                "marker": marker,
            }),
            EngineError::ChainTerminated {
                component,
                strength,
            } => json!({
                "component": component,
                "strength": strength,
                "terminal": true,
            }),
            EngineError::ChainAlreadyTerminated { phase } => json!({
                "phase": phase,
                "terminal": true,
            }),
            EngineError::VerdictInconsistency {
                reason,
                rebuttal,
                confidence_pct,
                status,
            } => json!({
                "reason": reason.to_string(),
                "rebuttal_strength": rebuttal,
                "confidence_pct": confidence_pct,
                "status": status,
            }),
            EngineError::MissingPriorPhase { missing } => json!({
                "missing": missing,
            }),
            EngineError::QueryTooShort { got, min } => json!({
                "field": "query",
                "got": got,
                "min": min,
            }),
            EngineError::FeatureDisabled { feature } => json!({
                "feature": feature,
            }),
        };

        json!({
            "error_kind": self.kind(),
            "message": self.to_string(),
            "detail": detail,
        })
    }
}
