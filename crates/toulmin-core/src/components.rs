//! The seven Toulmin argument components
//!
//! This is the component schema layer: each record derives a closed serde
//! schema (`deny_unknown_fields`), carries its field-level constraints in
//! `validate`, and is only ever handed out fully constructed through
//! [`parse_component`]. A record that fails any check never becomes part
//! of a chain.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::types::{
    Citation, ClaimScope, EvidenceType, LogicType, QualifierDegree, RebuttalStrength, Strength,
    VerdictStatus,
};
use crate::validators;

/// Minimum query length (characters, after trimming)
pub const MIN_QUERY_LEN: usize = 5;
/// Minimum claim statement length
pub const MIN_CLAIM_STATEMENT_LEN: usize = 10;
/// Minimum warrant principle length
pub const MIN_WARRANT_PRINCIPLE_LEN: usize = 20;
/// Minimum backing authority length
pub const MIN_BACKING_AUTHORITY_LEN: usize = 10;
/// Minimum qualifier rationale length
pub const MIN_QUALIFIER_RATIONALE_LEN: usize = 10;
/// Minimum verdict reasoning length
pub const MIN_VERDICT_REASONING_LEN: usize = 50;
/// Minimum verdict final statement length
pub const MIN_VERDICT_FINAL_STATEMENT_LEN: usize = 10;
/// Confidence below this forces a non-sustained verdict
pub const LOW_CONFIDENCE_THRESHOLD: u8 = 30;

fn trimmed_len(text: &str) -> usize {
    text.trim().chars().count()
}

fn violation(component: &str, field: &str, constraint: impl Into<String>) -> EngineError {
    EngineError::SchemaViolation {
        component: component.to_string(),
        field: field.to_string(),
        constraint: constraint.into(),
    }
}

fn check_min_len(component: &str, field: &str, value: &str, min: usize) -> Result<()> {
    let len = trimmed_len(value);
    if len < min {
        return Err(violation(
            component,
            field,
            format!("minimum length {min} after trimming, got {len}"),
        ));
    }
    Ok(())
}

fn check_citations(component: &str, field: &str, citations: &[Citation]) -> Result<()> {
    if citations.is_empty() {
        return Err(violation(component, field, "at least one citation required"));
    }
    for (i, citation) in citations.iter().enumerate() {
        if trimmed_len(&citation.source) == 0 {
            return Err(violation(
                component,
                &format!("{field}[{i}].source"),
                "must not be empty",
            ));
        }
        if trimmed_len(&citation.reference) == 0 {
            return Err(violation(
                component,
                &format!("{field}[{i}].reference"),
                "must not be empty",
            ));
        }
    }
    Ok(())
}

/// Schema contract shared by the seven components
///
/// `validate` covers what the serde schema cannot express (lengths,
/// non-empty lists, numeric ranges); `check_semantics` hosts the
/// cross-field semantic validators that run right after construction.
pub trait ComponentSchema: Sized {
    /// Component name used in error attribution
    const NAME: &'static str;

    /// Field-level constraint pass
    fn validate(&self) -> Result<()>;

    /// Cross-field semantic pass; default is no extra rule
    fn check_semantics(&self) -> Result<()> {
        Ok(())
    }
}

/// DATA (grounds): cited facts the argument rests on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Data {
    /// Factual statements, in order
    pub facts: Vec<String>,
    /// Sources for the facts
    pub citations: Vec<Citation>,
    /// Kind of evidence provided
    pub evidence_type: EvidenceType,
}

impl ComponentSchema for Data {
    const NAME: &'static str = "data";

    fn validate(&self) -> Result<()> {
        if self.facts.is_empty() {
            return Err(violation(Self::NAME, "facts", "at least one fact required"));
        }
        for (i, fact) in self.facts.iter().enumerate() {
            if trimmed_len(fact) == 0 {
                return Err(violation(
                    Self::NAME,
                    &format!("facts[{i}]"),
                    "must not be empty",
                ));
            }
        }
        check_citations(Self::NAME, "citations", &self.citations)
    }
}

/// CLAIM: the assertion the data is meant to support
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claim {
    /// The asserted statement; never a question
    pub statement: String,
    /// Breadth of the assertion
    pub scope: ClaimScope,
}

impl ComponentSchema for Claim {
    const NAME: &'static str = "claim";

    fn validate(&self) -> Result<()> {
        check_min_len(Self::NAME, "statement", &self.statement, MIN_CLAIM_STATEMENT_LEN)
    }

    fn check_semantics(&self) -> Result<()> {
        validators::require_assertion(&self.statement)
    }
}

/// WARRANT: the general principle bridging data to claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Warrant {
    /// The bridging principle
    pub principle: String,
    /// Form of reasoning employed
    pub logic_type: LogicType,
    /// Self-assessed strength; weak or irrelevant trips the breaker
    pub strength: Strength,
}

impl ComponentSchema for Warrant {
    const NAME: &'static str = "warrant";

    fn validate(&self) -> Result<()> {
        check_min_len(Self::NAME, "principle", &self.principle, MIN_WARRANT_PRINCIPLE_LEN)
    }
}

/// BACKING: the authority that legitimizes the warrant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Backing {
    /// Statutory, scientific, or expert authority
    pub authority: String,
    /// Citations supporting the authority
    pub citations: Vec<Citation>,
    /// Self-assessed strength; weak or irrelevant trips the breaker
    pub strength: Strength,
}

impl ComponentSchema for Backing {
    const NAME: &'static str = "backing";

    fn validate(&self) -> Result<()> {
        check_min_len(Self::NAME, "authority", &self.authority, MIN_BACKING_AUTHORITY_LEN)?;
        check_citations(Self::NAME, "citations", &self.citations)
    }
}

/// REBUTTAL: conditions under which the warrant fails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rebuttal {
    /// Exceptions where the warrant does not apply
    pub exceptions: Vec<String>,
    /// Concrete counterexamples, if any were found
    #[serde(default)]
    pub counterexamples: Vec<String>,
    /// Severity of the rebuttal; absolute forces an overruled verdict
    pub strength: RebuttalStrength,
}

impl ComponentSchema for Rebuttal {
    const NAME: &'static str = "rebuttal";

    fn validate(&self) -> Result<()> {
        if self.exceptions.is_empty() {
            return Err(violation(
                Self::NAME,
                "exceptions",
                "at least one exception required",
            ));
        }
        for (i, exception) in self.exceptions.iter().enumerate() {
            if trimmed_len(exception) == 0 {
                return Err(violation(
                    Self::NAME,
                    &format!("exceptions[{i}]"),
                    "must not be empty",
                ));
            }
        }
        Ok(())
    }
}

/// QUALIFIER: how forcefully the claim may be asserted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Qualifier {
    /// Named confidence band
    pub degree: QualifierDegree,
    /// Numeric confidence, 0 to 100
    pub confidence_pct: u8,
    /// Why this qualifier was chosen
    pub rationale: String,
}

impl ComponentSchema for Qualifier {
    const NAME: &'static str = "qualifier";

    fn validate(&self) -> Result<()> {
        if self.confidence_pct > 100 {
            return Err(violation(
                Self::NAME,
                "confidence_pct",
                format!("must be in range 0..=100, got {}", self.confidence_pct),
            ));
        }
        check_min_len(Self::NAME, "rationale", &self.rationale, MIN_QUALIFIER_RATIONALE_LEN)
    }
}

/// VERDICT: the final disposition of the argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Verdict {
    /// Final disposition
    pub status: VerdictStatus,
    /// Reasoning over the six prior components
    pub reasoning: String,
    /// One-sentence summary
    pub final_statement: String,
}

impl ComponentSchema for Verdict {
    const NAME: &'static str = "verdict";

    fn validate(&self) -> Result<()> {
        check_min_len(Self::NAME, "reasoning", &self.reasoning, MIN_VERDICT_REASONING_LEN)?;
        check_min_len(
            Self::NAME,
            "final_statement",
            &self.final_statement,
            MIN_VERDICT_FINAL_STATEMENT_LEN,
        )
    }

    fn check_semantics(&self) -> Result<()> {
        validators::require_consistent_reasoning(self.status, &self.reasoning)
    }
}

/// Best-effort extraction of the offending field from a serde message.
///
/// serde_json reports schema-level problems as prose mentioning the
/// field in backticks ("unknown field `url`", "missing field `facts`").
fn field_from_serde_message(message: &str) -> String {
    if let Some(start) = message.find('`') {
        if let Some(len) = message[start + 1..].find('`') {
            return message[start + 1..start + 1 + len].to_string();
        }
    }
    "payload".to_string()
}

/// Parse one serialized component, all-or-nothing.
///
/// Syntax errors become [`EngineError::MalformedJson`]; schema errors
/// (bad type, unknown field, missing field, bad enum value) become
/// field-attributed [`EngineError::SchemaViolation`]. The constraint
/// pass and the semantic validators run before the value is returned.
pub fn parse_component<T>(raw: &str) -> Result<T>
where
    T: DeserializeOwned + ComponentSchema,
{
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| EngineError::MalformedJson {
            component: T::NAME.to_string(),
            detail: e.to_string(),
        })?;

    let component: T = serde_json::from_value(value).map_err(|e| {
        let message = e.to_string();
        EngineError::SchemaViolation {
            component: T::NAME.to_string(),
            field: field_from_serde_message(&message),
            constraint: message,
        }
    })?;

    component.validate()?;
    component.check_semantics()?;
    Ok(component)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citation() -> serde_json::Value {
        serde_json::json!({"source": "AI Safety Institute", "reference": "2024 Annual Report"})
    }

    #[test]
    fn test_parse_valid_data() {
        let raw = serde_json::json!({
            "facts": ["Remote workers complete 13% more calls per shift."],
            "citations": [citation()],
            "evidence_type": "empirical"
        })
        .to_string();

        let data: Data = parse_component(&raw).unwrap();
        assert_eq!(data.facts.len(), 1);
        assert_eq!(data.evidence_type, EvidenceType::Empirical);
    }

    #[test]
    fn test_data_requires_facts_and_citations() {
        let raw = serde_json::json!({
            "facts": [],
            "citations": [citation()],
            "evidence_type": "empirical"
        })
        .to_string();
        match parse_component::<Data>(&raw) {
            Err(EngineError::SchemaViolation { component, field, .. }) => {
                assert_eq!(component, "data");
                assert_eq!(field, "facts");
            }
            other => panic!("expected schema violation, got {other:?}"),
        }

        let raw = serde_json::json!({
            "facts": ["A fact."],
            "citations": [],
            "evidence_type": "empirical"
        })
        .to_string();
        match parse_component::<Data>(&raw) {
            Err(EngineError::SchemaViolation { field, .. }) => assert_eq!(field, "citations"),
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let raw = serde_json::json!({
            "statement": "Remote work increases output for defined-task roles",
            "scope": "specific",
            "mood": "confident"
        })
        .to_string();
        match parse_component::<Claim>(&raw) {
            Err(EngineError::SchemaViolation { field, .. }) => assert_eq!(field, "mood"),
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_enum_value_is_schema_violation() {
        let raw = serde_json::json!({
            "statement": "Remote work increases output for defined-task roles",
            "scope": "limited"
        })
        .to_string();
        assert!(matches!(
            parse_component::<Claim>(&raw),
            Err(EngineError::SchemaViolation { .. })
        ));
    }

    #[test]
    fn test_malformed_json_distinguished() {
        match parse_component::<Claim>("{not json at all") {
            Err(EngineError::MalformedJson { component, .. }) => assert_eq!(component, "claim"),
            other => panic!("expected malformed json, got {other:?}"),
        }
    }

    #[test]
    fn test_claim_question_rejected() {
        let raw = serde_json::json!({
            "statement": "Is remote work more productive?  ",
            "scope": "general"
        })
        .to_string();
        assert!(matches!(
            parse_component::<Claim>(&raw),
            Err(EngineError::NotAnAssertion { .. })
        ));
    }

    #[test]
    fn test_warrant_min_length() {
        let raw = serde_json::json!({
            "principle": "too short",
            "logic_type": "deductive",
            "strength": "strong"
        })
        .to_string();
        match parse_component::<Warrant>(&raw) {
            Err(EngineError::SchemaViolation { field, constraint, .. }) => {
                assert_eq!(field, "principle");
                assert!(constraint.contains("minimum length 20"));
            }
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[test]
    fn test_rebuttal_counterexamples_default_empty() {
        let raw = serde_json::json!({
            "exceptions": ["Unless the role requires ad-hoc collaboration"],
            "strength": "weak"
        })
        .to_string();
        let rebuttal: Rebuttal = parse_component(&raw).unwrap();
        assert!(rebuttal.counterexamples.is_empty());
    }

    #[test]
    fn test_qualifier_range() {
        let raw = serde_json::json!({
            "degree": "probably",
            "confidence_pct": 101,
            "rationale": "Strong consensus despite innovation risks."
        })
        .to_string();
        match parse_component::<Qualifier>(&raw) {
            Err(EngineError::SchemaViolation { field, .. }) => assert_eq!(field, "confidence_pct"),
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        let raw = serde_json::json!({
            "authority": "Peer-reviewed productivity studies",
            "citations": [citation()],
            "strength": "strong"
        })
        .to_string();
        let backing: Backing = parse_component(&raw).unwrap();
        let serialized = serde_json::to_string(&backing).unwrap();
        let reparsed: Backing = parse_component(&serialized).unwrap();
        assert_eq!(backing, reparsed);
    }
}
