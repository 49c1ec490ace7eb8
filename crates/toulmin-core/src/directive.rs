//! Directive generator
//!
//! Pure function of chain state: emits the manifest of fields the next
//! phase must embed, so prompt templates downstream are always rendered
//! from the live validation rules instead of constants copied into
//! template text.

use serde::Serialize;

use crate::chain::{Chain, ChainState};
use crate::components::{
    MIN_BACKING_AUTHORITY_LEN, MIN_CLAIM_STATEMENT_LEN, MIN_QUALIFIER_RATIONALE_LEN,
    MIN_VERDICT_FINAL_STATEMENT_LEN, MIN_VERDICT_REASONING_LEN, MIN_WARRANT_PRINCIPLE_LEN,
};
use crate::types::{
    ClaimScope, EvidenceType, LogicType, QualifierDegree, RebuttalStrength, Strength,
    VerdictStatus,
};

/// One field the next phase's output must carry. The manifest is
/// output-only: rendered into prompts and tool results, never parsed
/// back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRequirement {
    /// Component the field belongs to
    pub component: &'static str,
    /// Field name within the component
    pub field: &'static str,
    /// Human-readable constraint, rendered into the prompt
    pub rule: String,
}

impl FieldRequirement {
    fn new(component: &'static str, field: &'static str, rule: impl Into<String>) -> Self {
        Self {
            component,
            field,
            rule: rule.into(),
        }
    }
}

fn one_of(variants: &[&str]) -> String {
    format!("one of: {}", variants.join(" | "))
}

fn min_len(min: usize) -> String {
    format!("text, minimum {min} characters after trimming")
}

/// Structured payload describing the next phase call
#[derive(Debug, Clone, Serialize)]
pub struct Directive {
    /// Phase this directive belongs to (1-5)
    pub phase: u8,
    /// Tool the caller should invoke next with the produced output
    pub tool: &'static str,
    /// Shape of the output the model must emit
    pub expected_output: &'static str,
    /// Field manifest sourced from live validation rules
    pub requirements: Vec<FieldRequirement>,
    /// Facts accepted so far, for context embedding
    pub facts_so_far: Vec<String>,
    /// Warning about strengths that terminate the chain, when relevant
    pub strength_warning: Option<String>,
    /// Tool to call after this phase's output is produced
    pub next_tool: Option<&'static str>,
}

impl Directive {
    /// Build the directive for the phase that follows `chain`'s state.
    ///
    /// Terminal states yield `None`: a terminated chain has no next
    /// phase and a reported chain is finished.
    pub fn for_chain(chain: &Chain) -> Option<Directive> {
        let facts_so_far = chain
            .data
            .as_ref()
            .map(|d| d.facts.clone())
            .unwrap_or_default();

        match chain.state {
            ChainState::Empty => Some(Directive {
                phase: 1,
                tool: "initiate_toulmin_sequence",
                expected_output: "JSON object with `data` and `claim`",
                requirements: vec![
                    FieldRequirement::new("data", "facts", "non-empty list of non-empty strings"),
                    FieldRequirement::new(
                        "data",
                        "citations",
                        "non-empty list of {source, reference}",
                    ),
                    FieldRequirement::new("data", "evidence_type", one_of(EvidenceType::VARIANTS)),
                    FieldRequirement::new(
                        "claim",
                        "statement",
                        format!(
                            "{}; an assertion, never a question",
                            min_len(MIN_CLAIM_STATEMENT_LEN)
                        ),
                    ),
                    FieldRequirement::new("claim", "scope", one_of(ClaimScope::VARIANTS)),
                ],
                facts_so_far,
                strength_warning: None,
                next_tool: Some("inject_logic_bridge"),
            }),

            ChainState::Grounded => Some(Directive {
                phase: 2,
                tool: "inject_logic_bridge",
                expected_output: "JSON object with `warrant` and `backing`",
                requirements: vec![
                    FieldRequirement::new(
                        "warrant",
                        "principle",
                        min_len(MIN_WARRANT_PRINCIPLE_LEN),
                    ),
                    FieldRequirement::new("warrant", "logic_type", one_of(LogicType::VARIANTS)),
                    FieldRequirement::new("warrant", "strength", one_of(Strength::VARIANTS)),
                    FieldRequirement::new(
                        "backing",
                        "authority",
                        min_len(MIN_BACKING_AUTHORITY_LEN),
                    ),
                    FieldRequirement::new(
                        "backing",
                        "citations",
                        "non-empty list of {source, reference}",
                    ),
                    FieldRequirement::new("backing", "strength", one_of(Strength::VARIANTS)),
                ],
                facts_so_far,
                strength_warning: Some(
                    "strength `weak` or `irrelevant` on warrant or backing terminates the chain"
                        .to_string(),
                ),
                next_tool: Some("stress_test_argument"),
            }),

            ChainState::Bridged => Some(Directive {
                phase: 3,
                tool: "stress_test_argument",
                expected_output: "JSON object with `rebuttal` and `qualifier`",
                requirements: vec![
                    FieldRequirement::new(
                        "rebuttal",
                        "exceptions",
                        "non-empty list of non-empty strings",
                    ),
                    FieldRequirement::new(
                        "rebuttal",
                        "counterexamples",
                        "list of strings, may be empty",
                    ),
                    FieldRequirement::new(
                        "rebuttal",
                        "strength",
                        one_of(RebuttalStrength::VARIANTS),
                    ),
                    FieldRequirement::new("qualifier", "degree", one_of(QualifierDegree::VARIANTS)),
                    FieldRequirement::new("qualifier", "confidence_pct", "integer 0-100"),
                    FieldRequirement::new(
                        "qualifier",
                        "rationale",
                        min_len(MIN_QUALIFIER_RATIONALE_LEN),
                    ),
                ],
                facts_so_far,
                strength_warning: Some(
                    "rebuttal strength `absolute` forces the verdict to `overruled`".to_string(),
                ),
                next_tool: Some("render_verdict"),
            }),

            ChainState::Stressed => Some(Directive {
                phase: 4,
                tool: "render_verdict",
                expected_output: "JSON object with `verdict`",
                requirements: vec![
                    FieldRequirement::new("verdict", "status", one_of(VerdictStatus::VARIANTS)),
                    FieldRequirement::new(
                        "verdict",
                        "reasoning",
                        format!(
                            "{}; must not contradict the declared status",
                            min_len(MIN_VERDICT_REASONING_LEN)
                        ),
                    ),
                    FieldRequirement::new(
                        "verdict",
                        "final_statement",
                        min_len(MIN_VERDICT_FINAL_STATEMENT_LEN),
                    ),
                ],
                facts_so_far,
                strength_warning: Some(
                    "confidence below 30% forces status `overruled` or `remanded`".to_string(),
                ),
                next_tool: Some("format_analysis_report"),
            }),

            ChainState::Judged => Some(Directive {
                phase: 5,
                tool: "format_analysis_report",
                expected_output: "markdown report over the complete chain",
                requirements: Vec::new(),
                facts_so_far,
                strength_warning: None,
                next_tool: None,
            }),

            ChainState::Terminated | ChainState::Reported => None,
        }
    }
}
