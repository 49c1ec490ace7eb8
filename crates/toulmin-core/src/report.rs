//! Report rendering
//!
//! Phase 5 of the sequence: a markdown report over a judged chain. The
//! content here is presentation only; every rule the report mentions was
//! already enforced upstream.

use crate::chain::Chain;
use crate::error::{EngineError, Result};

/// Render the full markdown report for a judged chain.
///
/// Requires the verdict slot: an incomplete chain fails with
/// `MissingPriorPhase` naming `verdict_json`.
pub fn render_report(chain: &Chain) -> Result<String> {
    let verdict = chain.verdict.as_ref().ok_or_else(|| EngineError::MissingPriorPhase {
        missing: vec!["verdict_json".to_string()],
    })?;

    // The sequencer only accepts a verdict on a fully stressed chain, so
    // the remaining slots are present whenever the verdict is.
    let data = chain.data.as_ref().expect("judged chain has data");
    let claim = chain.claim.as_ref().expect("judged chain has claim");
    let warrant = chain.warrant.as_ref().expect("judged chain has warrant");
    let backing = chain.backing.as_ref().expect("judged chain has backing");
    let rebuttal = chain.rebuttal.as_ref().expect("judged chain has rebuttal");
    let qualifier = chain.qualifier.as_ref().expect("judged chain has qualifier");

    let mut out = String::new();

    out.push_str(&format!("# Toulmin Analysis: {}\n\n", chain.query));
    out.push_str(&format!(
        "## Verdict: {}\n\n> {}\n\n---\n\n",
        verdict.status.to_string().to_uppercase(),
        verdict.final_statement
    ));

    out.push_str("## The Claim\n\n");
    out.push_str(&format!("{}\n\n", claim.statement));
    out.push_str(&format!(
        "**Scope**: {:?} | **Confidence**: {}%\n\n---\n\n",
        claim.scope, qualifier.confidence_pct
    ));

    out.push_str("## Evidence (Data)\n\n");
    for fact in &data.facts {
        out.push_str(&format!("- {fact}\n"));
    }
    out.push_str("\n### Sources\n\n");
    for citation in &data.citations {
        out.push_str(&format!("- **{}**: {}\n", citation.source, citation.reference));
    }
    out.push_str("\n---\n\n");

    out.push_str("## Logical Bridge\n\n");
    out.push_str(&format!("### Warrant\n\n> {}\n\n", warrant.principle));
    out.push_str(&format!(
        "**Logic Type**: {:?} | **Strength**: {}\n\n",
        warrant.logic_type, warrant.strength
    ));
    out.push_str(&format!("### Backing\n\n{}\n\n", backing.authority));
    out.push_str("**Sources**:\n");
    for citation in &backing.citations {
        out.push_str(&format!("- **{}**: {}\n", citation.source, citation.reference));
    }
    out.push_str("\n---\n\n");

    out.push_str("## Stress Test\n\n### Exceptions Found\n\n");
    for (i, exception) in rebuttal.exceptions.iter().enumerate() {
        out.push_str(&format!("{}. {exception}\n", i + 1));
    }
    out.push_str("\n### Counterexamples\n\n");
    if rebuttal.counterexamples.is_empty() {
        out.push_str("None identified\n");
    } else {
        for counterexample in &rebuttal.counterexamples {
            out.push_str(&format!("- {counterexample}\n"));
        }
    }
    out.push_str(&format!("\n**Rebuttal Strength**: {}\n\n---\n\n", rebuttal.strength));

    out.push_str("## Confidence Assessment\n\n");
    out.push_str(&format!(
        "**Degree**: {} | **Confidence**: {}%\n\n{}\n\n---\n\n",
        qualifier.degree, qualifier.confidence_pct, qualifier.rationale
    ));

    out.push_str("## Final Reasoning\n\n");
    out.push_str(&format!("{}\n", verdict.reasoning));

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Backing, Claim, Data, Qualifier, Rebuttal, Verdict, Warrant};
    use crate::types::{
        Citation, ClaimScope, EvidenceType, LogicType, QualifierDegree, RebuttalStrength,
        Strength, VerdictStatus,
    };

    fn judged_chain() -> Chain {
        let citation = Citation {
            source: "Stanford GSB".into(),
            reference: "WFH productivity trial, 2015".into(),
        };
        let mut chain = Chain::new("Is remote work more productive?");
        chain
            .accept_grounding(
                Data {
                    facts: vec!["Remote workers complete 13% more calls per shift.".into()],
                    citations: vec![citation.clone()],
                    evidence_type: EvidenceType::Empirical,
                },
                Claim {
                    statement: "Remote work increases output for defined-task roles".into(),
                    scope: ClaimScope::Specific,
                },
            )
            .unwrap();
        chain
            .accept_bridge(
                Warrant {
                    principle: "When output is measurable per task, location does not bind it"
                        .into(),
                    logic_type: LogicType::Inductive,
                    strength: Strength::Strong,
                },
                Backing {
                    authority: "Peer-reviewed productivity studies".into(),
                    citations: vec![citation],
                    strength: Strength::Strong,
                },
            )
            .unwrap();
        chain
            .accept_stress(
                Rebuttal {
                    exceptions: vec!["Unless the role requires ad-hoc collaboration".into()],
                    counterexamples: vec![],
                    strength: RebuttalStrength::Weak,
                },
                Qualifier {
                    degree: QualifierDegree::Probably,
                    confidence_pct: 80,
                    rationale: "Consistent findings across trials".into(),
                },
            )
            .unwrap();
        chain
            .accept_verdict(Verdict {
                status: VerdictStatus::Sustained,
                reasoning:
                    "The data, warrant, and backing align; the rebuttal raises only narrow exceptions."
                        .into(),
                final_statement: "The claim survives scrutiny.".into(),
            })
            .unwrap();
        chain
    }

    #[test]
    fn test_report_covers_all_components() {
        let report = render_report(&judged_chain()).unwrap();
        assert!(report.contains("## Verdict: SUSTAINED"));
        assert!(report.contains("Remote workers complete 13% more calls per shift."));
        assert!(report.contains("### Warrant"));
        assert!(report.contains("None identified"));
        assert!(report.contains("**Confidence**: 80%"));
    }

    #[test]
    fn test_report_without_verdict_fails() {
        let chain = Chain::new("query long enough");
        match render_report(&chain) {
            Err(EngineError::MissingPriorPhase { missing }) => {
                assert_eq!(missing, vec!["verdict_json".to_string()]);
            }
            other => panic!("expected missing prior phase, got {other:?}"),
        }
    }
}
