//! Prompt rendering for phase directives
//!
//! The text here is presentation: every constraint it mentions comes out
//! of the directive's field manifest, which the engine builds from its
//! live validation rules. Nothing in this module decides whether a phase
//! may run.

use toulmin_core::{CouncilDirective, Directive};

const SYSTEM_DIRECTIVE: &str = "SYSTEM DIRECTIVE:\n\
You are operated as a logic engine. You do not converse, explain, or hedge.\n\
You receive structured input and emit structured output, nothing else.\n\
Output ONLY valid JSON. If you cannot comply, output {\"error\": \"REASON\"}.";

const PHASE_TITLES: [&str; 5] = [
    "DATA EXTRACTION + CLAIM CONSTRUCTION",
    "LOGICAL BRIDGE CONSTRUCTION",
    "ADVERSARIAL STRESS TEST",
    "VERDICT",
    "ANALYSIS REPORT",
];

fn rule_header(phase: u8) -> String {
    let title = PHASE_TITLES
        .get((phase as usize).saturating_sub(1))
        .unwrap_or(&"");
    format!("PHASE {phase}: {title}")
}

/// Render a phase directive into the prompt handed back to the model.
///
/// `context` carries the already-validated fragments this phase builds
/// on, in the order they should appear.
pub fn render_directive(query: &str, directive: &Directive, context: &[(&str, &str)]) -> String {
    let mut out = String::new();
    out.push_str(SYSTEM_DIRECTIVE);
    out.push_str("\n\n");
    out.push_str(&rule_header(directive.phase));
    out.push_str(&format!("\n\nQUERY: {query}\n"));

    if !context.is_empty() {
        out.push_str("\nVALIDATED INPUT:\n");
        for (name, fragment) in context {
            out.push_str(&format!("{}: {fragment}\n", name.to_uppercase()));
        }
    }

    if !directive.facts_so_far.is_empty() {
        out.push_str("\nFACTS ON RECORD:\n");
        for fact in &directive.facts_so_far {
            out.push_str(&format!("- {fact}\n"));
        }
    }

    out.push_str(&format!("\nEXPECTED OUTPUT: {}\n", directive.expected_output));

    if !directive.requirements.is_empty() {
        out.push_str("\nFIELD REQUIREMENTS:\n");
        for req in &directive.requirements {
            out.push_str(&format!("- {}.{}: {}\n", req.component, req.field, req.rule));
        }
    }

    if let Some(warning) = &directive.strength_warning {
        out.push_str(&format!("\nWARNING: {warning}\n"));
    }

    if let Some(next_tool) = directive.next_tool {
        out.push_str(&format!("\nNEXT TOOL: {next_tool}\n"));
    }

    out.push_str("\nEMIT JSON. NOTHING ELSE.");
    out
}

/// Render the council directive into its prompt.
pub fn render_council(directive: &CouncilDirective) -> String {
    let mut out = String::new();
    out.push_str(SYSTEM_DIRECTIVE);
    out.push_str("\n\nHELPER: CONSULT THE COUNCIL\n");
    out.push_str(&format!("\nQUERY: {}\n", directive.query));

    out.push_str("\nPERSPECTIVES:\n");
    for slot in &directive.slots {
        out.push_str(&format!(
            "- {} (required: {}; optional: {})\n",
            slot.perspective,
            slot.required_fields.join(", "),
            slot.optional_fields.join(", ")
        ));
    }

    out.push_str(&format!("\nEXPECTED OUTPUT: {}\n", directive.expected_output));
    out.push_str("\nEMIT JSON. NOTHING ELSE.");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use toulmin_core::{EngineConfig, Sequencer};

    #[test]
    fn test_phase_one_prompt_embeds_manifest() {
        let sequencer = Sequencer::new(EngineConfig::default());
        let (_, directive) = sequencer.ground("Is remote work more productive?").unwrap();
        let prompt = render_directive("Is remote work more productive?", &directive, &[]);

        assert!(prompt.contains("PHASE 1: DATA EXTRACTION + CLAIM CONSTRUCTION"));
        assert!(prompt.contains("QUERY: Is remote work more productive?"));
        assert!(prompt.contains("claim.scope"));
        assert!(prompt.contains("EMIT JSON. NOTHING ELSE."));
    }

    #[test]
    fn test_context_fragments_rendered() {
        let sequencer = Sequencer::new(EngineConfig::default());
        let (_, directive) = sequencer.ground("Is remote work more productive?").unwrap();
        let prompt = render_directive(
            "Is remote work more productive?",
            &directive,
            &[("data", r#"{"facts": []}"#)],
        );
        assert!(prompt.contains("DATA: {\"facts\": []}"));
    }
}
