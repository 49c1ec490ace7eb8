//! Consult-perspectives companion operation
//!
//! An optional helper that is never required by the sequencer: given a
//! query and a list of named viewpoints, it emits the manifest for a
//! per-viewpoint opinion round (one supporting argument, one opposing
//! argument, an optional citation). The sequencer does not read the
//! result; callers feed supporting arguments into backing material and
//! opposing arguments into rebuttal material.

use serde::{Deserialize, Serialize};

use crate::components::MIN_QUERY_LEN;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};

/// Request to convene a set of viewpoints over a query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilRequest {
    pub query: String,
    pub perspectives: Vec<String>,
}

/// Output manifest for one viewpoint. Output-only: rendered into the
/// council prompt, never parsed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerspectiveSlot {
    /// The named viewpoint this slot belongs to
    pub perspective: String,
    /// Fields the opinion must carry
    pub required_fields: Vec<&'static str>,
    /// Optional fields the opinion may carry
    pub optional_fields: Vec<&'static str>,
}

/// Directive payload for the council round
#[derive(Debug, Clone, Serialize)]
pub struct CouncilDirective {
    pub query: String,
    pub slots: Vec<PerspectiveSlot>,
    pub expected_output: &'static str,
}

/// Validate a council request and produce its directive.
///
/// Fails with `FeatureDisabled` when the toggle is off, and with a
/// field-attributed `SchemaViolation` on an unusable request.
pub fn convene(config: &EngineConfig, request: &CouncilRequest) -> Result<CouncilDirective> {
    if !config.enable_council {
        return Err(EngineError::FeatureDisabled {
            feature: "council".to_string(),
        });
    }

    let query = request.query.trim();
    if query.chars().count() < MIN_QUERY_LEN {
        return Err(EngineError::QueryTooShort {
            got: query.chars().count(),
            min: MIN_QUERY_LEN,
        });
    }

    if request.perspectives.is_empty() {
        return Err(EngineError::SchemaViolation {
            component: "council".to_string(),
            field: "perspectives".to_string(),
            constraint: "at least one perspective required".to_string(),
        });
    }
    for (i, perspective) in request.perspectives.iter().enumerate() {
        if perspective.trim().is_empty() {
            return Err(EngineError::SchemaViolation {
                component: "council".to_string(),
                field: format!("perspectives[{i}]"),
                constraint: "must not be empty".to_string(),
            });
        }
    }

    let slots = request
        .perspectives
        .iter()
        .map(|perspective| PerspectiveSlot {
            perspective: perspective.trim().to_string(),
            required_fields: vec!["argument_for", "argument_against"],
            optional_fields: vec!["key_citation"],
        })
        .collect();

    Ok(CouncilDirective {
        query: query.to_string(),
        slots,
        expected_output: "JSON object with `council_opinions`, one entry per perspective",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CouncilRequest {
        CouncilRequest {
            query: "Should AI be regulated?".into(),
            perspectives: vec!["Empirical Scientist".into(), "Civil Libertarian".into()],
        }
    }

    #[test]
    fn test_convene_produces_one_slot_per_perspective() {
        let directive = convene(&EngineConfig::default(), &request()).unwrap();
        assert_eq!(directive.slots.len(), 2);
        assert_eq!(directive.slots[0].perspective, "Empirical Scientist");
        assert!(directive.slots[0].required_fields.contains(&"argument_for"));
        assert!(directive.slots[0].optional_fields.contains(&"key_citation"));
    }

    #[test]
    fn test_directive_serializes_for_transport() {
        let directive = convene(&EngineConfig::default(), &request()).unwrap();
        let value = serde_json::to_value(&directive).unwrap();
        assert_eq!(value["query"], "Should AI be regulated?");
        assert_eq!(value["slots"][0]["required_fields"][0], "argument_for");
        assert_eq!(value["slots"][1]["perspective"], "Civil Libertarian");
    }

    #[test]
    fn test_disabled_council_rejected() {
        let config = EngineConfig::default().with_council(false);
        assert!(matches!(
            convene(&config, &request()),
            Err(EngineError::FeatureDisabled { .. })
        ));
    }

    #[test]
    fn test_empty_perspectives_rejected() {
        let mut req = request();
        req.perspectives.clear();
        assert!(matches!(
            convene(&EngineConfig::default(), &req),
            Err(EngineError::SchemaViolation { .. })
        ));
    }
}
