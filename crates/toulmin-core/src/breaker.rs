//! Circuit breaker
//!
//! Two gates over the argument chain. The bridge gate runs once warrant
//! and backing are both validated and decides whether phase 3 may be
//! issued at all; the judgement gate runs once rebuttal, qualifier, and
//! verdict are all present and enforces the consistency rules between
//! them. Neither gate ever rewrites a component: a violation is returned
//! to the caller as a structured error.

use tracing::warn;

use crate::components::{Backing, Qualifier, Rebuttal, Verdict, Warrant, LOW_CONFIDENCE_THRESHOLD};
use crate::config::EngineConfig;
use crate::error::{EngineError, InconsistencyReason, Result};
use crate::types::VerdictStatus;

/// Strength and consistency gates, configured per sequencer
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    strict_mode: bool,
    fail_on_weak_warrant: bool,
    fail_on_weak_backing: bool,
}

impl CircuitBreaker {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            strict_mode: config.strict_mode,
            fail_on_weak_warrant: config.fail_on_weak_warrant,
            fail_on_weak_backing: config.fail_on_weak_backing,
        }
    }

    /// Bridge gate: may the chain proceed past warrant and backing?
    ///
    /// Warrant is checked first, so a chain with both components fatal is
    /// reported against the warrant. Disabled checks are skipped but
    /// logged as bypassed.
    pub fn check_bridge(&self, warrant: &Warrant, backing: &Backing) -> Result<()> {
        if !self.strict_mode {
            warn!(
                warrant_strength = %warrant.strength,
                backing_strength = %backing.strength,
                "circuit breaker bypassed: strict_mode disabled"
            );
            return Ok(());
        }

        if self.fail_on_weak_warrant {
            if warrant.strength.is_fatal() {
                return Err(EngineError::ChainTerminated {
                    component: "warrant".to_string(),
                    strength: warrant.strength,
                });
            }
        } else {
            warn!(strength = %warrant.strength, "warrant strength check bypassed by configuration");
        }

        if self.fail_on_weak_backing {
            if backing.strength.is_fatal() {
                return Err(EngineError::ChainTerminated {
                    component: "backing".to_string(),
                    strength: backing.strength,
                });
            }
        } else {
            warn!(strength = %backing.strength, "backing strength check bypassed by configuration");
        }

        Ok(())
    }

    /// Judgement gate: post-hoc consistency between rebuttal, qualifier,
    /// and verdict. Runs regardless of the bridge toggles; these rules
    /// are not debug-switchable.
    pub fn check_judgement(
        &self,
        rebuttal: &Rebuttal,
        qualifier: &Qualifier,
        verdict: &Verdict,
    ) -> Result<()> {
        if rebuttal.strength.is_decisive() && verdict.status != VerdictStatus::Overruled {
            return Err(EngineError::VerdictInconsistency {
                reason: InconsistencyReason::AbsoluteRebuttal,
                rebuttal: rebuttal.strength,
                confidence_pct: qualifier.confidence_pct,
                status: verdict.status,
            });
        }

        if qualifier.confidence_pct < LOW_CONFIDENCE_THRESHOLD
            && verdict.status == VerdictStatus::Sustained
        {
            return Err(EngineError::VerdictInconsistency {
                reason: InconsistencyReason::LowConfidence,
                rebuttal: rebuttal.strength,
                confidence_pct: qualifier.confidence_pct,
                status: verdict.status,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Citation, LogicType, QualifierDegree, RebuttalStrength, Strength,
    };

    fn warrant(strength: Strength) -> Warrant {
        Warrant {
            principle: "When output is measurable per task, location does not bind it".into(),
            logic_type: LogicType::Inductive,
            strength,
        }
    }

    fn backing(strength: Strength) -> Backing {
        Backing {
            authority: "Peer-reviewed productivity studies".into(),
            citations: vec![Citation {
                source: "Stanford GSB".into(),
                reference: "WFH productivity trial, 2015".into(),
            }],
            strength,
        }
    }

    fn rebuttal(strength: RebuttalStrength) -> Rebuttal {
        Rebuttal {
            exceptions: vec!["Unless the role requires ad-hoc collaboration".into()],
            counterexamples: vec![],
            strength,
        }
    }

    fn qualifier(confidence_pct: u8) -> Qualifier {
        Qualifier {
            degree: QualifierDegree::Probably,
            confidence_pct,
            rationale: "Consistent findings across trials".into(),
        }
    }

    fn verdict(status: VerdictStatus) -> Verdict {
        Verdict {
            status,
            reasoning: "The data and warrant line up; the rebuttal raises only narrow exceptions that do not reach the claim.".into(),
            final_statement: "The claim survives scrutiny.".into(),
        }
    }

    #[test]
    fn test_weak_warrant_trips() {
        let breaker = CircuitBreaker::new(&EngineConfig::default());
        let err = breaker
            .check_bridge(&warrant(Strength::Weak), &backing(Strength::Strong))
            .unwrap_err();
        match err {
            EngineError::ChainTerminated { component, strength } => {
                assert_eq!(component, "warrant");
                assert_eq!(strength, Strength::Weak);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_irrelevant_backing_trips() {
        let breaker = CircuitBreaker::new(&EngineConfig::default());
        let err = breaker
            .check_bridge(&warrant(Strength::Absolute), &backing(Strength::Irrelevant))
            .unwrap_err();
        match err {
            EngineError::ChainTerminated { component, strength } => {
                assert_eq!(component, "backing");
                assert_eq!(strength, Strength::Irrelevant);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_warrant_reported_before_backing() {
        let breaker = CircuitBreaker::new(&EngineConfig::default());
        let err = breaker
            .check_bridge(&warrant(Strength::Weak), &backing(Strength::Weak))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::ChainTerminated { ref component, .. } if component == "warrant"
        ));
    }

    #[test]
    fn test_disabled_warrant_check_passes_weak_warrant() {
        let config = EngineConfig::default().with_fail_on_weak_warrant(false);
        let breaker = CircuitBreaker::new(&config);
        assert!(breaker
            .check_bridge(&warrant(Strength::Weak), &backing(Strength::Strong))
            .is_ok());
        // Backing check stays armed.
        assert!(breaker
            .check_bridge(&warrant(Strength::Weak), &backing(Strength::Weak))
            .is_err());
    }

    #[test]
    fn test_strict_mode_off_bypasses_both() {
        let config = EngineConfig::default().with_strict_mode(false);
        let breaker = CircuitBreaker::new(&config);
        assert!(breaker
            .check_bridge(&warrant(Strength::Irrelevant), &backing(Strength::Weak))
            .is_ok());
    }

    #[test]
    fn test_absolute_rebuttal_requires_overruled() {
        let breaker = CircuitBreaker::new(&EngineConfig::default());
        let err = breaker
            .check_judgement(
                &rebuttal(RebuttalStrength::Absolute),
                &qualifier(80),
                &verdict(VerdictStatus::Sustained),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::VerdictInconsistency {
                reason: InconsistencyReason::AbsoluteRebuttal,
                ..
            }
        ));

        assert!(breaker
            .check_judgement(
                &rebuttal(RebuttalStrength::Absolute),
                &qualifier(80),
                &verdict(VerdictStatus::Overruled),
            )
            .is_ok());
    }

    #[test]
    fn test_low_confidence_rejects_sustained() {
        let breaker = CircuitBreaker::new(&EngineConfig::default());
        let err = breaker
            .check_judgement(
                &rebuttal(RebuttalStrength::Weak),
                &qualifier(29),
                &verdict(VerdictStatus::Sustained),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::VerdictInconsistency {
                reason: InconsistencyReason::LowConfidence,
                ..
            }
        ));

        // Remanded and overruled are both acceptable under low confidence.
        assert!(breaker
            .check_judgement(
                &rebuttal(RebuttalStrength::Weak),
                &qualifier(29),
                &verdict(VerdictStatus::Remanded),
            )
            .is_ok());
    }
}
