//! The argument chain aggregate
//!
//! A `Chain` owns at most one instance of each of the seven components,
//! filled strictly left to right. Slots are append-only: phase calls may
//! re-supply authoritative values while a phase is being (re)entered,
//! but the sequencing state only ever moves forward and a terminated
//! chain accepts nothing further.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::components::{Backing, Claim, Data, Qualifier, Rebuttal, Verdict, Warrant};
use crate::error::{EngineError, Result};
use crate::types::Strength;

/// Sequencing state of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainState {
    /// Query accepted, no components yet
    Empty,
    /// Data and claim validated
    Grounded,
    /// Warrant and backing validated, breaker passed
    Bridged,
    /// Rebuttal and qualifier validated
    Stressed,
    /// Verdict validated and consistency-checked
    Judged,
    /// Markdown report rendered
    Reported,
    /// Circuit breaker tripped at the bridge gate
    Terminated,
}

impl ChainState {
    /// Phase index (0-4) used in directives and error payloads
    pub fn phase(self) -> u8 {
        match self {
            ChainState::Empty => 0,
            ChainState::Grounded => 1,
            ChainState::Bridged | ChainState::Terminated => 2,
            ChainState::Stressed => 3,
            ChainState::Judged | ChainState::Reported => 4,
        }
    }

    /// Whether any forward transition remains
    pub fn is_terminal(self) -> bool {
        matches!(self, ChainState::Terminated | ChainState::Reported)
    }

    /// Legal forward transitions. Re-entering the current state is
    /// allowed (each call's inputs are authoritative); skipping or
    /// moving backward is not.
    pub fn can_transition_to(self, next: ChainState) -> bool {
        use ChainState::*;
        match (self, next) {
            (Empty, Grounded) => true,
            (Grounded, Bridged) | (Grounded, Terminated) => true,
            (Bridged, Stressed) => true,
            (Stressed, Judged) => true,
            (Judged, Reported) => true,
            (Terminated, _) | (Reported, _) => false,
            (s1, s2) if s1 == s2 => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for ChainState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChainState::Empty => "empty",
            ChainState::Grounded => "grounded",
            ChainState::Bridged => "bridged",
            ChainState::Stressed => "stressed",
            ChainState::Judged => "judged",
            ChainState::Reported => "reported",
            ChainState::Terminated => "terminated",
        };
        write!(f, "{s}")
    }
}

/// Record of why a chain was killed at the bridge gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationRecord {
    /// Offending component, `warrant` or `backing`
    pub component: String,
    /// The fatal strength value
    pub strength: Strength,
}

/// The ordered aggregate of all seven argument components for one query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chain {
    pub id: Uuid,
    pub query: String,
    pub state: ChainState,

    // Phase 1
    pub data: Option<Data>,
    pub claim: Option<Claim>,

    // Phase 2
    pub warrant: Option<Warrant>,
    pub backing: Option<Backing>,

    // Phase 3
    pub rebuttal: Option<Rebuttal>,
    pub qualifier: Option<Qualifier>,

    // Phase 4
    pub verdict: Option<Verdict>,

    /// Present when the circuit breaker tripped
    pub terminated: Option<TerminationRecord>,

    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Chain {
    /// Create an empty chain for a validated query.
    ///
    /// Query validation (minimum length) happens in the sequencer; the
    /// chain itself trusts the string it is given.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.into(),
            state: ChainState::Empty,
            data: None,
            claim: None,
            warrant: None,
            backing: None,
            rebuttal: None,
            qualifier: None,
            verdict: None,
            terminated: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Current phase index (0-4)
    pub fn current_phase(&self) -> u8 {
        self.state.phase()
    }

    /// Whether a verdict has been accepted
    pub fn is_complete(&self) -> bool {
        self.verdict.is_some()
    }

    /// Guard shared by every phase entry: a terminated chain answers
    /// everything with `ChainAlreadyTerminated`.
    pub fn ensure_not_terminated(&self) -> Result<()> {
        if self.state == ChainState::Terminated {
            return Err(EngineError::ChainAlreadyTerminated {
                phase: self.state.phase(),
            });
        }
        Ok(())
    }

    fn advance_to(&mut self, target: ChainState) -> Result<()> {
        self.ensure_not_terminated()?;
        // Re-supplying an already reached phase keeps the furthest state.
        if self.state.phase() >= target.phase() && self.state != ChainState::Empty {
            return Ok(());
        }
        debug_assert!(self.state.can_transition_to(target));
        self.state = target;
        Ok(())
    }

    /// Fill the phase-1 slots with validated components
    pub fn accept_grounding(&mut self, data: Data, claim: Claim) -> Result<()> {
        self.advance_to(ChainState::Grounded)?;
        self.data = Some(data);
        self.claim = Some(claim);
        Ok(())
    }

    /// Fill the phase-2 slots with validated components (breaker already passed)
    pub fn accept_bridge(&mut self, warrant: Warrant, backing: Backing) -> Result<()> {
        self.advance_to(ChainState::Bridged)?;
        self.warrant = Some(warrant);
        self.backing = Some(backing);
        Ok(())
    }

    /// Fill the phase-3 slots with validated components
    pub fn accept_stress(&mut self, rebuttal: Rebuttal, qualifier: Qualifier) -> Result<()> {
        self.advance_to(ChainState::Stressed)?;
        self.rebuttal = Some(rebuttal);
        self.qualifier = Some(qualifier);
        Ok(())
    }

    /// Fill the verdict slot; the chain is complete after this
    pub fn accept_verdict(&mut self, verdict: Verdict) -> Result<()> {
        self.advance_to(ChainState::Judged)?;
        self.verdict = Some(verdict);
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Mark the chain dead at the bridge gate
    pub fn terminate(&mut self, component: impl Into<String>, strength: Strength) {
        self.terminated = Some(TerminationRecord {
            component: component.into(),
            strength,
        });
        self.state = ChainState::Terminated;
        self.completed_at = Some(Utc::now());
    }

    /// Mark the report as rendered
    pub fn mark_reported(&mut self) -> Result<()> {
        if self.state != ChainState::Judged && self.state != ChainState::Reported {
            return Err(EngineError::MissingPriorPhase {
                missing: vec!["verdict_json".to_string()],
            });
        }
        self.state = ChainState::Reported;
        Ok(())
    }

    /// Compact markdown table over whatever components are present
    pub fn to_markdown_table(&self) -> String {
        fn clip(text: &str) -> String {
            if text.chars().count() > 80 {
                let clipped: String = text.chars().take(77).collect();
                format!("{clipped}...")
            } else {
                text.to_string()
            }
        }

        let mut rows = vec![
            "| Component | Value |".to_string(),
            "|-----------|-------|".to_string(),
        ];

        if let Some(data) = &self.data {
            rows.push(format!("| **DATA** | {} |", clip(&data.facts.join("; "))));
        }
        if let Some(claim) = &self.claim {
            rows.push(format!("| **CLAIM** | {} |", clip(&claim.statement)));
        }
        if let Some(warrant) = &self.warrant {
            rows.push(format!(
                "| **WARRANT** | {} [{}] |",
                clip(&warrant.principle),
                warrant.strength
            ));
        }
        if let Some(backing) = &self.backing {
            rows.push(format!(
                "| **BACKING** | {} [{}] |",
                clip(&backing.authority),
                backing.strength
            ));
        }
        if let Some(rebuttal) = &self.rebuttal {
            rows.push(format!(
                "| **REBUTTAL** | {} [{}] |",
                clip(&rebuttal.exceptions.join("; ")),
                rebuttal.strength
            ));
        }
        if let Some(qualifier) = &self.qualifier {
            rows.push(format!(
                "| **QUALIFIER** | {} ({}%) |",
                qualifier.degree, qualifier.confidence_pct
            ));
        }
        if let Some(verdict) = &self.verdict {
            rows.push(format!(
                "| **VERDICT** | {}: {} |",
                verdict.status, verdict.final_statement
            ));
        }

        rows.join("\n")
    }
}
