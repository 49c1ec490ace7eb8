//! Toulmin Core - Phase-sequencing and validation engine for argumentation chains
//!
//! The engine guides an external language model through the seven-part
//! Toulmin argument structure (Data, Claim, Warrant, Backing, Rebuttal,
//! Qualifier, Verdict). It never calls the model: each phase consumes the
//! JSON the model produced for the previous phase, validates it, and
//! emits the directive for the next phase. Weak logic does not pass.
//!
//! # Architecture
//!
//! 1. **Component schema layer** (`types`, `components`): closed serde
//!    schemas plus field-level constraints for the seven records
//! 2. **Semantic validators** (`validators`): cross-field rules such as
//!    claim-is-assertion and reasoning/status consistency
//! 3. **Circuit breaker** (`breaker`): strength gate after the bridge and
//!    post-hoc verdict consistency rules
//! 4. **Chain sequencer** (`chain`, `sequencer`): forward-only state
//!    machine over the aggregate chain
//! 5. **Directive generator** (`directive`): field manifests for the next
//!    phase, sourced from the live validation rules
//!
//! # Quick Start
//!
//! ```
//! use toulmin_core::{EngineConfig, Sequencer};
//!
//! let sequencer = Sequencer::new(EngineConfig::default());
//! let (mut chain, directive) = sequencer.ground("Is remote work more productive?").unwrap();
//! assert_eq!(directive.phase, 1);
//!
//! let data = r#"{
//!     "facts": ["Remote workers complete 13% more calls per shift."],
//!     "citations": [{"source": "Stanford GSB", "reference": "WFH trial, 2015"}],
//!     "evidence_type": "empirical"
//! }"#;
//! let claim = r#"{
//!     "statement": "Remote work increases output for defined-task roles",
//!     "scope": "specific"
//! }"#;
//!
//! let directive = sequencer.bridge(&mut chain, data, claim).unwrap();
//! assert_eq!(directive.phase, 2);
//! ```
//!
//! # Design Principles
//!
//! - **All-or-nothing validation**: no partially constructed component
//!   ever enters a chain
//! - **Closed schemas**: unknown fields are rejected, not ignored
//! - **Forward-only sequencing**: phases never run out of order and a
//!   terminated chain stays terminated
//! - **Structured failures**: every error names the offending component
//!   and field; a tripped breaker is a designed outcome, not a fault

pub mod breaker;
pub mod chain;
pub mod components;
pub mod config;
pub mod council;
pub mod directive;
pub mod error;
pub mod report;
pub mod sequencer;
pub mod types;
pub mod validators;

pub use chain::{Chain, ChainState, TerminationRecord};
pub use components::{Backing, Claim, ComponentSchema, Data, Qualifier, Rebuttal, Verdict, Warrant};
pub use config::EngineConfig;
pub use council::{convene, CouncilDirective, CouncilRequest};
pub use directive::{Directive, FieldRequirement};
pub use error::{EngineError, InconsistencyReason, Result};
pub use sequencer::Sequencer;
pub use types::{
    Citation, ClaimScope, EvidenceType, LogicType, QualifierDegree, RebuttalStrength, Strength,
    VerdictStatus,
};
