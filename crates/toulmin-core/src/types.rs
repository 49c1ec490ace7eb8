//! Core types for the Toulmin engine
//!
//! The closed enumerations shared by the seven argument components, plus
//! the `Citation` record. Every enum exposes its `VARIANTS` so the
//! directive generator can enumerate legal choices from the live
//! definitions instead of duplicated string lists.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of evidence carried by a Data component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceType {
    Empirical,
    Statistical,
    Testimonial,
    Documentary,
    Expert,
}

impl EvidenceType {
    pub const VARIANTS: &'static [&'static str] =
        &["empirical", "statistical", "testimonial", "documentary", "expert"];
}

/// Breadth of a claim statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimScope {
    Universal,
    General,
    Specific,
    Singular,
}

impl ClaimScope {
    pub const VARIANTS: &'static [&'static str] =
        &["universal", "general", "specific", "singular"];
}

/// Form of reasoning a warrant employs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicType {
    Deductive,
    Inductive,
    Abductive,
    Analogical,
}

impl LogicType {
    pub const VARIANTS: &'static [&'static str] =
        &["deductive", "inductive", "abductive", "analogical"];
}

/// Strength rating for Warrant and Backing
///
/// `Weak` and `Irrelevant` are fatal: the circuit breaker terminates the
/// chain when either appears on an enabled check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Absolute,
    Strong,
    Weak,
    Irrelevant,
}

impl Strength {
    pub const VARIANTS: &'static [&'static str] = &["absolute", "strong", "weak", "irrelevant"];

    /// Whether this rating kills the chain at the bridge gate
    pub fn is_fatal(self) -> bool {
        matches!(self, Strength::Weak | Strength::Irrelevant)
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strength::Absolute => "absolute",
            Strength::Strong => "strong",
            Strength::Weak => "weak",
            Strength::Irrelevant => "irrelevant",
        };
        write!(f, "{s}")
    }
}

/// Strength rating for a Rebuttal
///
/// `Absolute` forces the verdict status to `overruled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebuttalStrength {
    Absolute,
    Strong,
    Weak,
    Negligible,
}

impl RebuttalStrength {
    pub const VARIANTS: &'static [&'static str] = &["absolute", "strong", "weak", "negligible"];

    /// Whether this rebuttal overrules the claim outright
    pub fn is_decisive(self) -> bool {
        matches!(self, RebuttalStrength::Absolute)
    }
}

impl fmt::Display for RebuttalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RebuttalStrength::Absolute => "absolute",
            RebuttalStrength::Strong => "strong",
            RebuttalStrength::Weak => "weak",
            RebuttalStrength::Negligible => "negligible",
        };
        write!(f, "{s}")
    }
}

/// Named confidence band of a qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualifierDegree {
    Certainly,
    Presumably,
    Probably,
    Possibly,
    Apparently,
}

impl QualifierDegree {
    pub const VARIANTS: &'static [&'static str] =
        &["certainly", "presumably", "probably", "possibly", "apparently"];
}

impl fmt::Display for QualifierDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QualifierDegree::Certainly => "certainly",
            QualifierDegree::Presumably => "presumably",
            QualifierDegree::Probably => "probably",
            QualifierDegree::Possibly => "possibly",
            QualifierDegree::Apparently => "apparently",
        };
        write!(f, "{s}")
    }
}

/// Final disposition of the argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Sustained,
    Overruled,
    Remanded,
}

impl VerdictStatus {
    pub const VARIANTS: &'static [&'static str] = &["sustained", "overruled", "remanded"];
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerdictStatus::Sustained => "sustained",
            VerdictStatus::Overruled => "overruled",
            VerdictStatus::Remanded => "remanded",
        };
        write!(f, "{s}")
    }
}

/// A citation backing a fact or an authority
///
/// Closed schema: any field beyond `source` and `reference` is rejected
/// at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Citation {
    /// Source name or identifier
    pub source: String,
    /// Specific reference or quote within the source
    pub reference: String,
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.source, self.reference)
    }
}
