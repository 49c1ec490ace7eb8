//! Chain sequencer
//!
//! Orchestrates the phase operations. Every call is authoritative: each
//! phase re-parses and re-validates every supplied fragment rather than
//! trusting anything cached on the chain, so a caller can always recover
//! by resupplying corrected JSON. Components are appended to the chain
//! only after the whole call validates.

use tracing::{debug, info};

use crate::breaker::CircuitBreaker;
use crate::chain::Chain;
use crate::components::{
    parse_component, Backing, Claim, Data, Qualifier, Rebuttal, Verdict, Warrant, MIN_QUERY_LEN,
};
use crate::config::EngineConfig;
use crate::directive::Directive;
use crate::error::{EngineError, Result};
use crate::report;

/// Phase orchestrator holding the engine configuration
#[derive(Debug, Clone)]
pub struct Sequencer {
    config: EngineConfig,
    breaker: CircuitBreaker,
}

/// Collect the names of all empty fragments so the caller can recover
/// in one round trip.
fn missing_fragments(fragments: &[(&str, &str)]) -> Vec<String> {
    fragments
        .iter()
        .filter(|(_, raw)| raw.trim().is_empty())
        .map(|(name, _)| name.to_string())
        .collect()
}

fn require_fragments(fragments: &[(&str, &str)]) -> Result<()> {
    let missing = missing_fragments(fragments);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(EngineError::MissingPriorPhase { missing })
    }
}

impl Sequencer {
    pub fn new(config: EngineConfig) -> Self {
        let breaker = CircuitBreaker::new(&config);
        Self { config, breaker }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Phase 1 entry: validate the query and open a chain.
    ///
    /// Returns the new chain alongside the phase-1 directive.
    pub fn ground(&self, query: &str) -> Result<(Chain, Directive)> {
        let trimmed = query.trim();
        let got = trimmed.chars().count();
        if got < MIN_QUERY_LEN {
            return Err(EngineError::QueryTooShort {
                got,
                min: MIN_QUERY_LEN,
            });
        }

        let chain = Chain::new(trimmed);
        debug!(chain_id = %chain.id, query = trimmed, "chain opened");
        let directive = Directive::for_chain(&chain)
            .expect("an empty chain always has a phase-1 directive");
        Ok((chain, directive))
    }

    /// Phase 2: validate phase-1 output, ground the chain, and issue the
    /// bridge directive.
    pub fn bridge(&self, chain: &mut Chain, data_json: &str, claim_json: &str) -> Result<Directive> {
        chain.ensure_not_terminated()?;
        require_fragments(&[("data_json", data_json), ("claim_json", claim_json)])?;

        let data: Data = parse_component(data_json)?;
        let claim: Claim = parse_component(claim_json)?;
        chain.accept_grounding(data, claim)?;

        let directive = Directive::for_chain(chain)
            .expect("a grounded chain always has a phase-2 directive");
        Ok(directive)
    }

    /// Phase 3: validate everything up to the bridge, run the circuit
    /// breaker, and issue the stress directive. A tripped breaker marks
    /// the chain terminated; later calls fail with
    /// `ChainAlreadyTerminated`.
    pub fn stress(
        &self,
        chain: &mut Chain,
        data_json: &str,
        claim_json: &str,
        warrant_json: &str,
        backing_json: &str,
    ) -> Result<Directive> {
        chain.ensure_not_terminated()?;
        require_fragments(&[
            ("data_json", data_json),
            ("claim_json", claim_json),
            ("warrant_json", warrant_json),
            ("backing_json", backing_json),
        ])?;

        let data: Data = parse_component(data_json)?;
        let claim: Claim = parse_component(claim_json)?;
        let warrant: Warrant = parse_component(warrant_json)?;
        let backing: Backing = parse_component(backing_json)?;

        chain.accept_grounding(data, claim)?;

        if let Err(err) = self.breaker.check_bridge(&warrant, &backing) {
            if let EngineError::ChainTerminated {
                ref component,
                strength,
            } = err
            {
                info!(chain_id = %chain.id, component, %strength, "circuit breaker tripped");
                chain.terminate(component.clone(), strength);
            }
            return Err(err);
        }

        chain.accept_bridge(warrant, backing)?;
        let directive = Directive::for_chain(chain)
            .expect("a bridged chain always has a phase-3 directive");
        Ok(directive)
    }

    /// Phase 4: validate all six prior components and issue the verdict
    /// directive.
    #[allow(clippy::too_many_arguments)]
    pub fn judge(
        &self,
        chain: &mut Chain,
        data_json: &str,
        claim_json: &str,
        warrant_json: &str,
        backing_json: &str,
        rebuttal_json: &str,
        qualifier_json: &str,
    ) -> Result<Directive> {
        chain.ensure_not_terminated()?;
        require_fragments(&[
            ("data_json", data_json),
            ("claim_json", claim_json),
            ("warrant_json", warrant_json),
            ("backing_json", backing_json),
            ("rebuttal_json", rebuttal_json),
            ("qualifier_json", qualifier_json),
        ])?;

        let data: Data = parse_component(data_json)?;
        let claim: Claim = parse_component(claim_json)?;
        let warrant: Warrant = parse_component(warrant_json)?;
        let backing: Backing = parse_component(backing_json)?;
        let rebuttal: Rebuttal = parse_component(rebuttal_json)?;
        let qualifier: Qualifier = parse_component(qualifier_json)?;

        chain.accept_grounding(data, claim)?;

        if let Err(err) = self.breaker.check_bridge(&warrant, &backing) {
            if let EngineError::ChainTerminated {
                ref component,
                strength,
            } = err
            {
                info!(chain_id = %chain.id, component, %strength, "circuit breaker tripped");
                chain.terminate(component.clone(), strength);
            }
            return Err(err);
        }

        chain.accept_bridge(warrant, backing)?;
        chain.accept_stress(rebuttal, qualifier)?;

        let directive = Directive::for_chain(chain)
            .expect("a stressed chain always has a phase-4 directive");
        Ok(directive)
    }

    /// Phase 4 acceptance: validate the verdict against the full chain,
    /// run the post-hoc consistency pass, and close the chain. Returns
    /// the phase-5 (report) directive.
    #[allow(clippy::too_many_arguments)]
    pub fn complete(
        &self,
        chain: &mut Chain,
        data_json: &str,
        claim_json: &str,
        warrant_json: &str,
        backing_json: &str,
        rebuttal_json: &str,
        qualifier_json: &str,
        verdict_json: &str,
    ) -> Result<Directive> {
        chain.ensure_not_terminated()?;
        // Name every missing fragment of this call at once, verdict included.
        require_fragments(&[
            ("data_json", data_json),
            ("claim_json", claim_json),
            ("warrant_json", warrant_json),
            ("backing_json", backing_json),
            ("rebuttal_json", rebuttal_json),
            ("qualifier_json", qualifier_json),
            ("verdict_json", verdict_json),
        ])?;

        self.judge(
            chain,
            data_json,
            claim_json,
            warrant_json,
            backing_json,
            rebuttal_json,
            qualifier_json,
        )?;

        let verdict: Verdict = parse_component(verdict_json)?;

        // Slots are guaranteed by the successful judge() above.
        let rebuttal = chain.rebuttal.clone().expect("stressed chain has rebuttal");
        let qualifier = chain.qualifier.clone().expect("stressed chain has qualifier");
        self.breaker.check_judgement(&rebuttal, &qualifier, &verdict)?;

        chain.accept_verdict(verdict)?;
        info!(chain_id = %chain.id, phase = chain.current_phase(), "chain judged");

        let directive = Directive::for_chain(chain)
            .expect("a judged chain always has a report directive");
        Ok(directive)
    }

    /// Phase 5 (optional): render the markdown report for a judged chain.
    pub fn report(&self, chain: &mut Chain) -> Result<String> {
        chain.ensure_not_terminated()?;
        let rendered = report::render_report(chain)?;
        chain.mark_reported()?;
        Ok(rendered)
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_too_short() {
        let sequencer = Sequencer::default();
        let err = sequencer.ground("  hi  ").unwrap_err();
        assert!(matches!(err, EngineError::QueryTooShort { got: 2, min: 5 }));
    }

    #[test]
    fn test_missing_fragments_all_named() {
        let missing = missing_fragments(&[
            ("data_json", "{}"),
            ("claim_json", "   "),
            ("warrant_json", ""),
        ]);
        assert_eq!(missing, vec!["claim_json".to_string(), "warrant_json".to_string()]);
    }
}
