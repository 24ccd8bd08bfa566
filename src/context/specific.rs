use std::collections::HashMap;

use crate::{config::stages::VerifierConfig, generic::random::MinimalPCG32};

use rand_core::SeedableRng;

use super::{ContextState, Counters, GenericContext};

/// A context which uses [MinimalPCG32] as a source of randomness.
pub type Context = GenericContext<MinimalPCG32>;

impl Context {
    /// Creates a context from some given configuration.
    pub fn from_config(config: &VerifierConfig) -> Self {
        let mut context = Self {
            config: config.clone(),
            counters: Counters::default(),
            state: ContextState::Input,
            rng: MinimalPCG32::from_seed(0_u64.to_le_bytes()),

            symbols: HashMap::default(),
            names: Vec::default(),

            clauses: Vec::default(),
            units: Vec::default(),
            watches: Vec::default(),

            valuation: Vec::default(),
            trail: Vec::default(),
            levels: Vec::default(),
            q_head: 0,
        };
        context.init();
        context
    }
}
