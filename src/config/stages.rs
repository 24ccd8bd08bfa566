//! Configuration of the stages of the pipeline, typically derived from the primary configuration.

use std::time::Duration;

use super::{CapacityPolicy, ConfigOption, NormalForm, PolarityLean};
use crate::structures::expression::MAX_DEPTH;

/// Configuration for the [normalizer](crate::normalizer).
#[derive(Clone, Debug)]
pub struct NormalizerConfig {
    /// What to do once the canonical alphabet is exhausted.
    pub capacity: ConfigOption<CapacityPolicy>,

    /// Reuse the mapping of an identical raw expression.
    pub cache: ConfigOption<bool>,

    /// The deepest nesting of parentheses and negations read before an expression is rejected.
    pub max_depth: ConfigOption<usize>,

    /// Prefixes removed from plain identifiers before a symbol is assigned, e.g. `dw.`.
    pub strip_prefixes: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            capacity: ConfigOption {
                name: "capacity",
                min: CapacityPolicy::MIN,
                max: CapacityPolicy::MAX,
                value: CapacityPolicy::Reject,
            },

            cache: ConfigOption {
                name: "cache",
                min: false,
                max: true,
                value: true,
            },

            max_depth: ConfigOption {
                name: "max_depth",
                min: 1,
                max: MAX_DEPTH,
                value: 128,
            },

            strip_prefixes: Vec::default(),
        }
    }
}

/// Configuration for the [simplifier](crate::simplify).
#[derive(Clone, Debug)]
pub struct SimplifierConfig {
    /// The most atoms whose truth table will be enumerated.
    pub max_atoms: ConfigOption<usize>,

    /// The form of a simplification.
    pub form: ConfigOption<NormalForm>,

    /// Simplify only the antecedent of a top-level implication.
    pub antecedent_only: ConfigOption<bool>,

    /// The time limit for simplifying a single expression, where zero is no limit.
    pub time_limit: ConfigOption<Duration>,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        SimplifierConfig {
            max_atoms: ConfigOption {
                name: "max_atoms",
                min: 1,
                max: 20,
                value: 12,
            },

            form: ConfigOption {
                name: "form",
                min: NormalForm::MIN,
                max: NormalForm::MAX,
                value: NormalForm::Auto,
            },

            antecedent_only: ConfigOption {
                name: "antecedent_only",
                min: false,
                max: true,
                value: true,
            },

            time_limit: ConfigOption {
                name: "simplify_time_limit",
                min: Duration::from_secs(0),
                max: Duration::MAX,
                value: Duration::from_secs(0),
            },
        }
    }
}

impl SimplifierConfig {
    /// The time limit, if some limit is set.
    pub fn time_limit(&self) -> Option<Duration> {
        match self.time_limit.value.is_zero() {
            true => None,
            false => Some(self.time_limit.value),
        }
    }
}

/// Configuration for the [verifier](crate::verifier) and the satisfiability [context](crate::context).
#[derive(Clone, Debug)]
pub struct VerifierConfig {
    /// The count of threads verifying records.
    pub workers: ConfigOption<usize>,

    /// The time limit for a single solve, where zero is no limit.
    pub time_limit: ConfigOption<Duration>,

    /// The probability of assigning positive polarity to an atom when making a decision.
    pub polarity_lean: ConfigOption<PolarityLean>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        VerifierConfig {
            workers: ConfigOption {
                name: "workers",
                min: 1,
                max: 256,
                value: 1,
            },

            time_limit: ConfigOption {
                name: "time_limit",
                min: Duration::from_secs(0),
                max: Duration::MAX,
                value: Duration::from_secs(10),
            },

            polarity_lean: ConfigOption {
                name: "polarity_lean",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },
        }
    }
}

impl VerifierConfig {
    /// The time limit, if some limit is set.
    pub fn time_limit(&self) -> Option<Duration> {
        match self.time_limit.value.is_zero() {
            true => None,
            false => Some(self.time_limit.value),
        }
    }
}

/// Configuration for the [pipeline](crate::pipeline) itself.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Write a natural language rendering of each simplified expression.
    pub narrate: ConfigOption<bool>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            narrate: ConfigOption {
                name: "narrate",
                min: false,
                max: true,
                value: true,
            },
        }
    }
}
