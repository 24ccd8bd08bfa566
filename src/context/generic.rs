use std::collections::HashMap;

use crate::{
    config::stages::VerifierConfig,
    structures::{
        atom::{Atom, TOP_ATOM},
        clause::CClause,
        literal::CLiteral,
        valuation::{CValuation, Valuation},
    },
};

use super::{ContextState, Counters, Report};

/// A decision, and the point of the trail at which it was made.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Level {
    /// The decision, as a literal.
    pub decision: CLiteral,

    /// The length of the trail before the decision.
    pub trail_start: usize,

    /// Whether the decision has been flipped to its negation, after both polarities were tried.
    pub flipped: bool,
}

/// A generic context, parameratised to a source of randomness.
///
/// Requires a source of [rng](rand::Rng) which (also) implements [Default].
///
/// [Default] is used in calls to [make_decision](GenericContext::make_decision) to appease the borrow checker.
///
/// # Example
///
/// ```rust
/// # use otter_simplify::context::GenericContext;
/// # use otter_simplify::generic::random::MinimalPCG32;
/// # use otter_simplify::config::stages::VerifierConfig;
/// let context = GenericContext::<MinimalPCG32>::from_config(&VerifierConfig::default());
/// assert_eq!(context.atom_count(), 1);
/// ```
pub struct GenericContext<R: rand::Rng + std::default::Default> {
    /// The configuration of a context.
    pub config: VerifierConfig,

    /// Counters related to a context/solve.
    pub counters: Counters,

    /// The status of the context.
    pub state: ContextState,

    /// The source of rng.
    pub rng: R,

    /// A map from the (external) name of a symbol to its atom.
    pub(crate) symbols: HashMap<String, Atom>,

    /// The external name of each atom, if any, indexed by atom.
    pub(crate) names: Vec<Option<String>>,

    /// Clauses of two or more literals, where the literals at index 0 and 1 are watched.
    pub(crate) clauses: Vec<CClause>,

    /// Clauses of a single literal.
    pub(crate) units: Vec<CLiteral>,

    /// For each literal index, the keys of clauses watching that literal.
    pub(crate) watches: Vec<Vec<usize>>,

    /// The current valuation, indexed by atom.
    pub(crate) valuation: CValuation,

    /// Literals in the order they were valued.
    pub(crate) trail: Vec<CLiteral>,

    /// Decisions made, in order.
    pub(crate) levels: Vec<Level>,

    /// The index of the next literal on the trail to propagate.
    pub(crate) q_head: usize,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// A report on the state of the context.
    pub fn report(&self) -> Report {
        Report::from(self.state)
    }

    /// Adds the top atom, valued true.
    pub(crate) fn init(&mut self) {
        self.valuation.push(Some(true));
        self.names.push(None);
        self.watches.push(Vec::default());
        self.watches.push(Vec::default());
    }

    /// A count of atoms in the context, including the top atom.
    pub fn atom_count(&self) -> usize {
        self.valuation.atom_count()
    }

    /// The value of `atom`, if the atom has some value.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.valuation.value_of(atom).flatten()
    }

    /// The atom of `symbol`, if the symbol has been added to the context.
    pub fn atom_of(&self, symbol: &str) -> Option<Atom> {
        self.symbols.get(symbol).copied()
    }

    /// The valuation of the context.
    pub fn valuation(&self) -> &CValuation {
        &self.valuation
    }

    /// Pairs of each named symbol and its value, in the current valuation.
    ///
    /// Atoms introduced by an encoding have no name, and so are not included.
    pub fn symbol_values(&self) -> impl Iterator<Item = (&str, Option<bool>)> {
        self.names
            .iter()
            .enumerate()
            .filter_map(|(atom, name)| {
                name.as_deref()
                    .map(|name| (name, self.valuation[atom]))
            })
    }

    /// The value of `literal`, if the atom of the literal has some value.
    pub(crate) fn literal_value(valuation: &CValuation, literal: CLiteral) -> Option<bool> {
        valuation[literal.atom() as usize].map(|value| value == literal.polarity())
    }

    /// Values the atom of `literal` with the polarity of `literal`, and records this on the trail.
    pub(crate) fn assign(&mut self, literal: CLiteral) {
        self.valuation[literal.atom() as usize] = Some(literal.polarity());
        self.trail.push(literal);
    }

    /// Whether `literal` is the top literal, or its negation.
    pub(crate) fn is_top(literal: CLiteral) -> bool {
        literal.atom() == TOP_ATOM
    }
}
