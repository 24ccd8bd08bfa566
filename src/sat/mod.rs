/*!
The boundary between the verifier and a satisfiability engine.

A [SatEngine] decides whether an expression is satisfiable, and if so returns a [Model] of the expression over its named atoms.
The verifier depends only on this trait, so any engine may be substituted.

The engine shipped is [ContextEngine], which asserts the expression to a fresh [Context] for each query.

```rust
# use otter_simplify::sat::{ContextEngine, SatEngine, SatResult};
# use otter_simplify::config::stages::VerifierConfig;
# use otter_simplify::structures::expression::Expr;
let engine = ContextEngine::new(VerifierConfig::default());

let contradiction = Expr::parse("A && !A").unwrap();
assert_eq!(engine.check_sat(&contradiction), Ok(SatResult::Unsatisfiable));

let query = Expr::parse("A && !B").unwrap();
match engine.check_sat(&query) {
    Ok(SatResult::Satisfiable(model)) => {
        assert_eq!(model.value_of("A"), Some(true));
        assert_eq!(model.value_of("B"), Some(false));
    }
    _ => panic!("expected a model"),
}
```
*/

use crate::{
    config::stages::VerifierConfig,
    context::{Context, Report},
    misc::log::targets,
    structures::{expression::Expr, symbol::canonical_order},
    types::err::{SolveError, VerificationError},
};

/// An assignment of values to named atoms, ordered by the canonical alphabet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Model {
    assignment: Vec<(String, bool)>,
}

impl Model {
    /// A model from pairs of names and values, in any order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, bool)>) -> Self {
        let mut assignment = pairs.into_iter().collect::<Vec<_>>();
        assignment.sort_by(|(a, _), (b, _)| canonical_order(a, b));
        Model { assignment }
    }

    /// The value of `symbol`, if the symbol is part of the model.
    pub fn value_of(&self, symbol: &str) -> Option<bool> {
        self.assignment
            .iter()
            .find(|(name, _)| name == symbol)
            .map(|(_, value)| *value)
    }

    /// Pairs of names and values, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.assignment
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }

    /// The model, restricted to `symbols`.
    pub fn restrict_to(&self, symbols: &[String]) -> Model {
        Model {
            assignment: self
                .assignment
                .iter()
                .filter(|(name, _)| symbols.contains(name))
                .cloned()
                .collect(),
        }
    }

    /// Whether the model has no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs = self
            .assignment
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

/// The result of a satisfiability query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SatResult {
    /// The expression is satisfiable, on the model.
    Satisfiable(Model),

    /// The expression is unsatisfiable.
    Unsatisfiable,
}

/// A satisfiability engine.
///
/// Engines are shared between verification workers, and so must be [Sync].
pub trait SatEngine: Sync {
    /// Whether `expr` is satisfiable.
    fn check_sat(&self, expr: &Expr) -> Result<SatResult, VerificationError>;
}

/// A satisfiability engine which builds a fresh [Context] for each query.
#[derive(Clone, Debug, Default)]
pub struct ContextEngine {
    config: VerifierConfig,
}

impl ContextEngine {
    pub fn new(config: VerifierConfig) -> Self {
        ContextEngine { config }
    }
}

impl SatEngine for ContextEngine {
    fn check_sat(&self, expr: &Expr) -> Result<SatResult, VerificationError> {
        let mut the_context = Context::from_config(&self.config);
        the_context.assert_expression(expr)?;

        let report = the_context.solve()?;
        log::trace!(
            target: targets::VERIFY,
            "{report} with {} atoms after {:?}",
            the_context.atom_count(),
            the_context.counters.time
        );

        match report {
            Report::Satisfiable => {
                let pairs = the_context
                    .symbol_values()
                    .map(|(name, value)| (name.to_string(), value.unwrap_or(false)))
                    .collect::<Vec<_>>();
                Ok(SatResult::Satisfiable(Model::from_pairs(pairs)))
            }

            Report::Unsatisfiable => Ok(SatResult::Unsatisfiable),

            Report::TimeUp => Err(VerificationError::TimeUp),

            Report::Unknown => Err(VerificationError::Solver(SolveError::InvalidState)),
        }
    }
}
