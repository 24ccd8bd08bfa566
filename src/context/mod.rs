/*!
The context, to which expressions are asserted and within which a solve takes place.

Strictly, a [GenericContext] and a [Context].

The generic context is generic over the source of randomness.
[from_config](Context::from_config) is implemented for a context rather than a generic context, to avoid requiring a source of randomness to be supplied alongside a config.

A context is built for a single query: expressions (or clauses) are added, and then a [solve](GenericContext::solve) is made.
Input after a solve is an error.

# Example
```rust
# use otter_simplify::context::{Context, Report};
# use otter_simplify::config::stages::VerifierConfig;
# use otter_simplify::structures::literal::CLiteral;
let mut the_context = Context::from_config(&VerifierConfig::default());

let p = the_context.fresh_atom().unwrap();
let q = the_context.fresh_atom().unwrap();

assert!(the_context.add_clause(vec![CLiteral::new(p, true), CLiteral::new(q, true)]).is_ok());
assert!(the_context.add_clause(vec![CLiteral::new(p, false)]).is_ok());

assert_eq!(the_context.solve(), Ok(Report::Satisfiable));

assert_eq!(the_context.value_of(p), Some(false));
assert_eq!(the_context.value_of(q), Some(true));
```
*/

mod builder;
mod counters;
pub use counters::Counters;
mod generic;
pub use generic::GenericContext;
pub(crate) use generic::Level;
mod specific;
pub use specific::Context;

/// The state of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// The context allows input.
    Input,

    /// A solve is underway, or was abandoned.
    Solving,

    /// The clauses are known to be consistent, with a complete valuation.
    Satisfiable,

    /// The clauses are known to be inconsistent.
    Unsatisfiable,
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Solving => write!(f, "Solving"),
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
        }
    }
}

/// High-level reports regarding a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    /// The clauses of the context are satisfiable.
    Satisfiable,

    /// The clauses of the context are unsatisfiable.
    Unsatisfiable,

    /// The time limit was reached before satisfiability was determined.
    TimeUp,

    /// Satisfiability is unknown, e.g. as no solve has been made.
    Unknown,
}

impl From<ContextState> for Report {
    fn from(value: ContextState) -> Self {
        match value {
            ContextState::Input | ContextState::Solving => Self::Unknown,
            ContextState::Satisfiable => Self::Satisfiable,
            ContextState::Unsatisfiable => Self::Unsatisfiable,
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::TimeUp => write!(f, "TimeUp"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}
