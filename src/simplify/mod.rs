/*!
The simplification stage.

The stage hands each normalized expression to a [Simplifier], and performs no check on what is returned.
A failure of the engine fails the expression, and is returned as a [SimplificationError] with the input given to the engine.

The engine shipped is [QuineMcCluskey].

```rust
# use otter_simplify::simplify::{simplify_normalized, QuineMcCluskey};
# use otter_simplify::normalizer::Normalizer;
# use otter_simplify::config::stages::{NormalizerConfig, SimplifierConfig};
let mut normalizer = Normalizer::new(NormalizerConfig::default());
let engine = QuineMcCluskey::new(SimplifierConfig::default());

let (normalized, _) = normalizer.normalize("x || !x").unwrap();
let simplified = simplify_normalized(&engine, &normalized).unwrap();
assert_eq!(simplified.text, "true");
```
*/

mod qm;
pub use qm::QuineMcCluskey;

use crate::{
    misc::log::targets,
    normalizer::NormalizedExpression,
    structures::expression::Expr,
    types::err::{SimplificationError, SimplificationFailure},
};

/// A boolean simplification engine.
pub trait Simplifier {
    /// An expression equivalent to `expr`, and (ideally) simpler.
    fn simplify(&self, expr: &Expr) -> Result<Expr, SimplificationFailure>;
}

/// The result of simplification, in canonical syntax.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimplifiedExpression {
    /// The expression, in canonical syntax.
    pub text: String,

    /// The expression, as a tree.
    pub expr: Expr,
}

impl std::fmt::Display for SimplifiedExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Simplifies `normalized` with `engine`.
///
/// The canonical text of the normalized expression is the input to the stage, and is read again before it is given to the engine.
pub fn simplify_normalized(
    engine: &dyn Simplifier,
    normalized: &NormalizedExpression,
) -> Result<SimplifiedExpression, SimplificationError> {
    let fail = |failure: SimplificationFailure| SimplificationError {
        input: normalized.text.clone(),
        failure,
    };

    let expr = Expr::parse(&normalized.text).map_err(|e| fail(SimplificationFailure::Parse(e)))?;
    let simplified = engine.simplify(&expr).map_err(fail)?;

    log::debug!(target: targets::SIMPLIFY, "{normalized} => {simplified}");

    Ok(SimplifiedExpression {
        text: simplified.to_string(),
        expr: simplified,
    })
}

#[cfg(test)]
mod stage_tests {
    use super::*;

    struct Failing;

    impl Simplifier for Failing {
        fn simplify(&self, _: &Expr) -> Result<Expr, SimplificationFailure> {
            Err(SimplificationFailure::Engine("unavailable".to_string()))
        }
    }

    #[test]
    fn failure_keeps_input() {
        let normalized = NormalizedExpression {
            text: "A && B".to_string(),
            expr: Expr::parse("A && B").unwrap(),
        };
        assert_eq!(
            simplify_normalized(&Failing, &normalized),
            Err(SimplificationError {
                input: "A && B".to_string(),
                failure: SimplificationFailure::Engine("unavailable".to_string())
            })
        );
    }

    #[test]
    fn unparsable_input() {
        let normalized = NormalizedExpression {
            text: "A &".to_string(),
            expr: Expr::var("A"),
        };
        let result = simplify_normalized(&Failing, &normalized);
        assert!(matches!(
            result,
            Err(SimplificationError {
                failure: SimplificationFailure::Parse(_),
                ..
            })
        ));
    }
}
