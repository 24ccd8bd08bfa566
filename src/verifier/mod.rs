/*!
Equivalence verification.

A record is verified by asking whether the original and simplified expressions of the record ever disagree.
That is, whether `original ^ simplified` is satisfiable:
- If not, the two are equivalent.
- If so, a model of the query is an assignment on which the two disagree, and so a counterexample to equivalence.

Both sides of a record are written over the same mapping, and the [engine](crate::sat) interns symbols by name, so a symbol on either side is the same atom of the query.

Any failure to decide the query is an [Error](VerificationVerdict::Error), and never a finding of non-equivalence.

```rust
# use otter_simplify::verifier::{Verifier, VerificationVerdict};
# use otter_simplify::config::stages::VerifierConfig;
# use otter_simplify::store::ExpressionRecord;
let verifier = Verifier::new(VerifierConfig::default());

let sound = ExpressionRecord::new("A && (B || !B)", "A");
assert_eq!(verifier.verify_record(&sound), VerificationVerdict::Equivalent);

let unsound = ExpressionRecord::new("A || B", "A && B");
match verifier.verify_record(&unsound) {
    VerificationVerdict::NonEquivalent(counterexample) => {
        assert_ne!(counterexample.original_value, counterexample.simplified_value);
    }
    _ => panic!("expected a counterexample"),
}
```
*/

use crossbeam::channel;

use crate::{
    config::stages::VerifierConfig,
    misc::log::targets,
    sat::{ContextEngine, Model, SatEngine, SatResult},
    store::ExpressionRecord,
    structures::expression::Expr,
    types::err::{Side, SolveError, VerificationError},
};

/// An assignment on which the two sides of a record disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Counterexample {
    /// The assignment, over the symbols of the record.
    pub model: Model,

    /// The value of the original expression on the assignment.
    pub original_value: bool,

    /// The value of the simplified expression on the assignment.
    pub simplified_value: bool,
}

impl std::fmt::Display for Counterexample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (original is {}, simplified is {})",
            self.model, self.original_value, self.simplified_value
        )
    }
}

/// The verdict on a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationVerdict {
    /// The two sides of the record are equivalent.
    Equivalent,

    /// The two sides of the record disagree on the counterexample.
    NonEquivalent(Counterexample),

    /// Equivalence could not be decided.
    Error(VerificationError),
}

impl std::fmt::Display for VerificationVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equivalent => write!(f, "Equivalent"),
            Self::NonEquivalent(counterexample) => write!(f, "Not equivalent: {counterexample}"),
            Self::Error(e) => write!(f, "Error: {e}"),
        }
    }
}

/// Verifies records, with some satisfiability engine.
pub struct Verifier {
    config: VerifierConfig,
    engine: Box<dyn SatEngine>,
}

impl Verifier {
    /// A verifier with a [ContextEngine] built from `config`.
    pub fn new(config: VerifierConfig) -> Self {
        let engine = Box::new(ContextEngine::new(config.clone()));
        Verifier { config, engine }
    }

    /// A verifier with the given engine.
    pub fn with_engine(config: VerifierConfig, engine: Box<dyn SatEngine>) -> Self {
        Verifier { config, engine }
    }

    /// The verdict on `record`.
    pub fn verify_record(&self, record: &ExpressionRecord) -> VerificationVerdict {
        let verdict = match self.check(record) {
            Ok(verdict) => verdict,
            Err(e) => VerificationVerdict::Error(e),
        };
        log::debug!(target: targets::VERIFY, "{record}: {verdict}");
        verdict
    }

    fn check(&self, record: &ExpressionRecord) -> Result<VerificationVerdict, VerificationError> {
        let original = Expr::parse(&record.original).map_err(|error| VerificationError::Parse {
            side: Side::Original,
            error,
        })?;
        let simplified =
            Expr::parse(&record.simplified).map_err(|error| VerificationError::Parse {
                side: Side::Simplified,
                error,
            })?;

        if original == simplified {
            return Ok(VerificationVerdict::Equivalent);
        }

        let mut symbols = original.symbols();
        for symbol in simplified.symbols() {
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }

        let query = Expr::xor(original.clone(), simplified.clone());

        match self.engine.check_sat(&query)? {
            SatResult::Unsatisfiable => Ok(VerificationVerdict::Equivalent),

            SatResult::Satisfiable(model) => {
                let model = model.restrict_to(&symbols);
                let value = |symbol: &str| model.value_of(symbol).unwrap_or(false);
                let original_value = original.evaluate(&value);
                let simplified_value = simplified.evaluate(&value);

                if original_value == simplified_value {
                    log::error!(target: targets::VERIFY, "Model {model} of {query} is not a counterexample.");
                    return Err(VerificationError::Solver(SolveError::InvalidState));
                }

                Ok(VerificationVerdict::NonEquivalent(Counterexample {
                    model,
                    original_value,
                    simplified_value,
                }))
            }
        }
    }

    /// The verdict on each of `records`, in the order of `records`.
    ///
    /// With more than one worker, records are verified concurrently, and verdicts are sorted back to the order of records.
    pub fn verify_all(&self, records: &[ExpressionRecord]) -> Vec<VerificationVerdict> {
        let workers = self.config.workers.value.min(records.len());
        if workers <= 1 {
            return records
                .iter()
                .map(|record| self.verify_record(record))
                .collect();
        }

        log::info!(target: targets::VERIFY, "Verifying {} records on {workers} workers", records.len());

        let (job_tx, job_rx) = channel::unbounded::<(usize, &ExpressionRecord)>();
        let (verdict_tx, verdict_rx) = channel::unbounded::<(usize, VerificationVerdict)>();

        for job in records.iter().enumerate() {
            // The receiver is held here, so sending cannot fail.
            let _ = job_tx.send(job);
        }
        drop(job_tx);

        let scope_result = crossbeam::thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let verdict_tx = verdict_tx.clone();
                scope.spawn(move |_| {
                    while let Ok((index, record)) = job_rx.recv() {
                        if verdict_tx.send((index, self.verify_record(record))).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(verdict_tx);

        if scope_result.is_err() {
            log::error!(target: targets::VERIFY, "A verification worker panicked.");
        }

        let mut verdicts: Vec<Option<VerificationVerdict>> = vec![None; records.len()];
        for (index, verdict) in verdict_rx.iter() {
            verdicts[index] = Some(verdict);
        }

        verdicts
            .into_iter()
            .map(|verdict| {
                verdict.unwrap_or_else(|| {
                    VerificationVerdict::Error(VerificationError::Worker(
                        "no verdict returned".to_string(),
                    ))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod verifier_tests {
    use super::*;

    #[test]
    fn structural_equality() {
        let verifier = Verifier::new(VerifierConfig::default());
        let record = ExpressionRecord::new("A && B", "A && B");
        assert_eq!(verifier.verify_record(&record), VerificationVerdict::Equivalent);
    }

    #[test]
    fn parse_errors() {
        let verifier = Verifier::new(VerifierConfig::default());
        let record = ExpressionRecord::new("A &&", "A");
        assert!(matches!(
            verifier.verify_record(&record),
            VerificationVerdict::Error(VerificationError::Parse {
                side: Side::Original,
                ..
            })
        ));

        let record = ExpressionRecord::new("A", "a");
        assert!(matches!(
            verifier.verify_record(&record),
            VerificationVerdict::Error(VerificationError::Parse {
                side: Side::Simplified,
                ..
            })
        ));
    }

    #[test]
    fn symbol_on_one_side() {
        let verifier = Verifier::new(VerifierConfig::default());
        let record = ExpressionRecord::new("A || B && !B", "A");
        assert_eq!(verifier.verify_record(&record), VerificationVerdict::Equivalent);

        let record = ExpressionRecord::new("A", "A && B");
        match verifier.verify_record(&record) {
            VerificationVerdict::NonEquivalent(counterexample) => {
                assert_eq!(counterexample.model.value_of("A"), Some(true));
                assert_eq!(counterexample.model.value_of("B"), Some(false));
            }
            verdict => panic!("unexpected verdict {verdict}"),
        }
    }
}
