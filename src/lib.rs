//! A library for normalizing, simplifying, and verifying propositional logic expressions.
//!
//! otter_simplify reads raw expressions, written with a variety of spellings for connectives and with relational atoms such as `speed > 5`, and for each:
//! - Rewrites the expression over a canonical alphabet of symbols (`A`, `B`, …), keeping a mapping back to the original identifiers.
//! - Simplifies the canonical expression to a minimal two-level form.
//! - Verifies the simplification is equivalent to the original, by a query to a satisfiability context.
//!
//! A natural language rendering of each simplification may also be written.
//!
//! # Orientation
//!
//! The library is organised around the stages of a [pipeline]:
//! - [normalizer], from raw expressions to canonical [expressions](crate::structures::expression).
//! - [simplify], from canonical expressions to simplifications.
//! - [store], a persistent record of each (original, simplified) pair.
//! - [verifier], from records to [verdicts](crate::verifier::VerificationVerdict).
//! - [reports], from verdicts to a summary.
//! - [narrate], from simplifications to natural language.
//!
//! Verification rests on a small satisfiability [context], which determines the satisfiability of a collection of clauses by the [procedures] of propagation, decision, and backtracking.
//! The context is reached through the [SatEngine](crate::sat::SatEngine) trait, and may be replaced by any other engine.
//!
//! Useful starting points, then, may be:
//! - The [pipeline] to follow a batch of expressions from start to finish.
//! - The [configuration](crate::config) to see what may be adjusted.
//! - The [solve procedure](crate::procedures::solve) to inspect the dynamics of a verification.
//!
//! # Examples
//!
//! + Verify a simplification, and inspect a failed simplification.
//!
//! ```rust
//! # use otter_simplify::config::Config;
//! # use otter_simplify::store::ExpressionRecord;
//! # use otter_simplify::verifier::{Verifier, VerificationVerdict};
//! let verifier = Verifier::new(Config::default().verifier);
//!
//! let sound = ExpressionRecord::new("(A || B) && (A || C)", "A || B && C");
//! assert_eq!(verifier.verify_record(&sound), VerificationVerdict::Equivalent);
//!
//! let unsound = ExpressionRecord::new("A && B", "A");
//! match verifier.verify_record(&unsound) {
//!     VerificationVerdict::NonEquivalent(counterexample) => {
//!         assert_eq!(counterexample.model.value_of("A"), Some(true));
//!         assert_eq!(counterexample.model.value_of("B"), Some(false));
//!     }
//!     _ => panic!("A && B is not A"),
//! }
//! ```
//!
//! + Run a batch through every stage.
//!
//! ```rust
//! # use otter_simplify::config::Config;
//! # use otter_simplify::pipeline::Pipeline;
//! let pipeline = Pipeline::new(Config::default());
//! let verified = pipeline.run_text("dw.p and (dw.p or dw.q)\nspeed > 5 => brake_on\n");
//!
//! assert_eq!(verified.store.records()[0].original, "A && (A || B)");
//! assert_eq!(verified.store.records()[0].simplified, "A");
//! assert!(verified.summary.all_equivalent());
//! ```

#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

pub mod config;
pub mod context;
pub mod generic;
pub mod misc;
pub mod narrate;
pub mod normalizer;
pub mod pipeline;
pub mod procedures;
pub mod reports;
pub mod sat;
pub mod simplify;
pub mod store;
pub mod structures;
pub mod types;
pub mod verifier;
