//! Determines the satisfiability of the clauses of a context.
//!
//! # Overview
//!
//! A solve values each unit clause, and then loops:
//!
//! ```none
//!           +---------------+
//!   +-------| make_decision |-----> satisfiable, if every atom has a value
//!   |       +---------------+
//!   |               ⌃
//!   |               | if there is no conflict
//!   ⌄               |
//! --+-->+-----------+
//!   ⌃   | propagate |
//!   |   +-----------+
//!   |               | if there is a conflict
//!   |               ⌄
//!   |       +-----------+
//!   +-------| backtrack |-----> unsatisfiable, if every decision has been flipped
//!           +-----------+
//! ```
//!
//! If a time limit is set, the limit is checked on each pass through the loop, and on reaching the limit the solve is abandoned with a report of [TimeUp](Report::TimeUp).

use std::time::Instant;

use crate::{
    context::{ContextState, GenericContext, Report},
    misc::log::targets,
    procedures::{backtrack::BacktrackOk, decision::DecisionOk},
    types::err::SolveError,
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Determines the satisfiability of the context, unless the time limit is reached.
    ///
    /// A context is solved at most once; a further call returns the same report.
    pub fn solve(&mut self) -> Result<Report, SolveError> {
        match self.state {
            ContextState::Input => {}
            ContextState::Satisfiable | ContextState::Unsatisfiable => return Ok(self.report()),
            ContextState::Solving => return Err(SolveError::InvalidState),
        }

        let time_limit = self.config.time_limit();
        let start = Instant::now();
        self.state = ContextState::Solving;

        let units = std::mem::take(&mut self.units);
        for unit in &units {
            match Self::literal_value(&self.valuation, *unit) {
                Some(true) => {}
                Some(false) => {
                    log::trace!(target: targets::PROPAGATION, "Conflicting unit clause {unit}");
                    self.state = ContextState::Unsatisfiable;
                    break;
                }
                None => self.assign(*unit),
            }
        }
        self.units = units;

        while self.state == ContextState::Solving {
            self.counters.total_iterations += 1;

            if let Some(limit) = time_limit {
                if start.elapsed() > limit {
                    log::info!(target: targets::PROPAGATION, "Time limit of {limit:?} reached.");
                    self.counters.time = start.elapsed();
                    return Ok(Report::TimeUp);
                }
            }

            match self.propagate() {
                Ok(()) => match self.make_decision() {
                    DecisionOk::Literal(_) => {}
                    DecisionOk::Exhausted => self.state = ContextState::Satisfiable,
                },

                Err(SolveError::Conflict(_)) => {
                    self.counters.total_conflicts += 1;
                    match self.backtrack() {
                        BacktrackOk::Flipped => {}
                        BacktrackOk::Exhausted => self.state = ContextState::Unsatisfiable,
                    }
                }

                Err(e) => return Err(e),
            }
        }

        self.counters.time = start.elapsed();
        log::debug!(
            target: targets::PROPAGATION,
            "{} after {} decisions and {} conflicts",
            self.state,
            self.counters.total_decisions,
            self.counters.total_conflicts
        );
        Ok(self.report())
    }
}
