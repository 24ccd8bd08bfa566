/*!
Boolean constraint propagation.

See [GenericContext::bcp] for the relevant context method, and [GenericContext::propagate] for propagation of every literal on the trail.

# Overview
Propagates an atom being assigned some value, given as a literal.

Each clause of two or more literals watches two of its literals, at index 0 and 1.
While neither watched literal is false, the clause is neither unit nor conflicting, and so nothing need be done.
When a watched literal becomes false, the clause is examined:
- If the other watched literal is true, the clause is satisfied.
- If some unwatched literal is not false, the watch is moved to that literal.
- Otherwise, the other watched literal is either without a value, and so must be true, or false, and so the clause conflicts with the valuation.

Watches are not revised on backtracking, as any literal which loses its value was valued after (or with) the literals watched in its place.
*/

use crate::{
    context::GenericContext,
    misc::log::targets,
    structures::literal::CLiteral,
    types::err::SolveError,
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Propagates `literal` having been valued true, to each clause watching the negation of `literal`.
    ///
    /// Returns a [Conflict](SolveError::Conflict) with the key of a clause, if that clause is false on the valuation.
    pub fn bcp(&mut self, literal: CLiteral) -> Result<(), SolveError> {
        let false_literal = -literal;

        // Taken, so watches may be moved to other lists while the list is traversed.
        let mut watch_list = std::mem::take(&mut self.watches[false_literal.index()]);

        let mut index = 0;
        let mut outcome = Ok(());

        'watch_loop: while index < watch_list.len() {
            let key = watch_list[index];
            let clause = &mut self.clauses[key];

            if clause[0] == false_literal {
                clause.swap(0, 1);
            }

            if Self::literal_value(&self.valuation, clause[0]) == Some(true) {
                index += 1;
                continue 'watch_loop;
            }

            for candidate in 2..clause.len() {
                if Self::literal_value(&self.valuation, clause[candidate]) != Some(false) {
                    clause.swap(1, candidate);
                    self.watches[clause[1].index()].push(key);
                    watch_list.swap_remove(index);
                    continue 'watch_loop;
                }
            }

            let other = clause[0];
            match Self::literal_value(&self.valuation, other) {
                None => {
                    log::trace!(target: targets::PROPAGATION, "{other} from clause {key}");
                    self.assign(other);
                    index += 1;
                }

                Some(_) => {
                    log::trace!(target: targets::PROPAGATION, "Conflict on clause {key}");
                    outcome = Err(SolveError::Conflict(key));
                    break 'watch_loop;
                }
            }
        }

        self.watches[false_literal.index()] = watch_list;
        outcome
    }

    /// Propagates each literal on the trail which has not already been propagated.
    pub fn propagate(&mut self) -> Result<(), SolveError> {
        while let Some(&literal) = self.trail.get(self.q_head) {
            self.q_head += 1;
            self.counters.total_propagations += 1;
            self.bcp(literal)?;
        }
        Ok(())
    }
}
