/*!
Chronological backtracking.

On a conflict the most recent decision which has not already been flipped is undone, together with every literal valued since, and the negation of the decision is valued in its place.
Decisions which have already been flipped are undone without replacement, as both values of the atom lead to a conflict under the earlier decisions.

If every decision has been flipped, the conflict follows from the clauses alone, and the clauses are unsatisfiable.
*/

use crate::{context::GenericContext, misc::log::targets};

/// Possible results of backtracking.
pub enum BacktrackOk {
    /// Some decision was flipped.
    Flipped,

    /// No decision remained to flip.
    Exhausted,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Removes the value of each atom valued at or after `trail_start`.
    pub fn undo_to(&mut self, trail_start: usize) {
        for literal in self.trail.drain(trail_start..) {
            self.valuation[literal.atom() as usize] = None;
        }
        self.q_head = self.q_head.min(trail_start);
    }

    /// Backtracks to the most recent decision which has not been flipped, and flips it.
    pub fn backtrack(&mut self) -> BacktrackOk {
        while let Some(mut level) = self.levels.pop() {
            self.undo_to(level.trail_start);

            if level.flipped {
                continue;
            }

            level.flipped = true;
            let flip = -level.decision;
            log::trace!(target: targets::BACKTRACK, "Flipped {} to {flip}", level.decision);

            self.levels.push(level);
            self.assign(flip);
            return BacktrackOk::Flipped;
        }

        log::trace!(target: targets::BACKTRACK, "No decision to flip.");
        BacktrackOk::Exhausted
    }
}
