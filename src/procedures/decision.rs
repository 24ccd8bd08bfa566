/*!
Methods for choosing the value of an atom.

The decision procedure is straightforward:
- Take the first atom (by index) which is not assigned a value, and assign either true or false.

Strictly a decision is to value some atom *a* with value *v*.
Still, it is convenient to represent such a decision as a literal with atom *a* and polarity *v*.

The polarity of a decision is drawn from the source of rng of the context, with probability [polarity_lean](crate::config::stages::VerifierConfig::polarity_lean) of true.
With the default lean of zero each atom is first tried with the value false, and a solve is deterministic.
*/

use crate::{
    context::{GenericContext, Level},
    misc::log::targets,
    structures::{literal::CLiteral, valuation::Valuation},
};

/// Possible results from choosing a truth value to assign an atom.
pub enum DecisionOk {
    /// Some truth value was assigned to some atom.
    Literal(CLiteral),

    /// All atoms had already been assigned truth values, so no decision could be made.
    Exhausted,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Makes a decision on the first atom without a value, if there is one.
    pub fn make_decision(&mut self) -> DecisionOk {
        let Some(atom) = self.valuation.unvalued_atoms().next() else {
            return DecisionOk::Exhausted;
        };

        // Takes ownership of rng to satisfy the borrow checker.
        let mut rng = std::mem::take(&mut self.rng);
        let polarity = rng.random_bool(self.config.polarity_lean.value);
        self.rng = rng;

        let decision = CLiteral::new(atom, polarity);
        log::trace!(target: targets::DECISION, "Decision {decision}");

        self.counters.total_decisions += 1;
        self.levels.push(Level {
            decision,
            trail_start: self.trail.len(),
            flipped: false,
        });
        self.assign(decision);

        DecisionOk::Literal(decision)
    }
}
