/*!
(The internal representation of) an atom (aka. a 'variable').

Atoms are things with a name to which assigning a (boolean) value (true or false) is of interest.
- 'Internal' atoms are used internal to a [context](crate::context).
- 'External' atoms are the canonical symbols of an expression, e.g. `A`, `B`, `AA`. \
  The context keeps a map from external to internal atoms, and the reverse.

Each internal atom is a u32 *u* such that either:
- *u* is 0, or:
- *u - 1* is an atom.

This representation allows atoms to be used as the indicies of a structure, e.g. a valuation, without taking too much space.

Atoms introduced by the [Tseitin encoding](crate::context::GenericContext::assert_expression) have no external representation.
*/

/// An atom, aka. a 'variable'.
pub type Atom = u32;

/// The atom `0` is fixed internally with a value of true.
pub const TOP_ATOM: Atom = 0;

/// The maximum instance of an atom.
pub const ATOM_MAX: Atom = i32::MAX.unsigned_abs();
