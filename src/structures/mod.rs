/*!
Structures used by the pipeline.

Expressions are trees ([Expr](expression::Expr)), written over the canonical [alphabet](symbol).

A satisfiability query is a set of clauses over atoms:
- [Atoms](atom) are u32s, with the atom `0` fixed as true.
- [Literals](literal) pair an atom with a polarity.
- [Clauses](clause) are vectors of literals.
- [Valuations](valuation) are vectors of optional booleans, indexed by atoms.
*/

pub mod atom;
pub mod clause;
pub mod expression;
pub mod literal;
pub mod symbol;
pub mod valuation;
