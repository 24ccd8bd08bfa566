/*!
Methods for adding atoms, clauses, and expressions to a context.

Expressions are added by a Tseitin encoding.
Each compound subexpression is given a fresh atom, and clauses are added which fix the value of that atom to the value of the subexpression.
So, the clauses added for an expression are satisfiable exactly when the expression is, and the count of clauses is linear in the size of the expression.

Constants are encoded through the [top atom](crate::structures::atom::TOP_ATOM), and clauses are simplified with respect to it as they are added.
*/

use crate::{
    context::{ContextState, GenericContext},
    misc::log::targets,
    structures::{
        atom::{Atom, ATOM_MAX, TOP_ATOM},
        clause::{CClause, Clause},
        expression::Expr,
        literal::CLiteral,
    },
    types::err::SolveError,
};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// A fresh atom, without a value.
    pub fn fresh_atom(&mut self) -> Result<Atom, SolveError> {
        let atom = match Atom::try_from(self.valuation.len()) {
            Ok(atom) if atom <= ATOM_MAX => atom,
            _ => return Err(SolveError::AtomsExhausted),
        };

        self.valuation.push(None);
        self.names.push(None);
        self.watches.push(Vec::default());
        self.watches.push(Vec::default());

        Ok(atom)
    }

    /// The atom of `symbol`, added to the context if required.
    ///
    /// Symbols are interned by name, so any two occurrences of a symbol share an atom.
    pub fn atom_for_symbol(&mut self, symbol: &str) -> Result<Atom, SolveError> {
        if let Some(atom) = self.symbols.get(symbol) {
            return Ok(*atom);
        }

        let atom = self.fresh_atom()?;
        self.symbols.insert(symbol.to_string(), atom);
        self.names[atom as usize] = Some(symbol.to_string());
        Ok(atom)
    }

    /// Adds a clause to the context.
    ///
    /// Before the clause is stored:
    /// - Duplicate literals are removed.
    /// - The negation of the top literal is removed.
    /// - Tautologies (including clauses with the top literal) are skipped.
    ///
    /// If the clause is then empty, the context is unsatisfiable.
    pub fn add_clause(&mut self, clause: impl Into<CClause>) -> Result<(), SolveError> {
        if self.state != ContextState::Input {
            return Err(SolveError::InvalidState);
        }

        let mut clause: CClause = clause.into();
        if clause.atoms().any(|atom| atom as usize >= self.valuation.len()) {
            return Err(SolveError::UnknownAtom);
        }

        clause.sort_unstable();
        clause.dedup();

        if clause.windows(2).any(|pair| pair[0].atom() == pair[1].atom()) {
            log::trace!(target: targets::PROPAGATION, "Skipped tautology {}", clause.as_dimacs(false));
            return Ok(());
        }

        if clause.contains(&CLiteral::new(TOP_ATOM, true)) {
            return Ok(());
        }
        clause.retain(|literal| !Self::is_top(*literal));

        match clause.len() {
            0 => {
                log::trace!(target: targets::PROPAGATION, "Empty clause added.");
                self.state = ContextState::Unsatisfiable;
            }

            1 => self.units.push(clause[0]),

            _ => {
                let key = self.clauses.len();
                self.watches[clause[0].index()].push(key);
                self.watches[clause[1].index()].push(key);
                self.clauses.push(clause);
            }
        }

        Ok(())
    }

    /// Asserts `expr`, i.e. adds clauses which are satisfiable exactly when `expr` is.
    ///
    /// Each named atom of the expression is [interned](GenericContext::atom_for_symbol).
    ///
    /// ```rust
    /// # use otter_simplify::context::{Context, Report};
    /// # use otter_simplify::config::stages::VerifierConfig;
    /// # use otter_simplify::structures::expression::Expr;
    /// let mut the_context = Context::from_config(&VerifierConfig::default());
    /// let expr = Expr::parse("(A || B) && !A").unwrap();
    ///
    /// assert!(the_context.assert_expression(&expr).is_ok());
    /// assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
    ///
    /// let b = the_context.atom_of("B").unwrap();
    /// assert_eq!(the_context.value_of(b), Some(true));
    /// ```
    pub fn assert_expression(&mut self, expr: &Expr) -> Result<(), SolveError> {
        let literal = self.encode(expr)?;
        self.add_clause(vec![literal])
    }

    /// A literal whose value is fixed to the value of `expr` by clauses added to the context.
    fn encode(&mut self, expr: &Expr) -> Result<CLiteral, SolveError> {
        match expr {
            Expr::Const(value) => Ok(CLiteral::new(TOP_ATOM, *value)),

            Expr::Var(name) => Ok(CLiteral::new(self.atom_for_symbol(name)?, true)),

            Expr::Not(inner) => Ok(-self.encode(inner)?),

            Expr::And(exprs) => {
                let literals = exprs
                    .iter()
                    .map(|expr| self.encode(expr))
                    .collect::<Result<Vec<_>, _>>()?;
                let gate = CLiteral::new(self.fresh_atom()?, true);

                let mut long_clause = vec![gate];
                for literal in literals {
                    self.add_clause(vec![-gate, literal])?;
                    long_clause.push(-literal);
                }
                self.add_clause(long_clause)?;

                Ok(gate)
            }

            Expr::Or(exprs) => {
                let literals = exprs
                    .iter()
                    .map(|expr| self.encode(expr))
                    .collect::<Result<Vec<_>, _>>()?;
                let gate = CLiteral::new(self.fresh_atom()?, true);

                let mut long_clause = vec![-gate];
                for literal in literals {
                    self.add_clause(vec![gate, -literal])?;
                    long_clause.push(literal);
                }
                self.add_clause(long_clause)?;

                Ok(gate)
            }

            Expr::Implies(antecedent, consequent) => {
                let a = self.encode(antecedent)?;
                let c = self.encode(consequent)?;
                let gate = CLiteral::new(self.fresh_atom()?, true);

                self.add_clause(vec![-gate, -a, c])?;
                self.add_clause(vec![gate, a])?;
                self.add_clause(vec![gate, -c])?;

                Ok(gate)
            }

            Expr::Xor(left, right) => {
                let l = self.encode(left)?;
                let r = self.encode(right)?;
                let gate = CLiteral::new(self.fresh_atom()?, true);

                self.add_clause(vec![-gate, l, r])?;
                self.add_clause(vec![-gate, -l, -r])?;
                self.add_clause(vec![gate, -l, r])?;
                self.add_clause(vec![gate, l, -r])?;

                Ok(gate)
            }
        }
    }
}
