/*!
Two-level minimisation, by the Quine–McCluskey method.

# Overview

The truth table of an expression is enumerated over its symbols, taken in canonical order.
From the table:
- The prime implicants of the on-set (rows where the expression is true) give a minimal sum of products.
- The prime implicants of the off-set give a minimal product of sums, as the negation of a minimal sum of products of the negation.

For each set a cover is chosen: first every essential prime implicant, and then greedily the prime implicant which covers the most uncovered rows, preferring fewer literals.
The form returned is that [configured](crate::config::NormalForm), with [Auto](crate::config::NormalForm::Auto) taking whichever form has fewer literals.

# Implicants

An implicant is a pair of bit strings (*value*, *mask*), over one bit per symbol, with the first symbol the most significant bit.
A set bit of the mask is a symbol absent from the implicant, and the value has each masked bit unset.

# Limits

The table has 2<sup>n</sup> rows for n symbols, so the count of symbols is bounded by [max_atoms](crate::config::stages::SimplifierConfig::max_atoms), and the time taken may be bounded by a time limit.
*/

use std::{
    collections::HashSet,
    time::{Duration, Instant},
};

use crate::{
    config::{stages::SimplifierConfig, NormalForm},
    misc::log::targets,
    simplify::Simplifier,
    structures::{expression::Expr, symbol::canonical_order},
    types::err::SimplificationFailure,
};

type Implicant = (u32, u32);

/// How often, in rows or implicants, the time limit is checked.
const TIME_CHECK_INTERVAL: usize = 256;

/// The Quine–McCluskey simplification engine.
#[derive(Clone, Debug, Default)]
pub struct QuineMcCluskey {
    config: SimplifierConfig,
}

/// A point in time after which simplification fails.
struct Deadline(Option<Instant>);

impl Deadline {
    fn from_limit(limit: Option<Duration>) -> Self {
        Deadline(limit.map(|limit| Instant::now() + limit))
    }

    fn check(&self) -> Result<(), SimplificationFailure> {
        match self.0 {
            Some(deadline) if Instant::now() > deadline => Err(SimplificationFailure::TimeUp),
            _ => Ok(()),
        }
    }
}

impl QuineMcCluskey {
    pub fn new(config: SimplifierConfig) -> Self {
        QuineMcCluskey { config }
    }

    /// A minimal two-level form of `expr`.
    fn minimise(&self, expr: &Expr, deadline: &Deadline) -> Result<Expr, SimplificationFailure> {
        let mut symbols = expr.symbols();
        symbols.sort_by(|a, b| canonical_order(a, b));

        let limit = self.config.max_atoms.value;
        if symbols.len() > limit {
            return Err(SimplificationFailure::TooManyAtoms {
                count: symbols.len(),
                limit,
            });
        }

        let width = symbols.len();
        let mut on_set = Vec::new();
        let mut off_set = Vec::new();

        for row in 0..(1_u32 << width) {
            if (row as usize) % TIME_CHECK_INTERVAL == 0 {
                deadline.check()?;
            }
            let value = expr.evaluate(&|symbol: &str| {
                match symbols.iter().position(|s| s == symbol) {
                    Some(index) => row & (1 << (width - 1 - index)) != 0,
                    None => false,
                }
            });
            match value {
                true => on_set.push(row),
                false => off_set.push(row),
            }
        }

        if on_set.is_empty() {
            return Ok(Expr::Const(false));
        }
        if off_set.is_empty() {
            return Ok(Expr::Const(true));
        }

        let sop = || -> Result<Expr, SimplificationFailure> {
            let cover = minimal_cover(&on_set, width, deadline)?;
            let terms = cover
                .iter()
                .map(|implicant| implicant_expr(*implicant, &symbols, true))
                .collect();
            Ok(Expr::or(terms))
        };

        let pos = || -> Result<Expr, SimplificationFailure> {
            let cover = minimal_cover(&off_set, width, deadline)?;
            let clauses = cover
                .iter()
                .map(|implicant| implicant_expr(*implicant, &symbols, false))
                .collect();
            Ok(Expr::and(clauses))
        };

        match self.config.form.value {
            NormalForm::Sop => sop(),
            NormalForm::Pos => pos(),
            NormalForm::Auto => {
                let sop = sop()?;
                let pos = pos()?;
                match pos.literal_count() < sop.literal_count() {
                    true => Ok(pos),
                    false => Ok(sop),
                }
            }
        }
    }
}

impl Simplifier for QuineMcCluskey {
    fn simplify(&self, expr: &Expr) -> Result<Expr, SimplificationFailure> {
        let deadline = Deadline::from_limit(self.config.time_limit());

        match expr {
            Expr::Implies(antecedent, consequent) if self.config.antecedent_only.value => {
                log::trace!(target: targets::SIMPLIFY, "Simplifying the antecedent of {expr}");
                let antecedent = self.minimise(antecedent, &deadline)?;
                Ok(Expr::implies(antecedent, *consequent.clone()))
            }

            _ => self.minimise(expr, &deadline),
        }
    }
}

/// Whether `implicant` covers `row`.
fn covers(implicant: Implicant, row: u32) -> bool {
    let (value, mask) = implicant;
    row & !mask == value
}

/// A count of literals in `implicant`, over `width` symbols.
fn literals(implicant: Implicant, width: usize) -> usize {
    width - implicant.1.count_ones() as usize
}

/// The prime implicants of the function true on exactly `rows`.
fn prime_implicants(
    rows: &[u32],
    width: usize,
    deadline: &Deadline,
) -> Result<Vec<Implicant>, SimplificationFailure> {
    let mut current = rows.iter().map(|row| (*row, 0)).collect::<HashSet<Implicant>>();
    let mut primes = Vec::new();

    while !current.is_empty() {
        let mut next = HashSet::new();
        let mut combined = HashSet::new();

        for (count, &(value, mask)) in current.iter().enumerate() {
            if count % TIME_CHECK_INTERVAL == 0 {
                deadline.check()?;
            }
            for bit in 0..width {
                let bit = 1 << bit;
                if mask & bit != 0 {
                    continue;
                }
                if current.contains(&(value ^ bit, mask)) {
                    combined.insert((value, mask));
                    if value & bit == 0 {
                        next.insert((value, mask | bit));
                    }
                }
            }
        }

        primes.extend(current.difference(&combined).copied());
        current = next;
    }

    primes.sort_by_key(|implicant| (literals(*implicant, width), *implicant));
    Ok(primes)
}

/// A cover of `rows` by prime implicants.
fn minimal_cover(
    rows: &[u32],
    width: usize,
    deadline: &Deadline,
) -> Result<Vec<Implicant>, SimplificationFailure> {
    let primes = prime_implicants(rows, width, deadline)?;
    let mut chosen = Vec::new();
    let mut uncovered = rows.iter().copied().collect::<HashSet<_>>();

    for row in rows {
        let mut covering = primes.iter().filter(|prime| covers(**prime, *row));
        if let (Some(prime), None) = (covering.next(), covering.next()) {
            if !chosen.contains(prime) {
                chosen.push(*prime);
            }
        }
    }
    uncovered.retain(|row| !chosen.iter().any(|prime| covers(*prime, *row)));

    while !uncovered.is_empty() {
        deadline.check()?;

        let mut best: Option<(Implicant, usize)> = None;
        for prime in &primes {
            let count = uncovered.iter().filter(|row| covers(*prime, **row)).count();
            if count > best.map_or(0, |(_, best_count)| best_count) {
                best = Some((*prime, count));
            }
        }

        match best {
            Some((prime, _)) => {
                uncovered.retain(|row| !covers(prime, *row));
                chosen.push(prime);
            }
            None => return Err(SimplificationFailure::Engine("incomplete cover".to_string())),
        }
    }

    chosen.sort_by_key(|implicant| term_order(*implicant, width));
    Ok(chosen)
}

/// A key to order terms, by the first symbol in which terms differ, with a positive literal before a negative literal before an absent symbol.
fn term_order(implicant: Implicant, width: usize) -> Vec<u8> {
    let (value, mask) = implicant;
    (0..width)
        .map(|index| {
            let bit = 1 << (width - 1 - index);
            match (mask & bit != 0, value & bit != 0) {
                (true, _) => 2,
                (false, true) => 0,
                (false, false) => 1,
            }
        })
        .collect()
}

/// The expression of `implicant`.
///
/// As a product, with `product`, or otherwise as the sum which is the negation of the product.
fn implicant_expr(implicant: Implicant, symbols: &[String], product: bool) -> Expr {
    let (value, mask) = implicant;
    let width = symbols.len();

    let literals = symbols
        .iter()
        .enumerate()
        .filter_map(|(index, symbol)| {
            let bit = 1 << (width - 1 - index);
            if mask & bit != 0 {
                return None;
            }
            let positive = (value & bit != 0) == product;
            let atom = Expr::var(symbol.as_str());
            match positive {
                true => Some(atom),
                false => Some(Expr::not(atom)),
            }
        })
        .collect::<Vec<_>>();

    match product {
        true => Expr::and(literals),
        false => Expr::or(literals),
    }
}
