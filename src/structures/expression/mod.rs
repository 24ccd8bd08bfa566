/*!
Propositional expressions, as trees.

An [Expr] is built from constants, named atoms, negation, (n-ary) conjunction and disjunction, implication, and exclusive disjunction.
Names are typically canonical symbols (`A`, `B`, …), though after a [mapping is restored](crate::normalizer::VariableMapping::restore) names are original identifiers.

The canonical syntax of an expression is written by [Display](std::fmt::Display) and read by [parse](Expr::parse):

| Operator    | Syntax |
|-------------|--------|
| negation    | `!`    |
| conjunction | `&&`   |
| disjunction | `\|\|` |
| implication | `->`   |
| constants   | `true`, `false` |

Precedence is, from tightest: negation, conjunction, disjunction, implication, and implication associates to the right.
Exclusive disjunction has no canonical syntax, as it only appears in [verification queries](crate::verifier), and is displayed as `^` for logs.

Operations on expressions recurse through the tree, and so [parse](Expr::parse) rejects text which nests parentheses and negations past [MAX_DEPTH].

```rust
# use otter_simplify::structures::expression::Expr;
let expr = Expr::parse("!(A && B) || C -> D").unwrap();
assert_eq!(expr.to_string(), "!(A && B) || C -> D");

assert!(expr.evaluate(&|symbol: &str| symbol == "D"));
assert!(!expr.evaluate(&|symbol: &str| symbol == "C"));
```
*/

mod parse;

use std::collections::HashSet;

/// The deepest nesting of parentheses and negations read from text.
pub const MAX_DEPTH: usize = 256;

/// A propositional expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    /// A constant: true or false.
    Const(bool),

    /// A named atom.
    Var(String),

    /// Negation.
    Not(Box<Expr>),

    /// Conjunction of zero or more expressions, where the empty conjunction is true.
    And(Vec<Expr>),

    /// Disjunction of zero or more expressions, where the empty disjunction is false.
    Or(Vec<Expr>),

    /// Implication, from antecedent to consequent.
    Implies(Box<Expr>, Box<Expr>),

    /// Exclusive disjunction.
    Xor(Box<Expr>, Box<Expr>),
}

const PRECEDENCE_IMPLIES: u8 = 1;
const PRECEDENCE_XOR: u8 = 2;
const PRECEDENCE_OR: u8 = 3;
const PRECEDENCE_AND: u8 = 4;
const PRECEDENCE_NOT: u8 = 5;
const PRECEDENCE_ATOM: u8 = 6;

impl Expr {
    /// An atom with the given name.
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    /// The negation of `expr`.
    pub fn not(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    /// The conjunction of `exprs`, flattening nested conjunctions.
    ///
    /// A conjunction of a single expression is that expression.
    pub fn and(exprs: Vec<Expr>) -> Self {
        let mut flat = Vec::with_capacity(exprs.len());
        for expr in exprs {
            match expr {
                Expr::And(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            1 => flat.swap_remove(0),
            _ => Expr::And(flat),
        }
    }

    /// The disjunction of `exprs`, flattening nested disjunctions.
    ///
    /// A disjunction of a single expression is that expression.
    pub fn or(exprs: Vec<Expr>) -> Self {
        let mut flat = Vec::with_capacity(exprs.len());
        for expr in exprs {
            match expr {
                Expr::Or(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            1 => flat.swap_remove(0),
            _ => Expr::Or(flat),
        }
    }

    /// The implication from `antecedent` to `consequent`.
    pub fn implies(antecedent: Expr, consequent: Expr) -> Self {
        Expr::Implies(Box::new(antecedent), Box::new(consequent))
    }

    /// The exclusive disjunction of `left` and `right`.
    pub fn xor(left: Expr, right: Expr) -> Self {
        Expr::Xor(Box::new(left), Box::new(right))
    }

    /// The names of atoms in the expression, each once, in order of first occurrence.
    pub fn symbols(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut symbols = Vec::new();
        self.collect_symbols(&mut seen, &mut symbols);
        symbols
    }

    fn collect_symbols(&self, seen: &mut HashSet<String>, symbols: &mut Vec<String>) {
        match self {
            Expr::Const(_) => {}
            Expr::Var(name) => {
                if seen.insert(name.clone()) {
                    symbols.push(name.clone());
                }
            }
            Expr::Not(expr) => expr.collect_symbols(seen, symbols),
            Expr::And(exprs) | Expr::Or(exprs) => {
                for expr in exprs {
                    expr.collect_symbols(seen, symbols);
                }
            }
            Expr::Implies(left, right) | Expr::Xor(left, right) => {
                left.collect_symbols(seen, symbols);
                right.collect_symbols(seen, symbols);
            }
        }
    }

    /// The value of the expression, given a value for each atom.
    pub fn evaluate<F: Fn(&str) -> bool>(&self, assignment: &F) -> bool {
        match self {
            Expr::Const(value) => *value,
            Expr::Var(name) => assignment(name),
            Expr::Not(expr) => !expr.evaluate(assignment),
            Expr::And(exprs) => exprs.iter().all(|expr| expr.evaluate(assignment)),
            Expr::Or(exprs) => exprs.iter().any(|expr| expr.evaluate(assignment)),
            Expr::Implies(left, right) => !left.evaluate(assignment) || right.evaluate(assignment),
            Expr::Xor(left, right) => left.evaluate(assignment) != right.evaluate(assignment),
        }
    }

    /// The expression with each atom renamed by `rename`.
    pub fn map_symbols<F: Fn(&str) -> String>(&self, rename: &F) -> Expr {
        match self {
            Expr::Const(value) => Expr::Const(*value),
            Expr::Var(name) => Expr::Var(rename(name)),
            Expr::Not(expr) => Expr::not(expr.map_symbols(rename)),
            Expr::And(exprs) => Expr::And(exprs.iter().map(|e| e.map_symbols(rename)).collect()),
            Expr::Or(exprs) => Expr::Or(exprs.iter().map(|e| e.map_symbols(rename)).collect()),
            Expr::Implies(left, right) => {
                Expr::implies(left.map_symbols(rename), right.map_symbols(rename))
            }
            Expr::Xor(left, right) => Expr::xor(left.map_symbols(rename), right.map_symbols(rename)),
        }
    }

    /// A count of the occurrences of atoms in the expression.
    pub fn literal_count(&self) -> usize {
        match self {
            Expr::Const(_) => 0,
            Expr::Var(_) => 1,
            Expr::Not(expr) => expr.literal_count(),
            Expr::And(exprs) | Expr::Or(exprs) => exprs.iter().map(Expr::literal_count).sum(),
            Expr::Implies(left, right) | Expr::Xor(left, right) => {
                left.literal_count() + right.literal_count()
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Const(_) | Expr::Var(_) => PRECEDENCE_ATOM,
            Expr::Not(_) => PRECEDENCE_NOT,
            Expr::And(exprs) | Expr::Or(exprs) if exprs.is_empty() => PRECEDENCE_ATOM,
            Expr::And(_) => PRECEDENCE_AND,
            Expr::Or(_) => PRECEDENCE_OR,
            Expr::Xor(_, _) => PRECEDENCE_XOR,
            Expr::Implies(_, _) => PRECEDENCE_IMPLIES,
        }
    }

    fn write_operand(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        parenthesise: bool,
    ) -> std::fmt::Result {
        match parenthesise {
            true => write!(f, "({self})"),
            false => write!(f, "{self}"),
        }
    }
}

/// Whether `name` may be written without parentheses.
fn is_plain_name(name: &str) -> bool {
    let mut characters = name.chars();
    match characters.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            characters.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        }
        _ => false,
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Const(true) => write!(f, "true"),
            Expr::Const(false) => write!(f, "false"),

            Expr::Var(name) => match is_plain_name(name) {
                true => write!(f, "{name}"),
                false => write!(f, "({name})"),
            },

            Expr::Not(expr) => {
                write!(f, "!")?;
                expr.write_operand(f, expr.precedence() < PRECEDENCE_NOT)
            }

            Expr::And(exprs) if exprs.is_empty() => write!(f, "true"),
            Expr::Or(exprs) if exprs.is_empty() => write!(f, "false"),

            Expr::And(exprs) | Expr::Or(exprs) => {
                let (precedence, separator) = match self {
                    Expr::And(_) => (PRECEDENCE_AND, " && "),
                    _ => (PRECEDENCE_OR, " || "),
                };
                for (index, expr) in exprs.iter().enumerate() {
                    if index > 0 {
                        write!(f, "{separator}")?;
                    }
                    expr.write_operand(f, expr.precedence() < precedence)?;
                }
                Ok(())
            }

            Expr::Xor(left, right) => {
                left.write_operand(f, left.precedence() <= PRECEDENCE_XOR)?;
                write!(f, " ^ ")?;
                right.write_operand(f, right.precedence() <= PRECEDENCE_XOR)
            }

            Expr::Implies(left, right) => {
                left.write_operand(f, left.precedence() <= PRECEDENCE_IMPLIES)?;
                write!(f, " -> ")?;
                right.write_operand(f, right.precedence() < PRECEDENCE_IMPLIES)
            }
        }
    }
}

#[cfg(test)]
mod expression_tests {
    use super::*;

    #[test]
    fn flattening() {
        let a = Expr::var("A");
        let b = Expr::var("B");
        let c = Expr::var("C");
        let nested = Expr::and(vec![a.clone(), Expr::and(vec![b.clone(), c.clone()])]);
        assert_eq!(nested, Expr::And(vec![a.clone(), b, c]));
        assert_eq!(Expr::or(vec![a.clone()]), a);
    }

    #[test]
    fn display_parentheses() {
        let expr = Expr::and(vec![
            Expr::or(vec![Expr::var("A"), Expr::var("B")]),
            Expr::not(Expr::var("C")),
        ]);
        assert_eq!(expr.to_string(), "(A || B) && !C");

        let chain = Expr::implies(
            Expr::implies(Expr::var("A"), Expr::var("B")),
            Expr::implies(Expr::var("C"), Expr::var("D")),
        );
        assert_eq!(chain.to_string(), "(A -> B) -> C -> D");
    }

    #[test]
    fn display_restored_names() {
        let expr = Expr::not(Expr::var("speed > 5"));
        assert_eq!(expr.to_string(), "!(speed > 5)");
        assert_eq!(Expr::var("dw.mode_on").to_string(), "dw.mode_on");
    }

    #[test]
    fn symbols_in_order() {
        let expr = Expr::parse("C && (A || C) && !B").unwrap();
        assert_eq!(expr.symbols(), vec!["C", "A", "B"]);
        assert_eq!(expr.literal_count(), 4);
    }
}
