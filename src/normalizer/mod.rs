/*!
Normalization of raw expressions.

A raw expression may be written with any of a number of spellings of each connective, and with identifiers of any (reasonable) form.
Normalization reads a raw expression to a tree over the original identifiers, and then rewrites the tree over canonical symbols, recording the correspondence in a [VariableMapping].

| Connective  | Accepted spellings                |
|-------------|-----------------------------------|
| negation    | `!`, `~`, `not`                   |
| conjunction | `&&`, `&`, `and`                  |
| disjunction | `\|\|`, `\|`, `or`                |
| implication | `->`, `=>`, `implies`             |

Words are case-insensitive, as are the constants `true` and `false`.

# Relational atoms

A comparison (`==`, `!=`, `<`, `>`, `<=`, `>=`) between arithmetic terms over identifiers and numbers is a single atom.
The identifier of the atom is the comparison, written with single spaces around each binary operator, so `x+1==y` and `x + 1 == y` are the same atom.
Arithmetic, or a number, outside of a comparison is an error.

# Nesting

Each negation, parenthesis, and arithmetic sign counts towards the nesting depth of an expression.
An expression nested deeper than the configured `max_depth` is rejected with [FormatError::TooDeep].

# Example

```rust
# use otter_simplify::normalizer::Normalizer;
# use otter_simplify::config::stages::NormalizerConfig;
let mut normalizer = Normalizer::new(NormalizerConfig::default());

let (normalized, mapping) = normalizer.normalize("door_open and not (speed>5)").unwrap();
assert_eq!(normalized.text, "A && !B");
assert_eq!(mapping.original_of("B"), Some("speed > 5"));

assert!(normalizer.normalize("a XOR b").is_err());
```
*/

mod cache;
pub use cache::MappingCache;
pub mod lexer;
mod mapping;
pub use mapping::VariableMapping;

use lexer::{Positioned, RawToken};

use crate::{
    config::stages::NormalizerConfig,
    misc::log::targets,
    structures::expression::{Expr, MAX_DEPTH},
    types::err::{ErrorKind, FormatError},
};

/// An expression over canonical symbols, written in canonical syntax.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedExpression {
    /// The expression, in canonical syntax.
    pub text: String,

    /// The expression, as a tree.
    pub expr: Expr,
}

impl std::fmt::Display for NormalizedExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Normalizes raw expressions, keeping a cache of normalizations if configured to.
pub struct Normalizer {
    config: NormalizerConfig,
    cache: MappingCache,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Normalizer {
            config,
            cache: MappingCache::default(),
        }
    }

    /// The cache of normalizations.
    pub fn cache(&self) -> &MappingCache {
        &self.cache
    }

    /// The normalization of `raw`, and the mapping from its identifiers to canonical symbols.
    pub fn normalize(
        &mut self,
        raw: &str,
    ) -> Result<(NormalizedExpression, VariableMapping), ErrorKind> {
        let key = MappingCache::key(raw);

        if self.config.cache.value {
            if let Some(normalization) = self.cache.get(&key) {
                return Ok(normalization);
            }
        }

        let original = parse_raw_within(
            raw,
            &self.config.strip_prefixes,
            self.config.max_depth.value,
        )?;

        let mut mapping = VariableMapping::default();
        for identifier in original.symbols() {
            mapping.assign(&identifier, self.config.capacity.value)?;
        }

        let expr = original.map_symbols(&|identifier: &str| {
            mapping
                .symbol_of(identifier)
                .unwrap_or_else(|| identifier.to_string())
        });
        let normalized = NormalizedExpression {
            text: expr.to_string(),
            expr,
        };
        log::debug!(target: targets::NORMALIZER, "{key} => {normalized}");

        if self.config.cache.value {
            self.cache
                .insert(key, (normalized.clone(), mapping.clone()));
        }

        Ok((normalized, mapping))
    }
}

/// Reads `raw` to a tree over its original identifiers, with `strip_prefixes` removed.
pub fn parse_raw(raw: &str, strip_prefixes: &[String]) -> Result<Expr, FormatError> {
    parse_raw_within(raw, strip_prefixes, MAX_DEPTH)
}

/// As [parse_raw], with nesting bounded by `max_depth`.
pub fn parse_raw_within(
    raw: &str,
    strip_prefixes: &[String],
    max_depth: usize,
) -> Result<Expr, FormatError> {
    let tokens = lexer::tokenize(raw, strip_prefixes)?;
    if tokens.is_empty() {
        return Err(FormatError::Empty);
    }
    lexer::check_balance(&tokens)?;

    let mut parser = RawParser {
        tokens,
        cursor: 0,
        depth: 0,
        max_depth: max_depth.min(MAX_DEPTH),
    };
    let expr = parser.implication()?;

    match parser.peek() {
        None => Ok(expr),
        Some(positioned) => Err(out_of_place(positioned)),
    }
}

/// The error for a token found where a connective, closing parenthesis, or the end of the expression was expected.
///
/// An identifier in the place of a connective is read as an unknown operator.
fn out_of_place(positioned: &Positioned) -> FormatError {
    match &positioned.token {
        RawToken::Identifier(token) | RawToken::Unknown(token) => FormatError::UnknownOperator {
            token: token.clone(),
            position: positioned.position,
        },
        token => FormatError::UnexpectedToken {
            token: token.to_string(),
            position: positioned.position,
        },
    }
}

struct RawParser {
    tokens: Vec<Positioned>,
    cursor: usize,
    depth: usize,
    max_depth: usize,
}

impl RawParser {
    /// Notes a further level of nesting, opened at `position`.
    fn descend(&mut self, position: usize) -> Result<(), FormatError> {
        self.depth += 1;
        match self.depth > self.max_depth {
            true => Err(FormatError::TooDeep { position }),
            false => Ok(()),
        }
    }

    fn peek(&self) -> Option<&Positioned> {
        self.tokens.get(self.cursor)
    }

    fn peek_token(&self) -> Option<&RawToken> {
        self.peek().map(|positioned| &positioned.token)
    }

    fn implication(&mut self) -> Result<Expr, FormatError> {
        let antecedent = self.disjunction()?;
        match self.peek_token() {
            Some(RawToken::Implies) => {
                self.cursor += 1;
                let consequent = self.implication()?;
                Ok(Expr::implies(antecedent, consequent))
            }
            _ => Ok(antecedent),
        }
    }

    fn disjunction(&mut self) -> Result<Expr, FormatError> {
        let mut disjuncts = vec![self.conjunction()?];
        while let Some(RawToken::Or) = self.peek_token() {
            self.cursor += 1;
            disjuncts.push(self.conjunction()?);
        }
        Ok(Expr::or(disjuncts))
    }

    fn conjunction(&mut self) -> Result<Expr, FormatError> {
        let mut conjuncts = vec![self.unary()?];
        while let Some(RawToken::And) = self.peek_token() {
            self.cursor += 1;
            conjuncts.push(self.unary()?);
        }
        Ok(Expr::and(conjuncts))
    }

    fn unary(&mut self) -> Result<Expr, FormatError> {
        match self.peek_token() {
            Some(RawToken::Not) => {
                let position = self.tokens[self.cursor].position;
                self.descend(position)?;
                self.cursor += 1;
                let expr = self.unary()?;
                self.depth -= 1;
                Ok(Expr::not(expr))
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, FormatError> {
        let Some(positioned) = self.peek().cloned() else {
            return Err(FormatError::UnexpectedEnd);
        };

        match positioned.token {
            RawToken::Open => {
                // A parenthesis may open either a group or the left side of a comparison.
                let (saved, saved_depth) = (self.cursor, self.depth);
                if let Ok(Some(comparison)) = self.comparison() {
                    return Ok(comparison);
                }
                self.cursor = saved + 1;
                self.depth = saved_depth;

                self.descend(positioned.position)?;
                let expr = self.implication()?;
                match self.peek() {
                    Some(Positioned {
                        token: RawToken::Close,
                        ..
                    }) => {
                        self.cursor += 1;
                        self.depth -= 1;
                        Ok(expr)
                    }
                    Some(positioned) => Err(out_of_place(positioned)),
                    None => Err(FormatError::UnbalancedParenthesis {
                        position: positioned.position,
                    }),
                }
            }

            RawToken::Const(value) => {
                self.cursor += 1;
                Ok(Expr::Const(value))
            }

            RawToken::Identifier(_) | RawToken::Number(_) | RawToken::Arith(_) => {
                let start = positioned.position;
                let (lhs, plain) = self.arithmetic()?;
                match self.comparison_rest(lhs.clone())? {
                    Some(comparison) => Ok(comparison),
                    None if plain => Ok(Expr::Var(lhs)),
                    None => Err(FormatError::ArithmeticOutsideComparison { position: start }),
                }
            }

            RawToken::Unknown(token) => Err(FormatError::UnknownOperator {
                token,
                position: positioned.position,
            }),

            token => Err(FormatError::UnexpectedToken {
                token: token.to_string(),
                position: positioned.position,
            }),
        }
    }

    /// A comparison, if the tokens from the cursor are one.
    fn comparison(&mut self) -> Result<Option<Expr>, FormatError> {
        let (lhs, _) = self.arithmetic()?;
        self.comparison_rest(lhs)
    }

    /// The comparison with left side `lhs`, if a comparison operator follows.
    fn comparison_rest(&mut self, lhs: String) -> Result<Option<Expr>, FormatError> {
        match self.peek_token() {
            Some(RawToken::Compare(comparison)) => {
                let comparison = *comparison;
                self.cursor += 1;
                let (rhs, _) = self.arithmetic()?;
                Ok(Some(Expr::Var(format!("{lhs} {comparison} {rhs}"))))
            }
            _ => Ok(None),
        }
    }

    /// An arithmetic term, written canonically, and whether the term is a lone identifier.
    fn arithmetic(&mut self) -> Result<(String, bool), FormatError> {
        let (mut text, mut plain) = self.product()?;
        while let Some(RawToken::Arith(operator)) = self.peek_token() {
            let operator = *operator;
            if !matches!(operator, lexer::Arithmetic::Add | lexer::Arithmetic::Sub) {
                break;
            }
            self.cursor += 1;
            let (rhs, _) = self.product()?;
            text = format!("{text} {operator} {rhs}");
            plain = false;
        }
        Ok((text, plain))
    }

    fn product(&mut self) -> Result<(String, bool), FormatError> {
        let (mut text, mut plain) = self.factor()?;
        while let Some(RawToken::Arith(operator)) = self.peek_token() {
            let operator = *operator;
            if !matches!(operator, lexer::Arithmetic::Mul | lexer::Arithmetic::Div) {
                break;
            }
            self.cursor += 1;
            let (rhs, _) = self.factor()?;
            text = format!("{text} {operator} {rhs}");
            plain = false;
        }
        Ok((text, plain))
    }

    fn factor(&mut self) -> Result<(String, bool), FormatError> {
        let Some(positioned) = self.peek().cloned() else {
            return Err(FormatError::UnexpectedEnd);
        };
        self.cursor += 1;

        match positioned.token {
            RawToken::Identifier(name) => Ok((name, true)),

            RawToken::Number(number) => Ok((number, false)),

            RawToken::Arith(lexer::Arithmetic::Sub) => {
                self.descend(positioned.position)?;
                let (operand, _) = self.factor()?;
                self.depth -= 1;
                Ok((format!("-{operand}"), false))
            }

            RawToken::Open => {
                self.descend(positioned.position)?;
                let (inner, _) = self.arithmetic()?;
                match self.peek_token() {
                    Some(RawToken::Close) => {
                        self.cursor += 1;
                        self.depth -= 1;
                        Ok((format!("({inner})"), false))
                    }
                    Some(_) => Err(out_of_place(&self.tokens[self.cursor])),
                    None => Err(FormatError::UnexpectedEnd),
                }
            }

            RawToken::Unknown(token) => Err(FormatError::UnknownOperator {
                token,
                position: positioned.position,
            }),

            token => Err(FormatError::UnexpectedToken {
                token: token.to_string(),
                position: positioned.position,
            }),
        }
    }
}

#[cfg(test)]
mod normalizer_tests {
    use super::*;

    #[test]
    fn first_seen_order() {
        let mut normalizer = Normalizer::new(NormalizerConfig::default());
        let (normalized, mapping) = normalizer.normalize("zeta || alpha && zeta").unwrap();
        assert_eq!(normalized.text, "A || B && A");
        assert_eq!(mapping.original_of("A"), Some("zeta"));
        assert_eq!(mapping.original_of("B"), Some("alpha"));
    }

    #[test]
    fn comparisons() {
        let a = parse_raw("x+1==y", &[]).unwrap();
        let b = parse_raw("x + 1   ==  y", &[]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Expr::var("x + 1 == y"));

        let grouped = parse_raw("(x + 1) * 2 > y && (z)", &[]).unwrap();
        assert_eq!(
            grouped,
            Expr::and(vec![Expr::var("(x + 1) * 2 > y"), Expr::var("z")])
        );

        let nested = parse_raw("!(speed >= -3)", &[]).unwrap();
        assert_eq!(nested, Expr::not(Expr::var("speed >= -3")));
    }

    #[test]
    fn errors() {
        assert_eq!(parse_raw(" ", &[]), Err(FormatError::Empty));
        assert_eq!(
            parse_raw("A XOR B", &[]),
            Err(FormatError::UnknownOperator {
                token: "XOR".to_string(),
                position: 2
            })
        );
        assert_eq!(
            parse_raw("a ^ b", &[]),
            Err(FormatError::UnknownOperator {
                token: "^".to_string(),
                position: 2
            })
        );
        assert_eq!(
            parse_raw("a && 5", &[]),
            Err(FormatError::ArithmeticOutsideComparison { position: 5 })
        );
        assert_eq!(
            parse_raw("a + b || c", &[]),
            Err(FormatError::ArithmeticOutsideComparison { position: 0 })
        );
        assert_eq!(parse_raw("a &&", &[]), Err(FormatError::UnexpectedEnd));
        assert_eq!(
            parse_raw("(a || b", &[]),
            Err(FormatError::UnbalancedParenthesis { position: 0 })
        );
        assert_eq!(
            parse_raw("a || && b", &[]),
            Err(FormatError::UnexpectedToken {
                token: "&&".to_string(),
                position: 5
            })
        );
    }

    #[test]
    fn cache_hits() {
        let mut normalizer = Normalizer::new(NormalizerConfig::default());
        let first = normalizer.normalize("p &&   q").unwrap();
        let second = normalizer.normalize(" p && q ").unwrap();
        assert_eq!(first, second);
        assert_eq!(normalizer.cache().hits, 1);
        assert_eq!(normalizer.cache().misses, 1);

        let mut config = NormalizerConfig::default();
        config.cache.value = false;
        let mut uncached = Normalizer::new(config);
        let _ = uncached.normalize("p && q");
        let _ = uncached.normalize("p && q");
        assert_eq!(uncached.cache().hits, 0);
        assert!(uncached.cache().is_empty());
    }
}
