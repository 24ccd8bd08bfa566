//! A recursive descent parser for canonical syntax.
//!
//! ```none
//! implication := disjunction [ "->" implication ]
//! disjunction := conjunction { "||" conjunction }
//! conjunction := unary { "&&" unary }
//! unary       := "!" unary | primary
//! primary     := "(" implication ")" | symbol | "true" | "false"
//! ```
//!
//! Symbols are strings of uppercase ASCII letters.
//!
//! Each `!` and `(` counts towards the nesting depth, which is bounded by [MAX_DEPTH].

use crate::{
    structures::{
        expression::{Expr, MAX_DEPTH},
        symbol,
    },
    types::err::ParseError,
};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Not,
    And,
    Or,
    Implies,
    Open,
    Close,
    Const(bool),
    Symbol(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Not => write!(f, "!"),
            Token::And => write!(f, "&&"),
            Token::Or => write!(f, "||"),
            Token::Implies => write!(f, "->"),
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
            Token::Const(value) => write!(f, "{value}"),
            Token::Symbol(symbol) => write!(f, "{symbol}"),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let characters = text.chars().collect::<Vec<_>>();
    let mut tokens = Vec::new();
    let mut index = 0;

    while index < characters.len() {
        let character = characters[index];
        let next = characters.get(index + 1).copied();

        let (token, width) = match (character, next) {
            (c, _) if c.is_whitespace() => {
                index += 1;
                continue;
            }
            ('!', _) => (Token::Not, 1),
            ('&', Some('&')) => (Token::And, 2),
            ('|', Some('|')) => (Token::Or, 2),
            ('-', Some('>')) => (Token::Implies, 2),
            ('(', _) => (Token::Open, 1),
            (')', _) => (Token::Close, 1),

            (c, _) if c.is_ascii_alphanumeric() || c == '_' || c == '.' => {
                let start = index;
                let mut end = index;
                while end < characters.len()
                    && (characters[end].is_ascii_alphanumeric()
                        || characters[end] == '_'
                        || characters[end] == '.')
                {
                    end += 1;
                }
                let word = characters[start..end].iter().collect::<String>();
                let token = match word.as_str() {
                    "true" => Token::Const(true),
                    "false" => Token::Const(false),
                    _ if symbol::is_canonical(&word) => Token::Symbol(word),
                    _ => {
                        return Err(ParseError::UnknownToken {
                            token: word,
                            position: start,
                        })
                    }
                };
                (token, end - start)
            }

            (c, _) => {
                return Err(ParseError::UnknownToken {
                    token: c.to_string(),
                    position: index,
                })
            }
        };

        tokens.push((token, index));
        index += width;
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    cursor: usize,
    depth: usize,
}

impl Parser {
    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        match self.depth > MAX_DEPTH {
            true => Err(ParseError::TooDeep {
                position: self.tokens.get(self.cursor).map_or(0, |(_, position)| *position),
            }),
            false => Ok(()),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor).map(|(token, _)| token)
    }

    fn next(&mut self) -> Option<(Token, usize)> {
        let token = self.tokens.get(self.cursor).cloned();
        self.cursor += 1;
        token
    }

    fn implication(&mut self) -> Result<Expr, ParseError> {
        let antecedent = self.disjunction()?;
        match self.peek() {
            Some(Token::Implies) => {
                self.cursor += 1;
                let consequent = self.implication()?;
                Ok(Expr::implies(antecedent, consequent))
            }
            _ => Ok(antecedent),
        }
    }

    fn disjunction(&mut self) -> Result<Expr, ParseError> {
        let mut disjuncts = vec![self.conjunction()?];
        while let Some(Token::Or) = self.peek() {
            self.cursor += 1;
            disjuncts.push(self.conjunction()?);
        }
        Ok(Expr::or(disjuncts))
    }

    fn conjunction(&mut self) -> Result<Expr, ParseError> {
        let mut conjuncts = vec![self.unary()?];
        while let Some(Token::And) = self.peek() {
            self.cursor += 1;
            conjuncts.push(self.unary()?);
        }
        Ok(Expr::and(conjuncts))
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::Not) => {
                self.descend()?;
                self.cursor += 1;
                let expr = self.unary()?;
                self.depth -= 1;
                Ok(Expr::not(expr))
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        if let Some(Token::Open) = self.peek() {
            self.descend()?;
        }
        match self.next() {
            Some((Token::Open, _)) => {
                let expr = self.implication()?;
                match self.next() {
                    Some((Token::Close, _)) => {
                        self.depth -= 1;
                        Ok(expr)
                    }
                    Some((token, position)) => Err(ParseError::UnexpectedToken {
                        token: token.to_string(),
                        position,
                    }),
                    None => Err(ParseError::UnexpectedEnd),
                }
            }
            Some((Token::Symbol(symbol), _)) => Ok(Expr::Var(symbol)),
            Some((Token::Const(value), _)) => Ok(Expr::Const(value)),
            Some((token, position)) => Err(ParseError::UnexpectedToken {
                token: token.to_string(),
                position,
            }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}

impl Expr {
    /// Parses an expression written in canonical syntax.
    ///
    /// ```rust
    /// # use otter_simplify::structures::expression::Expr;
    /// # use otter_simplify::types::err::ParseError;
    /// assert!(Expr::parse("A && !(B || true)").is_ok());
    /// assert_eq!(
    ///     Expr::parse("A XOR B"),
    ///     Err(ParseError::UnexpectedToken { token: "XOR".to_string(), position: 2 })
    /// );
    /// ```
    pub fn parse(text: &str) -> Result<Expr, ParseError> {
        let tokens = tokenize(text)?;
        if tokens.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut parser = Parser {
            tokens,
            cursor: 0,
            depth: 0,
        };
        let expr = parser.implication()?;

        match parser.next() {
            None => Ok(expr),
            Some((token, position)) => Err(ParseError::UnexpectedToken {
                token: token.to_string(),
                position,
            }),
        }
    }
}

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn precedence() {
        let expr = Expr::parse("A || B && C").unwrap();
        assert_eq!(
            expr,
            Expr::or(vec![
                Expr::var("A"),
                Expr::and(vec![Expr::var("B"), Expr::var("C")])
            ])
        );
    }

    #[test]
    fn implication_is_right_associative() {
        let expr = Expr::parse("A -> B -> C").unwrap();
        assert_eq!(
            expr,
            Expr::implies(Expr::var("A"), Expr::implies(Expr::var("B"), Expr::var("C")))
        );
    }

    #[test]
    fn display_round_trip() {
        for text in [
            "A && B",
            "!(A || B) && C",
            "(A -> B) -> C",
            "!!A",
            "A || B && !C || true",
            "(A || B) && (C || !D)",
        ] {
            let expr = Expr::parse(text).unwrap();
            assert_eq!(Expr::parse(&expr.to_string()).unwrap(), expr);
        }
    }

    #[test]
    fn depth() {
        let nested = format!("{}A{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(Expr::parse(&nested), Ok(Expr::var("A")));

        let deeper = format!("({nested})");
        assert_eq!(Expr::parse(&deeper), Err(ParseError::TooDeep { position: MAX_DEPTH }));

        let negations = format!("{}A", "!".repeat(100_000));
        assert_eq!(
            Expr::parse(&negations),
            Err(ParseError::TooDeep { position: MAX_DEPTH })
        );
    }

    #[test]
    fn errors() {
        assert_eq!(Expr::parse("   "), Err(ParseError::Empty));
        assert_eq!(Expr::parse("(A && B"), Err(ParseError::UnexpectedEnd));
        assert_eq!(
            Expr::parse("A & B"),
            Err(ParseError::UnknownToken {
                token: "&".to_string(),
                position: 2
            })
        );
        assert_eq!(
            Expr::parse("a || B"),
            Err(ParseError::UnknownToken {
                token: "a".to_string(),
                position: 0
            })
        );
        assert_eq!(
            Expr::parse("A B"),
            Err(ParseError::UnexpectedToken {
                token: "B".to_string(),
                position: 2
            })
        );
    }
}
