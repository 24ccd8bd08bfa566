//! Tokens of raw expressions.
//!
//! Every accepted spelling of an operator is read to one of four connectives.
//! Sequences which look like an operator, though are not accepted, are read as [Unknown](RawToken::Unknown), so the parser may report them as such.

use crate::types::err::FormatError;

/// Comparison operators, within relational atoms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eq => write!(f, "=="),
            Self::Ne => write!(f, "!="),
            Self::Lt => write!(f, "<"),
            Self::Gt => write!(f, ">"),
            Self::Le => write!(f, "<="),
            Self::Ge => write!(f, ">="),
        }
    }
}

/// Arithmetic operators, within relational atoms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arithmetic {
    Add,
    Sub,
    Mul,
    Div,
}

impl std::fmt::Display for Arithmetic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
            Self::Mul => write!(f, "*"),
            Self::Div => write!(f, "/"),
        }
    }
}

/// A token of a raw expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawToken {
    And,
    Or,
    Not,
    Implies,
    Open,
    Close,
    Const(bool),
    Identifier(String),
    Number(String),
    Compare(Comparison),
    Arith(Arithmetic),

    /// Something in the shape of an operator, outside of the operator table.
    Unknown(String),
}

impl std::fmt::Display for RawToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => write!(f, "&&"),
            Self::Or => write!(f, "||"),
            Self::Not => write!(f, "!"),
            Self::Implies => write!(f, "->"),
            Self::Open => write!(f, "("),
            Self::Close => write!(f, ")"),
            Self::Const(value) => write!(f, "{value}"),
            Self::Identifier(name) | Self::Number(name) | Self::Unknown(name) => write!(f, "{name}"),
            Self::Compare(comparison) => write!(f, "{comparison}"),
            Self::Arith(arithmetic) => write!(f, "{arithmetic}"),
        }
    }
}

/// A token, with the (0-based) character position at which it begins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Positioned {
    pub token: RawToken,
    pub position: usize,
}

/// Multi-character sequences, longest first within any shared prefix.
const SEQUENCES: &[(&str, Option<RawToken>)] = &[
    ("<->", None),
    ("<=>", None),
    ("&&", Some(RawToken::And)),
    ("||", Some(RawToken::Or)),
    ("->", Some(RawToken::Implies)),
    ("=>", Some(RawToken::Implies)),
    ("==", Some(RawToken::Compare(Comparison::Eq))),
    ("!=", Some(RawToken::Compare(Comparison::Ne))),
    ("<=", Some(RawToken::Compare(Comparison::Le))),
    (">=", Some(RawToken::Compare(Comparison::Ge))),
];

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// A word, read as an operator or constant if it is one, and otherwise as an identifier.
fn word_token(word: &str, strip_prefixes: &[String]) -> RawToken {
    match word.to_ascii_lowercase().as_str() {
        "and" => RawToken::And,
        "or" => RawToken::Or,
        "not" => RawToken::Not,
        "implies" => RawToken::Implies,
        "true" => RawToken::Const(true),
        "false" => RawToken::Const(false),
        _ => RawToken::Identifier(strip_prefix(word, strip_prefixes)),
    }
}

/// `word` without the first of `prefixes` it begins with, provided what remains is an identifier.
fn strip_prefix(word: &str, prefixes: &[String]) -> String {
    for prefix in prefixes {
        if let Some(rest) = word.strip_prefix(prefix.as_str()) {
            if rest.chars().next().is_some_and(is_identifier_start) {
                return rest.to_string();
            }
        }
    }
    word.to_string()
}

/// The tokens of `raw`.
pub fn tokenize(raw: &str, strip_prefixes: &[String]) -> Result<Vec<Positioned>, FormatError> {
    let characters = raw.chars().collect::<Vec<_>>();
    let mut tokens = Vec::new();
    let mut index = 0;

    'token_loop: while index < characters.len() {
        let character = characters[index];

        if character.is_whitespace() {
            index += 1;
            continue 'token_loop;
        }

        for (sequence, token) in SEQUENCES {
            let length = sequence.chars().count();
            let matches = characters
                .get(index..index + length)
                .is_some_and(|slice| slice.iter().copied().eq(sequence.chars()));
            if matches {
                let token = match token {
                    Some(token) => token.clone(),
                    None => RawToken::Unknown(sequence.to_string()),
                };
                tokens.push(Positioned {
                    token,
                    position: index,
                });
                index += length;
                continue 'token_loop;
            }
        }

        let single = match character {
            '&' => Some(RawToken::And),
            '|' => Some(RawToken::Or),
            '!' | '~' => Some(RawToken::Not),
            '(' => Some(RawToken::Open),
            ')' => Some(RawToken::Close),
            '<' => Some(RawToken::Compare(Comparison::Lt)),
            '>' => Some(RawToken::Compare(Comparison::Gt)),
            '+' => Some(RawToken::Arith(Arithmetic::Add)),
            '-' => Some(RawToken::Arith(Arithmetic::Sub)),
            '*' => Some(RawToken::Arith(Arithmetic::Mul)),
            '/' => Some(RawToken::Arith(Arithmetic::Div)),
            _ => None,
        };
        if let Some(token) = single {
            tokens.push(Positioned {
                token,
                position: index,
            });
            index += 1;
            continue 'token_loop;
        }

        let start = index;
        if is_identifier_start(character) {
            while index < characters.len() && is_identifier_continue(characters[index]) {
                index += 1;
            }
            let word = characters[start..index].iter().collect::<String>();
            tokens.push(Positioned {
                token: word_token(&word, strip_prefixes),
                position: start,
            });
        } else if character.is_ascii_digit() {
            while index < characters.len()
                && (characters[index].is_ascii_digit() || characters[index] == '.')
            {
                index += 1;
            }
            tokens.push(Positioned {
                token: RawToken::Number(characters[start..index].iter().collect()),
                position: start,
            });
        } else if character.is_ascii_punctuation() {
            while index < characters.len()
                && characters[index].is_ascii_punctuation()
                && !matches!(characters[index], '(' | ')')
            {
                index += 1;
            }
            tokens.push(Positioned {
                token: RawToken::Unknown(characters[start..index].iter().collect()),
                position: start,
            });
        } else {
            return Err(FormatError::UnexpectedCharacter {
                character,
                position: index,
            });
        }
    }

    Ok(tokens)
}

/// Checks each parenthesis of `tokens` is matched.
pub fn check_balance(tokens: &[Positioned]) -> Result<(), FormatError> {
    let mut open = Vec::new();
    for positioned in tokens {
        match positioned.token {
            RawToken::Open => open.push(positioned.position),
            RawToken::Close => {
                if open.pop().is_none() {
                    return Err(FormatError::UnbalancedParenthesis {
                        position: positioned.position,
                    });
                }
            }
            _ => {}
        }
    }
    match open.first() {
        Some(&position) => Err(FormatError::UnbalancedParenthesis { position }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod lexer_tests {
    use super::*;

    fn tokens(raw: &str) -> Vec<RawToken> {
        tokenize(raw, &[])
            .unwrap()
            .into_iter()
            .map(|positioned| positioned.token)
            .collect()
    }

    #[test]
    fn operator_spellings() {
        assert_eq!(
            tokens("a & b and c && d"),
            vec![
                RawToken::Identifier("a".to_string()),
                RawToken::And,
                RawToken::Identifier("b".to_string()),
                RawToken::And,
                RawToken::Identifier("c".to_string()),
                RawToken::And,
                RawToken::Identifier("d".to_string()),
            ]
        );
        assert_eq!(tokens("~ ! NOT"), vec![RawToken::Not; 3]);
        assert_eq!(tokens("-> => Implies"), vec![RawToken::Implies; 3]);
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(
            tokens("x!=1"),
            vec![
                RawToken::Identifier("x".to_string()),
                RawToken::Compare(Comparison::Ne),
                RawToken::Number("1".to_string()),
            ]
        );
        assert_eq!(
            tokens("a<=b"),
            vec![
                RawToken::Identifier("a".to_string()),
                RawToken::Compare(Comparison::Le),
                RawToken::Identifier("b".to_string()),
            ]
        );
    }

    #[test]
    fn unknown_operators() {
        assert_eq!(
            tokenize("a ^ b", &[]).unwrap()[1],
            Positioned {
                token: RawToken::Unknown("^".to_string()),
                position: 2
            }
        );
        assert_eq!(tokens("a <-> b")[1], RawToken::Unknown("<->".to_string()));
    }

    #[test]
    fn prefixes() {
        let prefixes = vec!["dw.".to_string(), "rtDW.".to_string()];
        let stripped = tokenize("dw.speed && rtDW.mode", &prefixes).unwrap();
        assert_eq!(stripped[0].token, RawToken::Identifier("speed".to_string()));
        assert_eq!(stripped[2].token, RawToken::Identifier("mode".to_string()));
    }

    #[test]
    fn balance() {
        assert!(check_balance(&tokenize("(a && (b))", &[]).unwrap()).is_ok());
        assert_eq!(
            check_balance(&tokenize("(a && (b)", &[]).unwrap()),
            Err(FormatError::UnbalancedParenthesis { position: 0 })
        );
        assert_eq!(
            check_balance(&tokenize("a)", &[]).unwrap()),
            Err(FormatError::UnbalancedParenthesis { position: 1 })
        );
    }
}
