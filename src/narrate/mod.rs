/*!
Natural language renderings of simplified expressions.

A [Narrator] renders an expression over canonical symbols, with the mapping of the expression, as text.
Narration is outside of the core of the pipeline: a failure to narrate is logged, and has no effect on verification.

The narrator shipped is [TemplateNarrator], which renders each connective by a fixed template.

```rust
# use otter_simplify::narrate::{Narrator, TemplateNarrator};
# use otter_simplify::normalizer::Normalizer;
# use otter_simplify::config::stages::NormalizerConfig;
let mut normalizer = Normalizer::new(NormalizerConfig::default());
let (normalized, mapping) = normalizer.normalize("door_open && speed > 5 -> alarm").unwrap();

let narration = TemplateNarrator.narrate(&normalized.expr, &mapping).unwrap();
assert_eq!(narration, "if door_open and speed > 5, then alarm");
```
*/

use std::path::{Path, PathBuf};

use crate::{
    misc::log::targets,
    normalizer::VariableMapping,
    structures::expression::Expr,
    types::err::NarrationError,
};

/// Renders expressions as natural language.
pub trait Narrator {
    /// A rendering of `expr`, with the original identifiers of `mapping`.
    fn narrate(&self, expr: &Expr, mapping: &VariableMapping) -> Result<String, NarrationError>;
}

/// A narrator which renders each connective by a fixed template.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    fn render(expr: &Expr) -> String {
        match expr {
            Expr::Const(true) => "true".to_string(),
            Expr::Const(false) => "false".to_string(),

            Expr::Var(name) => name.clone(),

            Expr::Not(inner) => match inner.as_ref() {
                Expr::Var(name) => format!("not {name}"),
                _ => format!("it is not the case that {}", Self::render_operand(inner)),
            },

            Expr::And(exprs) if exprs.is_empty() => "true".to_string(),
            Expr::Or(exprs) if exprs.is_empty() => "false".to_string(),

            Expr::And(exprs) => Self::render_list(exprs, "and"),

            Expr::Or(exprs) if exprs.len() == 2 => format!(
                "either {} or {}",
                Self::render_operand(&exprs[0]),
                Self::render_operand(&exprs[1])
            ),
            Expr::Or(exprs) => Self::render_list(exprs, "or"),

            Expr::Implies(antecedent, consequent) => format!(
                "if {}, then {}",
                Self::render(antecedent),
                Self::render(consequent)
            ),

            Expr::Xor(left, right) => format!(
                "exactly one of {} and {}",
                Self::render_operand(left),
                Self::render_operand(right)
            ),
        }
    }

    /// Renders `exprs`, separated by commas with `connective` before the last.
    fn render_list(exprs: &[Expr], connective: &str) -> String {
        let parts = exprs.iter().map(Self::render_operand).collect::<Vec<_>>();
        match parts.split_last() {
            Some((last, rest)) if rest.len() > 1 => {
                format!("{}, {connective} {last}", rest.join(", "))
            }
            Some((last, rest)) if rest.len() == 1 => format!("{} {connective} {last}", rest[0]),
            Some((last, _)) => last.clone(),
            None => String::new(),
        }
    }

    /// Renders an operand of a connective, bracketed if the operand is itself built from two or more parts.
    fn render_operand(expr: &Expr) -> String {
        match expr {
            Expr::And(exprs) | Expr::Or(exprs) if exprs.len() > 1 => {
                format!("({})", Self::render(expr))
            }
            Expr::Implies(_, _) | Expr::Xor(_, _) => format!("({})", Self::render(expr)),
            _ => Self::render(expr),
        }
    }
}

impl Narrator for TemplateNarrator {
    fn narrate(&self, expr: &Expr, mapping: &VariableMapping) -> Result<String, NarrationError> {
        if let Some(symbol) = expr
            .symbols()
            .into_iter()
            .find(|symbol| mapping.original_of(symbol).is_none())
        {
            return Err(NarrationError::UnmappedSymbol(symbol));
        }

        Ok(Self::render(&mapping.restore(expr)))
    }
}

/// The path of the narration of the record at `index`, within `directory`.
pub fn narration_path(directory: &Path, index: usize) -> PathBuf {
    directory.join(format!("nl_{index}.txt"))
}

/// Writes the narration of the record at `index` to a file within `directory`.
pub fn write_narration(
    directory: &Path,
    index: usize,
    statement: &str,
    narration: &str,
) -> Result<PathBuf, NarrationError> {
    let path = narration_path(directory, index);
    let contents = format!("Logical Statement:\n{statement}\n\nFinal Combined Translation:\n{narration}\n");

    std::fs::write(&path, contents).map_err(|e| NarrationError::Io {
        path: path.clone(),
        message: e.to_string(),
    })?;

    log::trace!(target: targets::NARRATION, "Narration written to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod narrate_tests {
    use crate::config::CapacityPolicy;

    use super::*;

    fn mapping(originals: &[&str]) -> VariableMapping {
        let mut mapping = VariableMapping::default();
        for original in originals {
            let _ = mapping.assign(original, CapacityPolicy::Reject);
        }
        mapping
    }

    #[test]
    fn templates() {
        let mapping = mapping(&["p", "q", "r"]);
        let narrate = |text: &str| {
            TemplateNarrator
                .narrate(&Expr::parse(text).unwrap(), &mapping)
                .unwrap()
        };

        assert_eq!(narrate("A || B"), "either p or q");
        assert_eq!(narrate("A || B || C"), "p, q, or r");
        assert_eq!(narrate("A && !(B || C)"), "p and it is not the case that (either q or r)");
        assert_eq!(narrate("!A -> B && C"), "if not p, then q and r");
        assert_eq!(narrate("true"), "true");
    }

    #[test]
    fn unmapped() {
        let mapping = mapping(&["p"]);
        assert_eq!(
            TemplateNarrator.narrate(&Expr::parse("A && B").unwrap(), &mapping),
            Err(NarrationError::UnmappedSymbol("B".to_string()))
        );
    }
}
