/*!
A bijection between original identifiers and canonical symbols.

Symbols are assigned in order of first occurrence, from the start of the canonical alphabet, so the mapping of an expression with *k* identifiers is onto the first *k* symbols.

```rust
# use otter_simplify::normalizer::VariableMapping;
# use otter_simplify::config::CapacityPolicy;
# use otter_simplify::structures::expression::Expr;
let mut mapping = VariableMapping::default();
assert_eq!(mapping.assign("speed > 5", CapacityPolicy::Reject), Ok("A".to_string()));
assert_eq!(mapping.assign("door_open", CapacityPolicy::Reject), Ok("B".to_string()));
assert_eq!(mapping.assign("speed > 5", CapacityPolicy::Reject), Ok("A".to_string()));

let restored = mapping.restore(&Expr::parse("A && !B").unwrap());
assert_eq!(restored.to_string(), "(speed > 5) && !door_open");
```
*/

use std::collections::HashMap;

use crate::{
    config::CapacityPolicy,
    structures::{
        expression::Expr,
        symbol::{self, index_of, ALPHABET_SIZE},
    },
    types::err::CapacityError,
};

/// A bijection between original identifiers and canonical symbols.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariableMapping {
    /// Original identifiers, indexed by the index of their symbol.
    originals: Vec<String>,

    /// The index of the symbol of each original identifier.
    indicies: HashMap<String, usize>,
}

impl VariableMapping {
    /// The symbol of `original`, assigning the next fresh symbol if `original` has none.
    pub fn assign(
        &mut self,
        original: &str,
        policy: CapacityPolicy,
    ) -> Result<String, CapacityError> {
        if let Some(index) = self.indicies.get(original) {
            return Ok(symbol::symbol(*index));
        }

        let index = self.originals.len();
        if index >= ALPHABET_SIZE && policy == CapacityPolicy::Reject {
            return Err(CapacityError::AlphabetExhausted {
                identifier: original.to_string(),
                capacity: ALPHABET_SIZE,
            });
        }

        self.originals.push(original.to_string());
        self.indicies.insert(original.to_string(), index);
        Ok(symbol::symbol(index))
    }

    /// The symbol of `original`, if `original` is mapped.
    pub fn symbol_of(&self, original: &str) -> Option<String> {
        self.indicies.get(original).map(|index| symbol::symbol(*index))
    }

    /// The original identifier of `symbol`, if `symbol` is mapped.
    pub fn original_of(&self, symbol: &str) -> Option<&str> {
        index_of(symbol)
            .and_then(|index| self.originals.get(index))
            .map(|original| original.as_str())
    }

    /// A count of the identifiers mapped.
    pub fn len(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    /// Pairs of symbol and original identifier, in the order of the alphabet.
    pub fn iter(&self) -> impl Iterator<Item = (String, &str)> {
        self.originals
            .iter()
            .enumerate()
            .map(|(index, original)| (symbol::symbol(index), original.as_str()))
    }

    /// `expr`, with each mapped symbol replaced by its original identifier.
    ///
    /// Symbols without a mapping are left as they are.
    pub fn restore(&self, expr: &Expr) -> Expr {
        expr.map_symbols(&|symbol: &str| match self.original_of(symbol) {
            Some(original) => original.to_string(),
            None => symbol.to_string(),
        })
    }
}

/// One line per symbol, as `A -> "original"`.
impl std::fmt::Display for VariableMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (symbol, original) in self.iter() {
            writeln!(f, "{symbol} -> {original:?}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod mapping_tests {
    use super::*;

    #[test]
    fn capacity() {
        let mut mapping = VariableMapping::default();
        for index in 0..ALPHABET_SIZE {
            assert!(mapping.assign(&format!("v{index}"), CapacityPolicy::Reject).is_ok());
        }
        assert_eq!(
            mapping.assign("overflow", CapacityPolicy::Reject),
            Err(CapacityError::AlphabetExhausted {
                identifier: "overflow".to_string(),
                capacity: ALPHABET_SIZE
            })
        );
        assert_eq!(mapping.len(), ALPHABET_SIZE);

        assert_eq!(
            mapping.assign("overflow", CapacityPolicy::Extend),
            Ok("AA".to_string())
        );
        assert_eq!(mapping.original_of("AA"), Some("overflow"));
    }

    #[test]
    fn display() {
        let mut mapping = VariableMapping::default();
        let _ = mapping.assign("x", CapacityPolicy::Reject);
        let _ = mapping.assign("y == 2", CapacityPolicy::Reject);
        assert_eq!(mapping.to_string(), "A -> \"x\"\nB -> \"y == 2\"\n");
    }
}
