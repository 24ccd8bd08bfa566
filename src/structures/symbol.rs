/*!
The canonical alphabet.

Canonical symbols are the letters `A` through `Z`, in order.
If the alphabet may be extended, the sequence continues bijectively with two (and then more) letters, in the same way spreadsheet columns are named.

```rust
# use otter_simplify::structures::symbol::{index_of, symbol};
assert_eq!(symbol(0), "A");
assert_eq!(symbol(25), "Z");
assert_eq!(symbol(26), "AA");
assert_eq!(symbol(27), "AB");
assert_eq!(symbol(702), "AAA");

assert_eq!(index_of("AB"), Some(27));
assert_eq!(index_of("a"), None);
```
*/

use std::cmp::Ordering;

/// The count of single letter symbols.
pub const ALPHABET_SIZE: usize = 26;

/// The symbol at `index` of the (extended) canonical alphabet.
pub fn symbol(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        letters.push((b'A' + (n % ALPHABET_SIZE) as u8) as char);
        n /= ALPHABET_SIZE;
    }
    letters.iter().rev().collect()
}

/// The index of `symbol` in the (extended) canonical alphabet, if `symbol` is canonical.
pub fn index_of(symbol: &str) -> Option<usize> {
    if symbol.is_empty() {
        return None;
    }
    let mut n: usize = 0;
    for character in symbol.chars() {
        if !character.is_ascii_uppercase() {
            return None;
        }
        n = n
            .checked_mul(ALPHABET_SIZE)?
            .checked_add((character as u8 - b'A') as usize + 1)?;
    }
    Some(n - 1)
}

/// Whether `symbol` belongs to the canonical alphabet.
pub fn is_canonical(symbol: &str) -> bool {
    !symbol.is_empty() && symbol.chars().all(|c| c.is_ascii_uppercase())
}

/// The order of symbols in the alphabet: shorter symbols first, then lexicographic.
pub fn canonical_order(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod symbol_tests {
    use super::*;

    #[test]
    fn bijection() {
        for index in 0..2000 {
            assert_eq!(index_of(&symbol(index)), Some(index));
        }
    }

    #[test]
    fn order_follows_index() {
        let mut symbols = (0..100).map(symbol).collect::<Vec<_>>();
        symbols.reverse();
        symbols.sort_by(|a, b| canonical_order(a, b));
        assert_eq!(symbols, (0..100).map(symbol).collect::<Vec<_>>());
    }
}
