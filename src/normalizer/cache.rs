use std::collections::HashMap;

use crate::misc::log::targets;

use super::{NormalizedExpression, VariableMapping};

/// A store of normalizations, keyed by raw expression with whitespace normalized.
///
/// The cache is unbounded, and lives as long as the [Normalizer](super::Normalizer) which owns it.
#[derive(Debug, Default)]
pub struct MappingCache {
    entries: HashMap<String, (NormalizedExpression, VariableMapping)>,

    /// A count of lookups which found an entry.
    pub hits: usize,

    /// A count of lookups which found no entry.
    pub misses: usize,
}

impl MappingCache {
    /// The key of `raw`: each run of whitespace is replaced by a single space, and leading and trailing whitespace is removed.
    pub fn key(raw: &str) -> String {
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// The normalization stored for `key`, if any.
    pub fn get(&mut self, key: &str) -> Option<(NormalizedExpression, VariableMapping)> {
        match self.entries.get(key) {
            Some(entry) => {
                self.hits += 1;
                log::trace!(target: targets::MAPPING_CACHE, "Hit: {key}");
                Some(entry.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: String, normalization: (NormalizedExpression, VariableMapping)) {
        self.entries.insert(key, normalization);
    }

    /// A count of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
