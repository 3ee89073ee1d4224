//! Identifier compaction and code-safe naming.

use crate::ontology::Context;
use std::collections::HashMap;

/// Separator between a compacted prefix and its local name.
pub const PREFIX_SEPARATOR: char = ':';

/// Memoizing front for a [`Context`], scoped to one model construction.
pub struct NameResolver<'c> {
    context: &'c dyn Context,
    compact_ids: HashMap<String, String>,
}

impl<'c> NameResolver<'c> {
    pub fn new(context: &'c dyn Context) -> Self {
        Self {
            context,
            compact_ids: HashMap::new(),
        }
    }

    /// Compacted form of `id`, computed once per identifier.
    pub fn compact(&mut self, id: &str) -> String {
        if let Some(compacted) = self.compact_ids.get(id) {
            return compacted.clone();
        }
        let compacted = self.context.compact(id);
        self.compact_ids.insert(id.to_string(), compacted.clone());
        compacted
    }

    /// Like [`compact`](Self::compact), but returns `fallback` when the context
    /// has no shorter form for `id`. The cache keeps the context's answer, so
    /// callers with different fallbacks for the same id do not interfere.
    pub fn compact_or(&mut self, id: &str, fallback: &str) -> String {
        let compacted = self.compact(id);
        if compacted == id {
            fallback.to_string()
        } else {
            compacted
        }
    }

    /// Compacted name with every prefix separator replaced by `_`.
    pub fn class_name(&mut self, id: &str) -> String {
        self.compact(id).replace(PREFIX_SEPARATOR, "_")
    }

    pub fn cached_len(&self) -> usize {
        self.compact_ids.len()
    }
}

// =============================================================================
// Common prefix
// =============================================================================

fn shared_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((idx, _), _)| idx)
        .unwrap_or_else(|| a.len().min(b.len()))
}

/// Longest prefix shared by every string, on a character boundary.
pub fn common_prefix<'a>(values: &[&'a str]) -> &'a str {
    let Some((first, rest)) = values.split_first() else {
        return "";
    };
    rest.iter().fold(*first, |prefix, value| {
        &prefix[..shared_prefix_len(prefix, value)]
    })
}

/// `value` with the prefix it shares with all of `others` removed.
pub fn remove_common_prefix<'a>(value: &'a str, others: &[&str]) -> &'a str {
    let mut all = Vec::with_capacity(others.len() + 1);
    all.push(value);
    all.extend_from_slice(others);
    let prefix = common_prefix(&all);
    &value[prefix.len()..]
}
