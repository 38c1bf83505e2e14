use std::collections::HashSet;

use super::domain::Keyed;

/// Keep the first occurrence of every (institution, program, category) key.
///
/// Later rows for a key already seen are dropped whole; their fields never fill
/// gaps in the surviving row. Output preserves first-occurrence order.
pub fn canonicalize<T>(items: &[T]) -> Vec<T>
where
    T: Keyed + Clone,
{
    let mut seen = HashSet::with_capacity(items.len());
    let mut canonical = Vec::with_capacity(items.len());

    for item in items {
        if seen.insert(item.match_key()) {
            canonical.push(item.clone());
        }
    }

    canonical
}
