//! Cross-dataset alignment on category labels.
//!
//! Datasets share no row identity, only label values. Once per-dataset
//! tables meet here, a label a dataset lacks is a literal zero in its
//! sequence. For means that zero is a chart placeholder, not a rating.

use std::hash::Hash;

use indexmap::IndexMap;

/// One sequence per table, each aligned to `labels`; absent labels give
/// `T::default()`.
pub fn align<K, T>(tables: &[&IndexMap<K, T>], labels: &[K]) -> Vec<Vec<T>>
where
    K: Hash + Eq,
    T: Copy + Default,
{
    tables
        .iter()
        .map(|table| {
            labels
                .iter()
                .map(|label| table.get(label).copied().unwrap_or_default())
                .collect()
        })
        .collect()
}

/// Per-label totals across tables, in first-seen order (table order, then
/// each table's own order). Feeds the ranker when picking a shared axis.
pub fn union_counts<K>(tables: &[&IndexMap<K, u64>]) -> IndexMap<K, u64>
where
    K: Hash + Eq + Clone,
{
    let mut totals: IndexMap<K, u64> = IndexMap::new();
    for table in tables {
        for (label, count) in table.iter() {
            *totals.entry(label.clone()).or_default() += count;
        }
    }
    totals
}

/// Ascending union of every table's labels.
pub fn union_sorted<K, T>(tables: &[&IndexMap<K, T>]) -> Vec<K>
where
    K: Hash + Eq + Ord + Clone,
{
    let mut labels: Vec<K> = tables
        .iter()
        .flat_map(|table| table.keys().cloned())
        .collect();
    labels.sort();
    labels.dedup();
    labels
}
