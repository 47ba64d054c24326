//! Grouped aggregation over one or two key columns.
//!
//! Groups are kept in first-seen order; that order is what presentation and
//! ranking tie-breaks rely on, so tables never go through a hash map with
//! unstable iteration.
//!
//! # Absence
//!
//! A group with no qualifying value has no entry at all. The only place a
//! missing combination becomes zero is [`AggregateTable::unstack`], whose
//! output is a dense grid.
//!
//! ```text
//! (Year, Platform) → stats        unstack          Wii   X360
//! (2006, Wii)      → 2            ───────▶  2006     2      0
//! (2007, X360)     → 1                      2007     0      1
//! ```

use std::hash::Hash;
use std::ops::Add;

use indexmap::{IndexMap, IndexSet};

use crate::error::EngineResult;
use crate::models::{Dataset, Key, Row};

/// What to compute per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric<'a> {
    /// Number of rows with a key.
    Count,
    /// Count and mean of a numeric column.
    Mean(&'a str),
    /// Count and sum of a numeric column.
    Sum(&'a str),
}

/// Metrics of one group.
///
/// With a value column, `count` is the number of rows where that column
/// held a number; emitted groups always have `count >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroupStats {
    pub count: u64,
    pub sum: f64,
}

impl GroupStats {
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    fn add(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
    }
}

/// Result of grouping: unique keys in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateTable<K: Hash + Eq> {
    groups: IndexMap<K, GroupStats>,
}

impl<K: Hash + Eq + Clone> AggregateTable<K> {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&GroupStats> {
        self.groups.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &GroupStats)> {
        self.groups.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.keys()
    }

    pub fn counts(&self) -> IndexMap<K, u64> {
        self.project(|s| s.count)
    }

    pub fn means(&self) -> IndexMap<K, f64> {
        self.project(GroupStats::mean)
    }

    pub fn sums(&self) -> IndexMap<K, f64> {
        self.project(|s| s.sum)
    }

    pub fn project<T>(&self, f: impl Fn(&GroupStats) -> T) -> IndexMap<K, T> {
        self.groups.iter().map(|(k, s)| (k.clone(), f(s))).collect()
    }

    /// Keep only groups whose key passes `keep`, order unchanged.
    pub fn filter(&self, keep: impl Fn(&K) -> bool) -> Self {
        Self {
            groups: self
                .groups
                .iter()
                .filter(|(k, _)| keep(k))
                .map(|(k, s)| (k.clone(), *s))
                .collect(),
        }
    }

    /// Reorder groups by ascending key.
    pub fn sorted(mut self) -> Self
    where
        K: Ord,
    {
        self.groups.sort_keys();
        self
    }
}

impl AggregateTable<(Key, Key)> {
    /// Pivot the second key into series sharing the first key as row axis.
    ///
    /// Rows follow `row_order` when given (restricted to rows that were
    /// observed), otherwise ascending key order. Series are in ascending key
    /// order. Combinations with no group are filled with `T::default()`.
    pub fn unstack<T, F>(&self, row_order: Option<&[Key]>, project: F) -> Grid<T>
    where
        T: Copy + Default,
        F: Fn(&GroupStats) -> T,
    {
        let observed_rows: IndexSet<&Key> = self.groups.keys().map(|(r, _)| r).collect();
        let rows: Vec<Key> = match row_order {
            Some(order) => order
                .iter()
                .filter(|k| observed_rows.contains(k))
                .cloned()
                .collect(),
            None => {
                let mut rows: Vec<Key> = observed_rows.into_iter().cloned().collect();
                rows.sort();
                rows
            }
        };

        let mut columns: Vec<Key> = self
            .groups
            .keys()
            .map(|(_, c)| c)
            .collect::<IndexSet<_>>()
            .into_iter()
            .cloned()
            .collect();
        columns.sort();

        let values = columns
            .iter()
            .map(|column| {
                rows.iter()
                    .map(|row| {
                        self.groups
                            .get(&(row.clone(), column.clone()))
                            .map(&project)
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        Grid {
            rows,
            columns,
            values,
        }
    }
}

/// Dense two-key table: `values[series][row]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    pub rows: Vec<Key>,
    pub columns: Vec<Key>,
    pub values: Vec<Vec<T>>,
}

impl<T: Copy + Default + Add<Output = T>> Grid<T> {
    /// Sum across series for every row.
    pub fn row_totals(&self) -> Vec<T> {
        (0..self.rows.len())
            .map(|r| {
                self.values
                    .iter()
                    .fold(T::default(), |acc, series| acc + series[r])
            })
            .collect()
    }
}

impl<T> Grid<T> {
    pub fn map<U>(self, f: impl Fn(T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            columns: self.columns,
            values: self
                .values
                .into_iter()
                .map(|series| series.into_iter().map(&f).collect())
                .collect(),
        }
    }
}

/// Group by a single key column.
pub fn group_by(dataset: &Dataset, key: &str, metric: Metric) -> EngineResult<AggregateTable<Key>> {
    let idx = dataset.column_index(key)?;
    fold(dataset, metric, |row| row.get(idx).to_key())
}

/// Group by a pair of key columns.
pub fn group_by_pair(
    dataset: &Dataset,
    keys: (&str, &str),
    metric: Metric,
) -> EngineResult<AggregateTable<(Key, Key)>> {
    let first = dataset.column_index(keys.0)?;
    let second = dataset.column_index(keys.1)?;
    fold(dataset, metric, |row| {
        Some((row.get(first).to_key()?, row.get(second).to_key()?))
    })
}

fn fold<K, F>(dataset: &Dataset, metric: Metric, key_of: F) -> EngineResult<AggregateTable<K>>
where
    K: Hash + Eq,
    F: Fn(&Row) -> Option<K>,
{
    let value_idx = match metric {
        Metric::Count => None,
        Metric::Mean(column) | Metric::Sum(column) => Some(dataset.column_index(column)?),
    };

    let mut groups: IndexMap<K, GroupStats> = IndexMap::new();
    for row in dataset.rows() {
        let Some(key) = key_of(row) else {
            continue;
        };
        let value = match value_idx {
            None => 0.0,
            Some(idx) => match row.get(idx).as_number() {
                Some(v) => v,
                None => continue,
            },
        };
        groups.entry(key).or_default().add(value);
    }

    Ok(AggregateTable { groups })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DatasetKind;
    use crate::parser::parse_str;

    fn games() -> Dataset {
        let csv = "Name,Platform,Year,Genre,Global_Sales\n\
                   A,Wii,2006,Sports,82.7\n\
                   B,NES,1985,Platform,40.2\n\
                   C,Wii,2008,Racing,35.8\n\
                   D,X360,2006,,\n\
                   E,Wii,2006,Sports,3.5\n";
        parse_str(DatasetKind::Games, csv, b',').unwrap()
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let table = group_by(&games(), "Platform", Metric::Count).unwrap();
        let keys: Vec<_> = table.keys().cloned().collect();
        assert_eq!(keys, vec![Key::from("Wii"), Key::from("NES"), Key::from("X360")]);
        assert_eq!(table.get(&Key::from("Wii")).unwrap().count, 3);
    }

    #[test]
    fn test_missing_key_rows_are_skipped() {
        let table = group_by(&games(), "Genre", Metric::Count).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.counts().values().sum::<u64>(), 4);
    }

    #[test]
    fn test_group_without_values_is_not_emitted() {
        let table = group_by(&games(), "Platform", Metric::Mean("Global_Sales")).unwrap();
        assert!(table.get(&Key::from("X360")).is_none());
        let wii = table.get(&Key::from("Wii")).unwrap();
        assert_eq!(wii.count, 3);
        assert!((wii.mean() - (82.7 + 35.8 + 3.5) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_sum_metric() {
        let sums = group_by(&games(), "Platform", Metric::Sum("Global_Sales"))
            .unwrap()
            .sums();
        assert!((sums[&Key::from("Wii")] - 122.0).abs() < 1e-9);
    }

    #[test]
    fn test_unstack_zero_fills_dense_grid() {
        let table = group_by_pair(&games(), ("Year", "Platform"), Metric::Count).unwrap();
        let grid = table.unstack(None, |s| s.count);

        assert_eq!(
            grid.rows,
            vec![Key::number(1985.0), Key::number(2006.0), Key::number(2008.0)]
        );
        assert_eq!(
            grid.columns,
            vec![Key::from("NES"), Key::from("Wii"), Key::from("X360")]
        );
        assert_eq!(grid.values, vec![vec![1, 0, 0], vec![0, 2, 1], vec![0, 1, 0]]);
        assert_eq!(grid.row_totals(), vec![1, 3, 1]);
    }

    #[test]
    fn test_unstack_with_row_order_keeps_observed_only() {
        let table = group_by_pair(&games(), ("Platform", "Year"), Metric::Count).unwrap();
        let order = [Key::from("X360"), Key::from("GB"), Key::from("Wii")];
        let grid = table.unstack(Some(&order), |s| s.count);
        assert_eq!(grid.rows, vec![Key::from("X360"), Key::from("Wii")]);
    }

    #[test]
    fn test_empty_dataset_gives_empty_table() {
        let ds = games().with_rows(Vec::new());
        let table = group_by_pair(&ds, ("Year", "Platform"), Metric::Count).unwrap();
        assert!(table.is_empty());
        let grid = table.unstack(None, |s| s.count);
        assert!(grid.rows.is_empty());
        assert!(grid.values.is_empty());
        assert!(grid.row_totals().is_empty());
    }

    #[test]
    fn test_unknown_key_column_is_error() {
        assert!(group_by(&games(), "Studio", Metric::Count).is_err());
        assert!(group_by(&games(), "Platform", Metric::Mean("Score")).is_err());
    }
}
