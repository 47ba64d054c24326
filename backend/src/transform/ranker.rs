//! Top-K selection with stable tie-breaking.

use std::cmp::Ordering;

use crate::models::Key;

use super::grouper::AggregateTable;

/// Which metric of a group to rank by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    Count,
    Mean,
    Sum,
}

/// The `k` entries with the largest metric, descending.
///
/// The sort is stable: equal metrics keep the order the entries came in
/// (first-seen order for aggregate tables), never alphabetical.
pub fn top_k<K, M, I>(entries: I, k: usize) -> Vec<(K, M)>
where
    I: IntoIterator<Item = (K, M)>,
    M: PartialOrd,
{
    let mut ranked: Vec<(K, M)> = entries.into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(k);
    ranked
}

/// Top `k` keys of a single-key table by the chosen metric.
pub fn rank(table: &AggregateTable<Key>, by: RankBy, k: usize) -> Vec<Key> {
    let entries = table.iter().map(|(key, stats)| {
        let metric = match by {
            RankBy::Count => stats.count as f64,
            RankBy::Mean => stats.mean(),
            RankBy::Sum => stats.sum,
        };
        (key.clone(), metric)
    });
    top_k(entries, k).into_iter().map(|(key, _)| key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DatasetKind;
    use crate::parser::parse_str;
    use crate::transform::grouper::{group_by, Metric};

    #[test]
    fn test_descending_and_bounded() {
        let ranked = top_k(vec![("a", 1), ("b", 5), ("c", 3), ("d", 4)], 3);
        assert_eq!(ranked, vec![("b", 5), ("d", 4), ("c", 3)]);
        assert!(top_k(vec![("a", 1)], 10).len() <= 10);
        assert!(top_k(Vec::<(&str, u64)>::new(), 5).is_empty());
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let csv = "Name,Publisher\nA,Zeta\nB,Alpha\nC,Zeta\nD,Alpha\nE,Mid\n";
        let ds = parse_str(DatasetKind::Games, csv, b',').unwrap();
        let table = group_by(&ds, "Publisher", Metric::Count).unwrap();

        for _ in 0..5 {
            let ranked = rank(&table, RankBy::Count, 10);
            assert_eq!(
                ranked,
                vec![Key::from("Zeta"), Key::from("Alpha"), Key::from("Mid")]
            );
        }
    }

    #[test]
    fn test_rank_by_mean() {
        let csv = "Title,Genre,Rating\nA,Drama,6\nB,Comedy,9\nC,Drama,8\n";
        let ds = parse_str(DatasetKind::Anime, csv, b',').unwrap();
        let table = group_by(&ds, "Genre", Metric::Mean("Rating")).unwrap();
        assert_eq!(
            rank(&table, RankBy::Mean, 1),
            vec![Key::from("Comedy")]
        );
    }
}
