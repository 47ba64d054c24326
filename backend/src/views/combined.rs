//! Views that line up two or three catalogs on a shared label axis.
//!
//! Each catalog is aggregated on its own; the results only meet in the
//! aligner, where a label one catalog lacks becomes 0 in its sequence.

use indexmap::IndexMap;

use crate::error::EngineResult;
use crate::models::{Dataset, Key};
use crate::transform::{
    align, bin_column, clean, group_by, round_all, top_k, union_counts, union_sorted, BinSpec,
    Metric,
};

use super::shared::{genre_rows, year_counts, GENRE};
use super::types::{GenreDistribution, GenreRatingComparison, RatingDistribution, TitlesByYear};

const ANIME_RATING: &str = "Rating";
const MOVIE_RATING: &str = "IMDb";
const RATING_BIN: &str = "Rating Bin";

const TOP_RATED_GENRES: usize = 15;
const TOP_GENRES: usize = 30;

/// Unit-wide rating bins `1-2` through `9-10`.
pub fn rating_bins() -> EngineResult<BinSpec> {
    let edges: Vec<f64> = (1..=10).map(f64::from).collect();
    let labels: Vec<String> = (1..10).map(|lo| format!("{}-{}", lo, lo + 1)).collect();
    BinSpec::new(edges, labels)
}

fn rating_histogram(dataset: &Dataset, column: &str, spec: &BinSpec) -> EngineResult<IndexMap<Key, u64>> {
    let binned = bin_column(&clean(dataset, &[column])?, column, spec, RATING_BIN)?;
    Ok(group_by(&binned, RATING_BIN, Metric::Count)?.counts())
}

/// Anime and movie ratings over the same bins. Every bin is listed, empty
/// ones with 0.
pub fn rating_distribution(anime: &Dataset, movies: &Dataset) -> EngineResult<RatingDistribution> {
    let spec = rating_bins()?;
    let anime_counts = rating_histogram(anime, ANIME_RATING, &spec)?;
    let movie_counts = rating_histogram(movies, MOVIE_RATING, &spec)?;

    let labels: Vec<Key> = spec.labels().iter().map(|l| Key::from(l.as_str())).collect();
    let mut aligned = align(&[&anime_counts, &movie_counts], &labels).into_iter();

    Ok(RatingDistribution {
        labels: spec.labels().to_vec(),
        anime: aligned.next().unwrap_or_default(),
        movie: aligned.next().unwrap_or_default(),
    })
}

/// Movie and game releases per year over the union of their years.
pub fn titles_by_year(movies: &Dataset, games: &Dataset) -> EngineResult<TitlesByYear> {
    let movie_years = year_counts(movies)?;
    let game_years = year_counts(games)?;

    let labels = union_sorted(&[&movie_years, &game_years]);
    let mut aligned = align(&[&movie_years, &game_years], &labels).into_iter();

    Ok(TitlesByYear {
        labels,
        movies: aligned.next().unwrap_or_default(),
        games: aligned.next().unwrap_or_default(),
    })
}

/// Mean anime and movie rating for the genres most common across both.
///
/// A genre only one catalog has shows 0 for the other.
pub fn avg_rating_by_genre(anime: &Dataset, movies: &Dataset) -> EngineResult<GenreRatingComparison> {
    let anime_table = group_by(&genre_rows(anime, &[ANIME_RATING])?, GENRE, Metric::Mean(ANIME_RATING))?;
    let movie_table = group_by(&genre_rows(movies, &[MOVIE_RATING])?, GENRE, Metric::Mean(MOVIE_RATING))?;

    let totals = union_counts(&[&anime_table.counts(), &movie_table.counts()]);
    let labels: Vec<Key> = top_k(totals, TOP_RATED_GENRES)
        .into_iter()
        .map(|(label, _)| label)
        .collect();

    let mut aligned = align(&[&anime_table.means(), &movie_table.means()], &labels)
        .into_iter()
        .map(round_all);

    Ok(GenreRatingComparison {
        labels,
        anime_data: aligned.next().unwrap_or_default(),
        movie_data: aligned.next().unwrap_or_default(),
    })
}

/// Title counts per genre in all three catalogs for the genres most common
/// overall.
pub fn genre_distribution(
    anime: &Dataset,
    movies: &Dataset,
    games: &Dataset,
) -> EngineResult<GenreDistribution> {
    let mut counts = Vec::with_capacity(3);
    for dataset in [anime, movies, games] {
        counts.push(group_by(&genre_rows(dataset, &[])?, GENRE, Metric::Count)?.counts());
    }
    let tables: Vec<&IndexMap<Key, u64>> = counts.iter().collect();

    let labels: Vec<Key> = top_k(union_counts(&tables), TOP_GENRES)
        .into_iter()
        .map(|(label, _)| label)
        .collect();
    let mut aligned = align(&tables, &labels).into_iter();

    Ok(GenreDistribution {
        labels,
        anime_data: aligned.next().unwrap_or_default(),
        movie_data: aligned.next().unwrap_or_default(),
        game_data: aligned.next().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DatasetKind;
    use crate::parser::parse_str;
    use serde_json::json;

    fn anime() -> Dataset {
        let csv = "Title,Genre,Type,Rating,Episodes\n\
                   A,\"Action, Drama\",TV,0.85,12\n\
                   B,action,TV,0.72,24\n\
                   C,Slice of Life,OVA,0.6,2\n";
        parse_str(DatasetKind::Anime, csv, b',').unwrap()
    }

    fn movies() -> Dataset {
        let csv = "Title,Year,Genre,IMDb\n\
                   M1,2001,Drama,8.1\n\
                   M2,1999,\"Drama, Crime\",6.3\n\
                   M3,2001,Comedy,\n";
        parse_str(DatasetKind::Movies, csv, b',').unwrap()
    }

    fn games() -> Dataset {
        let csv = "Rank,Name,Platform,Year,Genre,Publisher,Global_Sales\n\
                   1,G1,Wii,2006,Action,Nintendo,1.0\n\
                   2,G2,NES,1999,sports,Nintendo,2.0\n";
        parse_str(DatasetKind::Games, csv, b',').unwrap()
    }

    #[test]
    fn test_rating_bins_cover_one_to_ten() {
        let spec = rating_bins().unwrap();
        assert_eq!(spec.labels().len(), 9);
        assert_eq!(spec.labels()[0], "1-2");
        assert_eq!(spec.labels()[8], "9-10");
        assert_eq!(spec.assign(7.0), Some("6-7"));
        assert_eq!(spec.assign(0.5), None);
    }

    #[test]
    fn test_rating_distribution_rescales_and_zero_fills() {
        let out = rating_distribution(&anime(), &movies()).unwrap();
        assert_eq!(out.labels.len(), 9);
        // Anime ratings 8.5, 7.2 and 6.0 after rescale.
        assert_eq!(out.anime, vec![0, 0, 0, 0, 1, 0, 1, 1, 0]);
        assert_eq!(out.movie, vec![0, 0, 0, 0, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_titles_by_year_union() {
        let out = titles_by_year(&movies(), &games()).unwrap();
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({"labels": [1999, 2001, 2006], "movies": [1, 2, 0], "games": [1, 0, 1]})
        );
    }

    #[test]
    fn test_avg_rating_by_genre_aligns_means() {
        let out = avg_rating_by_genre(&anime(), &movies()).unwrap();
        assert_eq!(
            out.labels,
            vec![
                Key::from("Drama"),
                Key::from("Action"),
                Key::from("Slice Of Life"),
                Key::from("Crime"),
            ]
        );
        assert_eq!(out.anime_data, vec![8.5, 7.85, 6.0, 0.0]);
        assert_eq!(out.movie_data, vec![7.2, 0.0, 0.0, 6.3]);
    }

    #[test]
    fn test_genre_distribution_normalizes_game_genres() {
        let out = genre_distribution(&anime(), &movies(), &games()).unwrap();
        let labels: Vec<_> = out.labels.iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            vec!["Action", "Drama", "Slice Of Life", "Crime", "Comedy", "Sports"]
        );
        assert_eq!(out.anime_data, vec![2, 1, 1, 0, 0, 0]);
        assert_eq!(out.movie_data, vec![0, 2, 0, 1, 1, 0]);
        assert_eq!(out.game_data, vec![1, 0, 0, 0, 0, 1]);
    }
}
