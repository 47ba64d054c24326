//! Movie catalog views.

use indexmap::IndexMap;

use crate::error::EngineResult;
use crate::models::{Dataset, Key};
use crate::transform::{group_by, group_by_pair, rank, round2, top_k, GroupStats, Metric, RankBy};

use super::shared::{genre_rows, whole_numbers, year_counts, GENRE, YEAR};
use super::types::{GenreRatings, GenreTrend, LabeledCounts, TrendPoints};

const IMDB: &str = "IMDb";

const TREND_GENRES: usize = 15;
const TOP_GENRES: usize = 25;

/// Per-genre yearly title counts and mean rating for the most common
/// genres. Years ascend within each genre; genres are in rank order.
///
/// The engine computes this once at startup and serves the cached result.
pub fn genre_trend(movies: &Dataset) -> EngineResult<GenreTrend> {
    let rows = whole_numbers(&genre_rows(movies, &[IMDB, YEAR])?, YEAR)?;
    let table = group_by_pair(&rows, (GENRE, YEAR), Metric::Mean(IMDB))?;

    let mut totals: IndexMap<Key, u64> = IndexMap::new();
    for ((genre, _), stats) in table.iter() {
        *totals.entry(genre.clone()).or_default() += stats.count;
    }

    let mut trend = GenreTrend::new();
    for (genre, _) in top_k(totals, TREND_GENRES) {
        let mut points: Vec<(&Key, &GroupStats)> = table
            .iter()
            .filter(|((g, _), _)| *g == genre)
            .map(|((_, year), stats)| (year, stats))
            .collect();
        points.sort_by(|a, b| a.0.cmp(b.0));

        trend.insert(
            genre.to_string(),
            TrendPoints {
                years: points.iter().map(|(year, _)| (*year).clone()).collect(),
                counts: points.iter().map(|(_, s)| s.count).collect(),
                ratings: points.iter().map(|(_, s)| round2(s.mean())).collect(),
            },
        );
    }
    Ok(trend)
}

/// Most common genres with their title count and mean rating.
pub fn genre_avg_rating(movies: &Dataset) -> EngineResult<GenreRatings> {
    let rows = genre_rows(movies, &[IMDB])?;
    let table = group_by(&rows, GENRE, Metric::Mean(IMDB))?;
    let genres = rank(&table, RankBy::Count, TOP_GENRES);

    let mut ratings = Vec::with_capacity(genres.len());
    let mut counts = Vec::with_capacity(genres.len());
    for genre in &genres {
        if let Some(stats) = table.get(genre) {
            ratings.push(round2(stats.mean()));
            counts.push(stats.count);
        }
    }

    Ok(GenreRatings {
        genres,
        ratings,
        counts,
    })
}

/// Movies released per year.
pub fn year_distribution(movies: &Dataset) -> EngineResult<LabeledCounts> {
    let (labels, data) = year_counts(movies)?.into_iter().unzip();
    Ok(LabeledCounts { labels, data })
}
