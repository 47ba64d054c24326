//! Anime catalog views.

use crate::error::EngineResult;
use crate::models::{Dataset, Key};
use crate::transform::shaper::TYPE_STACK;
use crate::transform::{
    bin_column, clean, grid_series, group_by, group_by_pair, rank, round2, total_line, Axis,
    BinSpec, Metric, RankBy,
};

use super::shared::{genre_rows, GENRE};
use super::types::{BinnedDistribution, GenreRatings, StackedCategories};

const EPISODES: &str = "Episodes";
const TYPE: &str = "Type";
const RATING: &str = "Rating";
const EPISODE_BIN: &str = "Episode Bin";

pub const EPISODE_EDGES: [f64; 8] = [0.0, 12.0, 24.0, 50.0, 100.0, 200.0, 500.0, 10000.0];
pub const EPISODE_LABELS: [&str; 7] = ["<12", "12-24", "25-50", "51-100", "101-200", "201-500", ">500"];

const TOP_RATED_GENRES: usize = 25;
const TOP_STACKED_GENRES: usize = 25;

pub fn episode_bins() -> EngineResult<BinSpec> {
    BinSpec::new(EPISODE_EDGES.to_vec(), EPISODE_LABELS.to_vec())
}

/// Titles per episode-count bin, split by type, with a total line.
///
/// Only bins that hold at least one title appear, in bin order.
pub fn episode_type_distribution(anime: &Dataset) -> EngineResult<BinnedDistribution> {
    let spec = episode_bins()?;
    let cleaned = clean(anime, &[EPISODES, TYPE])?;
    let binned = bin_column(&cleaned, EPISODES, &spec, EPISODE_BIN)?;

    let bin_order: Vec<Key> = spec.labels().iter().map(|l| Key::from(l.as_str())).collect();
    let grid = group_by_pair(&binned, (EPISODE_BIN, TYPE), Metric::Count)?
        .unstack(Some(&bin_order), |s| s.count);

    let mut datasets = grid_series(&grid, Axis::Primary, None);
    datasets.push(total_line(grid.row_totals()));

    Ok(BinnedDistribution {
        bins: grid.rows,
        datasets,
    })
}

/// The best-rated genres by mean rating.
pub fn top_genre_ratings(anime: &Dataset) -> EngineResult<GenreRatings> {
    let rows = genre_rows(anime, &[RATING])?;
    let table = group_by(&rows, GENRE, Metric::Mean(RATING))?;
    let genres = rank(&table, RankBy::Mean, TOP_RATED_GENRES);

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

/// Most frequent genres as stacked bars per type, with a total line.
pub fn genre_type_distribution(anime: &Dataset) -> EngineResult<StackedCategories> {
    let rows = genre_rows(anime, &[TYPE])?;
    let top = rank(
        &group_by(&rows, GENRE, Metric::Count)?,
        RankBy::Count,
        TOP_STACKED_GENRES,
    );

    let grid = group_by_pair(&rows, (GENRE, TYPE), Metric::Count)?
        .filter(|(genre, _)| top.contains(genre))
        .unstack(Some(&top), |s| s.count);

    let mut datasets = grid_series(&grid, Axis::Primary, Some(TYPE_STACK));
    datasets.push(total_line(grid.row_totals()).solid("black"));

    Ok(StackedCategories {
        genres: grid.rows,
        datasets,
    })
}
