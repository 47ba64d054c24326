//! JSON shapes returned by the views.
//!
//! Field names are the ones the chart front end reads; they are part of the
//! external interface.

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::Key;
use crate::transform::Series;

/// Histogram bins with one bar series per category plus a total line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinnedDistribution {
    pub bins: Vec<Key>,
    pub datasets: Vec<Series<u64>>,
}

/// Ranked genres with their mean rating and title count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreRatings {
    pub genres: Vec<Key>,
    pub ratings: Vec<f64>,
    pub counts: Vec<u64>,
}

/// Stacked bars per genre and subtype, with a total line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedCategories {
    pub genres: Vec<Key>,
    pub datasets: Vec<Series<u64>>,
}

/// Yearly points for one genre.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoints {
    pub years: Vec<Key>,
    pub counts: Vec<u64>,
    pub ratings: Vec<f64>,
}

/// Genre label → yearly trend, in rank order.
pub type GenreTrend = IndexMap<String, TrendPoints>;

/// Simple labeled frequency list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledCounts {
    pub labels: Vec<Key>,
    pub data: Vec<u64>,
}

/// Sales per platform over years; `data[i]` belongs to `platforms[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformTrend {
    pub years: Vec<Key>,
    pub platforms: Vec<Key>,
    pub data: Vec<Vec<f64>>,
}

/// Title counts per genre over years; `data[i]` belongs to `genres[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreYearTrend {
    pub years: Vec<Key>,
    pub genres: Vec<Key>,
    pub data: Vec<Vec<u64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingDistribution {
    pub labels: Vec<String>,
    pub anime: Vec<u64>,
    pub movie: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitlesByYear {
    pub labels: Vec<Key>,
    pub movies: Vec<u64>,
    pub games: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreRatingComparison {
    pub labels: Vec<Key>,
    pub anime_data: Vec<f64>,
    pub movie_data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreDistribution {
    pub labels: Vec<Key>,
    pub anime_data: Vec<u64>,
    pub movie_data: Vec<u64>,
    pub game_data: Vec<u64>,
}

/// Output of any view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewOutput {
    Binned(BinnedDistribution),
    GenreRatings(GenreRatings),
    Stacked(StackedCategories),
    GenreTrend(GenreTrend),
    Labeled(LabeledCounts),
    PlatformTrend(PlatformTrend),
    GenreYearTrend(GenreYearTrend),
    RatingDistribution(RatingDistribution),
    TitlesByYear(TitlesByYear),
    GenreRatingComparison(GenreRatingComparison),
    GenreDistribution(GenreDistribution),
}
