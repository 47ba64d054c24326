//! The fixed set of chart views and the engine that serves them.
//!
//! Each view is a pure function of the catalog. The [`Engine`] owns the
//! catalog plus the [`ViewCache`] of views that are computed once up front.

pub mod anime;
pub mod combined;
pub mod game;
pub mod movie;
pub mod shared;
pub mod types;

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::cache::ViewCache;
use crate::catalog::{Catalog, DatasetKind};
use crate::error::{EngineError, EngineResult};

pub use types::ViewOutput;

/// Every view the engine can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    AnimeEpisodeTypeDistribution,
    AnimeTopGenreRatings,
    AnimeGenreTypeDistribution,
    MovieGenreTrend,
    MovieGenreAvgRating,
    MovieYearDistribution,
    GamePlatformSalesTrend,
    GameGenreTrend,
    GamePublisherDistribution,
    GameYearDistribution,
    CombinedRatingDistribution,
    CombinedTitlesByYear,
    CombinedAvgRatingByGenre,
    CombinedGenreDistribution,
}

impl View {
    pub const ALL: [View; 14] = [
        View::AnimeEpisodeTypeDistribution,
        View::AnimeTopGenreRatings,
        View::AnimeGenreTypeDistribution,
        View::MovieGenreTrend,
        View::MovieGenreAvgRating,
        View::MovieYearDistribution,
        View::GamePlatformSalesTrend,
        View::GameGenreTrend,
        View::GamePublisherDistribution,
        View::GameYearDistribution,
        View::CombinedRatingDistribution,
        View::CombinedTitlesByYear,
        View::CombinedAvgRatingByGenre,
        View::CombinedGenreDistribution,
    ];

    /// HTTP route the view is served on.
    pub fn path(&self) -> &'static str {
        match self {
            View::AnimeEpisodeTypeDistribution => "/api/anime/episode_type_distribution",
            View::AnimeTopGenreRatings => "/api/anime/top25_genre_ratings",
            View::AnimeGenreTypeDistribution => "/api/anime/genre_type_distribution",
            View::MovieGenreTrend => "/api/movie/genre-trend",
            View::MovieGenreAvgRating => "/api/movie/genre_avg_rating",
            View::MovieYearDistribution => "/api/movie/year_distribution",
            View::GamePlatformSalesTrend => "/api/game/platform_sales_trend",
            View::GameGenreTrend => "/api/game/genre_trend",
            View::GamePublisherDistribution => "/api/game/publisher_distribution",
            View::GameYearDistribution => "/api/game/year_distribution",
            View::CombinedRatingDistribution => "/api/combined/rating_distribution",
            View::CombinedTitlesByYear => "/api/combined/titles_by_year",
            View::CombinedAvgRatingByGenre => "/api/combined/avg_rating_by_genre",
            View::CombinedGenreDistribution => "/api/combined/genre_distribution",
        }
    }

    /// Short name used on the command line, e.g. `movie/genre-trend`.
    pub fn name(&self) -> &'static str {
        self.path().trim_start_matches("/api/")
    }

    /// Whether the engine computes this view once at construction.
    pub fn is_precomputed(&self) -> bool {
        matches!(self, View::MovieGenreTrend)
    }

    /// Datasets the view reads.
    pub fn sources(&self) -> &'static [DatasetKind] {
        match self {
            View::AnimeEpisodeTypeDistribution
            | View::AnimeTopGenreRatings
            | View::AnimeGenreTypeDistribution => &[DatasetKind::Anime],
            View::MovieGenreTrend | View::MovieGenreAvgRating | View::MovieYearDistribution => {
                &[DatasetKind::Movies]
            }
            View::GamePlatformSalesTrend
            | View::GameGenreTrend
            | View::GamePublisherDistribution
            | View::GameYearDistribution => &[DatasetKind::Games],
            View::CombinedRatingDistribution | View::CombinedAvgRatingByGenre => {
                &[DatasetKind::Anime, DatasetKind::Movies]
            }
            View::CombinedTitlesByYear => &[DatasetKind::Movies, DatasetKind::Games],
            View::CombinedGenreDistribution => {
                &[DatasetKind::Anime, DatasetKind::Movies, DatasetKind::Games]
            }
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for View {
    type Err = EngineError;

    /// Accepts the short name or the full route path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches("/api/");
        View::ALL
            .into_iter()
            .find(|view| view.name() == name)
            .ok_or_else(|| EngineError::UnknownView(s.to_string()))
    }
}

/// Run one view against the catalog.
pub fn compute(catalog: &Catalog, view: View) -> EngineResult<ViewOutput> {
    let anime = catalog.get(DatasetKind::Anime);
    let movies = catalog.get(DatasetKind::Movies);
    let games = catalog.get(DatasetKind::Games);

    let output = match view {
        View::AnimeEpisodeTypeDistribution => {
            ViewOutput::Binned(anime::episode_type_distribution(anime)?)
        }
        View::AnimeTopGenreRatings => ViewOutput::GenreRatings(anime::top_genre_ratings(anime)?),
        View::AnimeGenreTypeDistribution => {
            ViewOutput::Stacked(anime::genre_type_distribution(anime)?)
        }
        View::MovieGenreTrend => ViewOutput::GenreTrend(movie::genre_trend(movies)?),
        View::MovieGenreAvgRating => ViewOutput::GenreRatings(movie::genre_avg_rating(movies)?),
        View::MovieYearDistribution => ViewOutput::Labeled(movie::year_distribution(movies)?),
        View::GamePlatformSalesTrend => {
            ViewOutput::PlatformTrend(game::platform_sales_trend(games)?)
        }
        View::GameGenreTrend => ViewOutput::GenreYearTrend(game::genre_trend(games)?),
        View::GamePublisherDistribution => {
            ViewOutput::Labeled(game::publisher_distribution(games)?)
        }
        View::GameYearDistribution => ViewOutput::Labeled(game::year_distribution(games)?),
        View::CombinedRatingDistribution => {
            ViewOutput::RatingDistribution(combined::rating_distribution(anime, movies)?)
        }
        View::CombinedTitlesByYear => {
            ViewOutput::TitlesByYear(combined::titles_by_year(movies, games)?)
        }
        View::CombinedAvgRatingByGenre => {
            ViewOutput::GenreRatingComparison(combined::avg_rating_by_genre(anime, movies)?)
        }
        View::CombinedGenreDistribution => {
            ViewOutput::GenreDistribution(combined::genre_distribution(anime, movies, games)?)
        }
    };
    Ok(output)
}

/// Read-only view engine shared by every request.
pub struct Engine {
    catalog: Catalog,
    cache: ViewCache,
}

impl Engine {
    /// Build the engine and compute the precomputed views.
    pub fn new(catalog: Catalog) -> Self {
        let cache = ViewCache::warm(&catalog);
        Self { catalog, cache }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Output of `view`, from the cache when it is precomputed.
    pub fn render(&self, view: View) -> EngineResult<ViewOutput> {
        let outcome = match self.cache.get(view) {
            Some(cached) => cached.clone(),
            None => compute(&self.catalog, view),
        };
        if let Err(e) = &outcome {
            warn!(view = view.name(), error = %e, "view failed");
        }
        outcome
    }
}
