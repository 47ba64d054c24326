//! Process configuration.
//!
//! The only inputs are the locations of the three CSV files (and, for the
//! server, the static front end directory). Each setting is a CLI flag with
//! an environment fallback; `.env` is read at startup via `dotenvy`.

use std::path::PathBuf;

use clap::Args;

/// Default file names used by the bundled front end.
pub const DEFAULT_ANIME_CSV: &str = "cleaned_anime.csv";
pub const DEFAULT_MOVIES_CSV: &str = "cleaned_imdb_movies.csv";
pub const DEFAULT_GAMES_CSV: &str = "cleaned_vgsales.csv";

/// Locations of the three input datasets.
#[derive(Debug, Clone, Args)]
pub struct DataPaths {
    /// Anime catalog CSV
    #[arg(long = "anime", env = "MEDIATRENDS_ANIME_CSV", default_value = DEFAULT_ANIME_CSV)]
    pub anime: PathBuf,

    /// Movie catalog CSV
    #[arg(long = "movies", env = "MEDIATRENDS_MOVIES_CSV", default_value = DEFAULT_MOVIES_CSV)]
    pub movies: PathBuf,

    /// Video game sales CSV
    #[arg(long = "games", env = "MEDIATRENDS_GAMES_CSV", default_value = DEFAULT_GAMES_CSV)]
    pub games: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            anime: PathBuf::from(DEFAULT_ANIME_CSV),
            movies: PathBuf::from(DEFAULT_MOVIES_CSV),
            games: PathBuf::from(DEFAULT_GAMES_CSV),
        }
    }
}

/// Settings for `serve`.
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Port to listen on
    #[arg(short, long, env = "MEDIATRENDS_PORT", default_value = "5000")]
    pub port: u16,

    /// Directory holding index.html and the chart scripts
    #[arg(long, env = "MEDIATRENDS_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let paths = DataPaths::default();
        assert_eq!(paths.anime, PathBuf::from("cleaned_anime.csv"));
        assert_eq!(paths.movies, PathBuf::from("cleaned_imdb_movies.csv"));
        assert_eq!(paths.games, PathBuf::from("cleaned_vgsales.csv"));
    }
}
