//! The three source datasets and their declared schemas.

use std::fmt;
use std::path::Path;

use tracing::info;

use crate::config::DataPaths;
use crate::error::DatasetResult;
use crate::models::{ColumnType, Dataset};
use crate::parser::load_file;

/// Which catalog a dataset comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Anime,
    Movies,
    Games,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 3] = [DatasetKind::Anime, DatasetKind::Movies, DatasetKind::Games];

    pub fn name(&self) -> &'static str {
        match self {
            DatasetKind::Anime => "anime",
            DatasetKind::Movies => "movies",
            DatasetKind::Games => "games",
        }
    }

    /// Columns whose type is known up front. Anything else in the file is
    /// loaded as a plain categorical column.
    pub fn declared_columns(&self) -> &'static [(&'static str, ColumnType)] {
        match self {
            DatasetKind::Anime => &[
                ("Title", ColumnType::Identifier),
                ("Genre", ColumnType::MultiCategorical),
                ("Type", ColumnType::Categorical),
                ("Rating", ColumnType::Rating),
                ("Episodes", ColumnType::Numeric),
            ],
            DatasetKind::Movies => &[
                ("Title", ColumnType::Identifier),
                ("Genre", ColumnType::MultiCategorical),
                ("IMDb", ColumnType::Rating),
                ("Year", ColumnType::Numeric),
            ],
            DatasetKind::Games => &[
                ("Rank", ColumnType::Numeric),
                ("Name", ColumnType::Identifier),
                ("Platform", ColumnType::Categorical),
                ("Year", ColumnType::Numeric),
                ("Genre", ColumnType::Categorical),
                ("Publisher", ColumnType::Categorical),
                ("NA_Sales", ColumnType::Numeric),
                ("EU_Sales", ColumnType::Numeric),
                ("JP_Sales", ColumnType::Numeric),
                ("Other_Sales", ColumnType::Numeric),
                ("Global_Sales", ColumnType::Numeric),
            ],
        }
    }

    pub fn column_type(&self, column: &str) -> ColumnType {
        self.declared_columns()
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, kind)| *kind)
            .unwrap_or(ColumnType::Categorical)
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// All three datasets, loaded once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub anime: Dataset,
    pub movies: Dataset,
    pub games: Dataset,
}

impl Catalog {
    pub fn new(anime: Dataset, movies: Dataset, games: Dataset) -> Self {
        Self {
            anime,
            movies,
            games,
        }
    }

    /// Load every dataset from disk.
    pub fn load(paths: &DataPaths) -> DatasetResult<Self> {
        let anime = load_logged(DatasetKind::Anime, &paths.anime)?;
        let movies = load_logged(DatasetKind::Movies, &paths.movies)?;
        let games = load_logged(DatasetKind::Games, &paths.games)?;
        Ok(Self::new(anime, movies, games))
    }

    pub fn get(&self, kind: DatasetKind) -> &Dataset {
        match kind {
            DatasetKind::Anime => &self.anime,
            DatasetKind::Movies => &self.movies,
            DatasetKind::Games => &self.games,
        }
    }
}

fn load_logged(kind: DatasetKind, path: &Path) -> DatasetResult<Dataset> {
    let dataset = load_file(kind, path)?;
    info!(
        dataset = %kind,
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.schema().len(),
        "loaded dataset"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undeclared_columns_are_categorical() {
        assert_eq!(DatasetKind::Anime.column_type("Studio"), ColumnType::Categorical);
        assert_eq!(DatasetKind::Movies.column_type("IMDb"), ColumnType::Rating);
        assert_eq!(DatasetKind::Games.column_type("Global_Sales"), ColumnType::Numeric);
    }
}
