//! Video game catalog views.

use crate::error::EngineResult;
use crate::models::Dataset;
use crate::transform::{clean, group_by, group_by_pair, rank, round2, Metric, RankBy};

use super::shared::{whole_numbers, year_counts, GENRE, YEAR};
use super::types::{GenreYearTrend, LabeledCounts, PlatformTrend};

const PLATFORM: &str = "Platform";
const PUBLISHER: &str = "Publisher";
const GLOBAL_SALES: &str = "Global_Sales";

const TOP_PLATFORMS: usize = 25;
const TOP_GENRES: usize = 20;
const TOP_PUBLISHERS: usize = 10;

/// Yearly global sales of the best-selling platforms.
///
/// A platform with no sales in a year gets 0 for that year.
pub fn platform_sales_trend(games: &Dataset) -> EngineResult<PlatformTrend> {
    let rows = whole_numbers(&clean(games, &[YEAR, PLATFORM, GLOBAL_SALES])?, YEAR)?;
    let top = rank(
        &group_by(&rows, PLATFORM, Metric::Sum(GLOBAL_SALES))?,
        RankBy::Sum,
        TOP_PLATFORMS,
    );

    let grid = group_by_pair(&rows, (YEAR, PLATFORM), Metric::Sum(GLOBAL_SALES))?
        .filter(|(_, platform)| top.contains(platform))
        .unstack(None, |s| s.sum)
        .map(round2);

    Ok(PlatformTrend {
        years: grid.rows,
        platforms: grid.columns,
        data: grid.values,
    })
}

/// Yearly title counts of the most common genres.
pub fn genre_trend(games: &Dataset) -> EngineResult<GenreYearTrend> {
    let rows = whole_numbers(&clean(games, &[YEAR, GENRE])?, YEAR)?;
    let top = rank(
        &group_by(&rows, GENRE, Metric::Count)?,
        RankBy::Count,
        TOP_GENRES,
    );

    let grid = group_by_pair(&rows, (YEAR, GENRE), Metric::Count)?
        .filter(|(_, genre)| top.contains(genre))
        .unstack(None, |s| s.count);

    Ok(GenreYearTrend {
        years: grid.rows,
        genres: grid.columns,
        data: grid.values,
    })
}

/// Publishers with the most titles.
pub fn publisher_distribution(games: &Dataset) -> EngineResult<LabeledCounts> {
    let rows = clean(games, &[PUBLISHER])?;
    let table = group_by(&rows, PUBLISHER, Metric::Count)?;
    let labels = rank(&table, RankBy::Count, TOP_PUBLISHERS);
    let data = labels
        .iter()
        .filter_map(|label| table.get(label).map(|s| s.count))
        .collect();
    Ok(LabeledCounts { labels, data })
}

/// Games released per year.
pub fn year_distribution(games: &Dataset) -> EngineResult<LabeledCounts> {
    let (labels, data) = year_counts(games)?.into_iter().unzip();
    Ok(LabeledCounts { labels, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DatasetKind;
    use crate::models::Key;
    use crate::parser::parse_str;
    use serde_json::json;

    fn games() -> Dataset {
        let csv = "Rank,Name,Platform,Year,Genre,Publisher,Global_Sales\n\
                   1,Wii Sports,Wii,2006,Sports,Nintendo,82.74\n\
                   2,Super Mario Bros.,NES,1985,Platform,Nintendo,40.24\n\
                   3,Mario Kart Wii,Wii,2008,Racing,Nintendo,35.82\n\
                   4,Halo 3,X360,2007,Shooter,Microsoft,8.13\n\
                   5,Gears,X360,2006,Shooter,Microsoft,5.01\n\
                   6,Lost Title,PS2,N/A,Action,,1.0\n\
                   7,Obscure,PS2,2006,Action,Unknown,\n";
        parse_str(DatasetKind::Games, csv, b',').unwrap()
    }

    #[test]
    fn test_platform_sales_trend_zero_fills() {
        let out = platform_sales_trend(&games()).unwrap();
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({
                "years": [1985, 2006, 2007, 2008],
                "platforms": ["NES", "Wii", "X360"],
                "data": [
                    [40.24, 0.0, 0.0, 0.0],
                    [0.0, 82.74, 0.0, 35.82],
                    [0.0, 5.01, 8.13, 0.0]
                ]
            })
        );
    }

    #[test]
    fn test_genre_trend_counts() {
        let out = genre_trend(&games()).unwrap();
        assert_eq!(
            out.genres,
            vec![
                Key::from("Action"),
                Key::from("Platform"),
                Key::from("Racing"),
                Key::from("Shooter"),
                Key::from("Sports"),
            ]
        );
        let shooter = &out.data[3];
        assert_eq!(shooter, &vec![0, 1, 1, 0]);
        for series in &out.data {
            assert_eq!(series.len(), out.years.len());
        }
    }

    #[test]
    fn test_publisher_distribution() {
        let out = publisher_distribution(&games()).unwrap();
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({"labels": ["Nintendo", "Microsoft", "Unknown"], "data": [3, 2, 1]})
        );
    }

    #[test]
    fn test_year_distribution_skips_unknown_years() {
        let out = year_distribution(&games()).unwrap();
        assert_eq!(out.data.iter().sum::<u64>(), 6);
        assert_eq!(out.labels.first(), Some(&Key::number(1985.0)));
    }
}
