//! Read-only views over the catalog: search, then filter, then sort.

use std::fmt;
use std::str::FromStr;

use movie_catalog_models::Movie;

use crate::store::MovieId;

#[cfg(test)]
mod tests;

/// Which records to keep after searching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    Watched,
    Favorite,
    Watchlist,
}

impl FilterMode {
    fn keeps(self, movie: &Movie) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Watched => movie.watched,
            FilterMode::Favorite => movie.favorite,
            FilterMode::Watchlist => movie.watchlist,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterMode::All => "All",
            FilterMode::Watched => "Watched",
            FilterMode::Favorite => "Favorite",
            FilterMode::Watchlist => "Watchlist",
        };
        f.write_str(name)
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "watched" => Ok(FilterMode::Watched),
            "favorite" | "favourite" => Ok(FilterMode::Favorite),
            "watchlist" => Ok(FilterMode::Watchlist),
            _ => Err(format!(
                "Invalid filter: {}. Use 'all', 'watched', 'favorite', or 'watchlist'",
                s
            )),
        }
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Ascending, case-insensitive
    #[default]
    Title,
    /// Descending by the year text; an empty year counts as "0"
    Year,
    /// Highest rating first
    Rating,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortMode::Title => "Title",
            SortMode::Year => "Year",
            SortMode::Rating => "Rating",
        };
        f.write_str(name)
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SortMode::Title),
            "year" => Ok(SortMode::Year),
            "rating" => Ok(SortMode::Rating),
            _ => Err(format!("Invalid sort: {}. Use 'title', 'year', or 'rating'", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub filter: FilterMode,
    pub sort: SortMode,
}

impl Query {
    pub fn new(search: impl Into<String>, filter: FilterMode, sort: SortMode) -> Self {
        Self {
            search: search.into(),
            filter,
            sort,
        }
    }
}

/// Apply `query` to `records`, returning a new list.
///
/// Sorting is stable, so ties keep their catalog order.
pub fn run<'a>(
    records: impl Iterator<Item = (MovieId, &'a Movie)>,
    query: &Query,
) -> Vec<(MovieId, &'a Movie)> {
    let needle = query.search.trim().to_lowercase();

    let mut items: Vec<(MovieId, &'a Movie)> = records
        .filter(|(_, movie)| movie.matches_search(&needle))
        .filter(|(_, movie)| query.filter.keeps(movie))
        .collect();

    match query.sort {
        SortMode::Title => items.sort_by_key(|(_, movie)| movie.title.to_lowercase()),
        SortMode::Year => items.sort_by(|(_, a), (_, b)| year_key(b).cmp(year_key(a))),
        SortMode::Rating => items.sort_by(|(_, a), (_, b)| b.rating.total_cmp(&a.rating)),
    }

    items
}

fn year_key(movie: &Movie) -> &str {
    if movie.year.is_empty() {
        "0"
    } else {
        &movie.year
    }
}
