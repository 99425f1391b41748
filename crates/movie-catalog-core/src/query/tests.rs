use super::*;

fn movie(title: &str, year: &str, rating: f64) -> Movie {
    let mut movie = Movie::new(title);
    movie.year = year.to_string();
    movie.rating = rating;
    movie
}

fn catalog(movies: Vec<Movie>) -> Vec<(MovieId, Movie)> {
    movies
        .into_iter()
        .enumerate()
        .map(|(i, m)| (MovieId::new(i as u64 + 1), m))
        .collect()
}

fn titles(records: &[(MovieId, Movie)], query: &Query) -> Vec<String> {
    run(records.iter().map(|(id, m)| (*id, m)), query)
        .into_iter()
        .map(|(_, m)| m.title.clone())
        .collect()
}

fn zeta_alpha() -> Vec<(MovieId, Movie)> {
    catalog(vec![movie("Zeta", "2001", 5.0), movie("alpha", "1999", 9.0)])
}

#[test]
fn test_sort_by_title_is_case_insensitive() {
    let records = zeta_alpha();
    let query = Query::new("", FilterMode::All, SortMode::Title);
    assert_eq!(titles(&records, &query), vec!["alpha", "Zeta"]);
}

#[test]
fn test_sort_by_rating_descending() {
    let records = zeta_alpha();
    let query = Query::new("", FilterMode::All, SortMode::Rating);
    assert_eq!(titles(&records, &query), vec!["alpha", "Zeta"]);
}

#[test]
fn test_sort_by_year_descending() {
    let records = zeta_alpha();
    let query = Query::new("", FilterMode::All, SortMode::Year);
    assert_eq!(titles(&records, &query), vec!["Zeta", "alpha"]);
}

#[test]
fn test_search_matches_title_substring() {
    let records = zeta_alpha();
    let query = Query::new("zet", FilterMode::All, SortMode::Title);
    assert_eq!(titles(&records, &query), vec!["Zeta"]);
}

#[test]
fn test_search_matches_notes() {
    let mut heat = movie("Heat", "1995", 8.0);
    heat.notes = "De Niro and PACINO".to_string();
    let records = catalog(vec![heat, movie("Alien", "1979", 8.5)]);
    let query = Query::new("  pacino ", FilterMode::All, SortMode::Title);
    assert_eq!(titles(&records, &query), vec!["Heat"]);
}

#[test]
fn test_search_without_match_is_empty() {
    let records = zeta_alpha();
    let query = Query::new("godfather", FilterMode::All, SortMode::Title);
    assert!(titles(&records, &query).is_empty());
}

#[test]
fn test_empty_year_sorts_last() {
    let records = catalog(vec![
        movie("Unknown", "", 5.0),
        movie("Old", "1950", 5.0),
        movie("New", "2020", 5.0),
    ]);
    let query = Query::new("", FilterMode::All, SortMode::Year);
    assert_eq!(titles(&records, &query), vec!["New", "Old", "Unknown"]);
}

#[test]
fn test_ties_keep_catalog_order() {
    let records = catalog(vec![
        movie("First", "2000", 7.0),
        movie("Second", "2000", 7.0),
        movie("third", "2000", 7.0),
        movie("THIRD", "2000", 7.0),
    ]);

    let by_rating = Query::new("", FilterMode::All, SortMode::Rating);
    assert_eq!(titles(&records, &by_rating), vec!["First", "Second", "third", "THIRD"]);

    let by_year = Query::new("", FilterMode::All, SortMode::Year);
    assert_eq!(titles(&records, &by_year), vec!["First", "Second", "third", "THIRD"]);

    let by_title = Query::new("", FilterMode::All, SortMode::Title);
    assert_eq!(titles(&records, &by_title), vec!["First", "Second", "third", "THIRD"]);
}

#[test]
fn test_filters_keep_matching_flags() {
    let mut watched = movie("Watched", "2000", 1.0);
    watched.set_watched(true);
    let mut favorite = movie("Favorite", "2000", 2.0);
    favorite.favorite = true;
    favorite.watchlist = false;
    let queued = movie("Queued", "2000", 3.0);
    let records = catalog(vec![watched, favorite, queued]);

    let run_filter = |filter| titles(&records, &Query::new("", filter, SortMode::Title));
    assert_eq!(run_filter(FilterMode::All), vec!["Favorite", "Queued", "Watched"]);
    assert_eq!(run_filter(FilterMode::Watched), vec!["Watched"]);
    assert_eq!(run_filter(FilterMode::Favorite), vec!["Favorite"]);
    assert_eq!(run_filter(FilterMode::Watchlist), vec!["Queued"]);
}

#[test]
fn test_search_and_filter_combine() {
    let mut seen = movie("Alien", "1979", 8.5);
    seen.set_watched(true);
    let records = catalog(vec![seen, movie("Aliens", "1986", 8.4)]);
    let query = Query::new("alien", FilterMode::Watchlist, SortMode::Title);
    assert_eq!(titles(&records, &query), vec!["Aliens"]);
}

#[test]
fn test_query_does_not_reorder_source() {
    let records = zeta_alpha();
    let query = Query::new("", FilterMode::All, SortMode::Title);
    let _ = titles(&records, &query);
    assert_eq!(records[0].1.title, "Zeta");
    assert_eq!(records[1].1.title, "alpha");
}

#[test]
fn test_modes_parse_and_display() {
    assert_eq!("watchlist".parse::<FilterMode>().unwrap(), FilterMode::Watchlist);
    assert_eq!("ALL".parse::<FilterMode>().unwrap(), FilterMode::All);
    assert!("seen".parse::<FilterMode>().is_err());
    assert_eq!("Rating".parse::<SortMode>().unwrap(), SortMode::Rating);
    assert!("length".parse::<SortMode>().is_err());
    assert_eq!(FilterMode::Favorite.to_string(), "Favorite");
    assert_eq!(SortMode::Year.to_string(), "Year");
    assert_eq!(Query::default(), Query::new("", FilterMode::All, SortMode::Title));
}
