use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use movie_catalog_models::{clamp_rating, Movie, MovieChanges};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::CatalogError;
use crate::query::{self, Query};

/// Handle to a record held by a [`CatalogStore`].
///
/// Handles are handed out in file order starting at 1 on every load, then
/// keep increasing as records are created. They are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MovieId(u64);

impl MovieId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MovieId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('#');
        trimmed
            .parse::<u64>()
            .map(MovieId)
            .map_err(|_| format!("Invalid movie id: {}", s))
    }
}

/// Boolean fields that can be flipped in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Watched,
    Favorite,
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::Watched => write!(f, "watched"),
            Flag::Favorite => write!(f, "favorite"),
        }
    }
}

impl FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "watched" => Ok(Flag::Watched),
            "favorite" | "favourite" => Ok(Flag::Favorite),
            _ => Err(format!("Invalid flag: {}. Use 'watched' or 'favorite'", s)),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: MovieId,
    movie: Movie,
}

/// Owner of the in-memory movie list and its JSON file.
///
/// Every mutating call writes the whole list back to disk before returning,
/// so a successful call leaves memory and file in agreement. Not meant for
/// concurrent use; wrap it in a lock if several threads need it.
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    entries: Vec<Entry>,
    next_id: u64,
}

impl CatalogStore {
    /// Empty store bound to `path`; nothing is read until [`CatalogStore::load`]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a store and load whatever `path` currently holds
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self::new(path);
        store.load();
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory list with the contents of the store's file.
    ///
    /// Never fails: a missing file, unreadable file, invalid JSON or a
    /// non-array document all give an empty catalog, and array elements that
    /// are not objects are skipped. Returns the number of records loaded.
    pub fn load(&mut self) -> usize {
        let movies = read_movies(&self.path);
        self.entries.clear();
        self.next_id = 1;
        for movie in movies {
            self.push(movie);
        }
        self.entries.len()
    }

    /// Rebind the store to another file and load it
    pub fn load_from(&mut self, path: impl Into<PathBuf>) -> usize {
        self.path = path.into();
        self.load()
    }

    /// Write the catalog to its file
    pub fn save(&self) -> Result<(), CatalogError> {
        self.save_to(&self.path)
    }

    /// Write the catalog, in its current order, as a JSON array to `path`.
    ///
    /// Missing parent directories are created. The file is replaced via a
    /// temporary sibling and a rename.
    pub fn save_to(&self, path: &Path) -> Result<(), CatalogError> {
        let movies: Vec<&Movie> = self.entries.iter().map(|e| &e.movie).collect();
        let json = serde_json::to_string_pretty(&movies)?;

        let write_err = |source: std::io::Error| CatalogError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, json).map_err(write_err)?;
        if let Err(e) = std::fs::rename(&temp_path, path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(write_err(e));
        }

        debug!("Saved {} movies to {}", movies.len(), path.display());
        Ok(())
    }

    /// Append a record and save.
    ///
    /// Duplicate titles are allowed. Fails with [`CatalogError::EmptyTitle`]
    /// when the title is blank. A watched record is taken off the watchlist.
    /// If the save fails the record is not kept.
    pub fn create(&mut self, mut movie: Movie) -> Result<MovieId, CatalogError> {
        if !movie.has_title() {
            return Err(CatalogError::EmptyTitle);
        }
        movie.title = movie.title.trim().to_string();
        movie.rating = clamp_rating(movie.rating);
        movie.enforce_watched_rule();

        let id = self.push(movie);
        if let Err(e) = self.save() {
            self.entries.pop();
            self.next_id -= 1;
            return Err(e);
        }
        info!("Added movie {} to catalog", id);
        Ok(id)
    }

    /// Overwrite the editable fields of an existing record and save.
    ///
    /// `created_at` is left as is; a watched record is taken off the watchlist.
    /// If the save fails the previous values are restored.
    pub fn update(&mut self, id: MovieId, changes: &MovieChanges) -> Result<(), CatalogError> {
        if changes.title.trim().is_empty() {
            return Err(CatalogError::EmptyTitle);
        }
        let movie = self.get_mut(id).ok_or(CatalogError::NotFound(id))?;
        let previous = movie.clone();
        changes.apply_to(movie);
        movie.enforce_watched_rule();

        self.save_or_restore(id, previous)?;
        info!("Updated movie {}", id);
        Ok(())
    }

    /// Remove a record and save.
    ///
    /// Returns `Ok(false)` without touching the file when `id` is not in the catalog.
    pub fn delete(&mut self, id: MovieId) -> Result<bool, CatalogError> {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            debug!("Delete of unknown movie {} ignored", id);
            return Ok(false);
        };
        let entry = self.entries.remove(index);

        if let Err(e) = self.save() {
            self.entries.insert(index, entry);
            return Err(e);
        }
        info!("Deleted movie {}", id);
        Ok(true)
    }

    /// Flip a flag and save, returning its new value.
    ///
    /// Marking a movie watched also takes it off the watchlist. If the save
    /// fails the flags are restored.
    pub fn toggle_flag(&mut self, id: MovieId, flag: Flag) -> Result<bool, CatalogError> {
        let movie = self.get_mut(id).ok_or(CatalogError::NotFound(id))?;
        let previous = movie.clone();
        let value = match flag {
            Flag::Watched => {
                movie.set_watched(!movie.watched);
                movie.watched
            }
            Flag::Favorite => {
                movie.favorite = !movie.favorite;
                movie.favorite
            }
        };

        self.save_or_restore(id, previous)?;
        debug!("Toggled {} on movie {} to {}", flag, id, value);
        Ok(value)
    }

    /// Filtered, sorted view of the catalog; see [`crate::query`]
    pub fn query(&self, query: &Query) -> Vec<(MovieId, &Movie)> {
        query::run(self.iter(), query)
    }

    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.movie)
    }

    /// Records in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (MovieId, &Movie)> {
        self.entries.iter().map(|e| (e.id, &e.movie))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get_mut(&mut self, id: MovieId) -> Option<&mut Movie> {
        self.entries.iter_mut().find(|e| e.id == id).map(|e| &mut e.movie)
    }

    /// Save, putting `previous` back under `id` when the write fails
    fn save_or_restore(&mut self, id: MovieId, previous: Movie) -> Result<(), CatalogError> {
        let result = self.save();
        if result.is_err() {
            if let Some(movie) = self.get_mut(id) {
                *movie = previous;
            }
        }
        result
    }

    fn push(&mut self, movie: Movie) -> MovieId {
        let id = MovieId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, movie });
        id
    }
}

/// Read a movies file leniently; anything unusable yields fewer (or no) records
pub fn read_movies(path: &Path) -> Vec<Movie> {
    if !path.exists() {
        debug!("Catalog file {} does not exist, starting empty", path.display());
        return Vec::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read catalog file {}: {}. Starting empty.", path.display(), e);
            return Vec::new();
        }
    };

    let document: Value = match serde_json::from_str(&content) {
        Ok(document) => document,
        Err(e) => {
            warn!("Catalog file {} is not valid JSON: {}. Starting empty.", path.display(), e);
            return Vec::new();
        }
    };

    let Value::Array(items) = document else {
        warn!("Catalog file {} does not hold a list of movies. Starting empty.", path.display());
        return Vec::new();
    };

    let total = items.len();
    let movies: Vec<Movie> = items.iter().filter_map(Movie::from_value).collect();
    if movies.len() < total {
        warn!(
            "Skipped {} malformed entries in catalog file {}",
            total - movies.len(),
            path.display()
        );
    }
    info!("Loaded {} movies from {}", movies.len(), path.display());
    movies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{FilterMode, SortMode};
    use movie_catalog_models::MovieDraft;
    use tempfile::{tempdir, NamedTempFile};

    fn movie(title: &str, year: &str, rating: f64) -> Movie {
        let mut movie = Movie::new(title);
        movie.year = year.to_string();
        movie.rating = rating;
        movie
    }

    fn store_in(dir: &tempfile::TempDir) -> CatalogStore {
        CatalogStore::new(dir.path().join("movies.json"))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        assert_eq!(store.load(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_non_list_is_empty() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "\"not a list\"").unwrap();
        let store = CatalogStore::open(file.path());
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_invalid_json_is_empty() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[{\"title\": \"Heat\",").unwrap();
        let store = CatalogStore::open(file.path());
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_skips_non_object_elements() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"[{"title": "Heat"}, 42, "junk", null, {"title": "Alien", "rating": "x"}]"#,
        )
        .unwrap();
        let store = CatalogStore::open(file.path());
        let titles: Vec<&str> = store.iter().map(|(_, m)| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Heat", "Alien"]);
        assert_eq!(store.get(MovieId::new(2)).unwrap().rating, 0.0);
    }

    #[test]
    fn test_load_assigns_ids_in_file_order() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"[{"title": "A"}, {"title": "B"}]"#).unwrap();
        let store = CatalogStore::open(file.path());
        let ids: Vec<u64> = store.iter().map(|(id, _)| id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_load_from_rebinds_and_resets_ids() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        store.create(movie("Heat", "1995", 8.0)).unwrap();
        store.create(movie("Alien", "1979", 8.1)).unwrap();

        let other = dir.path().join("other.json");
        std::fs::write(&other, r#"[{"title": "Ran"}]"#).unwrap();
        assert_eq!(store.load_from(&other), 1);
        assert_eq!(store.path(), other.as_path());
        assert_eq!(store.get(MovieId::new(1)).unwrap().title, "Ran");
        assert!(store.get(MovieId::new(2)).is_none());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        let mut heat = movie("Heat", "1995", 8.3);
        heat.notes = "Mann".to_string();
        heat.local_file = "/films/heat.mkv".to_string();
        heat.favorite = true;
        store.create(heat).unwrap();
        store.create(movie("Alien", "", 0.0)).unwrap();

        let reloaded = CatalogStore::open(store.path());
        let original: Vec<&Movie> = store.iter().map(|(_, m)| m).collect();
        let loaded: Vec<&Movie> = reloaded.iter().map(|(_, m)| m).collect();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("movies.json");
        let mut store = CatalogStore::new(&path);
        store.create(movie("Heat", "1995", 8.0)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_failure_is_reported() {
        let blocker = NamedTempFile::new().unwrap();
        let mut store = CatalogStore::new(blocker.path().join("movies.json"));
        let result = store.create(movie("Heat", "1995", 8.0));
        assert!(matches!(result, Err(CatalogError::Write { .. })));
    }

    #[test]
    fn test_failed_create_is_rolled_back() {
        let blocker = NamedTempFile::new().unwrap();
        let mut store = CatalogStore::new(blocker.path().join("movies.json"));
        assert!(store.create(movie("Heat", "1995", 8.0)).is_err());
        assert!(store.is_empty());

        let dir = tempdir().unwrap();
        store.path = dir.path().join("movies.json");
        let id = store.create(movie("Alien", "1979", 8.1)).unwrap();
        assert_eq!(id, MovieId::new(1));
        assert_eq!(CatalogStore::open(store.path()).len(), 1);
    }

    #[test]
    fn test_failed_mutations_restore_previous_state() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        let heat = store.create(movie("Heat", "1995", 8.0)).unwrap();
        let alien = store.create(movie("Alien", "1979", 8.1)).unwrap();
        let before: Vec<Movie> = store.iter().map(|(_, m)| m.clone()).collect();

        let blocker = NamedTempFile::new().unwrap();
        store.path = blocker.path().join("movies.json");

        let mut changes = MovieChanges::from(store.get(heat).unwrap());
        changes.title = "Heat (1995)".to_string();
        changes.watched = true;
        assert!(store.update(heat, &changes).is_err());
        assert!(store.toggle_flag(alien, Flag::Watched).is_err());
        assert!(store.toggle_flag(alien, Flag::Favorite).is_err());
        assert!(store.delete(heat).is_err());

        let after: Vec<Movie> = store.iter().map(|(_, m)| m.clone()).collect();
        assert_eq!(after, before);
        let ids: Vec<MovieId> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![heat, alien]);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        store.create(movie("Heat", "1995", 8.0)).unwrap();
        assert!(!dir.path().join("movies.json.tmp").exists());

        // a directory in place of the target makes the rename fail
        let target = dir.path().join("blocked.json");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), "x").unwrap();
        assert!(matches!(store.save_to(&target), Err(CatalogError::Write { .. })));
        assert!(!dir.path().join("blocked.json.tmp").exists());
    }

    #[test]
    fn test_create_watched_leaves_watchlist() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        let draft = MovieDraft {
            title: "Heat".to_string(),
            watched: true,
            ..MovieDraft::new()
        };
        let id = store.create(draft.build().unwrap().into_movie()).unwrap();

        let created = store.get(id).unwrap();
        assert!(created.watched);
        assert!(!created.watchlist);
        let query = Query::new("", FilterMode::Watchlist, SortMode::Title);
        assert!(store.query(&query).is_empty());
        assert!(!CatalogStore::open(store.path()).get(id).unwrap().watchlist);
    }

    #[test]
    fn test_create_appends_and_allows_duplicates() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        let first = store.create(movie("Heat", "1995", 8.0)).unwrap();
        let second = store.create(movie("Heat", "1986", 6.0)).unwrap();
        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(second).unwrap().year, "1986");
    }

    #[test]
    fn test_create_rejects_blank_title_and_clamps_rating() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        assert!(matches!(
            store.create(movie("   ", "", 0.0)),
            Err(CatalogError::EmptyTitle)
        ));
        assert!(!store.path().exists());

        let id = store.create(movie("Heat", "", 99.0)).unwrap();
        assert_eq!(store.get(id).unwrap().rating, 10.0);
    }

    #[test]
    fn test_update_applies_watched_rule_and_keeps_created_at() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        let id = store.create(movie("Heat", "1995", 8.0)).unwrap();
        let created_at = store.get(id).unwrap().created_at().to_string();

        let mut changes = MovieChanges::from(store.get(id).unwrap());
        changes.watched = true;
        changes.watchlist = true;
        changes.notes = "seen it".to_string();
        store.update(id, &changes).unwrap();

        let updated = store.get(id).unwrap();
        assert!(updated.watched);
        assert!(!updated.watchlist);
        assert_eq!(updated.notes, "seen it");
        assert_eq!(updated.created_at(), created_at);

        let reloaded = CatalogStore::open(store.path());
        assert_eq!(reloaded.get(MovieId::new(1)).unwrap().notes, "seen it");
    }

    #[test]
    fn test_update_clamps_rating() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        let id = store.create(movie("Heat", "1995", 8.0)).unwrap();

        let mut changes = MovieChanges::from(store.get(id).unwrap());
        changes.rating = 42.0;
        store.update(id, &changes).unwrap();
        assert_eq!(store.get(id).unwrap().rating, 10.0);
        assert_eq!(CatalogStore::open(store.path()).get(id).unwrap().rating, 10.0);
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        let changes = MovieChanges::from(&Movie::new("Heat"));
        assert!(matches!(
            store.update(MovieId::new(7), &changes),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_rejects_blank_title() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        let id = store.create(movie("Heat", "1995", 8.0)).unwrap();
        let mut changes = MovieChanges::from(store.get(id).unwrap());
        changes.title = " ".to_string();
        assert!(matches!(store.update(id, &changes), Err(CatalogError::EmptyTitle)));
        assert_eq!(store.get(id).unwrap().title, "Heat");
    }

    #[test]
    fn test_delete_removes_and_persists() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        let heat = store.create(movie("Heat", "1995", 8.0)).unwrap();
        store.create(movie("Alien", "1979", 8.5)).unwrap();

        assert!(store.delete(heat).unwrap());
        assert!(store.get(heat).is_none());

        let reloaded = CatalogStore::open(store.path());
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get(MovieId::new(1)).unwrap().title, "Alien");
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        store.create(movie("Heat", "1995", 8.0)).unwrap();
        assert!(!store.delete(MovieId::new(99)).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_toggle_watched_clears_watchlist() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        let id = store.create(movie("Heat", "1995", 8.0)).unwrap();
        assert!(store.get(id).unwrap().watchlist);

        assert!(store.toggle_flag(id, Flag::Watched).unwrap());
        assert!(!store.get(id).unwrap().watchlist);

        assert!(!store.toggle_flag(id, Flag::Watched).unwrap());
        assert!(!store.get(id).unwrap().watched);
        assert!(!store.get(id).unwrap().watchlist);
    }

    #[test]
    fn test_toggle_favorite_persists() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        let id = store.create(movie("Heat", "1995", 8.0)).unwrap();
        assert!(store.toggle_flag(id, Flag::Favorite).unwrap());

        let reloaded = CatalogStore::open(store.path());
        assert!(reloaded.get(MovieId::new(1)).unwrap().favorite);
        assert!(reloaded.get(MovieId::new(1)).unwrap().watchlist);
    }

    #[test]
    fn test_toggle_unknown_id_fails() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        assert!(matches!(
            store.toggle_flag(MovieId::new(3), Flag::Favorite),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_movie_id_and_flag_parse() {
        assert_eq!("#12".parse::<MovieId>().unwrap(), MovieId::new(12));
        assert_eq!(" 3 ".parse::<MovieId>().unwrap(), MovieId::new(3));
        assert!("abc".parse::<MovieId>().is_err());
        assert_eq!("Watched".parse::<Flag>().unwrap(), Flag::Watched);
        assert_eq!("favourite".parse::<Flag>().unwrap(), Flag::Favorite);
        assert!("watchlist".parse::<Flag>().is_err());
    }
}
