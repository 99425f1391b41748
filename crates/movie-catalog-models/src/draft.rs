use thiserror::Error;

use crate::metadata::MovieMetadata;
use crate::movie::{clamp_rating, Movie};
use crate::trailer::trailer_search_url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Title is required.")]
    MissingTitle,
}

/// Editable form state for a movie that has not been committed yet.
///
/// Every field a user types is kept as raw text (including `rating`) so a
/// front end can round-trip whatever was entered; [`MovieDraft::build`]
/// is where validation happens.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDraft {
    pub title: String,
    pub year: String,
    pub rating: String,
    pub poster_url: String,
    pub trailer_url: String,
    pub local_file: String,
    pub notes: String,
    pub watched: bool,
    pub favorite: bool,
    pub watchlist: bool,
}

impl Default for MovieDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl MovieDraft {
    /// Blank form: all text empty, only the watchlist box ticked
    pub fn new() -> Self {
        Self {
            title: String::new(),
            year: String::new(),
            rating: String::new(),
            poster_url: String::new(),
            trailer_url: String::new(),
            local_file: String::new(),
            notes: String::new(),
            watched: false,
            favorite: false,
            watchlist: true,
        }
    }

    /// Prefill from an existing record; a zero rating shows as empty
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            year: movie.year.clone(),
            rating: if movie.rating == 0.0 {
                String::new()
            } else {
                movie.rating.to_string()
            },
            poster_url: movie.poster_url.clone(),
            trailer_url: movie.trailer_url.clone(),
            local_file: movie.local_file.clone(),
            notes: movie.notes.clone(),
            watched: movie.watched,
            favorite: movie.favorite,
            watchlist: movie.watchlist,
        }
    }

    /// Reset to a blank form
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Validate the form into a set of changes ready to commit.
    ///
    /// Unparsable ratings fall back to 0; out-of-range ratings are clamped.
    pub fn build(&self) -> Result<MovieChanges, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::MissingTitle);
        }

        let rating = self.rating.trim();
        let rating = if rating.is_empty() {
            0.0
        } else {
            rating.parse::<f64>().unwrap_or(0.0)
        };

        Ok(MovieChanges {
            title: title.to_string(),
            year: self.year.trim().to_string(),
            rating: clamp_rating(rating),
            poster_url: self.poster_url.trim().to_string(),
            trailer_url: self.trailer_url.trim().to_string(),
            local_file: self.local_file.trim().to_string(),
            notes: self.notes.trim().to_string(),
            watched: self.watched,
            favorite: self.favorite,
            watchlist: self.watchlist,
        })
    }

    /// Fill the form from a lookup match.
    ///
    /// Only non-empty parts of the match overwrite the form. A blank trailer
    /// field gets the search fallback for the current title.
    pub fn apply_metadata(&mut self, metadata: &MovieMetadata) {
        if !metadata.year.is_empty() {
            self.year = metadata.year.clone();
        }
        if metadata.rating != 0.0 {
            self.rating = format!("{:.1}", metadata.rating);
        }
        if !metadata.poster_url.is_empty() {
            self.poster_url = metadata.poster_url.clone();
        }
        if self.trailer_url.trim().is_empty() {
            self.trailer_url = trailer_search_url(&self.title);
        }
    }
}

/// Validated field values for creating or updating a record.
///
/// Carries no `created_at`; that is only set when a record is first made.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieChanges {
    pub title: String,
    pub year: String,
    pub rating: f64,
    pub poster_url: String,
    pub trailer_url: String,
    pub local_file: String,
    pub notes: String,
    pub watched: bool,
    pub favorite: bool,
    pub watchlist: bool,
}

impl MovieChanges {
    /// New record carrying these values, stamped with the current time
    pub fn into_movie(self) -> Movie {
        let mut movie = Movie::new(String::new());
        self.apply_to(&mut movie);
        movie
    }

    /// Overwrite every editable field of `movie`
    pub fn apply_to(&self, movie: &mut Movie) {
        movie.title = self.title.trim().to_string();
        movie.year = self.year.clone();
        movie.rating = clamp_rating(self.rating);
        movie.poster_url = self.poster_url.clone();
        movie.trailer_url = self.trailer_url.clone();
        movie.local_file = self.local_file.clone();
        movie.notes = self.notes.clone();
        movie.watched = self.watched;
        movie.favorite = self.favorite;
        movie.watchlist = self.watchlist;
    }
}

impl From<&Movie> for MovieChanges {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            year: movie.year.clone(),
            rating: movie.rating,
            poster_url: movie.poster_url.clone(),
            trailer_url: movie.trailer_url.clone(),
            local_file: movie.local_file.clone(),
            notes: movie.notes.clone(),
            watched: movie.watched,
            favorite: movie.favorite,
            watchlist: movie.watchlist,
        }
    }
}
