use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::trailer::trailer_search_url;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// One catalog entry.
///
/// Serializes with keys matching the on-disk `movies.json` layout. Records
/// read from disk go through [`Movie::from_mapping`], not `Deserialize`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Movie {
    pub title: String,
    pub year: String,
    pub rating: f64,
    pub poster_url: String,
    pub watched: bool,
    pub favorite: bool,
    pub watchlist: bool,
    pub trailer_url: String,
    pub local_file: String,
    pub notes: String,
    created_at: String,
}

impl Movie {
    /// Create a record with default fields, stamped with the current time
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into().trim().to_string(),
            year: String::new(),
            rating: 0.0,
            poster_url: String::new(),
            watched: false,
            favorite: false,
            watchlist: true,
            trailer_url: String::new(),
            local_file: String::new(),
            notes: String::new(),
            created_at: now_timestamp(),
        }
    }

    /// Build a record from an untyped JSON object.
    ///
    /// Missing keys take their defaults and wrongly typed values are coerced
    /// (see `coerce_text`, `coerce_rating`, `coerce_bool`). This never fails.
    pub fn from_mapping(payload: &Map<String, Value>) -> Self {
        let text = |key: &str| payload.get(key).map(coerce_text).unwrap_or_default();
        let flag = |key: &str, default: bool| payload.get(key).map(coerce_bool).unwrap_or(default);

        let created_at = text("created_at");
        Self {
            title: text("title"),
            year: text("year"),
            rating: payload.get("rating").map(coerce_rating).unwrap_or(0.0),
            poster_url: text("poster_url"),
            watched: flag("watched", false),
            favorite: flag("favorite", false),
            watchlist: flag("watchlist", true),
            trailer_url: text("trailer_url"),
            local_file: text("local_file"),
            notes: text("notes"),
            created_at: if created_at.is_empty() { now_timestamp() } else { created_at },
        }
    }

    /// Same as [`Movie::from_mapping`], but accepts any JSON value.
    ///
    /// Returns `None` when the value is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(Self::from_mapping)
    }

    /// ISO-8601 creation timestamp; fixed once the record exists
    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// Explicit trailer URL, or a YouTube search for the title when none is set
    pub fn trailer_link(&self) -> String {
        let explicit = self.trailer_url.trim();
        if explicit.is_empty() {
            trailer_search_url(&self.title)
        } else {
            explicit.to_string()
        }
    }

    /// Set the watched flag, dropping the movie from the watchlist when it becomes watched
    pub fn set_watched(&mut self, watched: bool) {
        self.watched = watched;
        self.enforce_watched_rule();
    }

    /// A watched movie is never on the watchlist
    pub fn enforce_watched_rule(&mut self) {
        if self.watched {
            self.watchlist = false;
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Case-insensitive substring match against title or notes.
    ///
    /// `needle` must already be lower-cased; an empty needle matches everything.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.notes.to_lowercase().contains(needle)
    }
}

/// Clamp a rating into `[MIN_RATING, MAX_RATING]`; non-finite values become 0
pub fn clamp_rating(rating: f64) -> f64 {
    if rating.is_finite() {
        rating.clamp(MIN_RATING, MAX_RATING)
    } else {
        0.0
    }
}

pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn coerce_rating(value: &Value) -> f64 {
    let raw = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    clamp_rating(raw)
}

fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        Value::Null => false,
    }
}
