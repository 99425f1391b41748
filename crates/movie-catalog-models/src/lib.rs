pub mod draft;
pub mod metadata;
pub mod movie;
pub mod trailer;

pub use draft::{DraftError, MovieChanges, MovieDraft};
pub use metadata::MovieMetadata;
pub use movie::{clamp_rating, Movie, MAX_RATING, MIN_RATING};
pub use trailer::trailer_search_url;
