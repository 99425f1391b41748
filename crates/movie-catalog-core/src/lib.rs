pub mod error;
pub mod query;
pub mod store;

pub use error::CatalogError;
pub use query::{FilterMode, Query, SortMode};
pub use store::{CatalogStore, Flag, MovieId};
