pub mod error;
pub mod task;
pub mod tmdb;
pub mod traits;

pub use error::LookupError;
pub use task::{start_lookup, LookupOutcome, LookupTask};
pub use tmdb::TmdbClient;
pub use traits::{LookupRequest, MetadataLookup};
