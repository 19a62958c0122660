pub mod cache;
pub mod source;
pub mod tmdb;

pub use cache::{CacheStats, TmdbCache};
pub use source::{MovieSource, TmdbMovieSource};
pub use tmdb::{TmdbClient, TmdbConfiguration, TmdbConverter};
