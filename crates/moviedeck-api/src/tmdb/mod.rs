//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! and retrieves movie details, genres, and top-rated pages.

mod api;
mod client;
mod error;
mod types;
mod util;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{LANGUAGE, TmdbClient, TmdbClientBuilder, validate_movie_id};
#[allow(clippy::module_name_repetitions)]
pub use error::{FetchOp, TmdbError};
pub use types::{ErrorBody, Genre, GenreList, Movie, MoviePage};
pub use util::{fetch_movies_by_ids, fetch_top_rated_movies};
