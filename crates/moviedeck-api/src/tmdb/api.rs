//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::TmdbError;
use super::types::{Genre, Movie, MoviePage};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches the details of a single movie.
    ///
    /// # Errors
    ///
    /// Returns `TmdbError::InvalidInput` for an empty or malformed ID, or a
    /// transport, status or decode error from the request.
    async fn fetch_movie_details(&self, movie_id: &str) -> Result<Movie, TmdbError>;

    /// Fetches the list of movie genres.
    ///
    /// # Errors
    ///
    /// Returns a transport, status or decode error from the request.
    async fn fetch_movie_genres(&self) -> Result<Vec<Genre>, TmdbError>;

    /// Fetches one page of top-rated movies.
    ///
    /// # Errors
    ///
    /// Returns a transport, status or decode error from the request.
    async fn fetch_top_rated_page(&self, page: u32) -> Result<MoviePage, TmdbError>;
}
