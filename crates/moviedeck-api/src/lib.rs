//! API client library for moviedeck.
//!
//! Provides the TMDB movie-database client and its data model.

/// TMDB API client.
pub mod tmdb;
