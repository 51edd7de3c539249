//! TMDB API response types.

use serde::{Deserialize, Serialize};

// --- Genres ---

/// Movie genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Response from `genre/movie/list` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GenreList {
    /// All movie genres.
    pub genres: Vec<Genre>,
}

// --- Movies ---

/// A movie as returned by `movie/{id}` and inside paged list results.
///
/// Only `id` and `title` are required. List results carry `genre_ids`,
/// the details endpoint carries `genres` and `runtime` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_title: String,
    /// Original language (ISO 639-1).
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_language: String,
    /// Overview text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    /// Release date (YYYY-MM-DD or null).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Popularity score.
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: f64,
    /// Vote average.
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: u32,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Runtime in minutes (details only).
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Adult flag.
    #[serde(default, deserialize_with = "null_as_default")]
    pub adult: bool,
    /// Video flag.
    #[serde(default, deserialize_with = "null_as_default")]
    pub video: bool,
    /// Genre IDs (list results only).
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<u32>,
    /// Embedded genres (details only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<Genre>>,
}

/// Response from paged movie list endpoints such as `movie/top_rated`.
#[derive(Debug, Clone, Deserialize)]
pub struct MoviePage {
    /// Current page number.
    pub page: u32,
    /// Movies on this page.
    pub results: Vec<Movie>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}

/// Deserializes `null` into `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value = Option::<T>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
