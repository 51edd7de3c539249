//! `TmdbClient` - TMDB API client implementation.

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::LocalTmdbApi;
use super::error::{FetchOp, TmdbError};
use super::types::{ErrorBody, Genre, GenreList, Movie, MoviePage};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Response language sent with every request.
pub const LANGUAGE: &str = "en-US";

/// TMDB API client.
///
/// Immutable once built; share it by reference across fetches.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token.
    api_token: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// A base URL without a trailing slash gets one, so relative paths
    /// join below it instead of replacing its last segment.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set or empty.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_token = self.api_token.context("api_token is required")?;
        anyhow::ensure!(!api_token.trim().is_empty(), "api_token must not be empty");
        let user_agent = self.user_agent.context("user_agent is required")?;

        let mut base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Returns the base URL requests are joined against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a GET request with Bearer auth and the fixed language, plus
    /// any extra query params, and decodes the JSON body.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        op: FetchOp,
        path: &str,
        extra_query: &[(&str, String)],
    ) -> Result<T, TmdbError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| TmdbError::InvalidInput {
                op,
                reason: format!("cannot join request path {path}: {e}"),
            })?;

        let request = self
            .http_client
            .get(url)
            .bearer_auth(&self.api_token)
            .query(&[("language", LANGUAGE)])
            .query(extra_query)
            .build()
            .map_err(|source| TmdbError::Transport { op, source })?;

        tracing::debug!(url = %request.url(), "TMDB API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|source| TmdbError::Transport { op, source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| TmdbError::Transport { op, source })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map_or(body, |error_body| error_body.status_message);
            return Err(TmdbError::Status {
                op,
                status,
                message,
            });
        }

        serde_json::from_str(&body).map_err(|source| TmdbError::Decode { op, source })
    }
}

/// Checks that a movie ID is a single, non-empty path segment.
///
/// # Errors
///
/// Returns `TmdbError::InvalidInput` if the ID is empty or contains anything
/// other than ASCII alphanumerics, `-` or `_`.
pub fn validate_movie_id(movie_id: &str) -> Result<(), TmdbError> {
    if movie_id.is_empty() {
        return Err(TmdbError::InvalidInput {
            op: FetchOp::MovieDetails,
            reason: String::from("movie id must not be empty"),
        });
    }
    if !movie_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(TmdbError::InvalidInput {
            op: FetchOp::MovieDetails,
            reason: format!("movie id contains invalid characters: {movie_id:?}"),
        });
    }
    Ok(())
}

impl LocalTmdbApi for TmdbClient {
    #[instrument(skip_all, fields(movie_id = %movie_id))]
    async fn fetch_movie_details(&self, movie_id: &str) -> Result<Movie, TmdbError> {
        validate_movie_id(movie_id)?;

        let path = format!("movie/{movie_id}");
        let result = self.get_json(FetchOp::MovieDetails, &path, &[]).await;
        if let Err(ref e) = result {
            tracing::warn!(movie_id, error = %e, "Movie details fetch failed");
        }
        result
    }

    #[instrument(skip_all)]
    async fn fetch_movie_genres(&self) -> Result<Vec<Genre>, TmdbError> {
        let list: GenreList = self
            .get_json(FetchOp::MovieGenres, "genre/movie/list", &[])
            .await?;
        Ok(list.genres)
    }

    #[instrument(skip_all, fields(page = page))]
    async fn fetch_top_rated_page(&self, page: u32) -> Result<MoviePage, TmdbError> {
        let query = [("page", page.to_string())];
        self.get_json(FetchOp::TopRatedMovies, "movie/top_rated", &query)
            .await
    }
}
