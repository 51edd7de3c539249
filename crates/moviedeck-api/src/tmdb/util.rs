//! Multi-request TMDB fetches built on `LocalTmdbApi`.

use futures::future::try_join_all;
use tracing::instrument;

use super::api::LocalTmdbApi;
use super::error::{FetchOp, TmdbError};
use super::types::Movie;

/// Fetches `page_count` consecutive pages of top-rated movies starting at
/// `start_page` and concatenates their results in page order.
///
/// Pages are requested strictly one after another. The first failing page
/// aborts the whole fetch and everything gathered so far is dropped.
///
/// # Errors
///
/// Returns `TmdbError::InvalidInput` if `start_page` is 0 or the page range
/// overflows, or the error of the first page that fails.
#[instrument(skip_all, fields(start_page = start_page, page_count = page_count))]
pub async fn fetch_top_rated_movies(
    api: &(impl LocalTmdbApi + Sync),
    start_page: u32,
    page_count: u32,
) -> Result<Vec<Movie>, TmdbError> {
    if page_count == 0 {
        return Ok(Vec::new());
    }
    if start_page == 0 {
        return Err(TmdbError::InvalidInput {
            op: FetchOp::TopRatedMovies,
            reason: String::from("pages are numbered from 1"),
        });
    }
    let end_page = start_page
        .checked_add(page_count)
        .ok_or_else(|| TmdbError::InvalidInput {
            op: FetchOp::TopRatedMovies,
            reason: format!("page range {start_page} + {page_count} overflows"),
        })?;

    let mut movies: Vec<Movie> = Vec::new();
    for page in start_page..end_page {
        let response = api.fetch_top_rated_page(page).await?;
        tracing::debug!(
            page,
            fetched = response.results.len(),
            "Top-rated page completed"
        );
        movies.extend(response.results);
    }

    tracing::info!(
        pages = page_count,
        fetched = movies.len(),
        "Top-rated fetch completed"
    );
    Ok(movies)
}

/// Fetches the details of every movie in `movie_ids` concurrently.
///
/// All requests are in flight at once. The result is in input order
/// regardless of which response arrives first. If any request fails the
/// others are dropped and no partial list is returned.
///
/// # Errors
///
/// Returns the first error encountered, relabelled as `FetchOp::MoviesByIds`.
#[instrument(skip_all, fields(count = movie_ids.len()))]
pub async fn fetch_movies_by_ids<S: AsRef<str> + Sync>(
    api: &(impl LocalTmdbApi + Sync),
    movie_ids: &[S],
) -> Result<Vec<Movie>, TmdbError> {
    let requests = movie_ids
        .iter()
        .map(|id| api.fetch_movie_details(id.as_ref()));

    try_join_all(requests)
        .await
        .map_err(|e| e.with_op(FetchOp::MoviesByIds))
}
