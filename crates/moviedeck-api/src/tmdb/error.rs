//! TMDB fetch errors.

use std::fmt;

use reqwest::StatusCode;

/// The fetch operation an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOp {
    /// `movie/{id}` for a single movie.
    MovieDetails,
    /// `genre/movie/list`.
    MovieGenres,
    /// `movie/top_rated`, one or more pages.
    TopRatedMovies,
    /// Concurrent `movie/{id}` requests for a list of IDs.
    MoviesByIds,
}

impl fmt::Display for FetchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MovieDetails | Self::MoviesByIds => "details fetch",
            Self::MovieGenres => "genre fetch",
            Self::TopRatedMovies => "top-rated fetch",
        };
        f.write_str(label)
    }
}

/// Error returned by every TMDB fetch operation.
///
/// Distinguishes rejected input, transport failures, non-success HTTP
/// status and undecodable bodies so callers can react to each.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum TmdbError {
    /// Arguments were rejected before any request was sent.
    InvalidInput {
        /// Failed operation.
        op: FetchOp,
        /// Why the input was rejected.
        reason: String,
    },
    /// The request could not be sent or the response could not be read.
    Transport {
        /// Failed operation.
        op: FetchOp,
        /// Underlying HTTP client error.
        source: reqwest::Error,
    },
    /// The server answered with a non-2xx status.
    Status {
        /// Failed operation.
        op: FetchOp,
        /// HTTP status code.
        status: StatusCode,
        /// TMDB `status_message`, or the raw body when it is not a TMDB error.
        message: String,
    },
    /// The body did not match the expected shape.
    Decode {
        /// Failed operation.
        op: FetchOp,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

impl TmdbError {
    /// Returns the operation that failed.
    #[must_use]
    pub const fn op(&self) -> FetchOp {
        match self {
            Self::InvalidInput { op, .. }
            | Self::Transport { op, .. }
            | Self::Status { op, .. }
            | Self::Decode { op, .. } => *op,
        }
    }

    /// Returns the HTTP status for `Status` errors.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Relabels the error with another operation, keeping the cause.
    #[must_use]
    pub fn with_op(mut self, new_op: FetchOp) -> Self {
        match &mut self {
            Self::InvalidInput { op, .. }
            | Self::Transport { op, .. }
            | Self::Status { op, .. }
            | Self::Decode { op, .. } => *op = new_op,
        }
        self
    }
}

impl fmt::Display for TmdbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { op, reason } => {
                write!(f, "{op} failed: invalid input: {reason}")
            }
            Self::Transport { op, source } => write!(f, "{op} failed: transport error: {source}"),
            Self::Status {
                op,
                status,
                message,
            } => write!(f, "{op} failed: HTTP {status}: {message}"),
            Self::Decode { op, source } => write!(f, "{op} failed: malformed response: {source}"),
        }
    }
}

impl std::error::Error for TmdbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::InvalidInput { .. } | Self::Status { .. } => None,
        }
    }
}
