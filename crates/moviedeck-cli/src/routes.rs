//! Static route table mapping browse paths to views.

/// A resolved view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Top-rated movies over the configured page range.
    BestMovies,
    /// Movies from the watched list in config.
    WatchedMovies,
    /// Details of a single movie.
    Movie {
        /// TMDB movie ID taken from the path.
        id: String,
    },
}

impl Route {
    /// Display name of the view.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BestMovies => "Best Movies",
            Self::WatchedMovies => "Watched Movies",
            Self::Movie { .. } => "movie",
        }
    }
}

/// Kind of view a pattern leads to.
#[derive(Debug, Clone, Copy)]
enum View {
    BestMovies,
    WatchedMovies,
    Movie,
}

/// Path patterns. `:name` matches exactly one non-empty segment.
const ROUTES: &[(&str, View)] = &[
    ("/watchedmovies", View::WatchedMovies),
    ("/bestmovies", View::BestMovies),
    ("/movie/:id", View::Movie),
];

/// Paths that forward to another path before matching.
const REDIRECTS: &[(&str, &str)] = &[("/", "/bestmovies")];

/// Resolves a browse path to its route.
///
/// A trailing slash is ignored, and redirects are followed once.
/// Returns `None` for paths that match no route.
#[must_use]
pub fn resolve_route(path: &str) -> Option<Route> {
    let normalized = normalize(path);
    let target = REDIRECTS
        .iter()
        .find(|(from, _)| *from == normalized)
        .map_or(normalized, |(_, to)| *to);

    ROUTES.iter().find_map(|(pattern, view)| {
        let params = match_pattern(pattern, target)?;
        Some(match view {
            View::BestMovies => Route::BestMovies,
            View::WatchedMovies => Route::WatchedMovies,
            View::Movie => Route::Movie {
                id: params.into_iter().next()?,
            },
        })
    })
}

/// Lists every routable pattern with its view name, in table order.
#[must_use]
pub fn route_table() -> Vec<(&'static str, &'static str)> {
    let mut table: Vec<(&'static str, &'static str)> = REDIRECTS
        .iter()
        .map(|(from, _)| (*from, "home"))
        .collect();
    table.extend(ROUTES.iter().map(|(pattern, view)| {
        let name = match view {
            View::BestMovies => Route::BestMovies.name(),
            View::WatchedMovies => Route::WatchedMovies.name(),
            View::Movie => "movie",
        };
        (*pattern, name)
    }));
    table
}

/// Strips a trailing slash from everything but the root path.
fn normalize(path: &str) -> &str {
    let trimmed = path.trim();
    if trimmed.len() > 1 {
        trimmed.strip_suffix('/').unwrap_or(trimmed)
    } else {
        trimmed
    }
}

/// Matches `path` against `pattern`, returning captured `:param` segments.
fn match_pattern(pattern: &str, path: &str) -> Option<Vec<String>> {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    let mut params = Vec::new();

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(params),
            (Some(expected), Some(actual)) => {
                if expected.starts_with(':') {
                    if actual.is_empty() {
                        return None;
                    }
                    params.push(String::from(actual));
                } else if expected != actual {
                    return None;
                }
            }
            _ => return None,
        }
    }
}
