//! Log-based rendering of fetched movies and genres.

use moviedeck_api::tmdb::{Genre, Movie};

/// Resolves a movie's genre names.
///
/// Uses the embedded `genres` when the movie carries them (details
/// responses), otherwise looks `genre_ids` up in `genres`. Unknown IDs are
/// skipped.
#[must_use]
pub fn genre_names<'a>(movie: &'a Movie, genres: &'a [Genre]) -> Vec<&'a str> {
    if let Some(embedded) = movie.genres.as_ref() {
        return embedded.iter().map(|g| g.name.as_str()).collect();
    }
    movie
        .genre_ids
        .iter()
        .filter_map(|id| genres.iter().find(|g| g.id == *id))
        .map(|g| g.name.as_str())
        .collect()
}

/// Formats an optional value, or `-` when absent.
fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Logs one row per movie followed by a total line.
pub fn log_movie_list(movies: &[Movie], genres: &[Genre]) {
    tracing::info!("ID\tTitle\t\t\tReleaseDate\tVotes\tGenres");
    for movie in movies {
        let names = genre_names(movie, genres);
        tracing::info!(
            "{}\t{}\t{}\t{:.1}\t{}",
            movie.id,
            movie.title,
            or_dash(movie.release_date.as_deref()),
            movie.vote_average,
            if names.is_empty() {
                String::from("-")
            } else {
                names.join(", ")
            },
        );
    }
    tracing::info!("Total: {} movies", movies.len());
}

/// Logs the details of a single movie.
pub fn log_movie_details(movie: &Movie) {
    tracing::info!("ID: {}", movie.id);
    tracing::info!("Title: {}", movie.title);
    tracing::info!("Original Title: {}", movie.original_title);
    tracing::info!("Release Date: {}", or_dash(movie.release_date.as_deref()));
    tracing::info!(
        "Runtime: {}",
        movie
            .runtime
            .map_or_else(|| String::from("-"), |r| format!("{r}min"))
    );
    tracing::info!(
        "Rating: {:.1} ({} votes)",
        movie.vote_average,
        movie.vote_count
    );
    let names = genre_names(movie, &[]);
    tracing::info!(
        "Genres: {}",
        if names.is_empty() {
            String::from("-")
        } else {
            names.join(", ")
        }
    );
    tracing::info!("Overview: {}", movie.overview);
}

/// Logs the genre list.
pub fn log_genres(genres: &[Genre]) {
    tracing::info!("ID\tName");
    for genre in genres {
        tracing::info!("{}\t{}", genre.id, genre.name);
    }
    tracing::info!("Total: {} genres", genres.len());
}

#[cfg(test)]
mod tests {
    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;

    fn genre(id: u32, name: &str) -> Genre {
        Genre {
            id,
            name: String::from(name),
        }
    }

    fn movie(id: u64, title: &str, genre_ids: Vec<u32>) -> Movie {
        Movie {
            id,
            title: String::from(title),
            original_title: String::from(title),
            original_language: String::from("en"),
            overview: String::from("An overview."),
            release_date: Some(String::from("1994-09-23")),
            popularity: 10.0,
            vote_average: 8.7,
            vote_count: 26_071,
            poster_path: None,
            backdrop_path: None,
            runtime: None,
            adult: false,
            video: false,
            genre_ids,
            genres: None,
        }
    }

    #[test]
    fn test_genre_names_from_ids() {
        // Arrange
        let genres = vec![genre(18, "Drama"), genre(80, "Crime")];
        let m = movie(278, "The Shawshank Redemption", vec![80, 18, 9999]);

        // Act
        let names = genre_names(&m, &genres);

        // Assert
        assert_eq!(names, vec!["Crime", "Drama"]);
    }

    #[test]
    fn test_genre_names_prefers_embedded() {
        // Arrange
        let mut m = movie(550, "Fight Club", vec![80]);
        m.genres = Some(vec![genre(18, "Drama")]);

        // Act
        let names = genre_names(&m, &[genre(80, "Crime")]);

        // Assert
        assert_eq!(names, vec!["Drama"]);
    }

    #[test]
    fn test_log_movie_list() {
        // Arrange
        let genres = vec![genre(18, "Drama"), genre(80, "Crime")];
        let movies = vec![movie(278, "The Shawshank Redemption", vec![18, 80])];

        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().with_fields(expect::msg(
                "ID\tTitle\t\t\tReleaseDate\tVotes\tGenres",
            )))
            .event(expect::event().with_fields(expect::msg(
                "278\tThe Shawshank Redemption\t1994-09-23\t8.7\tDrama, Crime",
            )))
            .event(expect::event().with_fields(expect::msg("Total: 1 movies")))
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            log_movie_list(&movies, &genres);
        });

        // Assert
        handle.assert_finished();
    }

    #[test]
    fn test_log_movie_list_without_genres() {
        // Arrange
        let mut m = movie(1, "Untitled", vec![]);
        m.release_date = None;

        let (subscriber, handle) = subscriber::mock()
            .event(expect::event())
            .event(expect::event().with_fields(expect::msg("1\tUntitled\t-\t8.7\t-")))
            .event(expect::event().with_fields(expect::msg("Total: 1 movies")))
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            log_movie_list(&[m], &[]);
        });

        // Assert
        handle.assert_finished();
    }

    #[test]
    fn test_log_genres() {
        // Arrange
        let genres = vec![genre(28, "Action")];

        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().with_fields(expect::msg("ID\tName")))
            .event(expect::event().with_fields(expect::msg("28\tAction")))
            .event(expect::event().with_fields(expect::msg("Total: 1 genres")))
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            log_genres(&genres);
        });

        // Assert
        handle.assert_finished();
    }

    #[test]
    fn test_log_movie_details_runtime_line() {
        // Arrange
        let mut m = movie(550, "Fight Club", vec![]);
        m.runtime = Some(139);
        m.genres = Some(vec![genre(18, "Drama")]);

        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().with_fields(expect::msg("ID: 550")))
            .event(expect::event().with_fields(expect::msg("Title: Fight Club")))
            .event(expect::event().with_fields(expect::msg("Original Title: Fight Club")))
            .event(expect::event().with_fields(expect::msg("Release Date: 1994-09-23")))
            .event(expect::event().with_fields(expect::msg("Runtime: 139min")))
            .event(expect::event().with_fields(expect::msg("Rating: 8.7 (26071 votes)")))
            .event(expect::event().with_fields(expect::msg("Genres: Drama")))
            .event(expect::event().with_fields(expect::msg("Overview: An overview.")))
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            log_movie_details(&m);
        });

        // Assert
        handle.assert_finished();
    }
}
