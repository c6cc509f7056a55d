use std::fmt::Display;

use crate::routes::movies::Movie;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieState {
    pub movies: Vec<Movie>,
    pub selected_movie: Option<Movie>,
    pub is_loading: bool,
    pub error: Option<String>,
}

pub fn request_started(state: MovieState) -> MovieState {
    MovieState {
        is_loading: true,
        error: None,
        ..state
    }
}

fn request_failed(state: MovieState, error: impl Display) -> MovieState {
    MovieState {
        is_loading: false,
        error: Some(error.to_string()),
        ..state
    }
}

pub fn movies_fetched<E: Display>(state: MovieState, result: Result<Vec<Movie>, E>) -> MovieState {
    match result {
        Ok(movies) => MovieState {
            movies,
            is_loading: false,
            ..state
        },
        Err(err) => request_failed(state, err),
    }
}

pub fn movie_fetched<E: Display>(state: MovieState, result: Result<Movie, E>) -> MovieState {
    match result {
        Ok(movie) => MovieState {
            selected_movie: Some(movie),
            is_loading: false,
            ..state
        },
        Err(err) => request_failed(state, err),
    }
}

pub fn movie_added<E: Display>(state: MovieState, result: Result<Movie, E>) -> MovieState {
    match result {
        Ok(movie) => {
            let mut movies = state.movies;
            movies.push(movie);
            MovieState {
                movies,
                is_loading: false,
                ..state
            }
        }
        Err(err) => request_failed(state, err),
    }
}

pub fn movie_updated<E: Display>(
    state: MovieState,
    id: i32,
    result: Result<Movie, E>,
) -> MovieState {
    match result {
        Ok(updated) => {
            let movies = state
                .movies
                .into_iter()
                .map(|movie| if movie.id == id { updated.clone() } else { movie })
                .collect();
            let selected_movie = match state.selected_movie {
                Some(selected) if selected.id == id => Some(updated),
                other => other,
            };
            MovieState {
                movies,
                selected_movie,
                is_loading: false,
                error: state.error,
            }
        }
        Err(err) => request_failed(state, err),
    }
}

pub fn movie_deleted<T, E: Display>(
    state: MovieState,
    id: i32,
    result: Result<T, E>,
) -> MovieState {
    match result {
        Ok(_) => {
            let movies = state
                .movies
                .into_iter()
                .filter(|movie| movie.id != id)
                .collect();
            let selected_movie = state.selected_movie.filter(|movie| movie.id != id);
            MovieState {
                movies,
                selected_movie,
                is_loading: false,
                error: state.error,
            }
        }
        Err(err) => request_failed(state, err),
    }
}

pub fn selected_movie_set(state: MovieState, movie: Option<Movie>) -> MovieState {
    MovieState {
        selected_movie: movie,
        ..state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn movie(id: i32, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            director: "Nolan".to_string(),
            release_year: 2010,
            genre: "Sci-Fi".to_string(),
            poster: None,
            description: None,
            rating: Some(8),
            is_favorite: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn loaded(movies: Vec<Movie>, selected: Option<Movie>) -> MovieState {
        MovieState {
            movies,
            selected_movie: selected,
            ..MovieState::default()
        }
    }

    #[test]
    fn starting_a_request_clears_the_last_error() {
        let state = MovieState {
            error: Some("Failed to fetch movies".to_string()),
            ..MovieState::default()
        };
        let state = request_started(state);
        assert!(state.is_loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn fetch_replaces_the_list() {
        let state = request_started(loaded(vec![movie(1, "Old")], None));
        let state = movies_fetched::<String>(state, Ok(vec![movie(2, "Memento")]));
        assert!(!state.is_loading);
        assert_eq!(state.movies.len(), 1);
        assert_eq!(state.movies[0].id, 2);
    }

    #[test]
    fn failure_keeps_prior_data() {
        let before = loaded(vec![movie(1, "Inception")], Some(movie(1, "Inception")));
        let state = movies_fetched(request_started(before.clone()), Err("Failed to fetch movies"));
        assert_eq!(state.movies, before.movies);
        assert_eq!(state.selected_movie, before.selected_movie);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch movies"));
        assert!(!state.is_loading);
    }

    #[test]
    fn get_sets_the_selection() {
        let state = request_started(MovieState::default());
        let state = movie_fetched::<String>(state, Ok(movie(3, "Tenet")));
        assert_eq!(state.selected_movie.map(|m| m.id), Some(3));
        assert!(state.movies.is_empty());
    }

    #[test]
    fn added_movie_is_appended() {
        let state = loaded(vec![movie(1, "Inception")], None);
        let state = movie_added::<String>(request_started(state), Ok(movie(2, "Memento")));
        let ids: Vec<i32> = state.movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn update_replaces_the_row_and_the_matching_selection() {
        let state = loaded(
            vec![movie(1, "Inception"), movie(2, "Memento")],
            Some(movie(2, "Memento")),
        );
        let state = request_started(state);
        let state = movie_updated::<String>(state, 2, Ok(movie(2, "Memento (2000)")));
        assert_eq!(state.movies[0].title, "Inception");
        assert_eq!(state.movies[1].title, "Memento (2000)");
        assert_eq!(
            state.selected_movie.map(|m| m.title),
            Some("Memento (2000)".to_string())
        );
    }

    #[test]
    fn update_leaves_an_unrelated_selection_alone() {
        let state = loaded(vec![movie(1, "Inception")], Some(movie(9, "Dunkirk")));
        let state = movie_updated::<String>(state, 1, Ok(movie(1, "Inception!")));
        assert_eq!(state.selected_movie.map(|m| m.id), Some(9));
    }

    #[test]
    fn delete_drops_the_row_and_clears_the_matching_selection() {
        let state = loaded(
            vec![movie(1, "Inception"), movie(2, "Memento")],
            Some(movie(1, "Inception")),
        );
        let state = movie_deleted::<(), String>(request_started(state), 1, Ok(()));
        assert_eq!(state.movies.len(), 1);
        assert_eq!(state.movies[0].id, 2);
        assert_eq!(state.selected_movie, None);
    }

    #[test]
    fn failed_delete_changes_nothing_but_the_error() {
        let before = loaded(vec![movie(1, "Inception")], Some(movie(1, "Inception")));
        let state = request_started(before.clone());
        let state = movie_deleted::<(), _>(state, 1, Err("Failed to delete movie"));
        assert_eq!(state.movies, before.movies);
        assert_eq!(state.selected_movie, before.selected_movie);
        assert_eq!(state.error.as_deref(), Some("Failed to delete movie"));
    }

    #[test]
    fn selection_can_be_set_directly() {
        let state = selected_movie_set(MovieState::default(), Some(movie(4, "Interstellar")));
        assert_eq!(state.selected_movie.as_ref().map(|m| m.id), Some(4));
        let state = selected_movie_set(state, None);
        assert_eq!(state.selected_movie, None);
    }
}
