use std::sync::Arc;

use tokio::sync::watch;

use super::{
    movie_added, movie_deleted, movie_fetched, movie_updated, movies_fetched, request_started,
    selected_movie_set, MovieApiClient, MovieState,
};
use crate::routes::movies::{Movie, MoviePatch, NewMovie};

// Only one request is tracked; overlapping actions race on `is_loading`.
#[derive(Clone)]
pub struct MovieCache {
    api: MovieApiClient,
    state: Arc<watch::Sender<MovieState>>,
}

impl MovieCache {
    pub fn new(api: MovieApiClient) -> Self {
        let (state, _) = watch::channel(MovieState::default());
        Self {
            api,
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<MovieState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> MovieState {
        self.state.borrow().clone()
    }

    fn apply(&self, transition: impl FnOnce(MovieState) -> MovieState) {
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = transition(current);
        });
    }

    pub async fn fetch_movies(&self) {
        self.apply(request_started);
        let result = self.api.list_movies().await;
        self.apply(|state| movies_fetched(state, result));
    }

    pub async fn get_movie(&self, id: i32) {
        self.apply(request_started);
        let result = self.api.get_movie(id).await;
        self.apply(|state| movie_fetched(state, result));
    }

    pub async fn add_movie(&self, movie: &NewMovie) {
        self.apply(request_started);
        let result = self.api.create_movie(movie).await;
        self.apply(|state| movie_added(state, result));
    }

    pub async fn update_movie(&self, id: i32, patch: &MoviePatch) {
        self.apply(request_started);
        let result = self.api.update_movie(id, patch).await;
        self.apply(|state| movie_updated(state, id, result));
    }

    pub async fn delete_movie(&self, id: i32) {
        self.apply(request_started);
        let result = self.api.delete_movie(id).await;
        self.apply(|state| movie_deleted(state, id, result));
    }

    pub fn set_selected_movie(&self, movie: Option<Movie>) {
        self.apply(|state| selected_movie_set(state, movie));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn unreachable_server_is_reported_as_an_error() {
        let cache = MovieCache::new(MovieApiClient::new("http://127.0.0.1:1"));
        let mut updates = cache.subscribe();

        cache.fetch_movies().await;

        assert!(updates.has_changed().unwrap());
        let state = updates.borrow_and_update().clone();
        assert!(!state.is_loading);
        assert!(state.error.is_some());
        assert!(state.movies.is_empty());
    }

    #[test]
    fn clones_share_one_state() {
        let cache = MovieCache::new(MovieApiClient::new("http://localhost:8000"));
        let other = cache.clone();
        let updates = other.subscribe();

        cache.set_selected_movie(None);

        assert!(updates.has_changed().unwrap());
        assert_eq!(other.snapshot(), cache.snapshot());
    }
}
