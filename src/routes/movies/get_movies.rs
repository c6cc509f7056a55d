use actix_web::{
    web::{Data, Query},
    HttpResponse,
};
use sqlx::PgPool;

use super::{find_movie, list_movies, MovieIdQuery};
use crate::error::ApiError;

pub async fn get_movies(
    query: Query<MovieIdQuery>,
    connection: Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    match query.parse()? {
        Some(id) => {
            let movie = find_movie(connection.as_ref(), id)
                .await
                .map_err(|err| ApiError::storage("Failed to fetch movies", err))?;
            match movie {
                Some(movie) => Ok(HttpResponse::Ok().json(movie)),
                None => Err(ApiError::NotFound("Movie not found".to_string())),
            }
        }
        None => {
            let movies = list_movies(connection.as_ref())
                .await
                .map_err(|err| ApiError::storage("Failed to fetch movies", err))?;
            tracing::info!("Fetched {} movies", movies.len());
            Ok(HttpResponse::Ok().json(movies))
        }
    }
}
