use actix_web::{
    web::{Data, Query},
    HttpResponse,
};
use sqlx::PgPool;

use super::MovieIdQuery;
use crate::error::ApiError;

pub async fn delete_movie(
    query: Query<MovieIdQuery>,
    connection: Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let id = query.require()?;
    match super::store::delete_movie(connection.as_ref(), id).await {
        Ok(Some(movie)) => {
            tracing::info!("Movie {} deleted successfully", movie.id);
            Ok(HttpResponse::Ok().json(movie))
        }
        Ok(None) => Err(ApiError::NotFound("Movie not found".to_string())),
        Err(err) => Err(ApiError::storage("Failed to delete movie", err)),
    }
}
