use actix_web::{
    web::{Data, Json, Query},
    HttpResponse,
};
use sqlx::PgPool;

use super::{MovieIdQuery, MoviePatch};
use crate::error::ApiError;

pub async fn update_movie(
    query: Query<MovieIdQuery>,
    body: Json<MoviePatch>,
    connection: Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let id = query.require()?;
    let patch = body.into_inner();
    if patch.is_empty() {
        return Err(ApiError::invalid_input("No update fields provided"));
    }

    let movie = super::store::update_movie(connection.as_ref(), id, patch).await?;
    tracing::info!("Movie {} updated successfully", movie.id);
    Ok(HttpResponse::Ok().json(movie))
}
