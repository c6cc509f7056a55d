use actix_web::{
    web::{Data, Json},
    HttpResponse,
};
use sqlx::PgPool;
use validator::Validate;

use super::{insert_movie, MovieDraft, NewMovie};
use crate::error::ApiError;
use crate::util::first_validation_message;

pub async fn create_movie(
    body: Json<NewMovie>,
    connection: Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    tracing::info!("Got request body: {:?}", body);
    let draft = MovieDraft::from_new(body.into_inner())
        .ok_or_else(|| ApiError::invalid_input("Missing required fields"))?;
    if let Err(error) = draft.validate() {
        return Err(ApiError::InvalidInput(first_validation_message(&error)));
    }

    let movie = insert_movie(connection.as_ref(), &draft)
        .await
        .map_err(|err| ApiError::storage("Failed to create movie", err))?;
    tracing::info!("Movie {} created successfully", movie.id);
    Ok(HttpResponse::Created().json(movie))
}
