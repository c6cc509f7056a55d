use chrono::Utc;
use sqlx::PgPool;
use tracing::Instrument;
use validator::Validate;

use super::{Movie, MovieDraft, MoviePatch};
use crate::error::ApiError;
use crate::util::first_validation_message;

pub async fn list_movies(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetching every movie from the database");
    sqlx::query_as::<_, Movie>(r#"SELECT * FROM movies ORDER BY id"#)
        .fetch_all(pool)
        .instrument(query_span)
        .await
}

pub async fn find_movie(pool: &PgPool, id: i32) -> Result<Option<Movie>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetching movie from the database", id);
    sqlx::query_as::<_, Movie>(r#"SELECT * FROM movies WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
}

pub async fn insert_movie(pool: &PgPool, draft: &MovieDraft) -> Result<Movie, sqlx::Error> {
    let query_span = tracing::info_span!("Saving new movie in the database", ?draft);
    let now = Utc::now();
    sqlx::query_as::<_, Movie>(
        r#"
			INSERT INTO movies
				(title, director, release_year, genre, poster, description, rating, is_favorite, created_at, updated_at)
			VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
			RETURNING *
		"#,
    )
    .bind(&draft.title)
    .bind(&draft.director)
    .bind(draft.release_year)
    .bind(&draft.genre)
    .bind(&draft.poster)
    .bind(&draft.description)
    .bind(draft.rating)
    .bind(draft.is_favorite)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .instrument(query_span)
    .await
}

// Last write wins. The row lock only spans one read-merge-write.
pub async fn update_movie(pool: &PgPool, id: i32, patch: MoviePatch) -> Result<Movie, ApiError> {
    let query_span = tracing::info_span!("Updating movie in the database", id, ?patch);
    let storage_error = |err: sqlx::Error| ApiError::storage("Failed to update movie", err);

    let mut transaction = pool.begin().await.map_err(storage_error)?;

    let current = sqlx::query_as::<_, Movie>(r#"SELECT * FROM movies WHERE id = $1 FOR UPDATE"#)
        .bind(id)
        .fetch_optional(&mut *transaction)
        .instrument(query_span.clone())
        .await
        .map_err(storage_error)?
        .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;

    let mut draft = MovieDraft::from(current);
    patch.apply(&mut draft)?;
    draft
        .validate()
        .map_err(|err| ApiError::InvalidInput(first_validation_message(&err)))?;

    let updated = sqlx::query_as::<_, Movie>(
        r#"
			UPDATE movies SET
				title = $1, director = $2, release_year = $3, genre = $4, poster = $5,
				description = $6, rating = $7, is_favorite = $8, updated_at = $9
			WHERE id = $10
			RETURNING *
		"#,
    )
    .bind(&draft.title)
    .bind(&draft.director)
    .bind(draft.release_year)
    .bind(&draft.genre)
    .bind(&draft.poster)
    .bind(&draft.description)
    .bind(draft.rating)
    .bind(draft.is_favorite)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(&mut *transaction)
    .instrument(query_span)
    .await
    .map_err(storage_error)?;

    transaction.commit().await.map_err(storage_error)?;
    Ok(updated)
}

pub async fn delete_movie(pool: &PgPool, id: i32) -> Result<Option<Movie>, sqlx::Error> {
    let query_span = tracing::info_span!("Deleting movie from the database", id);
    sqlx::query_as::<_, Movie>(r#"DELETE FROM movies WHERE id = $1 RETURNING *"#)
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
}
