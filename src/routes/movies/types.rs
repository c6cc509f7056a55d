use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::validate_non_blank;
use crate::error::ApiError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub director: String,
    pub release_year: i32,
    pub genre: String,
    pub poster: Option<String>,
    pub description: Option<String>,
    pub rating: Option<i32>,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

// Partial update. `None` leaves a column alone and `Some(None)` is an explicit
// JSON `null`, which clears a nullable column and is rejected on the others.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoviePatch {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub director: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub release_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub genre: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub poster: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub rating: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<Option<bool>>,
}

// A key that is present always yields `Some`, even when its value is null.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn required<T>(value: Option<T>) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::invalid_input("Missing required fields"))
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        *self == MoviePatch::default()
    }

    pub fn apply(self, draft: &mut MovieDraft) -> Result<(), ApiError> {
        if let Some(title) = self.title {
            draft.title = required(title)?;
        }
        if let Some(director) = self.director {
            draft.director = required(director)?;
        }
        if let Some(release_year) = self.release_year {
            draft.release_year = required(release_year)?;
        }
        if let Some(genre) = self.genre {
            draft.genre = required(genre)?;
        }
        if let Some(poster) = self.poster {
            draft.poster = poster;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(rating) = self.rating {
            draft.rating = rating;
        }
        if let Some(is_favorite) = self.is_favorite {
            draft.is_favorite = is_favorite
                .ok_or_else(|| ApiError::invalid_input("Invalid value for isFavorite"))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct MovieDraft {
    #[validate(custom(function = "validate_non_blank"))]
    pub title: String,
    #[validate(custom(function = "validate_non_blank"))]
    pub director: String,
    #[validate(range(min = 1888, message = "Release year must be 1888 or later"))]
    pub release_year: i32,
    #[validate(custom(function = "validate_non_blank"))]
    pub genre: String,
    pub poster: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, max = 10, message = "Rating must be between 0 and 10"))]
    pub rating: Option<i32>,
    pub is_favorite: bool,
}

impl MovieDraft {
    // `None` when a required field is missing or falsy.
    pub fn from_new(movie: NewMovie) -> Option<Self> {
        let title = movie.title.filter(|v| !v.is_empty())?;
        let director = movie.director.filter(|v| !v.is_empty())?;
        let release_year = movie.release_year.filter(|v| *v != 0)?;
        let genre = movie.genre.filter(|v| !v.is_empty())?;
        Some(Self {
            title,
            director,
            release_year,
            genre,
            poster: movie.poster,
            description: movie.description,
            rating: movie.rating,
            is_favorite: movie.is_favorite.unwrap_or(false),
        })
    }
}

impl From<Movie> for MovieDraft {
    fn from(movie: Movie) -> Self {
        Self {
            title: movie.title,
            director: movie.director,
            release_year: movie.release_year,
            genre: movie.genre,
            poster: movie.poster,
            description: movie.description,
            rating: movie.rating,
            is_favorite: movie.is_favorite,
        }
    }
}
