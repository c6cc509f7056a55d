use std::borrow::Cow;

use actix_web::{web, Scope};
use serde::Deserialize;
use validator::ValidationError;

use super::{create_movie, delete_movie, get_movies, update_movie};
use crate::error::ApiError;

pub fn movie_source() -> Scope {
    web::scope("/movies").service(
        web::resource(["", "/"])
            .route(web::get().to(get_movies))
            .route(web::post().to(create_movie))
            .route(web::put().to(update_movie))
            .route(web::delete().to(delete_movie)),
    )
}

#[derive(Deserialize, Debug, Default)]
pub struct MovieIdQuery {
    pub id: Option<String>,
}

impl MovieIdQuery {
    pub fn parse(&self) -> Result<Option<i32>, ApiError> {
        match self.id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<i32>()
                .map(Some)
                .map_err(|_| ApiError::invalid_input("Invalid movie ID")),
        }
    }

    pub fn require(&self) -> Result<i32, ApiError> {
        self.parse()?
            .ok_or_else(|| ApiError::invalid_input("Missing movie ID"))
    }
}

pub fn validate_non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("Blank field")
            .with_message(Cow::from("Missing required fields")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(id: Option<&str>) -> MovieIdQuery {
        MovieIdQuery {
            id: id.map(str::to_string),
        }
    }

    #[test]
    fn absent_id_means_the_whole_collection() {
        assert_eq!(query(None).parse(), Ok(None));
        assert_eq!(query(Some("")).parse(), Ok(None));
    }

    #[test]
    fn required_id_must_be_present() {
        assert_eq!(
            query(None).require(),
            Err(ApiError::InvalidInput("Missing movie ID".to_string()))
        );
        assert_eq!(query(Some("42")).require(), Ok(42));
    }

    #[test]
    fn non_numeric_id_is_invalid_input() {
        assert_eq!(
            query(Some("abc")).parse(),
            Err(ApiError::InvalidInput("Invalid movie ID".to_string()))
        );
    }

    #[test]
    fn whitespace_only_values_are_blank() {
        assert!(validate_non_blank("   ").is_err());
        assert!(validate_non_blank("Nolan").is_ok());
    }
}
