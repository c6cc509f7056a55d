use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::MovieCache;
use crate::routes::movies::{Movie, MoviePatch, NewMovie};

pub const GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "History",
    "Horror",
    "Musical",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Thriller",
    "War",
    "Western",
];

fn validate_genre(genre: &str) -> Result<(), ValidationError> {
    if genre.is_empty() {
        return Err(ValidationError::new("Genre missing")
            .with_message(Cow::from("Please select a genre.")));
    }
    if !GENRES.contains(&genre) {
        return Err(ValidationError::new("Unknown genre")
            .with_message(Cow::from("Please select a genre from the list.")));
    }
    Ok(())
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MovieForm {
    #[validate(length(min = 2, message = "Title must be at least 2 characters."))]
    pub title: String,
    #[validate(length(min = 2, message = "Director name must be at least 2 characters."))]
    pub director: String,
    #[validate(range(min = 1888, message = "Release year must be after 1888."))]
    pub release_year: i32,
    #[validate(custom(function = "validate_genre"))]
    pub genre: String,
    pub description: String,
    #[validate(range(min = 0, max = 10, message = "Rating must be between 0 and 10."))]
    pub rating: Option<i32>,
    pub poster: String,
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl MovieForm {
    pub fn blank(current_year: i32) -> Self {
        Self {
            title: String::new(),
            director: String::new(),
            release_year: current_year,
            genre: String::new(),
            description: String::new(),
            rating: None,
            poster: String::new(),
        }
    }

    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            director: movie.director.clone(),
            release_year: movie.release_year,
            genre: movie.genre.clone(),
            description: movie.description.clone().unwrap_or_default(),
            rating: movie.rating,
            poster: movie.poster.clone().unwrap_or_default(),
        }
    }

    pub fn set_poster(&mut self, url: impl Into<String>) {
        self.poster = url.into();
    }

    pub fn to_new_movie(&self) -> NewMovie {
        NewMovie {
            title: Some(self.title.clone()),
            director: Some(self.director.clone()),
            release_year: Some(self.release_year),
            genre: Some(self.genre.clone()),
            poster: non_empty(&self.poster),
            description: non_empty(&self.description),
            rating: self.rating,
            is_favorite: None,
        }
    }

    // Emptied poster and description clear the stored value. An empty rating
    // is left out so the stored one is kept.
    pub fn to_patch(&self) -> MoviePatch {
        MoviePatch {
            title: Some(Some(self.title.clone())),
            director: Some(Some(self.director.clone())),
            release_year: Some(Some(self.release_year)),
            genre: Some(Some(self.genre.clone())),
            poster: Some(non_empty(&self.poster)),
            description: Some(non_empty(&self.description)),
            rating: self.rating.map(Some),
            is_favorite: None,
        }
    }

    pub async fn submit(
        &self,
        cache: &MovieCache,
        movie_id: Option<i32>,
    ) -> Result<(), ValidationErrors> {
        self.validate()?;
        match movie_id {
            Some(id) => cache.update_movie(id, &self.to_patch()).await,
            None => cache.add_movie(&self.to_new_movie()).await,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::first_validation_message;
    use chrono::Utc;

    fn filled() -> MovieForm {
        MovieForm {
            title: "Inception".to_string(),
            director: "Christopher Nolan".to_string(),
            release_year: 2010,
            genre: "Sci-Fi".to_string(),
            description: String::new(),
            rating: Some(9),
            poster: String::new(),
        }
    }

    #[test]
    fn filled_form_is_valid() {
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn blank_form_needs_input() {
        let form = MovieForm::blank(2026);
        assert_eq!(form.release_year, 2026);
        assert!(form.validate().is_err());
    }

    #[test]
    fn short_title_is_rejected_with_its_message() {
        let form = MovieForm {
            title: "X".to_string(),
            ..filled()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            first_validation_message(&errors),
            "Title must be at least 2 characters."
        );
    }

    #[test]
    fn genre_must_come_from_the_list() {
        let form = MovieForm {
            genre: "Space Opera".to_string(),
            ..filled()
        };
        assert!(form.validate().is_err());
        let form = MovieForm {
            genre: String::new(),
            ..filled()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn year_and_rating_bounds() {
        let early = MovieForm {
            release_year: 1887,
            ..filled()
        };
        assert!(early.validate().is_err());
        let high = MovieForm {
            rating: Some(11),
            ..filled()
        };
        assert!(high.validate().is_err());
        let unrated = MovieForm {
            rating: None,
            ..filled()
        };
        assert!(unrated.validate().is_ok());
    }

    #[test]
    fn empty_optionals_are_left_out_of_a_new_movie() {
        let payload = filled().to_new_movie();
        assert_eq!(payload.poster, None);
        assert_eq!(payload.description, None);
        assert_eq!(payload.title.as_deref(), Some("Inception"));
    }

    #[test]
    fn emptied_optionals_clear_on_update() {
        let patch = filled().to_patch();
        assert_eq!(patch.poster, Some(None));
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.rating, Some(Some(9)));
        assert_eq!(patch.title, Some(Some("Inception".to_string())));
    }

    #[test]
    fn empty_rating_is_left_out_of_the_patch() {
        let form = MovieForm {
            rating: None,
            ..filled()
        };
        assert_eq!(form.to_patch().rating, None);
    }

    #[test]
    fn uploaded_poster_is_sent_verbatim() {
        let mut form = filled();
        form.set_poster("https://cdn.example/movie-posters/abc-poster.png");
        assert_eq!(
            form.to_new_movie().poster.as_deref(),
            Some("https://cdn.example/movie-posters/abc-poster.png")
        );
    }

    #[test]
    fn edit_form_is_prefilled_from_the_movie() {
        let movie = Movie {
            id: 1,
            title: "Inception".to_string(),
            director: "Nolan".to_string(),
            release_year: 2010,
            genre: "Sci-Fi".to_string(),
            poster: Some("https://cdn.example/p.png".to_string()),
            description: None,
            rating: Some(0),
            is_favorite: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let form = MovieForm::from_movie(&movie);
        assert_eq!(form.poster, "https://cdn.example/p.png");
        assert_eq!(form.description, "");
        assert_eq!(form.rating, Some(0));
        assert_eq!(form.to_patch().rating, Some(Some(0)));
    }
}
