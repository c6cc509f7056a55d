use serde::Serialize;

use crate::routes::movies::Movie;

pub const ALL_GENRES: &str = "All";

pub fn genre_filter_options(movies: &[Movie]) -> Vec<String> {
    let mut options = vec![ALL_GENRES.to_string()];
    for movie in movies {
        if !options[1..].contains(&movie.genre) {
            options.push(movie.genre.clone());
        }
    }
    options
}

pub fn filter_movies<'a>(movies: &'a [Movie], search: &str, genre: &str) -> Vec<&'a Movie> {
    let needle = search.to_lowercase();
    movies
        .iter()
        .filter(|movie| {
            movie.title.to_lowercase().contains(&needle)
                || movie.director.to_lowercase().contains(&needle)
        })
        .filter(|movie| genre == ALL_GENRES || movie.genre == genre)
        .collect()
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CatalogSummary {
    pub total: usize,
    pub genres: usize,
    pub average_rating: f64,
}

impl CatalogSummary {
    // unrated counts as 0
    pub fn from_movies(movies: &[Movie]) -> Self {
        let total = movies.len();
        let genres = genre_filter_options(movies).len() - 1;
        let average_rating = if total == 0 {
            0.0
        } else {
            let sum: i64 = movies
                .iter()
                .map(|movie| i64::from(movie.rating.unwrap_or(0)))
                .sum();
            sum as f64 / total as f64
        };
        Self {
            total,
            genres,
            average_rating,
        }
    }
}
