pub mod health_check;
pub mod movies;
pub mod upload_image;

pub use health_check::*;
pub use movies::movie_source;
pub use upload_image::upload_image_source;
