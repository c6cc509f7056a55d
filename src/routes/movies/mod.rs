mod create_movie;
mod delete_movie;
mod get_movies;
pub mod store;
mod types;
mod update_movie;
mod util;

pub use create_movie::*;
pub use delete_movie::*;
pub use get_movies::*;
pub use store::{find_movie, insert_movie, list_movies};
pub use types::*;
pub use update_movie::*;
pub use util::*;
