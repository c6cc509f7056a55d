mod api;
mod cache;
mod form;
mod state;
mod view;

pub use api::*;
pub use cache::*;
pub use form::*;
pub use state::*;
pub use view::*;
