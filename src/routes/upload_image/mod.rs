mod asset_host;
mod ingest;
mod staging;

pub use asset_host::*;
pub use ingest::*;
pub use staging::*;

use actix_web::{web, Resource};

pub fn upload_image_source() -> Resource {
    web::resource("/upload-image")
        .route(web::post().to(upload_image))
        .route(web::get().to(upload_method_not_allowed))
}
