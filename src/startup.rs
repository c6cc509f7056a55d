use crate::configuration::ApplicationSettings;
use crate::error::ApiError;
use crate::routes::health_check;
use crate::routes::movies::movie_source;
use crate::routes::upload_image::{upload_image_source, AssetHost, StagingArea};

use actix_web::{
    dev::Server,
    web::{self, Data},
    App, HttpServer,
};
use sqlx::PgPool;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use actix_cors::Cors;
use actix_web::http::header;

fn configure_cors(frontend_url: &str) -> Cors {
    let mut cors = Cors::default();
    cors = if frontend_url == "*" {
        cors.allow_any_origin()
    } else {
        cors.allowed_origin(frontend_url)
    };
    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::ACCEPT])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::InvalidInput(format!("Invalid request body: {}", err)).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::InvalidInput(format!("Invalid query string: {}", err)).into()
    })
}

pub fn run_server(
    listener: TcpListener,
    db_pool: PgPool,
    asset_host: Arc<dyn AssetHost>,
    settings: &ApplicationSettings,
) -> Result<Server, std::io::Error> {
    let db_pool = Data::new(db_pool);
    let asset_host: Data<dyn AssetHost> = Data::from(asset_host);
    let staging = Data::new(StagingArea::new(settings.staging_dir.as_str()));
    let frontend_url = settings.frontend_url.clone();

    let server = HttpServer::new(move || {
        let cors = configure_cors(frontend_url.as_str());

        App::new()
            .wrap(cors)
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .app_data(query_config())
            .app_data(db_pool.clone())
            .app_data(asset_host.clone())
            .app_data(staging.clone())
            .route("/health_check", web::get().to(health_check))
            .service(movie_source())
            .service(upload_image_source())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
