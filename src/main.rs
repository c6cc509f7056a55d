use dotenv::dotenv;
use movie_catalog::configuration::get_configuration;
use movie_catalog::routes::upload_image::S3AssetHost;
use movie_catalog::startup;
use movie_catalog::telemetry::{get_subscriber, init_subscriber};
use movie_catalog::util::check_for_necessary_env;
use sqlx::PgPool;
use std::net::TcpListener;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    check_for_necessary_env()?;

    let subscriber = get_subscriber("movie_catalog", "info", std::io::stdout);
    init_subscriber(subscriber)?;

    let configuration = get_configuration("configuration").map_err(|err| {
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!(
                "Failed to read `configuration.json`. Please make sure it exists and is valid JSON: {}",
                err
            ),
        )
    })?;

    let connection_pool = PgPool::connect(configuration.database.connection_string().as_str())
        .await
        .map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to connect to database: {}", err),
            )
        })?;
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to migrate the database: {}", err),
            )
        })?;

    let asset_host = Arc::new(S3AssetHost::from_settings(&configuration.asset_host)?);
    let listener = TcpListener::bind(configuration.application.address())?;
    tracing::info!("Listening on {}", configuration.application.address());

    startup::run_server(
        listener,
        connection_pool,
        asset_host,
        &configuration.application,
    )?
    .await
}
