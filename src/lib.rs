pub mod client;
pub mod configuration;
pub mod error;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod util;
