//! API endpoint modules.

pub mod accounts;
pub mod authors;
pub mod blogs;
pub mod feed;
pub mod health;
pub mod openapi;

use actix_web::web;

use crate::error::AppError;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;

/// Page routes served at the site root.
pub fn configure_site_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(feed::configure_routes)
        .configure(accounts::configure_routes)
        .configure(blogs::configure_routes)
        .configure(authors::configure_routes);
}

/// Extractor settings, health probes and site routes. Shared by the server and tests.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(web::scope("/api/v1").configure(configure_health_routes))
        .configure(configure_site_routes);
}

/// Malformed JSON bodies and unknown enum values become `InvalidInput`.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}

/// Non-numeric ids in the path can never match a row.
fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, req| AppError::NotFound(format!("Page {}", req.path())).into())
}
