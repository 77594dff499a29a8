pub mod classify;
pub mod config;
pub mod error;
pub mod models;
pub mod resolve;
pub mod routes;
pub mod scan;

use std::path::PathBuf;

use actix_cors::Cors;

pub struct AppState {
    pub files_root: PathBuf,
}

pub fn cors(origins: &[String]) -> Cors {
    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return Cors::default()
            .allow_any_origin()
            .send_wildcard()
            .allow_any_method()
            .allow_any_header();
    }

    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}
