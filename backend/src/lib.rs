//! Student records and certificate generation for a college sports
//! department.
//!
//! The binary in `main.rs` wires these modules into an actix-web server;
//! integration tests drive the same [`app`] factory.

pub mod config;
pub mod photos;
pub mod report;
pub mod services;
pub mod state;
pub mod store;
pub mod templates;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, Error};
use photos::LOCAL_URL_PREFIX;
use state::AppState;

/// Request body limit for JSON payloads.
const JSON_LIMIT: usize = 10 * 1024 * 1024;

/// Builds the application with every service scope registered.
pub fn app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    let uploads = state.photos.local().dir().to_path_buf();
    App::new()
        .app_data(web::JsonConfig::default().limit(JSON_LIMIT))
        .app_data(state)
        .service(services::students::configure_routes())
        .service(services::reports::configure_routes())
        .service(services::templates::configure_routes())
        .service(actix_files::Files::new(LOCAL_URL_PREFIX, uploads))
}
