//! # Student Record Service
//!
//! HTTP surface of the record store under `/api/students`. Creating and
//! editing a student take the multipart data-entry form (text fields plus an
//! optional `photo` file); every failure a user can correct redirects back to
//! the submitting page with the message in `?error=`.
//!
//! ## Sub-modules:
//! - `form`: multipart parsing into a trimmed `StudentForm`.
//! - `create`, `update`, `delete`: record mutations.
//! - `get`: listing, name search and single-record lookup.

mod create;
mod delete;
pub mod form;
mod get;
mod update;

use crate::photos::{PhotoError, PhotoResolver};
use crate::state::AppState;
use crate::store::StoreError;
use actix_web::web::{delete as delete_route, get as get_route, post, scope};
use actix_web::Scope;
use common::model::student::StudentRecord;
use common::model::validation::ValidationError;
use form::PhotoUpload;
use serde::Serialize;
use thiserror::Error;

const API_PATH: &str = "/api/students";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Photo could not be saved: {0}")]
    Photo(#[from] PhotoError),
    #[error("Form could not be read: {0}")]
    Upload(String),
}

/// A record as shown to the browser, with its photo location resolved.
#[derive(Debug, Serialize)]
pub struct StudentView {
    #[serde(flatten)]
    pub record: StudentRecord,
    pub photo_url: Option<String>,
}

impl StudentView {
    pub fn new(record: StudentRecord, photos: &dyn PhotoResolver) -> Self {
        let photo_url = record.photo().map(|r| photos.display_url(r));
        StudentView { record, photo_url }
    }
}

/// Stores the uploaded photo, if any, and returns its reference.
fn save_photo(state: &AppState, photo: Option<PhotoUpload>) -> Result<Option<String>, PhotoError> {
    photo
        .map(|upload| state.photos.save(&upload.filename, &upload.bytes))
        .transpose()
}

/// Configures the `/api/students` scope.
///
/// # Registered Routes:
///
/// *   **`GET /`**: every record, newest first.
/// *   **`GET /search?name=`**: case-insensitive name search, ordered by name.
/// *   **`GET /{id}`**: one record with its `photo_url`.
/// *   **`POST /`**: multipart create; `201 {id}` or redirect to `/data-entry`.
/// *   **`POST /{id}`**: multipart update; an omitted photo keeps the stored one.
/// *   **`DELETE /{id}`**: delete; `204`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get_route().to(get::list))
        .route("", post().to(create::process))
        .route("/search", get_route().to(get::search))
        .route("/{id}", get_route().to(get::process))
        .route("/{id}", post().to(update::process))
        .route("/{id}", delete_route().to(delete::process))
}
