//! # Template Service Module
//!
//! Endpoints under `/api/templates` for custom `.docx` templates.
//!
//! ## Sub-modules:
//! - `upload`: stores a template and ties it to the caller's session cookie.
//! - `fill`: fills the session's template with a selected student.

mod fill;
mod upload;

use actix_web::web::{post, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for all template-related routes.
///
/// # Registered Routes:
///
/// *   **`POST /upload`**:
///     - **Handler**: `upload::process`
///     - **Description**: Accepts a multipart `template` field holding a `.docx`.
///       The file is stored under the md5 of its bytes and recorded as the
///       session's template; a `sportsdesk_session` cookie is set if missing.
///
/// *   **`POST /fill`**:
///     - **Handler**: `fill::process`
///     - **Description**: Expects JSON `{selected_students}`. Substitutes the
///       student tokens of the session's template with the first selected
///       student and returns `filled_template_<name>.docx`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/upload", post().to(upload::process))
        .route("/fill", post().to(fill::process))
}
