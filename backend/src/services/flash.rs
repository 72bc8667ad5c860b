//! Error redirects that carry a user-visible message.
//!
//! The browser pages read the `error` query parameter and show it as a
//! flash message, so every failure a user can fix is a `303 See Other` back
//! to the page that submitted the request.

use actix_web::http::header::LOCATION;
use actix_web::HttpResponse;
use std::fmt::Display;

pub const DATA_ENTRY_PAGE: &str = "/data-entry";
pub const DATA_SELECT_PAGE: &str = "/data-select";
pub const REPORT_PAGE: &str = "/report";
pub const TEMPLATE_UPLOAD_PAGE: &str = "/template-upload";

pub fn edit_student_page(id: i64) -> String {
    format!("/edit-student/{}", id)
}

pub fn error_location(page: &str, message: &str) -> String {
    format!("{}?error={}", page, urlencoding::encode(message))
}

pub fn redirect_with_error(page: &str, message: impl Display) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, error_location(page, &message.to_string())))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_url_encoded() {
        assert_eq!(
            error_location(DATA_SELECT_PAGE, "Please select at least one student."),
            "/data-select?error=Please%20select%20at%20least%20one%20student."
        );
    }
}
