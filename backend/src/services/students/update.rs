use super::form::{read_submission, Submission};
use super::{save_photo, SubmitError};
use crate::services::flash::{edit_student_page, redirect_with_error};
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use common::model::validation::validate_student;
use log::{info, warn};
use serde_json::json;

/// `POST /api/students/{id}`: edits a record. Without a new photo upload the
/// stored photo reference is kept.
pub async fn process(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    payload: Multipart,
) -> HttpResponse {
    let id = path.into_inner();
    let page = edit_student_page(id);

    let submission = match read_submission(payload).await {
        Ok(submission) => submission,
        Err(e) => return redirect_with_error(&page, SubmitError::Upload(e.to_string())),
    };

    let result = web::block(move || update_student(&state, id, submission)).await;
    match result {
        Ok(Ok(())) => HttpResponse::Ok().json(json!({ "id": id })),
        Ok(Err(e)) => {
            warn!("Student {} not updated: {}", id, e);
            redirect_with_error(&page, e)
        }
        Err(e) => redirect_with_error(&page, SubmitError::Upload(e.to_string())),
    }
}

pub fn update_student(state: &AppState, id: i64, submission: Submission) -> Result<(), SubmitError> {
    validate_student(&submission.form)?;
    let photo_ref = save_photo(state, submission.photo)?;
    state.store.update(id, &submission.form, photo_ref.as_deref())?;
    info!(
        "Updated student {}{}",
        id,
        if photo_ref.is_some() { " with new photo" } else { "" }
    );
    Ok(())
}
