use super::form::{read_submission, Submission};
use super::{save_photo, SubmitError};
use crate::services::flash::{redirect_with_error, DATA_ENTRY_PAGE};
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use common::model::validation::validate_student;
use log::{info, warn};
use serde_json::json;

/// `POST /api/students`: validates the form, stores the photo, inserts the
/// record.
pub async fn process(state: web::Data<AppState>, payload: Multipart) -> HttpResponse {
    let submission = match read_submission(payload).await {
        Ok(submission) => submission,
        Err(e) => return redirect_with_error(DATA_ENTRY_PAGE, SubmitError::Upload(e.to_string())),
    };

    let result = web::block(move || create_student(&state, submission)).await;
    match result {
        Ok(Ok(id)) => HttpResponse::Created().json(json!({ "id": id })),
        Ok(Err(e)) => {
            warn!("Student not created: {}", e);
            redirect_with_error(DATA_ENTRY_PAGE, e)
        }
        Err(e) => redirect_with_error(DATA_ENTRY_PAGE, SubmitError::Upload(e.to_string())),
    }
}

pub fn create_student(state: &AppState, submission: Submission) -> Result<i64, SubmitError> {
    validate_student(&submission.form)?;
    let photo_ref = save_photo(state, submission.photo)?;
    let id = state.store.insert(&submission.form, photo_ref.as_deref())?;
    info!("Created student {} ({})", id, submission.form.usn);
    Ok(id)
}
