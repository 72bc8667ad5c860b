use crate::report::{load_students, ReportError, Selection};
use crate::services::download::send_docx;
use crate::services::flash::{redirect_with_error, TEMPLATE_UPLOAD_PAGE};
use crate::state::AppState;
use crate::templates::{fill_for_selection, UploadedTemplate, SESSION_COOKIE};
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::FillTemplateRequest;
use log::warn;

async fn session_template(req: &HttpRequest, state: &AppState) -> Option<UploadedTemplate> {
    let session = req.cookie(SESSION_COOKIE)?;
    state.sessions.get(session.value()).await
}

/// `POST /api/templates/fill`: the session's template filled with the
/// first selected student.
pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<FillTemplateRequest>,
) -> HttpResponse {
    let ids = payload.into_inner().selected_students;
    let template = match session_template(&req, &state).await {
        Some(template) if !ids.is_empty() => template,
        _ => return redirect_with_error(TEMPLATE_UPLOAD_PAGE, ReportError::MissingTemplate),
    };

    let worker_state = state.clone();
    let result = web::block(move || {
        let students = load_students(&worker_state.store, &Selection::Ids(ids))?;
        fill_for_selection(&template, &students)
    })
    .await;

    match result {
        Ok(Ok(filled)) => send_docx(&req, &state.config.scratch_dir, &filled.filename, &filled.bytes),
        Ok(Err(e)) => {
            warn!("Template not filled: {}", e);
            redirect_with_error(TEMPLATE_UPLOAD_PAGE, e)
        }
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}
