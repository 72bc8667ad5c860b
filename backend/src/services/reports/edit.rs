use crate::report::editor::prepare_draft;
use crate::report::ReportError;
use crate::services::flash::{redirect_with_error, DATA_SELECT_PAGE};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::requests::GenerateReportRequest;

/// `POST /api/reports/edit`: default editor title and content for the
/// chosen format, with the selected students.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<GenerateReportRequest>,
) -> HttpResponse {
    let payload = payload.into_inner();
    let result = web::block(move || {
        prepare_draft(&state.store, &payload.report_format, &payload.selected_students)
    })
    .await;

    match result {
        Ok(Ok(draft)) => HttpResponse::Ok().json(draft),
        Ok(Err(e @ ReportError::Store(_))) => HttpResponse::ServiceUnavailable().body(e.to_string()),
        Ok(Err(e)) => redirect_with_error(DATA_SELECT_PAGE, e),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}
