use super::{respond, ReportJob};
use crate::report::{ReportFormat, Selection};
use crate::services::flash::REPORT_PAGE;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::GenerateAllRequest;

/// `POST /api/reports/generate-all`: every stored student, ordered by name.
pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<GenerateAllRequest>,
) -> HttpResponse {
    let format = ReportFormat::parse(&payload.report_format);
    let job = ReportJob {
        format,
        selection: Selection::All,
        edited: None,
        filename: format.complete_filename(),
    };
    respond(req, state, job, REPORT_PAGE).await
}
