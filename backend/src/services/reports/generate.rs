use super::{respond, ReportJob};
use crate::report::{ReportFormat, Selection};
use crate::services::flash::DATA_SELECT_PAGE;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::GenerateReportRequest;

/// `POST /api/reports/generate`.
pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<GenerateReportRequest>,
) -> HttpResponse {
    let payload = payload.into_inner();
    let format = ReportFormat::parse(&payload.report_format);
    let job = ReportJob {
        format,
        selection: Selection::Ids(payload.selected_students),
        edited: None,
        filename: format.filename(),
    };
    respond(req, state, job, DATA_SELECT_PAGE).await
}
