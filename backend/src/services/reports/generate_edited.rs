use super::{respond, ReportJob};
use crate::report::{ReportFormat, Selection};
use crate::services::flash::DATA_SELECT_PAGE;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::GenerateEditedRequest;

/// `POST /api/reports/generate-edited`: the editor's content, filled per
/// selected student.
pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<GenerateEditedRequest>,
) -> HttpResponse {
    let payload = payload.into_inner();
    let format = ReportFormat::Edited;
    let edited = Some((payload.report_title, payload.report_content))
        .filter(|(title, content)| !title.trim().is_empty() && !content.trim().is_empty());
    let job = ReportJob {
        format,
        selection: Selection::Ids(payload.selected_students),
        edited,
        filename: format.filename(),
    };
    respond(req, state, job, DATA_SELECT_PAGE).await
}
