//! # Report Service
//!
//! Endpoints under `/api/reports` that turn a selection of students into a
//! `.docx` download. Record loading, rendering and packaging run on the
//! blocking pool; the finished bytes go through the scratch directory to
//! the client as an attachment.
//!
//! Empty selections and other user errors redirect back to the submitting
//! page with the message in `?error=`.

mod edit;
mod generate;
mod generate_all;
mod generate_edited;

use crate::report::{self, ReportError, ReportFormat, Selection};
use crate::services::download::send_docx;
use crate::services::flash::redirect_with_error;
use crate::state::AppState;
use actix_web::web::{post, scope};
use actix_web::{web, HttpRequest, HttpResponse, Scope};
use log::warn;

const API_PATH: &str = "/api/reports";

/// What a download request asks for, resolved off the async runtime.
struct ReportJob {
    format: ReportFormat,
    selection: Selection,
    /// Title and content of a free-form report.
    edited: Option<(String, String)>,
    filename: String,
}

fn run_job(state: &AppState, job: &ReportJob) -> Result<Vec<u8>, ReportError> {
    let students = report::load_students(&state.store, &job.selection)?;
    let mut ctx = state.render_context();
    if let Some((title, content)) = &job.edited {
        ctx = ctx.with_edited(title, content);
    }
    report::generate(job.format, &students, &ctx)
}

/// Generates the report described by `job` and answers with the download,
/// or redirects to `error_page`.
async fn respond(
    req: HttpRequest,
    state: web::Data<AppState>,
    job: ReportJob,
    error_page: &str,
) -> HttpResponse {
    let worker_state = state.clone();
    let result = web::block(move || {
        let bytes = run_job(&worker_state, &job)?;
        Ok::<_, ReportError>((job.filename, bytes))
    })
    .await;

    match result {
        Ok(Ok((filename, bytes))) => send_docx(&req, &state.config.scratch_dir, &filename, &bytes),
        Ok(Err(e)) => {
            warn!("Report not generated: {}", e);
            redirect_with_error(error_page, e)
        }
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

/// Configures the `/api/reports` scope.
///
/// # Registered Routes:
///
/// *   **`POST /generate`**: JSON `{report_format, selected_students}`; the
///     selected students in the chosen layout.
/// *   **`POST /generate-all`**: JSON `{report_format}`; every stored student,
///     ordered by name.
/// *   **`POST /edit`**: JSON `{report_format, selected_students}`; the editor's
///     default title and content plus the selected records.
/// *   **`POST /generate-edited`**: JSON `{selected_students, report_title,
///     report_content}`; the free-form report.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/generate", post().to(generate::process))
        .route("/generate-all", post().to(generate_all::process))
        .route("/edit", post().to(edit::process))
        .route("/generate-edited", post().to(generate_edited::process))
}
