use crate::report::ReportError;
use crate::services::flash::{redirect_with_error, TEMPLATE_UPLOAD_PAGE};
use crate::state::AppState;
use crate::templates::{TemplateSessions, SESSION_COOKIE};
use actix_multipart::Multipart;
use actix_web::cookie::Cookie;
use actix_web::{web, HttpRequest, HttpResponse};
use futures_util::StreamExt;
use log::{info, warn};
use serde_json::json;

/// Multipart field carrying the `.docx`.
const TEMPLATE_FIELD: &str = "template";

/// `POST /api/templates/upload`: stores the template and remembers it for
/// the caller's session, replacing any earlier upload.
pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: Multipart,
) -> HttpResponse {
    let (filename, bytes) = match read_template(payload).await {
        Ok(Some(upload)) => upload,
        Ok(None) => return redirect_with_error(TEMPLATE_UPLOAD_PAGE, ReportError::InvalidTemplate),
        Err(e) => {
            warn!("Template upload could not be read: {}", e);
            return redirect_with_error(TEMPLATE_UPLOAD_PAGE, ReportError::InvalidTemplate);
        }
    };

    let library = state.templates.clone();
    let stored = web::block(move || library.store(&filename, &bytes)).await;
    let template = match stored {
        Ok(Ok(template)) => template,
        Ok(Err(e)) => return redirect_with_error(TEMPLATE_UPLOAD_PAGE, e),
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };

    let session = req
        .cookie(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .unwrap_or_else(TemplateSessions::new_session_id);
    if let Some(previous) = state.sessions.set(&session, template.clone()).await {
        info!(
            "Session template {} replaced by {}",
            previous.reference, template.reference
        );
    }

    let cookie = Cookie::build(SESSION_COOKIE, session)
        .path("/")
        .http_only(true)
        .finish();
    HttpResponse::Ok().cookie(cookie).json(json!({
        "reference": template.reference,
        "filename": template.original_name,
    }))
}

/// Returns the uploaded file name and bytes, or `None` without a file.
async fn read_template(
    mut payload: Multipart,
) -> Result<Option<(String, Vec<u8>)>, actix_multipart::MultipartError> {
    let mut upload = None;
    while let Some(item) = payload.next().await {
        let mut field = item?;
        let is_template = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .map(|name| name == TEMPLATE_FIELD)
            .unwrap_or(false);
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            bytes.extend_from_slice(&chunk?);
        }
        if is_template && !filename.is_empty() {
            upload = Some((filename, bytes));
        }
    }
    Ok(upload)
}
