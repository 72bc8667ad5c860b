//! Serving generated documents as attachments.
//!
//! The bytes are written to a scratch file that is kept after the response
//! is sent; nothing removes these files, the scratch directory has to be
//! cleared externally.

use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpRequest, HttpResponse};
use log::debug;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::Builder;

/// Writes `bytes` to a new file in `dir` and returns its path.
pub fn write_scratch(dir: &Path, bytes: &[u8]) -> std::io::Result<PathBuf> {
    let mut file = Builder::new()
        .prefix("report_")
        .suffix(".docx")
        .tempfile_in(dir)?;
    file.write_all(bytes)?;
    let (_, path) = file.keep()?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}

/// Streams the file at `path` as a download named `filename`.
pub fn attachment(req: &HttpRequest, path: &Path, filename: &str) -> std::io::Result<HttpResponse> {
    let mime = mime_guess::from_path(filename).first_or_octet_stream();
    let file = NamedFile::open(path)?
        .set_content_type(mime)
        .set_content_disposition(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename.to_string())],
        });
    Ok(file.into_response(req))
}

/// Stores `bytes` in the scratch directory and answers with the download.
pub fn send_docx(
    req: &HttpRequest,
    scratch_dir: &Path,
    filename: &str,
    bytes: &[u8],
) -> HttpResponse {
    let sent = write_scratch(scratch_dir, bytes).and_then(|path| attachment(req, &path, filename));
    match sent {
        Ok(response) => response,
        Err(e) => {
            log::error!("Could not serve {}: {}", filename, e);
            HttpResponse::InternalServerError().body(format!("Report could not be written: {}", e))
        }
    }
}
