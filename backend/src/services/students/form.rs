//! Reads the multipart student form used by data entry and edit.

use actix_multipart::Multipart;
use common::model::student::StudentForm;
use futures_util::StreamExt;

/// Name of the optional file field carrying the photo.
const PHOTO_FIELD: &str = "photo";

/// An uploaded photo: the client's file name and its bytes.
#[derive(Debug)]
pub struct PhotoUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct Submission {
    pub form: StudentForm,
    /// `None` when no file was chosen.
    pub photo: Option<PhotoUpload>,
}

/// Collects every text field into a trimmed [`StudentForm`] and keeps the
/// photo upload, if any. An empty file part counts as no photo.
pub async fn read_submission(
    mut payload: Multipart,
) -> Result<Submission, actix_multipart::MultipartError> {
    let mut submission = Submission::default();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()))
            .unwrap_or_default();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            bytes.extend_from_slice(&chunk?);
        }

        if name == PHOTO_FIELD {
            let filename = field
                .content_disposition()
                .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                .unwrap_or_default();
            if !filename.is_empty() && !bytes.is_empty() {
                submission.photo = Some(PhotoUpload { filename, bytes });
            }
        } else {
            let value = String::from_utf8_lossy(&bytes).into_owned();
            submission.form.set(&name, value);
        }
    }

    submission.form = submission.form.normalize();
    Ok(submission)
}
