//! # Uploaded templates
//!
//! Custom `.docx` templates uploaded by a user. Each upload is stored once
//! under the md5 of its bytes; the returned [`UploadedTemplate`] is what a
//! session remembers and what the fill routine receives.

pub mod sessions;

pub use sessions::{TemplateSessions, SESSION_COOKIE};

use crate::report::docx::PackageError;
use crate::report::fill::fill_template;
use crate::report::ReportError;
use common::model::student::StudentRecord;
use log::info;
use md5::Context;
use std::path::{Path, PathBuf};

/// Local file header signature every zip package starts with.
const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedTemplate {
    /// md5 of the uploaded bytes, also the stored file stem.
    pub reference: String,
    pub original_name: String,
    pub path: PathBuf,
}

/// A filled template ready for download.
#[derive(Debug)]
pub struct FilledTemplate {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    dir: PathBuf,
}

impl TemplateLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        TemplateLibrary { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validates and stores an uploaded template.
    pub fn store(&self, filename: &str, bytes: &[u8]) -> Result<UploadedTemplate, ReportError> {
        if !is_docx(filename, bytes) {
            return Err(ReportError::InvalidTemplate);
        }

        let mut hasher = Context::new();
        hasher.consume(bytes);
        let reference = format!("{:x}", hasher.finalize());
        let path = self.dir.join(format!("{}.docx", reference));

        std::fs::create_dir_all(&self.dir).map_err(PackageError::from)?;
        std::fs::write(&path, bytes).map_err(PackageError::from)?;
        info!("Stored template {} as {}", filename, path.display());

        Ok(UploadedTemplate {
            reference,
            original_name: filename.to_string(),
            path,
        })
    }
}

fn is_docx(filename: &str, bytes: &[u8]) -> bool {
    filename.to_ascii_lowercase().ends_with(".docx") && bytes.starts_with(ZIP_SIGNATURE)
}

/// Fills `template` with the first of `students`.
pub fn fill_for_selection(
    template: &UploadedTemplate,
    students: &[StudentRecord],
) -> Result<FilledTemplate, ReportError> {
    let student = students.first().ok_or(ReportError::EmptySelection)?;
    let source = std::fs::read(&template.path).map_err(|e| {
        log::warn!("Template {} is no longer readable: {}", template.reference, e);
        ReportError::MissingTemplate
    })?;

    let bytes = fill_template(&source, student).map_err(|e| match e {
        PackageError::Zip(_) => ReportError::InvalidTemplate,
        other => ReportError::Package(other),
    })?;
    info!(
        "Filled template {} for student {} ({} bytes)",
        template.reference,
        student.id,
        bytes.len()
    );

    Ok(FilledTemplate {
        filename: filled_filename(&student.name),
        bytes,
    })
}

pub fn filled_filename(student_name: &str) -> String {
    let name: String = student_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("filled_template_{}.docx", name)
}
