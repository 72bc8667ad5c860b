//! # Report Template Engine
//!
//! Turns a format selector and an ordered list of students into a `.docx`.
//!
//! - [`ReportFormat`] parses the selector; anything unrecognised renders the
//!   detailed layout.
//! - [`load_students`] resolves a [`Selection`] against the record store and
//!   rejects empty selections.
//! - [`render`] dispatches to the layout in [`layouts`] and returns the
//!   in-memory [`Document`]; [`docx`] serializes it.
//!
//! Rendering is synchronous and shares no state between requests. Photo
//! problems never fail a report, see [`photo`].

pub mod document;
pub mod docx;
pub mod editor;
pub mod fill;
pub mod layouts;
pub mod photo;
pub mod placeholders;

pub use document::Document;
pub use layouts::RenderContext;

use crate::store::{StoreError, StudentOrder, StudentStore};
use common::model::student::StudentRecord;
use docx::PackageError;
use log::{debug, info};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Please select at least one student.")]
    EmptySelection,
    #[error("No students found to generate report.")]
    NoStudents,
    #[error("Please select students and upload a template first.")]
    MissingTemplate,
    #[error("Please upload a valid .docx file.")]
    InvalidTemplate,
    #[error("Report title and content are required.")]
    MissingContent,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Report could not be written: {0}")]
    Package(#[from] PackageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Detailed,
    Eligibility,
    HodBonafide,
    TournamentBonafide,
    Edited,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 5] = [
        ReportFormat::Detailed,
        ReportFormat::Eligibility,
        ReportFormat::HodBonafide,
        ReportFormat::TournamentBonafide,
        ReportFormat::Edited,
    ];

    /// Parses a selector; unknown selectors fall back to `Detailed`.
    pub fn parse(selector: &str) -> Self {
        match selector.trim() {
            "detailed" => ReportFormat::Detailed,
            "vtu_eligibility" | "eligibility" => ReportFormat::Eligibility,
            "hod_bonafide" => ReportFormat::HodBonafide,
            "tournament_bonafide" | "vtu_bonafide" => ReportFormat::TournamentBonafide,
            "edited" => ReportFormat::Edited,
            other => {
                debug!("Unknown report format {:?}, using detailed", other);
                ReportFormat::Detailed
            }
        }
    }

    /// Canonical selector, used in download names.
    pub fn slug(self) -> &'static str {
        match self {
            ReportFormat::Detailed => "detailed",
            ReportFormat::Eligibility => "vtu_eligibility",
            ReportFormat::HodBonafide => "hod_bonafide",
            ReportFormat::TournamentBonafide => "tournament_bonafide",
            ReportFormat::Edited => "edited",
        }
    }

    /// Download name for a report over selected students.
    pub fn filename(self) -> String {
        format!("{}_report.docx", self.slug())
    }

    /// Download name for a report over every stored student.
    pub fn complete_filename(self) -> String {
        format!("complete_{}_report.docx", self.slug())
    }
}

/// Which students a report covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every stored student, ordered by name.
    All,
    /// The given ids, in this order.
    Ids(Vec<i64>),
}

/// Fetches the students of `selection`.
///
/// An explicit selection that is empty, or that names no stored student,
/// is `EmptySelection`; `All` over an empty store is `NoStudents`.
pub fn load_students(
    store: &StudentStore,
    selection: &Selection,
) -> Result<Vec<StudentRecord>, ReportError> {
    match selection {
        Selection::Ids(ids) if ids.is_empty() => Err(ReportError::EmptySelection),
        Selection::Ids(ids) => {
            let students = store.select_by_ids(ids)?;
            if students.is_empty() {
                return Err(ReportError::EmptySelection);
            }
            Ok(students)
        }
        Selection::All => {
            let students = store.select_all(StudentOrder::Name)?;
            if students.is_empty() {
                return Err(ReportError::NoStudents);
            }
            Ok(students)
        }
    }
}

/// Builds the document for `format` over `students`.
///
/// An empty student list yields an empty document.
pub fn render(
    format: ReportFormat,
    students: &[StudentRecord],
    ctx: &RenderContext<'_>,
) -> Result<Document, ReportError> {
    let mut doc = Document::new();
    if students.is_empty() {
        return Ok(doc);
    }

    match format {
        ReportFormat::Detailed => layouts::detailed::render(&mut doc, students),
        ReportFormat::Eligibility => layouts::eligibility::render(&mut doc, students, ctx),
        ReportFormat::HodBonafide => layouts::hod_bonafide::render(&mut doc, students, ctx),
        ReportFormat::TournamentBonafide => layouts::tournament::render(&mut doc, students),
        ReportFormat::Edited => {
            let edited = ctx.edited.ok_or(ReportError::MissingContent)?;
            layouts::edited::render(&mut doc, students, edited);
        }
    }
    Ok(doc)
}

/// Renders and serializes a report, returning the `.docx` bytes.
pub fn generate(
    format: ReportFormat,
    students: &[StudentRecord],
    ctx: &RenderContext<'_>,
) -> Result<Vec<u8>, ReportError> {
    let doc = render(format, students, ctx)?;
    let bytes = docx::to_docx_bytes(&doc)?;
    info!(
        "Generated {} report for {} student(s), {} bytes, {} embedded image(s)",
        format.slug(),
        students.len(),
        bytes.len(),
        doc.media.len()
    );
    Ok(bytes)
}
