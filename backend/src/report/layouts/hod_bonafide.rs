//! HOD bonafide certificate, one page per student.

use super::RenderContext;
use crate::report::document::{Alignment, Document, InlineImage, Paragraph, TextRun};
use crate::report::photo::{embed_image_bytes, CERTIFICATE_LOGO};
use common::model::student::{optional, StudentRecord};
use log::warn;

pub const LETTERHEAD_LINES: usize = 4;
pub const SIGNATURE_GAP_LINES: usize = 5;
pub const BODY_SIZE_PT: u8 = 14;
pub const SIGNATURE_LINE: &str = "Physical Education Director            Head of the Department";

const NAME_BLANK: &str = "____________________________";
const BRANCH_BLANK: &str = "___________________________";
const USN_BLANK: &str = "_____________________________";

/// The certificate sentence for one student; missing fields print as blanks.
pub fn certificate_text(student: &StudentRecord) -> String {
    let name = optional(&student.name).unwrap_or(NAME_BLANK);
    let branch = student
        .branch
        .as_deref()
        .and_then(optional)
        .unwrap_or(BRANCH_BLANK);
    let usn = optional(&student.usn).unwrap_or(USN_BLANK);
    format!(
        "This is to certify that Mr/Ms {} is a student of {} department studying in _____________ Semester Bearing USN {} for academic year \n20__-20__.And his/her present attendance is _________% he/she can/can't take part in sports activity on __/__/____ to__/__/____.",
        name, branch, usn
    )
}

pub fn render(doc: &mut Document, students: &[StudentRecord], ctx: &RenderContext<'_>) {
    let logo = ctx.logo.and_then(|bytes| embed_logo(doc, bytes));

    for student in students {
        if let Some(image) = logo {
            doc.add_paragraph(Paragraph::new().align(Alignment::Right).image(image));
        }
        doc.add_blank_lines(LETTERHEAD_LINES);
        doc.add_paragraph(
            Paragraph::new().run(TextRun::new(certificate_text(student)).size(BODY_SIZE_PT)),
        );
        doc.add_blank_lines(SIGNATURE_GAP_LINES);
        doc.add_paragraph(Paragraph::new().run(TextRun::new(SIGNATURE_LINE).size(BODY_SIZE_PT)));
        doc.add_page_break();
    }
}

/// The logo is embedded once and reused on every certificate page.
fn embed_logo(doc: &mut Document, bytes: &[u8]) -> Option<InlineImage> {
    match embed_image_bytes(doc, bytes, CERTIFICATE_LOGO) {
        Ok(image) => Some(image),
        Err(e) => {
            warn!("Institution logo could not be embedded, skipping it: {}", e);
            None
        }
    }
}
