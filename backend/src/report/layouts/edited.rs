use crate::report::document::Document;
use crate::report::placeholders::substitute;
use common::model::student::StudentRecord;

/// Caller-supplied report title and token-bearing content.
#[derive(Debug, Clone, Copy)]
pub struct EditedContent<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

/// Per student: substituted content, one paragraph per line, then a page
/// break.
pub fn render(doc: &mut Document, students: &[StudentRecord], edited: EditedContent<'_>) {
    doc.set_title(edited.title);
    for student in students {
        let text = substitute(edited.content, student);
        for line in text.split('\n') {
            doc.add_text(line.trim_end_matches('\r'));
        }
        doc.add_page_break();
    }
}
