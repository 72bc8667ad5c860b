//! Tournament (VTU) bonafide letter: one shared letter listing every
//! selected student.

use super::or_empty;
use crate::report::document::{
    inches_to_twips, Alignment, Cell, Document, Paragraph, Table, TableStyle, TextRun,
};
use common::model::student::StudentRecord;

pub const LETTER_SIZE_PT: u8 = 11;
pub const RECIPIENT: &str = "To .";
pub const SUBJECT: &str =
    "Sub : List of Students participating in ______________(game ) tournament .";
pub const REFERENCE: &str = "With reference to the above subject , I wish to state that the following Bonafide students of our college will be participating in _____________________________________ tournament .";
pub const REQUEST: &str = "Hence, I request you to kindly permit them and oblige";
pub const TABLE_HEADER: [&str; 4] = ["Sl.No.", "Name", "USN", "Branch"];
pub const DIRECTOR_SIGNATURE: &str = "Physical Education Director";
pub const PRINCIPAL_SIGNATURE: &str = "Principal";

fn letter_line(run: TextRun) -> Paragraph {
    Paragraph::new()
        .align(Alignment::Left)
        .indent(0)
        .run(run.size(LETTER_SIZE_PT))
}

pub fn render(doc: &mut Document, students: &[StudentRecord]) {
    doc.add_blank_lines(4);
    doc.add_paragraph(letter_line(TextRun::new(RECIPIENT)));
    doc.add_blank_lines(3);
    doc.add_paragraph(letter_line(TextRun::new(SUBJECT).bold()));
    doc.add_blank_lines(1);
    doc.add_paragraph(letter_line(TextRun::new(REFERENCE)));
    doc.add_blank_lines(1);
    doc.add_paragraph(letter_line(TextRun::new(REQUEST)));
    doc.add_blank_lines(1);

    let mut list = Table::new(Some(TableStyle::Grid));
    list.push_row(TABLE_HEADER.iter().map(|h| Cell::text(*h)).collect());
    for (i, student) in students.iter().enumerate() {
        list.push_row(vec![
            Cell::text((i + 1).to_string()),
            Cell::text(student.name.as_str()),
            Cell::text(student.usn.as_str()),
            Cell::text(or_empty(&student.branch)),
        ]);
    }
    doc.add_table(list);

    doc.add_blank_lines(2);

    let column = inches_to_twips(3.0);
    let mut signatures = Table::new(None).widths(vec![column, column]);
    signatures.push_row(vec![
        Cell::text(DIRECTOR_SIGNATURE),
        Cell::paragraph(Paragraph::text(PRINCIPAL_SIGNATURE).align(Alignment::Right)),
    ]);
    doc.add_table(signatures);
}
