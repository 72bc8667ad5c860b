//! VTU eligibility proforma: a landscape sheet with one table row per player.

use super::{or_empty, RenderContext};
use crate::report::document::{
    Alignment, Cell, Document, Orientation, Paragraph, Table, TableStyle, TextRun,
};
use crate::report::photo::{embed_photo, PhotoOutcome, PROFORMA_PHOTO};
use common::model::student::{optional, StudentRecord};

pub const TITLE: &str = "ELIGIBILITYPROFORMA";
pub const SUBTITLE: &str = "ELIGIBITY PROFORMA OF PLAYERS REPRESENTING COLLEGE IN VTU INTER-COLLEGIATE SPORTS/TOURNAMENT 2025-26";
pub const COLLEGE_LABEL: &str = "COLLEGE NAME & ADDRESS : ";
pub const COLLEGE: &str = "DAYANANDA SAGAR ACADEMY OF TECHNOLOGY AND MANAGEMENT , BANGALURU 560082";
pub const GAME_LINE: &str = "GAME :- ____________";
pub const ORGANISER_LINE: &str =
    "ORGANISING COLLEGE:- __________________________________DIVISION : Bangalore division _________________";

pub const COLUMN_CODES: [&str; 7] = ["A", "B", "C", "D", "E", "F", "G"];
pub const COLUMN_LABELS: [&str; 7] = [
    "SL NO.",
    "Student Details",
    "Course Details",
    "Academic Details",
    "VTU Previous",
    "Photo",
    "Signature",
];

/// Number of header rows above the first student row.
pub const HEADER_ROWS: usize = 2;

const ACADEMIC_DETAILS: &str = "PUC Date: ___\nFirst Admission: ___\nCurrent Admission: ___";

pub fn render(doc: &mut Document, students: &[StudentRecord], ctx: &RenderContext<'_>) {
    doc.set_orientation(Orientation::Landscape);

    doc.add_paragraph(
        Paragraph::new()
            .align(Alignment::Center)
            .run(TextRun::new(TITLE).bold().underline()),
    );
    doc.add_paragraph(Paragraph::text(SUBTITLE).align(Alignment::Center));
    doc.add_paragraph(
        Paragraph::new()
            .run(TextRun::new(COLLEGE_LABEL))
            .run(TextRun::new(COLLEGE).underline()),
    );
    doc.add_text(GAME_LINE);
    doc.add_text(ORGANISER_LINE);
    doc.add_blank_lines(1);

    let mut table = Table::new(Some(TableStyle::Grid));
    table.push_row(COLUMN_CODES.iter().map(|c| Cell::text(*c)).collect());
    table.push_row(COLUMN_LABELS.iter().map(|c| Cell::text(*c)).collect());

    for (i, student) in students.iter().enumerate() {
        let photo = match embed_photo(doc, ctx.photos, student.photo(), PROFORMA_PHOTO) {
            PhotoOutcome::Embedded(image) => Cell::paragraph(Paragraph::new().image(image)),
            fallback => Cell::text(fallback.fallback_text().unwrap_or_default()),
        };

        table.push_row(vec![
            Cell::text((i + 1).to_string()),
            Cell::text(student_details(student)),
            Cell::text(course_details(student)),
            Cell::text(ACADEMIC_DETAILS),
            Cell::text(previous_participation(student)),
            photo,
            Cell::empty(),
        ]);
    }

    doc.add_table(table);
}

fn student_details(student: &StudentRecord) -> String {
    format!(
        "Name: {}\nFather: {}\nMother: {}\nBranch: {}\nUSN: {}",
        student.name,
        or_empty(&student.father_name),
        or_empty(&student.mother_name),
        or_empty(&student.branch),
        student.usn,
    )
}

/// Contact and blood group lines appear only when stored.
fn course_details(student: &StudentRecord) -> String {
    let mut lines = vec![
        format!("Course: {}", or_empty(&student.branch)),
        "Duration: 4 Years".to_string(),
        format!("DOB: {}", or_empty(&student.dob)),
    ];
    if let Some(phone) = optional(&student.phone) {
        lines.push(format!("Contact: {}", phone));
    }
    if let Some(blood_group) = student.blood_group.as_deref().and_then(optional) {
        lines.push(format!("Blood Group: {}", blood_group));
    }
    lines.join("\n")
}

fn previous_participation(student: &StudentRecord) -> String {
    format!("Game: {}\nYear: ___", or_empty(&student.sports))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> StudentRecord {
        StudentRecord {
            id: 1,
            name: "Asha Rao".into(),
            dob: Some("2003-04-11".into()),
            mother_name: None,
            father_name: Some("Ramesh".into()),
            branch: Some("CSE".into()),
            semester: None,
            usn: "1DS21CS001".into(),
            phone: "9876543210".into(),
            email: None,
            photo_ref: None,
            sports: Some("Chess".into()),
            blood_group: None,
            gender: None,
        }
    }

    #[test]
    fn course_details_skip_missing_blood_group() {
        assert_eq!(
            course_details(&student()),
            "Course: CSE\nDuration: 4 Years\nDOB: 2003-04-11\nContact: 9876543210"
        );
        let mut with_group = student();
        with_group.blood_group = Some("O+".into());
        assert!(course_details(&with_group).ends_with("\nBlood Group: O+"));
    }

    #[test]
    fn absent_parent_is_blank() {
        assert_eq!(
            student_details(&student()),
            "Name: Asha Rao\nFather: Ramesh\nMother: \nBranch: CSE\nUSN: 1DS21CS001"
        );
    }
}
