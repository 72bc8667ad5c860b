use super::or_empty;
use crate::report::document::Document;
use common::model::student::StudentRecord;

pub const TITLE: &str = "Selected Students Report";

/// Label and value of every detail line, in print order.
fn detail_lines(student: &StudentRecord) -> [(&'static str, &str); 11] {
    [
        ("Date of Birth: ", or_empty(&student.dob)),
        ("Mother's Name: ", or_empty(&student.mother_name)),
        ("Father's Name: ", or_empty(&student.father_name)),
        ("Branch: ", or_empty(&student.branch)),
        ("Semester: ", or_empty(&student.semester)),
        ("USN: ", student.usn.as_str()),
        ("Phone: ", student.phone.as_str()),
        ("Email: ", or_empty(&student.email)),
        ("Sports: ", or_empty(&student.sports)),
        ("Blood Group: ", or_empty(&student.blood_group)),
        ("Gender: ", or_empty(&student.gender)),
    ]
}

/// One plain block of field lines per student, one student per page.
pub fn render(doc: &mut Document, students: &[StudentRecord]) {
    doc.add_heading(TITLE, 0);
    for student in students {
        doc.add_heading(student.name.as_str(), 1);
        for (label, value) in detail_lines(student) {
            doc.add_text(format!("{}{}", label, value));
        }
        doc.add_page_break();
    }
}
