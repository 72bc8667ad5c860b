mod support;

use pretty_assertions::assert_eq;
use sportsdesk::report::document::{Block, Orientation};
use sportsdesk::report::layouts::eligibility::HEADER_ROWS;
use sportsdesk::report::layouts::hod_bonafide::SIGNATURE_LINE;
use sportsdesk::report::layouts::tournament::PRINCIPAL_SIGNATURE;
use sportsdesk::report::{render, Document, RenderContext, ReportError, ReportFormat};
use support::{png_bytes, record, temp_photos};

fn render_with(format: ReportFormat, students: &[common::model::student::StudentRecord]) -> Document {
    let (_dir, photos) = temp_photos();
    render(format, students, &RenderContext::new(&photos)).expect("render")
}

#[test]
fn eligibility_table_has_header_rows_plus_one_per_student() {
    for n in [1usize, 3] {
        let students: Vec<_> = (0..n)
            .map(|i| record(i as i64 + 1, &format!("Student {}", i), &format!("1DS21CS00{}", i)))
            .collect();
        let doc = render_with(ReportFormat::Eligibility, &students);

        assert_eq!(doc.orientation, Orientation::Landscape);
        let tables: Vec<_> = doc.tables().collect();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].row_count(), n + HEADER_ROWS);
        assert_eq!(tables[0].column_count(), 7);
        assert_eq!(
            tables[0].cell(HEADER_ROWS, 0).expect("serial cell").plain_text(),
            "1"
        );
    }
}

#[test]
fn eligibility_photo_cell_distinguishes_missing_photos() {
    let (dir, photos) = temp_photos();
    std::fs::write(dir.path().join("present.png"), png_bytes(40, 52)).expect("write photo");
    std::fs::write(dir.path().join("broken.png"), b"not an image").expect("write photo");

    let mut no_photo = record(1, "No Photo Student", "1DS21CS001");
    no_photo.photo_ref = Some("  ".to_string());
    let mut missing = record(2, "Missing Photo Student", "1DS21CS002");
    missing.photo_ref = Some("gone.png".to_string());
    let mut broken = record(3, "Broken Photo Student", "1DS21CS003");
    broken.photo_ref = Some("broken.png".to_string());
    let mut present = record(4, "Present Photo Student", "1DS21CS004");
    present.photo_ref = Some("present.png".to_string());

    let doc = render(
        ReportFormat::Eligibility,
        &[no_photo, missing, broken, present],
        &RenderContext::new(&photos),
    )
    .expect("render");

    let table = doc.tables().next().expect("proforma table");
    let photo_cell = |row: usize| table.cell(HEADER_ROWS + row, 5).expect("photo cell");
    assert_eq!(photo_cell(0).plain_text(), "No Photo");
    assert_eq!(photo_cell(1).plain_text(), "Photo Not Found");
    assert_eq!(photo_cell(2).plain_text(), "Photo Available");
    assert_eq!(photo_cell(3).paragraphs[0].images().count(), 1);
    assert_eq!(doc.media.len(), 1);
}

#[test]
fn eligibility_details_omit_absent_blood_group() {
    let mut student = record(1, "Asha Rao", "1DS21CS001");
    student.blood_group = Some("O+".to_string());
    let other = record(2, "Bhavya N", "1DS21CS002");
    let doc = render_with(ReportFormat::Eligibility, &[student, other]);

    let table = doc.tables().next().expect("proforma table");
    let course = |row: usize| table.cell(HEADER_ROWS + row, 2).expect("course cell").plain_text();
    assert_eq!(
        course(0),
        "Course: CSE\nDuration: 4 Years\nDOB: 2003-04-11\nContact: 9876543210\nBlood Group: O+"
    );
    assert!(!course(1).contains("Blood Group"));
    assert!(table
        .cell(HEADER_ROWS, 1)
        .expect("details cell")
        .plain_text()
        .starts_with("Name: Asha Rao\nFather: Ramesh\nMother: Lakshmi"));
}

#[test]
fn detailed_report_puts_each_student_on_its_own_page() {
    let doc = render_with(
        ReportFormat::Detailed,
        &[record(1, "Asha Rao", "1DS21CS001"), record(2, "Bhavya N", "1DS21CS002")],
    );

    let texts: Vec<String> = doc.paragraphs().map(|p| p.plain_text()).collect();
    assert_eq!(texts[0], "Selected Students Report");
    assert_eq!(texts[1], "Asha Rao");
    assert_eq!(texts[2], "Date of Birth: 2003-04-11");
    assert!(texts.contains(&"USN: 1DS21CS002".to_string()));
    assert!(texts.contains(&"Email: ".to_string()));
    assert_eq!(doc.page_breaks(), 2);
}

#[test]
fn hod_certificate_names_student_and_signatures() {
    let mut blank_branch = record(2, "Bhavya N", "1DS21CS002");
    blank_branch.branch = None;
    let doc = render_with(
        ReportFormat::HodBonafide,
        &[record(1, "Asha Rao", "1DS21CS001"), blank_branch],
    );

    let bodies: Vec<String> = doc
        .paragraphs()
        .map(|p| p.plain_text())
        .filter(|t| t.starts_with("This is to certify"))
        .collect();
    assert_eq!(bodies.len(), 2);
    assert!(bodies[0].contains("Mr/Ms Asha Rao is a student of CSE department"));
    assert!(bodies[0].contains("Bearing USN 1DS21CS001"));
    assert!(bodies[1].contains("student of ___________________________ department"));
    assert_eq!(
        doc.paragraphs().filter(|p| p.plain_text() == SIGNATURE_LINE).count(),
        2
    );
    assert_eq!(doc.page_breaks(), 2);
    assert!(doc.media.is_empty());
}

#[test]
fn hod_logo_is_embedded_once_for_all_pages() {
    let (_dir, photos) = temp_photos();
    let logo = png_bytes(120, 60);
    let ctx = RenderContext::new(&photos).with_logo(Some(&logo));
    let doc = render(
        ReportFormat::HodBonafide,
        &[record(1, "Asha Rao", "1DS21CS001"), record(2, "Bhavya N", "1DS21CS002")],
        &ctx,
    )
    .expect("render");

    assert_eq!(doc.media.len(), 1);
    let logo_paragraphs = doc.paragraphs().filter(|p| p.images().count() == 1).count();
    assert_eq!(logo_paragraphs, 2);
}

#[test]
fn tournament_letter_lists_students_once() {
    let doc = render_with(
        ReportFormat::TournamentBonafide,
        &[record(1, "Asha Rao", "1DS21CS001"), record(2, "Bhavya N", "1DS21CS002")],
    );

    let tables: Vec<_> = doc.tables().collect();
    assert_eq!(tables.len(), 2);
    let list = tables[0];
    assert_eq!(list.row_count(), 3);
    assert_eq!(list.cell(0, 0).expect("header").plain_text(), "Sl.No.");
    assert_eq!(list.cell(2, 1).expect("name").plain_text(), "Bhavya N");
    assert_eq!(list.cell(2, 3).expect("branch").plain_text(), "CSE");

    let signatures = tables[1];
    assert_eq!(signatures.style, None);
    assert_eq!(
        signatures.cell(0, 1).expect("principal").plain_text(),
        PRINCIPAL_SIGNATURE
    );
    assert_eq!(doc.page_breaks(), 0);
}

#[test]
fn edited_report_substitutes_per_student() {
    let (_dir, photos) = temp_photos();
    let ctx = RenderContext::new(&photos)
        .with_edited("Custom Letter", "Dear [NAME],\r\nUSN [USN] plays [SPORTS].\n[UNKNOWN]");
    let doc = render(
        ReportFormat::Edited,
        &[record(1, "Asha Rao", "1DS21CS001"), record(2, "Bhavya N", "1DS21CS002")],
        &ctx,
    )
    .expect("render");

    assert_eq!(doc.title.as_deref(), Some("Custom Letter"));
    let texts: Vec<String> = doc.paragraphs().map(|p| p.plain_text()).collect();
    assert_eq!(
        texts,
        vec![
            "Dear Asha Rao,",
            "USN 1DS21CS001 plays Chess.",
            "[UNKNOWN]",
            "Dear Bhavya N,",
            "USN 1DS21CS002 plays Chess.",
            "[UNKNOWN]",
        ]
    );
    assert!(matches!(doc.blocks.last(), Some(Block::PageBreak)));
    assert_eq!(doc.page_breaks(), 2);
}

#[test]
fn edited_report_without_content_is_rejected() {
    let (_dir, photos) = temp_photos();
    let err = render(
        ReportFormat::Edited,
        &[record(1, "Asha Rao", "1DS21CS001")],
        &RenderContext::new(&photos),
    )
    .expect_err("missing content");
    assert!(matches!(err, ReportError::MissingContent));
}

#[test]
fn every_format_renders_empty_list_as_empty_document() {
    for format in ReportFormat::ALL {
        let doc = render_with(format, &[]);
        assert!(doc.is_empty(), "{:?} should be empty", format);
    }
}

#[test]
fn unknown_selector_renders_detailed_report() {
    let format = ReportFormat::parse("mystery");
    let doc = render_with(format, &[record(1, "Asha Rao", "1DS21CS001")]);
    assert_eq!(
        doc.paragraphs().next().map(|p| p.plain_text()),
        Some("Selected Students Report".to_string())
    );
}
