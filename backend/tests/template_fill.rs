mod support;

use pretty_assertions::assert_eq;
use sportsdesk::report::docx::to_docx_bytes;
use sportsdesk::report::document::{Cell, Table, TableStyle};
use sportsdesk::report::fill::{fill_template, DOCUMENT_PART};
use sportsdesk::report::{Document, ReportError};
use sportsdesk::templates::{fill_for_selection, TemplateLibrary};
use std::io::{Cursor, Write};
use support::{record, zip_entry, zip_names};
use zip::write::FileOptions;
use zip::ZipWriter;

fn letter_template() -> Vec<u8> {
    let mut doc = Document::new();
    doc.add_text("Dear [NAME] of [BRANCH],");
    doc.add_text("This line has no tokens.");
    let mut table = Table::new(Some(TableStyle::Grid));
    table.push_row(vec![Cell::text("USN"), Cell::text("[USN]")]);
    doc.add_table(table);
    to_docx_bytes(&doc).expect("package template")
}

/// A package whose token is split over two runs, as Word tends to save it.
fn split_run_template() -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = FileOptions::default();
    zip.start_file("[Content_Types].xml", opts).expect("start entry");
    zip.write_all(b"<Types/>").expect("write entry");
    zip.start_file(DOCUMENT_PART, opts).expect("start entry");
    zip.write_all(
        br#"<w:document xmlns:w="w"><w:body><w:p><w:r><w:t>Player: [NA</w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>ME]!</w:t></w:r></w:p></w:body></w:document>"#,
    )
    .expect("write entry");
    zip.finish().expect("finish zip").into_inner()
}

#[test]
fn fills_paragraphs_and_table_cells() {
    let template = letter_template();
    let filled = fill_template(&template, &record(7, "Asha Rao", "1DS21CS001")).expect("fill");

    let document = zip_entry(&filled, DOCUMENT_PART);
    assert!(document.contains(">Dear Asha Rao of CSE,</w:t>"));
    assert!(document.contains(">This line has no tokens.</w:t>"));
    assert!(document.contains(">1DS21CS001</w:t>"));
    assert!(!document.contains("[NAME]"));

    assert_eq!(zip_names(&filled), zip_names(&template));
    assert_eq!(
        zip_entry(&filled, "word/styles.xml"),
        zip_entry(&template, "word/styles.xml")
    );
}

#[test]
fn token_split_over_runs_is_filled_in_first_run() {
    let filled = fill_template(&split_run_template(), &record(7, "Asha Rao", "1DS21CS001"))
        .expect("fill");

    let document = zip_entry(&filled, DOCUMENT_PART);
    assert!(document.contains(r#"<w:t xml:space="preserve">Player: Asha Rao!</w:t>"#));
    assert!(document.contains("<w:rPr><w:b/></w:rPr><w:t></w:t>"));
    assert_eq!(zip_entry(&filled, "[Content_Types].xml"), "<Types/>");
}

#[test]
fn fill_for_selection_uses_first_student() {
    let dir = tempfile::tempdir().expect("temp dir");
    let library = TemplateLibrary::new(dir.path());
    let uploaded = library
        .store("letter.docx", &letter_template())
        .expect("store template");

    let filled = fill_for_selection(
        &uploaded,
        &[record(2, "Bhavya N", "1DS21CS002"), record(1, "Asha Rao", "1DS21CS001")],
    )
    .expect("fill");

    assert_eq!(filled.filename, "filled_template_Bhavya N.docx");
    let document = zip_entry(&filled.bytes, DOCUMENT_PART);
    assert!(document.contains("Dear Bhavya N of CSE,"));
    assert!(!document.contains("Asha Rao"));
}

#[test]
fn fill_for_selection_reports_user_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    let library = TemplateLibrary::new(dir.path());

    let uploaded = library
        .store("letter.docx", &letter_template())
        .expect("store template");
    assert!(matches!(
        fill_for_selection(&uploaded, &[]),
        Err(ReportError::EmptySelection)
    ));

    // Right signature, but not a readable archive.
    let corrupt = library
        .store("corrupt.docx", b"PK\x03\x04truncated")
        .expect("store template");
    assert!(matches!(
        fill_for_selection(&corrupt, &[record(1, "Asha Rao", "1DS21CS001")]),
        Err(ReportError::InvalidTemplate)
    ));

    std::fs::remove_file(&uploaded.path).expect("remove template");
    assert!(matches!(
        fill_for_selection(&uploaded, &[record(1, "Asha Rao", "1DS21CS001")]),
        Err(ReportError::MissingTemplate)
    ));
}
