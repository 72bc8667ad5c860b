#![allow(dead_code)]

use common::model::student::{StudentForm, StudentRecord};
use sportsdesk::config::AppConfig;
use sportsdesk::photos::{LocalPhotoStore, PhotoStorage};
use sportsdesk::state::AppState;
use sportsdesk::store::StudentStore;
use std::io::{Cursor, Read};
use tempfile::TempDir;

pub fn form(name: &str, usn: &str) -> StudentForm {
    StudentForm {
        name: name.to_string(),
        dob: "2003-04-11".to_string(),
        mother_name: "Lakshmi".to_string(),
        father_name: "Ramesh".to_string(),
        branch: "CSE".to_string(),
        semester: "5".to_string(),
        usn: usn.to_string(),
        phone: "9876543210".to_string(),
        email: "student@example.com".to_string(),
        sports: "Chess, Kabaddi".to_string(),
        blood_group: String::new(),
        gender: "F".to_string(),
    }
}

pub fn record(id: i64, name: &str, usn: &str) -> StudentRecord {
    StudentRecord {
        id,
        name: name.to_string(),
        dob: Some("2003-04-11".to_string()),
        mother_name: Some("Lakshmi".to_string()),
        father_name: Some("Ramesh".to_string()),
        branch: Some("CSE".to_string()),
        semester: Some("5".to_string()),
        usn: usn.to_string(),
        phone: "9876543210".to_string(),
        email: None,
        photo_ref: None,
        sports: Some("Chess".to_string()),
        blood_group: None,
        gender: None,
    }
}

pub fn temp_store() -> (TempDir, StudentStore) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = StudentStore::open(dir.path().join("students.sqlite")).expect("open store");
    (dir, store)
}

/// Local-only photo storage rooted in a fresh directory.
pub fn temp_photos() -> (TempDir, PhotoStorage) {
    let dir = tempfile::tempdir().expect("temp dir");
    let photos = PhotoStorage::new(LocalPhotoStore::new(dir.path()), None);
    (dir, photos)
}

pub fn temp_state() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().expect("temp dir");
    let state = AppState::from_config(AppConfig::in_dir(dir.path())).expect("app state");
    (dir, state)
}

/// A small opaque PNG.
pub fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(w, h, image::Rgb([200, 30, 30]));
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

/// Reads one entry of a zip package as text.
pub fn zip_entry(package: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(package)).expect("open zip archive");
    let mut text = String::new();
    archive
        .by_name(name)
        .expect("entry present")
        .read_to_string(&mut text)
        .expect("read entry");
    text
}

/// Entry names in archive order.
pub fn zip_names(package: &[u8]) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(package)).expect("open zip archive");
    (0..archive.len())
        .map(|i| archive.by_index(i).expect("entry").name().to_string())
        .collect()
}

pub const BOUNDARY: &str = "sportsdesk-test-boundary";

/// A file part of a multipart body: field name, file name, bytes.
pub type FilePart<'a> = (&'a str, &'a str, &'a [u8]);

/// Builds a `multipart/form-data` body; returns the content type and bytes.
pub fn multipart(fields: &[(&str, &str)], files: &[FilePart<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    for (name, filename, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, name, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

/// Form fields of a valid student submission.
pub fn student_fields<'a>(name: &'a str, usn: &'a str, phone: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", name),
        ("usn", usn),
        ("phone", phone),
        ("branch", "CSE"),
        ("father_name", "Ramesh"),
        ("mother_name", "Lakshmi"),
        ("dob", "2003-04-11"),
        ("sports", "Chess"),
    ]
}
