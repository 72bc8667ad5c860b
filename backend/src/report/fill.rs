//! # Uploaded template filling
//!
//! Substitutes student tokens inside a user-supplied `.docx`. Only
//! `word/document.xml` is rewritten; every other package entry is copied
//! byte for byte.
//!
//! Word often splits a token such as `[NAME]` over several runs. Each
//! paragraph's text nodes are therefore joined before substitution; when the
//! joined text holds a token, the substituted text is written into the
//! paragraph's first text node and the remaining text nodes are emptied.
//! Paragraphs without tokens pass through untouched.

use crate::report::docx::{xml_safe, PackageError};
use crate::report::placeholders::{contains_tokens, substitute};
use common::model::student::StudentRecord;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::{Cursor, Read, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const DOCUMENT_PART: &str = "word/document.xml";

const PARAGRAPH: &[u8] = b"w:p";
const TEXT: &[u8] = b"w:t";

/// Fills `template` (the bytes of a `.docx`) with `student`'s values.
pub fn fill_template(template: &[u8], student: &StudentRecord) -> Result<Vec<u8>, PackageError> {
    let mut archive = ZipArchive::new(Cursor::new(template))?;
    let mut out = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.name() == DOCUMENT_PART {
            let mut xml = Vec::new();
            entry.read_to_end(&mut xml)?;
            let filled = fill_document_xml(&xml, student)?;
            out.start_file(DOCUMENT_PART, opts)?;
            out.write_all(&filled)?;
        } else {
            out.raw_copy_file(entry)?;
        }
    }

    Ok(out.finish()?.into_inner())
}

/// Rewrites the paragraphs of a WordprocessingML body that contain tokens.
pub fn fill_document_xml(xml: &[u8], student: &StudentRecord) -> Result<Vec<u8>, PackageError> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len()));
    // Open paragraphs, outermost first; text boxes nest paragraphs.
    let mut open: Vec<Vec<Event>> = Vec::new();

    loop {
        let event = reader.read_event()?;
        match event {
            Event::Eof => break,
            Event::Start(ref e) if e.name().as_ref() == PARAGRAPH => {
                open.push(vec![event]);
            }
            Event::End(ref e) if e.name().as_ref() == PARAGRAPH && !open.is_empty() => {
                let mut events = open.pop().unwrap_or_default();
                events.push(event);
                let events = fill_paragraph(events, student)?;
                match open.last_mut() {
                    Some(parent) => parent.extend(events),
                    None => {
                        for ev in events {
                            writer.write_event(ev)?;
                        }
                    }
                }
            }
            other => match open.last_mut() {
                Some(events) => events.push(other),
                None => writer.write_event(other)?,
            },
        }
    }

    Ok(writer.into_inner())
}

fn is_start(event: &Event, name: &[u8]) -> bool {
    matches!(event, Event::Start(e) if e.name().as_ref() == name)
}

fn is_end(event: &Event, name: &[u8]) -> bool {
    matches!(event, Event::End(e) if e.name().as_ref() == name)
}

/// Tracks whether an event belongs to the outermost paragraph's own text.
#[derive(Default)]
struct TextCursor {
    depth: usize,
    in_text: bool,
}

impl TextCursor {
    /// Advances over `event`; returns true if it is own-paragraph text content.
    fn step(&mut self, event: &Event) -> bool {
        if is_start(event, PARAGRAPH) {
            self.depth += 1;
        } else if is_end(event, PARAGRAPH) {
            self.depth = self.depth.saturating_sub(1);
        } else if self.depth == 1 && is_start(event, TEXT) {
            self.in_text = true;
        } else if is_end(event, TEXT) {
            self.in_text = false;
        } else if let Event::Text(_) | Event::CData(_) = event {
            return self.depth == 1 && self.in_text;
        }
        false
    }

    fn opens_own_text(&self, event: &Event) -> bool {
        self.depth == 1 && is_start(event, TEXT)
    }
}

fn event_text(event: &Event) -> Result<String, PackageError> {
    Ok(match event {
        Event::Text(t) => t.unescape()?.into_owned(),
        Event::CData(c) => String::from_utf8_lossy(c).into_owned(),
        _ => String::new(),
    })
}

fn fill_paragraph<'a>(
    events: Vec<Event<'a>>,
    student: &StudentRecord,
) -> Result<Vec<Event<'a>>, PackageError> {
    let mut joined = String::new();
    let mut cursor = TextCursor::default();
    for event in &events {
        if cursor.step(event) {
            joined.push_str(&event_text(event)?);
        }
    }
    if !contains_tokens(&joined) {
        return Ok(events);
    }
    let filled = xml_safe(&substitute(&joined, student)).into_owned();

    let mut out = Vec::with_capacity(events.len());
    let mut cursor = TextCursor::default();
    let mut pending = Some(filled);
    for event in events {
        let opens_text = cursor.opens_own_text(&event);
        if cursor.step(&event) {
            continue;
        }
        match event {
            Event::Start(start) if opens_text => {
                let text = pending.take();
                out.push(Event::Start(match text {
                    Some(_) => preserve_space(start),
                    None => start,
                }));
                if let Some(text) = text {
                    out.push(Event::Text(BytesText::new(&text).into_owned()));
                }
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

fn preserve_space(start: BytesStart<'_>) -> BytesStart<'_> {
    let has_space = start
        .attributes()
        .flatten()
        .any(|a| a.key.as_ref() == b"xml:space");
    if has_space {
        return start;
    }
    let mut start = start;
    start.push_attribute(("xml:space", "preserve"));
    start
}
