//! # `.docx` packaging
//!
//! Serializes a [`Document`] into a WordprocessingML package: a Deflate zip
//! holding the content types, package relationships, core properties, the
//! main document part, a style sheet and one media part per embedded image.
//!
//! Only the markup the layouts need is produced. Text is escaped with
//! `quick_xml`; a `\n` inside a run becomes `<w:br/>`.

use crate::report::document::{
    Alignment, Block, Cell, Document, Inline, InlineImage, Orientation, Paragraph,
    ParagraphStyle, Table, TableStyle, TextRun, TWIPS_PER_INCH,
};
use quick_xml::escape::escape;
use std::borrow::Cow;
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use std::path::Path;
use thiserror::Error;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const NS_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

/// US Letter, portrait, in twips.
const PAGE_WIDTH: u32 = 12_240;
const PAGE_HEIGHT: u32 = 15_840;
const PAGE_MARGIN: u32 = TWIPS_PER_INCH;

/// Relationship ids 1 and 2 are reserved for styles; media start after them.
const FIRST_MEDIA_REL: usize = 3;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("xml escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("formatting error")]
    Format(#[from] std::fmt::Error),
}

/// Serializes `doc` into the bytes of a `.docx` file.
pub fn to_docx_bytes(doc: &Document) -> Result<Vec<u8>, PackageError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts = [
        ("[Content_Types].xml", content_types_xml(doc)?),
        ("_rels/.rels", package_rels_xml()?),
        ("docProps/core.xml", core_xml(doc)?),
        ("word/document.xml", document_xml(doc)?),
        ("word/styles.xml", styles_xml()?),
        ("word/_rels/document.xml.rels", document_rels_xml(doc)?),
    ];
    for (name, xml) in parts {
        zip.start_file(name, opts)?;
        zip.write_all(xml.as_bytes())?;
    }
    for (i, media) in doc.media.iter().enumerate() {
        zip.start_file(format!("word/{}", media_target(i, media.extension)), opts)?;
        zip.write_all(&media.bytes)?;
    }

    Ok(zip.finish()?.into_inner())
}

/// Text as XML 1.0 allows it. A vertical tab, Word's soft line break,
/// becomes `\n`; other C0 controls and U+FFFE/U+FFFF are dropped.
pub(crate) fn xml_safe(text: &str) -> Cow<'_, str> {
    if !text.chars().any(forbidden_in_xml) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .filter_map(|c| match c {
                '\u{0B}' => Some('\n'),
                c if forbidden_in_xml(c) => None,
                c => Some(c),
            })
            .collect(),
    )
}

fn forbidden_in_xml(c: char) -> bool {
    matches!(
        c,
        '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

/// Serializes `doc` and writes it to `path`.
pub fn save_docx(doc: &Document, path: &Path) -> Result<(), PackageError> {
    let bytes = to_docx_bytes(doc)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn media_target(index: usize, extension: &str) -> String {
    format!("media/image{}.{}", index + 1, extension)
}

fn media_rel_id(index: usize) -> String {
    format!("rId{}", index + FIRST_MEDIA_REL)
}

fn content_types_xml(doc: &Document) -> Result<String, PackageError> {
    let mut xml = String::new();
    writeln!(xml, "{}", XML_DECLARATION)?;
    write!(
        xml,
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#
    )?;
    write!(
        xml,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#
    )?;
    write!(xml, r#"<Default Extension="xml" ContentType="application/xml"/>"#)?;

    let mut seen: Vec<&str> = Vec::new();
    for media in &doc.media {
        if !seen.contains(&media.extension) {
            seen.push(media.extension);
            write!(
                xml,
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                media.extension, media.content_type
            )?;
        }
    }

    write!(
        xml,
        r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#
    )?;
    write!(
        xml,
        r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#
    )?;
    write!(
        xml,
        r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#
    )?;
    write!(xml, "</Types>")?;
    Ok(xml)
}

fn package_rels_xml() -> Result<String, PackageError> {
    let mut xml = String::new();
    writeln!(xml, "{}", XML_DECLARATION)?;
    write!(
        xml,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#
    )?;
    write!(
        xml,
        r#"<Relationship Id="rId1" Type="{}/officeDocument" Target="word/document.xml"/>"#,
        NS_REL
    )?;
    write!(
        xml,
        r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#
    )?;
    write!(xml, "</Relationships>")?;
    Ok(xml)
}

fn core_xml(doc: &Document) -> Result<String, PackageError> {
    let mut xml = String::new();
    writeln!(xml, "{}", XML_DECLARATION)?;
    write!(
        xml,
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    )?;
    if let Some(title) = &doc.title {
        write!(xml, "<dc:title>{}</dc:title>", escape(xml_safe(title).as_ref()))?;
    }
    write!(xml, "<dc:creator>Sports Department</dc:creator>")?;
    write!(xml, "</cp:coreProperties>")?;
    Ok(xml)
}

fn document_rels_xml(doc: &Document) -> Result<String, PackageError> {
    let mut xml = String::new();
    writeln!(xml, "{}", XML_DECLARATION)?;
    write!(
        xml,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#
    )?;
    write!(
        xml,
        r#"<Relationship Id="rId1" Type="{}/styles" Target="styles.xml"/>"#,
        NS_REL
    )?;
    for (i, media) in doc.media.iter().enumerate() {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{}/image" Target="{}"/>"#,
            media_rel_id(i),
            NS_REL,
            media_target(i, media.extension)
        )?;
    }
    write!(xml, "</Relationships>")?;
    Ok(xml)
}

fn styles_xml() -> Result<String, PackageError> {
    let mut xml = String::new();
    writeln!(xml, "{}", XML_DECLARATION)?;
    write!(xml, r#"<w:styles xmlns:w="{}">"#, NS_MAIN)?;
    write!(
        xml,
        r#"<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults>"#
    )?;
    write!(
        xml,
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#
    )?;
    write!(
        xml,
        r#"<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="240"/></w:pPr><w:rPr><w:sz w:val="56"/><w:szCs w:val="56"/></w:rPr></w:style>"#
    )?;
    write!(
        xml,
        r#"<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:color w:val="2F5496"/><w:sz w:val="32"/><w:szCs w:val="32"/></w:rPr></w:style>"#
    )?;
    write!(
        xml,
        r#"<w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/><w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style>"#
    )?;
    write!(
        xml,
        r#"<w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:basedOn w:val="TableNormal"/><w:tblPr><w:tblBorders><w:top w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:left w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:bottom w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:right w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideH w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideV w:val="single" w:sz="4" w:space="0" w:color="auto"/></w:tblBorders></w:tblPr></w:style>"#
    )?;
    write!(xml, "</w:styles>")?;
    Ok(xml)
}

/// The main document part, `word/document.xml`.
pub fn document_xml(doc: &Document) -> Result<String, PackageError> {
    let mut body = BodyWriter {
        xml: String::new(),
        next_drawing_id: 1,
        text_width: text_width(doc.orientation),
    };

    writeln!(body.xml, "{}", XML_DECLARATION)?;
    write!(
        body.xml,
        r#"<w:document xmlns:w="{}" xmlns:r="{}" xmlns:wp="{}" xmlns:a="{}" xmlns:pic="{}"><w:body>"#,
        NS_MAIN, NS_REL, NS_WP, NS_A, NS_PIC
    )?;
    for block in &doc.blocks {
        match block {
            Block::Paragraph(p) => body.paragraph(p)?,
            Block::Table(t) => body.table(t)?,
            Block::PageBreak => write!(body.xml, r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#)?,
        }
    }
    section_properties(&mut body.xml, doc.orientation)?;
    write!(body.xml, "</w:body></w:document>")?;
    Ok(body.xml)
}

fn page_size(orientation: Orientation) -> (u32, u32) {
    match orientation {
        Orientation::Portrait => (PAGE_WIDTH, PAGE_HEIGHT),
        Orientation::Landscape => (PAGE_HEIGHT, PAGE_WIDTH),
    }
}

fn text_width(orientation: Orientation) -> u32 {
    page_size(orientation).0 - 2 * PAGE_MARGIN
}

fn section_properties(xml: &mut String, orientation: Orientation) -> Result<(), PackageError> {
    let (w, h) = page_size(orientation);
    write!(xml, "<w:sectPr>")?;
    match orientation {
        Orientation::Portrait => write!(xml, r#"<w:pgSz w:w="{}" w:h="{}"/>"#, w, h)?,
        Orientation::Landscape => write!(
            xml,
            r#"<w:pgSz w:w="{}" w:h="{}" w:orient="landscape"/>"#,
            w, h
        )?,
    }
    write!(
        xml,
        r#"<w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="720" w:footer="720" w:gutter="0"/>"#,
        m = PAGE_MARGIN
    )?;
    write!(xml, "</w:sectPr>")?;
    Ok(())
}

struct BodyWriter {
    xml: String,
    /// `wp:docPr` ids must be unique within the part.
    next_drawing_id: usize,
    text_width: u32,
}

impl BodyWriter {
    fn paragraph(&mut self, p: &Paragraph) -> Result<(), PackageError> {
        write!(self.xml, "<w:p>")?;

        let style = p.style.map(|s| match s {
            ParagraphStyle::Title => "Title",
            ParagraphStyle::Heading1 => "Heading1",
        });
        let jc = match p.alignment {
            Alignment::Inherit => None,
            Alignment::Left => Some("left"),
            Alignment::Center => Some("center"),
            Alignment::Right => Some("right"),
        };
        if style.is_some() || jc.is_some() || p.left_indent.is_some() {
            write!(self.xml, "<w:pPr>")?;
            if let Some(style) = style {
                write!(self.xml, r#"<w:pStyle w:val="{}"/>"#, style)?;
            }
            if let Some(indent) = p.left_indent {
                write!(self.xml, r#"<w:ind w:left="{}"/>"#, indent)?;
            }
            if let Some(jc) = jc {
                write!(self.xml, r#"<w:jc w:val="{}"/>"#, jc)?;
            }
            write!(self.xml, "</w:pPr>")?;
        }

        for inline in &p.inlines {
            match inline {
                Inline::Text(run) => self.run(run)?,
                Inline::Image(image) => self.image(image)?,
            }
        }
        write!(self.xml, "</w:p>")?;
        Ok(())
    }

    fn run(&mut self, run: &TextRun) -> Result<(), PackageError> {
        write!(self.xml, "<w:r>")?;
        if run.bold || run.underline || run.size_pt.is_some() {
            write!(self.xml, "<w:rPr>")?;
            if run.bold {
                write!(self.xml, "<w:b/>")?;
            }
            if let Some(pt) = run.size_pt {
                let half_points = u32::from(pt) * 2;
                write!(
                    self.xml,
                    r#"<w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#,
                    half_points
                )?;
            }
            if run.underline {
                write!(self.xml, r#"<w:u w:val="single"/>"#)?;
            }
            write!(self.xml, "</w:rPr>")?;
        }
        let text = xml_safe(&run.text);
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                write!(self.xml, "<w:br/>")?;
            }
            if !line.is_empty() {
                write!(
                    self.xml,
                    r#"<w:t xml:space="preserve">{}</w:t>"#,
                    escape(line)
                )?;
            }
        }
        write!(self.xml, "</w:r>")?;
        Ok(())
    }

    fn image(&mut self, image: &InlineImage) -> Result<(), PackageError> {
        let id = self.next_drawing_id;
        self.next_drawing_id += 1;
        let (cx, cy) = (image.width_emu, image.height_emu);

        write!(
            self.xml,
            r#"<w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{cx}" cy="{cy}"/><wp:docPr id="{id}" name="Picture {id}"/><wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#
        )?;
        write!(
            self.xml,
            r#"<a:graphic><a:graphicData uri="{NS_PIC}"><pic:pic><pic:nvPicPr><pic:cNvPr id="{id}" name="image{id}"/><pic:cNvPicPr/></pic:nvPicPr><pic:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            rel = media_rel_id(image.media.0)
        )?;
        write!(
            self.xml,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#
        )?;
        Ok(())
    }

    fn table(&mut self, table: &Table) -> Result<(), PackageError> {
        let columns = table.column_count();
        if columns == 0 {
            return Ok(());
        }
        let widths = match &table.column_widths {
            Some(widths) if widths.len() == columns => widths.clone(),
            _ => vec![self.text_width / columns as u32; columns],
        };

        write!(self.xml, "<w:tbl><w:tblPr>")?;
        if let Some(TableStyle::Grid) = table.style {
            write!(self.xml, r#"<w:tblStyle w:val="TableGrid"/>"#)?;
        }
        write!(
            self.xml,
            r#"<w:tblW w:w="0" w:type="auto"/><w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/></w:tblPr>"#
        )?;
        write!(self.xml, "<w:tblGrid>")?;
        for width in &widths {
            write!(self.xml, r#"<w:gridCol w:w="{}"/>"#, width)?;
        }
        write!(self.xml, "</w:tblGrid>")?;

        let blank = Cell::empty();
        for row in &table.rows {
            write!(self.xml, "<w:tr>")?;
            for (col, width) in widths.iter().enumerate() {
                let cell = row.get(col).unwrap_or(&blank);
                self.cell(cell, *width)?;
            }
            write!(self.xml, "</w:tr>")?;
        }
        write!(self.xml, "</w:tbl>")?;
        Ok(())
    }

    fn cell(&mut self, cell: &Cell, width: u32) -> Result<(), PackageError> {
        write!(
            self.xml,
            r#"<w:tc><w:tcPr><w:tcW w:w="{}" w:type="dxa"/></w:tcPr>"#,
            width
        )?;
        if cell.paragraphs.is_empty() {
            write!(self.xml, "<w:p/>")?;
        }
        for p in &cell.paragraphs {
            self.paragraph(p)?;
        }
        write!(self.xml, "</w:tc>")?;
        Ok(())
    }
}
