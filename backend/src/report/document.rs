//! In-memory document built by the layout renderers.
//!
//! A [`Document`] is an ordered list of blocks (paragraphs, tables, page
//! breaks) plus the media they reference. It is serialized once, at the end
//! of a request, by [`crate::report::docx`].

/// English Metric Units per inch, the unit of DrawingML extents.
pub const EMU_PER_INCH: u64 = 914_400;
/// Twentieths of a point per inch, the unit of page and table geometry.
pub const TWIPS_PER_INCH: u32 = 1_440;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Inherit,
    Left,
    Center,
    Right,
}

/// A run of text sharing one set of character properties.
///
/// Line breaks inside `text` are kept and become soft breaks in the output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub underline: bool,
    /// Font size in points; `None` uses the style default.
    pub size_pt: Option<u8>,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        TextRun {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn size(mut self, pt: u8) -> Self {
        self.size_pt = Some(pt);
        self
    }
}

/// Index into [`Document::media`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaId(pub usize);

/// A picture placed inline with text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineImage {
    pub media: MediaId,
    pub width_emu: u64,
    pub height_emu: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(TextRun),
    Image(InlineImage),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub style: Option<ParagraphStyle>,
    pub alignment: Alignment,
    /// Left indent in twips.
    pub left_indent: Option<u32>,
    pub inlines: Vec<Inline>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    Title,
    Heading1,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A paragraph holding one plain run.
    pub fn text(text: impl Into<String>) -> Self {
        Paragraph::new().run(TextRun::new(text))
    }

    pub fn run(mut self, run: TextRun) -> Self {
        self.inlines.push(Inline::Text(run));
        self
    }

    pub fn image(mut self, image: InlineImage) -> Self {
        self.inlines.push(Inline::Image(image));
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn indent(mut self, twips: u32) -> Self {
        self.left_indent = Some(twips);
        self
    }

    pub fn styled(mut self, style: ParagraphStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Concatenated text of all runs; images contribute nothing.
    pub fn plain_text(&self) -> String {
        self.inlines
            .iter()
            .filter_map(|inline| match inline {
                Inline::Text(run) => Some(run.text.as_str()),
                Inline::Image(_) => None,
            })
            .collect()
    }

    pub fn images(&self) -> impl Iterator<Item = &InlineImage> {
        self.inlines.iter().filter_map(|inline| match inline {
            Inline::Image(image) => Some(image),
            Inline::Text(_) => None,
        })
    }
}

/// A table cell. Always holds at least one paragraph when serialized.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Cell {
            paragraphs: vec![Paragraph::text(text)],
        }
    }

    pub fn paragraph(paragraph: Paragraph) -> Self {
        Cell {
            paragraphs: vec![paragraph],
        }
    }

    pub fn empty() -> Self {
        Cell::default()
    }

    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Single-line borders on every cell.
    Grid,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub style: Option<TableStyle>,
    /// Column widths in twips; `None` lets the consumer size columns.
    pub column_widths: Option<Vec<u32>>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(style: Option<TableStyle>) -> Self {
        Table {
            style,
            ..Default::default()
        }
    }

    pub fn widths(mut self, widths: Vec<u32>) -> Self {
        self.column_widths = Some(widths);
        self
    }

    pub fn push_row(&mut self, cells: Vec<Cell>) {
        self.rows.push(cells);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    PageBreak,
}

/// Raw bytes of an embedded picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub bytes: Vec<u8>,
    pub extension: &'static str,
    pub content_type: &'static str,
    /// Pixel size of the encoded image.
    pub pixel_size: (u32, u32),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Stored in the package properties, not printed in the body.
    pub title: Option<String>,
    pub orientation: Orientation,
    pub blocks: Vec<Block>,
    pub media: Vec<Media>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    pub fn add_text(&mut self, text: impl Into<String>) {
        self.add_paragraph(Paragraph::text(text));
    }

    /// Appends `count` empty paragraphs, used as vertical spacing.
    pub fn add_blank_lines(&mut self, count: usize) {
        for _ in 0..count {
            self.add_paragraph(Paragraph::new());
        }
    }

    /// Level 0 is the document title style, 1 the first heading level.
    pub fn add_heading(&mut self, text: impl Into<String>, level: u8) {
        let style = if level == 0 {
            ParagraphStyle::Title
        } else {
            ParagraphStyle::Heading1
        };
        self.add_paragraph(Paragraph::text(text).styled(style));
    }

    pub fn add_table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    pub fn add_page_break(&mut self) {
        self.blocks.push(Block::PageBreak);
    }

    pub fn add_media(&mut self, media: Media) -> MediaId {
        self.media.push(media);
        MediaId(self.media.len() - 1)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn page_breaks(&self) -> usize {
        self.blocks
            .iter()
            .filter(|block| matches!(block, Block::PageBreak))
            .count()
    }
}

pub fn inches_to_emu(inches: f64) -> u64 {
    (inches * EMU_PER_INCH as f64).round() as u64
}

pub fn inches_to_twips(inches: f64) -> u32 {
    (inches * TWIPS_PER_INCH as f64).round() as u32
}
