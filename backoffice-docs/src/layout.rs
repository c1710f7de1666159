//! Paginating layout engine.
//!
//! Blocks are placed top to bottom on fixed-size pages. Before each block the
//! engine asks whether it fits above the footer; if not, the page is closed,
//! a new one is opened with the header chrome (and, inside a table, the
//! table's column header row) reprinted, and the block goes there.
//!
//! Paragraphs are the only blocks that may split: a paragraph that fits on
//! a fresh page moves there whole, a longer one is placed line by line.

use crate::blocks::{Align, Block, TableColumn};
use crate::error::{DocumentError, Result};
use crate::format::{page_label, Locale};
use crate::metrics::TextMetrics;
use crate::settings::LayoutSettings;
use crate::wrap::{truncate, wrap_text};
use serde::Serialize;
use tracing::{debug, trace};

/// Base font variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Regular,
    Bold,
}

/// Text placed at a baseline; `y` is measured from the top edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextElement {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub style: FontStyle,
    pub text: String,
}

/// Horizontal rule from `x1` to `x2` at `y`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleElement {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
    pub thickness: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text(TextElement),
    Rule(RuleElement),
}

/// One finished page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    pub elements: Vec<Element>,
}

impl Page {
    fn new(number: usize) -> Self {
        Self {
            number,
            elements: Vec::new(),
        }
    }

    /// Text elements in placement order
    pub fn texts(&self) -> impl Iterator<Item = &TextElement> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(t) => Some(t),
            Element::Rule(_) => None,
        })
    }

    /// Index among the text elements of the first one equal to `text`
    pub fn position_of(&self, text: &str) -> Option<usize> {
        self.texts().position(|t| t.text == text)
    }

    pub fn contains_text(&self, text: &str) -> bool {
        self.position_of(text).is_some()
    }
}

/// Output of layout: fixed-size pages with absolutely placed elements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaidOutDocument {
    pub width: f32,
    pub height: f32,
    pub pages: Vec<Page>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Lay out `blocks` into pages.
///
/// Fails when the settings leave no room for content or a table row shows
/// up without a table header.
pub fn layout_blocks(
    blocks: &[Block],
    settings: &LayoutSettings,
    metrics: &dyn TextMetrics,
    locale: Locale,
) -> Result<LaidOutDocument> {
    settings.validate()?;
    let mut engine = LayoutEngine::new(settings, metrics);
    for block in blocks {
        engine.place(block)?;
    }
    let document = engine.finish(locale);
    debug!(pages = document.page_count(), blocks = blocks.len(), "layout finished");
    Ok(document)
}

struct PageChrome {
    title: String,
    subtitle: String,
}

struct LayoutEngine<'a> {
    settings: &'a LayoutSettings,
    metrics: &'a dyn TextMetrics,
    pages: Vec<Page>,
    page: Page,
    cursor: f32,
    chrome: Option<PageChrome>,
    chrome_drawn: bool,
    /// Columns of the open table; `Some` means mid-table
    table: Option<Vec<TableColumn>>,
    /// Whether any block content (not chrome) is on the current page
    placed: bool,
}

impl<'a> LayoutEngine<'a> {
    fn new(settings: &'a LayoutSettings, metrics: &'a dyn TextMetrics) -> Self {
        Self {
            settings,
            metrics,
            pages: Vec::new(),
            page: Page::new(1),
            cursor: settings.margin_top,
            chrome: None,
            chrome_drawn: false,
            table: None,
            placed: false,
        }
    }

    // =========================================================================
    // Page flow
    // =========================================================================

    /// Whether `required` more points fit above the footer reservation
    fn fits(&self, required: f32) -> bool {
        let s = self.settings;
        self.cursor + required + s.footer_reservation <= s.page_height - s.margin_bottom
    }

    /// Break the page when `required` does not fit. Returns whether it broke.
    ///
    /// A page holding only chrome is never abandoned, so an oversized block
    /// cannot produce a run of empty pages.
    fn check_new_page(&mut self, required: f32) -> bool {
        if self.fits(required) || !self.placed {
            return false;
        }
        debug!(
            page = self.page.number,
            cursor = self.cursor,
            required,
            mid_table = self.table.is_some(),
            "page break"
        );
        self.new_page();
        true
    }

    fn new_page(&mut self) {
        let next = Page::new(self.page.number + 1);
        self.pages.push(std::mem::replace(&mut self.page, next));
        self.cursor = self.settings.margin_top;
        self.placed = false;
        self.chrome_drawn = false;

        if self.chrome.is_some() {
            self.draw_chrome();
        }
        if let Some(columns) = self.table.clone() {
            trace!(page = self.page.number, "reprinting table header");
            self.draw_table_header(&columns);
        }
    }

    /// Space a block gets on a fresh page
    fn fresh_capacity(&self) -> f32 {
        self.settings.usable_height(self.chrome.is_some())
    }

    // =========================================================================
    // Drawing primitives
    // =========================================================================

    fn text(&mut self, x: f32, y: f32, size: f32, style: FontStyle, text: impl Into<String>) {
        self.page.elements.push(Element::Text(TextElement {
            x,
            y,
            size,
            style,
            text: text.into(),
        }));
    }

    fn rule(&mut self, x1: f32, x2: f32, y: f32, thickness: f32) {
        self.page
            .elements
            .push(Element::Rule(RuleElement { x1, x2, y, thickness }));
    }

    /// Baseline that vertically centers `size` text in a band of `height`
    fn baseline(&self, height: f32, size: f32) -> f32 {
        self.cursor + (height + size * 0.7) / 2.0
    }

    fn left(&self) -> f32 {
        self.settings.margin_left
    }

    fn right(&self) -> f32 {
        self.settings.page_width - self.settings.margin_right
    }

    fn width_of(&self, text: &str, size: f32) -> f32 {
        self.metrics.text_width(text, size)
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    fn place(&mut self, block: &Block) -> Result<()> {
        if !matches!(block, Block::TableRow { .. }) && self.table.take().is_some() {
            trace!(next = block.kind(), "table closed");
        }

        let s = self.settings;
        let required = block.required_height(s, self.metrics);
        match block {
            Block::Header { title, subtitle } => {
                self.chrome = Some(PageChrome {
                    title: title.clone(),
                    subtitle: subtitle.clone(),
                });
                if self.placed || self.chrome_drawn {
                    self.new_page();
                } else {
                    self.draw_chrome();
                }
            }
            Block::Section { title } => {
                self.check_new_page(required);
                let size = s.body_size + 2.0;
                let y = self.cursor + s.section_height - 8.0;
                self.text(self.left(), y, size, FontStyle::Bold, title.as_str());
                self.rule(self.left(), self.right(), y + 4.0, 0.75);
                self.cursor += s.section_height;
            }
            Block::Field { label, value } => {
                self.check_new_page(required);
                let label = format!("{}:", label);
                let y = self.baseline(s.field_height, s.body_size);
                let value_x =
                    self.left() + self.width_of(&label, s.body_size) + self.width_of(" ", s.body_size);
                let room = self.right() - value_x;
                let value = truncate(value, room, s.body_size, self.metrics);
                self.text(self.left(), y, s.body_size, FontStyle::Bold, label);
                self.text(value_x, y, s.body_size, FontStyle::Regular, value);
                self.cursor += s.field_height;
            }
            Block::Paragraph { text } => {
                let lines = wrap_text(text, s.content_width(), s.body_size, self.metrics);
                let whole = required <= self.fresh_capacity();
                if whole {
                    self.check_new_page(required);
                } else {
                    debug!(lines = lines.len(), "paragraph taller than a page; splitting by line");
                }
                for line in lines {
                    if !whole {
                        self.check_new_page(s.line_height);
                    }
                    let y = self.baseline(s.line_height, s.body_size);
                    self.text(self.left(), y, s.body_size, FontStyle::Regular, line);
                    self.cursor += s.line_height;
                    self.placed = true;
                }
            }
            Block::TableHeader { columns } => {
                if columns.is_empty() {
                    return Err(DocumentError::layout("table header has no columns"));
                }
                if columns.iter().any(|c| c.weight.is_nan() || c.weight <= 0.0) {
                    return Err(DocumentError::layout("table column weights must be positive"));
                }
                self.check_new_page(required);
                self.draw_table_header(columns);
                self.table = Some(columns.clone());
            }
            Block::TableRow { cells } => {
                let Some(columns) = self.table.clone() else {
                    return Err(DocumentError::layout("table row outside a table"));
                };
                self.check_new_page(required);
                let y = self.baseline(s.row_height, s.body_size);
                let spans = self.column_spans(&columns);
                for (i, (column, (x, width))) in columns.iter().zip(spans).enumerate() {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    self.draw_cell(cell, column.align, x, width, y, FontStyle::Regular);
                }
                self.cursor += s.row_height;
            }
            Block::Total { label, value } => {
                self.check_new_page(required);
                let size = s.body_size + 1.0;
                let mid = self.left() + s.content_width() / 2.0;
                self.rule(mid, self.right(), self.cursor + 4.0, 0.75);
                let y = self.baseline(s.total_height, size) + 2.0;
                let value_x = self.right() - self.width_of(value, size);
                self.text(mid, y, size, FontStyle::Bold, label.as_str());
                self.text(value_x, y, size, FontStyle::Bold, value.as_str());
                self.cursor += s.total_height;
            }
            Block::Spacer { .. } => {
                if self.fits(required) {
                    self.cursor += required;
                }
                return Ok(());
            }
        }

        if !matches!(block, Block::Header { .. }) {
            self.placed = true;
        }
        Ok(())
    }

    fn draw_chrome(&mut self) {
        let Some(chrome) = &self.chrome else {
            return;
        };
        let (title, subtitle) = (chrome.title.clone(), chrome.subtitle.clone());
        let s = self.settings;

        let title_y = self.cursor + s.title_size;
        self.text(self.left(), title_y, s.title_size, FontStyle::Bold, title);
        if !subtitle.is_empty() {
            let room = s.content_width();
            let subtitle = truncate(&subtitle, room, s.body_size, self.metrics);
            self.text(self.left(), title_y + s.line_height + 2.0, s.body_size, FontStyle::Regular, subtitle);
        }
        self.rule(self.left(), self.right(), self.cursor + s.header_height - 8.0, 1.0);
        self.cursor += s.header_height;
        self.chrome_drawn = true;
    }

    /// (x, width) of each column across the content width
    fn column_spans(&self, columns: &[TableColumn]) -> Vec<(f32, f32)> {
        let total: f32 = columns.iter().map(|c| c.weight).sum();
        let mut x = self.left();
        columns
            .iter()
            .map(|c| {
                let width = self.settings.content_width() * c.weight / total;
                let span = (x, width);
                x += width;
                span
            })
            .collect()
    }

    fn draw_cell(&mut self, text: &str, align: Align, x: f32, width: f32, y: f32, style: FontStyle) {
        let s = self.settings;
        let room = (width - 2.0 * s.cell_padding).max(0.0);
        let text = truncate(text, room, s.body_size, self.metrics);
        let text_x = match align {
            Align::Left => x + s.cell_padding,
            Align::Right => x + width - s.cell_padding - self.width_of(&text, s.body_size),
        };
        self.text(text_x, y, s.body_size, style, text);
    }

    fn draw_table_header(&mut self, columns: &[TableColumn]) {
        let s = self.settings;
        let y = self.baseline(s.row_height, s.body_size);
        for (column, (x, width)) in columns.iter().zip(self.column_spans(columns)) {
            self.draw_cell(&column.title, column.align, x, width, y, FontStyle::Bold);
        }
        self.rule(self.left(), self.right(), self.cursor + s.row_height, 0.5);
        self.cursor += s.row_height;
    }

    /// Close the last page and stamp every footer now that the total is known
    fn finish(mut self, locale: Locale) -> LaidOutDocument {
        let last = std::mem::replace(&mut self.page, Page::new(0));
        self.pages.push(last);

        let s = self.settings;
        let total = self.pages.len();
        let zone_top = s.content_bottom();
        let baseline = s.page_height - s.margin_bottom - 6.0;
        let right = s.page_width - s.margin_right;
        for page in &mut self.pages {
            let label = page_label(locale, page.number, total);
            let x = right - self.metrics.text_width(&label, s.small_size);
            page.elements.push(Element::Rule(RuleElement {
                x1: s.margin_left,
                x2: right,
                y: zone_top + 6.0,
                thickness: 0.5,
            }));
            page.elements.push(Element::Text(TextElement {
                x,
                y: baseline,
                size: s.small_size,
                style: FontStyle::Regular,
                text: label,
            }));
        }

        LaidOutDocument {
            width: s.page_width,
            height: s.page_height,
            pages: self.pages,
        }
    }
}
