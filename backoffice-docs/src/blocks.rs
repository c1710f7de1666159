//! Content blocks: the input vocabulary of the layout engine.
//!
//! A document is a flat sequence of blocks. Each block knows how much
//! vertical space it needs; the engine decides where it goes.

use crate::metrics::TextMetrics;
use crate::settings::LayoutSettings;
use crate::wrap::wrap_text;
use serde::{Deserialize, Serialize};

/// Horizontal alignment of a table column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// One column of a table: a title and a relative width
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub title: String,
    #[serde(default = "default_weight")]
    pub weight: f32,
    #[serde(default)]
    pub align: Align,
}

fn default_weight() -> f32 {
    1.0
}

impl TableColumn {
    pub fn new(title: impl Into<String>, weight: f32) -> Self {
        Self {
            title: title.into(),
            weight,
            align: Align::Left,
        }
    }

    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }
}

/// A renderable unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Page chrome; reprinted at the top of every following page
    Header {
        title: String,
        #[serde(default)]
        subtitle: String,
    },
    /// Bold heading with a rule beneath
    Section { title: String },
    /// `label: value` on one line
    Field { label: String, value: String },
    /// Wrapped text; the only block that may split across pages
    Paragraph { text: String },
    /// Opens a table; later rows reprint this header after a page break
    TableHeader { columns: Vec<TableColumn> },
    /// One table row; cells beyond the column width are truncated
    TableRow { cells: Vec<String> },
    /// Emphasized label/amount pair, right aligned
    Total { label: String, value: String },
    /// Vertical gap; dropped when it would not fit on the page
    Spacer { height: f32 },
}

impl Block {
    pub fn header(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self::Header {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }

    pub fn section(title: impl Into<String>) -> Self {
        Self::Section {
            title: title.into(),
        }
    }

    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Field {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }

    pub fn table_header(columns: Vec<TableColumn>) -> Self {
        Self::TableHeader { columns }
    }

    pub fn table_row<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::TableRow {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    pub fn total(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Total {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn spacer(height: f32) -> Self {
        Self::Spacer { height }
    }

    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Header { .. } => "header",
            Self::Section { .. } => "section",
            Self::Field { .. } => "field",
            Self::Paragraph { .. } => "paragraph",
            Self::TableHeader { .. } => "table_header",
            Self::TableRow { .. } => "table_row",
            Self::Total { .. } => "total",
            Self::Spacer { .. } => "spacer",
        }
    }

    /// Vertical space the block needs before it is placed.
    ///
    /// A table header asks for its own row plus one body row so it is never
    /// left alone at the bottom of a page.
    pub fn required_height(&self, settings: &LayoutSettings, metrics: &dyn TextMetrics) -> f32 {
        match self {
            Self::Header { .. } => settings.header_height,
            Self::Section { .. } => settings.section_height,
            Self::Field { .. } => settings.field_height,
            Self::Paragraph { text } => {
                let lines = wrap_text(text, settings.content_width(), settings.body_size, metrics);
                lines.len() as f32 * settings.line_height
            }
            Self::TableHeader { .. } => settings.row_height * 2.0,
            Self::TableRow { .. } => settings.row_height,
            Self::Total { .. } => settings.total_height,
            Self::Spacer { height } => height.max(0.0),
        }
    }
}
