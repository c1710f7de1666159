//! Page geometry and typography

use crate::error::{DocumentError, Result};
use serde::{Deserialize, Serialize};

/// A4 width in points
pub const A4_WIDTH: f32 = 595.28;
/// A4 height in points
pub const A4_HEIGHT: f32 = 841.89;

/// Layout settings; all lengths are in points, y grows downward from the top edge.
///
/// Every field has a default, so a partial TOML/JSON table is enough to
/// override one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Vertical space taken by the page header chrome
    pub header_height: f32,
    /// Space kept free above the bottom margin for the footer
    pub footer_reservation: f32,
    pub title_size: f32,
    pub body_size: f32,
    pub small_size: f32,
    /// Paragraph line pitch
    pub line_height: f32,
    pub field_height: f32,
    pub section_height: f32,
    pub row_height: f32,
    pub total_height: f32,
    /// Horizontal padding inside table cells
    pub cell_padding: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            margin_top: 40.0,
            margin_bottom: 40.0,
            margin_left: 48.0,
            margin_right: 48.0,
            header_height: 56.0,
            footer_reservation: 28.0,
            title_size: 16.0,
            body_size: 10.0,
            small_size: 8.0,
            line_height: 14.0,
            field_height: 16.0,
            section_height: 26.0,
            row_height: 18.0,
            total_height: 26.0,
            cell_padding: 4.0,
        }
    }
}

impl LayoutSettings {
    /// Horizontal space between the margins
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Lowest y a block may reach: `page_height - margin_bottom - footer_reservation`
    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margin_bottom - self.footer_reservation
    }

    /// Height available on a fresh page below the chrome
    pub fn usable_height(&self, with_header: bool) -> f32 {
        let top = self.margin_top + if with_header { self.header_height } else { 0.0 };
        self.content_bottom() - top
    }

    /// Reject geometry that cannot hold a table header with one row
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("title_size", self.title_size),
            ("body_size", self.body_size),
            ("small_size", self.small_size),
            ("line_height", self.line_height),
            ("field_height", self.field_height),
            ("section_height", self.section_height),
            ("row_height", self.row_height),
            ("total_height", self.total_height),
        ];
        if let Some((name, _)) = lengths.iter().find(|(_, v)| v.is_nan() || *v <= 0.0) {
            return Err(DocumentError::layout(format!("{} must be positive", name)));
        }
        let margins = [
            self.margin_top,
            self.margin_bottom,
            self.margin_left,
            self.margin_right,
            self.header_height,
            self.footer_reservation,
            self.cell_padding,
        ];
        if margins.iter().any(|m| *m < 0.0) {
            return Err(DocumentError::layout("margins and reservations cannot be negative"));
        }
        if self.content_width() <= 2.0 * self.cell_padding {
            return Err(DocumentError::layout("page is narrower than its margins"));
        }

        let tallest = [
            self.row_height * 2.0,
            self.section_height,
            self.field_height,
            self.total_height,
            self.line_height,
        ]
        .into_iter()
        .fold(0.0_f32, f32::max);
        if self.usable_height(true) < tallest {
            return Err(DocumentError::layout(
                "page has no room for content between header and footer",
            ));
        }
        Ok(())
    }
}
