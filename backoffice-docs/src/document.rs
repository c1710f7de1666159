//! Printable documents: validate, compile to blocks, lay out, render

use crate::blocks::Block;
use crate::error::Result;
use crate::format::Locale;
use crate::layout::{layout_blocks, LaidOutDocument};
use crate::metrics::CourierMetrics;
use crate::pdf::render_pdf;
use crate::settings::LayoutSettings;
use tracing::info;

/// A business document that compiles into content blocks
pub trait Printable {
    /// Check the input; every failed rule is reported
    fn validate(&self) -> Result<()>;

    /// Block sequence for `locale`; assumes `validate` passed
    fn to_blocks(&self, locale: Locale) -> Vec<Block>;

    /// Document title, used as PDF metadata and output file stem
    fn title(&self, locale: Locale) -> String;

    /// Validate and paginate
    fn layout(&self, settings: &LayoutSettings, locale: Locale) -> Result<LaidOutDocument> {
        self.validate()?;
        layout_blocks(&self.to_blocks(locale), settings, &CourierMetrics, locale)
    }

    /// Validate, paginate and serialize to PDF bytes
    fn render_pdf(&self, settings: &LayoutSettings, locale: Locale) -> Result<Vec<u8>> {
        let laid_out = self.layout(settings, locale)?;
        let title = self.title(locale);
        let bytes = render_pdf(&laid_out, Some(&title))?;
        info!(%title, pages = laid_out.page_count(), "rendered document");
        Ok(bytes)
    }
}
