//! Text measurement

/// Width of rendered text in points
pub trait TextMetrics: Send + Sync {
    /// Width of `text` set at `size` points
    fn text_width(&self, text: &str, size: f32) -> f32;

    /// How many leading characters of `text` fit in `width`
    fn fitting_chars(&self, text: &str, width: f32, size: f32) -> usize {
        let mut fitted = 0;
        for (i, _) in text.char_indices().skip(1) {
            if self.text_width(&text[..i], size) > width {
                return fitted;
            }
            fitted += 1;
        }
        if self.text_width(text, size) <= width {
            text.chars().count()
        } else {
            fitted
        }
    }
}

/// Glyph advance of every Courier glyph, in 1/1000 em
pub const COURIER_ADVANCE: f32 = 600.0;

/// Metrics of the standard Courier and Courier-Bold base fonts.
///
/// Courier is monospaced, so a width is the character count times the
/// advance; these figures match what a PDF viewer draws exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct CourierMetrics;

impl CourierMetrics {
    /// Width of one glyph at `size`
    pub fn glyph_width(size: f32) -> f32 {
        COURIER_ADVANCE / 1000.0 * size
    }
}

impl TextMetrics for CourierMetrics {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * Self::glyph_width(size)
    }

    fn fitting_chars(&self, text: &str, width: f32, size: f32) -> usize {
        let glyph = Self::glyph_width(size);
        let count = text.chars().count();
        if glyph <= 0.0 {
            return count;
        }
        // Small epsilon so a width computed from n glyphs admits n glyphs
        let capacity = ((width + 1e-3) / glyph).floor().max(0.0) as usize;
        capacity.min(count)
    }
}
