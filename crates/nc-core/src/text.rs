//! Text measurement for auto-sized text nodes.

use crate::model::Style;

/// Measures the box a piece of text needs under a style.
///
/// Hosts with a real shaping engine implement this; the canvas falls back to
/// [`ApproxTextMetrics`].
pub trait TextMeasure {
    /// Returns `(width, height)` in world units.
    fn measure(&self, text: &str, style: &Style) -> (f32, f32);
}

/// Horizontal padding added around measured text.
const TEXT_PADDING: f32 = 10.0;
/// Line height as a multiple of font size.
const LINE_HEIGHT: f32 = 1.5;
/// Width of an empty text box.
const EMPTY_WIDTH: f32 = 20.0;

/// Fixed-advance estimate: no font files needed, deterministic in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMetrics;

impl ApproxTextMetrics {
    fn advance(style: &Style) -> f32 {
        let family = style.font_family.to_ascii_lowercase();
        let mut factor = if family.contains("mono") || family.contains("courier") {
            0.6
        } else {
            0.55
        };
        if style.font_weight >= 600 {
            factor += 0.03;
        }
        factor * style.font_size
    }
}

impl TextMeasure for ApproxTextMetrics {
    fn measure(&self, text: &str, style: &Style) -> (f32, f32) {
        let line_height = style.font_size * LINE_HEIGHT;
        if text.is_empty() {
            return (EMPTY_WIDTH, line_height);
        }

        let advance = Self::advance(style);
        let mut lines = 0usize;
        let mut widest = 0usize;
        for line in text.split('\n') {
            lines += 1;
            widest = widest.max(line.chars().count());
        }

        (widest as f32 * advance + TEXT_PADDING, line_height * lines as f32)
    }
}
