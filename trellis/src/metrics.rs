//! Text measurement.
//!
//! Layout only needs sizes, not shaped glyphs, so the trait surface is a
//! single `measure` call. Hosts with a real font stack implement
//! [`TextMetrics`] against it; [`MonoMetrics`] is the built-in estimator
//! used by default and in headless tests.

use unicode_width::UnicodeWidthStr;

use crate::primitives::Size;

/// Estimated advance of one display column, in layout units.
pub const CHAR_WIDTH: f32 = 8.4;

/// Height of one text line, in layout units.
pub const LINE_HEIGHT: f32 = 18.0;

/// Measures text in layout units.
pub trait TextMetrics {
    /// Measure `text`, optionally wrapping at `wrap_width` layout units.
    ///
    /// Embedded newlines always break lines; a non-positive `wrap_width`
    /// is treated as no wrapping.
    fn measure(&self, text: &str, wrap_width: Option<f32>) -> Size;
}

/// Monospace estimator: display columns times [`CHAR_WIDTH`], lines times
/// [`LINE_HEIGHT`]. Wide characters count as two columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonoMetrics;

impl TextMetrics for MonoMetrics {
    fn measure(&self, text: &str, wrap_width: Option<f32>) -> Size {
        let wrap = wrap_width.filter(|w| *w > 0.0);
        let mut width: f32 = 0.0;
        let mut rows = 0usize;

        for line in text.split('\n') {
            let line_width = line.width() as f32 * CHAR_WIDTH;
            match wrap {
                Some(max) if line_width > max => {
                    rows += (line_width / max).ceil() as usize;
                    width = width.max(max);
                }
                _ => {
                    rows += 1;
                    width = width.max(line_width);
                }
            }
        }

        if let Some(max) = wrap {
            width = width.min(max);
        }
        Size::new(width, rows.max(1) as f32 * LINE_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line() {
        let size = MonoMetrics.measure("abc", None);
        assert_eq!(size, Size::new(3.0 * CHAR_WIDTH, LINE_HEIGHT));
    }

    #[test]
    fn empty_text_is_one_line_tall() {
        let size = MonoMetrics.measure("", None);
        assert_eq!(size, Size::new(0.0, LINE_HEIGHT));
    }

    #[test]
    fn multiline_takes_widest_line() {
        let size = MonoMetrics.measure("ab\ncdef", None);
        assert_eq!(size, Size::new(4.0 * CHAR_WIDTH, 2.0 * LINE_HEIGHT));
    }

    #[test]
    fn wide_chars_count_double() {
        let size = MonoMetrics.measure("你好", None);
        assert_eq!(size.width, 4.0 * CHAR_WIDTH);
    }

    #[test]
    fn wrap_caps_width_and_grows_height() {
        let natural = 10.0 * CHAR_WIDTH;
        let size = MonoMetrics.measure("aaaaaaaaaa", Some(40.0));
        assert_eq!(size.width, 40.0);
        let rows = (natural / 40.0).ceil();
        assert_eq!(size.height, rows * LINE_HEIGHT);
    }

    #[test]
    fn short_text_ignores_wrap() {
        let size = MonoMetrics.measure("ab", Some(200.0));
        assert_eq!(size, Size::new(2.0 * CHAR_WIDTH, LINE_HEIGHT));
    }

    #[test]
    fn non_positive_wrap_is_no_wrap() {
        let size = MonoMetrics.measure("aaaaaaaaaa", Some(0.0));
        assert_eq!(size.width, 10.0 * CHAR_WIDTH);
        assert_eq!(size.height, LINE_HEIGHT);
    }
}
