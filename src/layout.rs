//! Dynamic Layout - keeps arbitrary text inside the fixed canvas
//!
//! Font sizes are derived from text length with a clamped linear ramp.
//! This approximates measurement; the guarantees are the bounds and
//! monotonicity (longer text never gets a larger font).

use crate::settings::HOOK_FONT_SIZE_RANGE;

pub const CANVAS_WIDTH: u32 = 1080;
pub const CANVAS_HEIGHT: u32 = 1350;

/// Horizontal padding on each side of text blocks.
pub const SIDE_PADDING: f32 = 90.0;

/// Average glyph advance relative to the font size for the bold display face.
const GLYPH_ADVANCE: f32 = 0.56;

/// Line height multiplier for display (hook/CTA) text.
pub const DISPLAY_LINE_HEIGHT: f32 = 1.1;

/// Length-based font sizing for one templated field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontScale {
    pub base: f32,
    pub pivot: usize,
    pub slope: f32,
    pub min: f32,
    pub max: f32,
}

impl FontScale {
    pub fn new(base: f32, pivot: usize, slope: f32, min: f32, max: f32) -> Self {
        debug_assert!(slope >= 0.0, "slope must be non-negative");
        debug_assert!(min <= max, "min must not exceed max");
        Self { base, pivot, slope, min, max }
    }

    /// `clamp(base - (len - pivot) * slope, min, max)`; empty text resolves to `max`.
    ///
    /// `max` wins over `min` when the bounds are inverted.
    pub fn size_for(&self, text: &str) -> f32 {
        let len = text.chars().count();
        if len == 0 {
            return self.max;
        }
        let delta = len as f32 - self.pivot as f32;
        (self.base - delta * self.slope).max(self.min).min(self.max)
    }
}

/// Header titles on body slides.
pub const TITLE_SCALE: FontScale = FontScale { base: 72.0, pivot: 20, slope: 1.2, min: 44.0, max: 84.0 };
/// Subtitles and kicker lines.
pub const SUBTITLE_SCALE: FontScale = FontScale { base: 38.0, pivot: 40, slope: 0.3, min: 26.0, max: 44.0 };
/// Large CTA lines on reward slides; the operator's CTA size is the ceiling.
pub const CTA_PIVOT: usize = 10;
pub const CTA_SLOPE: f32 = 2.0;
pub const CTA_MIN: f32 = 44.0;
/// Keyword / big-number callouts.
pub const CALLOUT_SCALE: FontScale = FontScale { base: 200.0, pivot: 4, slope: 18.0, min: 96.0, max: 240.0 };
/// Quotes on body slides.
pub const QUOTE_SCALE: FontScale = FontScale { base: 64.0, pivot: 60, slope: 0.25, min: 36.0, max: 72.0 };

/// CTA scale whose ceiling is the operator-selected CTA size.
pub fn cta_scale(cta_size: u32) -> FontScale {
    let max = cta_size as f32;
    FontScale::new(max, CTA_PIVOT, CTA_SLOPE, CTA_MIN.min(max), max)
}

/// Number of explicit lines; the engine never wraps on its own.
pub fn line_count(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.matches('\n').count() + 1
    }
}

/// Lines of multi-line text, split on explicit breaks only.
pub fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }
    text.split('\n').map(|l| l.trim_end_matches('\r').to_string()).collect()
}

/// Resolved sizing for free-form hook text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookFit {
    pub font_size: f32,
    pub lines: usize,
}

/// Fits multi-line hook text into the canvas.
///
/// Starts from the operator's font size (clamped to hook bounds) and
/// shrinks until the longest line fits the text width and all lines fit
/// `available_height`. Never leaves the hook bounds.
pub fn fit_hook_text(text: &str, requested: u32, available_height: f32) -> HookFit {
    let (min, max) = HOOK_FONT_SIZE_RANGE;
    let (min, max) = (min as f32, max as f32);
    let requested = (requested as f32).clamp(min, max);

    let lines = line_count(text);
    let longest = text.split('\n').map(|l| l.chars().count()).max().unwrap_or(0);

    let width_limit = if longest == 0 {
        max
    } else {
        (CANVAS_WIDTH as f32 - 2.0 * SIDE_PADDING) / (longest as f32 * GLYPH_ADVANCE)
    };
    let height_limit = if lines == 0 {
        max
    } else {
        available_height / (lines as f32 * DISPLAY_LINE_HEIGHT)
    };

    let font_size = requested.min(width_limit).min(height_limit).clamp(min, max).floor();
    HookFit { font_size, lines }
}

/// Fits a list of body lines given the operator's base size and spacing.
///
/// Shrinks uniformly when the stacked block would exceed `available_height`.
pub fn fit_body_block(items: &[String], base: u32, line_height: f32, available_height: f32, min: f32) -> f32 {
    let base = base as f32;
    let rows: usize = items.iter().map(|i| line_count(i).max(1)).sum();
    if rows == 0 {
        return base;
    }
    let needed = rows as f32 * base * line_height;
    if needed <= available_height {
        base
    } else {
        (available_height / (rows as f32 * line_height)).clamp(min, base).floor()
    }
}

/// Caps a length-based size so `lines` stacked lines fit `available_height`.
///
/// The result stays in `[min, max]` and never grows with more lines.
pub fn fit_to_height(size: f32, lines: usize, line_height: f32, available_height: f32, min: f32, max: f32) -> f32 {
    let limit = if lines == 0 {
        max
    } else {
        available_height.max(0.0) / (lines as f32 * line_height)
    };
    size.min(limit).clamp(min, max)
}

/// Uniform scale that fits the canvas into an available area.
pub fn fit_scale(available_width: f32, available_height: f32) -> f32 {
    let w = available_width / CANVAS_WIDTH as f32;
    let h = available_height / CANVAS_HEIGHT as f32;
    w.min(h).max(0.0)
}
