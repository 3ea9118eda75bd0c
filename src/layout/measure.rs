//! Measurement oracle: decides whether candidate content fits a page

use crate::error::Result;
use crate::layout::page::{Fragment, PageConfig};
use rustc_hash::FxHashMap;
use std::hash::{Hash, Hasher};
use unicode_linebreak::{linebreaks, BreakOpportunity};

/// Indentation applied to list items, in logical pixels
pub const INDENT_WIDTH: f32 = 24.0;

/// Height oracle for candidate page content.
///
/// Implementations must be pure (same input, same output) and
/// monotonic: appending fragments never decreases the reported height.
/// The flow engine's prefix binary search depends on both. A live
/// rendering surface can back this trait as long as the wrapper keeps
/// each call independent.
pub trait Measure {
    /// Rendered height of the fragment sequence, in logical pixels.
    fn height_of(&self, fragments: &[Fragment], config: &PageConfig) -> Result<f32>;

    /// Whether the fragment sequence fits the usable page height.
    fn fits(&self, fragments: &[Fragment], config: &PageConfig) -> Result<bool> {
        Ok(self.height_of(fragments, config)? <= config.usable_height())
    }
}

/// Deterministic synthetic measurement backend.
///
/// Heights come from a character-width table and a line-height model,
/// with wrapped-line counts estimated from Unicode break opportunities.
/// Deliberately environment-free: no fonts, no layout surface.
#[derive(Debug, Clone)]
pub struct TextMetrics {
    /// Line height in logical pixels
    pub line_height: f32,
    /// Width of ASCII characters (0-127)
    pub char_widths: Vec<f32>,
    /// Default width for non-ASCII characters
    pub default_width: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        // 16px at line-height 1.6, monospace-ish advance
        let default_width = 8.41;
        Self {
            line_height: 25.6,
            char_widths: vec![default_width; 128],
            default_width,
        }
    }
}

impl TextMetrics {
    pub fn new(line_height: f32, char_widths: Vec<f32>, default_width: f32) -> Self {
        Self {
            line_height,
            char_widths,
            default_width,
        }
    }

    /// Get width of a character
    pub fn char_width(&self, c: char) -> f32 {
        if c.is_ascii() {
            if let Some(w) = self.char_widths.get(c as usize) {
                return *w;
            }
        }
        self.default_width
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().map(|c| self.char_width(c)).sum()
    }

    /// Estimate wrapped line count for text in a column of `max_width`.
    ///
    /// Greedy fill over Unicode break opportunities; a segment wider
    /// than the column contributes its overflow as extra lines so the
    /// estimate stays monotonic in appended text.
    fn line_count(&self, text: &str, max_width: f32) -> usize {
        if text.is_empty() {
            return 0;
        }

        let mut lines = 1usize;
        let mut current = 0f32;
        let mut prev = 0usize;

        for (pos, opportunity) in linebreaks(text) {
            let width = self.text_width(&text[prev..pos]);
            prev = pos;

            if current > 0.0 && current + width > max_width {
                lines += 1;
                current = 0.0;
            }
            if width > max_width {
                lines += (width / max_width).ceil() as usize - 1;
                current = width % max_width;
            } else {
                current += width;
            }

            if opportunity == BreakOpportunity::Mandatory && pos < text.len() {
                lines += 1;
                current = 0.0;
            }
        }

        lines
    }

    /// Line-height multiplier for a fragment
    fn line_height_multiplier(fragment: &Fragment) -> f32 {
        match fragment {
            Fragment::Heading { level, .. } => match level {
                1 => 1.5,
                2 => 1.4,
                3 => 1.3,
                _ => 1.2,
            },
            _ => 1.0,
        }
    }

    /// Spacing after a fragment, in line heights
    fn spacing_after(fragment: &Fragment) -> f32 {
        match fragment {
            Fragment::Heading { .. } => 0.5,
            Fragment::Paragraph { .. } => 1.0,
            Fragment::ListOpen { .. } => 0.25,
            Fragment::Item { .. } => 0.25,
            Fragment::ListClose { .. } => 0.5,
        }
    }

    fn fragment_height(&self, fragment: &Fragment, config: &PageConfig) -> f32 {
        let spacing = Self::spacing_after(fragment) * self.line_height;
        match fragment {
            Fragment::Heading { text, .. } => {
                let lines = self.line_count(text, config.content_width);
                lines as f32 * self.line_height * Self::line_height_multiplier(fragment) + spacing
            }
            Fragment::Paragraph { text } => {
                let lines = self.line_count(text, config.content_width);
                lines as f32 * self.line_height + spacing
            }
            Fragment::Item { text, .. } => {
                // Malformed entries coerced to "" stay zero-height
                if text.is_empty() {
                    return 0.0;
                }
                let width = (config.content_width - INDENT_WIDTH).max(1.0);
                let lines = self.line_count(text, width);
                lines as f32 * self.line_height + spacing
            }
            Fragment::ListOpen { .. } | Fragment::ListClose { .. } => spacing,
        }
    }
}

impl Measure for TextMetrics {
    fn height_of(&self, fragments: &[Fragment], config: &PageConfig) -> Result<f32> {
        Ok(fragments
            .iter()
            .map(|f| self.fragment_height(f, config))
            .sum())
    }
}

/// Per-run memo for repeated candidate measurements.
///
/// Keyed by a hash of the full fragment sequence; owned by a single
/// pagination run and discarded with it, so runs never share state.
#[derive(Debug, Default)]
pub struct MeasureCache {
    heights: FxHashMap<u64, f32>,
}

impl MeasureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure through the cache.
    pub fn height_of(
        &mut self,
        measure: &dyn Measure,
        fragments: &[Fragment],
        config: &PageConfig,
    ) -> Result<f32> {
        let key = hash_fragments(fragments);
        if let Some(height) = self.heights.get(&key) {
            return Ok(*height);
        }
        let height = measure.height_of(fragments, config)?;
        self.heights.insert(key, height);
        Ok(height)
    }
}

/// Hash a fragment sequence for memoization
fn hash_fragments(fragments: &[Fragment]) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    let mut hasher = DefaultHasher::new();
    fragments.hash(&mut hasher);
    hasher.finish()
}
