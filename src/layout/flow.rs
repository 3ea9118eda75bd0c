//! Page flow engine: assigns content blocks to pages

use crate::document::{ContentBlock, SectionKind};
use crate::error::Result;
use crate::layout::measure::{Measure, MeasureCache};
use crate::layout::page::{Fragment, Page, PageConfig};
use log::{debug, trace};
use std::slice;
use unicode_segmentation::UnicodeSegmentation;

/// Flow a block sequence into pages.
///
/// Pure function of (blocks, config, oracle): single pass, no shared
/// state, deterministic for a deterministic oracle. Zero blocks produce
/// zero pages. Every page's fragment list is well-formed (lists opened
/// on a page are closed on it) and fits the usable height, except for
/// the grapheme-level forward-progress fallback on pathological input.
pub fn paginate(
    blocks: &[ContentBlock],
    config: &PageConfig,
    measure: &dyn Measure,
) -> Result<Vec<Page>> {
    config.validate()?;
    let mut engine = FlowEngine::new(config, measure);
    for block in blocks {
        engine.place(block)?;
    }
    Ok(engine.finish())
}

/// Single-pass packer state.
struct FlowEngine<'a> {
    config: &'a PageConfig,
    measure: &'a dyn Measure,
    cache: MeasureCache,
    pages: Vec<Page>,
    current: Vec<Fragment>,
    /// Section whose list is (or was last) open on the current page
    section: Option<SectionKind>,
    list_open: bool,
    list_ordered: bool,
    /// Next unassigned ordinal for ordered sections
    next_ordinal: u32,
}

impl<'a> FlowEngine<'a> {
    fn new(config: &'a PageConfig, measure: &'a dyn Measure) -> Self {
        Self {
            config,
            measure,
            cache: MeasureCache::new(),
            pages: Vec::new(),
            current: Vec::new(),
            section: None,
            list_open: false,
            list_ordered: false,
            next_ordinal: 1,
        }
    }

    fn place(&mut self, block: &ContentBlock) -> Result<()> {
        match block {
            ContentBlock::Heading { text, level } => {
                let level = *level;
                self.place_text_block(
                    Fragment::Heading {
                        text: text.clone(),
                        level,
                    },
                    move |s| Fragment::Heading {
                        text: s.to_string(),
                        level,
                    },
                )
            }
            ContentBlock::Paragraph { text } => self.place_text_block(
                Fragment::Paragraph { text: text.clone() },
                |s| Fragment::Paragraph {
                    text: s.to_string(),
                },
            ),
            ContentBlock::SectionStart { section, ordered } => {
                self.open_section(*section, *ordered)
            }
            ContentBlock::ListItem {
                section,
                text,
                ordinal,
            } => self.place_item(*section, text, *ordinal),
            ContentBlock::SectionEnd { section } => {
                // Close without forcing a page break: later sections
                // keep flowing onto the same page
                if self.list_open && self.section == Some(*section) {
                    self.close_list();
                }
                self.section = None;
                Ok(())
            }
        }
    }

    /// Place a heading or paragraph, flushing first if it overflows.
    fn place_text_block(
        &mut self,
        fragment: Fragment,
        make: impl Fn(&str) -> Fragment,
    ) -> Result<()> {
        self.close_list();
        if self.fits_with(slice::from_ref(&fragment))? {
            self.commit(fragment);
            return Ok(());
        }
        if !self.current.is_empty() {
            self.flush();
        }
        if self.fits_with(slice::from_ref(&fragment))? {
            self.commit(fragment);
            return Ok(());
        }
        // Taller than an empty page: pathological config, split anyway
        let text = match &fragment {
            Fragment::Heading { text, .. } | Fragment::Paragraph { text } => text.clone(),
            _ => String::new(),
        };
        self.place_split(&text, None, |s, _| make(s))
    }

    /// Open a section's list container with its heading.
    ///
    /// Heading and container are placed as a unit so the heading is
    /// never orphaned at the bottom of a page.
    fn open_section(&mut self, section: SectionKind, ordered: bool) -> Result<()> {
        self.close_list();
        self.section = Some(section);
        self.list_ordered = ordered;

        let start = if ordered { self.next_ordinal } else { 1 };
        let frags = [
            Fragment::Heading {
                text: section.title().to_string(),
                level: 3,
            },
            Fragment::ListOpen {
                section,
                ordered,
                start,
            },
        ];
        if !self.fits_with(&frags)? && !self.current.is_empty() {
            self.flush();
        }
        trace!("open {:?} list on page {}", section, self.pages.len());
        self.current.extend(frags);
        self.list_open = true;
        Ok(())
    }

    fn place_item(&mut self, section: SectionKind, text: &str, ordinal: Option<u32>) -> Result<()> {
        if !self.list_open || self.section != Some(section) {
            // Builder always opens the section first; recover anyway
            self.open_section(section, ordinal.is_some())?;
        }

        let fragment = Fragment::Item {
            text: text.to_string(),
            ordinal,
            continued: false,
        };
        let start = ordinal.unwrap_or(self.next_ordinal);

        if self.fits_with(slice::from_ref(&fragment))? {
            self.commit(fragment);
        } else {
            let fresh_list = matches!(self.current.last(), Some(Fragment::ListOpen { .. }));
            if fresh_list && self.current.len() > 2 {
                // The list has no items on this page yet: carry the
                // heading and container to the next page with the item
                self.carry_list_to_new_page();
            } else if !fresh_list {
                // The page holds earlier items: close it and reopen the
                // list at the same ordinal state
                self.flush_and_reopen(start);
            }
            if self.fits_with(slice::from_ref(&fragment))? {
                self.commit(fragment);
            } else {
                // Single item taller than an empty page
                self.place_split(text, Some(start), |s, continued| Fragment::Item {
                    text: s.to_string(),
                    ordinal,
                    continued,
                })?;
            }
        }

        if let Some(o) = ordinal {
            self.next_ordinal = o + 1;
        }
        Ok(())
    }

    /// Place text that cannot fit whole: emit the longest fitting
    /// word-prefix, flush, and continue with the suffix until done.
    ///
    /// Bounded by the word count (grapheme count in the degenerate
    /// case); the chunks concatenate back to the input exactly.
    fn place_split<F>(&mut self, text: &str, list_start: Option<u32>, make: F) -> Result<()>
    where
        F: Fn(&str, bool) -> Fragment,
    {
        let mut rest = text;
        let mut first = true;
        while !rest.is_empty() {
            let len = self.longest_fitting_prefix(rest, !first, &make)?;
            self.commit(make(&rest[..len], !first));
            rest = &rest[len..];
            if !rest.is_empty() {
                match list_start {
                    Some(start) => self.flush_and_reopen(start),
                    None => self.flush(),
                }
                first = false;
            }
        }
        Ok(())
    }

    /// Longest prefix of `text` (ending on a word boundary, degrading
    /// to grapheme boundaries) that fits the current page.
    fn longest_fitting_prefix<F>(&mut self, text: &str, continued: bool, make: &F) -> Result<usize>
    where
        F: Fn(&str, bool) -> Fragment,
    {
        let word_ends: Vec<usize> = text
            .split_word_bound_indices()
            .map(|(i, w)| i + w.len())
            .collect();
        if let Some(len) = self.best_prefix(text, &word_ends, continued, make)? {
            return Ok(len);
        }

        // No whole word fits: split inside the word
        let grapheme_ends: Vec<usize> = text
            .grapheme_indices(true)
            .map(|(i, g)| i + g.len())
            .collect();
        if let Some(len) = self.best_prefix(text, &grapheme_ends, continued, make)? {
            return Ok(len);
        }

        // Forward progress: one grapheme, even if it overflows
        Ok(text
            .graphemes(true)
            .next()
            .map(|g| g.len())
            .unwrap_or(text.len()))
    }

    /// Binary search over candidate end offsets; relies on the oracle's
    /// monotonicity invariant.
    fn best_prefix<F>(
        &mut self,
        text: &str,
        ends: &[usize],
        continued: bool,
        make: &F,
    ) -> Result<Option<usize>>
    where
        F: Fn(&str, bool) -> Fragment,
    {
        let mut best = None;
        let (mut lo, mut hi) = (0usize, ends.len());
        while lo < hi {
            let mid = (lo + hi) / 2;
            let fragment = make(&text[..ends[mid]], continued);
            if self.fits_with(slice::from_ref(&fragment))? {
                best = Some(ends[mid]);
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        Ok(best)
    }

    /// Would the current page plus `extra` still fit?
    ///
    /// An open list is measured with its implicit close so committing
    /// the close later cannot overflow the page.
    fn fits_with(&mut self, extra: &[Fragment]) -> Result<bool> {
        let mut candidate = Vec::with_capacity(self.current.len() + extra.len() + 1);
        candidate.extend_from_slice(&self.current);
        candidate.extend_from_slice(extra);
        if let Some(ordered) = open_list_ordered(&candidate) {
            candidate.push(Fragment::ListClose { ordered });
        }
        let height = self
            .cache
            .height_of(self.measure, &candidate, self.config)?;
        Ok(height <= self.config.usable_height())
    }

    fn commit(&mut self, fragment: Fragment) {
        trace!("page {}: place {:?}", self.pages.len(), fragment);
        self.current.push(fragment);
    }

    fn close_list(&mut self) {
        if self.list_open {
            self.current.push(Fragment::ListClose {
                ordered: self.list_ordered,
            });
            self.list_open = false;
        }
    }

    /// Close the current page and start an empty one.
    fn flush(&mut self) {
        self.close_list();
        if self.current.is_empty() {
            return;
        }
        debug!(
            "flush page {} ({} fragments)",
            self.pages.len(),
            self.current.len()
        );
        let fragments = std::mem::take(&mut self.current);
        self.pages.push(Page {
            index: self.pages.len(),
            fragments,
        });
    }

    /// Flush, then reopen the current section's list on the new page
    /// with its heading repeated and numbering continued at `start`.
    fn flush_and_reopen(&mut self, start: u32) {
        let Some(section) = self.section else {
            self.flush();
            return;
        };
        let ordered = self.list_ordered;
        self.flush();
        self.current.push(Fragment::Heading {
            text: section.title().to_string(),
            level: 3,
        });
        self.current.push(Fragment::ListOpen {
            section,
            ordered,
            start,
        });
        self.list_open = true;
        self.list_ordered = ordered;
    }

    /// Move a just-opened, still-empty list container (and its heading)
    /// off a page that has other content, so the heading lands on the
    /// same page as the list's first item.
    fn carry_list_to_new_page(&mut self) {
        let container = self.current.pop();
        let heading = self.current.pop();
        self.list_open = false;
        self.flush();
        if let Some(heading) = heading {
            self.current.push(heading);
        }
        if let Some(container) = container {
            self.current.push(container);
        }
        self.list_open = true;
    }

    fn finish(mut self) -> Vec<Page> {
        self.flush();
        self.pages
    }
}

/// Orderedness of the still-open list in `fragments`, if any
fn open_list_ordered(fragments: &[Fragment]) -> Option<bool> {
    let mut open = None;
    for fragment in fragments {
        match fragment {
            Fragment::ListOpen { ordered, .. } => open = Some(*ordered),
            Fragment::ListClose { .. } => open = None,
            _ => {}
        }
    }
    open
}
