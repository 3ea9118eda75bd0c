//! Bookflow: a deterministic pagination engine for recipe documents
//!
//! This crate provides the layout core for a book-style recipe viewer:
//! - Content normalization (recipe record → typed content blocks)
//! - A pluggable measurement oracle (synthetic metrics or a wrapped
//!   rendering surface)
//! - A greedy flow algorithm with continuous ordered-list numbering,
//!   heading-keeping, and oversized-item splitting
//! - Left/right spread pairing and clamped prev/next navigation
//!
//! Fetching data, selecting a record, and injecting the produced HTML
//! are the embedding shell's job; the core is a pure function of
//! (document, page size, oracle).

pub mod document;
pub mod error;
pub mod layout;
pub mod navigation;
pub mod render;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmViewer;

// Re-export primary types
pub use document::{build_blocks, BuildOptions, ContentBlock, Ingredient, Recipe, SectionKind};
pub use error::{Error, Result};
pub use layout::{paginate, Fragment, Measure, Page, PageConfig, TextMetrics};
pub use navigation::SpreadNav;
pub use render::{pair_into_spreads, page_html, spread_html, Spread};

/// The full viewer state: one document flowed against one page size,
/// with spread navigation over the result.
///
/// All derived state (blocks, pages, spreads) is computed once in the
/// constructor and recomputed from scratch on [`Viewer::resize`];
/// nothing is shared between runs.
pub struct Viewer {
    recipe: Recipe,
    config: PageConfig,
    measure: Box<dyn Measure>,
    options: BuildOptions,
    pages: Vec<Page>,
    spreads: Vec<Spread>,
    nav: SpreadNav,
}

impl Viewer {
    /// Create a viewer with the synthetic measurement backend.
    pub fn new(recipe: Recipe, config: PageConfig) -> Result<Self> {
        Self::with_measure(
            recipe,
            config,
            Box::new(TextMetrics::default()),
            BuildOptions::default(),
        )
    }

    /// Create a viewer with a caller-supplied oracle and build options.
    pub fn with_measure(
        recipe: Recipe,
        config: PageConfig,
        measure: Box<dyn Measure>,
        options: BuildOptions,
    ) -> Result<Self> {
        let blocks = build_blocks(&recipe, &options);
        let pages = paginate(&blocks, &config, measure.as_ref())?;
        let spreads = pair_into_spreads(pages.clone());
        let nav = SpreadNav::new(spreads.len(), 0);
        Ok(Self {
            recipe,
            config,
            measure,
            options,
            pages,
            spreads,
            nav,
        })
    }

    /// Re-run pagination against a new page size.
    ///
    /// From-scratch and idempotent; the current spread index is kept
    /// where possible and clamped otherwise.
    pub fn resize(&mut self, config: PageConfig) -> Result<()> {
        let blocks = build_blocks(&self.recipe, &self.options);
        let pages = paginate(&blocks, &config, self.measure.as_ref())?;
        let spreads = pair_into_spreads(pages.clone());
        self.nav = SpreadNav::new(spreads.len(), self.nav.index());
        self.config = config;
        self.pages = pages;
        self.spreads = spreads;
        Ok(())
    }

    /// The input record
    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// The active page configuration
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// All pages, in order
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// All spreads, in order
    pub fn spreads(&self) -> &[Spread] {
        &self.spreads
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn spread_count(&self) -> usize {
        self.spreads.len()
    }

    /// The spread under the navigation cursor, if any
    pub fn current_spread(&self) -> Option<&Spread> {
        self.spreads.get(self.nav.index())
    }

    /// HTML of the current spread; empty when there are no spreads
    pub fn current_spread_html(&self) -> String {
        self.current_spread().map(spread_html).unwrap_or_default()
    }

    /// Advance to the next spread and return it; `None` only when there
    /// are no spreads at all. A no-op at the last spread.
    pub fn next(&mut self) -> Option<&Spread> {
        self.nav.next();
        self.current_spread()
    }

    /// Go back one spread and return it; a no-op at the first.
    pub fn prev(&mut self) -> Option<&Spread> {
        self.nav.prev();
        self.current_spread()
    }

    /// Jump to spread `index` (clamped) and return it.
    pub fn goto(&mut self, index: usize) -> Option<&Spread> {
        self.nav.goto(index);
        self.current_spread()
    }

    pub fn current_index(&self) -> usize {
        self.nav.index()
    }

    pub fn can_go_prev(&self) -> bool {
        self.nav.can_go_prev()
    }

    pub fn can_go_next(&self) -> bool {
        self.nav.can_go_next()
    }
}
