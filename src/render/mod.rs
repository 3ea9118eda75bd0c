//! Render output: HTML realization and spread pairing

mod html;
mod spread;

pub use html::{escape_html, fragment_html, page_html, spread_html};
pub use spread::{pair_into_spreads, Spread};
