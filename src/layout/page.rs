//! Page model: fragments, pages, and the page-size configuration

use crate::document::SectionKind;
use crate::error::{Error, Result};

/// Render-ready unit assigned to a page.
///
/// List containers are explicit open/close fragments so a page's
/// fragment sequence is always well-formed on its own: every `ListOpen`
/// has a matching `ListClose` on the same page and no `Item` appears
/// outside an open list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Fragment {
    /// Document (level 2) or section (level 3) heading
    Heading { text: String, level: u8 },
    /// Free paragraph
    Paragraph { text: String },
    /// Opens a section's list container; `start` is the first ordinal
    /// rendered when the list is ordered
    ListOpen {
        section: SectionKind,
        ordered: bool,
        start: u32,
    },
    /// One list entry; continuation fragments of an oversized item keep
    /// the same ordinal and set `continued`
    Item {
        text: String,
        ordinal: Option<u32>,
        continued: bool,
    },
    /// Closes the open list container
    ListClose { ordered: bool },
}

impl Fragment {
    /// True for list entries
    pub fn is_item(&self) -> bool {
        matches!(self, Fragment::Item { .. })
    }
}

/// One page of flowed content.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Page index (0-based)
    pub index: usize,
    /// Fragments in render order
    pub fragments: Vec<Fragment>,
}

impl Page {
    /// Iterate the text of the list items on this page
    pub fn item_texts(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().filter_map(|f| match f {
            Fragment::Item { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Page-size configuration for one pagination run.
///
/// Typography lives in the measurement backend; this only fixes the
/// geometry. `padding_vertical` is per edge, so the usable height is
/// `page_height - 2 * padding_vertical`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageConfig {
    pub page_height: f32,
    pub padding_vertical: f32,
    pub content_width: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            page_height: 600.0,
            padding_vertical: 20.0,
            content_width: 418.0,
        }
    }
}

impl PageConfig {
    /// Validate and build a configuration.
    pub fn new(page_height: f32, padding_vertical: f32, content_width: f32) -> Result<Self> {
        let config = Self {
            page_height,
            padding_vertical,
            content_width,
        };
        config.validate()?;
        Ok(config)
    }

    /// Usable content height per page
    pub fn usable_height(&self) -> f32 {
        self.page_height - 2.0 * self.padding_vertical
    }

    /// Check the configuration can produce a usable page area.
    pub fn validate(&self) -> Result<()> {
        let dims = [
            ("page_height", self.page_height),
            ("padding_vertical", self.padding_vertical),
            ("content_width", self.content_width),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!("{name} must be finite and non-negative")));
            }
        }
        if self.usable_height() <= 0.0 {
            return Err(Error::Config(
                "padding leaves no usable page height".to_string(),
            ));
        }
        if self.content_width <= 0.0 {
            return Err(Error::Config("content_width must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_height() {
        let config = PageConfig::default();
        assert_eq!(config.usable_height(), 560.0); // 600 - 2*20
    }

    #[test]
    fn test_rejects_degenerate_dimensions() {
        assert!(PageConfig::new(0.0, 0.0, 100.0).is_err());
        assert!(PageConfig::new(100.0, 50.0, 100.0).is_err());
        assert!(PageConfig::new(f32::NAN, 0.0, 100.0).is_err());
        assert!(PageConfig::new(600.0, 20.0, 0.0).is_err());
        assert!(PageConfig::new(600.0, 20.0, 450.0).is_ok());
    }

    #[test]
    fn test_item_texts() {
        let page = Page {
            index: 0,
            fragments: vec![
                Fragment::Heading {
                    text: "Ingredients".to_string(),
                    level: 3,
                },
                Fragment::ListOpen {
                    section: SectionKind::Ingredients,
                    ordered: false,
                    start: 1,
                },
                Fragment::Item {
                    text: "water".to_string(),
                    ordinal: None,
                    continued: false,
                },
                Fragment::ListClose { ordered: false },
            ],
        };
        assert_eq!(page.item_texts().collect::<Vec<_>>(), vec!["water"]);
    }
}
