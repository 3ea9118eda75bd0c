//! HTML realization of pages and spreads

use crate::layout::{Fragment, Page};
use crate::render::Spread;

/// Escape `& < > " '` for safe interpolation into markup.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render one fragment to HTML.
pub fn fragment_html(fragment: &Fragment) -> String {
    match fragment {
        Fragment::Heading { text, level: 2 } => {
            let text = if text.trim().is_empty() { "Untitled" } else { text };
            format!("<h2 class=\"recipe-title\">{}</h2>", escape_html(text))
        }
        Fragment::Heading { text, level: 3 } => {
            format!("<h3 class=\"section-title\">{}</h3>", escape_html(text))
        }
        Fragment::Heading { text, level } => {
            format!("<h{level}>{}</h{level}>", escape_html(text))
        }
        Fragment::Paragraph { text } => format!("<p>{}</p>", escape_html(text)),
        Fragment::ListOpen {
            section,
            ordered,
            start,
        } => {
            if *ordered {
                format!("<ol class=\"{}\" start=\"{start}\">", section.css_class())
            } else {
                format!("<ul class=\"{}\">", section.css_class())
            }
        }
        Fragment::Item {
            text,
            ordinal,
            continued,
        } => {
            let mut attrs = String::new();
            if *continued {
                attrs.push_str(" class=\"continued\"");
                // Repeat the number explicitly on continuation fragments
                if let Some(ordinal) = ordinal {
                    attrs.push_str(&format!(" value=\"{ordinal}\""));
                }
            }
            format!("<li{attrs}>{}</li>", escape_html(text))
        }
        Fragment::ListClose { ordered } => {
            if *ordered {
                "</ol>".to_string()
            } else {
                "</ul>".to_string()
            }
        }
    }
}

/// Render a page's fragments, in order.
pub fn page_html(page: &Page) -> String {
    page.fragments.iter().map(fragment_html).collect()
}

/// Render a spread as a left/right page pair.
///
/// A blank right page renders as an empty page div, matching the
/// original viewer.
pub fn spread_html(spread: &Spread) -> String {
    let left = page_html(&spread.left);
    let right = spread.right.as_ref().map(page_html).unwrap_or_default();
    format!(
        "<div class=\"page-spread\">\
         <div class=\"page left-page\">{left}</div>\
         <div class=\"page right-page\">{right}</div>\
         </div>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SectionKind;

    fn heading(text: &str, level: u8) -> Fragment {
        Fragment::Heading {
            text: text.to_string(),
            level,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"fish" & 'chips'</b>"#),
            "&lt;b&gt;&quot;fish&quot; &amp; &#39;chips&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_title_heading() {
        assert_eq!(
            fragment_html(&heading("Tea", 2)),
            "<h2 class=\"recipe-title\">Tea</h2>"
        );
        // Empty titles fall back to the original viewer's placeholder
        assert_eq!(
            fragment_html(&heading("", 2)),
            "<h2 class=\"recipe-title\">Untitled</h2>"
        );
    }

    #[test]
    fn test_section_heading() {
        assert_eq!(
            fragment_html(&heading("Ingredients", 3)),
            "<h3 class=\"section-title\">Ingredients</h3>"
        );
    }

    #[test]
    fn test_list_containers() {
        let open = Fragment::ListOpen {
            section: SectionKind::Instructions,
            ordered: true,
            start: 6,
        };
        assert_eq!(
            fragment_html(&open),
            "<ol class=\"instructions\" start=\"6\">"
        );

        let open = Fragment::ListOpen {
            section: SectionKind::Ingredients,
            ordered: false,
            start: 1,
        };
        assert_eq!(fragment_html(&open), "<ul class=\"ingredients\">");

        assert_eq!(fragment_html(&Fragment::ListClose { ordered: true }), "</ol>");
        assert_eq!(fragment_html(&Fragment::ListClose { ordered: false }), "</ul>");
    }

    #[test]
    fn test_items_and_continuations() {
        let item = Fragment::Item {
            text: "Boil & stir".to_string(),
            ordinal: Some(2),
            continued: false,
        };
        assert_eq!(fragment_html(&item), "<li>Boil &amp; stir</li>");

        let continued = Fragment::Item {
            text: "keep going".to_string(),
            ordinal: Some(2),
            continued: true,
        };
        assert_eq!(
            fragment_html(&continued),
            "<li class=\"continued\" value=\"2\">keep going</li>"
        );

        let continued_unordered = Fragment::Item {
            text: "still going".to_string(),
            ordinal: None,
            continued: true,
        };
        assert_eq!(
            fragment_html(&continued_unordered),
            "<li class=\"continued\">still going</li>"
        );
    }

    #[test]
    fn test_spread_html_blank_right() {
        let spread = Spread {
            left: Page {
                index: 0,
                fragments: vec![heading("Tea", 2)],
            },
            right: None,
        };
        assert_eq!(
            spread_html(&spread),
            "<div class=\"page-spread\">\
             <div class=\"page left-page\"><h2 class=\"recipe-title\">Tea</h2></div>\
             <div class=\"page right-page\"></div>\
             </div>"
        );
    }
}
