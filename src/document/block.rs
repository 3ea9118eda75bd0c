//! Content blocks: the units the flow engine consumes

use crate::document::Recipe;
use smallvec::SmallVec;

/// The three recipe sections, in their fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Ingredients,
    Instructions,
    Notes,
}

impl SectionKind {
    /// Display order: ingredients, then instructions, then notes.
    pub const ALL: [SectionKind; 3] = [
        SectionKind::Ingredients,
        SectionKind::Instructions,
        SectionKind::Notes,
    ];

    /// Section heading text
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Ingredients => "Ingredients",
            SectionKind::Instructions => "Instructions",
            SectionKind::Notes => "Notes",
        }
    }

    /// Instructions is the only ordered section
    pub fn ordered(&self) -> bool {
        matches!(self, SectionKind::Instructions)
    }

    /// CSS class carried on the list container
    pub fn css_class(&self) -> &'static str {
        match self {
            SectionKind::Ingredients => "ingredients",
            SectionKind::Instructions => "instructions",
            SectionKind::Notes => "notes",
        }
    }
}

/// Atomic unit of content fed to the flow engine.
///
/// Blocks are produced once per document and never mutated; the engine
/// only reads them.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    /// Document or section heading
    Heading { text: String, level: u8 },
    /// Free paragraph (description sentences)
    Paragraph { text: String },
    /// Beginning of a section's list
    SectionStart { section: SectionKind, ordered: bool },
    /// One list entry; `ordinal` is set only for ordered sections
    ListItem {
        section: SectionKind,
        text: String,
        ordinal: Option<u32>,
    },
    /// End of a section's list
    SectionEnd { section: SectionKind },
}

/// Options for block production.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Split instruction and note text into one item per sentence
    /// instead of one item per source string.
    pub split_long_items_into_sentences: bool,
}

/// Normalize a recipe into an ordered block sequence.
///
/// The title heading always comes first; the description (if any)
/// becomes one paragraph per sentence so long descriptions can break at
/// sentence granularity. Empty sections are omitted entirely.
pub fn build_blocks(recipe: &Recipe, opts: &BuildOptions) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();

    blocks.push(ContentBlock::Heading {
        text: recipe.title.clone(),
        level: 2,
    });

    if let Some(description) = &recipe.description {
        for sentence in split_sentences(description) {
            blocks.push(ContentBlock::Paragraph {
                text: sentence.to_string(),
            });
        }
    }

    for section in SectionKind::ALL {
        let items = section_items(recipe, section, opts);
        if items.is_empty() {
            continue;
        }

        let ordered = section.ordered();
        blocks.push(ContentBlock::SectionStart { section, ordered });

        let mut next = 0u32;
        for text in items {
            let ordinal = if ordered {
                next += 1;
                Some(next)
            } else {
                None
            };
            blocks.push(ContentBlock::ListItem {
                section,
                text,
                ordinal,
            });
        }

        blocks.push(ContentBlock::SectionEnd { section });
    }

    blocks
}

/// Collect a section's entries as display strings.
fn section_items(recipe: &Recipe, section: SectionKind, opts: &BuildOptions) -> Vec<String> {
    match section {
        SectionKind::Ingredients => recipe.ingredients.iter().map(|i| i.display()).collect(),
        SectionKind::Instructions => list_items(&recipe.instructions, opts),
        SectionKind::Notes => list_items(&recipe.notes, opts),
    }
}

fn list_items(entries: &[String], opts: &BuildOptions) -> Vec<String> {
    if !opts.split_long_items_into_sentences {
        return entries.to_vec();
    }

    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let sentences = split_sentences(entry);
        if sentences.is_empty() {
            // A malformed (empty) entry still occupies one slot
            items.push(String::new());
        } else {
            items.extend(sentences.iter().map(|s| s.to_string()));
        }
    }
    items
}

/// Split text into sentences: runs ending in `.`, `!` or `?` (terminator
/// runs stay attached), plus a trailing remainder with no terminator.
/// Whitespace-only segments are dropped.
pub fn split_sentences(text: &str) -> SmallVec<[&str; 4]> {
    let mut sentences = SmallVec::new();
    let mut start = 0;
    let mut in_terminator = false;

    for (idx, ch) in text.char_indices() {
        let is_terminator = matches!(ch, '.' | '!' | '?');
        if in_terminator && !is_terminator {
            let segment = text[start..idx].trim();
            if !segment.is_empty() {
                sentences.push(segment);
            }
            start = idx;
        }
        in_terminator = is_terminator;
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Ingredient;

    fn recipe(title: &str) -> Recipe {
        Recipe {
            title: title.to_string(),
            ..Recipe::default()
        }
    }

    #[test]
    fn test_section_order_fixed() {
        let mut r = recipe("Stew");
        r.notes = vec!["rest it".to_string()];
        r.instructions = vec!["simmer".to_string()];
        r.ingredients = vec![Ingredient::Text("beef".to_string())];

        let blocks = build_blocks(&r, &BuildOptions::default());
        let sections: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::SectionStart { section, .. } => Some(*section),
                _ => None,
            })
            .collect();
        assert_eq!(
            sections,
            vec![
                SectionKind::Ingredients,
                SectionKind::Instructions,
                SectionKind::Notes
            ]
        );
    }

    #[test]
    fn test_title_heading_always_first() {
        let blocks = build_blocks(&recipe(""), &BuildOptions::default());
        assert_eq!(
            blocks[0],
            ContentBlock::Heading {
                text: String::new(),
                level: 2
            }
        );
        // Empty sections are omitted entirely
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_description_splits_into_sentences() {
        let mut r = recipe("Tea");
        r.description = Some("Boil water. Steep leaves! Enjoy".to_string());
        let blocks = build_blocks(&r, &BuildOptions::default());

        let paragraphs: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Paragraph { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(paragraphs, vec!["Boil water.", "Steep leaves!", "Enjoy"]);
    }

    #[test]
    fn test_ordinals_assigned_once() {
        let mut r = recipe("Tea");
        r.instructions = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        r.ingredients = vec![Ingredient::Text("water".to_string())];

        let blocks = build_blocks(&r, &BuildOptions::default());
        let ordinals: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ListItem { ordinal, .. } => Some(*ordinal),
                _ => None,
            })
            .collect();
        // Ingredient has no ordinal; instructions count 1..=3
        assert_eq!(ordinals, vec![None, Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_sentence_split_option_applies_to_instructions() {
        let mut r = recipe("Tea");
        r.instructions = vec!["Boil. Pour.".to_string()];
        let opts = BuildOptions {
            split_long_items_into_sentences: true,
        };

        let blocks = build_blocks(&r, &opts);
        let items: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ListItem { text, ordinal, .. } => Some((text.as_str(), *ordinal)),
                _ => None,
            })
            .collect();
        assert_eq!(items, vec![("Boil.", Some(1)), ("Pour.", Some(2))]);
    }

    #[test]
    fn test_ingredients_never_sentence_split() {
        let mut r = recipe("Tea");
        r.ingredients = vec![Ingredient::Text("sugar. or honey".to_string())];
        let opts = BuildOptions {
            split_long_items_into_sentences: true,
        };

        let blocks = build_blocks(&r, &opts);
        let items: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ListItem { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(items, vec!["sugar. or honey"]);
    }

    #[test]
    fn test_split_sentences() {
        assert_eq!(
            split_sentences("One. Two! Three? Four").as_slice(),
            ["One.", "Two!", "Three?", "Four"]
        );
        assert_eq!(
            split_sentences("Wait... what").as_slice(),
            ["Wait...", "what"]
        );
        assert_eq!(
            split_sentences("No terminator").as_slice(),
            ["No terminator"]
        );
        assert!(split_sentences("   ").is_empty());
        assert!(split_sentences("").is_empty());
    }
}
