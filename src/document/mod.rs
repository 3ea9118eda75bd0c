//! Recipe document model

mod block;
mod ingredient;

pub use block::{build_blocks, split_sentences, BuildOptions, ContentBlock, SectionKind};
pub use ingredient::{Ingredient, StructuredIngredient};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A recipe record, the engine's sole input document.
///
/// Deserialization is lenient: missing or malformed fields collapse to
/// empty values rather than failing, so a partially broken record still
/// paginates (the MalformedInput policy). The record is never mutated
/// during pagination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    #[serde(alias = "name", deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_ingredients")]
    pub ingredients: Vec<Ingredient>,
    #[serde(deserialize_with = "lenient_strings")]
    pub instructions: Vec<String>,
    #[serde(alias = "extra_notes", deserialize_with = "lenient_strings")]
    pub notes: Vec<String>,
}

impl Recipe {
    /// Parse a single recipe record from JSON.
    ///
    /// A null or non-object document normalizes to an empty record;
    /// only malformed JSON itself is an error.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(match value {
            Value::Object(_) => serde_json::from_value(value)?,
            _ => Self::default(),
        })
    }

    /// True if no section has any entries and there is no description.
    pub fn is_empty(&self) -> bool {
        self.description.as_deref().map_or(true, |d| d.trim().is_empty())
            && self.ingredients.is_empty()
            && self.instructions.is_empty()
            && self.notes.is_empty()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_string(value))
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        // Non-string entries coerce to empty strings but keep their slot
        Value::Array(items) => items
            .into_iter()
            .map(|v| match v {
                Value::String(s) => s,
                _ => String::new(),
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_ingredients<'de, D>(deserializer: D) -> Result<Vec<Ingredient>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.into_iter().map(Ingredient::from_value).collect(),
        _ => Vec::new(),
    })
}

fn coerce_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_record() {
        let recipe = Recipe::from_json(
            r#"{
                "title": "Tea",
                "description": "Hot leaf juice.",
                "ingredients": ["water", {"qty": "1", "unit": "tsp", "name": "leaves"}],
                "instructions": ["Boil water", "Steep"],
                "notes": ["Serve hot"]
            }"#,
        )
        .unwrap();

        assert_eq!(recipe.title, "Tea");
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[1].display(), "1 tsp leaves");
        assert_eq!(recipe.instructions, vec!["Boil water", "Steep"]);
        assert_eq!(recipe.notes, vec!["Serve hot"]);
    }

    #[test]
    fn test_legacy_field_names() {
        let recipe = Recipe::from_json(
            r#"{"name": "Stew", "extra_notes": ["freezes well"]}"#,
        )
        .unwrap();
        assert_eq!(recipe.title, "Stew");
        assert_eq!(recipe.notes, vec!["freezes well"]);
    }

    #[test]
    fn test_missing_fields_default_empty() {
        let recipe = Recipe::from_json("{}").unwrap();
        assert_eq!(recipe.title, "");
        assert!(recipe.description.is_none());
        assert!(recipe.is_empty());
    }

    #[test]
    fn test_non_array_sections_become_empty() {
        let recipe = Recipe::from_json(
            r#"{"title": "Odd", "ingredients": "flour", "instructions": 5, "notes": null}"#,
        )
        .unwrap();
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.instructions.is_empty());
        assert!(recipe.notes.is_empty());
    }

    #[test]
    fn test_non_string_items_coerce_to_empty() {
        let recipe = Recipe::from_json(
            r#"{"title": "Odd", "instructions": ["ok", null, 7]}"#,
        )
        .unwrap();
        // Slots are preserved so item counts stay checkable
        assert_eq!(recipe.instructions, vec!["ok", "", ""]);
    }

    #[test]
    fn test_null_title_coerces_to_empty() {
        let recipe = Recipe::from_json(r#"{"title": null}"#).unwrap();
        assert_eq!(recipe.title, "");
    }

    #[test]
    fn test_null_document_normalizes_to_empty() {
        let recipe = Recipe::from_json("null").unwrap();
        assert!(recipe.is_empty());
        assert_eq!(recipe.title, "");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Recipe::from_json("{not json").is_err());
    }
}
