//! Ingredient records and display normalization

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smallvec::SmallVec;

/// A single ingredient entry.
///
/// Source data mixes plain strings with structured records, and the
/// structured records themselves use several generations of key names.
/// Everything normalizes to one display string via [`Ingredient::display`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Ingredient {
    /// Plain display string
    Text(String),
    /// Structured record with optional quantity/unit/name
    Structured(StructuredIngredient),
}

/// Structured ingredient with legacy key synonyms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredIngredient {
    #[serde(
        default,
        alias = "qty",
        alias = "amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Value>,
    #[serde(
        default,
        alias = "ingredient",
        alias = "item",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Value>,
    /// Unrecognized keys, preserved for the JSON fallback
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Ingredient {
    /// Coerce an arbitrary JSON value into an ingredient.
    ///
    /// Strings and objects carry data; anything else becomes an empty
    /// entry that still occupies a list slot.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => Ingredient::Text(s),
            Value::Object(_) => match serde_json::from_value(value) {
                Ok(structured) => Ingredient::Structured(structured),
                Err(_) => Ingredient::Text(String::new()),
            },
            _ => Ingredient::Text(String::new()),
        }
    }

    /// Normalized display string.
    pub fn display(&self) -> String {
        match self {
            Ingredient::Text(s) => s.clone(),
            Ingredient::Structured(s) => s.display(),
        }
    }
}

impl StructuredIngredient {
    /// Join non-empty `[quantity, unit, name]` with single spaces.
    ///
    /// If all three are empty the record serializes back to JSON so the
    /// data does not silently vanish.
    pub fn display(&self) -> String {
        let quantity = field_text(&self.quantity);
        let unit = field_text(&self.unit);
        let name = field_text(&self.name);

        let parts: SmallVec<[&str; 3]> = [quantity.as_str(), unit.as_str(), name.as_str()]
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect();

        if parts.is_empty() {
            serde_json::to_string(self).unwrap_or_default()
        } else {
            parts.join(" ")
        }
    }
}

/// Render a field value as display text.
fn field_text(value: &Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
