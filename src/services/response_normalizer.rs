//! Response Normalizer for PantryChef.
//!
//! The generation endpoint has no fixed response shape. [`ResponseShape::classify`]
//! decodes a JSON payload against each known shape in order and
//! [`normalize`] turns the result into an ordered list of [`RecipeRecord`]s.

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::types::recipe::{is_truthy, RecipeRecord};

/// The shapes a generation response is known to take, in match priority.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// `[ ... ]`
    List(Vec<Value>),
    /// `{ "recipes": [ ... ] }`
    Recipes(Vec<Value>),
    /// `{ "results": [ ... ] }`
    Results(Vec<Value>),
    /// `{ "recipe": ..., ... }`, the whole object is one recipe.
    SingleRecipe(Value),
    /// An object whose property values are recipes, e.g. `{ "0": {...}, "1": {...} }`.
    Keyed(Vec<Value>),
    /// An object that matched nothing else; it is used as a single recipe.
    Fallback(Value),
    /// `null`, a boolean, a number or a string: nothing usable.
    Empty,
}

impl ResponseShape {
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Array(items) => ResponseShape::List(items),
            Value::Object(mut map) => {
                if matches!(map.get("recipes"), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = map.remove("recipes") {
                        return ResponseShape::Recipes(items);
                    }
                }
                if matches!(map.get("results"), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = map.remove("results") {
                        return ResponseShape::Results(items);
                    }
                }
                if map.get("recipe").map(is_truthy).unwrap_or(false) {
                    return ResponseShape::SingleRecipe(Value::Object(map));
                }
                let keyed = record_like_values(&map);
                if keyed.is_empty() {
                    ResponseShape::Fallback(Value::Object(map))
                } else {
                    ResponseShape::Keyed(keyed)
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => ResponseShape::Empty,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResponseShape::List(_) => "list",
            ResponseShape::Recipes(_) => "recipes",
            ResponseShape::Results(_) => "results",
            ResponseShape::SingleRecipe(_) => "single_recipe",
            ResponseShape::Keyed(_) => "keyed",
            ResponseShape::Fallback(_) => "fallback",
            ResponseShape::Empty => "empty",
        }
    }

    /// Flattens the shape into record values, preserving order.
    pub fn into_values(self) -> Vec<Value> {
        match self {
            ResponseShape::List(items)
            | ResponseShape::Recipes(items)
            | ResponseShape::Results(items)
            | ResponseShape::Keyed(items) => items,
            ResponseShape::SingleRecipe(value) | ResponseShape::Fallback(value) => vec![value],
            ResponseShape::Empty => Vec::new(),
        }
    }
}

/// A property value counts as a recipe when it is truthy and carries a
/// truthy `title`, `recipes` or `link`.
fn is_record_like(value: &Value) -> bool {
    if !is_truthy(value) {
        return false;
    }
    ["title", "recipes", "link"]
        .iter()
        .any(|field| value.get(field).map(is_truthy).unwrap_or(false))
}

fn record_like_values(map: &Map<String, Value>) -> Vec<Value> {
    map.values().filter(|v| is_record_like(v)).cloned().collect()
}

/// Converts a generation response into recipe records.
pub fn normalize(value: Value) -> Vec<RecipeRecord> {
    let shape = ResponseShape::classify(value);
    match &shape {
        ResponseShape::Fallback(_) => warn!("response matched no known shape, using it as one recipe"),
        ResponseShape::Empty => warn!("response carries no recipes"),
        other => debug!("response shape: {}", other.name()),
    }
    shape.into_values().into_iter().map(RecipeRecord::from).collect()
}
