use serde::{Deserialize, Serialize};

use super::recipe::RecipeRecord;

/// One past pantry query and the recipes it produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// Creation time in milliseconds since the UNIX epoch.
    pub id: i64,
    pub query: String,
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default)]
    pub results: Vec<RecipeRecord>,
}

impl HistoryEntry {
    /// Label shown in the history list: `query` or `query • diet`.
    pub fn label(&self) -> String {
        match self.diet.as_deref() {
            Some(diet) if !diet.is_empty() => format!("{} • {}", self.query, diet),
            _ => self.query.clone(),
        }
    }
}
