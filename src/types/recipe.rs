use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single recipe as returned by the generation endpoint.
///
/// Records are built from arbitrary JSON: an object contributes its `title`,
/// its `instructions` (or `summary`) and its `link`; a bare string becomes the
/// title. Deserialization never fails, so stored history written by older
/// clients always loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "Value")]
pub struct RecipeRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl RecipeRecord {
    pub fn new(title: &str, instructions: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            instructions: Some(instructions.to_string()),
            link: None,
        }
    }

    pub fn with_link(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }
}

impl From<Value> for RecipeRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) if !s.is_empty() => Self {
                title: Some(s),
                ..Self::default()
            },
            Value::Object(map) => Self {
                title: map.get("title").and_then(text_of),
                instructions: map
                    .get("instructions")
                    .and_then(text_of)
                    .or_else(|| map.get("summary").and_then(text_of)),
                link: map.get("link").and_then(text_of),
            },
            _ => Self::default(),
        }
    }
}

/// Returns the text form of a truthy string or number, `None` otherwise.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if is_truthy(value) => Some(n.to_string()),
        _ => None,
    }
}

/// Loose truthiness: `null`, `false`, numeric zero and `""` are falsy.
/// Arrays and objects are always truthy, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Body of `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateRequest {
    pub pantry: String,
    pub diet: String,
}

/// Body of `POST /favorite`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteRequest {
    pub title: String,
    pub link: String,
    pub image: String,
}

/// Form body of `POST /login`. The password never appears in `Debug` output.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    /// True when either field is blank; the server refuses those without checking.
    pub fn is_incomplete(&self) -> bool {
        self.username.trim().is_empty() || self.password.is_empty()
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Raw HTTP reply from the recipe server, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True when the content type mentions JSON (`application/json`, `application/ld+json`, ...).
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("json"))
            .unwrap_or(false)
    }
}

/// What a generate attempt ended in.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerateOutcome {
    /// Required inputs or the results container are missing.
    MissingElements,
    /// Pantry text was empty after trimming.
    EmptyQuery,
    /// Non-success HTTP status.
    ServerError { status: u16 },
    /// Server answered with a login page instead of JSON.
    SessionExpired,
    /// Success status but a body that could not be used.
    UnexpectedResponse,
    /// The server returned no recipes.
    NoRecipes,
    /// Cards rendered; `rendered` is at most the card limit.
    Rendered { total: usize, rendered: usize },
    /// Transport failure.
    NetworkError,
}

/// Current values of the query inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GenerateForm {
    #[serde(default)]
    pub pantry: String,
    #[serde(default)]
    pub diet: String,
}

impl GenerateForm {
    pub fn new(pantry: &str, diet: &str) -> Self {
        Self {
            pantry: pantry.to_string(),
            diet: diet.to_string(),
        }
    }
}
