use serde::{Deserialize, Serialize};

/// Elements of the page the recipe board talks to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UiElement {
    IngredientInput,
    DietSelect,
    Results,
    Loader,
    GenerateButton,
    HistoryList,
    ClearHistoryButton,
}

impl UiElement {
    pub const ALL: [UiElement; 7] = [
        UiElement::IngredientInput,
        UiElement::DietSelect,
        UiElement::Results,
        UiElement::Loader,
        UiElement::GenerateButton,
        UiElement::HistoryList,
        UiElement::ClearHistoryButton,
    ];

    /// DOM id of the element on the bundled page.
    pub fn dom_id(&self) -> &'static str {
        match self {
            UiElement::IngredientInput => "ingredients",
            UiElement::DietSelect => "diet",
            UiElement::Results => "results",
            UiElement::Loader => "loader",
            UiElement::GenerateButton => "generateBtn",
            UiElement::HistoryList => "historyList",
            UiElement::ClearHistoryButton => "clearHistory",
        }
    }
}

/// Transient on-screen message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Toast {
    pub message: String,
    /// Delay before the fade-out starts.
    pub fade_after_ms: u64,
    /// Delay before the toast is removed.
    pub dismiss_after_ms: u64,
}

/// A text-to-speech request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

/// One instruction for the page. Hosts apply these in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ViewCommand {
    SetLoading { visible: bool },
    SetResults { html: String },
    SetHistory { html: String },
    SetInputs { query: String, diet: String },
    Notify { toast: Toast },
    Navigate { path: String, delay_ms: u64 },
    OpenUrl { url: String },
    CancelSpeech,
    Speak { utterance: Utterance },
}
