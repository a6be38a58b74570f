use serde::{Deserialize, Serialize};

/// Top-level client settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChefSettings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub speech: SpeechSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

/// Where the recipe server lives and how to reach it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSettings {
    pub base_url: String,
    pub generate_path: String,
    pub favorite_path: String,
    pub login_path: String,
    /// Whole-request timeout. `None` waits for as long as the server takes.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            generate_path: "/generate".to_string(),
            favorite_path: "/favorite".to_string(),
            login_path: "/login".to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Voice parameters for reading recipes aloud.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeechSettings {
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            lang: "en-US".to_string(),
            rate: 1.0,
            pitch: 1.05,
        }
    }
}

/// Toast and redirect timings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationSettings {
    pub fade_after_ms: u64,
    pub dismiss_after_ms: u64,
    pub login_redirect_delay_ms: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            fade_after_ms: 1400,
            dismiss_after_ms: 2000,
            login_redirect_delay_ms: 800,
        }
    }
}
