// PantryChef Settings Engine
// Client settings live in one JSON file. Values change one dot-key at a time
// and every change is checked and written through before it takes effect.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde_json::Value;

use crate::platform;
use crate::services::recipe_api::endpoint;
use crate::types::errors::SettingsError;
use crate::types::settings::ChefSettings;

/// Environment variable that overrides `server.base_url` after loading.
pub const SERVER_URL_ENV: &str = "PANTRYCHEF_SERVER_URL";

const SETTINGS_FILE: &str = "settings.json";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ChefSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &ChefSettings;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// JSON-file backed settings.
pub struct SettingsEngine {
    config_path: String,
    settings: ChefSettings,
    /// The file's `server.base_url` while the environment override shadows it.
    shadowed_base_url: Option<String>,
}

impl SettingsEngine {
    /// Uses `path_override` when given, else `settings.json` in the platform config dir.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join(SETTINGS_FILE)
                .to_string_lossy()
                .to_string()
        });
        Self {
            config_path,
            settings: ChefSettings::default(),
            shadowed_base_url: None,
        }
    }

    /// Applies `PANTRYCHEF_SERVER_URL` on top of the loaded settings, if set.
    ///
    /// The override lives in memory only: saves keep writing the file's own
    /// base URL until `server.base_url` is set explicitly. An override the
    /// client could not be built from is logged and ignored.
    pub fn apply_env_overrides(&mut self) {
        let Ok(url) = std::env::var(SERVER_URL_ENV) else {
            return;
        };
        let url = url.trim();
        if url.is_empty() {
            return;
        }

        let mut candidate = self.settings.clone();
        candidate.server.base_url = url.to_string();
        if let Err(e) = validate(&candidate) {
            warn!("ignoring {}={}: {}", SERVER_URL_ENV, url, e);
            return;
        }

        debug!("server url overridden from {}: {}", SERVER_URL_ENV, url);
        let file_url = std::mem::replace(&mut self.settings.server.base_url, url.to_string());
        self.shadowed_base_url.get_or_insert(file_url);
    }

    /// The document as it belongs on disk: `settings` minus any environment override.
    fn on_disk(&self, settings: &ChefSettings) -> ChefSettings {
        let mut document = settings.clone();
        if let Some(url) = &self.shadowed_base_url {
            document.server.base_url = url.clone();
        }
        document
    }

    /// Writes `document` to a sibling temp file, then renames it over the config file.
    fn write_settings(&self, document: &ChefSettings) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SettingsError::IoError(format!("Failed to create {}: {}", parent.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;

        let mut staging = PathBuf::from(&self.config_path);
        staging.set_extension("json.tmp");
        fs::write(&staging, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write {}: {}", staging.display(), e)))?;
        fs::rename(&staging, path)
            .map_err(|e| SettingsError::IoError(format!("Failed to replace {}: {}", self.config_path, e)))?;
        Ok(())
    }
}

/// `"server.base_url"` → `"/server/base_url"`.
fn json_pointer(key: &str) -> String {
    key.split('.').fold(String::new(), |mut pointer, part| {
        pointer.push('/');
        pointer.push_str(&part.replace('~', "~0").replace('/', "~1"));
        pointer
    })
}

/// Rejects settings the recipe client could not be built from.
fn validate(settings: &ChefSettings) -> Result<(), SettingsError> {
    let server = &settings.server;
    for path in [&server.generate_path, &server.favorite_path, &server.login_path] {
        endpoint(&server.base_url, path)
            .map_err(|e| SettingsError::InvalidValue(e.to_string()))?;
    }
    if settings.speech.rate <= 0.0 || settings.speech.pitch < 0.0 {
        return Err(SettingsError::InvalidValue(
            "speech rate must be positive and pitch non-negative".to_string(),
        ));
    }
    Ok(())
}

impl SettingsEngineTrait for SettingsEngine {
    /// Reads the config file; a missing file yields defaults.
    fn load(&mut self) -> Result<ChefSettings, SettingsError> {
        let path = Path::new(&self.config_path);
        self.settings = if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| SettingsError::IoError(format!("Failed to read {}: {}", self.config_path, e)))?;
            serde_json::from_str(&content).map_err(|e| {
                SettingsError::SerializationError(format!("Failed to parse {}: {}", self.config_path, e))
            })?
        } else {
            debug!("no settings at {}, using defaults", self.config_path);
            ChefSettings::default()
        };
        self.shadowed_base_url = None;
        Ok(self.settings.clone())
    }

    fn save(&self) -> Result<(), SettingsError> {
        self.write_settings(&self.on_disk(&self.settings))
    }

    fn get_settings(&self) -> &ChefSettings {
        &self.settings
    }

    /// Replaces one value by dot-notation key, e.g. `"server.base_url"` or `"speech.rate"`.
    ///
    /// The key must already exist. The result is type-checked against
    /// `ChefSettings`, validated and written to disk before it is kept; on any
    /// error the current settings are left untouched.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut tree = serde_json::to_value(&self.settings)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
        let slot = tree
            .pointer_mut(&json_pointer(key))
            .ok_or_else(|| SettingsError::InvalidKey(key.to_string()))?;
        *slot = value;

        let updated: ChefSettings = serde_json::from_value(tree)
            .map_err(|e| SettingsError::InvalidValue(format!("{}: {}", key, e)))?;
        validate(&updated)?;

        let explicit_url = key == "server.base_url";
        let document = if explicit_url {
            updated.clone()
        } else {
            self.on_disk(&updated)
        };
        self.write_settings(&document)?;

        self.settings = updated;
        if explicit_url {
            self.shadowed_base_url = None;
        }
        info!("setting {} updated", key);
        Ok(())
    }

    /// Restores factory defaults and saves them. Drops any environment override.
    fn reset(&mut self) -> Result<(), SettingsError> {
        let defaults = ChefSettings::default();
        self.write_settings(&defaults)?;
        self.settings = defaults;
        self.shadowed_base_url = None;
        Ok(())
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
