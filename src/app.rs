//! App Core for PantryChef.
//!
//! Central struct holding the local storage database, settings and the recipe
//! board, plus what the host page declared about itself.

use std::sync::Arc;

use log::warn;

use crate::database::connection::Database;
use crate::services::recipe_api::HttpRecipeApi;
use crate::services::recipe_board::RecipeBoard;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::view_surface::ViewCommands;
use crate::types::view::UiElement;

/// Central application struct.
pub struct App {
    pub db: Arc<Database>,
    pub settings_engine: SettingsEngine,
    pub board: RecipeBoard<HttpRecipeApi, Database>,
    page_elements: Vec<UiElement>,
    speech_supported: bool,
}

impl App {
    /// Opens the database at `db_path`, loads settings (from `settings_path`
    /// or the platform config dir) and builds the recipe board.
    ///
    /// Unreadable settings fall back to defaults.
    pub fn new(db_path: &str, settings_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Arc::new(Database::open(db_path)?);

        let mut settings_engine = SettingsEngine::new(settings_path);
        if let Err(e) = settings_engine.load() {
            warn!("settings could not be loaded, using defaults: {}", e);
        }
        settings_engine.apply_env_overrides();

        let settings = settings_engine.get_settings().clone();
        let api = HttpRecipeApi::new(&settings.server)?;
        let board = RecipeBoard::new(api, db.clone(), &settings);

        Ok(Self {
            db,
            settings_engine,
            board,
            page_elements: UiElement::ALL.to_vec(),
            speech_supported: true,
        })
    }

    /// Records which elements the host page has and whether it can speak.
    pub fn set_page(&mut self, elements: Vec<UiElement>, speech_supported: bool) {
        self.page_elements = elements;
        self.speech_supported = speech_supported;
    }

    /// A fresh command buffer for the host page.
    pub fn view(&self) -> ViewCommands {
        ViewCommands::new(self.page_elements.iter().copied(), self.speech_supported)
    }

    /// Rebuilds the server client after a settings change.
    pub fn reconfigure(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let settings = self.settings_engine.get_settings().clone();
        let api = HttpRecipeApi::new(&settings.server)?;
        self.board.reconfigure(api, &settings);
        Ok(())
    }
}
