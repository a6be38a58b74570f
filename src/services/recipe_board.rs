//! Recipe Board for PantryChef.
//!
//! Wires user actions to the recipe server, the response normalizer, the
//! renderers, recipe history and the page. Every operation writes to an
//! explicit [`ViewSurface`] and none of them is fatal: failures end in a
//! notification and the page stays interactive.

use std::sync::Arc;

use log::{debug, error, info, warn};
use serde_json::Value;

use crate::database::KeyValueStore;
use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::services::history_view::render_history;
use crate::services::notifier::Notifier;
use crate::services::recipe_api::RecipeApi;
use crate::services::response_normalizer::normalize;
use crate::services::result_renderer::{render_no_recipes, render_results, RecipeCard};
use crate::services::view_surface::ViewSurface;
use crate::types::errors::{ApiError, CardError, HistoryError};
use crate::types::recipe::{GenerateForm, GenerateOutcome, GenerateRequest, LoginRequest, RecipeRecord};
use crate::types::settings::{ChefSettings, SpeechSettings};
use crate::types::view::{UiElement, Utterance};

pub const MSG_MISSING_ELEMENTS: &str = "UI elements missing";
pub const MSG_EMPTY_QUERY: &str = "Please enter at least one ingredient.";
pub const MSG_SERVER_ERROR: &str = "Server error — check console";
pub const MSG_SESSION_EXPIRED: &str = "Session expired — redirecting to login";
pub const MSG_UNEXPECTED: &str = "Unexpected server response";
pub const MSG_NETWORK_ERROR: &str = "Network error. Check server.";
pub const MSG_SAVED: &str = "Saved to favorites ❤️";
pub const MSG_SAVE_FAILED: &str = "Save failed";
pub const MSG_TTS_UNSUPPORTED: &str = "TTS not supported";
pub const MSG_HISTORY_CLEARED: &str = "History cleared";
pub const MSG_LOGIN_INCOMPLETE: &str = "Please enter both username and password";
pub const MSG_SIGNED_IN: &str = "Signed in";
pub const MSG_LOGIN_FAILED: &str = "Login failed";

/// Local storage key holding the server session cookies.
pub const SESSION_KEY: &str = "pc_session_v1";

/// How much of a non-JSON body is logged.
const LOGGED_BODY_CHARS: usize = 300;

/// Board state: the server client, the storage handle and the cards on screen.
pub struct RecipeBoard<A: RecipeApi, S: KeyValueStore> {
    api: A,
    store: Arc<S>,
    notifier: Notifier,
    speech: SpeechSettings,
    login_path: String,
    login_redirect_delay_ms: u64,
    cards: Vec<RecipeCard>,
}

impl<A: RecipeApi, S: KeyValueStore> RecipeBoard<A, S> {
    /// Builds the board and hands any stored session back to `api`.
    pub fn new(api: A, store: Arc<S>, settings: &ChefSettings) -> Self {
        match store.get(SESSION_KEY) {
            Ok(Some(cookies)) => api.restore_session(&cookies),
            Ok(None) => {}
            Err(e) => debug!("no stored session: {}", e),
        }
        Self {
            api,
            store,
            notifier: Notifier::new(&settings.notifications),
            speech: settings.speech.clone(),
            login_path: settings.server.login_path.clone(),
            login_redirect_delay_ms: settings.notifications.login_redirect_delay_ms,
            cards: Vec::new(),
        }
    }

    /// Swaps the server client and picks up changed speech and redirect settings.
    /// Rendered cards are kept.
    pub fn reconfigure(&mut self, api: A, settings: &ChefSettings) {
        if let Some(cookies) = self.api.session() {
            api.restore_session(&cookies);
        }
        self.api = api;
        self.notifier = Notifier::new(&settings.notifications);
        self.speech = settings.speech.clone();
        self.login_path = settings.server.login_path.clone();
        self.login_redirect_delay_ms = settings.notifications.login_redirect_delay_ms;
    }

    /// Cards currently rendered, in display order.
    pub fn cards(&self) -> &[RecipeCard] {
        &self.cards
    }

    pub fn history(&self) -> HistoryManager<'_, S> {
        HistoryManager::new(self.store.as_ref())
    }

    fn notify<V: ViewSurface>(&self, view: &mut V, message: &str) {
        view.notify(self.notifier.toast(message));
    }

    /// Runs one generation: validate, request, classify, normalize, render, remember.
    ///
    /// Takes `&mut self`, so a board runs one generation at a time.
    pub async fn generate<V: ViewSurface>(
        &mut self,
        view: &mut V,
        form: &GenerateForm,
    ) -> GenerateOutcome {
        if !view.has_element(UiElement::IngredientInput) || !view.has_element(UiElement::Results) {
            self.notify(view, MSG_MISSING_ELEMENTS);
            return GenerateOutcome::MissingElements;
        }

        let pantry = form.pantry.trim();
        let diet = if view.has_element(UiElement::DietSelect) {
            form.diet.clone()
        } else {
            String::new()
        };

        if pantry.is_empty() {
            self.notify(view, MSG_EMPTY_QUERY);
            return GenerateOutcome::EmptyQuery;
        }

        self.cards.clear();
        view.set_results(String::new());
        view.set_loading(true);

        let request = GenerateRequest {
            pantry: pantry.to_string(),
            diet: diet.clone(),
        };
        let response = match self.api.generate(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Generate error: {}", e);
                view.set_loading(false);
                self.notify(view, MSG_NETWORK_ERROR);
                return GenerateOutcome::NetworkError;
            }
        };

        if !response.is_success() {
            error!("Non-OK response {} {}", response.status, response.body);
            view.set_loading(false);
            self.notify(view, MSG_SERVER_ERROR);
            return GenerateOutcome::ServerError {
                status: response.status,
            };
        }

        if !response.is_json() {
            let head: String = response.body.chars().take(LOGGED_BODY_CHARS).collect();
            warn!("Non-JSON response {}", head);
            view.set_loading(false);
            if response.body.to_lowercase().contains("login") {
                self.notify(view, MSG_SESSION_EXPIRED);
                view.navigate(&self.login_path, self.login_redirect_delay_ms);
                return GenerateOutcome::SessionExpired;
            }
            self.notify(view, MSG_UNEXPECTED);
            return GenerateOutcome::UnexpectedResponse;
        }

        let data: Value = match serde_json::from_str(&response.body) {
            Ok(data) => data,
            Err(e) => {
                warn!("JSON response could not be decoded: {}", e);
                view.set_loading(false);
                self.notify(view, MSG_UNEXPECTED);
                return GenerateOutcome::UnexpectedResponse;
            }
        };
        debug!("generate response {}", data);
        view.set_loading(false);

        let records = normalize(data);
        if records.is_empty() {
            view.set_results(render_no_recipes());
            return GenerateOutcome::NoRecipes;
        }

        let total = records.len();
        let rendered = self.show_results(view, &records);

        let diet_filter = Some(diet.as_str()).filter(|d| !d.is_empty());
        match self.history().append(pantry, diet_filter, records) {
            Ok(entry) => {
                debug!("history entry {} saved", entry.id);
                self.refresh_history(view);
            }
            Err(e) => warn!("history save failed: {}", e),
        }

        GenerateOutcome::Rendered { total, rendered }
    }

    /// Renders cards for `records` and makes them the target of card actions.
    /// Returns the number of cards shown.
    pub fn show_results<V: ViewSurface>(&mut self, view: &mut V, records: &[RecipeRecord]) -> usize {
        if !view.has_element(UiElement::Results) {
            return 0;
        }
        let rendered = render_results(records);
        view.set_results(rendered.html);
        self.cards = rendered.cards;
        self.cards.len()
    }

    /// Repaints the history list from storage.
    pub fn refresh_history<V: ViewSurface>(&self, view: &mut V) {
        if !view.has_element(UiElement::HistoryList) {
            return;
        }
        let entries = self.history().load();
        view.set_history(render_history(&entries));
    }

    /// Shows a past entry's results and puts its query back in the inputs.
    pub fn select_history<V: ViewSurface>(&mut self, view: &mut V, id: i64) -> Result<(), HistoryError> {
        let entry = self.history().find(id)?;
        self.show_results(view, &entry.results);
        view.set_inputs(&entry.query, entry.diet.as_deref().unwrap_or(""));
        Ok(())
    }

    pub fn clear_history<V: ViewSurface>(&mut self, view: &mut V) -> Result<(), HistoryError> {
        self.history().clear()?;
        self.refresh_history(view);
        self.notify(view, MSG_HISTORY_CLEARED);
        Ok(())
    }

    fn card(&self, index: usize) -> Result<RecipeCard, CardError> {
        self.cards
            .get(index)
            .cloned()
            .ok_or(CardError::NotFound(index))
    }

    /// Sends the card to the favorites endpoint. Failures are reported, never retried.
    pub async fn save_card<V: ViewSurface>(&self, view: &mut V, index: usize) -> Result<(), CardError> {
        let card = self.card(index)?;
        match self.api.save_favorite(&card.favorite_request()).await {
            Ok(()) => self.notify(view, MSG_SAVED),
            Err(e) => {
                error!("favorite save failed: {}", e);
                self.notify(view, MSG_SAVE_FAILED);
            }
        }
        Ok(())
    }

    /// Reads the card aloud, interrupting anything already being spoken.
    pub fn speak_card<V: ViewSurface>(&self, view: &mut V, index: usize) -> Result<(), CardError> {
        let card = self.card(index)?;
        if !view.speech_supported() {
            self.notify(view, MSG_TTS_UNSUPPORTED);
            return Ok(());
        }
        view.cancel_speech();
        view.speak(Utterance {
            text: card.speech_text(),
            lang: self.speech.lang.clone(),
            rate: self.speech.rate,
            pitch: self.speech.pitch,
        });
        Ok(())
    }

    /// Opens the card's link, or a web search for its title.
    pub fn open_card<V: ViewSurface>(&self, view: &mut V, index: usize) -> Result<(), CardError> {
        let card = self.card(index)?;
        view.open_url(&card.open_url());
        Ok(())
    }

    /// Opens a server session for later generate and favorite calls and
    /// stores it for the next start. Blank fields are refused locally.
    pub async fn login<V: ViewSurface>(&self, view: &mut V, credentials: &LoginRequest) -> Result<(), ApiError> {
        if credentials.is_incomplete() {
            self.notify(view, MSG_LOGIN_INCOMPLETE);
            return Err(ApiError::LoginRejected);
        }
        match self.api.login(credentials).await {
            Ok(()) => {
                info!("signed in as {}", credentials.username.trim());
                if let Some(cookies) = self.api.session() {
                    if let Err(e) = self.store.set(SESSION_KEY, &cookies) {
                        warn!("session not kept: {}", e);
                    }
                }
                self.notify(view, MSG_SIGNED_IN);
                Ok(())
            }
            Err(e) => {
                warn!("login failed: {}", e);
                self.notify(view, MSG_LOGIN_FAILED);
                Err(e)
            }
        }
    }
}
