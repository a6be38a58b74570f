//! The page as seen by the recipe board.
//!
//! [`ViewSurface`] is the explicit handle to the UI elements the board writes
//! to. [`ViewCommands`] implements it by recording [`ViewCommand`]s that a
//! host (the webview shell or an RPC client) replays against the real page.

use std::collections::HashSet;

use crate::types::view::{Toast, UiElement, Utterance, ViewCommand};

/// Operations the recipe board performs on the page.
pub trait ViewSurface {
    /// Whether the page has the given element.
    fn has_element(&self, element: UiElement) -> bool;
    /// Whether the host can speak text aloud.
    fn speech_supported(&self) -> bool;
    fn set_loading(&mut self, visible: bool);
    fn set_results(&mut self, html: String);
    fn set_history(&mut self, html: String);
    fn set_inputs(&mut self, query: &str, diet: &str);
    fn notify(&mut self, toast: Toast);
    fn navigate(&mut self, path: &str, delay_ms: u64);
    fn open_url(&mut self, url: &str);
    fn cancel_speech(&mut self);
    fn speak(&mut self, utterance: Utterance);
}

/// A [`ViewSurface`] that records commands in order.
///
/// Commands aimed at an element the page lacks are dropped.
#[derive(Debug, Clone)]
pub struct ViewCommands {
    elements: HashSet<UiElement>,
    speech: bool,
    commands: Vec<ViewCommand>,
}

impl ViewCommands {
    /// A page with the given elements.
    pub fn new(elements: impl IntoIterator<Item = UiElement>, speech: bool) -> Self {
        Self {
            elements: elements.into_iter().collect(),
            speech,
            commands: Vec::new(),
        }
    }

    /// A page with every element and speech support.
    pub fn full_page() -> Self {
        Self::new(UiElement::ALL, true)
    }

    pub fn commands(&self) -> &[ViewCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<ViewCommand> {
        self.commands
    }

    /// Messages of every toast recorded so far.
    pub fn notifications(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                ViewCommand::Notify { toast } => Some(toast.message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// HTML of the most recent results update.
    pub fn last_results(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            ViewCommand::SetResults { html } => Some(html.as_str()),
            _ => None,
        })
    }

    /// HTML of the most recent history update.
    pub fn last_history(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            ViewCommand::SetHistory { html } => Some(html.as_str()),
            _ => None,
        })
    }

    fn push_if(&mut self, element: UiElement, command: ViewCommand) {
        if self.elements.contains(&element) {
            self.commands.push(command);
        }
    }
}

impl ViewSurface for ViewCommands {
    fn has_element(&self, element: UiElement) -> bool {
        self.elements.contains(&element)
    }

    fn speech_supported(&self) -> bool {
        self.speech
    }

    fn set_loading(&mut self, visible: bool) {
        self.push_if(UiElement::Loader, ViewCommand::SetLoading { visible });
    }

    fn set_results(&mut self, html: String) {
        self.push_if(UiElement::Results, ViewCommand::SetResults { html });
    }

    fn set_history(&mut self, html: String) {
        self.push_if(UiElement::HistoryList, ViewCommand::SetHistory { html });
    }

    fn set_inputs(&mut self, query: &str, diet: &str) {
        self.commands.push(ViewCommand::SetInputs {
            query: query.to_string(),
            diet: diet.to_string(),
        });
    }

    fn notify(&mut self, toast: Toast) {
        self.commands.push(ViewCommand::Notify { toast });
    }

    fn navigate(&mut self, path: &str, delay_ms: u64) {
        self.commands.push(ViewCommand::Navigate {
            path: path.to_string(),
            delay_ms,
        });
    }

    fn open_url(&mut self, url: &str) {
        self.commands.push(ViewCommand::OpenUrl {
            url: url.to_string(),
        });
    }

    fn cancel_speech(&mut self) {
        if self.speech {
            self.commands.push(ViewCommand::CancelSpeech);
        }
    }

    fn speak(&mut self, utterance: Utterance) {
        if self.speech {
            self.commands.push(ViewCommand::Speak { utterance });
        }
    }
}
