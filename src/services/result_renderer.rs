//! Result Renderer for PantryChef.
//!
//! Turns recipe records into card markup plus the per-card action models
//! (save, read aloud, open) the board dispatches to by card index.

use std::sync::LazyLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

use crate::services::markup::{render_all, Element, Node};
use crate::types::recipe::{FavoriteRequest, RecipeRecord};

/// At most this many cards are rendered per result set.
pub const MAX_CARDS: usize = 6;

/// Card text is cut to this many characters.
pub const SUMMARY_LIMIT: usize = 220;

/// Image shown on every card.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/default_food.jpg";

pub const FALLBACK_TITLE: &str = "Recipe";

const SEARCH_URL: &str = "https://www.google.com/search?q=";

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[^>]+(>|$)").expect("tag pattern is valid"));

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Render-time view of one recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeCard {
    pub index: usize,
    pub title: String,
    /// Tag-free instructions, untruncated.
    pub text: String,
    /// `text` cut to [`SUMMARY_LIMIT`].
    pub summary: String,
    /// `None` when the record had no usable link.
    pub link: Option<String>,
    pub image: String,
}

impl RecipeCard {
    pub fn from_record(index: usize, record: &RecipeRecord) -> Self {
        let title = record
            .title
            .clone()
            .unwrap_or_else(|| FALLBACK_TITLE.to_string());
        let text = strip_tags(record.instructions.as_deref().unwrap_or(""));
        let link = record
            .link
            .as_deref()
            .filter(|l| !l.is_empty() && *l != "#")
            .map(|l| l.to_string());

        Self {
            index,
            summary: truncate(&text, SUMMARY_LIMIT),
            title,
            text,
            link,
            image: PLACEHOLDER_IMAGE.to_string(),
        }
    }

    /// The record's link, or a web search for the title.
    pub fn open_url(&self) -> String {
        match &self.link {
            Some(link) => link.clone(),
            None => search_url(&self.title),
        }
    }

    pub fn favorite_request(&self) -> FavoriteRequest {
        FavoriteRequest {
            title: self.title.clone(),
            link: self.link.clone().unwrap_or_else(|| "#".to_string()),
            image: self.image.clone(),
        }
    }

    /// What "read aloud" says: the title, then the full instructions.
    pub fn speech_text(&self) -> String {
        format!("{}. {}", self.title, self.text)
    }

    fn to_node(&self) -> Node {
        let index = self.index.to_string();
        let action = |tag: &'static str, class: &'static str, name: &'static str| {
            Element::new(tag)
                .class(class)
                .attr("data-card", index.clone())
                .attr("data-action", name)
        };

        Element::new("div")
            .class("card")
            .child(
                Element::new("img")
                    .attr("src", self.image.clone())
                    .attr("alt", self.title.clone())
                    .attr("loading", "lazy"),
            )
            .child(
                Element::new("div")
                    .class("body")
                    .child(Element::new("h3").text(self.title.clone()))
                    .child(Element::new("p").text(self.summary.clone()))
                    .child(
                        Element::new("div")
                            .class("actions")
                            .child(action("button", "action-btn save-btn", "save").text("❤️ Save"))
                            .child(action("button", "action-btn speak-btn", "speak").text("🔊 Read"))
                            .child(
                                action("a", "link open-btn", "open")
                                    .attr("target", "_blank")
                                    .text(if self.link.is_some() { "Open" } else { "Search" }),
                            ),
                    ),
            )
            .into()
    }
}

/// Cards for one result set.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResults {
    pub html: String,
    pub cards: Vec<RecipeCard>,
}

/// Renders the first [`MAX_CARDS`] records.
pub fn render_results(records: &[RecipeRecord]) -> RenderedResults {
    let cards: Vec<RecipeCard> = records
        .iter()
        .take(MAX_CARDS)
        .enumerate()
        .map(|(i, record)| RecipeCard::from_record(i, record))
        .collect();
    let nodes: Vec<Node> = cards.iter().map(RecipeCard::to_node).collect();

    RenderedResults {
        html: render_all(&nodes),
        cards,
    }
}

/// Panel shown when the server returned no recipes.
pub fn render_no_recipes() -> String {
    Element::new("div")
        .class("panel")
        .child(Element::new("p").text("No recipes returned."))
        .render()
}

/// Removes anything that looks like an HTML tag, including an unterminated one at the end.
pub fn strip_tags(input: &str) -> String {
    TAG_PATTERN.replace_all(input, "").into_owned()
}

/// Cuts `input` to `limit` characters and appends `...` when anything was cut.
pub fn truncate(input: &str, limit: usize) -> String {
    match input.char_indices().nth(limit) {
        Some((byte_index, _)) => format!("{}...", &input[..byte_index]),
        None => input.to_string(),
    }
}

/// Web search for `"{title} recipe"`.
pub fn search_url(title: &str) -> String {
    let query = format!("{} recipe", title);
    format!("{}{}", SEARCH_URL, utf8_percent_encode(&query, URI_COMPONENT))
}
