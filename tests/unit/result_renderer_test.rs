//! Unit tests for the Result Renderer and the history list markup.

use pantrychef::services::history_view::{render_history, EMPTY_HISTORY_TEXT};
use pantrychef::services::result_renderer::{
    render_no_recipes, render_results, search_url, strip_tags, truncate, RecipeCard,
    FALLBACK_TITLE, MAX_CARDS, PLACEHOLDER_IMAGE, SUMMARY_LIMIT,
};
use pantrychef::types::history::HistoryEntry;
use pantrychef::types::recipe::RecipeRecord;
use rstest::rstest;

fn records(n: usize) -> Vec<RecipeRecord> {
    (0..n)
        .map(|i| RecipeRecord::new(&format!("Dish {}", i), "Cook it"))
        .collect()
}

// ─── Cards ───

#[test]
fn test_ten_records_render_six_cards() {
    let rendered = render_results(&records(10));
    assert_eq!(rendered.cards.len(), MAX_CARDS);
    assert_eq!(rendered.html.matches("class=\"card\"").count(), MAX_CARDS);
    assert!(rendered.html.contains("Dish 5"));
    assert!(!rendered.html.contains("Dish 6"));
}

#[test]
fn test_fewer_records_render_all() {
    let rendered = render_results(&records(2));
    assert_eq!(rendered.cards.len(), 2);
    assert_eq!(rendered.cards[1].index, 1);
}

#[test]
fn test_card_uses_fallback_title_and_placeholder_image() {
    let card = RecipeCard::from_record(0, &RecipeRecord::default());
    assert_eq!(card.title, FALLBACK_TITLE);
    assert_eq!(card.image, PLACEHOLDER_IMAGE);
    assert_eq!(card.summary, "");
}

#[test]
fn test_card_markup_carries_actions() {
    let html = render_results(&[RecipeRecord::new("Stew", "Slow cook").with_link("https://x.test/stew")]).html;
    assert!(html.contains(r#"data-card="0" data-action="save""#));
    assert!(html.contains(r#"data-card="0" data-action="speak""#));
    assert!(html.contains(r#"data-card="0" data-action="open""#));
    assert!(html.contains(&format!(r#"src="{}""#, PLACEHOLDER_IMAGE)));
    assert!(html.contains("<h3>Stew</h3>"));
    assert!(html.contains(">Open</a>"));
}

#[test]
fn test_card_without_link_offers_search() {
    let html = render_results(&[RecipeRecord::new("Stew", "Slow cook")]).html;
    assert!(html.contains(">Search</a>"));
}

#[test]
fn test_long_instructions_are_truncated() {
    let long = "a".repeat(SUMMARY_LIMIT + 50);
    let card = RecipeCard::from_record(0, &RecipeRecord::new("Long", &long));
    assert_eq!(card.summary.len(), SUMMARY_LIMIT + 3);
    assert!(card.summary.ends_with("..."));
    assert_eq!(card.text, long);
}

#[test]
fn test_exact_limit_is_not_truncated() {
    let exact = "b".repeat(SUMMARY_LIMIT);
    assert_eq!(truncate(&exact, SUMMARY_LIMIT), exact);
}

#[test]
fn test_tags_are_stripped_before_rendering() {
    let card = RecipeCard::from_record(0, &RecipeRecord::new("T", "<p>Mix <b>well</b></p>"));
    assert_eq!(card.text, "Mix well");
    let html = render_results(&[RecipeRecord::new("T", "<p>Mix <b>well</b></p>")]).html;
    assert!(html.contains("<p>Mix well</p>"));
}

#[test]
fn test_hostile_title_is_escaped() {
    let html = render_results(&[RecipeRecord::new("<img src=x onerror=alert(1)>", "")]).html;
    assert!(!html.contains("<img src=x"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
}

#[rstest]
#[case("Mix", "<b>x</b>", "Mix. x")]
#[case("Soup", "", "Soup. ")]
fn test_speech_text(#[case] title: &str, #[case] instructions: &str, #[case] expected: &str) {
    let card = RecipeCard::from_record(0, &RecipeRecord::new(title, instructions));
    assert_eq!(card.speech_text(), expected);
}

#[test]
fn test_open_url_prefers_link() {
    let linked = RecipeCard::from_record(0, &RecipeRecord::new("Stew", "").with_link("https://x.test/stew"));
    assert_eq!(linked.open_url(), "https://x.test/stew");

    let unlinked = RecipeCard::from_record(0, &RecipeRecord::new("Beef Stew", ""));
    assert_eq!(unlinked.open_url(), search_url("Beef Stew"));
    assert_eq!(
        unlinked.open_url(),
        "https://www.google.com/search?q=Beef%20Stew%20recipe"
    );
}

#[test]
fn test_favorite_request_fields() {
    let card = RecipeCard::from_record(0, &RecipeRecord::new("Stew", "").with_link("https://x.test/s"));
    let favorite = card.favorite_request();
    assert_eq!(favorite.title, "Stew");
    assert_eq!(favorite.link, "https://x.test/s");
    assert_eq!(favorite.image, PLACEHOLDER_IMAGE);
}

#[test]
fn test_no_recipes_panel() {
    assert_eq!(
        render_no_recipes(),
        r#"<div class="panel"><p>No recipes returned.</p></div>"#
    );
}

#[rstest]
#[case("plain", "plain")]
#[case("a <br/> b", "a  b")]
#[case("<<x>>", ">")]
#[case("no close <i", "no close ")]
fn test_strip_tags(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(strip_tags(input), expected);
}

// ─── History list ───

#[test]
fn test_empty_history_placeholder() {
    let html = render_history(&[]);
    assert!(html.contains(EMPTY_HISTORY_TEXT));
    assert!(!html.contains("history-item"));
}

#[test]
fn test_history_items_show_query_and_diet() {
    let entries = vec![
        HistoryEntry {
            id: 2,
            query: "tofu, rice".into(),
            diet: Some("vegan".into()),
            results: vec![],
        },
        HistoryEntry {
            id: 1,
            query: "eggs".into(),
            diet: None,
            results: vec![],
        },
    ];
    let html = render_history(&entries);
    assert_eq!(html.matches("history-item").count(), 2);
    assert!(html.contains(r#"data-history-id="2""#));
    assert!(html.contains("tofu, rice • vegan"));
    assert!(html.contains(">eggs</div>"));
    assert!(html.contains(r#"title="Click to view results""#));
}

#[test]
fn test_history_query_is_escaped() {
    let entries = vec![HistoryEntry {
        id: 1,
        query: "<script>".into(),
        diet: None,
        results: vec![],
    }];
    let html = render_history(&entries);
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
}
