//! Property-based tests for markup escaping.
//!
//! Recipe fields come from the server and history titles from the user, so
//! no input string may ever produce markup of its own.

use pantrychef::services::history_view::render_history;
use pantrychef::services::markup::escape_html;
use pantrychef::services::result_renderer::{render_results, truncate, RecipeCard, SUMMARY_LIMIT};
use pantrychef::types::history::HistoryEntry;
use pantrychef::types::recipe::RecipeRecord;
use proptest::prelude::*;

/// Strings heavy in markup-significant characters.
fn arb_hostile() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("<".to_string()),
            Just(">".to_string()),
            Just("&".to_string()),
            Just("\"".to_string()),
            Just("'".to_string()),
            Just("<script>".to_string()),
            Just("onerror=".to_string()),
            "[a-zA-Z0-9 ]{1,6}",
        ],
        1..12,
    )
    .prop_map(|parts| parts.concat())
}

fn unescape(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn escaped_text_has_no_markup_characters(input in any::<String>()) {
        let escaped = escape_html(&input);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
        prop_assert!(!escaped.contains('\''));
        prop_assert_eq!(unescape(&escaped), input);
    }

    #[test]
    fn card_title_renders_as_text(title in arb_hostile()) {
        let html = render_results(&[RecipeRecord::new(&title, "")]).html;
        let expected = format!("<h3>{}</h3>", escape_html(&title));
        prop_assert!(html.contains(&expected));
        prop_assert_eq!(html.matches('<').count(), render_results(&[RecipeRecord::new("x", "")]).html.matches('<').count());
    }

    #[test]
    fn history_label_renders_as_text(query in arb_hostile()) {
        let html = render_history(&[HistoryEntry {
            id: 1,
            query: query.clone(),
            diet: None,
            results: Vec::new(),
        }]);
        prop_assert!(html.contains(&escape_html(&query)));
        prop_assert_eq!(html.matches('<').count(), 2);
    }

    #[test]
    fn truncation_keeps_a_char_prefix(input in "\\PC{0,400}", limit in 0usize..300) {
        let cut = truncate(&input, limit);
        let length = input.chars().count();
        if length <= limit {
            prop_assert_eq!(cut, input);
        } else {
            let kept = cut.strip_suffix("...").unwrap();
            prop_assert_eq!(kept.chars().count(), limit);
            prop_assert!(input.starts_with(kept));
        }
    }

    #[test]
    fn card_summary_never_exceeds_limit(text in "[a-zé🍲 ]{0,500}") {
        let card = RecipeCard::from_record(0, &RecipeRecord::new("Soup", &text));
        prop_assert!(card.summary.chars().count() <= SUMMARY_LIMIT + 3);
        prop_assert_eq!(card.text, text);
    }
}
