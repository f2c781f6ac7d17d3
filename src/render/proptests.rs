//! Property-based tests for the response renderer

use super::{render, to_html, Fragment, Inline};
use proptest::prelude::*;

/// Text built from fragments that exercise every rule
fn arb_markdownish() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("```".to_string()),
            Just("`".to_string()),
            Just("**".to_string()),
            Just("\n".to_string()),
            Just("# ".to_string()),
            Just("- ".to_string()),
            Just("1. ".to_string()),
            Just("<script>".to_string()),
            Just("&\"'".to_string()),
            "[a-zA-Z0-9 ]{1,12}",
            "\\PC{1,6}",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

fn inline_texts(inlines: &[Inline]) -> impl Iterator<Item = &str> {
    inlines.iter().map(|inline| match inline {
        Inline::Text { text } | Inline::InlineCode { text } | Inline::Bold { text } => {
            text.as_str()
        }
    })
}

proptest! {
    #[test]
    fn prop_render_never_panics_and_is_deterministic(text in arb_markdownish()) {
        prop_assert_eq!(render(&text), render(&text));
    }

    #[test]
    fn prop_html_has_no_unescaped_model_markup(text in arb_markdownish()) {
        let html = to_html(&render(&text));
        prop_assert!(!html.contains("<script>"));
    }

    #[test]
    fn prop_no_empty_lists_and_valid_heading_levels(text in arb_markdownish()) {
        for fragment in render(&text) {
            match fragment {
                Fragment::List { items } => prop_assert!(!items.is_empty()),
                Fragment::Heading { level, .. } => prop_assert!((1..=6).contains(&level)),
                _ => {}
            }
        }
    }

    #[test]
    fn prop_list_runs_share_one_container(text in arb_markdownish()) {
        let fragments = render(&text);
        for pair in fragments.windows(2) {
            let adjacent_lists =
                matches!(pair, [Fragment::List { .. }, Fragment::List { .. }]);
            prop_assert!(!adjacent_lists, "split list in {:?}", fragments);
        }
    }

    #[test]
    fn prop_blank_lines_between_items_keep_one_list(
        items in proptest::collection::vec(("[a-z]{1,8}", 1usize..4), 1..8)
    ) {
        let text: String = items
            .iter()
            .map(|(word, newlines)| format!("- {word}{}", "\n".repeat(*newlines)))
            .collect();
        let fragments = render(&text);
        let Some(Fragment::List { items: rendered }) = fragments.first() else {
            return Err(TestCaseError::fail(format!("expected a list, got {fragments:?}")));
        };
        prop_assert_eq!(rendered.len(), items.len());
        prop_assert!(fragments.iter().skip(1).all(|f| *f == Fragment::LineBreak));
    }

    #[test]
    fn prop_plain_words_survive(words in proptest::collection::vec("[a-z]{1,8}", 1..10)) {
        let text = words.join(" ");
        prop_assert_eq!(render(&text), vec![Fragment::text(text.clone())]);
    }

    #[test]
    fn prop_text_outside_code_never_holds_line_breaks(text in arb_markdownish()) {
        for fragment in render(&text) {
            let holds_newline = match &fragment {
                Fragment::Text { text } | Fragment::InlineCode { text } | Fragment::Bold { text } => {
                    text.contains('\n')
                }
                Fragment::Heading { content, .. } => inline_texts(content).any(|t| t.contains('\n')),
                Fragment::List { items } => items
                    .iter()
                    .any(|item| inline_texts(item).any(|t| t.contains('\n'))),
                Fragment::CodeBlock { .. } | Fragment::LineBreak => false,
            };
            prop_assert!(!holds_newline, "newline leaked into {:?}", fragment);
        }
    }
}
