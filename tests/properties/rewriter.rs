//! Property tests for the HTML path rewriter.

use std::collections::BTreeSet;

use proptest::prelude::*;

use assetline::domain::services::Rewriter;

fn references() -> impl Strategy<Value = Vec<String>> {
    let reference = "[a-z]{1,8}(/[a-z]{1,8}){0,3}\\.min\\.js";
    proptest::collection::btree_set(reference, 1..8)
        .prop_map(|set: BTreeSet<String>| set.into_iter().collect())
        .prop_shuffle()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Every block reference appears exactly once, in order.
    #[test]
    fn property_block_keeps_reference_order(refs in references(), filler in "[a-z ]{0,32}") {
        let rewriter = Rewriter::new().script_block("js", refs.clone(), true);
        let document = format!(
            "<body>{filler}<!-- build:js --><script src=\"dev.js\"></script><!-- endbuild -->{filler}</body>"
        );

        let outcome = rewriter.apply(&document);

        prop_assert!(outcome.missing.is_empty());
        let mut last = 0;
        for reference in &refs {
            let tag = format!("<script src=\"{reference}\"></script>");
            prop_assert_eq!(outcome.document.matches(&tag).count(), 1);
            let at = outcome.document.find(&tag).unwrap();
            prop_assert!(at >= last);
            last = at;
        }
        prop_assert!(!outcome.document.contains("dev.js"));
    }

    /// PROPERTY: Prefix rewriting leaves no raw reference behind.
    #[test]
    fn property_prefix_rewrite_is_complete(paths in proptest::collection::vec("[a-z]{1,8}/[a-z]{1,8}\\.js", 0..6)) {
        let document: String = paths
            .iter()
            .map(|p| format!("<script src=\"node_modules/{p}\"></script>"))
            .collect();
        let rewriter = Rewriter::new()
            .literal("src=\"node_modules/", "src=\"libs/", false)
            .forbid("=\"node_modules/");

        let outcome = rewriter.apply(&document);

        prop_assert!(outcome.unrewritten.is_empty());
        prop_assert_eq!(outcome.substitutions(), paths.len());
        prop_assert_eq!(outcome.document.matches("src=\"libs/").count(), paths.len());
    }

    /// PROPERTY: Applying the rules to their own output changes nothing.
    #[test]
    fn property_rewrite_is_idempotent(refs in references(), body in "[a-z<> ]{0,32}") {
        let rewriter = Rewriter::new()
            .literal("href=\"src/styles/styles.scss\"", "href=\"src/styles/styles.min.css\"", false)
            .literal("src=\"node_modules/", "src=\"libs/", false)
            .script_block("js", refs, false);
        let document = format!(
            "<link href=\"src/styles/styles.scss\">{body}<!-- build:js --><!-- endbuild -->"
        );

        let once = rewriter.apply(&document).document;
        let twice = rewriter.apply(&once).document;
        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: The rewriter never panics on arbitrary documents.
    #[test]
    fn property_rewriter_never_panics(s in "(?s).{0,256}") {
        let rewriter = Rewriter::new()
            .literal("src=\"node_modules/", "src=\"libs/", true)
            .script_block("js", vec!["a.js".to_string()], true)
            .forbid("=\"node_modules/")
            .forbid("='node_modules/");
        let _ = rewriter.apply(&s);
    }
}
