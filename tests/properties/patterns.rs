//! Property tests for source patterns.

use std::path::Path;

use proptest::prelude::*;

use assetline::domain::value_objects::SourcePattern;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Pattern parsing never panics on arbitrary input.
    #[test]
    fn property_pattern_parse_never_panics(s in "(?s).{0,128}") {
        let _ = SourcePattern::new(Path::new("/project"), &s);
    }

    /// PROPERTY: A literal pattern matches exactly its own path.
    #[test]
    fn property_literal_pattern_matches_itself(
        segments in proptest::collection::vec("[a-z0-9_-]{1,8}", 1..4),
        ext in "[a-z]{1,4}",
    ) {
        let rel = format!("{}.{}", segments.join("/"), ext);
        let root = Path::new("/project");
        let pattern = SourcePattern::new(root, &rel).unwrap();

        prop_assert!(pattern.matches(&root.join(&rel)));
        let bak = root.join(format!("{rel}.bak"));
        prop_assert!(!pattern.matches(&bak));
    }
}
