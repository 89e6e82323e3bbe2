//! Property tests for the script and HTML minifiers.

use proptest::prelude::*;

use assetline::domain::services::{collapse_whitespace, minify_script};

fn script_like() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        Just("var".to_string()),
        Just("function".to_string()),
        Just("return".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just(";".to_string()),
        Just("/".to_string()),
        Just("'a'".to_string()),
        Just("\"b\"".to_string()),
        Just("`c`".to_string()),
        Just("// note\n".to_string()),
        Just("/* block */".to_string()),
        Just("\n".to_string()),
        Just(" ".to_string()),
        "[a-z_$][a-z0-9_$]{0,6}",
        "[0-9]{1,4}",
    ];
    proptest::collection::vec(token, 0..48).prop_map(|tokens| tokens.join(""))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The script minifier never panics on arbitrary input.
    #[test]
    fn property_minify_script_never_panics(s in "(?s).{0,256}") {
        let _ = minify_script(&s);
    }

    /// PROPERTY: The script minifier never panics on token soup.
    #[test]
    fn property_minify_script_tokens_never_panic(s in script_like()) {
        let _ = minify_script(&s);
    }

    /// PROPERTY: The HTML whitespace collapser never panics on arbitrary input.
    #[test]
    fn property_collapse_whitespace_never_panics(s in "(?s).{0,256}") {
        let _ = collapse_whitespace(&s);
    }

    /// PROPERTY: Collapsing whitespace never grows the document.
    #[test]
    fn property_collapse_whitespace_never_grows(s in "[ a-z<>/=\"\n\t]{0,128}") {
        if let Ok(out) = collapse_whitespace(&s) {
            prop_assert!(out.len() <= s.len());
        }
    }
}
