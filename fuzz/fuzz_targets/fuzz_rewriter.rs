#![no_main]

use assetline::domain::services::Rewriter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(document) = std::str::from_utf8(data) {
        let rewriter = Rewriter::new()
            .literal("href=\"src/styles/styles.scss\"", "href=\"src/styles/styles.min.css\"", true)
            .literal("src=\"node_modules/", "src=\"libs/", false)
            .script_block("js", vec!["libs/a.min.js".to_string()], true)
            .forbid("=\"node_modules/");
        let _ = rewriter.apply(document);
    }
});
