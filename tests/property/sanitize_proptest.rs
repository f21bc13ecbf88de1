//! Property-based tests for the HTML sanitizer

use gristfetch::widget::{HtmlSanitizer, Sanitizer};
use proptest::prelude::*;

fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 .,]{0,20}",
        Just("<p>".to_string()),
        Just("</p>".to_string()),
        Just("<b>bold</b>".to_string()),
        Just("<script>alert(1)</script>".to_string()),
        Just("<style>body{}</style>".to_string()),
        Just("<a href=\"javascript:alert(1)\">x</a>".to_string()),
        Just("<a href=\"https://example.com\">link</a>".to_string()),
        Just("<img src=\"x.png\" onerror=\"alert(1)\">".to_string()),
        Just("<div onclick=\"run()\">click</div>".to_string()),
        Just("<iframe src=\"https://evil\"></iframe>".to_string()),
        Just("<iframe srcdoc=\"&lt;script&gt;alert(1)&lt;/script&gt;\"></iframe>".to_string()),
        Just("<object data=\"x.swf\"></object><embed src=\"x.swf\">".to_string()),
    ]
}

fn page() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..12).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn test_output_never_carries_scripting(html in page()) {
        let clean = HtmlSanitizer::new().sanitize(&html).to_ascii_lowercase();

        prop_assert!(!clean.contains("<script"));
        prop_assert!(!clean.contains("<style"));
        prop_assert!(!clean.contains("<iframe"));
        prop_assert!(!clean.contains("javascript:"));
        prop_assert!(!clean.contains("onclick"));
        prop_assert!(!clean.contains("onerror"));
    }

    #[test]
    fn test_scripting_cannot_be_allowed(html in page()) {
        let sanitizer = HtmlSanitizer::with_allowances(
            ["script", "style", "iframe", "object", "embed"],
            ["onclick", "onerror", "srcdoc"],
        );
        let clean = sanitizer.sanitize(&html).to_ascii_lowercase();

        prop_assert!(!clean.contains("<script"));
        prop_assert!(!clean.contains("<iframe"));
        prop_assert!(!clean.contains("<object"));
        prop_assert!(!clean.contains("<embed"));
        prop_assert!(!clean.contains("srcdoc"));
        prop_assert!(!clean.contains("onclick"));
    }
}
