//! Minimal HTML-to-text conversion for feed descriptions.
//!
//! This only decodes entities and turns `<br>` and `</p>` into line breaks.
//! Any other markup is passed through untouched.

/// Decode HTML entities, then map `<br>` to one newline and `</p>` to two.
pub fn clean(text: &str) -> String {
    html_escape::decode_html_entities(text)
        .replace("<br>", "\n")
        .replace("</p>", "\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_entities_and_breaks() {
        assert_eq!(clean("A&amp;B<br>C</p>D"), "A&B\nC\n\nD");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(clean("nothing to see here"), "nothing to see here");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn numeric_and_named_entities() {
        assert_eq!(clean("&lt;&#39;&#x41;&quot;&gt;"), "<'A\">");
    }

    #[test]
    fn other_tags_survive() {
        assert_eq!(
            clean(r#"<p>see <a href="https://x.test">link</a></p>"#),
            "<p>see <a href=\"https://x.test\">link</a>\n\n"
        );
    }

    #[test]
    fn escaped_markup_becomes_live_markup() {
        // Decoding happens first, so an escaped break still turns into a newline.
        assert_eq!(clean("one&lt;br&gt;two"), "one\ntwo");
    }

    #[test]
    fn only_exact_lowercase_break_is_replaced() {
        assert_eq!(clean("a<br/>b<BR>c"), "a<br/>b<BR>c");
    }
}
