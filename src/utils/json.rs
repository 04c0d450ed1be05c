//! Helpers for pulling JSON out of free-form model output

/// Find the first balanced `{...}` object in `text`
///
/// Braces inside string literals are ignored, so prose around the object and
/// string values containing `{` or `}` do not confuse the scan. Returns `None`
/// when no opening brace is ever closed.
pub fn first_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;

        for (i, &b) in bytes.iter().enumerate().skip(start) {
            if in_string {
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == b'"' {
                    in_string = false;
                }
                continue;
            }

            match b {
                b'"' => in_string = true,
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&text[start..=i]);
                    }
                }
                _ => {}
            }
        }

        // unbalanced from this brace, try the next one
        search_from = start + 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object() {
        assert_eq!(first_json_object(r#"{"a":1}"#), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_surrounding_prose() {
        let text = "好的，这是结果：\n```json\n{\"tags\": [\"chill\"], \"title\": \"夜\"}\n```\n希望你喜欢 {";
        assert_eq!(
            first_json_object(text),
            Some("{\"tags\": [\"chill\"], \"title\": \"夜\"}")
        );
    }

    #[test]
    fn test_nested_and_braces_in_strings() {
        let text = r#"x {"a": {"b": "}"}, "c": "\"{"} y {"d": 2}"#;
        assert_eq!(first_json_object(text), Some(r#"{"a": {"b": "}"}, "c": "\"{"}"#));
    }

    #[test]
    fn test_unbalanced_then_balanced() {
        assert_eq!(first_json_object("{ oops"), None);
        assert_eq!(first_json_object(r#"{ oops {"a":1}"#), Some(r#"{"a":1}"#));
        assert_eq!(first_json_object("no json here"), None);
    }
}
