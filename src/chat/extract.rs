use serde_json::Value;

/// Keys probed for a reply, highest priority first
pub const REPLY_KEYS: [&str; 8] = [
    "recommendations",
    "text",
    "output",
    "message",
    "response",
    "result",
    "data",
    "content",
];

/// Pull a displayable reply out of an automation webhook payload.
///
/// Strings are returned trimmed, arrays are followed through their first
/// element only, and objects are probed through [`REPLY_KEYS`] in order,
/// descending into nested objects and arrays. Returns `None` when nothing
/// usable is found.
pub fn extract_reply(payload: &Value) -> Option<String> {
    match payload {
        Value::String(s) => non_blank(s),
        Value::Array(items) => items.first().and_then(extract_reply),
        Value::Object(map) => REPLY_KEYS.iter().find_map(|key| match map.get(*key)? {
            Value::String(s) => non_blank(s),
            nested @ (Value::Object(_) | Value::Array(_)) => extract_reply(nested),
            _ => None,
        }),
        _ => None,
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_string() {
        assert_eq!(extract_reply(&json!("  hello \n")), Some("hello".to_string()));
        assert_eq!(extract_reply(&json!("   ")), None);
    }

    #[test]
    fn test_array_uses_first_element_only() {
        assert_eq!(extract_reply(&json!(["hello", "world"])), Some("hello".to_string()));
        assert_eq!(extract_reply(&json!(["", "world"])), None);
        assert_eq!(extract_reply(&json!([])), None);
        assert_eq!(
            extract_reply(&json!([{ "output": "from n8n" }])),
            Some("from n8n".to_string())
        );
    }

    #[test]
    fn test_single_known_key() {
        assert_eq!(extract_reply(&json!({ "text": "hi" })), Some("hi".to_string()));
        assert_eq!(extract_reply(&json!({ "foo": "bar" })), None);
    }

    #[test]
    fn test_blank_higher_priority_key_is_skipped() {
        assert_eq!(
            extract_reply(&json!({ "output": "", "text": "fallback" })),
            Some("fallback".to_string())
        );
    }

    #[test]
    fn test_priority_order_wins_over_field_order() {
        let payload = json!({
            "content": "last",
            "message": "middle",
            "recommendations": "first"
        });
        assert_eq!(extract_reply(&payload), Some("first".to_string()));
    }

    #[test]
    fn test_nested_values() {
        assert_eq!(
            extract_reply(&json!({ "data": { "content": "nested" } })),
            Some("nested".to_string())
        );
        assert_eq!(
            extract_reply(&json!({ "result": [{ "message": "deep" }, "ignored"] })),
            Some("deep".to_string())
        );
    }

    #[test]
    fn test_failed_nested_probe_moves_to_next_key() {
        let payload = json!({ "text": { "foo": 1 }, "output": "second" });
        assert_eq!(extract_reply(&payload), Some("second".to_string()));
    }

    #[test]
    fn test_non_text_values_yield_nothing() {
        assert_eq!(extract_reply(&json!(42)), None);
        assert_eq!(extract_reply(&json!(null)), None);
        assert_eq!(extract_reply(&json!({ "text": 42, "message": true })), None);
    }
}
