//! Turning model output into JSON values.
//!
//! Models occasionally wrap JSON in markdown fences, prepend chatter, or stop
//! mid-object when they hit the token limit. Strict parsing is tried first;
//! the repair pass only runs when that fails.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Best-effort reconstruction of a JSON object from damaged output.
///
/// Starts at the first `{`, keeps the outermost balanced object if there is
/// one, and otherwise closes whatever strings, arrays and objects were left
/// open. Returns `None` when there is no object to salvage.
pub fn repair_json(text: &str) -> Option<String> {
    let cleaned = text.replace("```json", "").replace("```", "");
    let start = cleaned.find('{')?;
    let body = &cleaned[start..];

    let mut open: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    let mut end = None;

    for (idx, ch) in body.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => open.push('}'),
            '[' => open.push(']'),
            '}' | ']' => {
                open.pop();
                if open.is_empty() {
                    end = Some(idx + ch.len_utf8());
                    break;
                }
            }
            _ => {}
        }
    }

    if let Some(end) = end {
        return Some(body[..end].to_string());
    }

    let mut repaired = body.trim_end().to_string();
    if in_string {
        if escaped {
            repaired.pop();
        }
        repaired.push('"');
    }
    close_dangling(&mut repaired);
    while let Some(closer) = open.pop() {
        repaired.push(closer);
    }
    Some(repaired)
}

/// Drops a trailing comma and gives a key with no value a `null`.
fn close_dangling(text: &mut String) {
    let trimmed_len = text.trim_end().len();
    text.truncate(trimmed_len);
    if text.ends_with(',') {
        text.pop();
    } else if text.ends_with(':') {
        text.push_str(" null");
    }
}

/// Parses a model response into `T`, falling back to `repair_json`.
pub fn parse_model_json<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    let stripped = strip_json_fences(text);
    match serde_json::from_str::<T>(stripped) {
        Ok(value) => Ok(value),
        Err(strict_err) => match repair_json(text) {
            Some(repaired) => serde_json::from_str::<T>(&repaired),
            None => Err(strict_err),
        },
    }
}

/// Parses a model response as an untyped JSON value.
pub fn parse_value(text: &str) -> Result<Value, serde_json::Error> {
    parse_model_json::<Value>(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_repair_skips_leading_chatter_and_trailing_text() {
        let input = "Sure! Here is the analysis:\n{\"score\": 0.7, \"tags\": [\"a\"]}\nHope this helps.";
        let value = parse_value(input).unwrap();
        assert_eq!(value, json!({"score": 0.7, "tags": ["a"]}));
    }

    #[test]
    fn test_repair_closes_truncated_object() {
        let input = "{\"name\": \"Ada\", \"skills\": [\"rust\", \"go\"";
        let value = parse_value(input).unwrap();
        assert_eq!(value, json!({"name": "Ada", "skills": ["rust", "go"]}));
    }

    #[test]
    fn test_repair_closes_nested_object_in_array() {
        let full = r#"{"name": "Ada", "workExperience": [{"company": "Acme", "title": "Engineer"}]}"#;
        let truncated = full.strip_suffix("}]}").unwrap();

        let value = parse_value(truncated).unwrap();
        assert_eq!(value, serde_json::from_str::<Value>(full).unwrap());
    }

    #[test]
    fn test_repair_closes_open_string() {
        let input = "{\"summary\": \"Strong systems backgro";
        let value = parse_value(input).unwrap();
        assert_eq!(value["summary"], "Strong systems backgro");
    }

    #[test]
    fn test_repair_handles_trailing_comma_and_dangling_key() {
        let comma = parse_value("{\"a\": 1, \"b\": [1, 2,").unwrap();
        assert_eq!(comma, json!({"a": 1, "b": [1, 2]}));

        let dangling = parse_value("{\"a\": 1, \"b\":").unwrap();
        assert_eq!(dangling, json!({"a": 1, "b": null}));
    }

    #[test]
    fn test_braces_inside_strings_do_not_count() {
        let input = "{\"note\": \"uses {braces} and ]\", \"ok\": true} trailing";
        let value = parse_value(input).unwrap();
        assert_eq!(value, json!({"note": "uses {braces} and ]", "ok": true}));
    }

    #[test]
    fn test_no_object_is_an_error() {
        assert!(repair_json("I cannot help with that.").is_none());
        assert!(parse_value("I cannot help with that.").is_err());
    }
}
