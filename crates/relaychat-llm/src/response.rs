use serde_json::Value;

/// Pull the assistant text out of a completion body.
///
/// Reads `choices[0].message.content`, then the legacy `choices[0].text`, then a
/// top-level `text`. Empty strings count as missing.
pub fn extract_assistant_text(body: &Value) -> Option<String> {
    let choice = body.get("choices").and_then(|c| c.get(0));

    choice
        .and_then(|c| c.pointer("/message/content"))
        .and_then(Value::as_str)
        .or_else(|| choice.and_then(|c| c.get("text")).and_then(Value::as_str))
        .or_else(|| body.get("text").and_then(Value::as_str))
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}
