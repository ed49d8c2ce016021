use serde_json::Value;

/// Extract candidate specialization names from a completion reply.
///
/// Strict pass: the reply is a JSON object carrying a `specializations`
/// string array. An object that lacks the array yields no candidates —
/// it does not fall through to the lenient pass.
/// Lenient pass: anything that is not a JSON object is split into lines
/// with bullet markers trimmed off.
pub fn parse_specialization_reply(reply: &str) -> Vec<String> {
    let trimmed = reply.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => map
            .get("specializations")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
        _ => parse_bullet_lines(trimmed),
    }
}

fn parse_bullet_lines(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(|line| line.trim().trim_matches(|c| c == '-' || c == '*').trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
