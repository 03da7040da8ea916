const MAX_VISIBLE_LENGTH: usize = 100;

/// Truncates user-supplied text (prompts, confessions, mood check-ins) for
/// safe logging and redacts credential-looking fragments.
pub fn sanitize_for_log(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let visible = trimmed
        .char_indices()
        .nth(MAX_VISIBLE_LENGTH)
        .map(|(idx, _)| format!("{}... ({} chars total)", &trimmed[..idx], trimmed.len()))
        .unwrap_or_else(|| trimmed.to_string());

    redact_sensitive_patterns(&visible)
}

fn redact_sensitive_patterns(text: &str) -> String {
    let patterns = [
        ("Bearer ", "Bearer [REDACTED]"),
        ("password=", "password=[REDACTED]"),
        ("token=", "token=[REDACTED]"),
    ];

    let mut result = text.to_string();
    for (pattern, replacement) in patterns {
        if let Some(idx) = result.find(pattern) {
            let end = result[idx + pattern.len()..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| idx + pattern.len() + i)
                .unwrap_or(result.len());
            result = format!("{}{}{}", &result[..idx], replacement, &result[end..]);
        }
    }

    result
}
