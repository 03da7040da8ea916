/// Key under which a user's streak counter lives in the store.
pub fn streak_key(user_id: &str) -> String {
    format!("user:{}:streak", user_id)
}

/// An absent or unparseable stored value means the user has no streak yet.
pub fn streak_from_raw(raw: Option<String>) -> i64 {
    raw.and_then(|v| v.parse().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_embeds_user_id() {
        assert_eq!(streak_key("alice"), "user:alice:streak");
    }

    #[test]
    fn absent_value_means_zero() {
        assert_eq!(streak_from_raw(None), 0);
    }

    #[test]
    fn stored_value_round_trips() {
        assert_eq!(streak_from_raw(Some("5".to_string())), 5);
        assert_eq!(streak_from_raw(Some("-3".to_string())), -3);
    }

    #[test]
    fn garbage_value_means_zero() {
        assert_eq!(streak_from_raw(Some("not-a-number".to_string())), 0);
    }
}
