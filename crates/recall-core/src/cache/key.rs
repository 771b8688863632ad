use sha2::{Digest, Sha256};

/// Cache key for a question: digest of the normalized title/content pair.
/// Two submissions that differ only in case or surrounding whitespace map
/// to the same entry.
pub fn question_key(title: &str, content: &str) -> String {
    let combined = format!("{}|{}", title, content).trim().to_lowercase();
    let mut h = Sha256::new();
    h.update(combined.as_bytes());
    hex::encode(h.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_stable() {
        assert_eq!(
            question_key("Why is the sky blue?", "asking for a friend"),
            question_key("Why is the sky blue?", "asking for a friend"),
        );
    }

    #[test]
    fn key_normalizes_case_and_whitespace() {
        assert_eq!(
            question_key("Why is the sky blue?", ""),
            question_key("  WHY IS THE SKY BLUE?", ""),
        );
    }

    #[test]
    fn key_is_sensitive_to_content() {
        assert_ne!(
            question_key("Why is the sky blue?", "a"),
            question_key("Why is the sky blue?", "b"),
        );
    }
}
