use regex::Regex;
use std::sync::OnceLock;

static PUNCT: OnceLock<Regex> = OnceLock::new();

/// Lowercases, strips punctuation and collapses whitespace runs. All
/// scorers compare this canonical form.
pub fn normalize(text: &str) -> String {
    let re = PUNCT.get_or_init(|| Regex::new(r"[^\w\s]").expect("static regex"));
    let lowered = text.to_lowercase();
    let stripped = re.replace_all(&lowered, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn tokens(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("Hello,   World!!"), "hello world");
    }

    #[test]
    fn tokens_of_empty_input() {
        assert!(tokens("").is_empty());
        assert!(tokens("?!.").is_empty());
    }
}
