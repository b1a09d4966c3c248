//! Lexical detection of identifiers that look like class names.
//!
//! Detection is deliberately regex-based rather than syntactic; callers
//! that want a real tokenizer can swap this module without touching the
//! resolver or the rewriter.

use std::sync::OnceLock;

use regex::Regex;

static CLASS_TOKEN: OnceLock<Regex> = OnceLock::new();

fn class_token_pattern() -> &'static Regex {
    // One or more capitalized camel-case words, e.g. "File" or "ArrayList".
    CLASS_TOKEN.get_or_init(|| Regex::new(r"\b[A-Z][a-z]*(?:[A-Z][a-z]*)*\b").unwrap())
}

/// Lazily yields every substring of `source` that looks like a class
/// name. Duplicates are not removed here.
pub fn class_tokens(source: &str) -> impl Iterator<Item = &str> {
    class_token_pattern()
        .find_iter(source)
        .map(|token| token.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<&str> {
        class_tokens(source).collect()
    }

    #[test]
    fn test_camel_case_tokens() {
        assert_eq!(
            tokens("ArrayList<String> list = new ArrayList<>();"),
            vec!["ArrayList", "String", "ArrayList"]
        );
    }

    #[test]
    fn test_lowercase_identifiers_are_skipped() {
        assert!(tokens("int count = compute(total);").is_empty());
    }

    #[test]
    fn test_token_stops_at_non_camel_tail() {
        assert_eq!(tokens("FileNotFoundException e"), vec!["FileNotFoundException"]);
    }

    #[test]
    fn test_single_capital_letter_is_a_token() {
        // Type parameters like T show up; resolution filters them out.
        assert_eq!(tokens("Map<K, V> map"), vec!["Map", "K", "V"]);
    }
}
