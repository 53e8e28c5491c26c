use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"[a-z0-9_]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a", "an", "the", "is", "are", "was", "were", "and", "or", "in", "on", "at", "to",
            "for", "of", "by",
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

/// Stem a lowercased word to its root form.
pub fn stem(word: &str) -> String {
    STEMMER.stem(word).to_string()
}

/// Split text into lowercase raw words. Runs of anything other than ASCII
/// letters, digits and underscore are delimiters; order is preserved so
/// phrase construction can use original adjacency.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Canonical token for an already-lowercased raw word: `None` for
/// stopwords, the stem otherwise.
pub fn normalize(word: &str) -> Option<String> {
    if is_stopword(word) {
        None
    } else {
        Some(stem(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_non_word_runs() {
        let words = tokenize("Running, runner's run!");
        assert_eq!(words, vec!["running", "runner", "s", "run"]);
    }

    #[test]
    fn empty_and_delimiter_only_text_yield_no_words() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" .,;!? ").is_empty());
    }

    #[test]
    fn stems_to_root() {
        assert_eq!(stem("running"), "run");
        assert_eq!(stem("jumps"), "jump");
        assert_eq!(stem("happy"), "happi");
        // Stemming its own output does not shrink it further.
        assert_eq!(stem("run"), "run");
    }

    #[test]
    fn drops_stopwords() {
        assert_eq!(normalize("the"), None);
        assert_eq!(normalize("of"), None);
        assert_eq!(normalize("queries"), Some("queri".to_string()));
    }
}
