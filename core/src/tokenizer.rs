use crate::config::{IndexConfig, TokenizerVariant};
use crate::stemmer::stem;
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;

lazy_static! {
    // Runs of anything that is not a letter or decimal digit.
    static ref SEPARATOR: Regex = Regex::new(r"[^\p{Alphabetic}\p{Nd}]+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","all","an","and","any","as","at",
            "both","but","by",
            "each",
            "for","from",
            "he","her","here","herself","him","himself","his","how",
            "i","in","is","it","its",
            "me","more","most","my","myself",
            "no","not",
            "of","on","only","other","our","ourselves","own",
            "same","she","so","some","such",
            "than","that","the","their","them","themselves","there","these","they","this","to","too",
            "up","us",
            "we","when","which","why","with",
            "you","your","yourself",
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Split text into lowercase alphanumeric tokens.
///
/// `WithoutStopWords` drops the closed stop-word list. Without `keep_frequency` every distinct
/// token is kept once, at its first position; with it, every occurrence is kept in order.
pub fn tokenize(text: &str, variant: TokenizerVariant, keep_frequency: bool) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    let tokens = SEPARATOR
        .split(&normalized)
        .filter(|segment| !segment.is_empty())
        .filter(|segment| !(variant.removes_stop_words() && is_stopword(segment)));

    if keep_frequency {
        return tokens.map(str::to_string).collect();
    }
    let mut seen: HashSet<&str> = HashSet::new();
    tokens
        .filter(|token| seen.insert(*token))
        .map(str::to_string)
        .collect()
}

/// Tokenize and, when the config asks for it, stem every token.
///
/// Ingestion and querying both go through here so the two sides always produce identical terms.
pub fn analyze(text: &str, config: &IndexConfig) -> Vec<String> {
    let tokens = tokenize(text, config.tokenizer, config.keep_frequency);
    if config.use_stemming {
        tokens.iter().map(|t| stem(t)).collect()
    } else {
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_underscore() {
        let t = tokenize("snake_case, kebab-case!! 42x", TokenizerVariant::Simple, true);
        assert_eq!(t, vec!["snake", "case", "kebab", "case", "42x"]);
    }

    #[test]
    fn joiners_and_connectors_split_terms() {
        let t = tokenize("tie\u{203F}fighter zero\u{200D}width non\u{200C}joiner", TokenizerVariant::Simple, true);
        assert_eq!(t, vec!["tie", "fighter", "zero", "width", "non", "joiner"]);
        assert!(t.iter().all(|w| w.chars().all(char::is_alphanumeric)));
    }

    #[test]
    fn blank_input_is_empty() {
        assert!(tokenize("", TokenizerVariant::Simple, true).is_empty());
        assert!(tokenize(" \t\n ", TokenizerVariant::WithoutStopWords, false).is_empty());
        assert!(tokenize("--- ...", TokenizerVariant::Simple, false).is_empty());
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let t = tokenize("b a b c a", TokenizerVariant::Simple, false);
        assert_eq!(t, vec!["b", "a", "c"]);
    }

    #[test]
    fn stop_words_match_after_lowercasing() {
        let t = tokenize("The Cat AND the Hat", TokenizerVariant::WithoutStopWords, true);
        assert_eq!(t, vec!["cat", "hat"]);
    }

    #[test]
    fn analyze_stems_when_enabled() {
        let config = IndexConfig::new(TokenizerVariant::Simple, true, true);
        assert_eq!(analyze("Running runs", &config), vec!["run", "run"]);
        let plain = IndexConfig::new(TokenizerVariant::Simple, true, false);
        assert_eq!(analyze("Running runs", &plain), vec!["running", "runs"]);
    }
}
