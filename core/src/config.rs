use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which token stream the tokenizer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenizerVariant {
    #[default]
    Simple,
    WithoutStopWords,
}

impl TokenizerVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenizerVariant::Simple => "simple",
            TokenizerVariant::WithoutStopWords => "without-stop-words",
        }
    }

    pub fn removes_stop_words(&self) -> bool {
        matches!(self, TokenizerVariant::WithoutStopWords)
    }
}

impl FromStr for TokenizerVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(TokenizerVariant::Simple),
            "without-stop-words" => Ok(TokenizerVariant::WithoutStopWords),
            _ => Err(Error::UnknownTokenizer(s.to_string())),
        }
    }
}

impl fmt::Display for TokenizerVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analysis settings captured at build time and replayed for every query against that build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndexConfig {
    pub tokenizer: TokenizerVariant,
    pub keep_frequency: bool,
    pub use_stemming: bool,
}

impl IndexConfig {
    pub fn new(tokenizer: TokenizerVariant, keep_frequency: bool, use_stemming: bool) -> Self {
        Self { tokenizer, keep_frequency, use_stemming }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_variants() {
        assert_eq!("simple".parse::<TokenizerVariant>().unwrap(), TokenizerVariant::Simple);
        assert_eq!(
            " Without-Stop-Words ".parse::<TokenizerVariant>().unwrap(),
            TokenizerVariant::WithoutStopWords
        );
    }

    #[test]
    fn rejects_unknown_variant() {
        let err = "whitespace".parse::<TokenizerVariant>().unwrap_err();
        assert!(matches!(err, Error::UnknownTokenizer(ref s) if s == "whitespace"));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for v in [TokenizerVariant::Simple, TokenizerVariant::WithoutStopWords] {
            assert_eq!(v.to_string().parse::<TokenizerVariant>().unwrap(), v);
        }
    }
}
