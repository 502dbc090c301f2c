use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};

lazy_static! {
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// Reduce a lowercase token to its Snowball English root.
pub fn stem(term: &str) -> String {
    STEMMER.stem(term).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_inflections() {
        assert_eq!(stem("running"), "run");
        assert_eq!(stem("runs"), "run");
        assert_eq!(stem("connection"), stem("connected"));
    }

    #[test]
    fn total_on_digits_and_short_tokens() {
        assert_eq!(stem("2024"), "2024");
        assert_eq!(stem("a"), "a");
    }

    #[test]
    fn deterministic() {
        assert_eq!(stem("generalizations"), stem("generalizations"));
    }
}
