use crate::error::{Error, Result};
use crate::index::{DocId, Snapshot};
use crate::tokenizer::analyze;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub score: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub documents: Vec<ScoredDocument>,
    pub current_page: i64,
    pub num_of_pages: usize,
    pub relevant_documents_count: usize,
}

/// Count term matches per document. Each posting is one point, so repeated query terms and
/// repeated in-document occurrences both add up.
pub fn score(snapshot: &Snapshot, query: &str) -> HashMap<DocId, u32> {
    let terms = analyze(query, snapshot.config());
    let mut scores: HashMap<DocId, u32> = HashMap::new();
    for term in &terms {
        if let Some(postings) = snapshot.postings(term) {
            for doc_id in postings {
                *scores.entry(*doc_id).or_insert(0) += 1;
            }
        }
    }
    scores
}

/// Score descending, then doc id ascending.
pub fn rank(scores: HashMap<DocId, u32>) -> Vec<(DocId, u32)> {
    let mut ranked: Vec<(DocId, u32)> = scores.into_iter().collect();
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

impl Snapshot {
    /// Run a ranked, paginated keyword query against this snapshot.
    ///
    /// `page_number` is 1-based. Pages outside `1..=num_of_pages` come back empty, with the
    /// totals still filled in.
    pub fn search(&self, query: &str, page_size: i64, page_number: i64) -> Result<SearchResult> {
        if page_size < 1 {
            return Err(Error::InvalidPageSize(page_size));
        }
        let page_size = page_size as usize;

        let ranked = rank(score(self, query));
        let relevant_documents_count = ranked.len();
        let num_of_pages = relevant_documents_count.div_ceil(page_size);

        let documents = match page_offset(page_size, page_number) {
            Some(skip) => ranked
                .into_iter()
                .skip(skip)
                .take(page_size)
                .filter_map(|(doc_id, score)| {
                    self.document(doc_id).map(|text| ScoredDocument { score, text: text.to_string() })
                })
                .collect(),
            None => Vec::new(),
        };

        tracing::debug!(query, page_size, page_number, relevant_documents_count, "search");
        Ok(SearchResult { documents, current_page: page_number, num_of_pages, relevant_documents_count })
    }
}

fn page_offset(page_size: usize, page_number: i64) -> Option<usize> {
    if page_number < 1 {
        return None;
    }
    usize::try_from(page_number - 1).ok()?.checked_mul(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IndexConfig, TokenizerVariant};
    use crate::index::Record;

    fn snapshot(texts: &[&str], config: IndexConfig) -> Snapshot {
        let records = texts.iter().enumerate().map(|(i, t)| Record::new(i as DocId, *t));
        Snapshot::build(records, config).unwrap()
    }

    #[test]
    fn ties_break_by_ascending_id() {
        let snap = snapshot(&["x", "y x", "x z", "x"], IndexConfig::default());
        let ranked = rank(score(&snap, "x"));
        assert_eq!(ranked, vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn repeated_query_terms_count_when_keeping_frequency() {
        let config = IndexConfig::new(TokenizerVariant::Simple, true, false);
        let snap = snapshot(&["cat cat", "cat"], config);
        let scores = score(&snap, "cat cat");
        assert_eq!(scores[&0], 4);
        assert_eq!(scores[&1], 2);
    }

    #[test]
    fn rejects_non_positive_page_size() {
        let snap = snapshot(&["cat"], IndexConfig::default());
        assert!(matches!(snap.search("cat", 0, 1), Err(Error::InvalidPageSize(0))));
        assert!(matches!(snap.search("cat", -5, 1), Err(Error::InvalidPageSize(-5))));
    }

    #[test]
    fn non_positive_page_number_is_empty() {
        let snap = snapshot(&["cat", "cat dog"], IndexConfig::default());
        for page in [0, -1, i64::MIN] {
            let res = snap.search("cat", 10, page).unwrap();
            assert!(res.documents.is_empty());
            assert_eq!(res.relevant_documents_count, 2);
            assert_eq!(res.num_of_pages, 1);
            assert_eq!(res.current_page, page);
        }
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let snap = snapshot(&["cat"], IndexConfig::default());
        let res = snap.search("cat", i64::MAX, i64::MAX).unwrap();
        assert!(res.documents.is_empty());
        assert_eq!(res.num_of_pages, 1);
    }

    #[test]
    fn empty_query_matches_nothing() {
        let snap = snapshot(&["cat"], IndexConfig::default());
        let res = snap.search("   ", 10, 1).unwrap();
        assert_eq!(res.relevant_documents_count, 0);
        assert_eq!(res.num_of_pages, 0);
        assert!(res.documents.is_empty());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let snap = snapshot(&["cat"], IndexConfig::default());
        let json = serde_json::to_value(snap.search("cat", 10, 1).unwrap()).unwrap();
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["numOfPages"], 1);
        assert_eq!(json["relevantDocumentsCount"], 1);
        assert_eq!(json["documents"][0]["score"], 1);
        assert_eq!(json["documents"][0]["text"], "cat");
    }
}
