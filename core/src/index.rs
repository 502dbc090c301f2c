use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::tokenizer::analyze;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub type DocId = u32;

/// One ingest record. The id is caller supplied and must be unique within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: DocId,
    pub text: String,
}

impl Record {
    pub fn new(id: DocId, text: impl Into<String>) -> Self {
        Self { id, text: text.into() }
    }
}

/// term -> doc ids, one entry per qualifying occurrence, in ingestion order.
pub type InvertedIndex = HashMap<String, Vec<DocId>>;
pub type DocumentStore = HashMap<DocId, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub documents: usize,
    pub terms: usize,
    pub postings: usize,
    pub config: IndexConfig,
    pub built_at: String,
}

/// One generation of the index: postings, document texts, and the config both were built with.
///
/// Never mutated after [`Snapshot::build`] returns.
#[derive(Debug)]
pub struct Snapshot {
    index: InvertedIndex,
    documents: DocumentStore,
    config: IndexConfig,
    /// RFC 3339, captured when the build finished.
    built_at: String,
}

impl Snapshot {
    /// Build a snapshot from a batch of records.
    ///
    /// Rejects the whole batch if an id repeats. An empty batch yields an empty snapshot.
    pub fn build<I>(records: I, config: IndexConfig) -> Result<Self>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut index: InvertedIndex = HashMap::new();
        let mut documents: DocumentStore = HashMap::new();

        for record in records {
            if documents.contains_key(&record.id) {
                return Err(Error::DuplicateDocument(record.id));
            }
            for term in analyze(&record.text, &config) {
                index.entry(term).or_default().push(record.id);
            }
            documents.insert(record.id, record.text);
        }

        let built_at = OffsetDateTime::now_utc().format(&Rfc3339)?;
        Ok(Self { index, documents, config, built_at })
    }

    pub fn config(&self) -> &IndexConfig { &self.config }

    pub fn postings(&self, term: &str) -> Option<&[DocId]> {
        self.index.get(term).map(Vec::as_slice)
    }

    pub fn document(&self, id: DocId) -> Option<&str> {
        self.documents.get(&id).map(String::as_str)
    }

    pub fn num_docs(&self) -> usize { self.documents.len() }

    pub fn num_terms(&self) -> usize { self.index.len() }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &[DocId])> {
        self.index.iter().map(|(t, p)| (t.as_str(), p.as_slice()))
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.num_docs(),
            terms: self.num_terms(),
            postings: self.index.values().map(Vec::len).sum(),
            config: self.config,
            built_at: self.built_at.clone(),
        }
    }
}
