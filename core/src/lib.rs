//! In-memory inverted index with term-overlap scoring and pagination.

pub mod config;
pub mod error;
mod index;
pub mod records;
pub mod search;
pub mod stemmer;
pub mod store;
pub mod tokenizer;

pub use config::{IndexConfig, TokenizerVariant};
pub use error::{Error, Result};
pub use index::{DocId, DocumentStore, IndexStats, InvertedIndex, Record, Snapshot};
pub use search::{ScoredDocument, SearchResult};
pub use store::IndexStore;
