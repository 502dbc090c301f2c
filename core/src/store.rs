use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::index::{IndexStats, Record, Snapshot};
use crate::search::SearchResult;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Holds the one active [`Snapshot`].
///
/// Readers clone the `Arc` under a short read lock and never see a half-built index. Rebuilds
/// are serialized by `build_lock` and publish with a single pointer swap.
#[derive(Default)]
pub struct IndexStore {
    active: RwLock<Option<Arc<Snapshot>>>,
    build_lock: Mutex<()>,
}

impl IndexStore {
    pub fn new() -> Self { Self::default() }

    /// Build a new snapshot and make it active. On error the previous snapshot stays in place.
    pub fn rebuild<I>(&self, records: I, config: IndexConfig) -> Result<Arc<Snapshot>>
    where
        I: IntoIterator<Item = Record>,
    {
        let _guard = self.build_lock.lock();
        let snapshot = match Snapshot::build(records, config) {
            Ok(s) => Arc::new(s),
            Err(e) => {
                tracing::warn!(error = %e, "index rebuild rejected");
                return Err(e);
            }
        };
        *self.active.write() = Some(Arc::clone(&snapshot));
        tracing::info!(
            num_docs = snapshot.num_docs(),
            num_terms = snapshot.num_terms(),
            tokenizer = %config.tokenizer,
            keep_frequency = config.keep_frequency,
            use_stemming = config.use_stemming,
            "index rebuilt"
        );
        Ok(snapshot)
    }

    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        self.active.read().clone().ok_or(Error::NoIndex)
    }

    pub fn is_built(&self) -> bool { self.active.read().is_some() }

    /// Search the snapshot that is active when the call starts.
    pub fn search(&self, query: &str, page_size: i64, page_number: i64) -> Result<SearchResult> {
        if page_size < 1 {
            return Err(Error::InvalidPageSize(page_size));
        }
        self.snapshot()?.search(query, page_size, page_number)
    }

    pub fn stats(&self) -> Result<IndexStats> {
        Ok(self.snapshot()?.stats())
    }
}
