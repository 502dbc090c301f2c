use crate::DocId;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Page size below one.
    #[error("page size must be at least 1, got {0}")]
    InvalidPageSize(i64),
    /// Tokenizer name that does not map to a known variant.
    #[error("unknown tokenizer type: {0:?}")]
    UnknownTokenizer(String),
    /// Query issued before any index was built.
    #[error("no index has been built yet")]
    NoIndex,
    /// The same document id appeared twice in one ingest batch.
    #[error("duplicate document id {0} in ingest batch")]
    DuplicateDocument(DocId),
    /// More records than a `DocId` can number.
    #[error("record number {0} does not fit in a document id")]
    IdOverflow(usize),
    #[error("failed to format build timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("failed to read records: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Errors caused by caller input rather than by engine state.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidPageSize(_)
                | Error::UnknownTokenizer(_)
                | Error::DuplicateDocument(_)
                | Error::IdOverflow(_)
        )
    }
}
