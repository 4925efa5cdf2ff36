use std::path::PathBuf;

use vocabmaster_enricher::EnrichError;

#[derive(Debug, thiserror::Error)]
pub enum VocabError {
    #[error("Invalid vocabulary file {}: {reason}", path.display())]
    FileFormat { path: PathBuf, reason: String },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid vocabulary JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Enrichment(#[from] EnrichError),

    #[error("Enrichment cancelled after {completed} of {total} batches")]
    Cancelled { completed: usize, total: usize },
}

impl VocabError {
    pub(crate) fn file_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        VocabError::FileFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
