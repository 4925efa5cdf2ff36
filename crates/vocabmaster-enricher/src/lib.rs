mod error;
mod prompt;
mod response;

pub use error::EnrichError;
pub use prompt::{ENRICHMENT_CONTRACT, build_prompt};
pub use response::{SNIPPET_LIMIT, extract_entries};

use vocabmaster_types::VocabularyEntry;

/// Enrichment provider interface
#[async_trait::async_trait]
pub trait Enricher: Send + Sync {
    /// Correct and complete one batch, returning the entries in reply order
    async fn enrich(&self, batch: &[VocabularyEntry]) -> Result<Vec<VocabularyEntry>, EnrichError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    /// Hard deadline for a single `enrich` call, if the provider enforces one
    pub timeout_seconds: Option<u64>,
}
