#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("Enrichment service failed ({status}): {stderr}")]
    ExternalService { status: String, stderr: String },

    #[error("Enrichment service timed out ({seconds}s). Try a smaller batch size.")]
    Timeout { seconds: u64 },

    #[error("Failed to parse enrichment response: {reason}\nResponse: {snippet}")]
    MalformedResponse { reason: String, snippet: String },

    #[error("Failed to start enrichment service `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize batch: {0}")]
    Payload(#[from] serde_json::Error),
}

