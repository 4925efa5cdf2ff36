use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use vocabmaster_enricher::Enricher;
use vocabmaster_types::{Batch, VocabularyEntry};

use crate::VocabError;
use crate::store::merge_batches;

/// Receives `(completed, total)` after every successful batch
pub trait ProgressObserver: Send + Sync {
    fn on_batch_complete(&self, completed: usize, total: usize);
}

impl<F> ProgressObserver for F
where
    F: Fn(usize, usize) + Send + Sync,
{
    fn on_batch_complete(&self, completed: usize, total: usize) {
        self(completed, total)
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub words_in: usize,
    pub words_out: usize,
    pub batches: usize,
    pub elapsed: Duration,
}

/// Drives batches through an [`Enricher`] one at a time, in order.
///
/// The first failing batch aborts the run and nothing accumulated so far is
/// returned. Cancellation is checked between batches only.
pub struct EnrichmentPipeline {
    enricher: Arc<dyn Enricher>,
    cancel: Option<CancellationToken>,
}

impl EnrichmentPipeline {
    pub fn new(enricher: Arc<dyn Enricher>) -> Self {
        Self {
            enricher,
            cancel: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub async fn run(
        &self,
        batches: &[Batch],
        observer: Option<&dyn ProgressObserver>,
    ) -> Result<Vec<VocabularyEntry>, VocabError> {
        let total = batches.len();
        let words_in: usize = batches.iter().map(Vec::len).sum();
        let started = Instant::now();
        let provider = self.enricher.metadata().name;

        tracing::info!(
            provider = %provider,
            words = words_in,
            batches = total,
            "Enrichment run started"
        );

        let mut results = Vec::with_capacity(total);
        for (idx, batch) in batches.iter().enumerate() {
            if let Some(token) = &self.cancel
                && token.is_cancelled()
            {
                tracing::warn!(completed = idx, total, "Enrichment run cancelled");
                return Err(VocabError::Cancelled {
                    completed: idx,
                    total,
                });
            }

            tracing::debug!(batch = idx + 1, total, size = batch.len(), "Sending batch");
            let enriched = self.enricher.enrich(batch).await.inspect_err(|e| {
                tracing::error!(batch = idx + 1, total, "Batch failed: {e}");
            })?;

            if enriched.is_empty() && !batch.is_empty() {
                tracing::warn!(batch = idx + 1, "Enricher returned no entries for batch");
            }

            results.push(enriched);
            if let Some(observer) = observer {
                observer.on_batch_complete(idx + 1, total);
            }
        }

        let results = merge_batches(results);
        let summary = RunSummary {
            words_in,
            words_out: results.len(),
            batches: total,
            elapsed: started.elapsed(),
        };
        tracing::info!(
            words_in = summary.words_in,
            words_out = summary.words_out,
            batches = summary.batches,
            "Enrichment run finished in {:.1}s",
            summary.elapsed.as_secs_f64()
        );

        Ok(results)
    }
}
