use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;
use vocabmaster_config::batch::clamp_batch_size;
use vocabmaster_core::{EnrichmentPipeline, divide_into_batches};
use vocabmaster_types::{AppEvent, Batch, Operation, VocabularyEntry};

use super::failed;
use crate::state::AppState;

/// Start a background enrichment run. At most one run is in flight.
pub async fn start_enrichment(
    state: Arc<AppState>,
    entries: Vec<VocabularyEntry>,
    batch_size: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    parent: &CancellationToken,
) -> anyhow::Result<()> {
    if entries.is_empty() {
        app_to_ui_tx
            .send(failed(
                Operation::Enrichment,
                "No vocabulary to enrich. Import a file first.",
            ))
            .await?;
        return Ok(());
    }

    // Don't start again if already running
    if state.enrichment_running.swap(true, Ordering::SeqCst) {
        app_to_ui_tx
            .send(failed(
                Operation::Enrichment,
                "An enrichment run is already in progress.",
            ))
            .await?;
        return Ok(());
    }

    let size = clamp_batch_size(batch_size);
    if size != batch_size {
        tracing::warn!(requested = batch_size, used = size, "Batch size out of range");
    }
    let size = NonZeroUsize::new(size).unwrap_or(NonZeroUsize::MIN);
    let batches = divide_into_batches(&entries, size);

    let token = parent.child_token();
    *state.enrichment_cancel.lock().await = Some(token.clone());

    let tx = app_to_ui_tx.clone();
    tokio::spawn(async move {
        let outcome = run_enrichment(&state, &batches, token, &tx).await;

        // Release the guard before reporting so the next start is accepted
        state.enrichment_cancel.lock().await.take();
        state.enrichment_running.store(false, Ordering::SeqCst);

        if let Err(e) = tx.send(outcome).await {
            tracing::error!("Failed to deliver enrichment result: {e}");
        }
    });

    Ok(())
}

async fn run_enrichment(
    state: &AppState,
    batches: &[Batch],
    token: CancellationToken,
    tx: &AsyncSender<AppEvent>,
) -> AppEvent {
    let words = batches.iter().map(Vec::len).sum();
    let started = AppEvent::EnrichmentStarted {
        words,
        batches: batches.len(),
    };
    if let Err(e) = tx.send(started).await {
        tracing::error!("Failed to announce enrichment run: {e}");
    }

    let progress_tx = tx.clone();
    let observer = move |completed: usize, total: usize| {
        match progress_tx.try_send(AppEvent::EnrichmentProgress { completed, total }) {
            Ok(true) => {}
            Ok(false) => tracing::warn!(completed, total, "UI channel full, progress dropped"),
            Err(e) => tracing::warn!("Progress not delivered: {e}"),
        }
    };

    let pipeline = EnrichmentPipeline::new(state.enricher.clone()).with_cancellation(token);
    match pipeline.run(batches, Some(&observer)).await {
        Ok(entries) => AppEvent::EnrichmentFinished(entries),
        Err(e) => failed(Operation::Enrichment, e.to_string()),
    }
}
