use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use vocabmaster_types::{AppEvent, Operation};

use crate::state::AppState;

pub mod build_archive;
pub mod enrich;
pub mod import;
pub mod save;

use build_archive::handle_build_archive;
use enrich::start_enrichment;
use import::handle_import;
use save::handle_save;

/// Backend loop. Runs until `Shutdown`, cancellation, or the request channel closes.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting, waiting for requests");
    app_to_ui_tx.send(AppEvent::BackendReady).await?;

    let result = loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break Ok(());
            }
            event = ui_to_app_rx.recv() => match event {
                Ok(event) => event,
                Err(e) => break Err(e.into()),
            },
        };

        tracing::debug!("[EVENT_LOOP] Received {}", event_name(&event));
        match handle_events(&state, &app_to_ui_tx, &cancel, event).await {
            Ok(true) => {}
            Ok(false) => break Ok(()),
            Err(e) => break Err(e),
        }
    };

    if let Some(token) = state.enrichment_cancel.lock().await.take() {
        token.cancel();
    }

    result
}

/// Returns `false` once the loop should stop
async fn handle_events(
    state: &Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    cancel: &CancellationToken,
    event: AppEvent,
) -> anyhow::Result<bool> {
    match event {
        AppEvent::ImportFile(path) => {
            handle_import(path, app_to_ui_tx).await?;
        }
        AppEvent::StartEnrichment {
            entries,
            batch_size,
        } => {
            start_enrichment(state.clone(), entries, batch_size, app_to_ui_tx, cancel).await?;
        }
        AppEvent::CancelEnrichment => match state.enrichment_cancel.lock().await.as_ref() {
            Some(token) => {
                tracing::info!("Cancelling enrichment after the current batch");
                token.cancel();
            }
            None => tracing::warn!("Cancel requested but no enrichment is running"),
        },
        AppEvent::SaveVocabulary { entries, path } => {
            handle_save(entries, path, app_to_ui_tx).await?;
        }
        AppEvent::BuildArchive(request) => {
            handle_build_archive(state, request, app_to_ui_tx).await?;
        }
        AppEvent::Shutdown => {
            tracing::info!("[EVENT_LOOP] Shutdown requested");
            return Ok(false);
        }
        AppEvent::BackendReady
        | AppEvent::VocabularyLoaded { .. }
        | AppEvent::EnrichmentStarted { .. }
        | AppEvent::EnrichmentProgress { .. }
        | AppEvent::EnrichmentFinished(_)
        | AppEvent::VocabularySaved { .. }
        | AppEvent::ArchiveBuilt { .. }
        | AppEvent::OperationFailed { .. } => {
            // UI-only event, ignore in backend
        }
    }

    Ok(true)
}

pub(crate) fn failed(operation: Operation, message: impl Into<String>) -> AppEvent {
    let message = message.into();
    tracing::error!(%operation, "{message}");
    AppEvent::OperationFailed { operation, message }
}

fn event_name(event: &AppEvent) -> &'static str {
    match event {
        AppEvent::ImportFile(_) => "ImportFile",
        AppEvent::StartEnrichment { .. } => "StartEnrichment",
        AppEvent::CancelEnrichment => "CancelEnrichment",
        AppEvent::SaveVocabulary { .. } => "SaveVocabulary",
        AppEvent::BuildArchive(_) => "BuildArchive",
        AppEvent::Shutdown => "Shutdown",
        AppEvent::BackendReady => "BackendReady",
        AppEvent::VocabularyLoaded { .. } => "VocabularyLoaded",
        AppEvent::EnrichmentStarted { .. } => "EnrichmentStarted",
        AppEvent::EnrichmentProgress { .. } => "EnrichmentProgress",
        AppEvent::EnrichmentFinished(_) => "EnrichmentFinished",
        AppEvent::VocabularySaved { .. } => "VocabularySaved",
        AppEvent::ArchiveBuilt { .. } => "ArchiveBuilt",
        AppEvent::OperationFailed { .. } => "OperationFailed",
    }
}
