use std::path::PathBuf;

use kanal::AsyncSender;
use vocabmaster_core::load_vocabulary;
use vocabmaster_types::{AppEvent, Operation};

use super::failed;

pub async fn handle_import(
    path: PathBuf,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let result = tokio::task::spawn_blocking({
        let path = path.clone();
        move || load_vocabulary(&path)
    })
    .await?;

    let event = match result {
        Ok(entries) => {
            tracing::info!("Imported {} words from {}", entries.len(), path.display());
            AppEvent::VocabularyLoaded { path, entries }
        }
        Err(e) => failed(Operation::Import, e.to_string()),
    };

    app_to_ui_tx.send(event).await?;
    Ok(())
}
