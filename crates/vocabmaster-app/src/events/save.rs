use std::path::PathBuf;

use kanal::AsyncSender;
use vocabmaster_core::save_vocabulary;
use vocabmaster_types::{AppEvent, Operation, VocabularyEntry};

use super::failed;

pub async fn handle_save(
    entries: Vec<VocabularyEntry>,
    path: PathBuf,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if entries.is_empty() {
        app_to_ui_tx
            .send(failed(Operation::Save, "No vocabulary to save."))
            .await?;
        return Ok(());
    }

    let count = entries.len();
    let result = tokio::task::spawn_blocking({
        let path = path.clone();
        move || save_vocabulary(&entries, &path)
    })
    .await?;

    let event = match result {
        Ok(()) => AppEvent::VocabularySaved { path, count },
        Err(e) => failed(Operation::Save, e.to_string()),
    };

    app_to_ui_tx.send(event).await?;
    Ok(())
}
