use std::path::{Path, PathBuf};
use std::sync::Arc;

use kanal::AsyncSender;
use vocabmaster_theme::{ArchiveSummary, ThemeDescriptor, ThemeError, build_theme_zip};
use vocabmaster_types::{AppEvent, ArchiveRequest, Operation};

use super::failed;
use crate::state::AppState;

pub async fn handle_build_archive(
    state: &Arc<AppState>,
    request: ArchiveRequest,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if request.entries.is_empty() {
        app_to_ui_tx
            .send(failed(
                Operation::Archive,
                "No vocabulary to package. Import or process first.",
            ))
            .await?;
        return Ok(());
    }

    let assets_root = {
        let config = state.config.read().await;
        PathBuf::from(&config.theme.assets_dir)
    };

    let result = tokio::task::spawn_blocking(move || build(&request, &assets_root)).await?;

    let event = match result {
        Ok(summary) => AppEvent::ArchiveBuilt {
            path: summary.path,
            word_count: summary.word_count,
            asset_count: summary.asset_count,
        },
        Err(e) => failed(Operation::Archive, e.to_string()),
    };

    app_to_ui_tx.send(event).await?;
    Ok(())
}

fn build(request: &ArchiveRequest, assets_root: &Path) -> Result<ArchiveSummary, ThemeError> {
    let custom = request
        .custom_theme
        .as_deref()
        .map(ThemeDescriptor::from_file)
        .transpose()?;

    build_theme_zip(
        &request.theme,
        &request.entries,
        &request.output,
        custom.as_ref(),
        assets_root,
    )
}
