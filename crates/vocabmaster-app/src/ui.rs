use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::bail;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::signal;
use vocabmaster_types::{AppEvent, ArchiveRequest, VocabularyEntry};

use crate::status::RunStatus;

/// Foreground side of the app.
///
/// Owns the vocabulary between operations and talks to the backend only
/// through the channels. Each call sends one request and waits for its outcome.
pub struct Session {
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    imported: Vec<VocabularyEntry>,
    processed: Option<Vec<VocabularyEntry>>,
}

impl Session {
    pub fn new(app_to_ui_rx: AsyncReceiver<AppEvent>, ui_to_app_tx: AsyncSender<AppEvent>) -> Self {
        Self {
            app_to_ui_rx,
            ui_to_app_tx,
            imported: Vec::new(),
            processed: None,
        }
    }

    /// Enriched entries when a run finished, otherwise the imported ones
    pub fn entries(&self) -> &[VocabularyEntry] {
        self.processed.as_deref().unwrap_or(&self.imported)
    }

    pub fn is_processed(&self) -> bool {
        self.processed.is_some()
    }

    pub async fn wait_ready(&self) -> anyhow::Result<()> {
        loop {
            if let AppEvent::BackendReady = self.app_to_ui_rx.recv().await? {
                return Ok(());
            }
        }
    }

    pub async fn import(&mut self, path: &Path) -> anyhow::Result<&[VocabularyEntry]> {
        self.ui_to_app_tx
            .send(AppEvent::ImportFile(path.to_path_buf()))
            .await?;

        loop {
            match self.app_to_ui_rx.recv().await? {
                AppEvent::VocabularyLoaded { path, entries } => {
                    println!("Loaded {} words from {}", entries.len(), path.display());
                    self.imported = entries;
                    self.processed = None;
                    return Ok(self.imported.as_slice());
                }
                AppEvent::OperationFailed { operation, message } => {
                    bail!("{operation} failed: {message}")
                }
                other => ignore(&other),
            }
        }
    }

    /// Enrich the current vocabulary; Ctrl+C cancels after the batch in flight
    pub async fn enrich(&mut self, batch_size: usize) -> anyhow::Result<&[VocabularyEntry]> {
        self.enrich_until(batch_size, async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::warn!("Ctrl+C handler unavailable: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Like [`Session::enrich`], with `interrupt` standing in for Ctrl+C
    pub async fn enrich_until(
        &mut self,
        batch_size: usize,
        interrupt: impl Future<Output = ()>,
    ) -> anyhow::Result<&[VocabularyEntry]> {
        self.ui_to_app_tx
            .send(AppEvent::StartEnrichment {
                entries: self.entries().to_vec(),
                batch_size,
            })
            .await?;

        tokio::pin!(interrupt);
        let mut interrupted = false;
        let mut status = RunStatus::default();

        loop {
            let event = tokio::select! {
                _ = &mut interrupt, if !interrupted => {
                    interrupted = true;
                    println!("Cancelling after the current batch...");
                    self.ui_to_app_tx.send(AppEvent::CancelEnrichment).await?;
                    continue;
                }
                event = self.app_to_ui_rx.recv() => event?,
            };

            match event {
                AppEvent::EnrichmentStarted { words, batches } => {
                    println!("Processing {words} words in {batches} batches...");
                    status = RunStatus::start(words, batches);
                }
                AppEvent::EnrichmentProgress { completed, total } => {
                    if status.advance(completed, total) {
                        let bar = status.progress_bar(20);
                        println!("{bar} Batch {completed}/{total} completed.");
                    }
                }
                AppEvent::EnrichmentFinished(entries) => {
                    println!(
                        "All batches completed. {} words ready. ({:.1}s)",
                        entries.len(),
                        status.elapsed_secs()
                    );
                    let entries: &[VocabularyEntry] = self.processed.insert(entries);
                    return Ok(entries);
                }
                AppEvent::OperationFailed { operation, message } => {
                    bail!("{operation} failed: {message}")
                }
                other => ignore(&other),
            }
        }
    }

    pub async fn save(&self, path: &Path) -> anyhow::Result<PathBuf> {
        self.ui_to_app_tx
            .send(AppEvent::SaveVocabulary {
                entries: self.entries().to_vec(),
                path: path.to_path_buf(),
            })
            .await?;

        loop {
            match self.app_to_ui_rx.recv().await? {
                AppEvent::VocabularySaved { path, count } => {
                    println!("Saved {count} words to {}", path.display());
                    return Ok(path);
                }
                AppEvent::OperationFailed { operation, message } => {
                    bail!("{operation} failed: {message}")
                }
                other => ignore(&other),
            }
        }
    }

    pub async fn build_archive(
        &self,
        theme: &str,
        custom_theme: Option<PathBuf>,
        output: &Path,
    ) -> anyhow::Result<PathBuf> {
        self.ui_to_app_tx
            .send(AppEvent::BuildArchive(ArchiveRequest {
                theme: theme.to_string(),
                custom_theme,
                entries: self.entries().to_vec(),
                output: output.to_path_buf(),
            }))
            .await?;

        loop {
            match self.app_to_ui_rx.recv().await? {
                AppEvent::ArchiveBuilt {
                    path,
                    word_count,
                    asset_count,
                } => {
                    println!(
                        "Theme package built: {} ({word_count} words, {asset_count} assets)",
                        path.display()
                    );
                    return Ok(path);
                }
                AppEvent::OperationFailed { operation, message } => {
                    bail!("{operation} failed: {message}")
                }
                other => ignore(&other),
            }
        }
    }

    pub async fn shutdown(&self) -> anyhow::Result<()> {
        self.ui_to_app_tx.send(AppEvent::Shutdown).await?;
        Ok(())
    }

    /// Word/meaning table of the current vocabulary
    pub fn print_preview(&self, limit: usize) {
        let entries = self.entries();
        let width = entries
            .iter()
            .take(limit)
            .map(|e| e.word.chars().count())
            .max()
            .unwrap_or(4)
            .max(4);

        println!("{:<width$}  Meaning", "Word");
        for entry in entries.iter().take(limit) {
            println!("{:<width$}  {}", entry.word, entry.meaning);
        }
        if entries.len() > limit {
            println!("... and {} more", entries.len() - limit);
        }
    }

    /// Full table including enrichment fields
    pub fn print_results(&self) {
        for (idx, entry) in self.entries().iter().enumerate() {
            println!("{:>4}. {}", idx + 1, entry.word);
            if let Some(pronunciation) = &entry.pronunciation {
                println!("      {pronunciation}");
            }
            if !entry.meaning.is_empty() {
                println!("      {}", entry.meaning);
            }
            if let Some(sentence) = &entry.example_sentence {
                println!("      \"{sentence}\"");
            }
        }
    }
}

fn ignore(event: &AppEvent) {
    tracing::debug!("Session ignoring {:?}", std::mem::discriminant(event));
}
