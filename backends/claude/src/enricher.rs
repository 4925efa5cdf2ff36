use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use vocabmaster_config::enricher::EnricherConfig;
use vocabmaster_enricher::{EnrichError, Enricher, ProviderMetadata, build_prompt, extract_entries};
use vocabmaster_types::VocabularyEntry;

/// Enriches batches by running the Claude CLI once per batch.
///
/// The prompt goes in as the final argument, the reply is read from stdout.
#[derive(Debug, Clone)]
pub struct ClaudeCliEnricher {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ClaudeCliEnricher {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &EnricherConfig) -> Self {
        Self::new(
            config.program.clone(),
            config.args.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    async fn invoke(&self, prompt: &str) -> Result<String, EnrichError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(result) => result.map_err(|source| EnrichError::Spawn {
                program: self.program.clone(),
                source,
            })?,
            Err(_) => {
                return Err(EnrichError::Timeout {
                    seconds: self.timeout.as_secs().max(1),
                });
            }
        };

        if !output.status.success() {
            return Err(EnrichError::ExternalService {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl Enricher for ClaudeCliEnricher {
    async fn enrich(&self, batch: &[VocabularyEntry]) -> Result<Vec<VocabularyEntry>, EnrichError> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let prompt = build_prompt(batch)?;
        tracing::debug!(
            program = %self.program,
            words = batch.len(),
            prompt_len = prompt.len(),
            "Invoking enrichment command"
        );

        let stdout = self.invoke(&prompt).await?;
        let entries = extract_entries(&stdout)?;

        if entries.len() != batch.len() {
            tracing::warn!(
                sent = batch.len(),
                received = entries.len(),
                "Reply entry count differs from batch size"
            );
        }

        Ok(entries)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "claude-cli".to_string(),
            timeout_seconds: Some(self.timeout.as_secs()),
        }
    }
}
