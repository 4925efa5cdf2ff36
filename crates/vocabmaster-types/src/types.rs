use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One vocabulary record.
///
/// `pronunciation` and `example_sentence` are only filled in after enrichment
/// and are left out of the JSON form while absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_sentence: Option<String>,
}

impl VocabularyEntry {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            ..Self::default()
        }
    }

    pub fn with_pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.pronunciation = Some(pronunciation.into());
        self
    }

    pub fn with_example(mut self, sentence: impl Into<String>) -> Self {
        self.example_sentence = Some(sentence.into());
        self
    }

    /// True once the entry carries anything beyond word and meaning
    pub fn is_enriched(&self) -> bool {
        self.pronunciation.is_some() || self.example_sentence.is_some()
    }
}

/// Contiguous slice of the vocabulary sent to the enricher in one call
pub type Batch = Vec<VocabularyEntry>;

/// Wrapped shape used by `.json` exports and `vocabulary.json` inside archives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyFile {
    #[serde(default)]
    pub vocabulary: Vec<VocabularyEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Txt,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match extension(path)?.as_str() {
            "txt" => Some(Self::Txt),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Txt,
    Zip,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match extension(path)?.as_str() {
            "json" => Some(Self::Json),
            "txt" => Some(Self::Txt),
            "zip" => Some(Self::Zip),
            _ => None,
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Everything the backend needs to package one archive
#[derive(Debug, Clone)]
pub struct ArchiveRequest {
    pub theme: String,
    /// JSON file holding a custom descriptor; overrides the built-in lookup
    pub custom_theme: Option<PathBuf>,
    pub entries: Vec<VocabularyEntry>,
    pub output: PathBuf,
}

/// Operation a failure report refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Import,
    Enrichment,
    Save,
    Archive,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Import => "import",
            Operation::Enrichment => "enrichment",
            Operation::Save => "save",
            Operation::Archive => "archive",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    // Foreground -> backend
    ImportFile(PathBuf),
    StartEnrichment {
        entries: Vec<VocabularyEntry>,
        batch_size: usize,
    },
    CancelEnrichment,
    SaveVocabulary {
        entries: Vec<VocabularyEntry>,
        path: PathBuf,
    },
    BuildArchive(ArchiveRequest),
    Shutdown,

    // Backend -> foreground
    BackendReady,
    VocabularyLoaded {
        path: PathBuf,
        entries: Vec<VocabularyEntry>,
    },
    EnrichmentStarted {
        words: usize,
        batches: usize,
    },
    EnrichmentProgress {
        completed: usize,
        total: usize,
    },
    EnrichmentFinished(Vec<VocabularyEntry>),
    VocabularySaved {
        path: PathBuf,
        count: usize,
    },
    ArchiveBuilt {
        path: PathBuf,
        word_count: usize,
        asset_count: usize,
    },
    OperationFailed {
        operation: Operation,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_entry_omits_enrichment_fields() {
        let entry = VocabularyEntry::new("cat", "a small domesticated feline");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"word":"cat","meaning":"a small domesticated feline"}"#);
    }

    #[test]
    fn test_enriched_entry_field_order() {
        let entry = VocabularyEntry::new("cat", "feline")
            .with_pronunciation("/kæt/")
            .with_example("The cat slept.");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"word":"cat","pronunciation":"/kæt/","meaning":"feline","example_sentence":"The cat slept."}"#
        );
        assert!(entry.is_enriched());
    }

    #[test]
    fn test_missing_meaning_defaults_to_empty() {
        let entry: VocabularyEntry = serde_json::from_str(r#"{"word":"dog","extra":1}"#).unwrap();
        assert_eq!(entry, VocabularyEntry::new("dog", ""));
    }

    #[test]
    fn test_vocabulary_file_without_key_is_empty() {
        let file: VocabularyFile = serde_json::from_str("{}").unwrap();
        assert!(file.vocabulary.is_empty());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("out.ZIP")), Some(OutputFormat::Zip));
        assert_eq!(InputFormat::from_path(Path::new("words.txt")), Some(InputFormat::Txt));
        assert_eq!(InputFormat::from_path(Path::new("words.zip")), None);
        assert_eq!(OutputFormat::from_path(Path::new("noext")), None);
    }
}
