use std::fs;
use std::path::{Path, PathBuf};

use vocabmaster_types::{InputFormat, OutputFormat, VocabularyEntry, VocabularyFile};

use crate::VocabError;
use crate::parser::parse_vocabulary_file;

/// Load a `.txt` word list or a `.json` export
pub fn load_vocabulary(path: &Path) -> Result<Vec<VocabularyEntry>, VocabError> {
    match InputFormat::from_path(path) {
        Some(InputFormat::Txt) => parse_vocabulary_file(path),
        Some(InputFormat::Json) => load_vocabulary_json(path),
        None => Err(VocabError::file_format(
            path,
            "unsupported input type (expected .txt or .json)",
        )),
    }
}

pub fn load_vocabulary_json(path: &Path) -> Result<Vec<VocabularyEntry>, VocabError> {
    let data = fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::InvalidData => {
            VocabError::file_format(path, format!("not valid UTF-8 ({source})"))
        }
        _ => VocabError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let file: VocabularyFile = serde_json::from_str(&data).map_err(|source| VocabError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(idx) = file.vocabulary.iter().position(|e| e.word.trim().is_empty()) {
        return Err(VocabError::file_format(
            path,
            format!("entry {} has an empty word", idx + 1),
        ));
    }

    tracing::info!(
        "Loaded {} entries from {}",
        file.vocabulary.len(),
        path.display()
    );
    Ok(file.vocabulary)
}

/// Write to `.json` or `.txt` depending on the extension
pub fn save_vocabulary(entries: &[VocabularyEntry], path: &Path) -> Result<(), VocabError> {
    match OutputFormat::from_path(path) {
        Some(OutputFormat::Json) => save_vocabulary_json(entries, path),
        Some(OutputFormat::Txt) => save_vocabulary_txt(entries, path),
        Some(OutputFormat::Zip) => Err(VocabError::file_format(
            path,
            "archives are written by the theme builder",
        )),
        None => Err(VocabError::file_format(
            path,
            "unsupported output type (expected .json or .txt)",
        )),
    }
}

pub fn save_vocabulary_json(entries: &[VocabularyEntry], path: &Path) -> Result<(), VocabError> {
    let file = VocabularyFile {
        vocabulary: entries.to_vec(),
    };
    let json = serde_json::to_string_pretty(&file).map_err(|source| VocabError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    write_atomic(path, json.as_bytes())?;
    tracing::info!("Saved {} entries to {}", entries.len(), path.display());
    Ok(())
}

pub fn save_vocabulary_txt(entries: &[VocabularyEntry], path: &Path) -> Result<(), VocabError> {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format_txt_line(entry));
        out.push('\n');
    }

    write_atomic(path, out.as_bytes())?;
    tracing::info!("Saved {} entries to {}", entries.len(), path.display());
    Ok(())
}

/// `word | pronunciation | meaning | example_sentence`, skipping empty fields
pub fn format_txt_line(entry: &VocabularyEntry) -> String {
    let optional = [
        entry.pronunciation.as_deref(),
        Some(entry.meaning.as_str()),
        entry.example_sentence.as_deref(),
    ];

    std::iter::once(entry.word.as_str())
        .chain(optional.into_iter().flatten().filter(|f| !f.is_empty()))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn merge_batches(results: Vec<Vec<VocabularyEntry>>) -> Vec<VocabularyEntry> {
    results.into_iter().flatten().collect()
}

/// Write through a sibling temp file so a failed write leaves no truncated output
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), VocabError> {
    let tmp = temp_sibling(path);
    let to_write_error = |source| VocabError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Err(e) = fs::write(&tmp, contents).and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(to_write_error(e));
    }

    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "vocabulary".to_string());
    path.with_file_name(format!(".{name}.partial"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    fn enriched() -> Vec<VocabularyEntry> {
        vec![
            VocabularyEntry::new("cat", "a small feline")
                .with_pronunciation("/kæt/")
                .with_example("The cat sat."),
            VocabularyEntry::new("dog", ""),
            VocabularyEntry::new("owl", "a night bird"),
        ]
    }

    #[test]
    fn test_txt_line_omits_empty_fields() {
        let lines: Vec<_> = enriched().iter().map(format_txt_line).collect();
        assert_eq!(
            lines,
            [
                "cat | /kæt/ | a small feline | The cat sat.",
                "dog",
                "owl | a night bird",
            ]
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.json");

        save_vocabulary(&enriched(), &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"vocabulary\": ["));
        assert!(text.contains("/kæt/"));

        assert_eq!(load_vocabulary(&path).unwrap(), enriched());
        assert!(!dir.path().join(".vocab.json.partial").exists());
    }

    #[test]
    fn test_txt_export_reparses_word_and_meaning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.txt");
        let entries = vec![
            VocabularyEntry::new("dog", ""),
            VocabularyEntry::new("owl", "a night bird"),
            VocabularyEntry::new("gato", "cat"),
        ];

        save_vocabulary(&entries, &path).unwrap();
        assert_eq!(load_vocabulary(&path).unwrap(), entries);
    }

    #[test]
    fn test_txt_export_keeps_enriched_fields_in_meaning() {
        let line = format_txt_line(&enriched()[0]);
        let parsed = parse_str(&line).unwrap();
        assert_eq!(parsed[0].word, "cat");
        assert_eq!(parsed[0].meaning, "/kæt/ | a small feline | The cat sat.");
    }

    #[test]
    fn test_json_without_vocabulary_key_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.json");
        fs::write(&path, r#"{"words": []}"#).unwrap();
        assert!(load_vocabulary(&path).unwrap().is_empty());
    }

    #[test]
    fn test_json_with_empty_word_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"vocabulary": [{"word": "ok"}, {"word": "  "}]}"#).unwrap();
        let err = load_vocabulary(&path).unwrap_err();
        assert!(err.to_string().contains("entry 2"));
    }

    #[test]
    fn test_broken_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"vocabulary\": [").unwrap();
        assert!(matches!(
            load_vocabulary(&path).unwrap_err(),
            VocabError::Json { .. }
        ));
    }

    #[test]
    fn test_unsupported_extensions() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_vocabulary(&dir.path().join("words.csv")).unwrap_err(),
            VocabError::FileFormat { .. }
        ));
        assert!(matches!(
            save_vocabulary(&enriched(), &dir.path().join("out.zip")).unwrap_err(),
            VocabError::FileFormat { .. }
        ));
    }

    #[test]
    fn test_write_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("vocab.json");
        let err = save_vocabulary_json(&enriched(), &path).unwrap_err();
        assert!(matches!(err, VocabError::Write { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_merge_batches_preserves_order() {
        let merged = merge_batches(vec![
            vec![VocabularyEntry::new("a", "")],
            vec![],
            vec![VocabularyEntry::new("b", ""), VocabularyEntry::new("c", "")],
        ]);
        let words: Vec<_> = merged.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, ["a", "b", "c"]);
    }
}
