use std::fs;
use std::path::Path;

use vocabmaster_types::VocabularyEntry;

use crate::VocabError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: missing word before the separator")]
    MissingWord { line: usize },
}

/// Parse a line-oriented vocabulary file.
///
/// Accepted per line: `word | meaning`, `word<TAB>meaning`, or a bare `word`.
/// Blank lines and `#` comments are skipped. The file must be UTF-8; a decode
/// failure rejects the whole file.
pub fn parse_vocabulary_file(path: &Path) -> Result<Vec<VocabularyEntry>, VocabError> {
    let bytes = fs::read(path).map_err(|source| VocabError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let text = String::from_utf8(bytes)
        .map_err(|e| VocabError::file_format(path, format!("not valid UTF-8 ({e})")))?;

    let entries = parse_str(&text).map_err(|e| VocabError::file_format(path, e.to_string()))?;
    tracing::info!("Parsed {} entries from {}", entries.len(), path.display());

    Ok(entries)
}

pub fn parse_str(text: &str) -> Result<Vec<VocabularyEntry>, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut entries = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (word, meaning) = split_line(line);
        if word.is_empty() {
            return Err(ParseError::MissingWord { line: idx + 1 });
        }

        entries.push(VocabularyEntry::new(word, meaning));
    }

    Ok(entries)
}

/// Split on the first `|`, else the first tab, else the whole line is the word
fn split_line(line: &str) -> (&str, &str) {
    let separator = if line.contains('|') { '|' } else { '\t' };

    match line.split_once(separator) {
        Some((word, meaning)) => (word.trim(), meaning.trim()),
        None => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_mixed_grammar_with_comment() {
        let entries = parse_str("cat | a small domesticated feline\ndog\n# comment\n").unwrap();
        assert_eq!(
            entries,
            vec![
                VocabularyEntry::new("cat", "a small domesticated feline"),
                VocabularyEntry::new("dog", ""),
            ]
        );
    }

    #[test]
    fn test_pipe_splits_on_first_occurrence() {
        let entries = parse_str("or | either | alternatively").unwrap();
        assert_eq!(entries[0].word, "or");
        assert_eq!(entries[0].meaning, "either | alternatively");
    }

    #[test]
    fn test_pipe_wins_over_tab() {
        let entries = parse_str("run\tto move | quickly").unwrap();
        assert_eq!(entries[0].word, "run\tto move");
        assert_eq!(entries[0].meaning, "quickly");
    }

    #[test]
    fn test_tab_separated() {
        let entries = parse_str("gato\tcat\nperro \t dog ").unwrap();
        assert_eq!(entries[0], VocabularyEntry::new("gato", "cat"));
        assert_eq!(entries[1], VocabularyEntry::new("perro", "dog"));
    }

    #[test]
    fn test_separator_without_meaning() {
        let entries = parse_str("lonely |").unwrap();
        assert_eq!(entries[0], VocabularyEntry::new("lonely", ""));
    }

    #[test]
    fn test_indented_comment_and_crlf() {
        let entries = parse_str("   # note\r\nalpha | first\r\n\r\n\tbeta\r\n").unwrap();
        assert_eq!(
            entries,
            vec![
                VocabularyEntry::new("alpha", "first"),
                VocabularyEntry::new("beta", ""),
            ]
        );
    }

    #[test]
    fn test_duplicates_preserved_in_order() {
        let entries = parse_str("b\na\nb").unwrap();
        let words: Vec<_> = entries.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, ["b", "a", "b"]);
    }

    #[test]
    fn test_entry_count_matches_content_lines() {
        let text = "one\n\n# skip\ntwo | 2\n   \nthree\tthree\n#four\nfive";
        let content_lines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .count();
        assert_eq!(parse_str(text).unwrap().len(), content_lines);
    }

    #[test]
    fn test_missing_word_reports_line() {
        let err = parse_str("ok\n\n| orphan meaning").unwrap_err();
        assert_eq!(err, ParseError::MissingWord { line: 3 });
    }

    #[test]
    fn test_byte_order_mark_ignored() {
        let entries = parse_str("\u{feff}# header\nword").unwrap();
        assert_eq!(entries, vec![VocabularyEntry::new("word", "")]);
    }

    #[test]
    fn test_file_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "café | coffee shop\nnaïve\n").unwrap();

        let entries = parse_vocabulary_file(file.path()).unwrap();
        assert_eq!(entries[0], VocabularyEntry::new("café", "coffee shop"));
        assert_eq!(entries[1], VocabularyEntry::new("naïve", ""));
    }

    #[test]
    fn test_invalid_utf8_rejects_whole_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"good | fine\nbad \xff\xfe line\n").unwrap();

        let err = parse_vocabulary_file(file.path()).unwrap_err();
        assert!(matches!(err, VocabError::FileFormat { .. }));
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_vocabulary_file(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, VocabError::Io { .. }));
    }
}
