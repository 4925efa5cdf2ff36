use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use vocabmaster_types::VocabularyEntry;

use crate::EnrichError;

/// Max characters of raw output kept in a `MalformedResponse`
pub const SNIPPET_LIMIT: usize = 500;

static GREEDY_ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("valid array regex"));

#[derive(Debug, Deserialize)]
struct ReplyEntry {
    word: String,
    #[serde(default)]
    pronunciation: Option<String>,
    #[serde(default)]
    meaning: Option<String>,
    #[serde(default)]
    example_sentence: Option<String>,
}

impl ReplyEntry {
    fn into_entry(self, index: usize) -> Result<VocabularyEntry, String> {
        let word = self.word.trim();
        if word.is_empty() {
            return Err(format!("entry {} has an empty word", index + 1));
        }

        Ok(VocabularyEntry {
            word: word.to_string(),
            pronunciation: non_empty(self.pronunciation),
            meaning: self.meaning.unwrap_or_default().trim().to_string(),
            example_sentence: non_empty(self.example_sentence),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Pull the entry array out of a free-form reply.
///
/// Candidates, first match wins: the whole reply when it opens with `[`,
/// then every top-level `[...]` span from last to first, then the span from
/// the first `[` to the last `]`. An empty array only wins when no candidate
/// with entries parses.
pub fn extract_entries(output: &str) -> Result<Vec<VocabularyEntry>, EnrichError> {
    let trimmed = output.trim();
    let mut empty_reply = false;

    if trimmed.starts_with('[')
        && let Ok(entries) = parse_entries(trimmed)
    {
        if !entries.is_empty() {
            return Ok(entries);
        }
        empty_reply = true;
    }

    for span in top_level_arrays(trimmed).into_iter().rev() {
        match parse_entries(span) {
            Ok(entries) if !entries.is_empty() => {
                tracing::debug!(span_len = span.len(), "Extracted entry array from reply");
                return Ok(entries);
            }
            Ok(_) => empty_reply = true,
            Err(_) => {}
        }
    }

    let Some(found) = GREEDY_ARRAY_RE.find(trimmed) else {
        return Err(malformed(
            "could not find a JSON array in the response".to_string(),
            output,
        ));
    };

    match parse_entries(found.as_str()) {
        Ok(entries) => Ok(entries),
        Err(_) if empty_reply => Ok(Vec::new()),
        Err(reason) => Err(malformed(reason, output)),
    }
}

fn parse_entries(candidate: &str) -> Result<Vec<VocabularyEntry>, String> {
    let replies: Vec<ReplyEntry> = serde_json::from_str(candidate).map_err(|e| e.to_string())?;
    replies
        .into_iter()
        .enumerate()
        .map(|(idx, reply)| reply.into_entry(idx))
        .collect()
}

/// Balanced `[...]` spans at nesting depth zero. Quotes only count inside a span.
fn top_level_arrays(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '[' => {
                if depth == 0 {
                    start = idx;
                }
                depth += 1;
            }
            ']' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    spans.push(&text[start..=idx]);
                }
            }
            '"' if depth > 0 => in_string = true,
            _ => {}
        }
    }

    spans
}

fn malformed(reason: String, output: &str) -> EnrichError {
    EnrichError::MalformedResponse {
        reason,
        snippet: output.chars().take(SNIPPET_LIMIT).collect(),
    }
}
