use serde::Serialize;
use vocabmaster_types::VocabularyEntry;

use crate::EnrichError;

/// Instruction text sent with every batch; `{vocabulary_json}` is replaced by the batch
pub const ENRICHMENT_CONTRACT: &str = r#"You are a vocabulary checker and enricher. You will receive vocabulary entries as a JSON array. For every entry:

1. Fix any spelling mistake in the word
2. Check the meaning for accuracy and grammar and correct it where needed
3. If the meaning is empty, write a clear, concise definition
4. Add one natural example sentence that shows how the word is used
5. Add the pronunciation in IPA if possible

Reply with ONLY a valid JSON array (no markdown, no commentary) of the corrected entries, shaped exactly like this:
[
  {
    "word": "corrected_word",
    "pronunciation": "/IPA/",
    "meaning": "corrected or added meaning",
    "example_sentence": "A natural example sentence."
  }
]

Vocabulary entries to process:
{vocabulary_json}"#;

#[derive(Serialize)]
struct PromptEntry<'a> {
    word: &'a str,
    meaning: &'a str,
}

/// Render the enrichment contract for one batch
pub fn build_prompt(batch: &[VocabularyEntry]) -> Result<String, EnrichError> {
    let payload: Vec<PromptEntry<'_>> = batch
        .iter()
        .map(|entry| PromptEntry {
            word: &entry.word,
            meaning: &entry.meaning,
        })
        .collect();

    let vocabulary_json = serde_json::to_string_pretty(&payload)?;
    Ok(ENRICHMENT_CONTRACT.replace("{vocabulary_json}", &vocabulary_json))
}
