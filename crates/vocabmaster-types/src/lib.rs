pub mod types;

pub use types::{
    AppEvent, ArchiveRequest, Batch, InputFormat, Operation, OutputFormat, VocabularyEntry,
    VocabularyFile,
};
