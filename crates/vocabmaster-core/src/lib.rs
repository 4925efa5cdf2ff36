pub mod batcher;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod store;

pub use batcher::divide_into_batches;
pub use error::VocabError;
pub use parser::{ParseError, parse_str, parse_vocabulary_file};
pub use pipeline::{EnrichmentPipeline, ProgressObserver, RunSummary};
pub use store::{
    format_txt_line, load_vocabulary, load_vocabulary_json, merge_batches, save_vocabulary,
    save_vocabulary_json, save_vocabulary_txt,
};
