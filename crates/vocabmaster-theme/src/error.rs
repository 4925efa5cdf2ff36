use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("Unknown theme: {requested}. Available: {}", available.join(", "))]
    UnknownTheme {
        requested: String,
        available: Vec<String>,
    },

    #[error("Invalid theme: {reason}")]
    InvalidTheme { reason: String },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write archive {}: {source}", path.display())]
    ArchiveWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to serialize archive member: {0}")]
    Serialize(#[from] serde_json::Error),
}
