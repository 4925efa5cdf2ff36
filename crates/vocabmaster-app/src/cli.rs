use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vocabmaster_config::Config;
use vocabmaster_config::batch::clamp_batch_size;

#[derive(Parser)]
#[command(
    name = "vocabmaster",
    version,
    about = "Check, enrich and package vocabulary lists"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Profile to load settings from
    #[arg(long, default_value = "main", global = true)]
    pub profile: String,

    /// Log level (error, warn, info, debug, trace); defaults to the profile's
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Settings that override the loaded profile
#[derive(clap::Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Entries per enrichment call (5-50)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Seconds allowed per enrichment call
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory holding `<theme id>/` asset folders
    #[arg(long)]
    pub assets_dir: Option<String>,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(size) = self.batch_size {
            config.batch.size = clamp_batch_size(size);
        }
        if let Some(secs) = self.timeout.filter(|secs| *secs > 0) {
            config.enricher.timeout_seconds = secs;
        }
        if let Some(dir) = &self.assets_dir {
            config.theme.assets_dir = dir.clone();
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the built-in themes
    Themes,
    /// Load a vocabulary file and preview it
    Import {
        /// `.txt` word list or `.json` export
        input: PathBuf,
        /// Rows to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Convert between `.txt` and `.json`
    Convert {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Enrich a vocabulary file and save the result
    Enrich {
        input: PathBuf,
        /// `.json` or `.txt` output
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Package a vocabulary file with a theme, without enriching it
    Build {
        input: PathBuf,
        #[arg(long, default_value = "simple")]
        theme: String,
        /// JSON theme descriptor used instead of a built-in theme
        #[arg(long)]
        custom_theme: Option<PathBuf>,
        /// Defaults to `vocabmaster_<theme>.zip`
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Import, enrich and package in one go
    Run {
        input: PathBuf,
        #[arg(long, default_value = "simple")]
        theme: String,
        #[arg(long)]
        custom_theme: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also save the enriched vocabulary (`.json` or `.txt`)
        #[arg(long)]
        save: Option<PathBuf>,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Manage settings profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

impl Commands {
    pub fn overrides(&self) -> Option<&Overrides> {
        match self {
            Commands::Enrich { overrides, .. }
            | Commands::Build { overrides, .. }
            | Commands::Run { overrides, .. } => Some(overrides),
            _ => None,
        }
    }
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create a profile cloned from `main`
    Add { name: String },
    /// List existing profiles
    List,
}

pub fn default_archive_name(theme: &str) -> PathBuf {
    PathBuf::from(format!("vocabmaster_{theme}.zip"))
}
