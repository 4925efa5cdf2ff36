mod archive;
mod descriptor;
mod error;
mod registry;

pub use archive::{ArchiveBuilder, ArchiveSummary, MANIFEST_VERSION};
pub use descriptor::{FontStyle, ThemeColors, ThemeDescriptor, ThemeFonts, ThemeStyle};
pub use error::ThemeError;
pub use registry::{list_themes, lookup, preview, resolve, theme_ids};

use std::path::Path;

use vocabmaster_types::VocabularyEntry;

/// Package `entries` with a theme, picking up assets from `<assets_root>/<theme_id>`
pub fn build_theme_zip(
    theme_id: &str,
    entries: &[VocabularyEntry],
    output: &Path,
    custom_theme: Option<&ThemeDescriptor>,
    assets_root: &Path,
) -> Result<ArchiveSummary, ThemeError> {
    ArchiveBuilder::new(assets_root).build(theme_id, custom_theme, entries, output)
}
