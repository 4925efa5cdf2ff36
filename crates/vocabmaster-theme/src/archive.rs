use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use vocabmaster_types::VocabularyEntry;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::descriptor::ThemeDescriptor;
use crate::registry::resolve;
use crate::ThemeError;

pub const MANIFEST_VERSION: &str = "1.0";

#[derive(Serialize)]
struct Manifest<'a> {
    version: &'a str,
    theme: &'a str,
    word_count: usize,
}

#[derive(Serialize)]
struct VocabularyDocument<'a> {
    vocabulary: &'a [VocabularyEntry],
}

struct Asset {
    source: PathBuf,
    archive_name: String,
}

#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub word_count: usize,
    pub asset_count: usize,
}

/// Writes themed vocabulary packages
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    assets_root: Option<PathBuf>,
}

impl ArchiveBuilder {
    /// Theme assets are looked up under `<assets_root>/<theme id>/`
    pub fn new(assets_root: impl Into<PathBuf>) -> Self {
        Self {
            assets_root: Some(assets_root.into()),
        }
    }

    pub fn without_assets() -> Self {
        Self { assets_root: None }
    }

    /// Asset directory for `theme_id`, if one exists
    pub fn assets_dir(&self, theme_id: &str) -> Option<PathBuf> {
        let root = self.assets_root.as_ref()?;
        if !is_plain_id(theme_id) {
            tracing::warn!("Theme id {theme_id:?} is not a plain name, skipping assets");
            return None;
        }

        let dir = root.join(theme_id);
        dir.is_dir().then_some(dir)
    }

    /// Build `output` containing `theme.json`, `vocabulary.json`, `manifest.json`
    /// and any theme assets under `assets/`.
    pub fn build(
        &self,
        theme_id: &str,
        custom: Option<&ThemeDescriptor>,
        entries: &[VocabularyEntry],
        output: &Path,
    ) -> Result<ArchiveSummary, ThemeError> {
        let theme = resolve(theme_id, custom)?;

        let assets = match self.assets_dir(theme_id) {
            Some(dir) => collect_assets(&dir)?,
            None => Vec::new(),
        };

        let tmp = temp_sibling(output);
        let written = write_archive(&tmp, theme, theme_id, entries, &assets).and_then(|()| {
            fs::rename(&tmp, output).map_err(|source| ThemeError::ArchiveWrite {
                path: output.to_path_buf(),
                source,
            })
        });

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        tracing::info!(
            theme = theme_id,
            words = entries.len(),
            assets = assets.len(),
            "Archive written to {}",
            output.display()
        );

        Ok(ArchiveSummary {
            path: output.to_path_buf(),
            word_count: entries.len(),
            asset_count: assets.len(),
        })
    }
}

fn write_archive(
    path: &Path,
    theme: &ThemeDescriptor,
    theme_id: &str,
    entries: &[VocabularyEntry],
    assets: &[Asset],
) -> Result<(), ThemeError> {
    let write_error = |source: io::Error| ThemeError::ArchiveWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let manifest = Manifest {
        version: MANIFEST_VERSION,
        theme: theme_id,
        word_count: entries.len(),
    };
    let documents = [
        ("theme.json", serde_json::to_string_pretty(theme)?),
        (
            "vocabulary.json",
            serde_json::to_string_pretty(&VocabularyDocument {
                vocabulary: entries,
            })?,
        ),
        ("manifest.json", serde_json::to_string_pretty(&manifest)?),
    ];

    for (name, body) in documents {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes()).map_err(write_error)?;
    }

    for asset in assets {
        tracing::debug!("Adding asset {}", asset.archive_name);
        zip.start_file(asset.archive_name.as_str(), options)?;
        let mut source = File::open(&asset.source).map_err(|source| ThemeError::Io {
            path: asset.source.clone(),
            source,
        })?;
        io::copy(&mut source, &mut zip).map_err(write_error)?;
    }

    zip.finish()?;
    Ok(())
}

/// Every file under `root`, sorted, named `assets/<relative path>`
fn collect_assets(root: &Path) -> Result<Vec<Asset>, ThemeError> {
    let mut files = Vec::new();
    walk(root, &mut files)?;
    files.sort();

    Ok(files
        .into_iter()
        .filter_map(|source| {
            let relative = source.strip_prefix(root).ok()?;
            let parts: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            Some(Asset {
                archive_name: format!("assets/{}", parts.join("/")),
                source,
            })
        })
        .collect())
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ThemeError> {
    let read_error = |source| ThemeError::Io {
        path: dir.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_dir() {
            walk(&path, files)?;
        } else if path.is_file() {
            files.push(path);
        }
    }

    Ok(())
}

fn is_plain_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "package.zip".to_string());
    path.with_file_name(format!(".{name}.partial"))
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use zip::ZipArchive;

    use super::*;
    use crate::registry::lookup;

    fn entries() -> Vec<VocabularyEntry> {
        vec![
            VocabularyEntry::new("cat", "a small feline")
                .with_pronunciation("/kæt/")
                .with_example("The cat sat."),
            VocabularyEntry::new("dog", ""),
        ]
    }

    fn read_member(path: &Path, name: &str) -> serde_json::Value {
        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut member = archive.by_name(name).unwrap();
        let mut text = String::new();
        member.read_to_string(&mut text).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    fn member_names(path: &Path) -> Vec<String> {
        let archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut names: Vec<_> = archive.file_names().map(str::to_string).collect();
        names.sort();
        names
    }

    #[test]
    fn test_simple_theme_archive() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("vocabmaster_simple.zip");

        let summary = ArchiveBuilder::new(dir.path().join("themes"))
            .build("simple", None, &entries(), &output)
            .unwrap();

        assert_eq!(summary.word_count, 2);
        assert_eq!(summary.asset_count, 0);
        assert_eq!(
            member_names(&output),
            ["manifest.json", "theme.json", "vocabulary.json"]
        );

        assert_eq!(
            read_member(&output, "manifest.json"),
            serde_json::json!({"version": "1.0", "theme": "simple", "word_count": 2})
        );

        let theme: ThemeDescriptor =
            serde_json::from_value(read_member(&output, "theme.json")).unwrap();
        assert_eq!(&theme, lookup("simple").unwrap());

        let vocabulary = read_member(&output, "vocabulary.json");
        assert_eq!(vocabulary["vocabulary"][0]["pronunciation"], "/kæt/");
        assert_eq!(
            vocabulary["vocabulary"][1],
            serde_json::json!({"word": "dog", "meaning": ""})
        );
        assert!(!dir.path().join(".vocabmaster_simple.zip.partial").exists());
    }

    #[test]
    fn test_members_are_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.zip");
        ArchiveBuilder::without_assets()
            .build("p5r", None, &entries(), &output)
            .unwrap();

        let mut archive = ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let mut text = String::new();
        archive
            .by_name("vocabulary.json")
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert!(text.starts_with("{\n  \"vocabulary\": [\n"));
    }

    #[test]
    fn test_unknown_theme_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.zip");

        let err = ArchiveBuilder::without_assets()
            .build("nope", None, &entries(), &output)
            .unwrap_err();

        assert!(matches!(err, ThemeError::UnknownTheme { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_custom_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("custom.zip");
        let mut custom = lookup("planet_universe").unwrap().clone();
        custom.name = "Deep Sea".to_string();

        ArchiveBuilder::without_assets()
            .build("custom", Some(&custom), &entries(), &output)
            .unwrap();

        assert_eq!(read_member(&output, "theme.json")["name"], "Deep Sea");
        assert_eq!(read_member(&output, "manifest.json")["theme"], "custom");
    }

    #[test]
    fn test_assets_are_embedded_with_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let theme_dir = dir.path().join("themes").join("p5r");
        fs::create_dir_all(theme_dir.join("fonts")).unwrap();
        fs::write(theme_dir.join("background.png"), b"\x89PNG fake").unwrap();
        fs::write(theme_dir.join("fonts").join("title.ttf"), b"font bytes").unwrap();

        let output = dir.path().join("p5r.zip");
        let summary = ArchiveBuilder::new(dir.path().join("themes"))
            .build("p5r", None, &entries(), &output)
            .unwrap();

        assert_eq!(summary.asset_count, 2);
        assert_eq!(
            member_names(&output),
            [
                "assets/background.png",
                "assets/fonts/title.ttf",
                "manifest.json",
                "theme.json",
                "vocabulary.json",
            ]
        );

        let mut archive = ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let mut bytes = Vec::new();
        archive
            .by_name("assets/fonts/title.ttf")
            .unwrap()
            .read_to_end(&mut bytes)
            .unwrap();
        assert_eq!(bytes, b"font bytes");
    }

    #[test]
    fn test_assets_of_other_themes_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let other = dir.path().join("themes").join("simple");
        fs::create_dir_all(&other).unwrap();
        fs::write(other.join("logo.svg"), "<svg/>").unwrap();

        let output = dir.path().join("p5r.zip");
        let summary = ArchiveBuilder::new(dir.path().join("themes"))
            .build("p5r", None, &entries(), &output)
            .unwrap();
        assert_eq!(summary.asset_count, 0);
    }

    #[test]
    fn test_path_like_ids_never_reach_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let builder = ArchiveBuilder::new(dir.path());
        assert!(builder.assets_dir("../etc").is_none());
        assert!(builder.assets_dir("").is_none());
    }

    #[test]
    fn test_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("out.zip");

        let err = ArchiveBuilder::without_assets()
            .build("simple", None, &entries(), &output)
            .unwrap_err();
        assert!(matches!(err, ThemeError::ArchiveWrite { .. }));
    }
}
