use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use vocabmaster_config::Config;

/// Per-user profile folder
pub fn profiles_dir() -> anyhow::Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "vocabmaster", "VocabMaster")
        .context("cannot resolve the user config directory")?;
    Ok(dirs.config_dir().join("profiles"))
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

fn profile_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.json"))
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading profile {}", path.display()))?;
    let profile: Profile = serde_json::from_str(&data)
        .with_context(|| format!("parsing profile {}", path.display()))?;
    Ok(profile.value)
}

fn write_profile(path: &Path, profile: &Profile) -> anyhow::Result<()> {
    fs::write(path, serde_json::to_string_pretty(profile)?)
        .with_context(|| format!("writing profile {}", path.display()))
}

/// Initialize the profile folder and main profile if missing
pub fn init_user_config(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let main_profile = profile_path(dir, "main");
    if !main_profile.exists() {
        let profile = Profile {
            name: "main".into(),
            value: Config::new(),
        };
        write_profile(&main_profile, &profile)?;
        tracing::info!("Created main profile at {}", main_profile.display());
    }

    Ok(())
}

/// Load a profile by name, falling back to main, then to environment defaults
pub fn load_user_profile(dir: &Path, name: &str) -> anyhow::Result<Config> {
    let profile_file = profile_path(dir, name);
    if profile_file.exists() {
        return read_profile(&profile_file);
    }

    tracing::warn!("Profile {name} not found, falling back to main profile");
    let main_file = profile_path(dir, "main");
    if main_file.exists() {
        read_profile(&main_file)
    } else {
        Ok(Config::new())
    }
}

/// Add a new profile cloned from main
pub fn add_profile_from_default(dir: &Path, new_name: &str) -> anyhow::Result<PathBuf> {
    if new_name.is_empty()
        || !new_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        bail!("profile names may only contain letters, digits, '_' and '-'");
    }

    let file = profile_path(dir, new_name);
    if file.exists() {
        bail!("profile {new_name} already exists at {}", file.display());
    }

    init_user_config(dir)?;
    let profile = Profile {
        name: new_name.into(),
        value: load_user_profile(dir, "main")?,
    };
    write_profile(&file, &profile)?;
    tracing::info!("Created new profile: {new_name}");
    Ok(file)
}

/// Profile names, sorted
pub fn list_profiles(dir: &Path) -> anyhow::Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json")
            && let Some(stem) = path.file_stem()
        {
            names.push(stem.to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
