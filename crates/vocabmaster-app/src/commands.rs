use std::path::Path;

use anyhow::{Context, bail};
use vocabmaster_theme::{list_themes, lookup, preview};

use crate::cli::{Commands, ProfileAction, default_archive_name};
use crate::profile;
use crate::ui::Session;

/// Commands that never touch the backend
pub fn execute_local(command: &Commands, profiles_dir: Option<&Path>) -> anyhow::Result<bool> {
    match command {
        Commands::Themes => {
            for (id, label) in list_themes() {
                println!("{id:<16} {label}");
                if let Some(theme) = lookup(id) {
                    println!("{:<16} {}", "", preview(theme));
                }
            }
        }
        Commands::Profile { action } => {
            let profiles_dir =
                profiles_dir.context("cannot resolve the user config directory")?;
            match action {
                ProfileAction::Add { name } => {
                    let path = profile::add_profile_from_default(profiles_dir, name)?;
                    println!("Created profile {name} at {}", path.display());
                }
                ProfileAction::List => {
                    for name in profile::list_profiles(profiles_dir)? {
                        println!("{name}");
                    }
                }
            }
        }
        _ => return Ok(false),
    }

    Ok(true)
}

/// Drive a session-backed command to completion
pub async fn execute(
    session: &mut Session,
    command: Commands,
    batch_size: usize,
) -> anyhow::Result<()> {
    match command {
        Commands::Import { input, limit } => {
            session.import(&input).await?;
            session.print_preview(limit);
        }
        Commands::Convert { input, output } => {
            session.import(&input).await?;
            session.save(&output).await?;
        }
        Commands::Enrich { input, output, .. } => {
            import_non_empty(session, &input).await?;
            session.enrich(batch_size).await?;
            session.print_results();
            session.save(&output).await?;
        }
        Commands::Build {
            input,
            theme,
            custom_theme,
            output,
            ..
        } => {
            import_non_empty(session, &input).await?;
            let output = output.unwrap_or_else(|| default_archive_name(&theme));
            session.build_archive(&theme, custom_theme, &output).await?;
        }
        Commands::Run {
            input,
            theme,
            custom_theme,
            output,
            save,
            ..
        } => {
            import_non_empty(session, &input).await?;
            session.enrich(batch_size).await?;
            if let Some(path) = save {
                session.save(&path).await?;
            }
            let output = output.unwrap_or_else(|| default_archive_name(&theme));
            session.build_archive(&theme, custom_theme, &output).await?;
        }
        Commands::Themes | Commands::Profile { .. } => {
            bail!("command does not need a session")
        }
    }

    Ok(())
}

async fn import_non_empty(session: &mut Session, input: &Path) -> anyhow::Result<()> {
    if session.import(input).await?.is_empty() {
        bail!("{} contains no vocabulary", input.display());
    }
    Ok(())
}
