//! JSON export / import commands.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strata_core::exchange::{LocalFile, PathPicker};

use super::{finish, open_session, open_session_with};

#[derive(Args)]
pub struct ExportArgs {
    /// Destination file; becomes the active file for auto-save
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Source file; prompts when omitted
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// The remembered active file outlives the current directory, so it is
/// stored absolute.
fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Invalid path: {}", path.display()))
}

pub async fn export(args: ExportArgs, project_dir: &Path) -> Result<()> {
    let (_, session) = open_session(project_dir)?;

    if let Some(path) = args.file {
        let path = absolute(&path)?;
        session.exchange().set_active_file(Arc::new(LocalFile::new(path)));
    }

    let outcome = session.export().await;
    let name = session.exchange().active_file_name();
    finish(session).await;

    match (outcome.success, name) {
        (true, Some(name)) => {
            println!("{} Exported to {}", "✓".green().bold(), name.cyan());
            println!("  {}", "Further changes are auto-saved to this file.".dimmed());
        }
        (true, None) => println!("{} Exported", "✓".green().bold()),
        (false, _) => println!("{}", "Export cancelled or failed (see log).".yellow()),
    }
    Ok(())
}

pub async fn import(args: ImportArgs, project_dir: &Path) -> Result<()> {
    let (_, mut session) = match args.file {
        Some(path) => {
            if !path.exists() {
                bail!("File not found: {}", path.display());
            }
            open_session_with(project_dir, Arc::new(PathPicker::new(absolute(&path)?)))?
        }
        None => open_session(project_dir)?,
    };

    let imported = session.import().await;
    let name = session.exchange().active_file_name();
    let data = session.data();
    let counts = (
        data.swot.strengths.len()
            + data.swot.weaknesses.len()
            + data.swot.opportunities.len()
            + data.swot.threats.len(),
        data.matrices.ife.len(),
        data.matrices.efe.len(),
        data.ksf.len(),
        data.competitors.len(),
    );
    finish(session).await;

    if !imported {
        println!("{}", "Nothing imported: cancelled or not a valid analysis file.".yellow());
        return Ok(());
    }

    println!(
        "{} Imported {}",
        "✓".green().bold(),
        name.unwrap_or_default().cyan()
    );
    println!(
        "  {} SWOT items, {} IFE and {} EFE factors, {} KSFs, {} competitors",
        counts.0, counts.1, counts.2, counts.3, counts.4
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_file_is_made_absolute() {
        let cwd = std::env::current_dir().unwrap();
        let path = absolute(Path::new("out/analysis.json")).unwrap();
        assert!(path.is_absolute());
        assert_eq!(path, cwd.join("out/analysis.json"));

        let already = cwd.join("plan.json");
        assert_eq!(absolute(&already).unwrap(), already);
    }
}
