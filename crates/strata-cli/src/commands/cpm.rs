//! Competitive Profile Matrix commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use std::path::Path;
use strata_core::StrategicData;

use super::{finish, open_session, resolve_id};
use crate::output;

#[derive(Subcommand)]
pub enum CpmCommands {
    /// Add a competitor
    Add {
        /// Competitor name
        name: String,
    },

    /// Rate a competitor against a KSF (clamped to 0 - 4)
    Rate {
        /// Competitor ID prefix or exact name
        competitor: String,

        /// KSF ID or unique prefix
        ksf: String,

        /// Rating
        rating: f64,
    },

    /// Rename a competitor
    Rename {
        /// Competitor ID prefix or exact name
        competitor: String,

        /// New name
        name: String,
    },

    /// Remove a competitor
    Rm {
        /// Competitor ID prefix or exact name
        competitor: String,
    },

    /// Show every competitor's ratings and weighted score
    Show,
}

/// Resolve a competitor by exact name (case-insensitive) first, then by id.
pub(super) fn resolve_competitor(data: &StrategicData, key: &str) -> Result<String> {
    let by_name: Vec<_> = data
        .competitors
        .iter()
        .filter(|c| c.name.eq_ignore_ascii_case(key.trim()))
        .collect();
    if let [only] = by_name.as_slice() {
        return Ok(only.id.clone());
    }
    resolve_id(data.competitors.iter().map(|c| c.id.as_str()), key, "competitor")
}

pub async fn execute(cmd: CpmCommands, project_dir: &Path) -> Result<()> {
    let (_, mut session) = open_session(project_dir)?;

    match cmd {
        CpmCommands::Add { name } => {
            let competitor = session.mutate(|d| Ok(d.add_competitor(name).clone()))?;
            println!(
                "{} Added competitor {} ({})",
                "✓".green().bold(),
                competitor.name.cyan(),
                output::short_id(&competitor.id).dimmed()
            );
        }

        CpmCommands::Rate {
            competitor,
            ksf,
            rating,
        } => {
            let competitor_id = resolve_competitor(session.data(), &competitor)?;
            let ksf_id = resolve_id(session.data().ksf.iter().map(|k| k.id.as_str()), &ksf, "KSF")?;
            let stored = session.mutate(|d| d.set_competitor_rating(&competitor_id, &ksf_id, rating))?;

            println!(
                "{} Rated {} on KSF {}: {}",
                "✓".green().bold(),
                competitor.cyan(),
                output::short_id(&ksf_id).dimmed(),
                output::fmt2(stored)
            );
        }

        CpmCommands::Rename { competitor, name } => {
            let id = resolve_competitor(session.data(), &competitor)?;
            let renamed = session.mutate(|d| d.rename_competitor(&id, name).cloned())?;
            println!(
                "{} Renamed {} to {}",
                "✓".green().bold(),
                output::short_id(&id).dimmed(),
                renamed.name.cyan()
            );
        }

        CpmCommands::Rm { competitor } => {
            let id = resolve_competitor(session.data(), &competitor)?;
            let removed = session.mutate(|d| d.remove_competitor(&id))?;
            println!(
                "{} Removed competitor {}",
                "✓".green().bold(),
                removed.name.cyan()
            );
        }

        CpmCommands::Show => {
            let data = session.data();
            output::print_cpm(&data.competitors, &data.ksf);
        }
    }

    finish(session).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_competitor_by_name_or_id() {
        let mut data = StrategicData::seeded();
        let added = data.add_competitor("Newcomer").id.clone();

        assert_eq!(resolve_competitor(&data, "competitor 1").unwrap(), "2");
        assert_eq!(resolve_competitor(&data, "2").unwrap(), "2");
        assert_eq!(resolve_competitor(&data, &added[..8]).unwrap(), added);
        assert!(resolve_competitor(&data, "Nobody").is_err());
    }
}
