//! SWOT commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;
use strata_core::analysis::model::SwotBucket;

use super::{finish, open_session, parse_bucket, resolve_id};
use crate::output;

#[derive(Subcommand)]
pub enum SwotCommands {
    /// Add an item to a bucket
    Add(AddArgs),

    /// Change an item's description
    Set(SetArgs),

    /// Remove an item
    Rm(ItemArgs),

    /// List one bucket, or all four
    List {
        /// strengths, weaknesses, opportunities or threats
        #[arg(value_parser = parse_bucket)]
        bucket: Option<SwotBucket>,
    },
}

#[derive(Args)]
pub struct AddArgs {
    /// strengths, weaknesses, opportunities or threats
    #[arg(value_parser = parse_bucket)]
    pub bucket: SwotBucket,

    /// Item description
    pub description: Option<String>,
}

#[derive(Args)]
pub struct SetArgs {
    #[arg(value_parser = parse_bucket)]
    pub bucket: SwotBucket,

    /// Item ID or unique prefix
    pub id: String,

    /// New description
    pub description: String,
}

#[derive(Args)]
pub struct ItemArgs {
    #[arg(value_parser = parse_bucket)]
    pub bucket: SwotBucket,

    /// Item ID or unique prefix
    pub id: String,
}

pub async fn execute(cmd: SwotCommands, project_dir: &Path) -> Result<()> {
    let (_, mut session) = open_session(project_dir)?;

    match cmd {
        SwotCommands::Add(args) => {
            let item = session.mutate(|d| {
                let id = d.add_swot_item(args.bucket).id.clone();
                d.update_swot_item(args.bucket, &id, args.description.unwrap_or_default())
                    .cloned()
            })?;

            println!(
                "{} Added to {}: {} ({})",
                "✓".green().bold(),
                args.bucket.label().cyan(),
                item.description,
                output::short_id(&item.id).dimmed()
            );
        }

        SwotCommands::Set(args) => {
            let ids = session.data().swot.bucket(args.bucket).iter().map(|i| i.id.as_str());
            let id = resolve_id(ids, &args.id, "SWOT item")?;
            session.mutate(|d| d.update_swot_item(args.bucket, &id, args.description).map(|_| ()))?;

            println!(
                "{} Updated {} item {}",
                "✓".green().bold(),
                args.bucket.as_str(),
                output::short_id(&id).dimmed()
            );
        }

        SwotCommands::Rm(args) => {
            let ids = session.data().swot.bucket(args.bucket).iter().map(|i| i.id.as_str());
            let id = resolve_id(ids, &args.id, "SWOT item")?;
            session.mutate(|d| d.remove_swot_item(args.bucket, &id))?;

            println!(
                "{} Removed {} item {}",
                "✓".green().bold(),
                args.bucket.as_str(),
                output::short_id(&id).dimmed()
            );
        }

        SwotCommands::List { bucket } => {
            let swot = &session.data().swot;
            let buckets: Vec<_> = match bucket {
                Some(b) => vec![(b, swot.bucket(b).as_slice())],
                None => SwotBucket::ALL
                    .iter()
                    .map(|&b| (b, swot.bucket(b).as_slice()))
                    .collect(),
            };
            output::print_swot(&buckets);
        }
    }

    finish(session).await;
    Ok(())
}
