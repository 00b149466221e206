//! Key Success Factor commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;
use strata_core::analysis::model::KsfUpdate;

use super::{finish, open_session, resolve_id};
use crate::output;

#[derive(Subcommand)]
pub enum KsfCommands {
    /// Add a key success factor
    Add(KsfFields),

    /// Update a key success factor
    Set {
        /// KSF ID or unique prefix
        id: String,

        #[command(flatten)]
        fields: KsfFields,
    },

    /// Remove a key success factor (competitor ratings for it are kept)
    Rm {
        /// KSF ID or unique prefix
        id: String,
    },

    /// List key success factors with the overall score
    List,
}

#[derive(Args)]
pub struct KsfFields {
    /// What must go right
    #[arg(short, long)]
    pub description: Option<String>,

    /// Target to reach
    #[arg(short, long)]
    pub target: Option<String>,

    /// How progress is measured
    #[arg(short, long)]
    pub measure: Option<String>,

    /// Weight in percent, clamped to 0 - 100
    #[arg(short, long)]
    pub weight: Option<f64>,

    /// Performance in percent, clamped to 0 - 100
    #[arg(long)]
    pub performance: Option<f64>,
}

impl From<KsfFields> for KsfUpdate {
    fn from(fields: KsfFields) -> Self {
        Self {
            description: fields.description,
            target: fields.target,
            measure: fields.measure,
            weight: fields.weight,
            performance: fields.performance,
        }
    }
}

pub async fn execute(cmd: KsfCommands, project_dir: &Path) -> Result<()> {
    let (_, mut session) = open_session(project_dir)?;

    match cmd {
        KsfCommands::Add(fields) => {
            let item = session.mutate(|d| {
                let id = d.add_ksf_item().id.clone();
                d.update_ksf_item(&id, fields.into()).cloned()
            })?;

            println!(
                "{} Added KSF {} ({})",
                "✓".green().bold(),
                item.description.cyan(),
                output::short_id(&item.id).dimmed()
            );
        }

        KsfCommands::Set { id, fields } => {
            let ids = session.data().ksf.iter().map(|k| k.id.as_str());
            let id = resolve_id(ids, &id, "KSF")?;
            let item = session.mutate(|d| d.update_ksf_item(&id, fields.into()).cloned())?;

            println!(
                "{} Updated KSF {}: weight {}%, performance {}%",
                "✓".green().bold(),
                output::short_id(&item.id).dimmed(),
                output::fmt2(item.weight),
                output::fmt2(item.performance)
            );
        }

        KsfCommands::Rm { id } => {
            let ids = session.data().ksf.iter().map(|k| k.id.as_str());
            let id = resolve_id(ids, &id, "KSF")?;
            let removed = session.mutate(|d| d.remove_ksf_item(&id))?;

            println!(
                "{} Removed KSF {} ({})",
                "✓".green().bold(),
                removed.description.cyan(),
                output::short_id(&removed.id).dimmed()
            );
        }

        KsfCommands::List => output::print_ksf(&session.data().ksf),
    }

    finish(session).await;
    Ok(())
}
