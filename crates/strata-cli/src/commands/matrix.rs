//! IFE / EFE matrix commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;
use strata_core::analysis::model::{FactorUpdate, MatrixKind};

use super::{finish, open_session, parse_matrix, resolve_id};
use crate::output;

#[derive(Subcommand)]
pub enum MatrixCommands {
    /// Add a factor (blank unless fields are given)
    Add(AddArgs),

    /// Update a factor's fields
    Set(SetArgs),

    /// Remove a factor
    Rm {
        /// ife or efe
        #[arg(value_parser = parse_matrix)]
        kind: MatrixKind,

        /// Factor ID or unique prefix
        id: String,
    },

    /// Show a matrix with its total weighted score
    Show {
        /// ife or efe
        #[arg(value_parser = parse_matrix)]
        kind: MatrixKind,
    },
}

#[derive(Args)]
pub struct FactorFields {
    /// Factor description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Weight, clamped to 0.0 - 1.0
    #[arg(short, long)]
    pub weight: Option<f64>,

    /// Rating, clamped to 1 - 4
    #[arg(short, long)]
    pub rating: Option<f64>,
}

impl FactorFields {
    fn into_update(self) -> FactorUpdate {
        FactorUpdate {
            description: self.description,
            weight: self.weight,
            rating: self.rating,
        }
    }
}

#[derive(Args)]
pub struct AddArgs {
    /// ife or efe
    #[arg(value_parser = parse_matrix)]
    pub kind: MatrixKind,

    #[command(flatten)]
    pub fields: FactorFields,
}

#[derive(Args)]
pub struct SetArgs {
    /// ife or efe
    #[arg(value_parser = parse_matrix)]
    pub kind: MatrixKind,

    /// Factor ID or unique prefix
    pub id: String,

    #[command(flatten)]
    pub fields: FactorFields,
}

pub async fn execute(cmd: MatrixCommands, project_dir: &Path) -> Result<()> {
    let (_, mut session) = open_session(project_dir)?;

    match cmd {
        MatrixCommands::Add(args) => {
            let kind = args.kind;
            let factor = session.mutate(|d| {
                let id = d.add_factor(kind).id.clone();
                d.update_factor(kind, &id, args.fields.into_update()).cloned()
            })?;

            println!(
                "{} Added {} factor {} (weight {}, rating {})",
                "✓".green().bold(),
                kind.as_str().to_uppercase(),
                output::short_id(&factor.id).dimmed(),
                output::fmt2(factor.weight),
                factor.rating
            );
        }

        MatrixCommands::Set(args) => {
            let kind = args.kind;
            let ids = session.data().matrices.matrix(kind).iter().map(|f| f.id.as_str());
            let id = resolve_id(ids, &args.id, "factor")?;
            let factor = session.mutate(|d| d.update_factor(kind, &id, args.fields.into_update()).cloned())?;

            println!(
                "{} Updated factor {}: weight {}, rating {}, score {}",
                "✓".green().bold(),
                output::short_id(&factor.id).dimmed(),
                output::fmt2(factor.weight),
                factor.rating,
                output::fmt2(strata_core::scoring::factor_score(&factor)).cyan()
            );
        }

        MatrixCommands::Rm { kind, id } => {
            let ids = session.data().matrices.matrix(kind).iter().map(|f| f.id.as_str());
            let id = resolve_id(ids, &id, "factor")?;
            session.mutate(|d| d.remove_factor(kind, &id))?;

            println!(
                "{} Removed {} factor {}",
                "✓".green().bold(),
                kind.as_str().to_uppercase(),
                output::short_id(&id).dimmed()
            );
        }

        MatrixCommands::Show { kind } => {
            output::print_matrix(kind, session.data().matrices.matrix(kind));
        }
    }

    finish(session).await;
    Ok(())
}
