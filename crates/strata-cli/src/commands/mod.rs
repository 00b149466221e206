//! CLI command definitions and handlers.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strata_core::analysis::model::{MatrixKind, SwotBucket};
use strata_core::config::{self, StrataConfig};
use strata_core::exchange::{FileExchange, FilePicker, PickerOptions};
use strata_core::session::Session;

use crate::picker::PromptPicker;

pub mod cpm;
pub mod file;
pub mod ksf;
pub mod matrix;
pub mod remote;
pub mod report;
pub mod swot;

/// Strata - strategic analysis workbench
#[derive(Parser)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory (defaults to current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true, env = "STRATA_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// SWOT analysis items
    #[command(subcommand)]
    Swot(swot::SwotCommands),

    /// IFE / EFE factor matrices
    #[command(subcommand)]
    Matrix(matrix::MatrixCommands),

    /// Key Success Factors
    #[command(subcommand)]
    Ksf(ksf::KsfCommands),

    /// Competitive Profile Matrix
    #[command(subcommand)]
    Cpm(cpm::CpmCommands),

    /// Print every total and score
    Report(report::ReportArgs),

    /// Print chart series as JSON
    Chart(report::ChartArgs),

    /// Export the analysis to a JSON file
    Export(file::ExportArgs),

    /// Import the analysis from a JSON file
    Import(file::ImportArgs),

    /// Save the analysis to the remote store
    Push,

    /// Replace the analysis with the remote record
    Pull,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let project_dir = match self.project {
            Some(dir) => dir,
            None => std::env::current_dir().context("Cannot determine current directory")?,
        };

        match self.command {
            Commands::Swot(cmd) => swot::execute(cmd, &project_dir).await,
            Commands::Matrix(cmd) => matrix::execute(cmd, &project_dir).await,
            Commands::Ksf(cmd) => ksf::execute(cmd, &project_dir).await,
            Commands::Cpm(cmd) => cpm::execute(cmd, &project_dir).await,
            Commands::Report(args) => report::report(args, &project_dir).await,
            Commands::Chart(args) => report::chart(args, &project_dir).await,
            Commands::Export(args) => file::export(args, &project_dir).await,
            Commands::Import(args) => file::import(args, &project_dir).await,
            Commands::Push => remote::push(&project_dir).await,
            Commands::Pull => remote::pull(&project_dir).await,
        }
    }
}

/// Load config and the local store, and open a session that asks for files
/// on the terminal.
pub fn open_session(project_dir: &Path) -> Result<(StrataConfig, Session)> {
    open_session_with(project_dir, Arc::new(PromptPicker))
}

/// Like [`open_session`] with a caller-chosen picker.
pub fn open_session_with(
    project_dir: &Path,
    picker: Arc<dyn FilePicker>,
) -> Result<(StrataConfig, Session)> {
    let cfg = StrataConfig::load(project_dir)?;
    let pool = strata_db::init_pool(&config::db_path(project_dir))
        .with_context(|| format!("Cannot open local store in {}", project_dir.display()))?;

    let exchange = FileExchange::new(picker)
        .with_options(PickerOptions::default().with_suggested_name(cfg.export_file_name.clone()))
        .with_debounce(cfg.autosave_debounce());

    Ok((cfg, Session::open(pool, exchange)))
}

/// Find the one id equal to `key`, or the one id starting with it.
pub fn resolve_id<'a, I>(ids: I, key: &str, what: &str) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let key = key.trim();
    if key.is_empty() {
        bail!("Empty {} id", what);
    }

    let mut matches = Vec::new();
    for id in ids {
        if id == key {
            return Ok(id.to_string());
        }
        if id.starts_with(key) {
            matches.push(id);
        }
    }

    match matches.as_slice() {
        [only] => Ok(only.to_string()),
        [] => bail!("No {} matches '{}'", what, key),
        _ => bail!("'{}' matches {} {}s; use a longer prefix", key, matches.len(), what),
    }
}

pub fn parse_bucket(s: &str) -> Result<SwotBucket, String> {
    SwotBucket::parse(s).ok_or_else(|| {
        format!(
            "unknown SWOT bucket '{}' (expected strengths, weaknesses, opportunities or threats)",
            s
        )
    })
}

pub fn parse_matrix(s: &str) -> Result<MatrixKind, String> {
    MatrixKind::parse(s).ok_or_else(|| format!("unknown matrix '{}' (expected ife or efe)", s))
}

/// Flush the pending auto-save and report it.
pub async fn finish(session: Session) {
    let name = session.exchange().active_file_name();
    if session.close().await {
        if let Some(name) = name {
            tracing::debug!(file = %name, "Auto-saved");
        }
    }
}
