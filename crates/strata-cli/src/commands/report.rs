//! Report and chart-series commands.

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::Path;
use strata_core::scoring;
use strata_core::StrategicData;

use super::{finish, open_session};
use crate::output;

#[derive(Args)]
pub struct ReportArgs {
    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    Swot,
    Ife,
    Efe,
    Ksf,
    Cpm,
}

#[derive(Args)]
pub struct ChartArgs {
    /// Which chart
    #[arg(value_enum)]
    pub kind: ChartKind,

    /// Competitors to compare in the CPM chart (ID prefix or name; all when omitted)
    #[arg(short, long = "competitor")]
    pub competitors: Vec<String>,
}

pub async fn report(args: ReportArgs, project_dir: &Path) -> Result<()> {
    let (_, session) = open_session(project_dir)?;
    let summary = session.summary();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let active = session.exchange().active_file_name();
        output::print_summary(&summary, active.as_deref());
    }

    finish(session).await;
    Ok(())
}

pub async fn chart(args: ChartArgs, project_dir: &Path) -> Result<()> {
    let (_, session) = open_session(project_dir)?;
    println!("{}", chart_json(session.data(), args.kind, &args.competitors)?);
    finish(session).await;
    Ok(())
}

/// Chart series for `kind` as pretty JSON.
fn chart_json(data: &StrategicData, kind: ChartKind, competitors: &[String]) -> Result<String> {
    let json = match kind {
        ChartKind::Swot => serde_json::to_string_pretty(&scoring::swot_counts(
            &data.swot.strengths,
            &data.swot.weaknesses,
            &data.swot.opportunities,
            &data.swot.threats,
        ))?,
        ChartKind::Ife => serde_json::to_string_pretty(&scoring::radar_series(&data.matrices.ife))?,
        ChartKind::Efe => serde_json::to_string_pretty(&scoring::radar_series(&data.matrices.efe))?,
        ChartKind::Ksf => serde_json::to_string_pretty(&scoring::ksf_radar_series(&data.ksf))?,
        ChartKind::Cpm => {
            let selected: Vec<String> = if competitors.is_empty() {
                data.competitors.iter().map(|c| c.id.clone()).collect()
            } else {
                competitors
                    .iter()
                    .map(|key| super::cpm::resolve_competitor(data, key))
                    .collect::<Result<Vec<_>>>()?
            };
            serde_json::to_string_pretty(&scoring::cpm_series(&data.competitors, &data.ksf, &selected))?
        }
    };
    Ok(json)
}
