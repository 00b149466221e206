//! Remote store commands.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use strata_core::persistence::{RemoteSync, SyncStatus};

use super::{finish, open_session};

pub async fn push(project_dir: &Path) -> Result<()> {
    let (cfg, session) = open_session(project_dir)?;
    let pool = strata_redis::init_pool(&cfg.redis_url)
        .await
        .with_context(|| format!("Cannot connect to remote store at {}", cfg.redis_url))?;
    let remote = RemoteSync::new(pool, cfg.record_id);

    let status = session.push(&remote).await;
    finish(session).await;

    match status {
        SyncStatus::Saved => println!(
            "{} Analysis saved to remote record {}",
            "✓".green().bold(),
            cfg.record_id.to_string().cyan()
        ),
        SyncStatus::Failed(reason) => println!("{} Remote save failed: {}", "✗".red().bold(), reason),
    }
    Ok(())
}

pub async fn pull(project_dir: &Path) -> Result<()> {
    let (cfg, mut session) = open_session(project_dir)?;
    let pool = strata_redis::init_pool(&cfg.redis_url)
        .await
        .with_context(|| format!("Cannot connect to remote store at {}", cfg.redis_url))?;
    let remote = RemoteSync::new(pool, cfg.record_id);

    let pulled = session.pull(&remote).await;
    finish(session).await;

    if pulled {
        println!(
            "{} Analysis loaded from remote record {}",
            "✓".green().bold(),
            cfg.record_id.to_string().cyan()
        );
    } else {
        println!(
            "{}",
            format!("No usable remote record {}; local analysis kept.", cfg.record_id).yellow()
        );
    }
    Ok(())
}
