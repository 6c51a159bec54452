use std::path::{Path, PathBuf};

use anyhow::Context;
use services::{Clock, TransferService};
use storage::ExportBundle;
use tracing::info;

use crate::config::AppConfig;

pub async fn export(config: &AppConfig, out: Option<PathBuf>) -> anyhow::Result<()> {
    let storage = config.storage().await;
    let bundle =
        ExportBundle::capture(storage.attempts.as_ref(), Clock::default_clock().now()).await?;
    let json = bundle.to_json()?;
    match out {
        Some(path) => {
            tokio::fs::write(&path, json)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            println!(
                "Exported {} sessions and {} results to {}",
                bundle.sessions.len(),
                bundle.results.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub async fn import(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let bundle =
        ExportBundle::from_json(&raw).with_context(|| format!("parsing {}", path.display()))?;
    let storage = config.storage().await;
    bundle.restore(storage.attempts.as_ref()).await?;
    println!(
        "Imported {} sessions and {} results",
        bundle.sessions.len(),
        bundle.results.len()
    );
    Ok(())
}

pub async fn clear(config: &AppConfig) -> anyhow::Result<()> {
    let storage = config.storage().await;
    storage.attempts.clear().await?;
    if let Some(fallback) = &storage.fallback {
        fallback.clear().await?;
    }
    info!("attempt log cleared");
    println!("All sessions, results and streak data deleted.");
    Ok(())
}

pub async fn sync(config: &AppConfig) -> anyhow::Result<()> {
    let remote = config.database().await?;
    let local = config.local_store();
    let report = TransferService::transfer(&local, &remote).await?;
    if report.moved_anything() {
        println!(
            "Moved {} sessions and {} results to the database{}",
            report.sessions,
            report.results,
            if report.streak { " with the streak" } else { "" }
        );
    } else {
        println!("Nothing to sync.");
    }
    Ok(())
}
