// src/commands/update.rs

//! The `update` command: refresh the local package index

use crate::config::{self, CATALOGUE_ARCHIVE, RepoConfig};
use crate::repository;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// Download the repository catalogue and install it as the local index
pub fn cmd_update(config: &RepoConfig) -> Result<()> {
    let index_path = config::index_path()?;
    info!(
        "updating index for {} at {}",
        config.abi(),
        index_path.display()
    );

    println!("Downloading {CATALOGUE_ARCHIVE}...");
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
            .expect("valid progress template")
            .progress_chars("#>-"),
    );
    bar.set_message(CATALOGUE_ARCHIVE);

    let count = repository::refresh_index(config, &index_path, Some(&bar))?;
    bar.finish_with_message(format!("{CATALOGUE_ARCHIVE} [done]"));

    println!("Package database updated: {count} packages available.");
    Ok(())
}
