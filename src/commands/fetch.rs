// src/commands/fetch.rs

//! The `fetch` command: download package archives
//!
//! Builds the package list (with or without the dependency closure),
//! shows what would be downloaded, and hands the confirmed list to the
//! download executor.

use crate::commands::confirm;
use crate::config::{self, RepoConfig};
use crate::error::Error;
use crate::format::size_fmt_rounded;
use crate::index::{self, IndexReader, PackageList};
use crate::repository;
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Fetch the named packages (or the entire index) into a local directory
pub fn cmd_fetch(
    config: &RepoConfig,
    packages: &[String],
    dependencies: bool,
    all: bool,
    destdir: Option<&str>,
    yes: bool,
) -> Result<()> {
    // Checked here, before the index is even opened
    if packages.is_empty() && !all {
        return Err(Error::EmptyRequest.into());
    }

    if all && !yes && !confirm("Fetching all packages is heavily discouraged, continue?")? {
        return Ok(());
    }

    let dest_dir = match destdir {
        Some(dir) => PathBuf::from(dir),
        None => {
            let dir = config::cache_dir()?;
            println!(
                "No output directory chosen, files will be downloaded to\n\t{}",
                dir.display()
            );
            dir
        }
    };

    let mut reader = IndexReader::open(config::index_path()?)?;
    let list = index::build_package_list(&mut reader, packages, dependencies, all)?;

    print_fetch_report(&list);
    if !yes && !confirm("Proceed with fetching packages?")? {
        return Ok(());
    }

    match repository::fetch_packages(config, &list, &dest_dir) {
        Ok(outcome) => {
            info!(
                "fetch finished: {} downloaded, {} skipped",
                outcome.fetched, outcome.skipped
            );
            if outcome.skipped > 0 {
                println!(
                    "Done: {} fetched, {} already present in {}.",
                    outcome.fetched,
                    outcome.skipped,
                    dest_dir.display()
                );
            } else {
                println!("Done: {} fetched into {}.", outcome.fetched, dest_dir.display());
            }
            Ok(())
        }
        Err(Error::Download(detail)) => {
            // Transport trouble is not a crash; point at the likely fix
            info!("fetch aborted: {}", detail);
            println!("Unable to fetch package: {detail}");
            println!("Try updating your package database with `pkgrab update`.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// What will be fetched, how big each piece is, and the total
fn print_fetch_report(list: &PackageList) {
    println!("The following packages will be fetched:\n");
    for package in &list.packages {
        let percent = if list.total_size > 0 {
            package.size as f64 / list.total_size as f64 * 100.0
        } else {
            0.0
        };
        println!(
            "\t{}: {} ({}: {:.2}% of the {} to download)",
            package.name,
            package.version,
            size_fmt_rounded(package.size),
            percent,
            size_fmt_rounded(list.total_size)
        );
    }
    println!("\nNumber of packages to be fetched: {}\n", list.len());
    println!("{} to be downloaded.\n", size_fmt_rounded(list.total_size));
}
