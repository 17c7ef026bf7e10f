// src/repository/download.rs

//! Package archive downloads
//!
//! Walks a resolved [`PackageList`] and fetches each archive from the
//! repository, with a per-file progress bar plus an aggregate bar for the
//! whole batch. A destination file whose size already matches the
//! catalogue's `pkgsize` is treated as complete and skipped without any
//! network traffic.

use crate::config::RepoConfig;
use crate::error::{Error, Result};
use crate::index::{PackageList, ResolvedPackage};
use crate::repository::client::RepoClient;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// What a fetch run actually did
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Packages downloaded over the network
    pub fetched: usize,
    /// Packages skipped because a complete file was already present
    pub skipped: usize,
    /// Bytes transferred (skips excluded)
    pub bytes_transferred: u64,
}

/// Remote and local filename of a package archive
pub fn archive_filename(package: &ResolvedPackage) -> String {
    format!("{}-{}.pkg", package.name, package.version)
}

/// Fetch every package in `list` into `dest_dir`, sequentially
///
/// The first transport failure aborts the rest of the batch; completed
/// files are left in place so a rerun picks up where this one stopped.
pub fn fetch_packages(
    config: &RepoConfig,
    list: &PackageList,
    dest_dir: &Path,
) -> Result<FetchOutcome> {
    fs::create_dir_all(dest_dir).map_err(|e| {
        Error::Io(format!(
            "failed to create directory {}: {e}",
            dest_dir.display()
        ))
    })?;

    let client = RepoClient::new()?;
    let progress = FetchProgress::new(list.len(), list.total_size);
    let mut outcome = FetchOutcome::default();

    for package in &list.packages {
        let filename = archive_filename(package);
        let dest_path = dest_dir.join(&filename);

        if is_complete(&dest_path, package.size) {
            debug!("{} already complete, skipping", filename);
            outcome.skipped += 1;
            progress.skip_package(&filename, package.size);
        } else {
            let bar = progress.add_package(&filename, package.size);
            let url = config.package_url(&filename);
            match client.download_file(&url, &dest_path, Some(&bar)) {
                Ok(()) => {
                    bar.finish_with_message(format!("{filename} [done]"));
                    outcome.fetched += 1;
                    outcome.bytes_transferred += package.size;
                    progress.advance(package.size);
                }
                Err(e) => {
                    bar.abandon_with_message(format!("{filename} [failed]"));
                    return Err(e);
                }
            }
        }
        progress.set_completed(outcome.fetched + outcome.skipped);
    }

    progress.finish(outcome.fetched + outcome.skipped);
    info!(
        "fetched {} packages, skipped {} already complete",
        outcome.fetched, outcome.skipped
    );
    Ok(outcome)
}

/// A file is complete when it exists with exactly the catalogued size
fn is_complete(path: &Path, expected_size: u64) -> bool {
    match fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.len() == expected_size,
        Err(_) => false,
    }
}

/// Aggregate progress display for a batch of downloads
struct FetchProgress {
    multi: MultiProgress,
    overall: ProgressBar,
    package_count: usize,
}

impl FetchProgress {
    fn new(package_count: usize, total_size: u64) -> Self {
        let multi = MultiProgress::new();
        let overall = ProgressBar::new(total_size);
        overall.set_style(
            ProgressStyle::default_bar()
                .template("Total: [{bar:40.green/dim}] {bytes}/{total_bytes} {msg}")
                .expect("valid progress template")
                .progress_chars("=>-"),
        );
        overall.set_message(format!("0/{package_count} packages"));
        let overall = multi.add(overall);
        Self {
            multi,
            overall,
            package_count,
        }
    }

    fn add_package(&self, name: &str, size: u64) -> ProgressBar {
        let bar = ProgressBar::new(size);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
                .expect("valid progress template")
                .progress_chars("#>-"),
        );
        bar.set_message(name.to_string());
        self.multi.add(bar)
    }

    fn skip_package(&self, name: &str, size: u64) {
        let bar = self.add_package(name, size);
        bar.set_position(size);
        bar.finish_with_message(format!("{name} [already complete]"));
        self.advance(size);
    }

    fn advance(&self, bytes: u64) {
        self.overall.inc(bytes);
    }

    fn set_completed(&self, completed: usize) {
        self.overall
            .set_message(format!("{completed}/{} packages", self.package_count));
    }

    fn finish(&self, completed: usize) {
        self.overall
            .finish_with_message(format!("{completed}/{} packages", self.package_count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_archive_filename() {
        let package = ResolvedPackage {
            name: "nginx".to_string(),
            version: "1.24.0_1,3".to_string(),
            size: 10,
        };
        assert_eq!(archive_filename(&package), "nginx-1.24.0_1,3.pkg");
    }

    #[test]
    fn test_is_complete_matches_exact_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pkg-1.0.pkg");
        fs::write(&path, b"12345").unwrap();

        assert!(is_complete(&path, 5));
        // Partial or over-long files must be re-fetched
        assert!(!is_complete(&path, 6));
        assert!(!is_complete(&path, 4));
        assert!(!is_complete(&dir.path().join("absent.pkg"), 5));
    }
}
