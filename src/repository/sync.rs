// src/repository/sync.rs

//! Index refresh
//!
//! Downloads the repository's compressed catalogue archive
//! (`packagesite.txz`), unpacks it in a scratch directory, and installs the
//! contained catalogue as the local index snapshot. Each refresh replaces
//! the snapshot whole; nothing else ever writes it.

use crate::config::{CATALOGUE_ARCHIVE, CATALOGUE_FILE, RepoConfig};
use crate::error::{Error, Result};
use crate::repository::client::RepoClient;
use indicatif::ProgressBar;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use tar::Archive;
use tempfile::TempDir;
use tracing::{debug, info};
use xz2::read::XzDecoder;

/// Download the catalogue and install it as the index at `index_path`
///
/// Returns the number of package records in the new snapshot.
pub fn refresh_index(
    config: &RepoConfig,
    index_path: &Path,
    progress: Option<&ProgressBar>,
) -> Result<usize> {
    let scratch = TempDir::new()
        .map_err(|e| Error::Io(format!("failed to create scratch directory: {e}")))?;
    let archive_path = scratch.path().join(CATALOGUE_ARCHIVE);

    let url = config.catalogue_url();
    info!("fetching catalogue from {}", url);
    let client = RepoClient::new()?;
    client.download_file(&url, &archive_path, progress)?;

    install_catalogue(&archive_path, scratch.path(), index_path)
}

/// Unpack a catalogue archive and move the catalogue into place
///
/// Split out from the network step so it can be exercised against locally
/// built archives.
pub fn install_catalogue(
    archive_path: &Path,
    scratch_dir: &Path,
    index_path: &Path,
) -> Result<usize> {
    debug!("extracting {}", archive_path.display());
    let archive_file = File::open(archive_path)
        .map_err(|e| Error::Io(format!("failed to open {}: {e}", archive_path.display())))?;
    let mut archive = Archive::new(XzDecoder::new(archive_file));
    archive
        .unpack(scratch_dir)
        .map_err(|e| Error::Io(format!("failed to extract catalogue archive: {e}")))?;

    let catalogue_path = scratch_dir.join(CATALOGUE_FILE);
    if !catalogue_path.is_file() {
        return Err(Error::Io(format!(
            "catalogue archive did not contain {CATALOGUE_FILE}"
        )));
    }

    let count = count_records(&catalogue_path)?;

    if let Some(parent) = index_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            Error::Io(format!(
                "failed to create directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    // Stage next to the final path so the swap is a same-filesystem rename
    let staged = index_path.with_extension("part");
    fs::copy(&catalogue_path, &staged)
        .map_err(|e| Error::Io(format!("failed to stage new index: {e}")))?;
    fs::rename(&staged, index_path)
        .map_err(|e| Error::Io(format!("failed to install new index: {e}")))?;

    info!(
        "installed index with {} packages at {}",
        count,
        index_path.display()
    );
    Ok(count)
}

fn count_records(path: &Path) -> Result<usize> {
    let file =
        File::open(path).map_err(|e| Error::Io(format!("failed to open {}: {e}", path.display())))?;
    let mut count = 0;
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| Error::Io(format!("failed to read catalogue: {e}")))?;
        if !line.trim().is_empty() {
            count += 1;
        }
    }
    Ok(count)
}
