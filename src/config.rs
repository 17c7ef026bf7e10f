// src/config.rs

//! Repository coordinates and local paths
//!
//! A repository is addressed by FreeBSD major version, architecture, and
//! release type. Together they form the ABI string that selects the remote
//! catalogue, e.g. `FreeBSD:13:amd64`.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Base URL of the upstream package mirrors
const REPO_BASE_URL: &str = "http://pkg.freebsd.org";

/// Filename of the compressed catalogue archive on the mirror
pub const CATALOGUE_ARCHIVE: &str = "packagesite.txz";

/// Filename of the catalogue inside the archive
pub const CATALOGUE_FILE: &str = "packagesite.yaml";

/// Filename of the local index snapshot in the cache directory
pub const INDEX_FILE: &str = "pkgdb.yaml";

/// FreeBSD major versions with package repositories
const SUPPORTED_VERSIONS: &[u32] = &[11, 12, 13, 14];

/// Architectures the mirrors build packages for
const SUPPORTED_ARCHITECTURES: &[&str] = &[
    "i386",
    "amd64",
    "powerpc",
    "powerpc64",
    "powerpc64le",
    "powerpcspe",
    "armv6",
    "armv7",
    "aarch64",
    "riscv64",
];

/// Release trains published on the mirrors
const SUPPORTED_RELEASE_TYPES: &[&str] = &[
    "latest",
    "quarterly",
    "release_0",
    "release_1",
    "release_2",
    "release_3",
    "release_4",
];

/// Which remote repository to talk to
#[derive(Debug, Clone)]
pub struct RepoConfig {
    version: u32,
    architecture: String,
    release_type: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            version: 13,
            architecture: "amd64".to_string(),
            release_type: "quarterly".to_string(),
        }
    }
}

impl RepoConfig {
    /// Build a config from optional CLI overrides, validating each one
    pub fn from_overrides(
        version: Option<u32>,
        architecture: Option<&str>,
        release_type: Option<&str>,
    ) -> Result<Self> {
        let mut config = Self::default();
        if let Some(ver) = version {
            config.set_version(ver)?;
        }
        if let Some(arch) = architecture {
            config.set_architecture(arch)?;
        }
        if let Some(rtype) = release_type {
            config.set_release_type(rtype)?;
        }
        Ok(config)
    }

    pub fn set_version(&mut self, version: u32) -> Result<()> {
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(Error::UnsupportedConfig {
                what: "FreeBSD version",
                value: version.to_string(),
            });
        }
        self.version = version;
        Ok(())
    }

    pub fn set_architecture(&mut self, arch: &str) -> Result<()> {
        if !SUPPORTED_ARCHITECTURES.contains(&arch) {
            return Err(Error::UnsupportedConfig {
                what: "architecture",
                value: arch.to_string(),
            });
        }
        self.architecture = arch.to_string();
        Ok(())
    }

    pub fn set_release_type(&mut self, rtype: &str) -> Result<()> {
        if !SUPPORTED_RELEASE_TYPES.contains(&rtype) {
            return Err(Error::UnsupportedConfig {
                what: "release type",
                value: rtype.to_string(),
            });
        }
        self.release_type = rtype.to_string();
        Ok(())
    }

    /// ABI string selecting the remote catalogue, e.g. `FreeBSD:13:amd64`
    pub fn abi(&self) -> String {
        format!("FreeBSD:{}:{}", self.version, self.architecture)
    }

    /// URL of the repository's package directory, with trailing slash
    pub fn repo_url(&self) -> String {
        format!(
            "{}/{}/{}/All/",
            REPO_BASE_URL,
            self.abi(),
            self.release_type
        )
    }

    /// URL of a file inside the repository's package directory
    pub fn package_url(&self, filename: &str) -> String {
        format!("{}{}", self.repo_url(), filename)
    }

    /// URL of the compressed catalogue archive
    pub fn catalogue_url(&self) -> String {
        self.package_url(CATALOGUE_ARCHIVE)
    }
}

/// Per-user cache directory where the index snapshot and downloads live
pub fn cache_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "pkgrab")
        .ok_or_else(|| Error::Io("could not determine a home directory".to_string()))?;
    Ok(dirs.cache_dir().to_path_buf())
}

/// Path of the local index snapshot
pub fn index_path() -> Result<PathBuf> {
    Ok(cache_dir()?.join(INDEX_FILE))
}
