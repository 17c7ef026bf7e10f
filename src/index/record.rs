// src/index/record.rs

//! Package record data structures
//!
//! One [`PackageRecord`] is one line of the catalogue: a self-contained
//! JSON document describing a single remote package. Only `name`,
//! `version`, and `pkgsize` are required; everything else is descriptive
//! payload that the resolver never touches.

use serde::Deserialize;
use std::collections::BTreeMap;

/// One entry in the package index
#[derive(Debug, Clone, Deserialize)]
pub struct PackageRecord {
    /// Package name, unique within one index snapshot
    pub name: String,
    /// Opaque version string; compared for equality only, never ordered
    pub version: String,
    /// Size of the remote archive in bytes
    #[serde(default)]
    pub pkgsize: u64,
    /// Direct dependencies: package name to pinned origin/version
    #[serde(default)]
    pub deps: BTreeMap<String, DependencyEntry>,

    pub origin: Option<String>,
    pub comment: Option<String>,
    pub desc: Option<String>,
    pub abi: Option<String>,
    pub prefix: Option<String>,
    pub maintainer: Option<String>,
    pub www: Option<String>,
    /// Installed (uncompressed) size in bytes
    pub flatsize: Option<u64>,
    /// "single" or "and"/"or" for multi-licensed packages
    pub licenselogic: Option<String>,
    #[serde(default)]
    pub licenses: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub shlibs_required: Vec<String>,
    #[serde(default)]
    pub shlibs_provided: Vec<String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    pub messages: Option<Messages>,
}

/// Minimal dependency record inside `deps`
#[derive(Debug, Clone, Deserialize)]
pub struct DependencyEntry {
    pub origin: Option<String>,
    pub version: String,
}

/// Post-install message payload
///
/// Old catalogues carry a bare string, newer ones a list of typed entries.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Messages {
    Typed(Vec<PackageMessage>),
    Raw(String),
}

/// One typed pkg-message entry
#[derive(Debug, Clone, Deserialize)]
pub struct PackageMessage {
    /// When to show the message: install, upgrade, remove, or absent for always
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: String,
}
