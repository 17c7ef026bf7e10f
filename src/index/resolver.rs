// src/index/resolver.rs

//! Dependency closure resolution
//!
//! Expands a set of requested package names into the full set of packages
//! to fetch. Traversal is an explicit worklist with a visited set rather
//! than recursion: linear in the number of dependency edges, and the
//! visited check doubles as the cycle breaker.
//!
//! A name missing from the index is fatal only when the user asked for it
//! by name. A missing *transitive* dependency is a gap in a possibly stale
//! index and must not block fetching everything that is available; gaps
//! are skipped and reported once, in aggregate.

use crate::error::{Error, Result};
use crate::index::reader::IndexReader;
use crate::index::record::PackageRecord;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, warn};

/// Read-only projection of a package record: what fetch and display need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    pub name: String,
    pub version: String,
    /// Remote archive size in bytes
    pub size: u64,
}

impl ResolvedPackage {
    fn from_record(record: &PackageRecord) -> Self {
        Self {
            name: record.name.clone(),
            version: record.version.clone(),
            size: record.pkgsize,
        }
    }
}

/// Final resolution result: packages sorted by name, sizes summed once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageList {
    pub packages: Vec<ResolvedPackage>,
    pub total_size: u64,
}

impl PackageList {
    /// Sort, deduplicate-by-construction invariant holds upstream
    fn from_unsorted(mut packages: Vec<ResolvedPackage>) -> Self {
        packages.sort_by(|a, b| a.name.cmp(&b.name));
        let total_size = packages.iter().map(|p| p.size).sum();
        Self {
            packages,
            total_size,
        }
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Resolve `roots` against the index, optionally expanding dependencies
///
/// Each root must exist in the index. With `include_deps`, every package's
/// dependencies are enqueued and resolved in turn until the closure is
/// complete. A name is looked up at most once; once resolved it is never
/// re-descended into, which bounds the work on diamond graphs and
/// terminates dependency cycles.
pub fn resolve(
    reader: &mut IndexReader,
    roots: &[String],
    include_deps: bool,
) -> Result<PackageList> {
    let mut queue: VecDeque<(String, bool)> = roots
        .iter()
        .map(|name| (name.clone(), true))
        .collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut resolved: Vec<ResolvedPackage> = Vec::new();
    let mut gaps: usize = 0;

    while let Some((name, is_root)) = queue.pop_front() {
        if !seen.insert(name.clone()) {
            continue;
        }

        let record = match reader.lookup(&name)? {
            Some(record) => record,
            None if is_root => return Err(Error::PackageNotFound(name)),
            None => {
                debug!("dependency {} has no index record, skipping", name);
                gaps += 1;
                continue;
            }
        };

        resolved.push(ResolvedPackage::from_record(&record));

        if include_deps {
            for dep_name in record.deps.keys() {
                if !seen.contains(dep_name) {
                    queue.push_back((dep_name.clone(), false));
                }
            }
        }
    }

    if gaps > 0 {
        warn!(
            "{} dependenc{} had no index record and will not be fetched; the index may be stale",
            gaps,
            if gaps == 1 { "y" } else { "ies" }
        );
    }

    Ok(PackageList::from_unsorted(resolved))
}

/// Project every record in the index, without dependency expansion
pub fn resolve_full_index(reader: &mut IndexReader) -> Result<PackageList> {
    let mut packages = Vec::new();
    for record in reader.scan_all()? {
        packages.push(ResolvedPackage::from_record(&record?));
    }
    Ok(PackageList::from_unsorted(packages))
}
