// src/index/list.rs

//! Package list construction
//!
//! The one entry point the fetch and report code calls: turn CLI-level
//! intent (explicit names vs the whole index) into a sorted, deduplicated
//! [`PackageList`].

use crate::error::{Error, Result};
use crate::index::reader::IndexReader;
use crate::index::resolver::{self, PackageList};

/// Build the package list for a fetch-style request
///
/// `all` projects every index record directly, with no dependency
/// expansion (the full index already is its own closure). Otherwise the
/// explicit `names` are resolved, expanding dependencies when
/// `include_deps` is set. Requesting nothing at all is an error.
pub fn build_package_list(
    reader: &mut IndexReader,
    names: &[String],
    include_deps: bool,
    all: bool,
) -> Result<PackageList> {
    if all {
        return resolver::resolve_full_index(reader);
    }
    if names.is_empty() {
        return Err(Error::EmptyRequest);
    }
    resolver::resolve(reader, names, include_deps)
}
