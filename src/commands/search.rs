// src/commands/search.rs

//! The `search` command: find packages in the index
//!
//! Substring matching on package names, optionally widened to comments and
//! descriptions; `--exact` switches every comparison to equality. No regex
//! support.

use crate::config;
use crate::format::size_fmt;
use crate::index::{IndexReader, PackageRecord};
use anyhow::Result;
use std::fmt::Write as _;

/// What to match against and how to render hits
#[derive(Debug, Default)]
pub struct SearchOptions {
    /// Also match against package comments
    pub comment: bool,
    /// Also match against package descriptions
    pub description: bool,
    /// Require equality instead of substring containment
    pub exact: bool,
    /// Show each hit's dependencies
    pub depends_on: bool,
    /// Show origins instead of name-version
    pub origins: bool,
    /// Show each hit's prefix
    pub prefix: bool,
    /// Show each hit's flat (installed) size
    pub size: bool,
}

/// Scan the whole index and print every record matching any pattern
pub fn cmd_search(patterns: &[String], opts: &SearchOptions) -> Result<()> {
    let mut reader = IndexReader::open(config::index_path()?)?;

    let mut hits: Vec<PackageRecord> = Vec::new();
    for record in reader.scan_all()? {
        let record = record?;
        if matches(&record, patterns, opts) {
            hits.push(record);
        }
    }
    hits.sort_by(|a, b| a.name.cmp(&b.name));

    println!("{}", render_results(&hits, opts).trim_end());
    Ok(())
}

fn matches(record: &PackageRecord, patterns: &[String], opts: &SearchOptions) -> bool {
    let comment = record.comment.as_deref().unwrap_or("");
    let desc = record.desc.as_deref().unwrap_or("");

    patterns.iter().any(|pattern| {
        if opts.exact {
            pattern == &record.name
                || (opts.comment && pattern == comment)
                || (opts.description && pattern == desc)
        } else {
            record.name.contains(pattern.as_str())
                || (opts.comment && comment.contains(pattern.as_str()))
                || (opts.description && desc.contains(pattern.as_str()))
        }
    })
}

fn render_results(results: &[PackageRecord], opts: &SearchOptions) -> String {
    let mut out = String::new();
    let compact = !opts.depends_on && !opts.prefix && !opts.size;

    for record in results {
        let name_version = format!("{}-{}", record.name, record.version);
        let heading = if opts.origins {
            record.origin.as_deref().unwrap_or(&name_version)
        } else {
            &name_version
        };
        let comment = record.comment.as_deref().unwrap_or("");

        if compact {
            if opts.origins {
                let _ = writeln!(out, "{heading:<26} {comment}");
            } else {
                let _ = writeln!(out, "{heading:<30} {comment}");
            }
            continue;
        }

        let _ = writeln!(out, "{heading}");
        if opts.prefix {
            let _ = writeln!(
                out,
                "{:<16} : {}",
                "Prefix",
                record.prefix.as_deref().unwrap_or("")
            );
        }
        let _ = writeln!(out, "{:<16} : {}", "Comment", comment);
        if opts.size {
            let _ = writeln!(
                out,
                "{:<16} : {}",
                "Flat size",
                size_fmt(record.flatsize.unwrap_or(0))
            );
        }
        if opts.depends_on && !record.deps.is_empty() {
            let _ = writeln!(out, "{:<16} : ", "Depends on");
            for (dep_name, dep) in &record.deps {
                let _ = writeln!(out, "\t{dep_name}-{}", dep.version);
            }
        }
    }
    out
}
