// src/commands/info.rs

//! The `info` command: inspect package metadata
//!
//! Field selection mirrors pkg-info: with no selection flags only the
//! name-version line is printed; `--full` prints the fixed complete
//! report.

use crate::config;
use crate::error::Error;
use crate::format::size_fmt;
use crate::index::{IndexReader, Messages, PackageRecord};
use anyhow::Result;
use std::fmt::Write as _;

/// Which fields to show for each package
#[derive(Debug, Default)]
pub struct InfoOptions {
    pub full: bool,
    pub origin: bool,
    pub prefix: bool,
    pub comment: bool,
    pub required_shlibs: bool,
    pub provided_shlibs: bool,
    pub annotations: bool,
    pub size: bool,
    pub pkg_message: bool,
    pub dependencies: bool,
    pub required_by: bool,
}

/// Print metadata for each named package
pub fn cmd_info(packages: &[String], opts: &InfoOptions) -> Result<()> {
    let mut reader = IndexReader::open(config::index_path()?)?;

    for name in packages {
        let record = reader
            .lookup(name)?
            .ok_or_else(|| Error::PackageNotFound(name.clone()))?;

        let out = if opts.full {
            render_full(&record)
        } else {
            let mut out = render_selected(&record, opts);
            if opts.required_by {
                out.push_str(&render_required_by(&mut reader, &record.name)?);
            }
            out
        };
        println!("{}", out.trim_end());
    }
    Ok(())
}

fn field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{label:<15}: {value}");
}

fn render_selected(record: &PackageRecord, opts: &InfoOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}-{}", record.name, record.version);

    if opts.origin {
        field(&mut out, "Origin", record.origin.as_deref().unwrap_or(""));
    }
    if opts.prefix {
        field(&mut out, "Prefix", record.prefix.as_deref().unwrap_or(""));
    }
    if opts.comment {
        field(&mut out, "Comment", record.comment.as_deref().unwrap_or(""));
    }
    if opts.required_shlibs && !record.shlibs_required.is_empty() {
        out.push_str("Shared Libs required:\n");
        for lib in &record.shlibs_required {
            let _ = writeln!(out, "\t{lib}");
        }
    }
    if opts.provided_shlibs && !record.shlibs_provided.is_empty() {
        out.push_str("Shared Libs provided:\n");
        for lib in &record.shlibs_provided {
            let _ = writeln!(out, "\t{lib}");
        }
    }
    if opts.annotations && !record.annotations.is_empty() {
        field(&mut out, "Annotations", "");
        for (key, value) in &record.annotations {
            let _ = writeln!(out, "\t{key:<15}: {value}");
        }
    }
    if opts.size {
        field(
            &mut out,
            "Flat size",
            &size_fmt(record.flatsize.unwrap_or(0)),
        );
    }
    if opts.pkg_message {
        field(&mut out, "Message", "");
        if let Some(messages) = &record.messages {
            out.push_str(&render_messages(messages));
        }
    }
    if opts.dependencies && !record.deps.is_empty() {
        field(&mut out, "Depends on", "");
        for (dep_name, dep) in &record.deps {
            let _ = writeln!(out, "\t{dep_name}-{}", dep.version);
        }
    }
    out
}

fn render_messages(messages: &Messages) -> String {
    let mut out = String::new();
    match messages {
        Messages::Typed(entries) => {
            for entry in entries {
                let heading = match entry.kind.as_deref() {
                    None | Some("") => "Always:",
                    Some("install") => "On install:",
                    Some("upgrade") => "On upgrade:",
                    Some("remove") => "On remove:",
                    Some(_) => continue,
                };
                out.push_str(heading);
                out.push('\n');
                out.push_str(&entry.message);
            }
        }
        Messages::Raw(message) => {
            // Old catalogues carry a bare install message
            out.push_str("On install:\n");
            out.push_str(message);
        }
    }
    out.push_str("\n\n");
    out
}

fn render_full(record: &PackageRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}-{}", record.name, record.version);
    field(&mut out, "Name", &record.name);
    field(&mut out, "Version", &record.version);
    field(&mut out, "Origin", record.origin.as_deref().unwrap_or(""));
    field(&mut out, "Architecture", record.abi.as_deref().unwrap_or(""));
    field(&mut out, "Prefix", record.prefix.as_deref().unwrap_or(""));
    field(&mut out, "Categories", &record.categories.join(", "));

    // Single-licensed packages print the one license without join overhead
    if record.licenselogic.as_deref() == Some("single") && !record.licenses.is_empty() {
        field(&mut out, "Licenses", &record.licenses[0]);
    } else {
        field(&mut out, "Licenses", &record.licenses.join(", "));
    }

    field(
        &mut out,
        "Maintainer",
        record.maintainer.as_deref().unwrap_or(""),
    );
    field(&mut out, "WWW", record.www.as_deref().unwrap_or(""));
    field(&mut out, "Comment", record.comment.as_deref().unwrap_or(""));

    if !record.options.is_empty() {
        field(&mut out, "Options", "");
        for (option, status) in &record.options {
            let _ = writeln!(out, "\t{option:<16} : {status}");
        }
    }

    if !record.shlibs_required.is_empty() {
        out.push_str("Shared Libs required:\n");
        for lib in &record.shlibs_required {
            let _ = writeln!(out, "\t{lib}");
        }
    }
    if !record.shlibs_provided.is_empty() {
        out.push_str("Shared Libs provided:\n");
        for lib in &record.shlibs_provided {
            let _ = writeln!(out, "\t{lib}");
        }
    }

    if !record.annotations.is_empty() {
        field(&mut out, "Annotations", "");
        for (key, value) in &record.annotations {
            let _ = writeln!(out, "\t{key:<15}: {value}");
        }
    }

    field(
        &mut out,
        "Flat size",
        &size_fmt(record.flatsize.unwrap_or(0)),
    );
    field(&mut out, "Description", "");
    out.push_str(record.desc.as_deref().unwrap_or(""));
    out
}

/// Reverse-dependency listing: packages whose deps name this one
fn render_required_by(reader: &mut IndexReader, name: &str) -> Result<String> {
    let mut dependents = Vec::new();
    for record in reader.scan_all()? {
        let record = record?;
        if record.deps.contains_key(name) {
            dependents.push(format!("{}-{}", record.name, record.version));
        }
    }
    dependents.sort();

    let mut out = String::new();
    if !dependents.is_empty() {
        field(&mut out, "Required by", "");
        for dependent in dependents {
            let _ = writeln!(out, "\t{dependent}");
        }
    }
    Ok(out)
}
