// src/error.rs

//! Error types for pkgrab
//!
//! A single crate-wide error enum plus a `Result` alias. Command handlers
//! convert these into user-facing messages via `anyhow`.

use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum Error {
    /// An explicitly requested package has no record in the index.
    /// Missing *transitive* dependencies are not an error; the resolver
    /// skips them and keeps going.
    #[error("package '{0}' not found in the package index")]
    PackageNotFound(String),

    /// Neither package names nor --all were supplied.
    #[error("no packages requested; name at least one package or pass --all")]
    EmptyRequest,

    /// The local index file is missing or unreadable.
    #[error("package index not available at {0}; run `pkgrab update` first")]
    IndexUnavailable(String),

    /// A catalogue line failed to parse as a package record.
    #[error("corrupt package index at line {line}: {detail}; run `pkgrab update` to refetch it")]
    IndexParse { line: usize, detail: String },

    /// An unsupported FreeBSD version, architecture, or release type.
    #[error("unsupported {what}: {value}")]
    UnsupportedConfig { what: &'static str, value: String },

    #[error("download failed: {0}")]
    Download(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;
