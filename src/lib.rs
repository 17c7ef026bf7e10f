// src/lib.rs

//! pkgrab
//!
//! Command-line client for FreeBSD package repositories: keeps a local
//! snapshot of the repository catalogue, answers metadata queries against
//! it, and fetches package archives with their dependency closures.
//!
//! # Architecture
//!
//! - Flat-file index: one JSON record per line, no database
//! - Per-invocation state: the index reader's cache and scan offset live
//!   and die with one command
//! - Worklist resolution: dependency closures computed with a visited set,
//!   safe on cycles and diamonds
//! - Network at the edges: only `update` and `fetch` touch the wire

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod format;
pub mod index;
pub mod repository;

pub use error::{Error, Result};
