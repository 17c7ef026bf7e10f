// src/cli.rs
//! CLI definitions for pkgrab
//!
//! This module contains the command-line interface definitions using clap.
//! The command implementations are in the `commands` module.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pkgrab")]
#[command(version)]
#[command(about = "Browse and fetch packages from FreeBSD package repositories", long_about = None)]
pub struct Cli {
    /// FreeBSD major version of the repository (11-14)
    #[arg(long, global = true)]
    pub freebsd_version: Option<u32>,

    /// Package architecture (e.g. amd64, aarch64)
    #[arg(long, global = true)]
    pub arch: Option<String>,

    /// Release train: latest, quarterly, or release_0 through release_4
    #[arg(long, global = true)]
    pub release_type: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the repository catalogue and rebuild the local index
    Update,

    /// Download package archives to local disk
    Fetch {
        /// Packages to fetch
        pkg_names: Vec<String>,

        /// Also fetch all transitive dependencies
        #[arg(short, long)]
        dependencies: bool,

        /// Fetch every package in the index
        #[arg(short, long)]
        all: bool,

        /// Directory to download into (defaults to the cache directory)
        #[arg(short = 'o', long)]
        destdir: Option<String>,

        /// Assume yes for every prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show metadata for named packages
    Info {
        /// Packages to inspect
        #[arg(required = true)]
        pkg_names: Vec<String>,

        /// Show every field of the package record
        #[arg(short, long)]
        full: bool,

        /// Show the port origin
        #[arg(short, long)]
        origin: bool,

        /// Show the installation prefix
        #[arg(short, long)]
        prefix: bool,

        /// Show the one-line comment
        #[arg(short, long)]
        comment: bool,

        /// Show required shared libraries
        #[arg(short = 'B', long)]
        required_shlibs: bool,

        /// Show provided shared libraries
        #[arg(short = 'b', long)]
        provided_shlibs: bool,

        /// Show annotations
        #[arg(short = 'A', long)]
        annotations: bool,

        /// Show the flat (installed) size
        #[arg(short, long)]
        size: bool,

        /// Show the post-install message
        #[arg(short = 'M', long)]
        pkg_message: bool,

        /// Show direct dependencies
        #[arg(short, long)]
        dependencies: bool,

        /// Show packages that depend on this one
        #[arg(short, long)]
        required_by: bool,
    },

    /// Search the index for packages
    Search {
        /// Patterns to look for
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Also match against package comments
        #[arg(short, long)]
        comment: bool,

        /// Also match against package descriptions
        #[arg(short = 'D', long)]
        description: bool,

        /// Match exactly instead of by substring
        #[arg(short, long)]
        exact: bool,

        /// Show each hit's dependencies
        #[arg(short, long)]
        depends_on: bool,

        /// Show origins instead of name-version
        #[arg(short, long)]
        origins: bool,

        /// Show each hit's installation prefix
        #[arg(short, long)]
        prefix: bool,

        /// Show each hit's flat (installed) size
        #[arg(short, long)]
        size: bool,
    },
}
