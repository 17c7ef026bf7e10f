// src/main.rs

use anyhow::Result;
use clap::Parser;
use pkgrab::cli::{Cli, Commands};
use pkgrab::commands::{self, InfoOptions, SearchOptions};
use pkgrab::config::{self, RepoConfig};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = RepoConfig::from_overrides(
        cli.freebsd_version,
        cli.arch.as_deref(),
        cli.release_type.as_deref(),
    )?;

    // Offer to bootstrap the index before any command that needs it
    if !matches!(cli.command, Commands::Update) && !config::index_path()?.is_file() {
        if commands::confirm("No package database downloaded. Would you like to run update first?")?
        {
            commands::cmd_update(&config)?;
        }
    }

    match cli.command {
        Commands::Update => commands::cmd_update(&config),

        Commands::Fetch {
            pkg_names,
            dependencies,
            all,
            destdir,
            yes,
        } => commands::cmd_fetch(&config, &pkg_names, dependencies, all, destdir.as_deref(), yes),

        Commands::Info {
            pkg_names,
            full,
            origin,
            prefix,
            comment,
            required_shlibs,
            provided_shlibs,
            annotations,
            size,
            pkg_message,
            dependencies,
            required_by,
        } => {
            let opts = InfoOptions {
                full,
                origin,
                prefix,
                comment,
                required_shlibs,
                provided_shlibs,
                annotations,
                size,
                pkg_message,
                dependencies,
                required_by,
            };
            commands::cmd_info(&pkg_names, &opts)
        }

        Commands::Search {
            patterns,
            comment,
            description,
            exact,
            depends_on,
            origins,
            prefix,
            size,
        } => {
            let opts = SearchOptions {
                comment,
                description,
                exact,
                depends_on,
                origins,
                prefix,
                size,
            };
            commands::cmd_search(&patterns, &opts)
        }
    }
}
