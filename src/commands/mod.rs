// src/commands/mod.rs

//! Command handlers for the pkgrab CLI

mod fetch;
mod info;
mod search;
mod update;

pub use fetch::cmd_fetch;
pub use info::{cmd_info, InfoOptions};
pub use search::{cmd_search, SearchOptions};
pub use update::cmd_update;

use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Ask a yes/no question on stdout, defaulting to no
pub fn confirm(prompt: &str) -> Result<bool> {
    loop {
        print!("{prompt} [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" | "" => return Ok(false),
            _ => println!("Please answer y[es] or n[o]."),
        }
    }
}
