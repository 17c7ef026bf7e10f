// src/repository/client.rs

//! HTTP client for repository operations
//!
//! Thin wrapper around a blocking reqwest client: bounded retries on
//! transport errors, streaming downloads to a temp file with an atomic
//! rename, and optional progress-bar updates while streaming.

use crate::error::{Error, Result};
use indicatif::ProgressBar;
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Timeout for establishing a connection and reading headers
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum attempts per download
const MAX_RETRIES: u32 = 3;

/// Base delay between retries, multiplied by the attempt number
const RETRY_DELAY_MS: u64 = 1000;

/// Buffer size for streaming downloads
const STREAM_BUFFER_SIZE: usize = 8192;

/// Blocking HTTP client with retry support
pub struct RepoClient {
    client: Client,
    max_retries: u32,
}

impl RepoClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::Download(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Download `url` to `dest_path`, streaming through a `.part` file
    ///
    /// The final file only appears once the body has been fully written,
    /// so an interrupted download never leaves a plausible-looking
    /// destination behind. When a progress bar is given, its length is set
    /// from Content-Length (when the server sends one) and its position
    /// follows the stream.
    pub fn download_file(
        &self,
        url: &str,
        dest_path: &Path,
        progress: Option<&ProgressBar>,
    ) -> Result<()> {
        debug!("downloading {} to {}", url, dest_path.display());

        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Io(format!(
                    "failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.client.get(url).send() {
                Ok(response) => {
                    if !response.status().is_success() {
                        return Err(Error::Download(format!(
                            "HTTP {} from {}",
                            response.status(),
                            url
                        )));
                    }

                    let temp_path = dest_path.with_extension("part");
                    let mut file = File::create(&temp_path).map_err(|e| {
                        Error::Io(format!("failed to create {}: {e}", temp_path.display()))
                    })?;

                    let written = match stream_response_to_file(response, &mut file, progress) {
                        Ok(written) => written,
                        Err(e) => {
                            let _ = fs::remove_file(&temp_path);
                            return Err(e);
                        }
                    };

                    fs::rename(&temp_path, dest_path).map_err(|e| {
                        Error::Io(format!(
                            "failed to move {} to {}: {e}",
                            temp_path.display(),
                            dest_path.display()
                        ))
                    })?;

                    debug!("downloaded {} bytes to {}", written, dest_path.display());
                    return Ok(());
                }
                Err(e) => {
                    if attempt >= self.max_retries {
                        return Err(Error::Download(format!(
                            "failed to download {url} after {attempt} attempts: {e}"
                        )));
                    }
                    warn!("download attempt {} failed: {}, retrying", attempt, e);
                    std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS * attempt as u64));
                }
            }
        }
    }
}

/// Stream a response body to a file in fixed-size chunks
fn stream_response_to_file(
    mut response: reqwest::blocking::Response,
    file: &mut File,
    progress: Option<&ProgressBar>,
) -> Result<u64> {
    if let Some(pb) = progress {
        if let Some(total) = response.content_length() {
            pb.set_length(total);
        }
    }

    let mut written: u64 = 0;
    let mut buffer = [0u8; STREAM_BUFFER_SIZE];
    loop {
        let read = response
            .read(&mut buffer)
            .map_err(|e| Error::Download(format!("failed to read response body: {e}")))?;
        if read == 0 {
            break;
        }
        file.write_all(&buffer[..read])
            .map_err(|e| Error::Io(format!("failed to write downloaded data: {e}")))?;
        written += read as u64;
        if let Some(pb) = progress {
            pb.set_position(written);
        }
    }

    Ok(written)
}
