//! Downloads a single image from its remote source and saves it to disk.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use futures::StreamExt;
use reqwest::Client;
use tracing::{debug, info};

use crate::region::RemoteResource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The image was saved at this path.
    Found(PathBuf),
    /// Not published yet, or no longer retained by the source.
    NotAvailable,
}

#[derive(Debug, Clone, Default)]
pub struct ImageFetcher {
    client: Client,
}

impl ImageFetcher {
    pub fn new(client: Client) -> Self {
        ImageFetcher { client }
    }

    /// Downloads the resource into `destination_dir`, which must already exist.
    ///
    /// Any non-success status, or a request that fails before a response arrives, is
    /// reported as [`FetchOutcome::NotAvailable`]. Failing to write the body is an error.
    pub async fn fetch(
        &self,
        resource: &RemoteResource,
        destination_dir: &Path,
    ) -> Result<FetchOutcome> {
        let response = match self.client.get(&resource.url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(url = %resource.url, error = %e, "Request failed");
                return Ok(FetchOutcome::NotAvailable);
            }
        };

        if !response.status().is_success() {
            debug!(url = %resource.url, status = %response.status(), "Image not available");
            return Ok(FetchOutcome::NotAvailable);
        }

        let file_path = destination_dir.join(&resource.file_name);
        let mut file = File::create(&file_path)
            .with_context(|| format!("Failed to create `{}`", file_path.display()))?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.with_context(|| format!("Error reading body of {}", resource.url))?;
            file.write_all(&chunk)?;
        }

        info!("{}", file_path.display());

        Ok(FetchOutcome::Found(file_path))
    }
}

/// Creates the directory and its parents if missing, and returns it.
pub fn ensure_dir(dir: PathBuf) -> Result<PathBuf> {
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory `{}`", dir.display()))?;

    Ok(dir)
}

// -- Tests -------------------------------------------------------------------
