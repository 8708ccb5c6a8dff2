//! Fetches every frame of a region's look-back windows into the content repository.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::{
    cli::create_progress_bar,
    download::{ensure_dir, FetchOutcome, ImageFetcher},
    region::Source,
    repository::{ContentRepository, VersionControl},
    window::{windows, CaptureInstant},
};

/// Fixed pause between consecutive requests to a source.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Throttle { delay }
    }

    #[cfg(test)]
    pub fn none() -> Self {
        Throttle::new(Duration::ZERO)
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub missing: usize,
}

pub struct RegionPipeline<S, V> {
    source: S,
    repository: ContentRepository<V>,
    fetcher: ImageFetcher,
    throttle: Throttle,
}

impl<S: Source, V: VersionControl> RegionPipeline<S, V> {
    pub fn new(
        source: S,
        repository: ContentRepository<V>,
        fetcher: ImageFetcher,
        throttle: Throttle,
    ) -> Self {
        RegionPipeline {
            source,
            repository,
            fetcher,
            throttle,
        }
    }

    #[cfg(test)]
    pub fn repository(&self) -> &ContentRepository<V> {
        &self.repository
    }

    pub async fn run(&mut self, reference: CaptureInstant) -> Result<RunSummary> {
        self.repository
            .open()
            .await
            .context("Failed to open content repository")?;

        let mut summary = RunSummary::default();
        let windows = windows(
            reference,
            self.source.variants(),
            self.source.safety_offset_minutes(),
        );

        for (variant, instants) in windows {
            let pb = create_progress_bar(
                instants.len() as u64,
                format!("Fetching {} {}", self.source.name(), variant),
            );

            for instant in instants {
                let data_root = self.repository.data_root();
                let Some(archive) = self.source.archive_path(instant, variant, data_root) else {
                    warn!("Skipping {} frame at {}: outside calendar range", variant, instant);
                    pb.inc(1);
                    continue;
                };
                let dir = ensure_dir(archive.dir())?;

                let Some(resource) = self.source.locate(instant, variant) else {
                    pb.inc(1);
                    continue;
                };

                match self.fetcher.fetch(&resource, &dir).await? {
                    FetchOutcome::Found(_) => summary.fetched += 1,
                    FetchOutcome::NotAvailable => summary.missing += 1,
                }
                pb.inc(1);

                self.throttle.pause().await;
            }

            pb.finish_with_message(format!("{} {} done", self.source.name(), variant));
        }

        self.repository
            .close()
            .await
            .context("Failed to synchronise content repository")?;

        info!(
            "{}: {} images fetched, {} not available",
            self.source.name(),
            summary.fetched,
            summary.missing
        );

        Ok(summary)
    }
}

// -- Tests -------------------------------------------------------------------
