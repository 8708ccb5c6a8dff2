use anyhow::Result;
use chrono::Utc;
use reqwest::Client;
use tracing::info;

use crate::{
    cli::RegionName,
    config::Config,
    download::ImageFetcher,
    pipeline::{RegionPipeline, RunSummary, Throttle},
    region::{Malaysia, Singapore},
    repository::{ContentRepository, GitCli},
    window::CaptureInstant,
};

/// Fetches the region's images for the current time and synchronises the content branch.
pub async fn fetch(region: RegionName, config: &Config) -> Result<RunSummary> {
    let client = Client::new();
    let fetcher = ImageFetcher::new(client.clone());
    let throttle = Throttle::new(config.fetch_delay);

    let repository = match &config.remote {
        Some(remote) => ContentRepository::remote(
            GitCli::new(remote.clone(), client),
            remote.checkout_dir(),
            &config.content_branch,
        ),
        None => ContentRepository::local(config.local_data_root.clone()),
    };

    let reference = CaptureInstant::from_millis(Utc::now().timestamp_millis());
    info!("Load {} rain areas at {}", region, reference);

    match region {
        RegionName::Singapore => {
            RegionPipeline::new(Singapore::default(), repository, fetcher, throttle)
                .run(reference)
                .await
        }
        RegionName::Malaysia => {
            RegionPipeline::new(Malaysia::default(), repository, fetcher, throttle)
                .run(reference)
                .await
        }
    }
}
