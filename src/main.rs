#![allow(async_fn_in_trait)]

mod cli;
mod config;
mod download;
mod error;
mod pipeline;
mod region;
mod repository;
#[cfg(test)]
mod test_support;
mod window;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{command, Cli};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    command::fetch(cli.region, &config).await?;
    println!("Done");

    Ok(())
}
