use std::{env, path::PathBuf, time::Duration};

use anyhow::{anyhow, Context, Result};
use dotenvy::dotenv;

const DEFAULT_BRANCH: &str = "data";
const DEFAULT_ACTOR: &str = "rainarea-bot";
const DEFAULT_DATA_ROOT: &str = "data";
const DEFAULT_FETCH_DELAY_MS: u64 = 1000;

/// Directory under the workspace the content branch is checked out into.
const CHECKOUT_DIR: &str = "content";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when no workspace is configured; git synchronisation is then skipped.
    pub remote: Option<RemoteConfig>,
    pub content_branch: String,
    /// Where images are written when running without a workspace.
    pub local_data_root: PathBuf,
    pub fetch_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub workspace: PathBuf,
    pub owner: String,
    pub name: String,
    pub actor: String,
    pub token: String,
}

impl RemoteConfig {
    pub fn checkout_dir(&self) -> PathBuf {
        self.workspace.join(CHECKOUT_DIR)
    }

    /// `owner/name`
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let remote = match lookup("GITHUB_WORKSPACE").filter(|w| !w.is_empty()) {
            Some(workspace) => {
                let repository =
                    lookup("GITHUB_REPOSITORY").context("GITHUB_REPOSITORY must be set")?;
                let (owner, name) = repository
                    .split_once('/')
                    .filter(|(owner, name)| !owner.is_empty() && !name.is_empty())
                    .ok_or_else(|| {
                        anyhow!("GITHUB_REPOSITORY must be `owner/name`, got `{repository}`")
                    })?;

                Some(RemoteConfig {
                    workspace: PathBuf::from(workspace),
                    owner: owner.to_string(),
                    name: name.to_string(),
                    actor: lookup("GITHUB_ACTOR").unwrap_or_else(|| DEFAULT_ACTOR.to_string()),
                    token: lookup("GITHUB_TOKEN").context("GITHUB_TOKEN must be set")?,
                })
            }
            None => None,
        };

        let fetch_delay_ms = match lookup("FETCH_DELAY_MS") {
            Some(ms) => ms
                .parse()
                .context("FETCH_DELAY_MS must be a number of milliseconds")?,
            None => DEFAULT_FETCH_DELAY_MS,
        };

        Ok(Self {
            remote,
            content_branch: lookup("CONTENT_BRANCH")
                .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            local_data_root: PathBuf::from(
                lookup("DATA_ROOT").unwrap_or_else(|| DEFAULT_DATA_ROOT.to_string()),
            ),
            fetch_delay: Duration::from_millis(fetch_delay_ms),
        })
    }

    /// Root of the archived file tree for this run.
    pub fn data_root(&self) -> PathBuf {
        match &self.remote {
            Some(remote) => remote.checkout_dir(),
            None => self.local_data_root.clone(),
        }
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn should_run_locally_without_workspace() {
        let config = config(&[]).unwrap();

        assert!(config.remote.is_none());
        assert_eq!(config.content_branch, "data");
        assert_eq!(config.data_root(), PathBuf::from("data"));
        assert_eq!(config.fetch_delay, Duration::from_millis(1000));
    }

    #[test]
    fn should_read_remote_settings() {
        let config = config(&[
            ("GITHUB_WORKSPACE", "/work"),
            ("GITHUB_REPOSITORY", "octo/rain"),
            ("GITHUB_ACTOR", "octocat"),
            ("GITHUB_TOKEN", "secret"),
            ("CONTENT_BRANCH", "images"),
            ("FETCH_DELAY_MS", "250"),
        ])
        .unwrap();

        let remote = config.remote.as_ref().unwrap();
        assert_eq!(remote.slug(), "octo/rain");
        assert_eq!(remote.actor, "octocat");
        assert_eq!(config.content_branch, "images");
        assert_eq!(config.data_root(), PathBuf::from("/work/content"));
        assert_eq!(config.fetch_delay, Duration::from_millis(250));
    }

    #[test]
    fn should_reject_malformed_repository() {
        let result = config(&[
            ("GITHUB_WORKSPACE", "/work"),
            ("GITHUB_REPOSITORY", "rain"),
            ("GITHUB_TOKEN", "secret"),
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn should_require_token_with_workspace() {
        let result = config(&[("GITHUB_WORKSPACE", "/work"), ("GITHUB_REPOSITORY", "octo/rain")]);

        assert!(result.is_err());
    }

    #[test]
    fn should_reject_non_numeric_delay() {
        assert!(config(&[("FETCH_DELAY_MS", "soon")]).is_err());
    }
}
