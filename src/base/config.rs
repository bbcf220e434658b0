//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::types::Res;

/// Default seconds between poll cycles.
fn default_poll_interval_secs() -> u64 {
    5
}

/// Default seconds to wait between posted messages.
fn default_post_delay_secs() -> u64 {
    5
}

/// Configuration for the relay-bot application.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Trello API key (`TRELLO_API_KEY`).
    pub trello_api_key: String,
    /// Trello API token (`TRELLO_API_TOKEN`).
    pub trello_api_token: String,
    /// Identifier of the board to watch (`TRELLO_BOARD_ID`).
    pub trello_board_id: String,
    /// Slack bot token (`SLACK_BOT_TOKEN`).
    pub slack_bot_token: String,
    /// Slack channel that receives board activity (`SLACK_CHANNEL_ID`).
    pub slack_channel_id: String,
    /// Seconds between poll cycles (`POLL_INTERVAL_SECS`).
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Seconds to wait between posted messages (`POST_DELAY_SECS`).
    /// Keeps the bot under the chat API's rate limit.
    #[serde(default = "default_post_delay_secs")]
    pub post_delay_secs: u64,
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("RELAY_BOT"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        if result.poll_interval_secs < 1 {
            return Err(anyhow::anyhow!("Poll interval must be at least 1 second."));
        }

        if result.trello_board_id.is_empty() {
            return Err(anyhow::anyhow!("A Trello board ID is required."));
        }

        Ok(result)
    }
}
