//! Board service integration for the relay-bot.
//!
//! This module provides functionality for reading activity from the watched
//! board:
//! - Fetching recent actions, narrowed by the allow-list filter
//! - Reading the board's last-activity date to seed the watermark
//!
//! The default implementation targets the Trello REST API.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::base::{
    config::Config,
    types::{BoardAction, Res},
};

use super::{BoardClient, GenericBoardClient};

const TRELLO_API_BASE: &str = "https://api.trello.com/1";

// Extra methods on `BoardClient` applied by the trello implementation.

impl BoardClient {
    /// Creates a new Trello board client.
    pub fn trello(config: &Config) -> Res<Self> {
        let client = TrelloBoardClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Structs.

/// Trello client implementation.
#[derive(Clone)]
struct TrelloBoardClient {
    http: reqwest::Client,
    api_key: String,
    api_token: String,
    board_id: String,
}

impl TrelloBoardClient {
    /// Create a new Trello board client.
    #[instrument(name = "TrelloBoardClient::new", skip_all)]
    fn new(config: &Config) -> Res<Self> {
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            api_key: config.trello_api_key.clone(),
            api_token: config.trello_api_token.clone(),
            board_id: config.trello_board_id.clone(),
        })
    }
}

/// Board metadata, narrowed to the last-activity date.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardSummary {
    #[serde(default)]
    date_last_activity: Option<DateTime<Utc>>,
}

/// Decodes raw actions one at a time so a single malformed record is
/// dropped with a warning instead of failing the whole batch.
fn decode_actions(raw: Vec<Value>) -> Vec<BoardAction> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<BoardAction>(value) {
            Ok(action) => Some(action),
            Err(err) => {
                warn!("Dropping malformed action: {err}");
                None
            }
        })
        .collect()
}

#[async_trait]
impl GenericBoardClient for TrelloBoardClient {
    #[instrument(skip(self, filter))]
    async fn fetch_actions(&self, filter: &str, limit: u32, since: DateTime<Utc>) -> Res<Vec<BoardAction>> {
        let url = format!("{TRELLO_API_BASE}/boards/{}/actions", self.board_id);
        let limit = limit.to_string();
        let since = since.to_rfc3339();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("token", self.api_token.as_str()),
                ("filter", filter),
                ("limit", limit.as_str()),
                ("since", since.as_str()),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| anyhow::anyhow!("Failed to fetch board actions: {}", e))?;

        let raw: Vec<Value> = response.json().await?;

        Ok(decode_actions(raw))
    }

    #[instrument(skip(self))]
    async fn get_last_activity(&self) -> Res<DateTime<Utc>> {
        let url = format!("{TRELLO_API_BASE}/boards/{}", self.board_id);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("token", self.api_token.as_str()),
                ("fields", "dateLastActivity"),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| anyhow::anyhow!("Failed to fetch board metadata: {}", e))?;

        let board: BoardSummary = response.json().await?;

        board.date_last_activity.ok_or_else(|| anyhow::anyhow!("Board has no recorded activity"))
    }
}

// Tests.
