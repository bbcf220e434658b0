//! Runtime services and shared state for the relay-bot.

use tracing::instrument;

use crate::{
    activity::poller::ActivityPoller,
    base::{
        config::Config,
        types::{Res, Void},
    },
    service::{board::BoardClient, chat::ChatClient},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the board client, chat client, and configuration.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The board client instance.
    pub board: BoardClient,
    /// The chat client instance.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        // Initialize the board client.
        let board = BoardClient::trello(&config)?;

        // Initialize the chat client.
        let chat = ChatClient::slack(&config)?;

        Ok(Self { config, board, chat })
    }

    /// Seed the activity poller from the board, then drive it until the
    /// host shuts down.
    pub async fn start(&self) -> Void {
        let mut poller = ActivityPoller::new(&self.config, self.board.clone(), self.chat.clone()).await?;

        poller.run().await
    }
}
