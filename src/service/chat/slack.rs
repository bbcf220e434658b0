//! Chat delivery for the relay-bot.
//!
//! This module provides functionality for posting board activity to chat
//! platforms:
//! - Rendering an activity message into platform markup
//! - Posting to the configured channel
//! - Surfacing readiness and shutdown signals to the scheduler
//!
//! The default implementation targets Slack.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use slack_morphism::prelude::*;
use tracing::{info, instrument};

use crate::base::{
    config::Config,
    types::{ActivityMessage, Res, Void},
};

use super::{ChatClient, GenericChatClient};

// Type aliases.

type FullClient = slack_morphism::SlackClient<SlackClientHyperConnector<HttpsConnector<HttpConnector>>>;

// Extra methods on `ChatClient` applied by the slack implementation.

impl ChatClient {
    /// Creates a new Slack chat client.
    pub fn slack(config: &Config) -> Res<Self> {
        let client = SlackChatClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Structs.

/// Slack client implementation.
#[derive(Clone)]
struct SlackChatClient {
    bot_token: SlackApiToken,
    channel_id: String,
    client: Arc<FullClient>,
    shutdown: Arc<AtomicBool>,
}

impl SlackChatClient {
    /// Create a new Slack chat client.
    ///
    /// Registers a Ctrl-C hook that flips the shutdown flag observed by the
    /// scheduler loop.
    #[instrument(name = "SlackChatClient::new", skip_all)]
    fn new(config: &Config) -> Res<Self> {
        let bot_token = SlackApiToken::new(SlackApiTokenValue(config.slack_bot_token.clone()));

        // Initialize the Slack client.

        let https_connector = HttpsConnector::<HttpConnector>::builder().with_native_roots()?.https_only().enable_all_versions().build();
        let connector = SlackClientHyperConnector::with_connector(https_connector);
        let client = Arc::new(slack_morphism::SlackClient::new(connector));

        // Wire the shutdown signal.

        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = shutdown.clone();

        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl-C received; finishing the current cycle before exit.");
                flag.store(true, Ordering::SeqCst);
            }
        });

        Ok(Self {
            bot_token,
            channel_id: config.slack_channel_id.clone(),
            client,
            shutdown,
        })
    }
}

/// Renders an activity message into Slack mrkdwn: bold title, author line,
/// then the detail lines.
fn render_mrkdwn(message: &ActivityMessage) -> String {
    let mut text = format!("*{}*\n{}", message.title, message.author);

    for line in &message.lines {
        text.push('\n');
        text.push_str(line);
    }

    text
}

#[async_trait]
impl GenericChatClient for SlackChatClient {
    #[instrument(skip(self))]
    async fn wait_until_ready(&self) -> Void {
        let session = self.client.open_session(&self.bot_token);

        let bot_user = session.auth_test().await.map_err(|e| anyhow::anyhow!("Slack auth failed: {}", e))?;

        info!("Slack bot user ID: {}", bot_user.user_id.0);

        Ok(())
    }

    fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    #[instrument(skip_all)]
    async fn send_activity(&self, message: &ActivityMessage) -> Void {
        let content = SlackMessageContent::new().with_text(render_mrkdwn(message));

        let request = SlackApiChatPostMessageRequest::new(SlackChannelId(self.channel_id.clone()), content)
            .with_as_user(true)
            .with_link_names(true);

        let session = self.client.open_session(&self.bot_token);

        let _ = session.chat_post_message(&request).await.map_err(|e| anyhow::anyhow!("Failed to send message: {}", e))?;

        Ok(())
    }
}

// Tests.
