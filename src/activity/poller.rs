//! Polls the board for new activity and relays it into the chat channel.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument};

use crate::{
    activity::{classify, format},
    base::{
        config::Config,
        types::{Res, Void},
    },
    service::{board::BoardClient, chat::ChatClient},
};

/// Maximum number of actions requested per poll cycle.
const ACTION_LIMIT: u32 = 50;

/// Polls the board and relays new activity to the chat channel.
///
/// The watermark (`last_activity`) is owned exclusively by this instance;
/// it only ever moves forward, and everything at or before it counts as
/// already posted. It lives in memory only, so a restart re-seeds it from
/// the board.
pub struct ActivityPoller {
    board: BoardClient,
    chat: ChatClient,
    filter: String,
    last_activity: DateTime<Utc>,
    poll_interval: Duration,
    post_delay: Duration,
}

impl ActivityPoller {
    /// Creates the poller, seeding the watermark from the board's current
    /// last-activity date.
    #[instrument(skip_all)]
    pub async fn new(config: &Config, board: BoardClient, chat: ChatClient) -> Res<Self> {
        let last_activity = board.get_last_activity().await?;

        info!("Watermark seeded at {last_activity}");

        Ok(Self {
            board,
            chat,
            filter: classify::ACTION_FILTER.join(","),
            last_activity,
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            post_delay: Duration::from_secs(config.post_delay_secs),
        })
    }

    /// The date of the most recently processed action.
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    /// Runs one poll cycle: fetch, de-duplicate, render, emit.
    ///
    /// Fetch and send failures propagate; the caller decides whether the
    /// loop survives them. The watermark advances before any message goes
    /// out, so a failure mid-batch never replays the batch on the next
    /// cycle (the unsent remainder is dropped).
    #[instrument(skip_all)]
    pub async fn poll_once(&mut self) -> Void {
        let actions = self.board.fetch_actions(&self.filter, ACTION_LIMIT, self.last_activity).await?;

        let Some(newest) = actions.first().map(|a| a.date) else {
            return Ok(());
        };

        // Actions arrive newest-first, so the head of the batch carries the
        // candidate watermark. An exact match means the batch was already
        // processed. A batch whose head merely ties the watermark date is
        // discarded wholesale, unseen entries included; the timestamp is the
        // only ordering signal available here.
        if newest == self.last_activity {
            return Ok(());
        }

        self.last_activity = newest;

        // Oldest first, so the channel reads chronologically.
        for action in actions.iter().rev() {
            match classify::label_for(&action.kind) {
                Some(label) => {
                    let message = format::render(action, label);
                    self.chat.send_activity(&message).await?;
                }
                None => debug!("Ignoring action {}", action.kind),
            }

            // Pace posts to stay under the chat rate limit. Runs after the
            // final item too; the trailing wait is harmless.
            sleep(self.post_delay).await;
        }

        Ok(())
    }

    /// Waits for the chat connection, then polls until shutdown.
    ///
    /// A failed cycle is logged and retried on the next tick. The shutdown
    /// flag is checked once per iteration, never mid-cycle.
    #[instrument(skip_all)]
    pub async fn run(&mut self) -> Void {
        self.chat.wait_until_ready().await?;

        info!("Chat connection ready; polling every {:?}", self.poll_interval);

        while !self.chat.is_shutting_down() {
            if let Err(err) = self.poll_once().await {
                error!("Poll cycle failed: {err:#}");
            }

            sleep(self.poll_interval).await;
        }

        info!("Shutdown signalled; activity poller stopping.");

        Ok(())
    }
}
