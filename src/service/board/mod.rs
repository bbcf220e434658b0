pub mod trello;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::base::types::{BoardAction, Res};

// Traits.

/// Generic "board" trait that clients must implement.
///
/// This trait defines the read side of the project-management board being
/// watched. Implementing this trait allows different board providers to be
/// used with the relay-bot.
#[async_trait]
pub trait GenericBoardClient: Send + Sync + 'static {
    /// Fetch the most recent actions on the board, newest-first.
    ///
    /// `filter` is the comma-joined allow-list of action types; `since`
    /// restricts the result to actions dated after it.
    async fn fetch_actions(&self, filter: &str, limit: u32, since: DateTime<Utc>) -> Res<Vec<BoardAction>>;

    /// Get the date of the board's most recent activity.
    ///
    /// Used once at startup to seed the poller's watermark.
    async fn get_last_activity(&self) -> Res<DateTime<Utc>>;
}

// Structs.

/// Board client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct BoardClient {
    inner: Arc<dyn GenericBoardClient>,
}

impl Deref for BoardClient {
    type Target = dyn GenericBoardClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl BoardClient {
    pub fn new(inner: Arc<dyn GenericBoardClient>) -> Self {
        Self { inner }
    }
}
