pub mod slack;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{ActivityMessage, Void};

// Traits.

/// Generic "chat" trait that clients must implement.
///
/// This trait defines the delivery side of the relay together with the host
/// signals the scheduler observes. Implementing this trait allows different
/// chat platforms to be used with the relay-bot.
#[async_trait]
pub trait GenericChatClient: Send + Sync + 'static {
    /// Suspend until the chat connection is established.
    ///
    /// The scheduler awaits this once before its first poll cycle.
    async fn wait_until_ready(&self) -> Void;

    /// Whether the host has begun shutting down.
    ///
    /// Checked once per scheduler iteration; an in-flight poll cycle always
    /// completes first.
    fn is_shutting_down(&self) -> bool;

    /// Post one rendered activity message to the configured channel.
    async fn send_activity(&self, message: &ActivityMessage) -> Void;
}

// Structs.

/// Chat client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    pub fn new(inner: Arc<dyn GenericChatClient>) -> Self {
        Self { inner }
    }
}
