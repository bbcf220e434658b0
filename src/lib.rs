//! Library root for `relay-bot`.
//!
//! Relay-bot mirrors the activity of a Trello board into a Slack channel:
//! - Polls the board for new actions on a fixed interval
//! - De-duplicates already-seen actions with an in-memory watermark
//! - Renders each new action into a readable channel message
//! - Paces delivery to respect the chat API's rate limit
//!
//! The bot integrates with Trello for board activity and Slack for chat.
//! The architecture is built around extensible traits that allow for
//! different implementations of each service.

#[deny(missing_docs)]
pub mod activity;
pub mod base;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the relay-bot runtime:
/// - Initializes the crypto provider
/// - Creates the runtime context with board and chat clients
/// - Starts the polling loop that relays board activity
pub async fn start(config: Config) -> Void {
    info!("Starting relay-bot ...");

    // Start the crypto provider.
    crypto::ring::default_provider().install_default().unwrap();

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
