//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for various services used by the relay-bot:
//! - Board services (e.g., Trello)
//! - Chat services (e.g., Slack)
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod board;
pub mod chat;
