//! Board activity processing for the relay-bot.
//!
//! This module turns raw board actions into channel messages:
//! - Filtering and labelling action types
//! - Rendering one action into a display message
//! - Polling the board and pacing delivery to the channel

pub mod classify;
pub mod format;
pub mod poller;
