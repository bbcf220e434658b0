//! Renders one board action into the message posted to the channel.
//!
//! Rendering is pure and never fails: every nested field of the action is
//! optional, and an absent field simply omits its line.

use crate::base::types::{ActivityMessage, BoardAction, CardItem};

/// Builds the display message for an action under the given label.
///
/// Detail lines appear in a fixed order, each only when the action carries
/// the corresponding data: list, board, card, card movement.
pub fn render(action: &BoardAction, label: &str) -> ActivityMessage {
    let mut lines = Vec::new();

    if let Some(name) = list_name(action) {
        lines.push(format!("In list {name}"));
    }

    if let Some(name) = board_name(action) {
        lines.push(format!("In board {name}"));
    }

    if let Some(card) = card(action) {
        let desc = card.desc.as_deref().unwrap_or("none");
        lines.push(format!("Card {} w/ description {}", card.name, desc));
    }

    if let Some((from, to)) = card_moved(action) {
        lines.push(format!("Card was moved from {from} to {to}"));
    }

    ActivityMessage {
        title: label.to_string(),
        author: author(action),
        lines,
    }
}

/// The attributed member as `Full Name (initials)`, or `N/A` when the
/// action carries no creator.
fn author(action: &BoardAction) -> String {
    match &action.member_creator {
        Some(creator) => {
            let full_name = creator.full_name.as_deref().unwrap_or("Error");
            let initials = creator.initials.as_deref().unwrap_or("N/A");
            format!("{full_name} ({initials})")
        }
        None => "N/A".to_string(),
    }
}

fn list_name(action: &BoardAction) -> Option<&str> {
    Some(action.data.as_ref()?.list.as_ref()?.name.as_str())
}

fn board_name(action: &BoardAction) -> Option<&str> {
    Some(action.data.as_ref()?.board.as_ref()?.name.as_str())
}

fn card(action: &BoardAction) -> Option<&CardItem> {
    action.data.as_ref()?.card.as_ref()
}

/// The (from, to) list names of a card move; both must be present.
fn card_moved(action: &BoardAction) -> Option<(&str, &str)> {
    let data = action.data.as_ref()?;
    let before = data.list_before.as_ref()?;
    let after = data.list_after.as_ref()?;

    Some((before.name.as_str(), after.name.as_str()))
}
