use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// One recorded change on the watched board, as returned by the board API.
///
/// Everything past the type tag and the date is optional: the API only
/// includes the pieces relevant to the specific action, so every nested
/// level deserializes to `None` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardAction {
    /// Action type tag, e.g. `createCard`.
    #[serde(rename = "type")]
    pub kind: String,
    /// When the action happened.
    pub date: DateTime<Utc>,
    /// The member who performed the action.
    #[serde(default)]
    pub member_creator: Option<ActionCreator>,
    /// Action payload.
    #[serde(default)]
    pub data: Option<ActionData>,
}

/// The member attributed to an action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionCreator {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub initials: Option<String>,
}

/// Nested action payload; any subset of these may be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionData {
    #[serde(default)]
    pub list: Option<NamedItem>,
    #[serde(default)]
    pub board: Option<NamedItem>,
    #[serde(default)]
    pub card: Option<CardItem>,
    #[serde(default)]
    pub list_before: Option<NamedItem>,
    #[serde(default)]
    pub list_after: Option<NamedItem>,
}

/// A board entity the action references only by name (a list, the board).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedItem {
    pub name: String,
}

/// A card referenced by an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardItem {
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
}

/// The rendered form of one action, ready for the chat channel.
///
/// Produced by the formatter and handed straight to the chat client; the
/// chat client owns how the pieces are styled for its platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityMessage {
    /// Headline; always the classifier's label, never the raw type tag.
    pub title: String,
    /// Who performed the action, with an `N/A` fallback.
    pub author: String,
    /// Detail lines, in render order.
    pub lines: Vec<String>,
}
