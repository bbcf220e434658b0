//! Action classification for the relay-bot.
//!
//! Filtering happens in two layers that are deliberately kept separate:
//! - [`ACTION_FILTER`] is the allow-list handed to the board API, narrowing
//!   what is fetched at all. Every fetched action advances the poller's
//!   watermark, displayed or not.
//! - [`label_for`] is the much smaller table of action types that are
//!   actually rendered and posted; anything without a label is dropped at
//!   render time.

/// Action types requested from the board API.
pub const ACTION_FILTER: &[&str] = &[
    "addAdminToBoard",
    "addAdminToOrganization",
    "addAttachmentToCard",
    "addBoardsPinnedToMember",
    "addChecklistToCard",
    "addLabelToCard",
    "addMemberToBoard",
    "addMemberToCard",
    "addMemberToOrganization",
    "addToOrganizationBoard",
    "commentCard",
    "convertToCardFromCheckItem",
    "copyBoard",
    "copyCard",
    "copyChecklist",
    "createLabel",
    "copyCommentCard",
    "createBoard",
    "createBoardInvitation",
    "createBoardPreference",
    "createCard",
    "createChecklist",
    "createList",
    "createOrganization",
    "createOrganizationInvitation",
    "deleteAttachmentFromCard",
    "deleteBoardInvitation",
    "deleteCard",
    "deleteCheckItem",
    "deleteLabel",
    "deleteOrganizationInvitation",
    "disablePlugin",
    "disablePowerUp",
    "emailCard",
    "enablePlugin",
    "enablePowerUp",
    "makeAdminOfBoard",
    "makeAdminOfOrganization",
    "makeNormalMemberOfBoard",
    "makeNormalMemberOfOrganization",
    "makeObserverOfBoard",
    "memberJoinedTrello",
    "moveCardFromBoard",
    "moveCardToBoard",
    "moveListFromBoard",
    "moveListToBoard",
    "removeAdminFromBoard",
    "removeAdminFromOrganization",
    "removeBoardsPinnedFromMember",
    "removeChecklistFromCard",
    "removeFromOrganizationBoard",
    "removeLabelFromCard",
    "removeMemberFromBoard",
    "removeMemberFromCard",
    "removeMemberFromOrganization",
    "unconfirmedBoardInvitation",
    "unconfirmedOrganizationInvitation",
    "updateBoard",
    "updateCard",
    "updateCheckItem",
    "updateCheckItemStateOnCard",
    "updateChecklist",
    "updateLabel",
    "updateList",
    "updateMember",
    "updateOrganization",
    "voteOnCard",
];

/// Maps an action type to the headline shown in the channel.
///
/// Returns `None` for types that should not be posted, including types that
/// are allow-listed for fetch but have no display label.
pub fn label_for(action_type: &str) -> Option<&'static str> {
    let label = match action_type {
        "deleteCard" => "Card Deleted",
        "createCard" => "Card Created",
        "addMemberToCard" => "Member Assigned to Card",
        "commentCard" => "Comment left on Card",
        "updateCard" => "Card Updated",
        "addLabelToCard" => "Label Added",
        "addAttachmentToCard" => "Attachment Added",
        _ => return None,
    };

    Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_are_labelled() {
        assert_eq!(label_for("createCard"), Some("Card Created"));
        assert_eq!(label_for("deleteCard"), Some("Card Deleted"));
        assert_eq!(label_for("commentCard"), Some("Comment left on Card"));
    }

    #[test]
    fn unknown_types_are_suppressed() {
        assert_eq!(label_for("unknownType"), None);
        assert_eq!(label_for(""), None);
    }

    #[test]
    fn allow_listed_types_without_labels_are_still_suppressed() {
        // Fetched so they advance the watermark, but never rendered.
        for action_type in ["createList", "voteOnCard", "updateBoard"] {
            assert!(ACTION_FILTER.contains(&action_type));
            assert_eq!(label_for(action_type), None);
        }
    }

    #[test]
    fn every_labelled_type_is_allow_listed() {
        let labelled = [
            "deleteCard",
            "createCard",
            "addMemberToCard",
            "commentCard",
            "updateCard",
            "addLabelToCard",
            "addAttachmentToCard",
        ];

        for action_type in labelled {
            assert!(ACTION_FILTER.contains(&action_type), "{action_type} is labelled but not fetched");
        }
    }
}
