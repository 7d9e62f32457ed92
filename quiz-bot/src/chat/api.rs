use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use quiz_types::{PlayerId, RoomId};

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat request failed: {0}")]
    Transport(String),
    #[error("chat API rejected the call: {0}")]
    Api(String),
    #[error("unexpected response shape from chat API")]
    Malformed,
}

/// Outbound chat operations used by the command handlers.
///
/// Implemented by the live gateway and by test doubles.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn send_message(&self, room: RoomId, text: &str) -> Result<(), ChatError>;
    async fn member_role(&self, room: RoomId, player: PlayerId) -> Result<MemberRole, ChatError>;
}

/// One incoming event from the chat platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: RoomId, // negative for group chats
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: PlayerId,
    pub first_name: String,
    pub username: Option<String>,
}

impl User {
    /// Name shown in announcements and on the leaderboard.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.first_name)
    }
}

/// Membership status of a user within a group chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Kicked,
}

impl MemberRole {
    pub fn is_privileged(&self) -> bool {
        matches!(self, MemberRole::Creator | MemberRole::Administrator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_decodes_from_wire_json() {
        let raw = r#"{
            "update_id": 857399,
            "message": {
                "message_id": 12,
                "chat": {"id": -1001234, "type": "supergroup"},
                "from": {"id": 42, "is_bot": false, "first_name": "Alice", "username": "alice_w"},
                "text": "/quiz"
            }
        }"#;

        let update: Update = serde_json::from_str(raw).unwrap();
        assert_eq!(update.update_id, 857399);
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, -1001234);
        assert_eq!(message.text.as_deref(), Some("/quiz"));
        assert_eq!(message.from.unwrap().display_name(), "alice_w");
    }

    #[test]
    fn test_update_without_message_decodes() {
        let update: Update = serde_json::from_str(r#"{"update_id": 1}"#).unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_first_name() {
        let user = User {
            id: 7,
            first_name: "Bob".to_string(),
            username: None,
        };
        assert_eq!(user.display_name(), "Bob");
    }

    #[test]
    fn test_member_role_decodes_lowercase_statuses() {
        let role: MemberRole = serde_json::from_str("\"administrator\"").unwrap();
        assert_eq!(role, MemberRole::Administrator);
        let role: MemberRole = serde_json::from_str("\"kicked\"").unwrap();
        assert_eq!(role, MemberRole::Kicked);
    }

    #[test]
    fn test_only_creator_and_administrator_are_privileged() {
        assert!(MemberRole::Creator.is_privileged());
        assert!(MemberRole::Administrator.is_privileged());
        assert!(!MemberRole::Member.is_privileged());
        assert!(!MemberRole::Restricted.is_privileged());
        assert!(!MemberRole::Left.is_privileged());
        assert!(!MemberRole::Kicked.is_privileged());
    }
}
