use std::sync::Arc;

use tracing::warn;

use quiz_types::{RoomId, ScoreScope};

use crate::chat::{ChatApi, Update};
use crate::commands::Command;
use crate::format;
use crate::rounds::RoundManager;

/// Routes each incoming update to a command handler or the guess flow.
pub struct Dispatcher {
    chat: Arc<dyn ChatApi>,
    rounds: RoundManager,
}

impl Dispatcher {
    pub fn new(chat: Arc<dyn ChatApi>, rounds: RoundManager) -> Self {
        Self { chat, rounds }
    }

    async fn say(&self, room: RoomId, text: &str) {
        if let Err(e) = self.chat.send_message(room, text).await {
            warn!("Failed to send message to room {}: {}", room, e);
        }
    }

    /// Updates without a message, text, or sender are service noise
    /// (joins, edits, pinned posts) and are dropped.
    pub async fn handle_update(&self, update: Update) {
        let Some(message) = update.message else { return };
        let Some(text) = message.text else { return };
        let Some(from) = message.from else { return };
        let room = message.chat.id;

        match Command::parse(&text) {
            Some(Command::Start) => self.say(room, format::greeting()).await,
            Some(Command::Quiz) => self.rounds.start_round(room).await,
            Some(Command::Hint) => self.rounds.hint(room).await,
            Some(Command::End) => self.rounds.stop_round(room, from.id).await,
            Some(Command::Help) => self.say(room, format::help_text()).await,
            Some(Command::Ping) => self.say(room, format::pong()).await,
            Some(Command::Global) => {
                self.rounds
                    .show_leaderboard(room, from.id, ScoreScope::Global)
                    .await
            }
            Some(Command::Local) => {
                self.rounds
                    .show_leaderboard(room, from.id, ScoreScope::Local(room))
                    .await
            }
            None => {
                self.rounds
                    .handle_guess(room, from.id, from.display_name(), &text)
                    .await
            }
        }
    }
}
