use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use quiz_core::{GuessOutcome, WordList, apply_guess, hint_letter, leaderboard, normalize_guess};
use quiz_persistence::{RoundRepository, ScoreRepository};
use quiz_types::{PlayerId, RoomId, Round, ScoreScope, points_for};

use crate::chat::ChatApi;
use crate::definitions::DefinitionLookup;
use crate::format;
use crate::sessions::SessionMap;

/// Guesses a round must accumulate before /hint answers.
const HINT_UNLOCK_GUESSES: usize = 5;
/// Midpoint nudge for rounds nobody has solved yet.
const WARNING_AFTER: Duration = Duration::from_secs(300);
/// Hard deadline after which the round expires.
const EXPIRE_AFTER: Duration = Duration::from_secs(600);

/// Drives every room's round lifecycle against the store.
///
/// Cloning is cheap; all clones share the same session map, so the per-room
/// lock actually serializes writers.
#[derive(Clone)]
pub struct RoundManager {
    chat: Arc<dyn ChatApi>,
    definitions: Arc<dyn DefinitionLookup>,
    rounds: Arc<RoundRepository>,
    scores: Arc<ScoreRepository>,
    words: Arc<WordList>,
    sessions: Arc<SessionMap>,
}

impl RoundManager {
    pub fn new(
        chat: Arc<dyn ChatApi>,
        definitions: Arc<dyn DefinitionLookup>,
        rounds: RoundRepository,
        scores: ScoreRepository,
        words: Arc<WordList>,
    ) -> Self {
        Self {
            chat,
            definitions,
            rounds: Arc::new(rounds),
            scores: Arc::new(scores),
            words,
            sessions: Arc::new(SessionMap::new()),
        }
    }

    /// Sends best-effort; a dropped message must not wedge a round.
    async fn say(&self, room: RoomId, text: &str) {
        if let Err(e) = self.chat.send_message(room, text).await {
            warn!("Failed to send message to room {}: {}", room, e);
        }
    }

    /// Starts a round, replacing any round already running in the room.
    pub async fn start_round(&self, room: RoomId) {
        let session = self.sessions.session(room);
        let _guard = session.lock().await;

        let secret = match self.words.pick() {
            Ok(word) => word.to_string(),
            Err(e) => {
                error!("Cannot start round in room {}: {}", room, e);
                self.say(room, format::start_failed()).await;
                return;
            }
        };

        // Bumping the generation first strands every timer from earlier
        // starts, even if the save below fails.
        let generation = session.next_generation();
        let round = Round::new(secret, generation);

        match self.rounds.save(room, &round).await {
            Ok(()) => {
                session.set_live(true);
                self.spawn_watchdog(room, generation);
                info!("Room {}: round {} started", room, generation);
                self.say(room, format::round_started()).await;
            }
            Err(e) => {
                session.set_live(false);
                warn!("Room {}: could not persist new round: {}", room, e);
                self.say(room, format::start_failed()).await;
            }
        }
    }

    fn spawn_watchdog(&self, room: RoomId, generation: u64) {
        let manager = self.clone();
        tokio::spawn(async move {
            manager.run_watchdog(room, generation).await;
        });
    }

    /// Nudges the room halfway through, then expires the round at the
    /// deadline. A newer start bumps the generation, which strands this task
    /// harmlessly at the next check.
    async fn run_watchdog(&self, room: RoomId, generation: u64) {
        tokio::time::sleep(WARNING_AFTER).await;
        {
            let session = self.sessions.session(room);
            if !session.is_live() || !session.is_current(generation) {
                return;
            }
            self.say(room, format::expiry_warning()).await;
        }
        tokio::time::sleep(EXPIRE_AFTER - WARNING_AFTER).await;
        self.expire_round(room, generation).await;
    }

    async fn expire_round(&self, room: RoomId, generation: u64) {
        let session = self.sessions.session(room);
        let _guard = session.lock().await;
        if !session.is_live() || !session.is_current(generation) {
            return; // a newer start or an earlier finish owns the room now
        }

        let round = match self.rounds.fetch(room).await {
            Ok(Some(round)) => round,
            Ok(None) => {
                // Store already has no round; just drop the liveness flag.
                session.set_live(false);
                return;
            }
            Err(e) => {
                warn!("Room {}: expiry aborted, store unreachable: {}", room, e);
                return;
            }
        };
        if round.generation != generation {
            return; // the stored round belongs to a newer start
        }

        if let Err(e) = self.rounds.clear(room).await {
            warn!("Room {}: could not clear expired round: {}", room, e);
        }
        session.set_live(false);
        info!("Room {}: round {} expired", room, generation);
        self.say(room, &format::round_expired(&round.secret_word)).await;
    }

    /// Routes a free-text message as a guess. Chatter that does not look like
    /// a guess, or arrives while no round is live, is ignored without reply.
    pub async fn handle_guess(
        &self,
        room: RoomId,
        player: PlayerId,
        display_name: &str,
        text: &str,
    ) {
        let Some(word) = normalize_guess(text) else {
            return;
        };
        let Some(session) = self.sessions.peek(room) else {
            return;
        };
        if !session.is_live() {
            return;
        }

        let _guard = session.lock().await;
        if !session.is_live() {
            return; // another guesser finished the round while we waited
        }

        let mut round = match self.rounds.fetch(room).await {
            Ok(Some(round)) => round,
            Ok(None) => {
                session.set_live(false);
                return;
            }
            Err(e) => {
                warn!("Room {}: dropping guess, store unreachable: {}", room, e);
                return;
            }
        };

        match apply_guess(&mut round, &self.words, player, &word) {
            Err(error) => {
                self.say(room, &format::rejected_guess(&error)).await;
            }
            Ok(GuessOutcome::Incorrect { feedback, attempt }) => {
                if let Err(e) = self.rounds.save(room, &round).await {
                    warn!("Room {}: guess by {} not persisted: {}", room, player, e);
                }
                self.say(
                    room,
                    &format::guess_feedback(&word, &feedback, display_name, attempt),
                )
                .await;
            }
            Ok(GuessOutcome::Solved {
                feedback,
                attempt,
                bonus,
            }) => {
                // The win is decided; everything after this is bookkeeping.
                session.set_live(false);
                if let Err(e) = self.rounds.clear(room).await {
                    warn!("Room {}: could not clear finished round: {}", room, e);
                }

                let points = match self
                    .scores
                    .award(player, display_name, Some(room), bonus)
                    .await
                {
                    Ok(points) => points,
                    Err(e) => {
                        error!("Room {}: win by {} not fully recorded: {}", room, player, e);
                        points_for(bonus)
                    }
                };

                let definition = self.definitions.define(&word).await;
                info!("Room {}: {} solved the word in {} attempts", room, player, attempt);
                self.say(
                    room,
                    &format::win_announcement(
                        &feedback,
                        display_name,
                        &word,
                        &definition,
                        attempt,
                        points,
                    ),
                )
                .await;
            }
        }
    }

    /// Ends the round early. Only chat admins may do this.
    pub async fn stop_round(&self, room: RoomId, requester: PlayerId) {
        match self.chat.member_role(room, requester).await {
            Ok(role) if role.is_privileged() => {}
            Ok(_) => {
                self.say(room, format::admin_only()).await;
                return;
            }
            Err(e) => {
                warn!("Room {}: role lookup for {} failed: {}", room, requester, e);
                self.say(room, format::cannot_verify_admin()).await;
                return;
            }
        }

        let session = self.sessions.session(room);
        let _guard = session.lock().await;
        if !session.is_live() {
            self.say(room, format::no_active_round()).await;
            return;
        }

        let secret = match self.rounds.fetch(room).await {
            Ok(Some(round)) => Some(round.secret_word),
            Ok(None) => {
                session.set_live(false);
                self.say(room, format::no_active_round()).await;
                return;
            }
            Err(e) => {
                warn!("Room {}: could not read round before ending it: {}", room, e);
                None
            }
        };

        if let Err(e) = self.rounds.clear(room).await {
            warn!("Room {}: could not clear round: {}", room, e);
            self.say(room, format::store_trouble()).await;
            return;
        }
        session.set_live(false);
        info!("Room {}: round ended by {}", room, requester);
        self.say(room, &format::round_stopped(secret.as_deref())).await;
    }

    /// Reveals one letter of the secret once the room has guessed enough.
    pub async fn hint(&self, room: RoomId) {
        let live = self
            .sessions
            .peek(room)
            .is_some_and(|session| session.is_live());
        if !live {
            self.say(room, format::no_active_round()).await;
            return;
        }

        match self.rounds.fetch(room).await {
            Ok(Some(round)) => {
                let total = round.total_guesses();
                if total < HINT_UNLOCK_GUESSES {
                    self.say(room, &format::hint_locked(total, HINT_UNLOCK_GUESSES))
                        .await;
                } else if let Some(letter) = hint_letter(&round.secret_word) {
                    self.say(room, &format::hint(letter)).await;
                }
            }
            Ok(None) => {
                self.say(room, format::no_active_round()).await;
            }
            Err(e) => {
                warn!("Room {}: hint unavailable, store unreachable: {}", room, e);
                self.say(room, format::store_trouble()).await;
            }
        }
    }

    pub async fn show_leaderboard(&self, room: RoomId, requester: PlayerId, scope: ScoreScope) {
        let title = match scope {
            ScoreScope::Global => format::global_title(),
            ScoreScope::Local(_) => format::local_title(),
        };

        match self.scores.entries(scope).await {
            Ok(entries) => {
                let view = leaderboard::rank(entries, requester);
                self.say(room, &format::leaderboard(title, &view)).await;
            }
            Err(e) => {
                warn!("Room {}: leaderboard fetch failed: {}", room, e);
                self.say(room, format::leaderboard_unavailable()).await;
            }
        }
    }
}
