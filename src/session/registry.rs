//! Process-wide table of running sessions.
//!
//! The map lock is only held to look up, insert or remove an entry. Each
//! session sits behind its own `Mutex`, which serializes its move pipeline
//! and the notification that follows a commit; different sessions proceed
//! in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;
use crate::session::game_session::{GameSession, MoveReport, Player};
use crate::session::notifier::{NullNotifier, SessionNotifier};
use crate::session::session_config::SessionConfig;
use crate::session::session_errors::{MoveError, SessionError};
use crate::session::snapshot::GameSnapshot;
use crate::utils::event_log::EventLog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSeat {
    pub player_id: String,
    pub username: String,
    pub color: Color,
}

/// Lobby hand-off: both players seated with distinct colors and ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCreation {
    pub game_id: String,
    pub seats: [PlayerSeat; 2],
    pub both_ready: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub game_id: String,
    pub player_id: String,
    pub from: Square,
    pub to: Square,
    #[serde(default)]
    pub promotion: Option<String>,
}

type SharedSession = Arc<Mutex<GameSession>>;

pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SharedSession>>,
    config: SessionConfig,
    notifier: Arc<dyn SessionNotifier>,
    log: Arc<EventLog>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(SessionConfig::default(), Arc::new(NullNotifier))
    }
}

impl SessionRegistry {
    pub fn new(config: SessionConfig, notifier: Arc<dyn SessionNotifier>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
            notifier,
            log: Arc::new(EventLog::new(config.log_capacity, config.log_level)),
        }
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn open_session(&self, creation: SessionCreation) -> Result<GameSnapshot, SessionError> {
        let (white, black) = seat_players(&creation)?;

        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if sessions.contains_key(&creation.game_id) {
            return Err(SessionError::DuplicateSession(creation.game_id));
        }

        let session = GameSession::new(creation.game_id.clone(), white, black, self.config)
            .with_notifier(Arc::clone(&self.notifier))
            .with_log(Arc::clone(&self.log));
        let snapshot = session.snapshot();
        sessions.insert(creation.game_id.clone(), Arc::new(Mutex::new(session)));
        drop(sessions);

        self.log.info(
            Some(&creation.game_id),
            format!(
                "session opened: {} (white) vs {} (black)",
                snapshot.players.white.username, snapshot.players.black.username
            ),
        );
        Ok(snapshot)
    }

    /// Runs one move through the session's pipeline while holding its lock.
    pub fn submit_move(&self, request: &MoveRequest) -> Result<MoveReport, SessionError> {
        let promotion = match request.promotion.as_deref() {
            None => None,
            Some(text) => Some(parse_promotion(text)?),
        };
        let shared = self.get(&request.game_id)?;
        let mut session = lock_session(&shared);
        Ok(session.apply_move(request.from, request.to, &request.player_id, promotion)?)
    }

    pub fn snapshot(&self, game_id: &str) -> Result<GameSnapshot, SessionError> {
        let shared = self.get(game_id)?;
        let snapshot = lock_session(&shared).snapshot();
        Ok(snapshot)
    }

    pub fn side_of(&self, game_id: &str, player_id: &str) -> Result<Color, SessionError> {
        let shared = self.get(game_id)?;
        let side = lock_session(&shared).side_of(player_id);
        side.ok_or_else(|| SessionError::UnknownPlayer(player_id.to_owned()))
    }

    /// Player id seated on the side to move.
    pub fn player_to_move(&self, game_id: &str) -> Result<String, SessionError> {
        let shared = self.get(game_id)?;
        let session = lock_session(&shared);
        Ok(session.player(session.turn()).player_id.clone())
    }

    /// Runs `f` against a session while holding its lock.
    pub fn with_session<R>(
        &self,
        game_id: &str,
        f: impl FnOnce(&GameSession) -> R,
    ) -> Result<R, SessionError> {
        let shared = self.get(game_id)?;
        let session = lock_session(&shared);
        Ok(f(&*session))
    }

    pub fn legal_destinations(&self, game_id: &str, from: Square) -> Result<Vec<Square>, SessionError> {
        let shared = self.get(game_id)?;
        let destinations = lock_session(&shared).legal_destinations(from);
        Ok(destinations)
    }

    pub fn abort(&self, game_id: &str) -> Result<(), SessionError> {
        let shared = self.get(game_id)?;
        let result = lock_session(&shared).abort();
        Ok(result?)
    }

    /// Drops a session from the table. Returns its final snapshot.
    pub fn remove(&self, game_id: &str) -> Result<GameSnapshot, SessionError> {
        let shared = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(game_id)
            .ok_or_else(|| SessionError::UnknownSession(game_id.to_owned()))?;
        let snapshot = lock_session(&shared).snapshot();
        self.log.info(Some(game_id), "session removed");
        Ok(snapshot)
    }

    pub fn session_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    fn get(&self, game_id: &str) -> Result<SharedSession, SessionError> {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(game_id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownSession(game_id.to_owned()))
    }
}

// The pipeline mutates only after every gate has passed, so a session whose
// lock was poisoned mid-request still holds a consistent position.
fn lock_session(shared: &SharedSession) -> MutexGuard<'_, GameSession> {
    shared
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn seat_players(creation: &SessionCreation) -> Result<(Player, Player), SessionError> {
    if !creation.both_ready {
        return Err(SessionError::InvalidLobby(
            "both players must be ready".to_owned(),
        ));
    }
    let [first, second] = &creation.seats;
    if first.color == second.color {
        return Err(SessionError::InvalidLobby(
            "players must choose different colors".to_owned(),
        ));
    }
    if first.player_id == second.player_id {
        return Err(SessionError::InvalidLobby(
            "a player cannot take both seats".to_owned(),
        ));
    }
    if creation.game_id.trim().is_empty() {
        return Err(SessionError::InvalidLobby("game id is empty".to_owned()));
    }

    let (white, black) = if first.color == Color::White {
        (first, second)
    } else {
        (second, first)
    };
    Ok((
        Player::new(white.player_id.clone(), white.username.clone()),
        Player::new(black.player_id.clone(), black.username.clone()),
    ))
}

fn parse_promotion(text: &str) -> Result<PieceKind, MoveError> {
    text.parse::<PieceKind>()
        .ok()
        .filter(|kind| kind.is_promotable())
        .ok_or(MoveError::InvalidPromotionChoice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::game_session::{MoveOutcome, SessionStatus};
    use crate::utils::algebraic::algebraic_to_square;
    use std::thread;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    fn creation(game_id: &str) -> SessionCreation {
        SessionCreation {
            game_id: game_id.to_owned(),
            seats: [
                PlayerSeat {
                    player_id: format!("{game_id}-b"),
                    username: "bob".to_owned(),
                    color: Color::Black,
                },
                PlayerSeat {
                    player_id: format!("{game_id}-w"),
                    username: "alice".to_owned(),
                    color: Color::White,
                },
            ],
            both_ready: true,
        }
    }

    fn request(game_id: &str, side: char, from: &str, to: &str) -> MoveRequest {
        MoveRequest {
            game_id: game_id.to_owned(),
            player_id: format!("{game_id}-{side}"),
            from: sq(from),
            to: sq(to),
            promotion: None,
        }
    }

    #[test]
    fn open_session_seats_players_by_color() {
        let registry = SessionRegistry::default();
        let snapshot = registry.open_session(creation("g1")).expect("lobby is valid");
        assert_eq!(snapshot.players.white.username, "alice");
        assert_eq!(snapshot.players.black.player_id, "g1-b");
        assert_eq!(registry.side_of("g1", "g1-w"), Ok(Color::White));
        assert_eq!(
            registry.open_session(creation("g1")),
            Err(SessionError::DuplicateSession("g1".to_owned()))
        );
    }

    #[test]
    fn invalid_lobbies_are_rejected() {
        let registry = SessionRegistry::default();

        let mut not_ready = creation("g1");
        not_ready.both_ready = false;
        assert!(matches!(
            registry.open_session(not_ready),
            Err(SessionError::InvalidLobby(_))
        ));

        let mut same_color = creation("g2");
        same_color.seats[0].color = Color::White;
        assert!(matches!(
            registry.open_session(same_color),
            Err(SessionError::InvalidLobby(_))
        ));

        let mut same_player = creation("g3");
        same_player.seats[0].player_id = "g3-w".to_owned();
        assert!(matches!(
            registry.open_session(same_player),
            Err(SessionError::InvalidLobby(_))
        ));
        assert!(registry.session_ids().is_empty());
    }

    #[test]
    fn submit_move_routes_errors() {
        let registry = SessionRegistry::default();
        registry.open_session(creation("g1")).expect("lobby is valid");

        assert_eq!(
            registry.submit_move(&request("nope", 'w', "e2", "e4")),
            Err(SessionError::UnknownSession("nope".to_owned()))
        );
        let mut stranger = request("g1", 'w', "e2", "e4");
        stranger.player_id = "mallory".to_owned();
        assert_eq!(
            registry.submit_move(&stranger),
            Err(SessionError::Move(MoveError::WrongTurn))
        );
        assert_eq!(
            registry.submit_move(&request("g1", 'b', "e7", "e5")),
            Err(SessionError::Move(MoveError::WrongTurn))
        );

        let report = registry
            .submit_move(&request("g1", 'w', "e2", "e4"))
            .expect("e4 should be legal");
        assert_eq!(report.outcome, MoveOutcome::Continue);
        assert_eq!(registry.player_to_move("g1"), Ok("g1-b".to_owned()));
    }

    #[test]
    fn promotion_text_is_validated() {
        assert_eq!(parse_promotion("Queen"), Ok(PieceKind::Queen));
        assert_eq!(parse_promotion("n"), Ok(PieceKind::Knight));
        assert_eq!(parse_promotion("king"), Err(MoveError::InvalidPromotionChoice));
        assert_eq!(parse_promotion("unicorn"), Err(MoveError::InvalidPromotionChoice));

        let registry = SessionRegistry::default();
        registry.open_session(creation("g1")).expect("lobby is valid");
        let mut bad = request("g1", 'w', "e2", "e4");
        bad.promotion = Some("pawn".to_owned());
        assert_eq!(
            registry.submit_move(&bad).map(|r| r.outcome),
            Err(SessionError::Move(MoveError::InvalidPromotionChoice))
        );
    }

    #[test]
    fn move_request_deserializes_from_json() {
        let json = r#"{"game_id":"g1","player_id":"p","from":[6,4],"to":[4,4]}"#;
        let parsed: MoveRequest = serde_json::from_str(json).expect("request should parse");
        assert_eq!(parsed.from, sq("e2"));
        assert_eq!(parsed.to, sq("e4"));
        assert_eq!(parsed.promotion, None);
    }

    #[test]
    fn abort_and_remove() {
        let registry = SessionRegistry::default();
        registry.open_session(creation("g1")).expect("lobby is valid");
        registry.abort("g1").expect("running session aborts");
        assert_eq!(
            registry.abort("g1"),
            Err(SessionError::Move(MoveError::GameEnded))
        );
        let mut stranger = request("g1", 'w', "e2", "e4");
        stranger.player_id = "mallory".to_owned();
        assert_eq!(
            registry.submit_move(&stranger),
            Err(SessionError::Move(MoveError::GameEnded))
        );
        let last = registry.remove("g1").expect("session exists");
        assert_eq!(last.status, SessionStatus::Aborted);
        assert!(registry.session_ids().is_empty());
        assert!(matches!(
            registry.snapshot("g1"),
            Err(SessionError::UnknownSession(_))
        ));
    }

    #[test]
    fn sessions_run_in_parallel_and_moves_serialize() {
        let registry = Arc::new(SessionRegistry::default());
        for game in ["a", "b", "c", "d"] {
            registry.open_session(creation(game)).expect("lobby is valid");
        }

        let handles: Vec<_> = ["a", "b", "c", "d"]
            .into_iter()
            .map(|game| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for (side, from, to) in [('w', "f2", "f3"), ('b', "e7", "e5"), ('w', "g2", "g4"), ('b', "d8", "h4")] {
                        registry
                            .submit_move(&request(game, side, from, to))
                            .expect("fool's mate move should be legal");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker thread should not panic");
        }

        for game in ["a", "b", "c", "d"] {
            let snapshot = registry.snapshot(game).expect("session exists");
            assert_eq!(snapshot.status, SessionStatus::Ended);
            assert_eq!(snapshot.version, 4);
        }
    }

    #[test]
    fn racing_submissions_for_one_session_commit_once() {
        let registry = Arc::new(SessionRegistry::default());
        registry.open_session(creation("g1")).expect("lobby is valid");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.submit_move(&request("g1", 'w', "e2", "e4")).is_ok())
            })
            .collect();
        let accepted = handles
            .into_iter()
            .map(|handle| handle.join().expect("worker thread should not panic"))
            .filter(|ok| *ok)
            .count();

        assert_eq!(accepted, 1);
        let snapshot = registry.snapshot("g1").expect("session exists");
        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.current_turn, Color::Black);
    }

    #[test]
    fn registry_log_records_lifecycle() {
        let registry = SessionRegistry::default();
        registry.open_session(creation("g1")).expect("lobby is valid");
        registry
            .submit_move(&request("g1", 'w', "e2", "e4"))
            .expect("e4 should be legal");
        let _ = registry.submit_move(&request("g1", 'w', "d2", "d4"));

        let lines = registry.log().lines();
        assert!(lines.iter().any(|l| l.contains("session opened")));
        assert!(lines.iter().any(|l| l.contains("played e2-e4")));
        assert!(lines.iter().any(|l| l.contains("wrong_turn")));
    }
}
