//! Hot-seat console front-end and command loop.
//!
//! Both players share one terminal. Each `move` is submitted on behalf of
//! whichever player holds the side to move, through the same registry a
//! network front-end would use.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::game_state::chess_types::Color;
use crate::session::notifier::SessionNotifier;
use crate::session::registry::{MoveRequest, PlayerSeat, SessionCreation, SessionRegistry};
use crate::session::session_config::SessionConfig;
use crate::session::snapshot::GameSnapshot;
use crate::utils::algebraic::{algebraic_to_square, parse_move_token, square_label};
use crate::utils::render_game_state::render_board;

pub const LOCAL_GAME_ID: &str = "local";
const WHITE_PLAYER_ID: &str = "white";
const BLACK_PLAYER_ID: &str = "black";

pub fn run_stdio_loop(notifier: Arc<dyn SessionNotifier>) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut console = ConsoleState::new(notifier);

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = console.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

/// One-line summary printed for every snapshot the notifier delivers.
pub fn snapshot_summary(snapshot: &GameSnapshot) -> String {
    let last = snapshot
        .player(snapshot.current_turn.opposite())
        .move_history
        .last()
        .map_or("-", String::as_str);
    let mut line = format!(
        "info game {} version {} last {} turn {} status {}",
        snapshot.game_id, snapshot.version, last, snapshot.current_turn, snapshot.status
    );
    if let Some(outcome) = snapshot.outcome {
        line.push_str(&format!(" outcome {outcome}"));
    }
    line
}

struct ConsoleState {
    config: SessionConfig,
    notifier: Arc<dyn SessionNotifier>,
    registry: Option<SessionRegistry>,
}

impl ConsoleState {
    fn new(notifier: Arc<dyn SessionNotifier>) -> Self {
        Self {
            config: SessionConfig::default(),
            notifier,
            registry: None,
        }
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();

        match cmd {
            "help" => {
                writeln!(out, "commands: new | move e2e4[q] | moves e2 | show | json | log")?;
                writeln!(out, "          setoption name <N> value <V> | quit")?;
            }
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    writeln!(out, "info string setoption error: {err}")?;
                }
            }
            "new" => match self.start_game() {
                Ok(()) => writeln!(out, "info string new game {LOCAL_GAME_ID}")?,
                Err(err) => writeln!(out, "info string new error: {err}")?,
            },
            "move" => {
                let token = parts.next().unwrap_or_default();
                match self.handle_move(token) {
                    Ok(text) => writeln!(out, "{text}")?,
                    Err(err) => writeln!(out, "error {err}")?,
                }
            }
            "moves" => {
                let square = parts.next().unwrap_or_default();
                match self.handle_moves(square) {
                    Ok(text) => writeln!(out, "{text}")?,
                    Err(err) => writeln!(out, "error {err}")?,
                }
            }
            "show" => match self.handle_show() {
                Ok(text) => writeln!(out, "{text}")?,
                Err(err) => writeln!(out, "error {err}")?,
            },
            "json" => match self.current_snapshot() {
                Ok(snapshot) => match snapshot.to_json_pretty() {
                    Ok(json) => writeln!(out, "{json}")?,
                    Err(err) => writeln!(out, "error {err}")?,
                },
                Err(err) => writeln!(out, "error {err}")?,
            },
            "log" => match &self.registry {
                Some(registry) => {
                    for entry in registry.log().drain() {
                        writeln!(out, "{entry}")?;
                    }
                }
                None => writeln!(out, "error no game in progress")?,
            },
            "quit" => return Ok(true),
            _ => {
                writeln!(out, "info string unknown command: {trimmed}")?;
            }
        }

        Ok(false)
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), String> {
        if self.registry.is_some() {
            return Err("options must be set before 'new'".to_owned());
        }

        let mut tokens = line.split_whitespace();
        let _ = tokens.next(); // setoption

        let mut name_tokens = Vec::<&str>::new();
        let mut value_tokens = Vec::<&str>::new();
        let mut mode = "";

        for tok in tokens {
            match tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok),
                _ if mode == "value" => value_tokens.push(tok),
                _ => {}
            }
        }

        self.config
            .set_option(&name_tokens.join(" "), &value_tokens.join(" "))
    }

    fn start_game(&mut self) -> Result<(), String> {
        let registry = SessionRegistry::new(self.config, Arc::clone(&self.notifier));
        registry
            .open_session(SessionCreation {
                game_id: LOCAL_GAME_ID.to_owned(),
                seats: [
                    PlayerSeat {
                        player_id: WHITE_PLAYER_ID.to_owned(),
                        username: WHITE_PLAYER_ID.to_owned(),
                        color: Color::White,
                    },
                    PlayerSeat {
                        player_id: BLACK_PLAYER_ID.to_owned(),
                        username: BLACK_PLAYER_ID.to_owned(),
                        color: Color::Black,
                    },
                ],
                both_ready: true,
            })
            .map_err(|err| err.to_string())?;
        self.registry = Some(registry);
        Ok(())
    }

    fn registry(&self) -> Result<&SessionRegistry, String> {
        self.registry
            .as_ref()
            .ok_or_else(|| "no game in progress".to_owned())
    }

    fn handle_move(&self, token: &str) -> Result<String, String> {
        let registry = self.registry()?;
        let (from, to, promotion) = parse_move_token(token)?;
        let player_id = registry
            .player_to_move(LOCAL_GAME_ID)
            .map_err(|err| err.to_string())?;
        let request = MoveRequest {
            game_id: LOCAL_GAME_ID.to_owned(),
            player_id,
            from,
            to,
            promotion: promotion.map(String::from),
        };
        let report = registry
            .submit_move(&request)
            .map_err(|err| format!("{}: {err}", err.code()))?;
        Ok(format!("ok {} {}", report.record.notation, report.outcome))
    }

    fn handle_moves(&self, square: &str) -> Result<String, String> {
        let registry = self.registry()?;
        let from = algebraic_to_square(square)?;
        let destinations = registry
            .legal_destinations(LOCAL_GAME_ID, from)
            .map_err(|err| err.to_string())?;
        let names: Vec<String> = destinations.into_iter().map(square_label).collect();
        Ok(format!("moves {square}: {}", names.join(" ")))
    }

    fn current_snapshot(&self) -> Result<GameSnapshot, String> {
        self.registry()?
            .snapshot(LOCAL_GAME_ID)
            .map_err(|err| err.to_string())
    }

    fn handle_show(&self) -> Result<String, String> {
        self.registry()?
            .with_session(LOCAL_GAME_ID, |session| {
                format!(
                    "{}\nturn {} status {}{}",
                    render_board(session.board()),
                    session.turn(),
                    session.status(),
                    if session.is_in_check() { " check" } else { "" }
                )
            })
            .map_err(|err| err.to_string())
    }
}
