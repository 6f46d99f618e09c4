//! Post-commit hook handed every accepted mutation of a session.
//!
//! A notifier only ever receives an owned snapshot, so it cannot reach back
//! into the session. Its errors are logged by the caller and never undo the
//! mutation that triggered them.

use std::sync::mpsc::Sender;
use std::sync::Mutex;

use crate::session::snapshot::GameSnapshot;

pub trait SessionNotifier: Send + Sync {
    fn notify(&self, snapshot: GameSnapshot) -> Result<(), String>;
}

/// Discards every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl SessionNotifier for NullNotifier {
    fn notify(&self, _snapshot: GameSnapshot) -> Result<(), String> {
        Ok(())
    }
}

/// Forwards snapshots over an `mpsc` channel, in commit order per session.
#[derive(Debug)]
pub struct ChannelNotifier {
    tx: Mutex<Sender<GameSnapshot>>,
}

impl ChannelNotifier {
    pub fn new(tx: Sender<GameSnapshot>) -> Self {
        Self { tx: Mutex::new(tx) }
    }
}

impl SessionNotifier for ChannelNotifier {
    fn notify(&self, snapshot: GameSnapshot) -> Result<(), String> {
        let tx = self
            .tx
            .lock()
            .map_err(|_| "notifier channel lock poisoned".to_owned())?;
        tx.send(snapshot)
            .map_err(|_| "snapshot receiver disconnected".to_owned())
    }
}
