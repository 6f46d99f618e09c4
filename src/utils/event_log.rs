//! Bounded in-memory event log shared by every session in a registry.
//!
//! Entries carry a UTC timestamp, a level and an optional game id. Once the
//! capacity is reached the oldest entries are dropped. Every kept entry is
//! also emitted as a `tracing` event so a subscriber can forward it.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            other => Err(format!("invalid log level '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub level: LogLevel,
    pub game_id: Option<String>,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.at.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.level,
            self.game_id.as_deref().unwrap_or("-"),
            self.message
        )
    }
}

#[derive(Debug)]
struct LogState {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    min_level: LogLevel,
}

#[derive(Debug)]
pub struct EventLog {
    state: Mutex<LogState>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(1024, LogLevel::Info)
    }
}

impl EventLog {
    pub fn new(capacity: usize, min_level: LogLevel) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Mutex::new(LogState {
                entries: VecDeque::with_capacity(capacity.min(4096)),
                capacity,
                min_level,
            }),
        }
    }

    pub fn record(&self, level: LogLevel, game_id: Option<&str>, message: impl Into<String>) {
        let mut state = self.lock();
        if level < state.min_level {
            return;
        }
        let message = message.into();
        let game = game_id.unwrap_or("-");
        match level {
            LogLevel::Debug => tracing::debug!(game, "{message}"),
            LogLevel::Info => tracing::info!(game, "{message}"),
            LogLevel::Warn => tracing::warn!(game, "{message}"),
        }
        if state.entries.len() >= state.capacity {
            state.entries.pop_front();
        }
        state.entries.push_back(LogEntry {
            at: Utc::now(),
            level,
            game_id: game_id.map(str::to_owned),
            message,
        });
    }

    #[inline]
    pub fn debug(&self, game_id: Option<&str>, message: impl Into<String>) {
        self.record(LogLevel::Debug, game_id, message);
    }

    #[inline]
    pub fn info(&self, game_id: Option<&str>, message: impl Into<String>) {
        self.record(LogLevel::Info, game_id, message);
    }

    #[inline]
    pub fn warn(&self, game_id: Option<&str>, message: impl Into<String>) {
        self.record(LogLevel::Warn, game_id, message);
    }

    /// Shrinking the capacity drops the oldest entries.
    pub fn set_capacity(&self, capacity: usize) {
        let mut state = self.lock();
        state.capacity = capacity.max(1);
        while state.entries.len() > state.capacity {
            state.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().entries.iter().cloned().collect()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lock().entries.iter().map(ToString::to_string).collect()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<LogEntry> {
        self.lock().entries.drain(..).collect()
    }

    // A panic while holding the lock cannot leave the deque half-written,
    // so a poisoned lock is still usable.
    fn lock(&self) -> std::sync::MutexGuard<'_, LogState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
