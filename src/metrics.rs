//! Process-wide counters for sessions and turns.
//! Reported by the `debug` command and logged when a session ends.
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static SESSIONS_STARTED: AtomicU64 = AtomicU64::new(0);
static SESSIONS_FINISHED: AtomicU64 = AtomicU64::new(0);
static DISCONNECTS: AtomicU64 = AtomicU64::new(0);
static TURNS: AtomicU64 = AtomicU64::new(0);
static UNKNOWN_COMMANDS: AtomicU64 = AtomicU64::new(0);
static GRUE_DEATHS: AtomicU64 = AtomicU64::new(0);

pub fn inc_sessions_started() {
    SESSIONS_STARTED.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_sessions_finished() {
    SESSIONS_FINISHED.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_disconnects() {
    DISCONNECTS.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_turns() {
    TURNS.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_unknown_commands() {
    UNKNOWN_COMMANDS.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_grue_deaths() {
    GRUE_DEATHS.fetch_add(1, Ordering::Relaxed);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub sessions_started: u64,
    pub sessions_finished: u64,
    pub disconnects: u64,
    pub turns: u64,
    pub unknown_commands: u64,
    pub grue_deaths: u64,
}

pub fn snapshot() -> Snapshot {
    Snapshot {
        sessions_started: SESSIONS_STARTED.load(Ordering::Relaxed),
        sessions_finished: SESSIONS_FINISHED.load(Ordering::Relaxed),
        disconnects: DISCONNECTS.load(Ordering::Relaxed),
        turns: TURNS.load(Ordering::Relaxed),
        unknown_commands: UNKNOWN_COMMANDS.load(Ordering::Relaxed),
        grue_deaths: GRUE_DEATHS.load(Ordering::Relaxed),
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sessions={}/{} disconnects={} turns={} unknown={} grue_deaths={}",
            self.sessions_finished,
            self.sessions_started,
            self.disconnects,
            self.turns,
            self.unknown_commands,
            self.grue_deaths
        )
    }
}
