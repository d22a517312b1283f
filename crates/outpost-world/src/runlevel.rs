//! Server run-level: the coarse phase gating session transitions.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// The server's coarse phase.
///
/// Sessions read this to gate the lobby → game transition; only the
/// server mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RunLevel {
    /// Server is starting up; no game is available.
    Init = 0,
    /// Players gather in the lobby; the round has not started.
    Lobby = 1,
    /// A round is in progress; players may join the game.
    Game = 2,
}

impl RunLevel {
    fn from_u8(value: u8) -> RunLevel {
        match value {
            1 => RunLevel::Lobby,
            2 => RunLevel::Game,
            _ => RunLevel::Init,
        }
    }
}

/// Cheap shared handle to the current run-level.
///
/// Clones observe the same value. Lock-free: sessions read it on every
/// join-game request from their own tasks.
#[derive(Debug, Clone)]
pub struct RunLevelHandle(Arc<AtomicU8>);

impl RunLevelHandle {
    /// Creates a handle starting at the given run-level.
    pub fn new(level: RunLevel) -> Self {
        Self(Arc::new(AtomicU8::new(level as u8)))
    }

    /// Returns the current run-level.
    pub fn get(&self) -> RunLevel {
        RunLevel::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Sets the run-level. Server-side only.
    pub fn set(&self, level: RunLevel) {
        self.0.store(level as u8, Ordering::Release);
    }
}

impl Default for RunLevelHandle {
    fn default() -> Self {
        Self::new(RunLevel::Init)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_starts_at_given_level() {
        let handle = RunLevelHandle::new(RunLevel::Lobby);
        assert_eq!(handle.get(), RunLevel::Lobby);
    }

    #[test]
    fn test_clones_observe_the_same_value() {
        let handle = RunLevelHandle::new(RunLevel::Init);
        let clone = handle.clone();
        handle.set(RunLevel::Game);
        assert_eq!(clone.get(), RunLevel::Game);
    }

    #[test]
    fn test_default_is_init() {
        assert_eq!(RunLevelHandle::default().get(), RunLevel::Init);
    }
}
