//! Mission-briefing lore service
//!
//! Flavor text for the menu screen. Optional and never gameplay-critical:
//! a missing or failing backend degrades to deterministic canned briefings,
//! and results that arrive after the menu moved on are dropped instead of
//! applied late. The frame loop never waits on this module.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::sim::{Difficulty, WeaponType};

/// Why a briefing request produced no text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoreError {
    /// No credentials or backend configured
    Unavailable,
    /// The backend call failed
    Failed(String),
}

impl std::fmt::Display for LoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoreError::Unavailable => write!(f, "no lore backend configured"),
            LoreError::Failed(reason) => write!(f, "lore backend failed: {reason}"),
        }
    }
}

impl std::error::Error for LoreError {}

/// A mission-briefing text backend
pub trait LoreSource: Send + Sync {
    fn mission_briefing(
        &self,
        level: u32,
        difficulty: Difficulty,
        last_unlocked: Option<WeaponType>,
    ) -> Result<String, LoreError>;
}

/// Deterministic briefing used whenever no backend is configured
pub fn fallback_briefing(level: u32, difficulty: Difficulty) -> String {
    format!(
        "Mission Level {}: Elimination Protocol Initiated. Difficulty: {}.",
        level,
        difficulty.as_str()
    )
}

/// Canned briefing for a backend that failed mid-request
pub fn offline_briefing(level: u32) -> String {
    format!("System Offline. Tactical uplink failed. Engaging manual override for Level {level}.")
}

/// Always-offline source; the fetcher resolves it to [`fallback_briefing`]
#[derive(Debug, Default)]
pub struct NoLoreSource;

impl LoreSource for NoLoreSource {
    fn mission_briefing(
        &self,
        _level: u32,
        _difficulty: Difficulty,
        _last_unlocked: Option<WeaponType>,
    ) -> Result<String, LoreError> {
        Err(LoreError::Unavailable)
    }
}

/// Detached briefing fetcher
///
/// Each request runs on a background thread and delivers over a channel; the
/// caller polls without blocking. Application is last-write-wins: a
/// generation counter marks every request, and only results carrying the
/// current generation are ever surfaced, so stale responses (or ones landing
/// after [`LoreFetcher::cancel`]) evaporate.
pub struct LoreFetcher {
    tx: Sender<(u64, String)>,
    rx: Receiver<(u64, String)>,
    generation: u64,
}

impl Default for LoreFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl LoreFetcher {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            generation: 0,
        }
    }

    /// Kick off a briefing request, superseding any still in flight
    pub fn request(
        &mut self,
        source: Arc<dyn LoreSource>,
        level: u32,
        difficulty: Difficulty,
        last_unlocked: Option<WeaponType>,
    ) {
        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();

        thread::spawn(move || {
            let text = match source.mission_briefing(level, difficulty, last_unlocked) {
                Ok(text) => text,
                Err(LoreError::Unavailable) => fallback_briefing(level, difficulty),
                Err(LoreError::Failed(reason)) => {
                    log::warn!("lore request for level {level} failed: {reason}");
                    offline_briefing(level)
                }
            };
            // The receiver may be gone if the fetcher was torn down
            let _ = tx.send((generation, text));
        });
    }

    /// Invalidate every in-flight request (the menu was dismissed)
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    /// Non-blocking poll. Returns the newest briefing for the current
    /// request, if one arrived since the last call.
    pub fn poll(&mut self) -> Option<String> {
        let mut latest = None;
        while let Ok((generation, text)) = self.rx.try_recv() {
            if generation == self.generation {
                latest = Some(text);
            }
        }
        latest
    }
}
